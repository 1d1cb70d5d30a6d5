// Parsed document representation shared by the analysis layers
pub mod file;

pub use file::{SyntaxFile, Token};

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};
