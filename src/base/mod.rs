//! Foundation types for the analysis core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Span`] - Zero-based line/column positions
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`DocumentUri`], [`FileType`] - Document identity and kind
//!
//! This module has NO dependencies on other crate modules.

mod line_index;
mod position;
mod uri;

pub use line_index::LineIndex;
pub use position::{Position, Span};
pub use uri::{DocumentUri, FileType};

// Re-export text-size types for convenience
pub use text_size::{self, TextRange, TextSize};
