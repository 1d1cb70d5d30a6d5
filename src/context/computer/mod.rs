//! Computers derive one analysis view from a document context.
//!
//! Every computer is stateless and pure given the document's current text;
//! the context caches its output in a lazy cell.

mod cognitive;
mod complexity;
mod cyclomatic;
mod ignorance;
mod symbol_tree;

pub use cognitive::CognitiveComplexityComputer;
pub use complexity::ComplexityData;
pub use cyclomatic::CyclomaticComplexityComputer;
pub use ignorance::{DiagnosticIgnoranceComputer, DiagnosticIgnoranceData};
pub use symbol_tree::SymbolTreeComputer;

use super::DocumentContext;
use crate::error::Result;

/// A unit of analysis over a document context.
pub trait Computer {
    type Output;

    fn compute(&self, cx: &DocumentContext) -> Result<Self::Output>;
}
