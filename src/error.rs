//! Error types for document analysis.

use thiserror::Error;

use crate::base::DocumentUri;

/// Errors surfaced by document context accessors and computers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A derived view needs the document text, but it was cleared.
    #[error("content of {uri} is unavailable")]
    ContentUnavailable { uri: DocumentUri },

    /// A requested line lies past the end of the document.
    #[error("line {line} is out of bounds (document has {line_count} lines)")]
    OutOfBounds { line: usize, line_count: usize },

    /// A requested column lies past the end of its line.
    #[error("column {column} is out of bounds on line {line} ({len} characters)")]
    ColumnOutOfBounds {
        line: usize,
        column: usize,
        len: usize,
    },

    /// A diagnostic rule failed while visiting the tree.
    #[error("diagnostic {code} failed: {message}")]
    Rule { code: &'static str, message: String },
}

impl ContextError {
    /// Create a content-unavailable error.
    pub fn content_unavailable(uri: &DocumentUri) -> Self {
        Self::ContentUnavailable { uri: uri.clone() }
    }

    /// Create a rule failure.
    pub fn rule(code: &'static str, message: impl Into<String>) -> Self {
        Self::Rule {
            code,
            message: message.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T, E = ContextError> = std::result::Result<T, E>;
