//! Diagnostic findings.

use std::sync::Arc;

use crate::base::Span;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a reported diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Information => 3,
            Severity::Hint => 4,
        }
    }
}

/// One finding reported by a diagnostic rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Range of the offending code (0-indexed).
    pub range: Span,
    pub severity: Severity,
    /// Code of the rule that reported it (e.g., "CodeOutOfRegion").
    pub code: &'static str,
    pub message: Arc<str>,
}

impl Diagnostic {
    pub fn new(
        range: Span,
        severity: Severity,
        code: &'static str,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            range,
            severity,
            code,
            message: message.into(),
        }
    }

    /// Zero-based line of the first character
    pub fn start_line(&self) -> usize {
        self.range.start.line
    }
}
