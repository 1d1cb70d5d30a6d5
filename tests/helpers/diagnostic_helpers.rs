//! Diagnostic assertion helpers.

use bsl::{Diagnostic, Span};

use crate::helpers::context_helpers::bsl_document;

/// All diagnostics of a `.bsl` source.
pub fn diagnostics_from_bsl(source: &str) -> Vec<Diagnostic> {
    bsl_document(source)
        .diagnostics()
        .expect("diagnostics should compute")
        .to_vec()
}

/// Diagnostics of a single rule.
pub fn diagnostics_of(source: &str, code: &str) -> Vec<Diagnostic> {
    diagnostics_from_bsl(source)
        .into_iter()
        .filter(|d| d.code == code)
        .collect()
}

/// Assert a source produces no diagnostics of `code`.
pub fn assert_no_diagnostics(source: &str, code: &str) {
    let found = diagnostics_of(source, code);
    assert!(
        found.is_empty(),
        "Expected no {code} diagnostics, got {}:\n{}",
        found.len(),
        found
            .iter()
            .map(|d| format!("  Line {}: {}", d.start_line() + 1, d.message))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Ranges of diagnostics, for compact comparisons.
pub fn ranges(diagnostics: &[Diagnostic]) -> Vec<Span> {
    diagnostics.iter().map(|d| d.range).collect()
}
