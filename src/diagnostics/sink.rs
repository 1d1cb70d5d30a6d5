//! Per-run accumulator of diagnostics.

use std::sync::Arc;

use super::info::DiagnosticInfo;
use super::types::{Diagnostic, Severity};
use crate::base::{Span, TextRange};
use crate::config::Language;
use crate::parser::{SyntaxElement, SyntaxKind, SyntaxNode};
use crate::syntax::SyntaxFile;

/// Collects the findings of one rule over one document.
pub struct DiagnosticSink<'a> {
    info: &'static DiagnosticInfo,
    syntax: &'a SyntaxFile,
    severity: Severity,
    message: Arc<str>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> DiagnosticSink<'a> {
    pub fn new(info: &'static DiagnosticInfo, syntax: &'a SyntaxFile, language: Language) -> Self {
        Self {
            info,
            syntax,
            severity: info.lsp_severity(),
            message: Arc::from(info.message(language)),
            diagnostics: Vec::new(),
        }
    }

    pub fn info(&self) -> &'static DiagnosticInfo {
        self.info
    }

    /// Report the rule's message at `span`
    pub fn add_span(&mut self, span: Span) {
        let message = Arc::clone(&self.message);
        self.add_span_with_message(span, message);
    }

    pub fn add_span_with_message(&mut self, span: Span, message: impl Into<Arc<str>>) {
        self.diagnostics
            .push(Diagnostic::new(span, self.severity, self.info.code, message));
    }

    /// Report a node, from its first to its last significant token
    pub fn add_node(&mut self, node: &SyntaxNode) {
        let range = significant_range(node.children_with_tokens()).unwrap_or(node.text_range());
        self.add_span(self.syntax.span(range));
    }

    /// Report a node, skipping preprocessor lines it starts with
    pub fn add_node_without_preprocessor(&mut self, node: &SyntaxNode) {
        let elements = node
            .children_with_tokens()
            .skip_while(|e| e.kind() == SyntaxKind::PREPROCESSOR || e.kind().is_trivia());
        match significant_range(elements) {
            Some(range) => self.add_span(self.syntax.span(range)),
            None => self.add_node(node),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Range from the first to the last non-trivia token under `elements`
fn significant_range(elements: impl Iterator<Item = SyntaxElement>) -> Option<TextRange> {
    let mut tokens = elements
        .flat_map(|element| match element {
            SyntaxElement::Node(node) => node
                .descendants_with_tokens()
                .filter_map(|e| e.into_token())
                .collect::<Vec<_>>(),
            SyntaxElement::Token(token) => vec![token],
        })
        .filter(|token| !token.kind().is_trivia());

    let first = tokens.next()?;
    let last = tokens.last().unwrap_or_else(|| first.clone());
    Some(first.text_range().cover(last.text_range()))
}
