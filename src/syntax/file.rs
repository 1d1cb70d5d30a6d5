//! Syntax file wrapper for a parsed BSL module.
//!
//! Bundles the text, its token stream and the rowan green tree. The green
//! tree is `Send + Sync`, so a `SyntaxFile` can be shared across threads;
//! `SyntaxNode`s are created on demand and never stored.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{LineIndex, Span, TextRange, TextSize};
use crate::parser::{self, GreenNode, SyntaxError, SyntaxKind, SyntaxNode};

/// One lexed token of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: SmolStr,
    pub range: TextRange,
    /// 1-based line of the token start
    pub line: usize,
    pub span: Span,
}

impl Token {
    /// Whether the token is on the default channel (not whitespace or comment)
    pub fn is_default_channel(&self) -> bool {
        !self.kind.is_trivia()
    }
}

/// A parsed module: text, tokens, CST and line index.
#[derive(Debug, Clone)]
pub struct SyntaxFile {
    text: Arc<str>,
    green: GreenNode,
    tokens: Arc<[Token]>,
    line_index: LineIndex,
    errors: Vec<SyntaxError>,
}

impl SyntaxFile {
    /// Lex and parse `text`.
    pub fn new(text: Arc<str>) -> Self {
        let line_index = LineIndex::new(&text);
        let tokens: Arc<[Token]> = parser::Lexer::new(&text)
            .map(|token| {
                let range = TextRange::at(token.offset, TextSize::of(token.text));
                Token {
                    kind: token.kind,
                    text: SmolStr::new(token.text),
                    range,
                    line: line_index.line_of(range.start()) + 1,
                    span: line_index.span(&text, range),
                }
            })
            .collect();
        let parse = parser::parse(&text);

        Self {
            text,
            green: parse.green,
            tokens,
            line_index,
            errors: parse.errors,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Root node of the CST
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// All tokens, trivia included
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn tokens_from_default_channel(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_default_channel())
    }

    /// Line comment tokens
    pub fn comments(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::LINE_COMMENT)
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Check if parsing had errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get parse errors
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Convert a byte range of this file to a line/column span
    pub fn span(&self, range: TextRange) -> Span {
        self.line_index.span(&self.text, range)
    }

    /// Span of a node; node ranges never include surrounding trivia
    pub fn node_span(&self, node: &SyntaxNode) -> Span {
        self.span(node.text_range())
    }
}
