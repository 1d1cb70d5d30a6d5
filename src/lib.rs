//! # bsl-analysis
//!
//! Document analysis core for 1C:Enterprise (BSL) and OneScript modules:
//! a lossless parser, a per-document cache of derived views and a
//! diagnostic rule engine.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! diagnostics → Rule metadata, tree visitor, rule registry and runner
//!   ↓
//! context     → DocumentContext, lazy views, computers, ServerContext
//!   ↓
//! syntax      → SyntaxFile: text, token stream, parse tree, line index
//!   ↓
//! parser      → Logos lexer, recursive-descent parser, SyntaxKind
//!   ↓
//! base        → Primitives (Position, Span, DocumentUri, LineIndex)
//! ```
//!
//! `config` and `error` are shared by every layer.

// ============================================================================
// MODULES (dependency order: base → parser → syntax → context → diagnostics)
// ============================================================================

/// Foundation types: Position, Span, DocumentUri, LineIndex
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, syntax kinds
pub mod parser;

/// Syntax: parsed document with tokens and line index
pub mod syntax;

/// Document context: lazily computed, invalidatable views of a document
pub mod context;

/// Diagnostics: rule metadata, tree-walking rules, rule runner
pub mod diagnostics;

/// Analysis options
pub mod config;

/// Error types
pub mod error;

// Re-export commonly needed items
pub use parser::keywords;

// Re-export foundation types
pub use base::{DocumentUri, FileType, LineIndex, Position, Span, TextRange, TextSize};

pub use config::{AnalysisOptions, DiagnosticsMode, DiagnosticsOptions, Language};
pub use context::{DocumentContext, ServerContext};
pub use diagnostics::{Diagnostic, DiagnosticComputer, Severity};
pub use error::{ContextError, Result};
pub use syntax::SyntaxFile;
