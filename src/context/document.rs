//! Per-document analysis cache.
//!
//! A [`DocumentContext`] owns one document's text and lazily derives views
//! from it. Views live in two lock domains:
//!
//! - **compute**: content lines, module type, support variants, symbol tree,
//!   complexity, diagnostic ignorance and metrics. The lock is re-entrant
//!   because views cascade (metrics → symbol tree → complexity).
//! - **diagnostics**: the diagnostics list only, so an expensive diagnostics
//!   run never blocks cheap views and vice versa.
//!
//! Operations touching both domains lock diagnostics first, then compute:
//! computing diagnostics holds the diagnostics lock while it reads compute
//! views.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tracing::{debug, trace};

use super::computer::{
    CognitiveComplexityComputer, ComplexityData, Computer, CyclomaticComplexityComputer,
    DiagnosticIgnoranceComputer, DiagnosticIgnoranceData, SymbolTreeComputer,
};
use super::lazy::Lazy;
use super::metrics::{MetricStorage, MetricsComputer};
use super::server::{ModuleType, ServerContext, SupportConfiguration, SupportVariant};
use super::symbol::SymbolTree;
use crate::base::{DocumentUri, FileType, Span};
use crate::diagnostics::Diagnostic;
use crate::error::{ContextError, Result};
use crate::parser::SyntaxNode;
use crate::syntax::{SyntaxFile, Token};

/// Text and parse state, replaced together under the compute lock
#[derive(Default)]
struct ComputeState {
    content: Option<Arc<str>>,
    syntax: Option<Arc<SyntaxFile>>,
}

/// Analysis cache of one open document.
pub struct DocumentContext {
    uri: DocumentUri,
    file_type: FileType,
    server: Arc<ServerContext>,

    compute: ReentrantMutex<RefCell<ComputeState>>,
    diagnostics_lock: ReentrantMutex<()>,

    content_list: Lazy<Vec<String>>,
    module_type: Lazy<ModuleType>,
    support_variants: Lazy<BTreeMap<SupportConfiguration, SupportVariant>>,
    symbol_tree: Lazy<SymbolTree>,
    cognitive_complexity: Lazy<ComplexityData>,
    cyclomatic_complexity: Lazy<ComplexityData>,
    diagnostic_ignorance: Lazy<DiagnosticIgnoranceData>,
    metrics: Lazy<MetricStorage>,
    diagnostics: Lazy<Vec<Diagnostic>>,
}

impl DocumentContext {
    /// Create a context and parse `content` eagerly.
    pub fn new(uri: DocumentUri, content: impl Into<Arc<str>>, server: Arc<ServerContext>) -> Self {
        let content = content.into();
        let file_type = FileType::from_uri(&uri);
        let syntax = Arc::new(SyntaxFile::new(Arc::clone(&content)));
        debug!(uri = %uri, file_type = file_type.as_str(), "created document context");

        Self {
            uri,
            file_type,
            server,
            compute: ReentrantMutex::new(RefCell::new(ComputeState {
                content: Some(content),
                syntax: Some(syntax),
            })),
            diagnostics_lock: ReentrantMutex::new(()),
            content_list: Lazy::new(),
            module_type: Lazy::new(),
            support_variants: Lazy::new(),
            symbol_tree: Lazy::new(),
            cognitive_complexity: Lazy::new(),
            cyclomatic_complexity: Lazy::new(),
            diagnostic_ignorance: Lazy::new(),
            metrics: Lazy::new(),
            diagnostics: Lazy::new(),
        }
    }

    // ========================================================================
    // PURE ACCESSORS
    // ========================================================================

    pub fn uri(&self) -> &DocumentUri {
        &self.uri
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn server_context(&self) -> &Arc<ServerContext> {
        &self.server
    }

    // ========================================================================
    // TEXT AND TOKENS
    // ========================================================================

    /// Current text
    pub fn content(&self) -> Result<Arc<str>> {
        let guard = self.compute.lock();
        let state = guard.borrow();
        state
            .content
            .clone()
            .ok_or_else(|| ContextError::content_unavailable(&self.uri))
    }

    /// Token stream and parse tree of the current text
    pub fn syntax(&self) -> Result<Arc<SyntaxFile>> {
        let guard = self.compute.lock();
        let state = guard.borrow();
        state
            .syntax
            .clone()
            .ok_or_else(|| ContextError::content_unavailable(&self.uri))
    }

    /// Root node of the parse tree
    pub fn ast(&self) -> Result<SyntaxNode> {
        Ok(self.syntax()?.root())
    }

    pub fn tokens(&self) -> Result<Vec<Token>> {
        Ok(self.syntax()?.tokens().to_vec())
    }

    pub fn tokens_from_default_channel(&self) -> Result<Vec<Token>> {
        Ok(self.syntax()?.tokens_from_default_channel().cloned().collect())
    }

    pub fn comments(&self) -> Result<Vec<Token>> {
        Ok(self.syntax()?.comments().cloned().collect())
    }

    // ========================================================================
    // DERIVED VIEWS
    // ========================================================================

    /// Text split on `\n`; a trailing `\r` stays on its line
    pub fn content_list(&self) -> Result<Arc<Vec<String>>> {
        self.compute_view("content list", &self.content_list, || {
            Ok(self.content()?.split('\n').map(str::to_owned).collect())
        })
    }

    pub fn module_type(&self) -> Result<Arc<ModuleType>> {
        self.compute_view("module type", &self.module_type, || {
            Ok(self.server.module_type(&self.uri))
        })
    }

    pub fn support_variants(&self) -> Result<Arc<BTreeMap<SupportConfiguration, SupportVariant>>> {
        self.compute_view("support variants", &self.support_variants, || {
            Ok(self.server.module_support(&self.uri))
        })
    }

    pub fn symbol_tree(&self) -> Result<Arc<SymbolTree>> {
        self.compute_view("symbol tree", &self.symbol_tree, || {
            SymbolTreeComputer.compute(self)
        })
    }

    pub fn cognitive_complexity_data(&self) -> Result<Arc<ComplexityData>> {
        self.compute_view("cognitive complexity", &self.cognitive_complexity, || {
            CognitiveComplexityComputer.compute(self)
        })
    }

    pub fn cyclomatic_complexity_data(&self) -> Result<Arc<ComplexityData>> {
        self.compute_view("cyclomatic complexity", &self.cyclomatic_complexity, || {
            CyclomaticComplexityComputer.compute(self)
        })
    }

    pub fn diagnostic_ignorance(&self) -> Result<Arc<DiagnosticIgnoranceData>> {
        self.compute_view("diagnostic ignorance", &self.diagnostic_ignorance, || {
            DiagnosticIgnoranceComputer.compute(self)
        })
    }

    pub fn metrics(&self) -> Result<Arc<MetricStorage>> {
        self.compute_view("metrics", &self.metrics, || MetricsComputer.compute(self))
    }

    pub fn diagnostics(&self) -> Result<Arc<Vec<Diagnostic>>> {
        self.diagnostics.get_or_compute(&self.diagnostics_lock, || {
            trace!(uri = %self.uri, view = "diagnostics", "computing view");
            self.server.diagnostic_computer().compute(self)
        })
    }

    /// Diagnostics computed so far; never triggers a computation
    pub fn computed_diagnostics(&self) -> Arc<Vec<Diagnostic>> {
        self.diagnostics.peek().unwrap_or_default()
    }

    fn compute_view<T>(
        &self,
        view: &'static str,
        cell: &Lazy<T>,
        compute: impl FnOnce() -> Result<T>,
    ) -> Result<Arc<T>> {
        cell.get_or_compute(&self.compute, || {
            trace!(uri = %self.uri, view, "computing view");
            compute()
        })
    }

    // ========================================================================
    // TEXT RANGES
    // ========================================================================

    /// Text covered by `span`, lines joined with `\n`.
    ///
    /// Columns count characters.
    pub fn text(&self, span: Span) -> Result<String> {
        let lines = self.content_list()?;
        let line = |index: usize| {
            lines.get(index).map(String::as_str).ok_or(ContextError::OutOfBounds {
                line: index,
                line_count: lines.len(),
            })
        };
        let start_line = line(span.start.line)?;
        let end_line = line(span.end.line)?;

        if span.start.line == span.end.line {
            return slice_chars(start_line, span.start.line, span.start.column, span.end.column)
                .map(str::to_owned);
        }

        let mut text = String::new();
        text.push_str(slice_chars(
            start_line,
            span.start.line,
            span.start.column,
            start_line.chars().count(),
        )?);
        text.push('\n');
        for interior in lines.iter().take(span.end.line).skip(span.start.line + 1) {
            text.push_str(interior);
            text.push('\n');
        }
        text.push_str(slice_chars(end_line, span.end.line, 0, span.end.column)?);
        Ok(text)
    }

    // ========================================================================
    // MUTATORS
    // ========================================================================

    /// Replace the text, dropping every view computed from the old one.
    pub fn rebuild(&self, content: impl Into<Arc<str>>) {
        let content = content.into();
        let syntax = Arc::new(SyntaxFile::new(Arc::clone(&content)));

        let guard = self.compute.lock();
        self.clear_text_views();
        self.symbol_tree.clear();
        {
            let mut state = guard.borrow_mut();
            state.content = Some(content);
            state.syntax = Some(syntax);
        }
        debug!(uri = %self.uri, "rebuilt document context");
    }

    /// Drop the text and every view derived from it except the symbol tree.
    ///
    /// Used when a document is closed but its context stays referenced.
    pub fn clear_secondary_data(&self) {
        let _diagnostics = self.diagnostics_lock.lock();
        let guard = self.compute.lock();
        {
            let mut state = guard.borrow_mut();
            state.content = None;
            state.syntax = None;
        }
        self.clear_text_views();
        debug!(uri = %self.uri, "cleared secondary data");
    }

    fn clear_text_views(&self) {
        self.content_list.clear();
        self.cognitive_complexity.clear();
        self.cyclomatic_complexity.clear();
        self.metrics.clear();
        self.diagnostic_ignorance.clear();
        self.diagnostics.clear();
    }

    #[cfg(test)]
    pub(crate) fn for_test(content: &str) -> Self {
        Self::new(
            DocumentUri::from("file:///test/Module.bsl"),
            content,
            Arc::new(ServerContext::default()),
        )
    }
}

impl std::fmt::Debug for DocumentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentContext")
            .field("uri", &self.uri)
            .field("file_type", &self.file_type)
            .finish_non_exhaustive()
    }
}

/// Characters `start..end` of `line`
fn slice_chars(line: &str, line_index: usize, start: usize, end: usize) -> Result<&str> {
    let len = line.chars().count();
    let out_of_bounds = |column| ContextError::ColumnOutOfBounds {
        line: line_index,
        column,
        len,
    };
    if start > len {
        return Err(out_of_bounds(start));
    }
    if end > len || end < start {
        return Err(out_of_bounds(end));
    }

    let byte = |column: usize| {
        line.char_indices()
            .nth(column)
            .map_or(line.len(), |(offset, _)| offset)
    };
    Ok(&line[byte(start)..byte(end)])
}
