//! Code placed outside of any `#Region`.
//!
//! Module variables, methods and top-level statements must each live inside
//! a region. A module without regions is reported once as a whole.

use super::info::{
    CompatibilityMode, DiagnosticInfo, DiagnosticScope, DiagnosticSeverity, DiagnosticTag,
    DiagnosticType,
};
use super::sink::DiagnosticSink;
use super::visitor::{DiagnosticRule, TreeVisitor, Walk, walk};
use crate::base::Span;
use crate::context::DocumentContext;
use crate::error::Result;
use crate::parser::{SyntaxKind, SyntaxNode};

#[derive(Debug, Default)]
pub struct CodeOutOfRegion {
    /// Ranges of file-level regions, collected when entering the file
    regions: Vec<Span>,
}

impl CodeOutOfRegion {
    pub const INFO: DiagnosticInfo = DiagnosticInfo {
        code: "CodeOutOfRegion",
        diagnostic_type: DiagnosticType::CodeSmell,
        severity: DiagnosticSeverity::Info,
        scope: DiagnosticScope::Bsl,
        minutes_to_fix: 1,
        tags: &[DiagnosticTag::Standard],
        compatibility_mode: CompatibilityMode::new(8, 3, 1),
        activated_by_default: true,
        message_en: "Code out of region",
        message_ru: "Код расположен вне области",
    };

    pub fn boxed() -> Box<dyn DiagnosticRule> {
        Box::new(Self::default())
    }

    fn in_region(&self, span: &Span) -> bool {
        self.regions.iter().any(|region| region.contains_span(span))
    }

    fn visit_file(
        &mut self,
        node: &SyntaxNode,
        cx: &DocumentContext,
        sink: &mut DiagnosticSink<'_>,
    ) -> Result<Walk> {
        self.regions.clear();
        let symbols = cx.symbol_tree()?;

        if symbols.file_level_regions().next().is_none() {
            let has_code = node
                .descendants_with_tokens()
                .filter_map(|e| e.into_token())
                .any(|t| !t.kind().is_trivia());
            if has_code {
                sink.add_node(node);
            }
            return Ok(Walk::Skip);
        }

        self.regions = symbols.file_level_regions().map(|r| r.range).collect();
        Ok(Walk::Children)
    }

    fn visit_module_var(
        &mut self,
        node: &SyntaxNode,
        cx: &DocumentContext,
        sink: &mut DiagnosticSink<'_>,
    ) -> Result<Walk> {
        let syntax = cx.syntax()?;
        let declaration = node
            .children()
            .find(|child| child.kind() != SyntaxKind::PREPROCESSOR);

        if let Some(declaration) = declaration {
            if !self.in_region(&syntax.node_span(&declaration)) {
                sink.add_node(node);
            }
        }
        Ok(Walk::Skip)
    }

    fn visit_sub(
        &mut self,
        node: &SyntaxNode,
        cx: &DocumentContext,
        sink: &mut DiagnosticSink<'_>,
    ) -> Result<Walk> {
        let symbols = cx.symbol_tree()?;
        if let Some(method) = symbols.method_symbol(node) {
            if method.region.is_none() {
                sink.add_span(method.sub_name_range);
            }
        }
        Ok(Walk::Skip)
    }

    fn visit_file_code_block(
        &mut self,
        node: &SyntaxNode,
        cx: &DocumentContext,
        sink: &mut DiagnosticSink<'_>,
    ) -> Result<Walk> {
        let syntax = cx.syntax()?;
        let statements = node.descendants().filter(|n| {
            n.kind() == SyntaxKind::STATEMENT
                && n.parent().is_some_and(|p| p.kind() == SyntaxKind::CODE_BLOCK)
                && !n.descendants().any(|d| d.kind() == SyntaxKind::PREPROCESSOR)
        });

        for statement in statements {
            if !self.in_region(&syntax.node_span(&statement)) {
                sink.add_node(&statement);
            }
        }
        Ok(Walk::Skip)
    }
}

impl TreeVisitor for CodeOutOfRegion {
    fn visit_node(
        &mut self,
        node: &SyntaxNode,
        cx: &DocumentContext,
        sink: &mut DiagnosticSink<'_>,
    ) -> Result<Walk> {
        match node.kind() {
            SyntaxKind::FILE => self.visit_file(node, cx, sink),
            SyntaxKind::MODULE_VAR => self.visit_module_var(node, cx, sink),
            SyntaxKind::SUB => self.visit_sub(node, cx, sink),
            SyntaxKind::FILE_CODE_BLOCK_BEFORE_SUB | SyntaxKind::FILE_CODE_BLOCK => {
                self.visit_file_code_block(node, cx, sink)
            }
            _ => Ok(Walk::Children),
        }
    }
}

impl DiagnosticRule for CodeOutOfRegion {
    fn info(&self) -> &'static DiagnosticInfo {
        &Self::INFO
    }

    fn check(&mut self, cx: &DocumentContext, sink: &mut DiagnosticSink<'_>) -> Result<()> {
        let root = cx.ast()?;
        walk(&root, self, cx, sink)
    }
}
