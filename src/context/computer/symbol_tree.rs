//! Extraction of methods, regions and module variables.

use smol_str::SmolStr;

use super::Computer;
use crate::base::TextRange;
use crate::context::DocumentContext;
use crate::context::symbol::{MethodSymbol, RegionId, RegionSymbol, SymbolTree, VariableSymbol};
use crate::error::Result;
use crate::parser::{SyntaxKind, SyntaxNode};
use crate::syntax::SyntaxFile;

#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolTreeComputer;

impl Computer for SymbolTreeComputer {
    type Output = SymbolTree;

    fn compute(&self, cx: &DocumentContext) -> Result<SymbolTree> {
        let syntax = cx.syntax()?;
        Ok(build(&syntax))
    }
}

/// An opened `#Region` waiting for its `#EndRegion`
struct OpenRegion {
    name: SmolStr,
    start: TextRange,
    name_range: TextRange,
}

pub(crate) fn build(syntax: &SyntaxFile) -> SymbolTree {
    let root = syntax.root();
    let regions = collect_regions(syntax, &root);

    let methods = root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::SUB)
        .filter_map(|sub| method_symbol(syntax, &regions, &sub))
        .collect();

    let variables = root
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::MODULE_VAR_DECLARATION)
        .filter_map(|decl| {
            let name = decl
                .children()
                .find(|n| n.kind() == SyntaxKind::VAR_NAME)?;
            Some(VariableSymbol {
                name: SmolStr::new(name.text().to_string()),
                export: has_token(&decl, SyntaxKind::EXPORT_KW),
                range: syntax.node_span(&decl),
                region: innermost_region(&regions, decl.text_range()),
            })
        })
        .collect();

    SymbolTree {
        methods,
        regions,
        variables,
    }
}

/// Matched region pairs ordered by start, with parent links.
/// Unmatched `#Region` or `#EndRegion` markers are ignored.
fn collect_regions(syntax: &SyntaxFile, root: &SyntaxNode) -> Vec<RegionSymbol> {
    let mut open: Vec<OpenRegion> = Vec::new();
    let mut closed: Vec<(OpenRegion, TextRange)> = Vec::new();

    for node in root.descendants().filter(|n| n.kind() == SyntaxKind::PREPROCESSOR) {
        let Some(instruction) = node.children().next() else {
            continue;
        };
        match instruction.kind() {
            SyntaxKind::REGION_START => {
                let name = instruction
                    .children()
                    .find(|n| n.kind() == SyntaxKind::REGION_NAME);
                open.push(OpenRegion {
                    name: name
                        .as_ref()
                        .map(|n| SmolStr::new(n.text().to_string()))
                        .unwrap_or_default(),
                    start: node.text_range(),
                    name_range: name.map_or(node.text_range(), |n| n.text_range()),
                });
            }
            SyntaxKind::REGION_END => {
                if let Some(region) = open.pop() {
                    let range = region.start.cover(node.text_range());
                    closed.push((region, range));
                }
            }
            _ => {}
        }
    }

    closed.sort_by_key(|(_, range)| range.start());

    let mut regions: Vec<RegionSymbol> = Vec::with_capacity(closed.len());
    let mut stack: Vec<usize> = Vec::new();
    for (region, range) in closed {
        while let Some(&top) = stack.last() {
            if regions[top].text_range.contains_range(range) {
                break;
            }
            stack.pop();
        }
        let parent = stack.last().copied();
        let id = regions.len();
        if let Some(parent) = parent {
            regions[parent].children.push(RegionId(id));
        }
        regions.push(RegionSymbol {
            name: region.name,
            range: syntax.span(range),
            name_range: syntax.span(region.name_range),
            text_range: range,
            parent: parent.map(RegionId),
            children: Vec::new(),
        });
        stack.push(id);
    }

    regions
}

/// The deepest region containing `range`
fn innermost_region(regions: &[RegionSymbol], range: TextRange) -> Option<RegionId> {
    regions
        .iter()
        .enumerate()
        .filter(|(_, region)| region.text_range.contains_range(range))
        .max_by_key(|(_, region)| region.text_range.start())
        .map(|(id, _)| RegionId(id))
}

fn method_symbol(syntax: &SyntaxFile, regions: &[RegionSymbol], sub: &SyntaxNode) -> Option<MethodSymbol> {
    let method = sub.children().next()?;
    let declaration = method
        .children()
        .find(|n| matches!(n.kind(), SyntaxKind::PROC_DECLARATION | SyntaxKind::FUNC_DECLARATION))?;
    let name = declaration
        .children()
        .find(|n| n.kind() == SyntaxKind::SUB_NAME)?;

    Some(MethodSymbol {
        name: SmolStr::new(name.text().to_string()),
        is_function: method.kind() == SyntaxKind::FUNCTION,
        export: has_token(&declaration, SyntaxKind::EXPORT_KW),
        range: syntax.node_span(sub),
        sub_name_range: syntax.node_span(&name),
        node_range: sub.text_range(),
        region: innermost_region(regions, sub.text_range()),
    })
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}
