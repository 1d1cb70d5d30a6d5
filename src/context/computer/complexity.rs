//! Complexity results shared by the cognitive and cyclomatic computers.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::context::DocumentContext;
use crate::error::Result;
use crate::parser::{SyntaxKind, SyntaxNode};

/// Complexity of a module and of each of its methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplexityData {
    /// Sum of all methods and the module body
    pub file_complexity: u32,
    /// Complexity of statements outside any method
    pub file_code_block_complexity: u32,
    /// Per method, in declaration order
    pub methods_complexity: IndexMap<SmolStr, u32>,
}

/// Walks every method and the module-level code blocks, scoring each with
/// `score(node, method_name)`.
pub(super) fn compute_with(
    cx: &DocumentContext,
    mut score: impl FnMut(&SyntaxNode, Option<&str>) -> u32,
) -> Result<ComplexityData> {
    let symbols = cx.symbol_tree()?;
    let root = cx.ast()?;

    let mut data = ComplexityData::default();
    for child in root.children() {
        match child.kind() {
            SyntaxKind::SUBS => {
                for sub in child.children().filter(|n| n.kind() == SyntaxKind::SUB) {
                    let Some(method) = symbols.method_symbol(&sub) else {
                        continue;
                    };
                    let value = score(&sub, Some(&method.name));
                    data.file_complexity += value;
                    data.methods_complexity.insert(method.name.clone(), value);
                }
            }
            SyntaxKind::FILE_CODE_BLOCK_BEFORE_SUB | SyntaxKind::FILE_CODE_BLOCK => {
                data.file_code_block_complexity += score(&child, None);
            }
            _ => {}
        }
    }
    data.file_complexity += data.file_code_block_complexity;

    Ok(data)
}

/// Whether any statement lies under `node`
pub(super) fn has_statements(node: &SyntaxNode) -> bool {
    node.descendants().any(|n| n.kind() == SyntaxKind::STATEMENT)
}
