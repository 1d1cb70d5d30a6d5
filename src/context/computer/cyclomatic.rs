//! Cyclomatic complexity: one plus the number of decision points.

use super::Computer;
use super::complexity::{ComplexityData, compute_with, has_statements};
use crate::context::DocumentContext;
use crate::error::Result;
use crate::parser::{SyntaxKind, SyntaxNode};

#[derive(Debug, Clone, Copy, Default)]
pub struct CyclomaticComplexityComputer;

impl Computer for CyclomaticComplexityComputer {
    type Output = ComplexityData;

    fn compute(&self, cx: &DocumentContext) -> Result<ComplexityData> {
        compute_with(cx, |node, method| score(node, method.is_some()))
    }
}

fn score(node: &SyntaxNode, is_method: bool) -> u32 {
    let decisions = node
        .descendants_with_tokens()
        .filter(|element| is_decision(element.kind()))
        .count() as u32;

    let base = u32::from(is_method || has_statements(node));
    base + decisions
}

fn is_decision(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IF_BRANCH
            | SyntaxKind::ELSIF_BRANCH
            | SyntaxKind::WHILE_STATEMENT
            | SyntaxKind::FOR_STATEMENT
            | SyntaxKind::FOR_EACH_STATEMENT
            | SyntaxKind::EXCEPT_BLOCK
            | SyntaxKind::TERNARY_OPERATOR
            | SyntaxKind::GOTO_STATEMENT
            | SyntaxKind::AND_KW
            | SyntaxKind::OR_KW
    )
}
