//! Cognitive complexity: structural increments weighted by nesting.

use super::Computer;
use super::complexity::{ComplexityData, compute_with};
use crate::context::DocumentContext;
use crate::error::Result;
use crate::parser::{SyntaxKind, SyntaxNode};

#[derive(Debug, Clone, Copy, Default)]
pub struct CognitiveComplexityComputer;

impl Computer for CognitiveComplexityComputer {
    type Output = ComplexityData;

    fn compute(&self, cx: &DocumentContext) -> Result<ComplexityData> {
        compute_with(cx, |node, method| {
            let mut scorer = Scorer {
                method: method.map(str::to_lowercase),
                total: 0,
            };
            scorer.walk(node, 0);
            scorer.total
        })
    }
}

struct Scorer {
    /// Lowercased name of the enclosing method, for recursion detection
    method: Option<String>,
    total: u32,
}

impl Scorer {
    fn walk(&mut self, node: &SyntaxNode, nesting: u32) {
        for child in node.children() {
            match child.kind() {
                SyntaxKind::IF_STATEMENT => {
                    self.total += 1 + nesting;
                    for branch in child.children() {
                        if matches!(branch.kind(), SyntaxKind::ELSIF_BRANCH | SyntaxKind::ELSE_BRANCH) {
                            self.total += 1;
                        }
                        self.walk(&branch, nesting + 1);
                    }
                }
                SyntaxKind::WHILE_STATEMENT
                | SyntaxKind::FOR_STATEMENT
                | SyntaxKind::FOR_EACH_STATEMENT
                | SyntaxKind::EXCEPT_BLOCK
                | SyntaxKind::TERNARY_OPERATOR => {
                    self.total += 1 + nesting;
                    self.walk(&child, nesting + 1);
                }
                SyntaxKind::GOTO_STATEMENT => {
                    self.total += 1;
                }
                SyntaxKind::EXPRESSION | SyntaxKind::LVALUE | SyntaxKind::CALL_STATEMENT => {
                    self.total += boolean_sequences(&child);
                    self.walk(&child, nesting);
                }
                SyntaxKind::GLOBAL_METHOD_CALL => {
                    if self.is_recursive_call(&child) {
                        self.total += 1;
                    }
                    self.walk(&child, nesting);
                }
                _ => self.walk(&child, nesting),
            }
        }
    }

    fn is_recursive_call(&self, call: &SyntaxNode) -> bool {
        let Some(method) = &self.method else {
            return false;
        };
        call.children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::IDENT)
            .is_some_and(|name| name.text().to_lowercase() == *method)
    }
}

/// Number of runs of equal boolean operators among the direct tokens
fn boolean_sequences(expression: &SyntaxNode) -> u32 {
    let mut runs = 0;
    let mut previous = None;
    for token in expression
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| matches!(t.kind(), SyntaxKind::AND_KW | SyntaxKind::OR_KW))
    {
        if previous != Some(token.kind()) {
            runs += 1;
            previous = Some(token.kind());
        }
    }
    runs
}
