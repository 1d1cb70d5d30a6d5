//! Tree-walking rule engine.

use rowan::WalkEvent;

use super::info::DiagnosticInfo;
use super::sink::DiagnosticSink;
use crate::context::DocumentContext;
use crate::error::Result;
use crate::parser::SyntaxNode;

/// What the walker does after visiting a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the node's children
    Children,
    /// Continue with the next sibling
    Skip,
}

/// A rule inspecting nodes in source order.
///
/// Nodes the visitor does not handle fall through to the default, which
/// descends into children.
pub trait TreeVisitor {
    fn visit_node(
        &mut self,
        node: &SyntaxNode,
        cx: &DocumentContext,
        sink: &mut DiagnosticSink<'_>,
    ) -> Result<Walk> {
        let _ = (node, cx, sink);
        Ok(Walk::Children)
    }
}

/// Visit `root` and its descendants in preorder
pub fn walk(
    root: &SyntaxNode,
    visitor: &mut impl TreeVisitor,
    cx: &DocumentContext,
    sink: &mut DiagnosticSink<'_>,
) -> Result<()> {
    let mut preorder = root.preorder();
    while let Some(event) = preorder.next() {
        if let WalkEvent::Enter(node) = event {
            if visitor.visit_node(&node, cx, sink)? == Walk::Skip {
                preorder.skip_subtree();
            }
        }
    }
    Ok(())
}

/// A diagnostic rule. One instance runs once over one document.
pub trait DiagnosticRule: Send {
    fn info(&self) -> &'static DiagnosticInfo;

    fn check(&mut self, cx: &DocumentContext, sink: &mut DiagnosticSink<'_>) -> Result<()>;
}
