//! Uniform structural descent over a unit
//!
//! The walker visits every nested executable region the same way, so a
//! construction inside a catch arm, a property setter, or an anonymous
//! delegate body is found by the same rule that finds one in a plain method
//! body. There is exactly one descent rule; the syntactic variety lives in
//! the grammar adapters, not here.

use crate::ir::{ConstructionSite, Node, Unit};

/// Walk a unit, yielding every construction site in source-appearance order
/// (top-to-bottom, left-to-right).
///
/// The returned iterator is lazy and restartable: calling `walk` again on an
/// unchanged unit yields an identical sequence.
pub fn walk(unit: &Unit) -> Walker<'_> {
    let mut stack = Vec::with_capacity(unit.members.len());
    for node in unit.members.iter().rev() {
        stack.push(Frame { node, member: "" });
    }
    Walker { stack }
}

struct Frame<'a> {
    node: &'a Node,
    /// Nearest enclosing named member at this point of the descent
    member: &'a str,
}

/// Lazy preorder iterator over [`ConstructionSite`]s
pub struct Walker<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Walker<'a> {
    fn push_children(&mut self, children: &'a [Node], member: &'a str) {
        // Reversed so the pop order is source order
        for node in children.iter().rev() {
            self.stack.push(Frame { node, member });
        }
    }
}

impl<'a> Iterator for Walker<'a> {
    type Item = ConstructionSite;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame.node {
                Node::Member { name, body } => {
                    self.push_children(body, name);
                }
                Node::Block(children) => {
                    self.push_children(children, frame.member);
                }
                Node::Construction {
                    type_name,
                    args,
                    span,
                } => {
                    return Some(ConstructionSite {
                        type_name: type_name.clone(),
                        args: args.clone(),
                        span: *span,
                        enclosing_member: frame.member.to_string(),
                    });
                }
            }
        }
        None
    }
}
