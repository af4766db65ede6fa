//! Surface-grammar adapters
//!
//! The engine's pipeline runs against the neutral model in [`crate::ir`];
//! each supported surface grammar gets one adapter that lowers its own AST
//! shape into that model. Lowering is a pure structural mapping: object
//! creation becomes a construction node, and every nested executable region
//! (accessor body, try/catch/finally arm, lambda body, async continuation)
//! becomes a plain block, whatever keywords produced it.

use crate::diagnostic::Span;
use thiserror::Error;

pub mod basic;
pub mod curly;

/// Error while normalizing a grammar node
#[derive(Debug, Error)]
pub enum AdaptError {
    /// The node looks like object creation but cannot be mapped to a
    /// construction site (e.g. an upstream error node with no type name).
    /// The adapter skips the node and keeps lowering the rest of the unit.
    #[error("malformed construction expression at {span}")]
    MalformedConstruction { span: Span },
}
