//! Grammar-neutral unit model
//!
//! Both surface grammars are lowered into this representation before any
//! rule logic runs, so the walker/classifier/emitter pipeline is written
//! once. The model is deliberately small: a unit is a tree in which a block
//! contains nested executable regions, and construction expressions are the
//! only leaves the rule cares about. Property accessors, try/catch/finally
//! arms, async continuations and anonymous delegates all lower to the same
//! `Block` shape, which is what makes the later descent uniform.

use crate::diagnostic::Span;

/// A type descriptor as resolved by the host's type-resolution collaborator
pub type TypeRef = String;

/// Static type of a constructor argument.
///
/// `Unresolved` covers arguments whose type the host could not determine
/// (incomplete or invalid upstream compilation). Such sites are skipped
/// rather than reported: no diagnostics from unverifiable information.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgType {
    Resolved(TypeRef),
    Unresolved,
}

impl ArgType {
    /// Create a resolved argument type
    pub fn resolved(name: &str) -> Self {
        ArgType::Resolved(name.to_string())
    }

    /// The resolved type name, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            ArgType::Resolved(name) => Some(name),
            ArgType::Unresolved => None,
        }
    }
}

/// A parsed, type-resolved source unit ready for analysis
#[derive(Debug, Clone, Default)]
pub struct Unit {
    /// Unit name (typically the source file path)
    pub name: String,
    /// Top-level members in source order
    pub members: Vec<Node>,
}

impl Unit {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
        }
    }

    pub fn with_members(name: &str, members: Vec<Node>) -> Self {
        Self {
            name: name.to_string(),
            members,
        }
    }
}

/// One node of the neutral tree.
///
/// Children are always in source-appearance order; the walker relies on
/// that for deterministic diagnostic ordering.
#[derive(Debug, Clone)]
pub enum Node {
    /// A named executable member: method, constructor, property accessor,
    /// or a field whose initializer contains executable code
    Member {
        /// Member identifier, reported as the enclosing member of any
        /// construction found inside
        name: String,
        /// Body in source order
        body: Vec<Node>,
    },

    /// Any nested executable region: a try/catch/finally arm, the body of
    /// an anonymous function or delegate, an async continuation body.
    /// The walker descends into blocks without caring what construct
    /// produced them.
    Block(Vec<Node>),

    /// An object-construction expression
    Construction {
        /// Constructed type name
        type_name: String,
        /// Static types of the supplied arguments, in argument order
        args: Vec<ArgType>,
        /// Span whose start is the type-name token
        span: Span,
    },
}

impl Node {
    /// Convenience constructor for a member node
    pub fn member(name: &str, body: Vec<Node>) -> Self {
        Node::Member {
            name: name.to_string(),
            body,
        }
    }

    /// Convenience constructor for a construction node
    pub fn construction(type_name: &str, args: Vec<ArgType>, span: Span) -> Self {
        Node::Construction {
            type_name: type_name.to_string(),
            args,
            span,
        }
    }
}

/// An occurrence of object-instantiation syntax, the unit of analysis.
///
/// Produced once per construction expression found in a unit; immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionSite {
    /// Constructed type name
    pub type_name: String,
    /// Static types of the supplied arguments, in argument order
    pub args: Vec<ArgType>,
    /// Span whose start is the type-name token
    pub span: Span,
    /// Nearest enclosing named member
    pub enclosing_member: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_type_name() {
        assert_eq!(ArgType::resolved("XmlReader").name(), Some("XmlReader"));
        assert_eq!(ArgType::Unresolved.name(), None);
    }

    #[test]
    fn test_unit_construction() {
        let unit = Unit::with_members(
            "a.src",
            vec![Node::member(
                "M",
                vec![Node::construction("T", vec![], Span::point(1, 1))],
            )],
        );
        assert_eq!(unit.members.len(), 1);
    }
}
