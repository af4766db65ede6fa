//! Curly-brace surface grammar and its adapter
//!
//! Models the front end of a C-family language: brace-delimited classes,
//! `get`/`set` accessor blocks, `try`/`catch`/`finally`, `new T(...)`
//! object creation, `=>` lambdas and `delegate` literals, `await`
//! continuations. Only the shapes the rule needs are represented; every
//! expression the host resolved but the rule ignores collapses to
//! [`Expr::Value`] carrying its static type.

use crate::diagnostic::Span;
use crate::ir::{self, ArgType, Node};
use log::debug;

use super::AdaptError;

/// A parsed curly-grammar source unit
#[derive(Debug, Clone, Default)]
pub struct SourceUnit {
    pub path: String,
    pub types: Vec<TypeDecl>,
}

/// A class or struct declaration
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub members: Vec<MemberDecl>,
}

/// A type member
#[derive(Debug, Clone)]
pub enum MemberDecl {
    /// Method body; `is_async` is informational only, the body lowers the
    /// same way either way
    Method {
        name: String,
        is_async: bool,
        body: Vec<Stmt>,
    },
    /// Instance constructor
    Ctor { body: Vec<Stmt> },
    /// Property with optional accessor bodies
    Property {
        name: String,
        getter: Option<Vec<Stmt>>,
        setter: Option<Vec<Stmt>>,
    },
    /// Field, possibly with a delegate-valued initializer
    Field {
        name: String,
        initializer: Option<Expr>,
    },
}

/// A statement
#[derive(Debug, Clone)]
pub enum Stmt {
    /// `var x = <init>;`
    Local { name: String, init: Option<Expr> },
    /// Expression statement
    Expr(Expr),
    /// `try { .. } catch (..) { .. } finally { .. }`
    Try {
        body: Vec<Stmt>,
        catches: Vec<CatchClause>,
        finally: Option<Vec<Stmt>>,
    },
    /// `if (..) { .. } else { .. }`; the condition is irrelevant to a
    /// purely type-based rule and is not modeled
    If {
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },
    /// `return <expr>;`
    Return(Option<Expr>),
    /// `x = <expr>;`
    Assign { target: String, value: Expr },
    /// Bare `{ .. }` block
    Block(Vec<Stmt>),
}

/// One `catch` clause
#[derive(Debug, Clone)]
pub struct CatchClause {
    pub exception_type: Option<String>,
    pub body: Vec<Stmt>,
}

/// An expression
#[derive(Debug, Clone)]
pub enum Expr {
    /// `new T(args)`; the span starts at the `T` token
    New {
        type_name: String,
        args: Vec<Expr>,
        span: Span,
    },
    /// `() => { .. }` or `delegate () { .. }`
    Lambda { body: Vec<Stmt> },
    /// `await <expr>`
    Await(Box<Expr>),
    /// Invocation; only the arguments can contain material for the rule
    Call { args: Vec<Expr> },
    /// Any other expression, reduced to its host-resolved static type
    /// (`None` when resolution failed upstream)
    Value { ty: Option<String> },
}

impl Expr {
    /// A resolved value expression
    pub fn value(ty: &str) -> Self {
        Expr::Value {
            ty: Some(ty.to_string()),
        }
    }

    /// A value expression whose type the host could not resolve
    pub fn unresolved() -> Self {
        Expr::Value { ty: None }
    }
}

/// Lower a curly-grammar unit into the neutral model
pub fn lower(unit: &SourceUnit) -> ir::Unit {
    let mut members = Vec::new();
    for ty in &unit.types {
        for member in &ty.members {
            lower_member(member, &mut members);
        }
    }
    ir::Unit {
        name: unit.path.clone(),
        members,
    }
}

fn lower_member(member: &MemberDecl, out: &mut Vec<Node>) {
    match member {
        MemberDecl::Method { name, body, .. } => {
            out.push(Node::member(name, lower_stmts(body)));
        }
        MemberDecl::Ctor { body } => {
            out.push(Node::member(".ctor", lower_stmts(body)));
        }
        MemberDecl::Property {
            name,
            getter,
            setter,
        } => {
            if let Some(body) = getter {
                out.push(Node::member(&format!("get_{name}"), lower_stmts(body)));
            }
            if let Some(body) = setter {
                out.push(Node::member(&format!("set_{name}"), lower_stmts(body)));
            }
        }
        MemberDecl::Field { name, initializer } => {
            if let Some(init) = initializer {
                out.push(Node::member(name, lower_expr(init)));
            }
        }
    }
}

fn lower_stmts(stmts: &[Stmt]) -> Vec<Node> {
    let mut out = Vec::new();
    for stmt in stmts {
        match stmt {
            Stmt::Local { init, .. } => {
                if let Some(init) = init {
                    out.extend(lower_expr(init));
                }
            }
            Stmt::Expr(expr) => out.extend(lower_expr(expr)),
            Stmt::Try {
                body,
                catches,
                finally,
            } => {
                // Each arm is its own region; a construction in a catch is
                // reported at its own location, never attributed to the try.
                out.push(Node::Block(lower_stmts(body)));
                for catch in catches {
                    out.push(Node::Block(lower_stmts(&catch.body)));
                }
                if let Some(body) = finally {
                    out.push(Node::Block(lower_stmts(body)));
                }
            }
            Stmt::If {
                then_body,
                else_body,
            } => {
                out.push(Node::Block(lower_stmts(then_body)));
                if let Some(body) = else_body {
                    out.push(Node::Block(lower_stmts(body)));
                }
            }
            Stmt::Return(expr) => {
                if let Some(expr) = expr {
                    out.extend(lower_expr(expr));
                }
            }
            Stmt::Assign { value, .. } => out.extend(lower_expr(value)),
            Stmt::Block(body) => out.push(Node::Block(lower_stmts(body))),
        }
    }
    out
}

fn lower_expr(expr: &Expr) -> Vec<Node> {
    let mut out = Vec::new();
    match expr {
        Expr::New {
            type_name,
            args,
            span,
        } => {
            match construction(type_name, args, *span) {
                Ok(node) => out.push(node),
                Err(err) => debug!("skipping node: {err}"),
            }
            // Arguments may themselves contain constructions or lambdas;
            // their tokens follow the type name, so they lower after it.
            for arg in args {
                out.extend(lower_expr(arg));
            }
        }
        Expr::Lambda { body } => out.push(Node::Block(lower_stmts(body))),
        Expr::Await(inner) => out.extend(lower_expr(inner)),
        Expr::Call { args } => {
            for arg in args {
                out.extend(lower_expr(arg));
            }
        }
        Expr::Value { .. } => {}
    }
    out
}

fn construction(type_name: &str, args: &[Expr], span: Span) -> Result<Node, AdaptError> {
    if type_name.is_empty() {
        return Err(AdaptError::MalformedConstruction { span });
    }
    let args = args.iter().map(arg_type).collect();
    Ok(Node::construction(type_name, args, span))
}

fn arg_type(expr: &Expr) -> ArgType {
    match expr {
        Expr::New { type_name, .. } if !type_name.is_empty() => ArgType::resolved(type_name),
        Expr::Value { ty: Some(ty) } => ArgType::resolved(ty),
        _ => ArgType::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::walk;

    fn new_expr(line: usize, col: usize) -> Expr {
        Expr::New {
            type_name: "XPathDocument".to_string(),
            args: vec![Expr::value("String")],
            span: Span::point(line, col),
        }
    }

    #[test]
    fn test_property_accessors_become_members() {
        let unit = SourceUnit {
            path: "t.src".to_string(),
            types: vec![TypeDecl {
                name: "TestClass".to_string(),
                members: vec![MemberDecl::Property {
                    name: "Doc".to_string(),
                    getter: Some(vec![Stmt::Local {
                        name: "doc".to_string(),
                        init: Some(new_expr(11, 33)),
                    }]),
                    setter: Some(vec![Stmt::Expr(new_expr(14, 41))]),
                }],
            }],
        };

        let sites: Vec<_> = walk(&lower(&unit)).collect();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].enclosing_member, "get_Doc");
        assert_eq!(sites[1].enclosing_member, "set_Doc");
    }

    #[test]
    fn test_try_catch_finally_each_lowered() {
        let unit = SourceUnit {
            path: "t.src".to_string(),
            types: vec![TypeDecl {
                name: "TestClass".to_string(),
                members: vec![MemberDecl::Method {
                    name: "TestMethod".to_string(),
                    is_async: false,
                    body: vec![Stmt::Try {
                        body: vec![Stmt::Expr(new_expr(3, 10))],
                        catches: vec![CatchClause {
                            exception_type: Some("Exception".to_string()),
                            body: vec![Stmt::Expr(new_expr(6, 10))],
                        }],
                        finally: Some(vec![Stmt::Expr(new_expr(9, 10))]),
                    }],
                }],
            }],
        };

        let lines: Vec<usize> = walk(&lower(&unit)).map(|s| s.span.start_line).collect();
        assert_eq!(lines, vec![3, 6, 9]);
    }

    #[test]
    fn test_nested_construction_argument() {
        // new A(new B()) yields A first (its token comes first), then B,
        // and A's argument type is B.
        let unit = SourceUnit {
            path: "t.src".to_string(),
            types: vec![TypeDecl {
                name: "TestClass".to_string(),
                members: vec![MemberDecl::Method {
                    name: "M".to_string(),
                    is_async: false,
                    body: vec![Stmt::Expr(Expr::New {
                        type_name: "A".to_string(),
                        args: vec![Expr::New {
                            type_name: "B".to_string(),
                            args: vec![],
                            span: Span::point(1, 11),
                        }],
                        span: Span::point(1, 5),
                    })],
                }],
            }],
        };

        let sites: Vec<_> = walk(&lower(&unit)).collect();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].type_name, "A");
        assert_eq!(sites[0].args, vec![ArgType::resolved("B")]);
        assert_eq!(sites[1].type_name, "B");
    }

    #[test]
    fn test_malformed_construction_skipped() {
        let unit = SourceUnit {
            path: "t.src".to_string(),
            types: vec![TypeDecl {
                name: "TestClass".to_string(),
                members: vec![MemberDecl::Method {
                    name: "M".to_string(),
                    is_async: false,
                    body: vec![
                        Stmt::Expr(Expr::New {
                            type_name: String::new(),
                            args: vec![],
                            span: Span::point(2, 5),
                        }),
                        Stmt::Expr(new_expr(3, 5)),
                    ],
                }],
            }],
        };

        // The malformed node is dropped; the rest of the unit survives.
        let sites: Vec<_> = walk(&lower(&unit)).collect();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].span.start(), (3, 5));
    }
}
