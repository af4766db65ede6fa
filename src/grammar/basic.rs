//! Keyword-delimited surface grammar and its adapter
//!
//! Models the front end of a keyword-block language: `Class`/`End Class`
//! type blocks, `Sub`/`Function` members, `Property` blocks with `Get` and
//! `Set` bodies, `Try`/`Catch`/`Finally`/`End Try`, `As New T(...)` object
//! creation, multi-line `Sub()`/`Function()` lambdas and `Await`
//! continuations. A different shape from the curly grammar, lowered into
//! the same neutral model.

use crate::diagnostic::Span;
use crate::ir::{self, ArgType, Node};
use log::debug;

use super::AdaptError;

/// A parsed keyword-grammar compilation unit
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    pub path: String,
    pub type_blocks: Vec<TypeBlock>,
}

/// A `Class .. End Class` or `Module .. End Module` block
#[derive(Debug, Clone)]
pub struct TypeBlock {
    pub name: String,
    pub members: Vec<BlockMember>,
}

/// A member of a type block
#[derive(Debug, Clone)]
pub enum BlockMember {
    /// `Sub`/`Function` body; async lowers no differently
    SubOrFunction {
        name: String,
        is_async: bool,
        body: Vec<Stmt>,
    },
    /// `Sub New` instance constructor
    CtorSub { body: Vec<Stmt> },
    /// `Property .. End Property` with optional `Get`/`Set` bodies
    PropertyBlock {
        name: String,
        get_body: Option<Vec<Stmt>>,
        set_body: Option<Vec<Stmt>>,
    },
    /// Field declaration, possibly with a lambda-valued initializer
    FieldDecl {
        name: String,
        initializer: Option<Expr>,
    },
}

/// A statement
#[derive(Debug, Clone)]
pub enum Stmt {
    /// `Dim x = <init>` or `Dim x As New T(...)`
    Dim { name: String, init: Option<Expr> },
    /// Expression statement
    ExprStmt(Expr),
    /// `Try .. Catch .. Finally .. End Try`
    TryBlock {
        body: Vec<Stmt>,
        catch_arms: Vec<CatchArm>,
        finally_body: Option<Vec<Stmt>>,
    },
    /// `If .. Then .. Else .. End If`
    IfBlock {
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },
    /// `Return <expr>`
    Return(Option<Expr>),
    /// `x = <expr>`
    Assign { target: String, value: Expr },
    /// `Throw`
    Throw,
}

/// One `Catch` arm
#[derive(Debug, Clone)]
pub struct CatchArm {
    pub variable: Option<String>,
    pub exception_type: Option<String>,
    pub body: Vec<Stmt>,
}

/// An expression
#[derive(Debug, Clone)]
pub enum Expr {
    /// `New T(args)`; the span starts at the `T` token
    NewExpr {
        type_name: String,
        args: Vec<Expr>,
        span: Span,
    },
    /// Multi-line `Sub() .. End Sub` or `Function() .. End Function`
    LambdaBlock { body: Vec<Stmt> },
    /// `Await <expr>`
    AwaitExpr(Box<Expr>),
    /// Invocation
    Invocation { args: Vec<Expr> },
    /// Any other expression, reduced to its host-resolved static type
    Typed { ty: Option<String> },
}

impl Expr {
    /// A resolved value expression
    pub fn typed(ty: &str) -> Self {
        Expr::Typed {
            ty: Some(ty.to_string()),
        }
    }

    /// A value expression whose type the host could not resolve
    pub fn unresolved() -> Self {
        Expr::Typed { ty: None }
    }
}

/// Lower a keyword-grammar unit into the neutral model
pub fn lower(unit: &CompilationUnit) -> ir::Unit {
    let mut members = Vec::new();
    for block in &unit.type_blocks {
        for member in &block.members {
            lower_member(member, &mut members);
        }
    }
    ir::Unit {
        name: unit.path.clone(),
        members,
    }
}

fn lower_member(member: &BlockMember, out: &mut Vec<Node>) {
    match member {
        BlockMember::SubOrFunction { name, body, .. } => {
            out.push(Node::member(name, lower_stmts(body)));
        }
        BlockMember::CtorSub { body } => {
            out.push(Node::member(".ctor", lower_stmts(body)));
        }
        BlockMember::PropertyBlock {
            name,
            get_body,
            set_body,
        } => {
            if let Some(body) = get_body {
                out.push(Node::member(&format!("get_{name}"), lower_stmts(body)));
            }
            if let Some(body) = set_body {
                out.push(Node::member(&format!("set_{name}"), lower_stmts(body)));
            }
        }
        BlockMember::FieldDecl { name, initializer } => {
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
            Stmt::Dim { init, .. } => {
                if let Some(init) = init {
                    out.extend(lower_expr(init));
                }
            }
            Stmt::ExprStmt(expr) => out.extend(lower_expr(expr)),
            Stmt::TryBlock {
                body,
                catch_arms,
                finally_body,
            } => {
                out.push(Node::Block(lower_stmts(body)));
                for arm in catch_arms {
                    out.push(Node::Block(lower_stmts(&arm.body)));
                }
                if let Some(body) = finally_body {
                    out.push(Node::Block(lower_stmts(body)));
                }
            }
            Stmt::IfBlock {
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
            Stmt::Throw => {}
        }
    }
    out
}

fn lower_expr(expr: &Expr) -> Vec<Node> {
    let mut out = Vec::new();
    match expr {
        Expr::NewExpr {
            type_name,
            args,
            span,
        } => {
            match construction(type_name, args, *span) {
                Ok(node) => out.push(node),
                Err(err) => debug!("skipping node: {err}"),
            }
            for arg in args {
                out.extend(lower_expr(arg));
            }
        }
        Expr::LambdaBlock { body } => out.push(Node::Block(lower_stmts(body))),
        Expr::AwaitExpr(inner) => out.extend(lower_expr(inner)),
        Expr::Invocation { args } => {
            for arg in args {
                out.extend(lower_expr(arg));
            }
        }
        Expr::Typed { .. } => {}
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
        Expr::NewExpr { type_name, .. } if !type_name.is_empty() => ArgType::resolved(type_name),
        Expr::Typed { ty: Some(ty) } => ArgType::resolved(ty),
        _ => ArgType::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::walk;

    fn new_expr(line: usize, col: usize) -> Expr {
        Expr::NewExpr {
            type_name: "XPathDocument".to_string(),
            args: vec![Expr::typed("String")],
            span: Span::point(line, col),
        }
    }

    #[test]
    fn test_dim_as_new_lowered() {
        let unit = CompilationUnit {
            path: "t.src".to_string(),
            type_blocks: vec![TypeBlock {
                name: "TestClass".to_string(),
                members: vec![BlockMember::SubOrFunction {
                    name: "TestMethod".to_string(),
                    is_async: false,
                    body: vec![Stmt::Dim {
                        name: "doc".to_string(),
                        init: Some(new_expr(8, 24)),
                    }],
                }],
            }],
        };

        let sites: Vec<_> = walk(&lower(&unit)).collect();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].span.start(), (8, 24));
        assert_eq!(sites[0].enclosing_member, "TestMethod");
    }

    #[test]
    fn test_lambda_in_field_initializer() {
        let unit = CompilationUnit {
            path: "t.src".to_string(),
            type_blocks: vec![TypeBlock {
                name: "TestClass".to_string(),
                members: vec![BlockMember::FieldDecl {
                    name: "d".to_string(),
                    initializer: Some(Expr::LambdaBlock {
                        body: vec![Stmt::Dim {
                            name: "doc".to_string(),
                            init: Some(new_expr(9, 16)),
                        }],
                    }),
                }],
            }],
        };

        let sites: Vec<_> = walk(&lower(&unit)).collect();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].enclosing_member, "d");
        assert_eq!(sites[0].span.start(), (9, 16));
    }

    #[test]
    fn test_await_continuation_lowered() {
        // Await Task.Run(Function() ... End Function)
        let unit = CompilationUnit {
            path: "t.src".to_string(),
            type_blocks: vec![TypeBlock {
                name: "TestClass".to_string(),
                members: vec![BlockMember::SubOrFunction {
                    name: "TestMethod".to_string(),
                    is_async: true,
                    body: vec![Stmt::ExprStmt(Expr::AwaitExpr(Box::new(
                        Expr::Invocation {
                            args: vec![Expr::LambdaBlock {
                                body: vec![Stmt::Dim {
                                    name: "doc".to_string(),
                                    init: Some(new_expr(9, 20)),
                                }],
                            }],
                        },
                    )))],
                }],
            }],
        };

        let sites: Vec<_> = walk(&lower(&unit)).collect();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].span.start(), (9, 20));
    }

    #[test]
    fn test_catch_arm_is_own_region() {
        let unit = CompilationUnit {
            path: "t.src".to_string(),
            type_blocks: vec![TypeBlock {
                name: "TestClass".to_string(),
                members: vec![BlockMember::SubOrFunction {
                    name: "TestMethod".to_string(),
                    is_async: false,
                    body: vec![Stmt::TryBlock {
                        body: vec![],
                        catch_arms: vec![CatchArm {
                            variable: Some("ex".to_string()),
                            exception_type: Some("Exception".to_string()),
                            body: vec![Stmt::Dim {
                                name: "doc".to_string(),
                                init: Some(new_expr(10, 28)),
                            }],
                        }],
                        finally_body: Some(vec![]),
                    }],
                }],
            }],
        };

        let sites: Vec<_> = walk(&lower(&unit)).collect();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].span.start(), (10, 28));
    }
}
