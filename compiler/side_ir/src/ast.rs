//! Parsed tree for side script.
//!
//! The tree is boxed rather than arena-allocated: a unit is parsed once,
//! executed once, and then only function and type bodies survive, shared
//! through `Arc` by the values that reference them.

use std::sync::Arc;

use crate::{BinaryOp, Span, UnaryOp};

/// A parsed source file: its top-level statements in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    pub body: Vec<Stmt>,
}

/// A statement with its source location.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `let name = value`
    Let { name: String, value: Expr },
    /// `target = value` where target is a name, field or index expression.
    Assign { target: Expr, value: Expr },
    /// `fn name(params) { body }`
    Function(Arc<FunctionDef>),
    /// `type Name { fields and methods }`
    Type(Arc<TypeDef>),
    /// `if cond { then } else { otherwise }`
    ///
    /// `else if` chains are nested `If` statements inside `otherwise`.
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    /// `while cond { body }`
    While { cond: Expr, body: Vec<Stmt> },
    /// `for binding in iterable { body }`
    For {
        binding: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    /// `return [value]`
    Return(Option<Expr>),
    Break,
    Continue,
    /// Expression evaluated for its side effects.
    Expr(Expr),
}

/// A function or method definition.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A constructible type definition.
///
/// Field defaults are evaluated in declaration order every time an
/// instance is constructed; `init(self)`, if declared, runs afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<Arc<FunctionDef>>,
    pub span: Span,
}

/// `name = default` inside a type body.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub default: Expr,
    pub span: Span,
}

/// An expression with its source location.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Nil,
    List(Vec<Expr>),
    Ident(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Field {
        receiver: Box<Expr>,
        name: String,
    },
    Index {
        receiver: Box<Expr>,
        index: Box<Expr>,
    },
}
