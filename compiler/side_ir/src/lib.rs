//! Side IR - shared syntax definitions for side script.
//!
//! Side script is the small embedded language that sideloaded units are
//! written in. This crate holds the pieces every stage agrees on:
//!
//! - [`Span`]: byte ranges into a source file
//! - [`Module`], [`Stmt`], [`Expr`]: the parsed tree
//! - [`BinaryOp`], [`UnaryOp`]: operator kinds with their source symbols
//!
//! It has no dependencies so the lexer, parser and evaluator can share it
//! without pulling in each other.

mod ast;
mod operators;
mod span;

pub use ast::{Expr, ExprKind, FieldDef, FunctionDef, Module, Stmt, StmtKind, TypeDef};
pub use operators::{BinaryOp, UnaryOp};
pub use span::{Span, SpanError};

/// File extension of side script sources (without the leading dot).
pub const SOURCE_EXTENSION: &str = "side";

/// Stem of the entry file inside a package-style directory.
pub const PACKAGE_ENTRY_STEM: &str = "__entry__";
