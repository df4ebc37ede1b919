//! Side Parse - recursive-descent parser for side script.
//!
//! # Architecture
//!
//! ```text
//! source ──► side_lexer::lex ──► TokenList
//!                                   │
//!                                   ▼
//!                Cursor ──► stmt.rs / expr.rs ──► side_ir::Module
//! ```
//!
//! Newlines terminate statements. They are skipped after binary operators,
//! inside brackets and argument lists, and before `else`, so long
//! expressions can be wrapped without a continuation marker.

mod cursor;
mod error;
mod expr;
mod stmt;

use side_ir::Module;

pub use error::ParseError;

use cursor::Cursor;

/// Parse a complete side script source file.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Module, ParseError> {
    let tokens = side_lexer::lex(source)?;
    let mut cursor = Cursor::new(&tokens);
    let body = cursor.parse_statements(None)?;
    tracing::debug!(statements = body.len(), "parsed module");
    Ok(Module { body })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
