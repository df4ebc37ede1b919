//! Token cursor for navigating the token stream.

use side_ir::Span;
use side_lexer::{Token, TokenList};
use tracing::trace;

use crate::ParseError;

/// Cursor over a lexed source file.
///
/// Grammar methods live in `stmt.rs` and `expr.rs` as further `impl`
/// blocks; this file only holds token access and consumption helpers.
pub(crate) struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Current token, or `None` at end of input.
    #[inline]
    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.tokens.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Token `n` positions ahead of the current one.
    #[inline]
    pub(crate) fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.tokens.get(self.pos + n).map(|t| &t.token)
    }

    /// Span of the current token, or the end-of-input point.
    #[inline]
    pub(crate) fn span(&self) -> Span {
        self.tokens
            .tokens
            .get(self.pos)
            .map_or(self.tokens.eof, |t| t.span)
    }

    /// Span of the most recently consumed token.
    pub(crate) fn prev_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.tokens.get(i))
            .map_or(self.tokens.eof, |t| t.span)
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.tokens.len()
    }

    #[inline]
    pub(crate) fn check(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek();
        if token.is_some() {
            trace!(pos = self.pos, ?token, "advance");
            self.pos += 1;
        }
        token
    }

    /// Consume `token` if it is next.
    pub(crate) fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `token` or fail with "expected ...".
    pub(crate) fn expect(&mut self, token: &Token) -> Result<Span, ParseError> {
        if self.eat(token) {
            Ok(self.prev_span())
        } else {
            Err(self.unexpected(&token.describe()))
        }
    }

    /// Consume an identifier and return its name and span.
    pub(crate) fn expect_ident(&mut self, what: &str) -> Result<(String, Span), ParseError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                self.pos += 1;
                Ok((name.clone(), self.prev_span()))
            }
            _ => Err(self.unexpected(what)),
        }
    }

    /// Skip newline tokens (used where a statement cannot end).
    pub(crate) fn skip_newlines(&mut self) {
        while self.eat(&Token::Newline) {}
    }

    /// Skip statement separators: newlines and `;`.
    pub(crate) fn skip_separators(&mut self) {
        while self.eat(&Token::Newline) || self.eat(&Token::Semicolon) {}
    }

    /// Whether the next non-newline token is `token`.
    pub(crate) fn check_past_newlines(&self, token: &Token) -> bool {
        let mut n = 0;
        while self.peek_nth(n) == Some(&Token::Newline) {
            n += 1;
        }
        self.peek_nth(n) == Some(token)
    }

    /// Build an "expected X, found Y" error at the current token.
    #[cold]
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let found = self
            .peek()
            .map_or_else(|| "end of input".to_string(), Token::describe);
        ParseError::new(format!("expected {expected}, found {found}"), self.span())
    }
}
