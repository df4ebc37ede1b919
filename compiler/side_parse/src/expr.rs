//! Expression grammar.
//!
//! Precedence, lowest to highest:
//!
//! | level | operators |
//! |-------|-----------|
//! | or | `or` `\|\|` |
//! | and | `and` `&&` |
//! | comparison | `==` `!=` `<` `<=` `>` `>=` |
//! | additive | `+` `-` |
//! | multiplicative | `*` `/` `%` |
//! | unary | `-` `not` `!` |
//! | postfix | call, `.field`, `[index]` |

use side_ir::{BinaryOp, Expr, ExprKind, UnaryOp};
use side_lexer::Token;
use side_stack::ensure_sufficient_stack;

use crate::cursor::Cursor;
use crate::ParseError;

impl Cursor<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_or())
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_and, |t| match t {
            Token::Or => Some(BinaryOp::Or),
            _ => None,
        })
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_comparison, |t| match t {
            Token::And => Some(BinaryOp::And),
            _ => None,
        })
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_additive, |t| match t {
            Token::EqEq => Some(BinaryOp::Eq),
            Token::NotEq => Some(BinaryOp::NotEq),
            Token::Lt => Some(BinaryOp::Lt),
            Token::LtEq => Some(BinaryOp::LtEq),
            Token::Gt => Some(BinaryOp::Gt),
            Token::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        })
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_multiplicative, |t| match t {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_unary, |t| match t {
            Token::Star => Some(BinaryOp::Mul),
            Token::Slash => Some(BinaryOp::Div),
            Token::Percent => Some(BinaryOp::Mod),
            _ => None,
        })
    }

    /// One left-associative precedence level.
    ///
    /// The operator must sit on the same line as its left operand; after the
    /// operator, newlines are skipped.
    fn parse_binary_level(
        &mut self,
        next: fn(&mut Self) -> Result<Expr, ParseError>,
        op_for: fn(&Token) -> Option<BinaryOp>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;
        while let Some(op) = self.peek().and_then(op_for) {
            self.advance();
            self.skip_newlines();
            let right = next(self)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Not) => UnaryOp::Not,
            _ => return self.parse_postfix(),
        };
        let start = self.span();
        self.advance();
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&Token::LParen) {
                let args = self.parse_comma_list(&Token::RParen)?;
                let span = expr.span.merge(self.prev_span());
                expr = Expr::new(
                    ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    },
                    span,
                );
            } else if self.eat(&Token::Dot) {
                let (name, name_span) = self.expect_ident("field name after `.`")?;
                let span = expr.span.merge(name_span);
                expr = Expr::new(
                    ExprKind::Field {
                        receiver: Box::new(expr),
                        name,
                    },
                    span,
                );
            } else if self.eat(&Token::LBracket) {
                self.skip_newlines();
                let index = self.parse_expr()?;
                self.skip_newlines();
                self.expect(&Token::RBracket)?;
                let span = expr.span.merge(self.prev_span());
                expr = Expr::new(
                    ExprKind::Index {
                        receiver: Box::new(expr),
                        index: Box::new(index),
                    },
                    span,
                );
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.span();
        let kind = match self.peek() {
            Some(Token::Int(n)) => ExprKind::Int(*n),
            Some(Token::Float(n)) => ExprKind::Float(*n),
            Some(Token::Str(s)) => ExprKind::Str(s.clone()),
            Some(Token::True) => ExprKind::Bool(true),
            Some(Token::False) => ExprKind::Bool(false),
            Some(Token::Nil) => ExprKind::Nil,
            Some(Token::Ident(name)) => ExprKind::Ident(name.clone()),
            Some(Token::LParen) => {
                self.advance();
                self.skip_newlines();
                let inner = self.parse_expr()?;
                self.skip_newlines();
                self.expect(&Token::RParen)?;
                return Ok(Expr::new(inner.kind, span.merge(self.prev_span())));
            }
            Some(Token::LBracket) => {
                self.advance();
                let items = self.parse_comma_list(&Token::RBracket)?;
                return Ok(Expr::new(
                    ExprKind::List(items),
                    span.merge(self.prev_span()),
                ));
            }
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(Expr::new(kind, span))
    }

    /// Comma-separated expressions up to and including `close`.
    ///
    /// The opening bracket must already be consumed. A trailing comma is
    /// allowed and newlines are insignificant inside the list.
    fn parse_comma_list(&mut self, close: &Token) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.parse_expr()?);
            self.skip_newlines();
            if !self.eat(&Token::Comma) {
                self.expect(close)?;
                return Ok(items);
            }
        }
    }
}
