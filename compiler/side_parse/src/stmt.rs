//! Statement grammar.

use std::sync::Arc;

use side_ir::{ExprKind, FieldDef, FunctionDef, Stmt, StmtKind, TypeDef};
use side_lexer::Token;

use crate::cursor::Cursor;
use crate::ParseError;

impl Cursor<'_> {
    /// Parse statements until `terminator` (a block's `}`) or end of input.
    ///
    /// The terminator itself is not consumed.
    pub(crate) fn parse_statements(
        &mut self,
        terminator: Option<&Token>,
    ) -> Result<Vec<Stmt>, ParseError> {
        let mut body = Vec::new();
        loop {
            self.skip_separators();
            if self.at_end() {
                if let Some(term) = terminator {
                    return Err(self.unexpected(&term.describe()));
                }
                return Ok(body);
            }
            if terminator.is_some_and(|term| self.check(term)) {
                return Ok(body);
            }

            body.push(self.parse_stmt()?);

            // A statement must be followed by a separator, the block end, or EOF.
            let ends_here = self.at_end()
                || self.check(&Token::Newline)
                || self.check(&Token::Semicolon)
                || terminator.is_some_and(|term| self.check(term));
            if !ends_here {
                return Err(self.unexpected("newline or `;` after statement"));
            }
        }
    }

    /// `{ statements }`
    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&Token::LBrace)?;
        let body = self.parse_statements(Some(&Token::RBrace))?;
        self.expect(&Token::RBrace)?;
        Ok(body)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.span();
        let kind = match self.peek() {
            Some(Token::Let) => self.parse_let()?,
            Some(Token::Fn) => StmtKind::Function(Arc::new(self.parse_function()?)),
            Some(Token::Type) => StmtKind::Type(Arc::new(self.parse_type()?)),
            Some(Token::If) => self.parse_if()?,
            Some(Token::While) => {
                self.expect(&Token::While)?;
                let cond = self.parse_expr()?;
                let body = self.parse_block()?;
                StmtKind::While { cond, body }
            }
            Some(Token::For) => {
                self.expect(&Token::For)?;
                let (binding, _) = self.expect_ident("loop variable name")?;
                self.expect(&Token::In)?;
                let iterable = self.parse_expr()?;
                let body = self.parse_block()?;
                StmtKind::For {
                    binding,
                    iterable,
                    body,
                }
            }
            Some(Token::Return) => {
                self.expect(&Token::Return)?;
                if self.at_statement_end() {
                    StmtKind::Return(None)
                } else {
                    StmtKind::Return(Some(self.parse_expr()?))
                }
            }
            Some(Token::Break) => {
                self.expect(&Token::Break)?;
                StmtKind::Break
            }
            Some(Token::Continue) => {
                self.expect(&Token::Continue)?;
                StmtKind::Continue
            }
            _ => self.parse_expr_or_assign()?,
        };
        Ok(Stmt {
            kind,
            span: start.merge(self.prev_span()),
        })
    }

    fn at_statement_end(&self) -> bool {
        self.at_end()
            || self.check(&Token::Newline)
            || self.check(&Token::Semicolon)
            || self.check(&Token::RBrace)
    }

    /// `let name = value`
    fn parse_let(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(&Token::Let)?;
        let (name, _) = self.expect_ident("binding name after `let`")?;
        self.expect(&Token::Eq)?;
        self.skip_newlines();
        let value = self.parse_expr()?;
        Ok(StmtKind::Let { name, value })
    }

    /// `fn name(a, b) { body }`
    fn parse_function(&mut self) -> Result<FunctionDef, ParseError> {
        let start = self.expect(&Token::Fn)?;
        let (name, _) = self.expect_ident("function name after `fn`")?;
        self.expect(&Token::LParen)?;
        let mut params: Vec<String> = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(&Token::RParen) {
                break;
            }
            let (param, span) = self.expect_ident("parameter name")?;
            if params.contains(&param) {
                return Err(ParseError::new(
                    format!("duplicate parameter `{param}` in function `{name}`"),
                    span,
                ));
            }
            params.push(param);
            self.skip_newlines();
            if !self.eat(&Token::Comma) {
                self.skip_newlines();
                self.expect(&Token::RParen)?;
                break;
            }
        }
        let body = self.parse_block()?;
        Ok(FunctionDef {
            name,
            params,
            body,
            span: start.merge(self.prev_span()),
        })
    }

    /// `type Name { field = default; fn method(self) { ... } }`
    fn parse_type(&mut self) -> Result<TypeDef, ParseError> {
        let start = self.expect(&Token::Type)?;
        let (name, _) = self.expect_ident("type name after `type`")?;
        self.expect(&Token::LBrace)?;

        let mut fields: Vec<FieldDef> = Vec::new();
        let mut methods: Vec<Arc<FunctionDef>> = Vec::new();
        loop {
            self.skip_separators();
            if self.eat(&Token::RBrace) {
                break;
            }
            if self.check(&Token::Fn) {
                let method = self.parse_function()?;
                if methods.iter().any(|m| m.name == method.name) {
                    return Err(ParseError::new(
                        format!("duplicate method `{}` in type `{name}`", method.name),
                        method.span,
                    ));
                }
                methods.push(Arc::new(method));
            } else {
                let (field, field_span) = self.expect_ident("field or `fn` in type body")?;
                if fields.iter().any(|f| f.name == field) {
                    return Err(ParseError::new(
                        format!("duplicate field `{field}` in type `{name}`"),
                        field_span,
                    ));
                }
                self.expect(&Token::Eq)?;
                self.skip_newlines();
                let default = self.parse_expr()?;
                fields.push(FieldDef {
                    name: field,
                    span: field_span.merge(default.span),
                    default,
                });
            }
            if !(self.check(&Token::Newline)
                || self.check(&Token::Semicolon)
                || self.check(&Token::RBrace))
            {
                return Err(self.unexpected("newline or `;` after type member"));
            }
        }

        Ok(TypeDef {
            name,
            fields,
            methods,
            span: start.merge(self.prev_span()),
        })
    }

    /// `if cond { } else if cond { } else { }`
    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(&Token::If)?;
        let cond = self.parse_expr()?;
        let then_body = self.parse_block()?;

        let else_body = if self.check_past_newlines(&Token::Else) {
            self.skip_newlines();
            self.expect(&Token::Else)?;
            if self.check(&Token::If) {
                let start = self.span();
                let nested = self.parse_if()?;
                vec![Stmt {
                    kind: nested,
                    span: start.merge(self.prev_span()),
                }]
            } else {
                self.parse_block()?
            }
        } else {
            Vec::new()
        };

        Ok(StmtKind::If {
            cond,
            then_body,
            else_body,
        })
    }

    /// An expression statement, or an assignment when followed by `=`.
    fn parse_expr_or_assign(&mut self) -> Result<StmtKind, ParseError> {
        let target = self.parse_expr()?;
        if !self.eat(&Token::Eq) {
            return Ok(StmtKind::Expr(target));
        }
        if !is_assignable(&target.kind) {
            return Err(ParseError::new("invalid assignment target", target.span));
        }
        self.skip_newlines();
        let value = self.parse_expr()?;
        Ok(StmtKind::Assign { target, value })
    }
}

fn is_assignable(kind: &ExprKind) -> bool {
    matches!(
        kind,
        ExprKind::Ident(_) | ExprKind::Field { .. } | ExprKind::Index { .. }
    )
}

