//! Statement execution.

use std::sync::Arc;

use side_ir::{Expr, ExprKind, Stmt, StmtKind};

use super::{Flow, Interpreter};
use crate::environment::Environment;
use crate::errors::{
    index_out_of_bounds, not_indexable, not_iterable, type_mismatch, undefined_variable,
    EvalError,
};
use crate::value::{FunctionValue, TypeValue};
use crate::Value;

impl Interpreter<'_> {
    pub(super) fn exec_block(
        &mut self,
        env: &mut Environment,
        stmts: &[Stmt],
    ) -> Result<Flow, EvalError> {
        for stmt in stmts {
            match self.exec_stmt(env, stmt)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    pub(super) fn exec_stmt(&mut self, env: &mut Environment, stmt: &Stmt) -> Result<Flow, EvalError> {
        match &stmt.kind {
            StmtKind::Let { name, value } => {
                let value = self.eval_expr(env, value)?;
                env.define(name, value);
            }
            StmtKind::Assign { target, value } => {
                let value = self.eval_expr(env, value)?;
                self.assign(env, target, value)
                    .map_err(|e| e.or_span(stmt.span))?;
            }
            StmtKind::Function(def) => {
                let globals = env.globals();
                let func = FunctionValue::new(
                    Arc::clone(def),
                    globals.name.clone(),
                    Arc::downgrade(globals),
                );
                env.define(&def.name, Value::Function(func));
            }
            StmtKind::Type(def) => {
                let globals = env.globals();
                let ty = TypeValue {
                    def: Arc::clone(def),
                    unit: globals.name.clone(),
                    globals: Arc::downgrade(globals),
                };
                env.define(&def.name, Value::Type(Arc::new(ty)));
            }
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => {
                let branch = if self.eval_expr(env, cond)?.is_truthy() {
                    then_body
                } else {
                    else_body
                };
                return self.exec_block(env, branch);
            }
            StmtKind::While { cond, body } => {
                while self.eval_expr(env, cond)?.is_truthy() {
                    match self.exec_block(env, body)? {
                        Flow::Break(_) => break,
                        Flow::Normal | Flow::Continue(_) => {}
                        flow @ Flow::Return(..) => return Ok(flow),
                    }
                }
            }
            StmtKind::For {
                binding,
                iterable,
                body,
            } => {
                let items = self.iteration_items(env, iterable)?;
                for item in items {
                    env.define(binding, item);
                    match self.exec_block(env, body)? {
                        Flow::Break(_) => break,
                        Flow::Normal | Flow::Continue(_) => {}
                        flow @ Flow::Return(..) => return Ok(flow),
                    }
                }
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(env, expr)?,
                    None => Value::Nil,
                };
                return Ok(Flow::Return(value, stmt.span));
            }
            StmtKind::Break => return Ok(Flow::Break(stmt.span)),
            StmtKind::Continue => return Ok(Flow::Continue(stmt.span)),
            StmtKind::Expr(expr) => {
                self.eval_expr(env, expr)?;
            }
        }
        Ok(Flow::Normal)
    }

    /// Snapshot of the values a `for` loop walks over.
    fn iteration_items(&mut self, env: &mut Environment, iterable: &Expr) -> Result<Vec<Value>, EvalError> {
        match self.eval_expr(env, iterable)? {
            Value::List(items) => Ok(items.as_ref().clone()),
            Value::Str(s) => Ok(s.chars().map(|c| Value::string(c.to_string())).collect()),
            other => Err(not_iterable(&other.type_name()).or_span(iterable.span)),
        }
    }

    /// Store `value` into an assignable expression.
    ///
    /// Lists are values, so `xs[i] = v` builds a new list and assigns it
    /// back to `xs` (recursively for `xs[i][j] = v`).
    fn assign(&mut self, env: &mut Environment, target: &Expr, value: Value) -> Result<(), EvalError> {
        match &target.kind {
            ExprKind::Ident(name) => {
                if env.assign(name, value) {
                    Ok(())
                } else {
                    Err(undefined_variable(name).or_span(target.span))
                }
            }
            ExprKind::Field { receiver, name } => match self.eval_expr(env, receiver)? {
                Value::Instance(inst) => {
                    inst.set_field(name, value);
                    Ok(())
                }
                other => Err(type_mismatch("instance", &other.type_name()).or_span(receiver.span)),
            },
            ExprKind::Index { receiver, index } => {
                let container = self.eval_expr(env, receiver)?;
                let index_value = self.eval_expr(env, index)?;
                let Value::List(items) = container else {
                    return Err(not_indexable(&container.type_name()).or_span(receiver.span));
                };
                let slot = list_slot(&index_value, items.len()).map_err(|e| e.or_span(index.span))?;
                let mut updated = items.as_ref().clone();
                updated[slot] = value;
                self.assign(env, receiver, Value::List(Arc::new(updated)))
            }
            _ => Err(EvalError::new("invalid assignment target").or_span(target.span)),
        }
    }
}

/// Validate a list index; negative indices are out of bounds.
pub(super) fn list_slot(index: &Value, len: usize) -> Result<usize, EvalError> {
    let Some(i) = index.as_int() else {
        return Err(type_mismatch("int", &index.type_name()));
    };
    usize::try_from(i)
        .ok()
        .filter(|&slot| slot < len)
        .ok_or_else(|| index_out_of_bounds(i, len))
}
