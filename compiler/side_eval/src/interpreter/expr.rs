//! Expression evaluation.

use std::sync::Arc;

use side_ir::{BinaryOp, Expr, ExprKind};
use side_stack::ensure_sufficient_stack;

use super::exec::list_slot;
use super::Interpreter;
use crate::builtins::Builtin;
use crate::environment::Environment;
use crate::errors::{not_indexable, undefined_field, undefined_variable, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::value::BoundMethod;
use crate::Value;

impl Interpreter<'_> {
    pub(super) fn eval_expr(&mut self, env: &mut Environment, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(env, expr))
            .map_err(|e| e.or_span(expr.span))
    }

    fn eval_expr_inner(&mut self, env: &mut Environment, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Float(n) => Ok(Value::Float(*n)),
            ExprKind::Str(s) => Ok(Value::string(s.as_str())),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Nil => Ok(Value::Nil),
            ExprKind::List(items) => {
                let values = items
                    .iter()
                    .map(|item| self.eval_expr(env, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(values))
            }
            ExprKind::Ident(name) => env
                .lookup(name)
                .or_else(|| Builtin::from_name(name).map(Value::Builtin))
                .ok_or_else(|| undefined_variable(name)),
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(env, operand)?;
                evaluate_unary(&value, *op)
            }
            ExprKind::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => {
                let left = self.eval_expr(env, left)?;
                if left.is_truthy() {
                    self.eval_expr(env, right)
                } else {
                    Ok(left)
                }
            }
            ExprKind::Binary {
                op: BinaryOp::Or,
                left,
                right,
            } => {
                let left = self.eval_expr(env, left)?;
                if left.is_truthy() {
                    Ok(left)
                } else {
                    self.eval_expr(env, right)
                }
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(env, left)?;
                let right = self.eval_expr(env, right)?;
                evaluate_binary(&left, &right, *op)
            }
            ExprKind::Call { callee, args } => {
                let callee = self.eval_expr(env, callee)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval_expr(env, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call_value(&callee, args)
            }
            ExprKind::Field { receiver, name } => {
                let receiver = self.eval_expr(env, receiver)?;
                get_field(&receiver, name)
            }
            ExprKind::Index { receiver, index } => {
                let container = self.eval_expr(env, receiver)?;
                let index_value = self.eval_expr(env, index)?;
                match &container {
                    Value::List(items) => {
                        let slot = list_slot(&index_value, items.len())?;
                        Ok(items[slot].clone())
                    }
                    Value::Str(s) => {
                        let chars: Vec<char> = s.chars().collect();
                        let slot = list_slot(&index_value, chars.len())?;
                        Ok(Value::string(chars[slot].to_string()))
                    }
                    other => Err(not_indexable(&other.type_name())),
                }
            }
        }
    }
}

/// `receiver.name`: instance fields first, then methods.
///
/// On a type, `Type.method` yields the unbound method.
fn get_field(receiver: &Value, name: &str) -> EvalResult {
    match receiver {
        Value::Instance(inst) => {
            if let Some(value) = inst.field(name) {
                return Ok(value);
            }
            inst.ty
                .method(name)
                .map(|func| {
                    Value::BoundMethod(Arc::new(BoundMethod {
                        receiver: Arc::clone(inst),
                        func,
                    }))
                })
                .ok_or_else(|| undefined_field(name, inst.ty.name()))
        }
        Value::Type(ty) => ty
            .method(name)
            .map(Value::Function)
            .ok_or_else(|| undefined_field(name, ty.name())),
        other => Err(undefined_field(name, &other.type_name())),
    }
}
