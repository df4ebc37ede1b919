//! Operator implementations for the evaluator.
//!
//! Direct enum dispatch: the operand types are fixed, so a match over
//! `(left, right)` is exhaustive and cheaper than any trait-based scheme.
//! `and`/`or` short-circuit in the interpreter; they only reach
//! [`evaluate_binary`] when both operands are already evaluated.

use std::cmp::Ordering;
use std::sync::Arc;

use side_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    division_by_zero, integer_overflow, invalid_binary_op, invalid_unary_op, modulo_by_zero,
    EvalResult,
};
use crate::value::int_to_float;
use crate::Value;

/// Checked arithmetic with overflow as the only failure.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

/// Evaluate a binary operation on two evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::And => Ok(if left.is_truthy() {
            right.clone()
        } else {
            left.clone()
        }),
        BinaryOp::Or => Ok(if left.is_truthy() {
            left.clone()
        } else {
            right.clone()
        }),
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            eval_comparison(left, right, op)
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            eval_arithmetic(left, right, op)
        }
    }
}

fn eval_arithmetic(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Int(a), Value::Float(b)) => eval_float_binary(int_to_float(*a), *b, op),
        (Value::Float(a), Value::Int(b)) => eval_float_binary(*a, int_to_float(*b), op),
        (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        (Value::List(a), Value::List(b)) if op == BinaryOp::Add => {
            let mut joined = Vec::with_capacity(a.len() + b.len());
            joined.extend(a.iter().cloned());
            joined.extend(b.iter().cloned());
            Ok(Value::List(Arc::new(joined)))
        }
        _ => Err(mismatch(left, right, op)),
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => {
            if b == 0 {
                Err(division_by_zero())
            } else {
                checked_arith(a.checked_div(b), "division")
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                Err(modulo_by_zero())
            } else {
                checked_arith(a.checked_rem(b), "remainder")
            }
        }
        _ => Err(invalid_binary_op(op, "int", "int")),
    }
}

fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div if b == 0.0 => Err(division_by_zero()),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Mod if b == 0.0 => Err(modulo_by_zero()),
        BinaryOp::Mod => Ok(Value::Float(a % b)),
        _ => Err(invalid_binary_op(op, "float", "float")),
    }
}

fn eval_comparison(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Float(b)) => int_to_float(*a).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&int_to_float(*b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => return Err(mismatch(left, right, op)),
    };
    // NaN compares false in every direction.
    let result = ordering.is_some_and(|ord| match op {
        BinaryOp::Lt => ord == Ordering::Less,
        BinaryOp::LtEq => ord != Ordering::Greater,
        BinaryOp::Gt => ord == Ordering::Greater,
        _ => ord != Ordering::Less,
    });
    Ok(Value::Bool(result))
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> crate::EvalError {
    invalid_binary_op(op, &left.type_name(), &right.type_name())
}

/// Evaluate a unary operation.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOp::Neg, Value::Int(n)) => checked_arith(n.checked_neg(), "negation"),
        (UnaryOp::Neg, Value::Float(n)) => Ok(Value::Float(-n)),
        (UnaryOp::Neg, value) => Err(invalid_unary_op(op, &value.type_name())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::EvalErrorKind;

    #[test]
    fn int_arithmetic_is_checked() {
        assert_eq!(
            evaluate_binary(&Value::Int(7), &Value::Int(2), BinaryOp::Div),
            Ok(Value::Int(3))
        );
        let err = evaluate_binary(&Value::Int(i64::MAX), &Value::Int(1), BinaryOp::Add)
            .unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::IntegerOverflow {
                operation: "addition".to_string()
            }
        );
        let err = evaluate_binary(&Value::Int(i64::MIN), &Value::Int(-1), BinaryOp::Div)
            .unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::IntegerOverflow { .. }));
    }

    #[test]
    fn zero_divisors() {
        let err = evaluate_binary(&Value::Int(1), &Value::Int(0), BinaryOp::Div).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
        let err = evaluate_binary(&Value::Int(1), &Value::Int(0), BinaryOp::Mod).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::ModuloByZero);
        let err =
            evaluate_binary(&Value::Float(1.0), &Value::Float(0.0), BinaryOp::Div).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    }

    #[test]
    fn mixed_numbers_widen_to_float() {
        assert_eq!(
            evaluate_binary(&Value::Int(1), &Value::Float(0.5), BinaryOp::Add),
            Ok(Value::Float(1.5))
        );
        assert_eq!(
            evaluate_binary(&Value::Int(2), &Value::Float(2.0), BinaryOp::Eq),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            evaluate_binary(&Value::Float(1.5), &Value::Int(2), BinaryOp::Lt),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn concatenation() {
        assert_eq!(
            evaluate_binary(&Value::string("ab"), &Value::string("cd"), BinaryOp::Add),
            Ok(Value::string("abcd"))
        );
        assert_eq!(
            evaluate_binary(
                &Value::list(vec![Value::Int(1)]),
                &Value::list(vec![Value::Int(2)]),
                BinaryOp::Add
            ),
            Ok(Value::list(vec![Value::Int(1), Value::Int(2)]))
        );
    }

    #[test]
    fn invalid_operands_name_both_types() {
        let err =
            evaluate_binary(&Value::string("a"), &Value::Int(1), BinaryOp::Sub).unwrap_err();
        assert_eq!(err.message, "operator `-` cannot be applied to str and int");
        let err = evaluate_binary(&Value::Nil, &Value::Int(1), BinaryOp::Lt).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::InvalidBinaryOp { .. }));
    }

    #[test]
    fn nan_is_unordered() {
        for op in [BinaryOp::Lt, BinaryOp::LtEq, BinaryOp::Gt, BinaryOp::GtEq] {
            assert_eq!(
                evaluate_binary(&Value::Float(f64::NAN), &Value::Float(1.0), op),
                Ok(Value::Bool(false))
            );
        }
    }

    #[test]
    fn unary_operators() {
        assert_eq!(evaluate_unary(&Value::Int(3), UnaryOp::Neg), Ok(Value::Int(-3)));
        assert_eq!(evaluate_unary(&Value::Nil, UnaryOp::Not), Ok(Value::Bool(true)));
        assert!(evaluate_unary(&Value::Int(i64::MIN), UnaryOp::Neg).is_err());
        let err = evaluate_unary(&Value::string("x"), UnaryOp::Neg).unwrap_err();
        assert_eq!(err.message, "operator `-` cannot be applied to str");
    }
}
