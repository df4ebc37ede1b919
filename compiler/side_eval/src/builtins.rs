//! Builtin functions available to every unit.
//!
//! Builtins are resolved after the unit's own bindings, so a unit may shadow
//! `print` or `len` with its own definitions.

use crate::errors::{arity_mismatch, assertion_failed, raised, type_mismatch, EvalError, EvalResult};
use crate::print_handler::PrintHandlerImpl;
use crate::Value;

/// Upper bound on the number of elements `range` will materialize.
const MAX_RANGE_LEN: i64 = 10_000_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Print,
    Len,
    Str,
    Int,
    Range,
    TypeOf,
    Assert,
    Fail,
}

impl Builtin {
    pub const ALL: [Builtin; 8] = [
        Builtin::Print,
        Builtin::Len,
        Builtin::Str,
        Builtin::Int,
        Builtin::Range,
        Builtin::TypeOf,
        Builtin::Assert,
        Builtin::Fail,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Len => "len",
            Builtin::Str => "str",
            Builtin::Int => "int",
            Builtin::Range => "range",
            Builtin::TypeOf => "type_of",
            Builtin::Assert => "assert",
            Builtin::Fail => "fail",
        }
    }
}

/// Invoke a builtin with already-evaluated arguments.
pub(crate) fn call_builtin(builtin: Builtin, args: &[Value], out: &PrintHandlerImpl) -> EvalResult {
    match builtin {
        Builtin::Print => {
            let line = args
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            out.println(&line);
            Ok(Value::Nil)
        }
        Builtin::Len => {
            let [value] = exact::<1>(builtin, args)?;
            let len = match value {
                Value::Str(s) => s.chars().count(),
                Value::List(items) => items.len(),
                other => return Err(type_mismatch("str or list", &other.type_name())),
            };
            i64::try_from(len)
                .map(Value::Int)
                .map_err(|_| EvalError::new("length does not fit in an int"))
        }
        Builtin::Str => {
            let [value] = exact::<1>(builtin, args)?;
            Ok(match value {
                Value::Str(_) => value.clone(),
                other => Value::string(other.to_string()),
            })
        }
        Builtin::Int => {
            let [value] = exact::<1>(builtin, args)?;
            to_int(value)
        }
        Builtin::Range => range(args),
        Builtin::TypeOf => {
            let [value] = exact::<1>(builtin, args)?;
            Ok(Value::string(value.type_name()))
        }
        Builtin::Assert => match args {
            [cond] if cond.is_truthy() => Ok(Value::Nil),
            [_] => Err(assertion_failed("condition is false")),
            [cond, _] if cond.is_truthy() => Ok(Value::Nil),
            [_, message] => Err(assertion_failed(&message.to_string())),
            _ => Err(arity_mismatch(builtin.name(), 2, args.len())),
        },
        Builtin::Fail => {
            let [message] = exact::<1>(builtin, args)?;
            Err(raised(&message.to_string()))
        }
    }
}

fn exact<const N: usize>(builtin: Builtin, args: &[Value]) -> Result<&[Value; N], EvalError> {
    args.try_into()
        .map_err(|_| arity_mismatch(builtin.name(), N, args.len()))
}

fn to_int(value: &Value) -> EvalResult {
    match value {
        Value::Int(_) => Ok(value.clone()),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Float(f) => float_to_int(*f),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| EvalError::new(format!("cannot convert {:?} to int", &**s))),
        other => Err(type_mismatch("int, float, bool or str", &other.type_name())),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_to_int(f: f64) -> EvalResult {
    let truncated = f.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Ok(Value::Int(truncated as i64))
    } else {
        Err(EvalError::new(format!("cannot convert {f} to int")))
    }
}

fn range(args: &[Value]) -> EvalResult {
    let (start, end) = match args {
        [end] => (0, int_arg(end)?),
        [start, end] => (int_arg(start)?, int_arg(end)?),
        _ => return Err(arity_mismatch(Builtin::Range.name(), 2, args.len())),
    };
    if end.saturating_sub(start) > MAX_RANGE_LEN {
        return Err(EvalError::new(format!(
            "range of {start}..{end} exceeds {MAX_RANGE_LEN} elements"
        )));
    }
    Ok(Value::list((start..end).map(Value::Int).collect()))
}

fn int_arg(value: &Value) -> Result<i64, EvalError> {
    value
        .as_int()
        .ok_or_else(|| type_mismatch("int", &value.type_name()))
}
