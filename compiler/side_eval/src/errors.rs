//! Evaluation errors.
//!
//! `EvalErrorKind` gives every runtime failure a typed category so callers
//! (the sideload core, the CLI, tests) can match on what went wrong instead
//! of parsing messages. Factory functions below are the public way to build
//! errors; they fill in both `kind` and `message`.

use std::fmt;

use side_ir::{BinaryOp, Span, UnaryOp};

/// Result of evaluating an expression or calling a value.
pub type EvalResult = Result<crate::Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Arithmetic
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow {
        operation: String,
    },

    // Type/Operator
    TypeMismatch {
        expected: String,
        got: String,
    },
    InvalidBinaryOp {
        op: BinaryOp,
        left: String,
        right: String,
    },
    InvalidUnaryOp {
        op: UnaryOp,
        operand: String,
    },

    // Access
    UndefinedVariable {
        name: String,
    },
    UndefinedField {
        field: String,
        type_name: String,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    NotIndexable {
        type_name: String,
    },
    NotIterable {
        type_name: String,
    },

    // Function
    NotCallable {
        type_name: String,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    ConstructorArguments {
        type_name: String,
        got: usize,
    },
    StackOverflow {
        depth: usize,
    },

    // Control flow
    ReturnOutsideFunction,
    LoopControlOutsideLoop {
        keyword: &'static str,
    },

    // Raised by the script itself
    AssertionFailed {
        message: String,
    },
    Raised {
        message: String,
    },

    // Unit lifetime
    UnitUnloaded {
        unit: String,
    },

    /// Catch-all for errors without a structured category.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::InvalidBinaryOp { op, left, right } => write!(
                f,
                "operator `{}` cannot be applied to {left} and {right}",
                op.as_symbol()
            ),
            Self::InvalidUnaryOp { op, operand } => write!(
                f,
                "operator `{}` cannot be applied to {operand}",
                op.as_symbol()
            ),
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::UndefinedField { field, type_name } => {
                write!(f, "{type_name} has no field or method `{field}`")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::NotIndexable { type_name } => write!(f, "{type_name} cannot be indexed"),
            Self::NotIterable { type_name } => write!(f, "{type_name} is not iterable"),
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::ConstructorArguments { type_name, got } => write!(
                f,
                "type {type_name} is constructed without arguments, got {got}"
            ),
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }
            Self::ReturnOutsideFunction => write!(f, "`return` outside of a function"),
            Self::LoopControlOutsideLoop { keyword } => write!(f, "`{keyword}` outside of a loop"),
            Self::AssertionFailed { message } => write!(f, "assertion failed: {message}"),
            Self::Raised { message } => write!(f, "{message}"),
            Self::UnitUnloaded { unit } => {
                write!(f, "unit {unit} was dropped; its functions can no longer run")
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message; equals `kind.to_string()`.
    pub message: String,
    /// Source location of the innermost expression that failed.
    pub span: Option<Span>,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            span: None,
        }
    }

    /// Create an error from a structured kind.
    #[cold]
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
        }
    }

    /// Attach a span unless an inner expression already did.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Factory functions

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn invalid_binary_op(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn invalid_unary_op(op: UnaryOp, operand: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp {
        op,
        operand: operand.to_string(),
    })
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_field(field: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedField {
        field: field.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn not_indexable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIndexable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_iterable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn constructor_arguments(type_name: &str, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstructorArguments {
        type_name: type_name.to_string(),
        got,
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn assertion_failed(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssertionFailed {
        message: message.to_string(),
    })
}

#[cold]
pub fn raised(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Raised {
        message: message.to_string(),
    })
}

#[cold]
pub fn unit_unloaded(unit: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnitUnloaded {
        unit: unit.to_string(),
    })
}
