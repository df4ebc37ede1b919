//! Side Eval - evaluator and unit namespaces for side script.
//!
//! # Architecture
//!
//! - [`Engine`]: parses a source file and runs its top level once in a new
//!   namespace, producing a [`Unit`]
//! - [`Value`]: runtime values; [`Value::Type`] marks constructible types
//! - `interpreter`: tree-walking evaluation of statements and expressions
//! - `builtins`: the functions every unit can call without defining them
//!
//! Values are `Send + Sync`. Units share nothing with each other; the only
//! process-wide state is the counter behind [`UnitName::for_origin`].

mod builtins;
mod engine;
mod environment;
mod errors;
mod interpreter;
mod operators;
pub mod print_handler;
mod unit;
mod value;

pub use builtins::Builtin;
pub use engine::{Engine, EngineConfig, ScriptError, DEFAULT_MAX_CALL_DEPTH};
pub use errors::{
    arity_mismatch, assertion_failed, division_by_zero, integer_overflow, raised, stack_overflow,
    type_mismatch, undefined_field, undefined_variable, EvalError, EvalErrorKind, EvalResult,
};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use unit::{Unit, UnitName, UNIT_NAME_PREFIX};
pub use value::{BoundMethod, FunctionValue, InstanceValue, TypeValue, Value};
