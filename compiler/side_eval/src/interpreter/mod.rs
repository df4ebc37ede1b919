//! Tree-walking interpreter.
//!
//! An `Interpreter` lives for one entry from the host: running a unit's
//! top level, calling a value, or constructing a type. It carries the
//! engine configuration and the current call depth; all bindings live in
//! [`Environment`]s that the interpreter threads through.
//!
//! No lock is held while user code runs: bindings and fields are cloned
//! out of their `RwLock` before being evaluated further.

mod call;
mod exec;
mod expr;

use std::sync::Arc;

use side_ir::{Module, Span};

use crate::environment::Environment;
use crate::errors::{EvalError, EvalErrorKind, EvalResult};
use crate::unit::Namespace;
use crate::value::TypeValue;
use crate::{EngineConfig, Value};

/// How a statement finished.
pub(crate) enum Flow {
    Normal,
    Return(Value, Span),
    Break(Span),
    Continue(Span),
}

pub(crate) struct Interpreter<'c> {
    config: &'c EngineConfig,
    depth: usize,
}

impl<'c> Interpreter<'c> {
    pub(crate) fn new(config: &'c EngineConfig) -> Self {
        Interpreter { config, depth: 0 }
    }

    /// Execute a unit's top-level statements with `ns` as the global scope.
    #[tracing::instrument(level = "trace", skip_all, fields(unit = %ns.name))]
    pub(crate) fn run_module(&mut self, ns: &Arc<Namespace>, module: &Module) -> Result<(), EvalError> {
        let mut env = Environment::global(Arc::clone(ns));
        for stmt in &module.body {
            match self.exec_stmt(&mut env, stmt)? {
                Flow::Normal => {}
                Flow::Return(_, span) => {
                    return Err(EvalError::from_kind(EvalErrorKind::ReturnOutsideFunction)
                        .or_span(span));
                }
                Flow::Break(span) => return Err(loop_control_outside_loop("break", span)),
                Flow::Continue(span) => return Err(loop_control_outside_loop("continue", span)),
            }
        }
        Ok(())
    }

    /// Call a value on behalf of the host, using its unit's configuration.
    pub(crate) fn call_from_host(callee: &Value, args: Vec<Value>) -> EvalResult {
        let config = host_config(callee)?;
        Interpreter::new(&config).call_value(callee, args)
    }

    /// Construct an instance on behalf of the host.
    pub(crate) fn construct_from_host(ty: &Arc<TypeValue>) -> EvalResult {
        let globals = ty
            .globals
            .upgrade()
            .ok_or_else(|| crate::errors::unit_unloaded(ty.unit.as_str()))?;
        let config = globals.config.clone();
        Interpreter::new(&config).construct(ty)
    }
}

/// Configuration of the unit a callable value belongs to.
fn host_config(callee: &Value) -> Result<EngineConfig, EvalError> {
    Ok(match callee {
        Value::Function(func) => func.globals()?.config.clone(),
        Value::BoundMethod(method) => method.func.globals()?.config.clone(),
        Value::Type(ty) => ty
            .globals
            .upgrade()
            .ok_or_else(|| crate::errors::unit_unloaded(ty.unit.as_str()))?
            .config
            .clone(),
        _ => EngineConfig::default(),
    })
}

#[cold]
fn loop_control_outside_loop(keyword: &'static str, span: Span) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LoopControlOutsideLoop { keyword }).or_span(span)
}
