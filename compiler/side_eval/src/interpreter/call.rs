//! Calls and construction.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use side_stack::ensure_sufficient_stack;

use super::{loop_control_outside_loop, Flow, Interpreter};
use crate::builtins::call_builtin;
use crate::environment::Environment;
use crate::errors::{arity_mismatch, constructor_arguments, not_callable, stack_overflow, EvalResult};
use crate::unit::Namespace;
use crate::value::{FunctionValue, InstanceValue, TypeValue};
use crate::Value;

/// Method run after field defaults when a type declares it.
const INIT_METHOD: &str = "init";

impl Interpreter<'_> {
    #[tracing::instrument(level = "trace", skip_all, fields(callee = %callee.type_name()))]
    pub(crate) fn call_value(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(func, args),
            Value::BoundMethod(method) => {
                let mut full = Vec::with_capacity(args.len() + 1);
                full.push(Value::Instance(Arc::clone(&method.receiver)));
                full.extend(args);
                self.call_function(&method.func, full)
            }
            Value::Builtin(builtin) => call_builtin(*builtin, &args, &self.config.print_handler),
            Value::Type(ty) => {
                if args.is_empty() {
                    self.construct(ty)
                } else {
                    Err(constructor_arguments(ty.name(), args.len()))
                }
            }
            other => Err(not_callable(&other.type_name())),
        }
    }

    fn call_function(&mut self, func: &FunctionValue, args: Vec<Value>) -> EvalResult {
        let def = &func.def;
        if def.params.len() != args.len() {
            return Err(arity_mismatch(&def.name, def.params.len(), args.len()));
        }
        if self.depth >= self.config.max_call_depth {
            return Err(stack_overflow(self.depth));
        }
        let globals = func.globals()?;
        let locals: FxHashMap<String, Value> = def.params.iter().cloned().zip(args).collect();
        let mut env = Environment::frame(globals, locals);

        self.depth += 1;
        let flow = ensure_sufficient_stack(|| self.exec_block(&mut env, &def.body));
        self.depth -= 1;

        match flow? {
            Flow::Normal => Ok(Value::Nil),
            Flow::Return(value, _) => Ok(value),
            Flow::Break(span) => Err(loop_control_outside_loop("break", span)),
            Flow::Continue(span) => Err(loop_control_outside_loop("continue", span)),
        }
    }

    /// Build an instance: field defaults in declaration order, then `init`.
    ///
    /// Construction counts toward the call depth, so a field default that
    /// constructs its own type fails with `StackOverflow`.
    pub(crate) fn construct(&mut self, ty: &Arc<TypeValue>) -> EvalResult {
        let globals = ty
            .globals
            .upgrade()
            .ok_or_else(|| crate::errors::unit_unloaded(ty.unit.as_str()))?;
        if self.depth >= self.config.max_call_depth {
            return Err(stack_overflow(self.depth));
        }
        tracing::trace!(type_name = ty.name(), unit = %ty.unit, "constructing instance");

        self.depth += 1;
        let built = ensure_sufficient_stack(|| self.build_instance(ty, globals));
        self.depth -= 1;
        built
    }

    fn build_instance(&mut self, ty: &Arc<TypeValue>, globals: Arc<Namespace>) -> EvalResult {
        let instance = Arc::new(InstanceValue::new(Arc::clone(ty)));
        let mut env = Environment::global(globals);
        for field in &ty.def.fields {
            let value = self.eval_expr(&mut env, &field.default)?;
            instance.set_field(&field.name, value);
        }
        if let Some(init) = ty.method(INIT_METHOD) {
            self.call_function(&init, vec![Value::Instance(Arc::clone(&instance))])?;
        }
        Ok(Value::Instance(instance))
    }
}
