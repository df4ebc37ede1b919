//! Variable scoping.
//!
//! Two levels: the unit's global [`Namespace`] and, while a function runs,
//! one flat local frame. Blocks do not open scopes; a `let` inside a loop
//! body binds in the enclosing frame.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::unit::Namespace;
use crate::Value;

pub(crate) struct Environment {
    globals: Arc<Namespace>,
    locals: Option<FxHashMap<String, Value>>,
}

impl Environment {
    /// Top-level scope: `let` defines unit members.
    pub(crate) fn global(globals: Arc<Namespace>) -> Self {
        Environment {
            globals,
            locals: None,
        }
    }

    /// Function frame with the parameters already bound.
    pub(crate) fn frame(globals: Arc<Namespace>, locals: FxHashMap<String, Value>) -> Self {
        Environment {
            globals,
            locals: Some(locals),
        }
    }

    pub(crate) fn globals(&self) -> &Arc<Namespace> {
        &self.globals
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.locals.as_ref().and_then(|l| l.get(name)) {
            return Some(value.clone());
        }
        self.globals.get(name)
    }

    pub(crate) fn define(&mut self, name: &str, value: Value) {
        match &mut self.locals {
            Some(locals) => {
                locals.insert(name.to_string(), value);
            }
            None => self.globals.define(name, value),
        }
    }

    /// Update the nearest existing binding; returns `false` if none exists.
    pub(crate) fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.locals.as_mut().and_then(|l| l.get_mut(name)) {
            *slot = value;
            return true;
        }
        self.globals.assign(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineConfig, UnitName};

    fn namespace() -> Arc<Namespace> {
        Arc::new(Namespace::new(UnitName::new("env"), EngineConfig::default()))
    }

    #[test]
    fn global_define_writes_namespace() {
        let ns = namespace();
        let mut env = Environment::global(Arc::clone(&ns));
        env.define("x", Value::Int(1));
        assert_eq!(ns.get("x"), Some(Value::Int(1)));
    }

    #[test]
    fn frame_shadows_and_assigns() {
        let ns = namespace();
        ns.define("x", Value::Int(1));
        ns.define("y", Value::Int(2));
        let mut env = Environment::frame(Arc::clone(&ns), FxHashMap::default());
        env.define("x", Value::Int(10));
        assert_eq!(env.lookup("x"), Some(Value::Int(10)));
        assert_eq!(ns.get("x"), Some(Value::Int(1)));

        assert!(env.assign("y", Value::Int(20)));
        assert_eq!(ns.get("y"), Some(Value::Int(20)));
        assert!(!env.assign("z", Value::Nil));
    }
}
