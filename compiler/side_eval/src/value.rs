//! Runtime values.
//!
//! # Thread Safety
//!
//! Every heap value is `Arc`-backed and mutable state (instance fields, unit
//! bindings) sits behind `parking_lot::RwLock`, so `Value` is `Send + Sync`
//! and a host may hand extracted values to other threads.
//!
//! # Ownership
//!
//! Functions and types reference their unit's namespace weakly. The unit
//! owns its bindings; a function stored in those bindings must not keep
//! the namespace alive, or every unit defining a function would leak.
//! Calling a function after its unit was dropped raises `UnitUnloaded`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use side_ir::{FunctionDef, TypeDef};

use crate::builtins::Builtin;
use crate::errors::{unit_unloaded, EvalError};
use crate::unit::{Namespace, UnitName};

/// Runtime value of side script.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    /// Lists have value semantics: element assignment replaces the list.
    List(Arc<Vec<Value>>),
    /// User-defined function (or a method read off its type).
    Function(FunctionValue),
    /// Function provided by the host environment.
    Builtin(Builtin),
    /// Constructible type; calling it with no arguments builds an instance.
    Type(Arc<TypeValue>),
    /// Instance of a user-defined type.
    Instance(Arc<InstanceValue>),
    /// Method bound to its receiver (`obj.method`).
    BoundMethod(Arc<BoundMethod>),
}

impl Value {
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }

    /// Name of the value's type, as reported by `type_of` and in errors.
    ///
    /// Instances report their type's name.
    pub fn type_name(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Function(_) => "function".to_string(),
            Value::Builtin(_) => "builtin".to_string(),
            Value::Type(_) => "type".to_string(),
            Value::Instance(inst) => inst.ty.name().to_string(),
            Value::BoundMethod(_) => "method".to_string(),
        }
    }

    /// Truthiness: `false`, `nil`, zero, and empty strings/lists are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            _ => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The constructible type behind this value, if it is one.
    pub fn as_type(&self) -> Option<&Arc<TypeValue>> {
        match self {
            Value::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Arc<InstanceValue>> {
        match self {
            Value::Instance(inst) => Some(inst),
            _ => None,
        }
    }

    /// Call this value from the host with positional arguments.
    ///
    /// Runs with the configuration of the unit the value came from.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, EvalError> {
        crate::interpreter::Interpreter::call_from_host(self, args)
    }

    /// Source-like representation: strings are quoted.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("{s:?}"),
            other => other.to_string(),
        }
    }

    /// Representation inside a container. Instances collapse to their type
    /// name so self-referencing structures still print.
    fn nested_repr(&self) -> String {
        match self {
            Value::Instance(inst) => format!("<{} instance>", inst.ty.name()),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::nested_repr).collect();
                format!("[{}]", inner.join(", "))
            }
            other => other.repr(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                int_to_float(*a) == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            // Identity comparison for everything with a definition behind it.
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Type(a), Value::Type(b)) => Arc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Arc::ptr_eq(a, b),
            (Value::BoundMethod(a), Value::BoundMethod(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Widen an integer for mixed int/float arithmetic and comparison.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn int_to_float(n: i64) -> f64 {
    n as f64
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => {
                if n.is_finite() && n.fract() == 0.0 {
                    write!(f, "{n:.1}")
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item.nested_repr())?;
                }
                write!(f, "]")
            }
            Value::Function(func) => write!(f, "<function {}>", func.def.name),
            Value::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name()),
            Value::Type(ty) => write!(f, "<type {}>", ty.name()),
            Value::Instance(inst) => write!(f, "{inst}"),
            Value::BoundMethod(method) => write!(
                f,
                "<method {}.{}>",
                method.receiver.ty.name(),
                method.func.def.name
            ),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repr())
    }
}

/// A user-defined function together with the unit it was defined in.
#[derive(Clone)]
pub struct FunctionValue {
    pub(crate) def: Arc<FunctionDef>,
    pub(crate) unit: UnitName,
    pub(crate) globals: Weak<Namespace>,
}

impl FunctionValue {
    pub(crate) fn new(def: Arc<FunctionDef>, unit: UnitName, globals: Weak<Namespace>) -> Self {
        FunctionValue { def, unit, globals }
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn params(&self) -> &[String] {
        &self.def.params
    }

    /// The defining unit's namespace, if that unit is still alive.
    pub(crate) fn globals(&self) -> Result<Arc<Namespace>, EvalError> {
        self.globals
            .upgrade()
            .ok_or_else(|| unit_unloaded(self.unit.as_str()))
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.def, &other.def) && Weak::ptr_eq(&self.globals, &other.globals)
    }
}

/// A constructible type declared by a unit.
pub struct TypeValue {
    pub(crate) def: Arc<TypeDef>,
    pub(crate) unit: UnitName,
    pub(crate) globals: Weak<Namespace>,
}

impl TypeValue {
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Name of the unit that declared this type.
    pub fn unit(&self) -> &UnitName {
        &self.unit
    }

    /// Declared field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.def.fields.iter().map(|f| f.name.as_str())
    }

    /// Look up a method as an unbound function (`self` is its first parameter).
    pub fn method(&self, name: &str) -> Option<FunctionValue> {
        self.def
            .methods
            .iter()
            .find(|m| m.name == name)
            .map(|def| FunctionValue::new(Arc::clone(def), self.unit.clone(), self.globals.clone()))
    }

    /// Build a new instance with no constructor arguments.
    ///
    /// Field defaults are evaluated in declaration order, then `init(self)`
    /// runs if the type declares it.
    pub fn construct(self: &Arc<Self>) -> Result<Value, EvalError> {
        crate::interpreter::Interpreter::construct_from_host(self)
    }
}

/// An instance of a user-defined type.
pub struct InstanceValue {
    pub(crate) ty: Arc<TypeValue>,
    pub(crate) fields: RwLock<BTreeMap<String, Value>>,
}

impl InstanceValue {
    pub(crate) fn new(ty: Arc<TypeValue>) -> Self {
        InstanceValue {
            ty,
            fields: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn type_value(&self) -> &Arc<TypeValue> {
        &self.ty
    }

    /// Current value of a field.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.read().get(name).cloned()
    }

    pub fn set_field(&self, name: &str, value: Value) {
        self.fields.write().insert(name.to_string(), value);
    }

    /// Field names currently set on the instance, sorted.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.read().keys().cloned().collect()
    }
}

impl fmt::Display for InstanceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Release the lock before formatting.
        let fields: Vec<(String, Value)> = self
            .fields
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        write!(f, "{} {{", self.ty.name())?;
        for (i, (name, value)) in fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{name}: {}", value.nested_repr())?;
        }
        if fields.is_empty() {
            write!(f, "}}")
        } else {
            write!(f, " }}")
        }
    }
}

/// A method together with the instance it was read from.
pub struct BoundMethod {
    pub(crate) receiver: Arc<InstanceValue>,
    pub(crate) func: FunctionValue,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
