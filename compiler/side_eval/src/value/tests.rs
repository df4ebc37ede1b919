use pretty_assertions::assert_eq;

use super::*;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn values_cross_threads() {
    assert_send_sync::<Value>();
    assert_send_sync::<crate::Unit>();
}

#[test]
fn truthiness() {
    let falsy = [
        Value::Nil,
        Value::Bool(false),
        Value::Int(0),
        Value::Float(0.0),
        Value::string(""),
        Value::list(vec![]),
    ];
    for value in &falsy {
        assert!(!value.is_truthy(), "{value:?} should be falsy");
    }
    let truthy = [
        Value::Bool(true),
        Value::Int(-1),
        Value::Float(0.1),
        Value::string("0"),
        Value::list(vec![Value::Nil]),
        Value::Builtin(Builtin::Len),
    ];
    for value in &truthy {
        assert!(value.is_truthy(), "{value:?} should be truthy");
    }
}

#[test]
fn display_and_repr() {
    assert_eq!(Value::Float(2.0).to_string(), "2.0");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::string("hi").to_string(), "hi");
    assert_eq!(Value::string("hi").repr(), "\"hi\"");
    assert_eq!(
        Value::list(vec![Value::Int(1), Value::string("a"), Value::Nil]).to_string(),
        "[1, \"a\", nil]"
    );
    assert_eq!(Value::Builtin(Builtin::Print).to_string(), "<builtin print>");
}

#[test]
fn equality_is_structural_for_data() {
    assert_eq!(Value::Int(3), Value::Float(3.0));
    assert_eq!(
        Value::list(vec![Value::string("a")]),
        Value::list(vec![Value::string("a")])
    );
    assert_ne!(Value::Int(1), Value::string("1"));
    assert_ne!(Value::Nil, Value::Bool(false));
}

#[test]
fn type_names() {
    assert_eq!(Value::Nil.type_name(), "nil");
    assert_eq!(Value::Int(1).type_name(), "int");
    assert_eq!(Value::Float(1.0).type_name(), "float");
    assert_eq!(Value::string("").type_name(), "str");
    assert_eq!(Value::list(vec![]).type_name(), "list");
    assert_eq!(Value::Builtin(Builtin::Str).type_name(), "builtin");
}

#[test]
fn accessors() {
    assert_eq!(Value::string("x").as_str(), Some("x"));
    assert_eq!(Value::Int(4).as_int(), Some(4));
    assert_eq!(Value::Nil.as_int(), None);
    assert!(Value::Nil.as_type().is_none());
    assert!(Value::Nil.as_instance().is_none());
}

#[test]
fn calling_a_builtin_from_the_host() {
    let len = Value::Builtin(Builtin::Len);
    assert_eq!(len.call(vec![Value::string("abc")]), Ok(Value::Int(3)));
}
