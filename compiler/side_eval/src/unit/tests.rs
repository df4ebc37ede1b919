use std::path::Path;

use super::*;

#[test]
fn names_from_same_origin_differ() {
    let a = UnitName::for_origin(Path::new("/plugins/mod.side"));
    let b = UnitName::for_origin(Path::new("/plugins/mod.side"));
    assert_ne!(a, b);

    // Same path hash, different sequence suffix.
    let (a_prefix, _) = a.as_str().rsplit_once('_').unwrap_or_default();
    let (b_prefix, _) = b.as_str().rsplit_once('_').unwrap_or_default();
    assert_eq!(a_prefix, b_prefix);
}

#[test]
fn name_shape() {
    let name = UnitName::for_origin(Path::new("x.side"));
    let parts: Vec<&str> = name.as_str().split('_').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], UNIT_NAME_PREFIX);
    assert_eq!(parts[1].len(), 16);
    assert!(parts[1].chars().all(|c| c.is_ascii_hexdigit()));
    assert!(parts[2].parse::<u64>().is_ok());
}

#[test]
fn different_origins_hash_differently() {
    let a = UnitName::for_origin(Path::new("a.side"));
    let b = UnitName::for_origin(Path::new("b.side"));
    assert_ne!(a.as_str().split('_').nth(1), b.as_str().split('_').nth(1));
}

#[test]
fn namespace_assign_requires_existing_binding() {
    let ns = Namespace::new(UnitName::new("t"), EngineConfig::default());
    assert!(!ns.assign("x", Value::Int(1)));
    ns.define("x", Value::Int(1));
    assert!(ns.assign("x", Value::Int(2)));
    assert_eq!(ns.get("x"), Some(Value::Int(2)));
}

#[test]
fn unit_handles() {
    let ns = Arc::new(Namespace::new(UnitName::new("t"), EngineConfig::default()));
    ns.define("b", Value::Nil);
    ns.define("a", Value::Bool(true));
    let unit = Unit::from_namespace(Arc::clone(&ns));
    let clone = unit.clone();
    assert!(unit.ptr_eq(&clone));
    assert_eq!(unit.member_names(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(unit.member("a"), Some(Value::Bool(true)));
    assert!(unit.has_member("b"));
    assert!(!unit.has_member("c"));
    assert_eq!(unit.len(), 2);
    assert_eq!(unit.to_string(), "<unit t>");

    let other = Unit::from_namespace(Arc::new(Namespace::new(
        UnitName::new("t"),
        EngineConfig::default(),
    )));
    assert!(!unit.ptr_eq(&other));
    assert!(other.is_empty());
}
