use super::*;
use pretty_assertions::assert_eq;
use side_ir::{BinaryOp, ExprKind, StmtKind, UnaryOp};

fn parse_ok(source: &str) -> Module {
    match parse(source) {
        Ok(module) => module,
        Err(err) => panic!("parse failed: {err} at {}", err.span),
    }
}

fn first_expr(source: &str) -> ExprKind {
    let module = parse_ok(source);
    match &module.body[0].kind {
        StmtKind::Expr(expr) => expr.kind.clone(),
        StmtKind::Let { value, .. } => value.kind.clone(),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn test_empty_source() {
    assert!(parse_ok("").body.is_empty());
    assert!(parse_ok("\n\n// only a comment\n").body.is_empty());
}

#[test]
fn test_let_statements_separated_by_newlines_and_semicolons() {
    let module = parse_ok("let a = 1\nlet b = 2; let c = 3");
    let names: Vec<_> = module
        .body
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::Let { name, .. } => name.as_str(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_precedence() {
    let ExprKind::Binary { op, left, right } = first_expr("1 + 2 * 3") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(left.kind, ExprKind::Int(1));
    assert!(matches!(
        right.kind,
        ExprKind::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn test_logical_binds_looser_than_comparison() {
    let ExprKind::Binary { op, .. } = first_expr("a < b and c or d") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Or);
}

#[test]
fn test_unary() {
    let ExprKind::Unary { op, operand } = first_expr("not -x") else {
        panic!("expected unary");
    };
    assert_eq!(op, UnaryOp::Not);
    assert!(matches!(
        operand.kind,
        ExprKind::Unary {
            op: UnaryOp::Neg,
            ..
        }
    ));
}

#[test]
fn test_operator_continues_on_next_line() {
    let module = parse_ok("let x = 1 +\n  2");
    assert_eq!(module.body.len(), 1);
}

#[test]
fn test_operator_at_line_start_is_new_statement() {
    // `- 2` on its own line is a unary expression statement.
    let module = parse_ok("let x = 1\n- 2");
    assert_eq!(module.body.len(), 2);
}

#[test]
fn test_postfix_chain() {
    let ExprKind::Call { callee, args } = first_expr("obj.items[0].run(1, 2)") else {
        panic!("expected call");
    };
    assert_eq!(args.len(), 2);
    let ExprKind::Field { receiver, name } = callee.kind else {
        panic!("expected field");
    };
    assert_eq!(name, "run");
    assert!(matches!(receiver.kind, ExprKind::Index { .. }));
}

#[test]
fn test_list_literal_multiline_with_trailing_comma() {
    let ExprKind::List(items) = first_expr("[\n  1,\n  2,\n]") else {
        panic!("expected list");
    };
    assert_eq!(items.len(), 2);
}

#[test]
fn test_function_definition() {
    let module = parse_ok("fn add(a, b) {\n  return a + b\n}");
    let StmtKind::Function(def) = &module.body[0].kind else {
        panic!("expected function");
    };
    assert_eq!(def.name, "add");
    assert_eq!(def.params, vec!["a".to_string(), "b".to_string()]);
    assert!(matches!(def.body[0].kind, StmtKind::Return(Some(_))));
}

#[test]
fn test_bare_return() {
    let module = parse_ok("fn f() { return }");
    let StmtKind::Function(def) = &module.body[0].kind else {
        panic!("expected function");
    };
    assert_eq!(def.body[0].kind, StmtKind::Return(None));
}

#[test]
fn test_type_definition() {
    let source = "type Thing {\n  value = \"hello\"\n  count = 0\n  fn init(self) {\n    self.count = 1\n  }\n}";
    let module = parse_ok(source);
    let StmtKind::Type(def) = &module.body[0].kind else {
        panic!("expected type");
    };
    assert_eq!(def.name, "Thing");
    let fields: Vec<_> = def.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, vec!["value", "count"]);
    assert_eq!(def.methods.len(), 1);
    assert_eq!(def.methods[0].params, vec!["self".to_string()]);
}

#[test]
fn test_empty_type() {
    let module = parse_ok("type Empty {}");
    assert!(matches!(module.body[0].kind, StmtKind::Type(_)));
}

#[test]
fn test_if_else_if_else() {
    let module = parse_ok("if a {\n  x = 1\n}\nelse if b {\n  x = 2\n} else {\n  x = 3\n}");
    assert_eq!(module.body.len(), 1);
    let StmtKind::If { else_body, .. } = &module.body[0].kind else {
        panic!("expected if");
    };
    assert!(matches!(else_body[0].kind, StmtKind::If { .. }));
}

#[test]
fn test_loops() {
    let module = parse_ok("while i < 3 { i = i + 1 }\nfor x in [1, 2] { continue }");
    assert!(matches!(module.body[0].kind, StmtKind::While { .. }));
    let StmtKind::For { binding, body, .. } = &module.body[1].kind else {
        panic!("expected for");
    };
    assert_eq!(binding, "x");
    assert_eq!(body[0].kind, StmtKind::Continue);
}

#[test]
fn test_field_assignment() {
    let module = parse_ok("self.value = 2");
    assert!(matches!(module.body[0].kind, StmtKind::Assign { .. }));
}

#[test]
fn test_invalid_assignment_target() {
    let err = parse("1 + 2 = 3").unwrap_err();
    assert_eq!(err.message, "invalid assignment target");
}

#[test]
fn test_missing_separator() {
    let err = parse("let a = 1 let b = 2").unwrap_err();
    assert_eq!(
        err.message,
        "expected newline or `;` after statement, found `let`"
    );
}

#[test]
fn test_unclosed_block() {
    let err = parse("fn f() {\n  return 1\n").unwrap_err();
    assert_eq!(err.message, "expected `}`, found end of input");
}

#[test]
fn test_duplicate_parameter() {
    let err = parse("fn f(a, a) {}").unwrap_err();
    assert_eq!(err.message, "duplicate parameter `a` in function `f`");
}

#[test]
fn test_duplicate_field() {
    let err = parse("type T {\n  a = 1\n  a = 2\n}").unwrap_err();
    assert_eq!(err.message, "duplicate field `a` in type `T`");
}

#[test]
fn test_lex_errors_surface_as_parse_errors() {
    let err = parse("let x = $").unwrap_err();
    assert_eq!(err.message, "unexpected character `$`");
    assert_eq!(err.span.start, 8);
}

#[test]
fn test_deeply_nested_expression() {
    let depth = 5_000;
    let source = format!("let x = {}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(parse_ok(&source).body.len(), 1);
}
