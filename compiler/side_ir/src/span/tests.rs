use super::*;

#[test]
fn test_span_merge() {
    let a = Span::new(10, 20);
    let b = Span::new(15, 30);
    let merged = a.merge(b);
    assert_eq!(merged.start, 10);
    assert_eq!(merged.end, 30);
}

#[test]
fn test_span_try_from_range_start_too_large() {
    let large_start = u32::MAX as usize + 1;
    let result = Span::try_from_range(large_start..large_start + 10);
    assert!(matches!(result, Err(SpanError::StartTooLarge(_))));
}

#[test]
fn test_span_point_is_empty() {
    assert!(Span::point(7).is_empty());
    assert!(!Span::new(7, 8).is_empty());
}

#[test]
fn test_line_col_first_line() {
    let source = "let x = 1";
    assert_eq!(Span::new(4, 5).line_col(source), (1, 5));
}

#[test]
fn test_line_col_after_newlines() {
    let source = "let a = 1\nlet b = 2\n  fail(\"x\")";
    let offset = u32::try_from(source.find("fail").unwrap_or(0)).unwrap_or(0);
    assert_eq!(Span::point(offset).line_col(source), (3, 3));
}

#[test]
fn test_line_col_clamps_past_end() {
    let source = "a\nb";
    assert_eq!(Span::point(100).line_col(source), (2, 2));
}
