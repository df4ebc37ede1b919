use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<Token> {
    lex(source).unwrap().kinds().cloned().collect()
}

#[test]
fn test_let_binding() {
    assert_eq!(
        kinds("let VALUE = 42"),
        vec![
            Token::Let,
            Token::Ident("VALUE".to_string()),
            Token::Eq,
            Token::Int(42),
        ]
    );
}

#[test]
fn test_newlines_are_tokens_and_comments_are_skipped() {
    assert_eq!(
        kinds("a // trailing\nb"),
        vec![
            Token::Ident("a".to_string()),
            Token::Newline,
            Token::Ident("b".to_string()),
        ]
    );
}

#[test]
fn test_keyword_and_symbol_spellings() {
    assert_eq!(
        kinds("and && or || not !"),
        vec![
            Token::And,
            Token::And,
            Token::Or,
            Token::Or,
            Token::Not,
            Token::Not,
        ]
    );
}

#[test]
fn test_longest_match_operators() {
    assert_eq!(
        kinds("== != <= >= = < >"),
        vec![
            Token::EqEq,
            Token::NotEq,
            Token::LtEq,
            Token::GtEq,
            Token::Eq,
            Token::Lt,
            Token::Gt,
        ]
    );
}

#[test]
fn test_float_and_int() {
    assert_eq!(kinds("1.5 7"), vec![Token::Float(1.5), Token::Int(7)]);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(
        kinds("letter types"),
        vec![
            Token::Ident("letter".to_string()),
            Token::Ident("types".to_string()),
        ]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        kinds(r#""a\n\"b\"\\""#),
        vec![Token::Str("a\n\"b\"\\".to_string())]
    );
}

#[test]
fn test_spans_are_byte_ranges() {
    let tokens = lex("let  x").unwrap();
    assert_eq!(tokens.tokens[0].span, Span::new(0, 3));
    assert_eq!(tokens.tokens[1].span, Span::new(5, 6));
    assert_eq!(tokens.eof, Span::point(6));
}

#[test]
fn test_unexpected_character() {
    let err = lex("let x = @").unwrap_err();
    assert_eq!(err.message, "unexpected character `@`");
    assert_eq!(err.span.start, 8);
}

#[test]
fn test_unterminated_string() {
    let err = lex("let s = \"open").unwrap_err();
    assert!(err.message.contains("unterminated string"));
}

#[test]
fn test_integer_out_of_range() {
    let err = lex("99999999999999999999").unwrap_err();
    assert_eq!(err.message, "integer literal `99999999999999999999` out of range");
}

#[test]
fn test_describe() {
    assert_eq!(Token::RBrace.describe(), "`}`");
    assert_eq!(Token::Ident("x".to_string()).describe(), "identifier `x`");
    assert_eq!(Token::Newline.describe(), "newline");
}
