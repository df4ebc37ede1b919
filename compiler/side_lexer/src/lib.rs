//! Side Lexer - tokenizer for side script.
//!
//! Built on `logos`. Newlines are significant (they terminate statements),
//! so only horizontal whitespace and `//` comments are skipped here; the
//! parser decides where a newline may be ignored.

use std::fmt;

use logos::Logos;
use side_ir::Span;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")] // Skip whitespace (but not newlines)
pub enum Token {
    // Comments
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,

    // Newlines (significant for statement separation)
    #[token("\n")]
    Newline,

    // Keywords
    #[token("let")]
    Let,
    #[token("fn")]
    Fn,
    #[token("type")]
    Type,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("return")]
    Return,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("nil")]
    Nil,
    #[token("and")]
    #[token("&&")]
    And,
    #[token("or")]
    #[token("||")]
    Or,
    #[token("not")]
    #[token("!")]
    Not,

    // Symbols
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,

    // Operators
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r#""([^"\\\n]|\\.)*""#, unescape)]
    Str(String),

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

impl Token {
    /// Human-readable description used in parse errors.
    pub fn describe(&self) -> String {
        match self {
            Token::Newline => "newline".to_string(),
            Token::Int(n) => format!("integer `{n}`"),
            Token::Float(n) => format!("float `{n}`"),
            Token::Str(_) => "string literal".to_string(),
            Token::Ident(name) => format!("identifier `{name}`"),
            other => format!("`{}`", other.symbol()),
        }
    }

    /// Source text for fixed tokens.
    fn symbol(&self) -> &'static str {
        match self {
            Token::Comment => "//",
            Token::Newline => "\\n",
            Token::Let => "let",
            Token::Fn => "fn",
            Token::Type => "type",
            Token::If => "if",
            Token::Else => "else",
            Token::While => "while",
            Token::For => "for",
            Token::In => "in",
            Token::Return => "return",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::True => "true",
            Token::False => "false",
            Token::Nil => "nil",
            Token::And => "and",
            Token::Or => "or",
            Token::Not => "not",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::Comma => ",",
            Token::Dot => ".",
            Token::Semicolon => ";",
            Token::Eq => "=",
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::Lt => "<",
            Token::LtEq => "<=",
            Token::Gt => ">",
            Token::GtEq => ">=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Int(_) | Token::Float(_) | Token::Str(_) | Token::Ident(_) => "literal",
        }
    }
}

/// Resolve escape sequences inside a string literal slice (quotes included).
///
/// Returns `None` for unknown escapes, which logos reports as a lex error.
fn unescape(lex: &mut logos::Lexer<'_, Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '0' => out.push('\0'),
            _ => return None,
        }
    }
    Some(out)
}

/// A token with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Span,
}

/// Output of [`lex`]: tokens in source order plus the end-of-input position.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenList {
    pub tokens: Vec<Spanned>,
    pub eof: Span,
}

impl TokenList {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().map(|t| &t.token)
    }
}

/// A tokenization failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl LexError {
    #[cold]
    fn new(message: impl Into<String>, span: Span) -> Self {
        LexError {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LexError {}

/// Tokenize a side script source file.
///
/// Stops at the first invalid token.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::try_from_range(range.clone())
            .map_err(|e| LexError::new(e.to_string(), Span::DUMMY))?;
        match result {
            Ok(token) => tokens.push(Spanned { token, span }),
            Err(()) => return Err(LexError::new(classify_error(&source[range]), span)),
        }
    }

    let end = u32::try_from(source.len())
        .map_err(|_| LexError::new("source file exceeds 4 GiB", Span::DUMMY))?;
    Ok(TokenList {
        tokens,
        eof: Span::point(end),
    })
}

/// Pick a message for a slice logos rejected.
fn classify_error(slice: &str) -> String {
    if slice.starts_with('"') {
        return "unterminated string literal or invalid escape sequence".to_string();
    }
    if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
        return format!("integer literal `{slice}` out of range");
    }
    match slice.chars().next() {
        Some(ch) => format!("unexpected character `{ch}`"),
        None => "unexpected end of input".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
