use std::fmt;

/// A region of source text.
///
/// `start` and `end` are UTF-16 code-unit offsets; `line` and `column` locate
/// the first character of the region (both 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Fixed-spelling structural tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuator {
    /// `<`
    Lt,
    /// `</`
    LtSlash,
    /// `>`
    Gt,
    /// `=`
    Equals,
}

impl Punctuator {
    pub fn as_str(self) -> &'static str {
        match self {
            Punctuator::Lt => "<",
            Punctuator::LtSlash => "</",
            Punctuator::Gt => ">",
            Punctuator::Equals => "=",
        }
    }
}

impl fmt::Display for Punctuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token classification for HSX source.
///
/// Literal variants embed their value directly, so a token is just a kind
/// plus a span.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    /// Raw characters between the quotes; no escapes are processed.
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Punctuator(Punctuator),
}

impl TokenKind {
    /// Human-readable name of the token class, used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Identifier(_) => "identifier",
            TokenKind::String(_) => "string literal",
            TokenKind::Number(_) => "numeric literal",
            TokenKind::Boolean(_) => "boolean literal",
            TokenKind::Null => "null literal",
            TokenKind::Punctuator(_) => "punctuator",
        }
    }
}

/// Renders the token's payload the way it is reported in error messages.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) => f.write_str(name),
            TokenKind::String(value) => f.write_str(value),
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Boolean(b) => write!(f, "{b}"),
            TokenKind::Null => f.write_str("null"),
            TokenKind::Punctuator(p) => f.write_str(p.as_str()),
        }
    }
}

/// A token produced by the HSX scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn is_punctuator(&self, punctuator: Punctuator) -> bool {
        self.kind == TokenKind::Punctuator(punctuator)
    }
}
