use crate::token::{Punctuator, Span, Token, TokenKind};
use crate::LexerError;

/// HSX source scanner.
///
/// Single left-to-right pass over the source. The character under the cursor
/// decides which literal scanner runs; whitespace and line terminators are
/// skipped without producing tokens.
///
/// Offsets are counted in UTF-16 code units so they line up with what a
/// JavaScript host reports for the same string. Line and column are tracked
/// alongside for human-facing diagnostics.
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    offset: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    /// Create a new scanner for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            offset: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens()?;
        Ok(scanner.tokens)
    }

    fn scan_tokens(&mut self) -> Result<(), LexerError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }
        Ok(())
    }

    fn scan_token(&mut self) -> Result<(), LexerError> {
        match self.peek() {
            '"' | '\'' => self.scan_string(),

            // `.5` is a number, a lone `.` is not
            '.' if self.peek_next().is_ascii_digit() => self.scan_number(),
            '0'..='9' => self.scan_number(),

            c if is_identifier_start(c) => self.scan_identifier(),

            c if is_whitespace(c) || is_line_terminator(c) => {
                self.advance();
                Ok(())
            }

            _ => self.scan_punctuator(),
        }
    }

    // --- Scanners ---

    /// Scan a string literal. The value is the raw text between the quotes.
    fn scan_string(&mut self) -> Result<(), LexerError> {
        let (start, line, column) = self.mark();
        let quote = self.advance();

        let mut value = String::new();
        while !self.is_at_end() && self.peek() != quote {
            value.push(self.advance());
        }

        if self.is_at_end() {
            return Err(LexerError::UnterminatedString {
                start,
                line,
                column,
            });
        }

        self.advance(); // closing quote

        self.push(TokenKind::String(value), start, line, column);
        Ok(())
    }

    /// Scan a decimal number: optional integer digits, optional fraction.
    fn scan_number(&mut self) -> Result<(), LexerError> {
        let (start, line, column) = self.mark();

        let mut text = String::new();
        while self.peek().is_ascii_digit() {
            text.push(self.advance());
        }
        if self.peek() == '.' {
            text.push(self.advance());
            while self.peek().is_ascii_digit() {
                text.push(self.advance());
            }
        }

        // `12abc` is neither a number nor an identifier
        if is_identifier_start(self.peek()) {
            return Err(self.unexpected());
        }

        let value: f64 = text.parse().map_err(|_| LexerError::UnexpectedToken {
            position: start,
            ch: text.chars().next().unwrap_or('.'),
            line,
            column,
        })?;

        self.push(TokenKind::Number(value), start, line, column);
        Ok(())
    }

    /// Scan an identifier, reclassifying the `null`, `true` and `false` spellings.
    fn scan_identifier(&mut self) -> Result<(), LexerError> {
        let (start, line, column) = self.mark();

        let mut ident = String::new();
        ident.push(self.advance());
        while is_identifier_part(self.peek()) {
            ident.push(self.advance());
        }

        let kind = match ident.as_str() {
            "null" => TokenKind::Null,
            "true" => TokenKind::Boolean(true),
            "false" => TokenKind::Boolean(false),
            _ => TokenKind::Identifier(ident),
        };

        self.push(kind, start, line, column);
        Ok(())
    }

    /// Scan `</`, `<`, `>` or `=`. Anything else cannot start a token.
    fn scan_punctuator(&mut self) -> Result<(), LexerError> {
        let (start, line, column) = self.mark();

        let punctuator = match self.peek() {
            '<' if self.peek_next() == '/' => Punctuator::LtSlash,
            '<' => Punctuator::Lt,
            '>' => Punctuator::Gt,
            '=' => Punctuator::Equals,
            _ => return Err(self.unexpected()),
        };

        for _ in 0..punctuator.as_str().len() {
            self.advance();
        }

        self.push(TokenKind::Punctuator(punctuator), start, line, column);
        Ok(())
    }

    // --- Helpers ---

    fn mark(&self) -> (usize, usize, usize) {
        (self.offset, self.line, self.column)
    }

    fn push(&mut self, kind: TokenKind, start: usize, line: usize, column: usize) {
        let span = Span::new(start, self.offset, line, column);
        self.tokens.push(Token::new(kind, span));
    }

    fn peek(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.pos + 1).copied().unwrap_or('\0')
    }

    /// Consume the current character, keeping offset, line and column in step.
    /// CR LF counts as a single line break.
    fn advance(&mut self) -> char {
        let c = self.peek();
        if self.is_at_end() {
            return c;
        }

        self.pos += 1;
        self.offset += c.len_utf16();

        let breaks_line = match c {
            '\r' => self.peek() != '\n',
            c => is_line_terminator(c),
        };
        if breaks_line {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        c
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn unexpected(&self) -> LexerError {
        LexerError::UnexpectedToken {
            position: self.offset,
            ch: self.peek(),
            line: self.line,
            column: self.column,
        }
    }
}

// --- Character classes (ECMA-262 §11.2, §11.3, §11.6) ---

fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{000B}'
            | '\u{000C}'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{180E}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '$' | '_' | '\\')
}

fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}
