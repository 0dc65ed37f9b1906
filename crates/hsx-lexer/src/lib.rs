//! HSX Lexer
//!
//! Tokenizes HSX element markup (`<div id="app"><span></span></div>`) into a
//! flat stream of identifiers, literals, and the four punctuators
//! `<`, `</`, `>` and `=`.
//!
//! # Example
//!
//! ```
//! use hsx_lexer::Scanner;
//!
//! let tokens = Scanner::tokenize("<div></div>").unwrap();
//! assert_eq!(tokens.len(), 6);
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{Punctuator, Span, Token, TokenKind};

/// Lexer error with position information.
///
/// `start` and `position` are UTF-16 code-unit offsets into the source.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Lexer error at line {line}, column {column}: unterminated string literal starting at {start}")]
    UnterminatedString {
        start: usize,
        line: usize,
        column: usize,
    },

    #[error("Lexer error at line {line}, column {column}: unexpected character '{ch}' at {position}")]
    UnexpectedToken {
        position: usize,
        ch: char,
        line: usize,
        column: usize,
    },
}

impl LexerError {
    /// Source offset the error points at.
    pub fn position(&self) -> usize {
        match self {
            LexerError::UnterminatedString { start, .. } => *start,
            LexerError::UnexpectedToken { position, .. } => *position,
        }
    }
}

/// Tokenize `source`. Shorthand for [`Scanner::tokenize`].
pub fn lex(source: &str) -> Result<Vec<Token>, LexerError> {
    Scanner::tokenize(source)
}
