//! HSX Parser
//!
//! Builds a hyperscript call tree from the token stream produced by
//! `hsx-lexer`. Every `<tag ...>...</tag>` element becomes
//! `h("tag", { ...attributes }, [ ...children ])`.
//!
//! ```
//! use hsx_parser::Parser;
//!
//! let program = Parser::parse("<ul><li></li></ul>").unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

pub mod ast;
pub mod parser;

pub use ast::{CallExpression, Expression, Program};
pub use parser::{ParseOptions, Parser};

use hsx_lexer::LexerError;

/// Parser error.
///
/// Positions are UTF-16 code-unit offsets into the source, taken from the
/// offending token.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexerError),

    #[error("Parse error: unexpected end of input, expecting {expected}{}", source_suffix(.text))]
    UnexpectedEndOfInput { expected: String, text: String },

    #[error("Parse error: \"{found}\" at {position} is unexpected, expecting {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        position: usize,
    },

    #[error("Parse error: impossible attribute \"{found}\" at {position}")]
    InvalidAttribute { found: String, position: usize },

    #[error("Parse error: unclosed tags -> {}", .stack.join(" -> "))]
    UnclosedTags { stack: Vec<String> },

    #[error("Parse error: element at {position} is nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize, position: usize },
}

fn source_suffix(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!(" in: {text}")
    }
}
