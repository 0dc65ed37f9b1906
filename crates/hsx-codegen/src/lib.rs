//! HSX Code Generator
//!
//! Turns the hyperscript call tree into JavaScript source, one statement per
//! top-level element:
//!
//! ```text
//! <div id="app"><span></span></div>  →  h("div", { id: "app" }, [h("span", {}, [])]);
//! ```

pub mod js;

pub use js::generate;

use hsx_parser::{ParseError, ParseOptions, Parser};

/// Code generation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodegenError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Compile HSX markup to JavaScript.
pub fn compile(source: &str) -> Result<String, CodegenError> {
    compile_with(source, &ParseOptions::default())
}

/// Compile HSX markup to JavaScript with explicit parser options.
pub fn compile_with(source: &str, options: &ParseOptions) -> Result<String, CodegenError> {
    let program = Parser::parse_with(source, options)?;
    Ok(generate(&program))
}
