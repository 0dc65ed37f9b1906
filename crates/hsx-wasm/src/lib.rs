//! WASM bindings for the HSX compiler.
//!
//! Exposes `compile()` and `parse()` to JavaScript via wasm-bindgen.
//! Failures are thrown as JS errors carrying the compiler's message.

use wasm_bindgen::prelude::*;

/// Compile HSX markup to JavaScript source.
#[wasm_bindgen]
pub fn compile(source: &str) -> Result<String, JsError> {
    hsx_codegen::compile(source).map_err(|e| JsError::new(&e.to_string()))
}

/// Parse HSX markup and return the ESTree-shaped syntax tree as a JS object.
#[wasm_bindgen]
pub fn parse(source: &str) -> Result<JsValue, JsError> {
    let program = hsx_parser::Parser::parse(source).map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&program).map_err(|e| JsError::new(&e.to_string()))
}

/// Get the compiler version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
