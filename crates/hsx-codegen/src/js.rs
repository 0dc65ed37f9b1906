//! JavaScript generator.
//!
//! Output is compact: each element renders on one line as
//! `h("tag", { attrs }, [children])`. Bare attributes render as `true`.

use hsx_parser::ast::{
    Expression, Literal, LiteralValue, ObjectExpression, Program, PropertyKey, Statement,
};

/// Generate JavaScript for a whole program.
pub fn generate(program: &Program) -> String {
    let mut out = String::new();
    for statement in &program.body {
        match statement {
            Statement::Expression(stmt) => {
                out.push_str(&expression_to_js(&stmt.expression));
                out.push_str(";\n");
            }
        }
    }
    out
}

/// Render a single expression.
pub fn expression_to_js(expr: &Expression) -> String {
    match expr {
        Expression::Call(call) => {
            let args: Vec<String> = call.arguments.iter().map(expression_to_js).collect();
            format!("{}({})", call.callee.name, args.join(", "))
        }
        Expression::Literal(literal) => literal_to_js(literal),
        Expression::Identifier(ident) => ident.name.clone(),
        Expression::Object(object) => object_to_js(object),
        Expression::Array(array) => {
            let items: Vec<String> = array.elements.iter().map(expression_to_js).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

fn object_to_js(object: &ObjectExpression) -> String {
    if object.properties.is_empty() {
        return "{}".into();
    }

    let parts: Vec<String> = object
        .properties
        .iter()
        .map(|prop| {
            let value = match &prop.value {
                Some(literal) => literal_to_js(literal),
                None => "true".into(),
            };
            format!("{}: {}", key_to_js(&prop.key), value)
        })
        .collect();
    format!("{{ {} }}", parts.join(", "))
}

fn key_to_js(key: &PropertyKey) -> String {
    match key {
        PropertyKey::Identifier(ident) if is_plain_identifier(&ident.name) => ident.name.clone(),
        PropertyKey::Identifier(ident) => quote_string(&ident.name),
        PropertyKey::Literal(literal) => literal_to_js(literal),
    }
}

fn literal_to_js(literal: &Literal) -> String {
    match &literal.value {
        LiteralValue::String(s) => quote_string(s),
        LiteralValue::Number(n) => n.to_string(),
        LiteralValue::Boolean(b) => b.to_string(),
        LiteralValue::Null => "null".into(),
    }
}

/// `\` is legal in markup identifiers but not in a bare JS property name.
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '$' || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '$' || c == '_')
}

/// Quote `s` as a double-quoted JavaScript string literal.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
