//! Hyperscript syntax tree.
//!
//! Every element of the markup becomes a call `h(tag, attributes, children)`.
//! Node structs serialize to ESTree-shaped JSON: each one carries its own
//! `"type"` field, and the enums that group them are untagged so the inner
//! node's tag is the only one emitted.

use serde::Serialize;

/// Name of the element factory every call expression invokes.
pub const CALLEE: &str = "h";

/// Root node, one per parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Program {
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statement {
    Expression(ExpressionStatement),
}

/// One top-level element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExpressionStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    Call(CallExpression),
    Literal(Literal),
    Identifier(Identifier),
    Object(ObjectExpression),
    Array(ArrayExpression),
}

/// An element: `h(tag, attributes, children)`.
///
/// Calls built with [`CallExpression::element`] always carry exactly three
/// arguments in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CallExpression {
    pub callee: Identifier,
    pub arguments: Vec<Expression>,
}

impl CallExpression {
    pub fn element(tag: String, attributes: ObjectExpression, children: ArrayExpression) -> Self {
        Self {
            callee: Identifier::new(CALLEE),
            arguments: vec![
                Expression::Literal(Literal::string(tag)),
                Expression::Object(attributes),
                Expression::Array(children),
            ],
        }
    }

    pub fn tag_name(&self) -> Option<&str> {
        match self.arguments.first() {
            Some(Expression::Literal(Literal {
                value: LiteralValue::String(tag),
            })) => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn attributes(&self) -> Option<&ObjectExpression> {
        match self.arguments.get(1) {
            Some(Expression::Object(object)) => Some(object),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&ArrayExpression> {
        match self.arguments.get(2) {
            Some(Expression::Array(array)) => Some(array),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Literal {
    pub value: LiteralValue,
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: LiteralValue::String(value.into()),
        }
    }

    pub fn number(value: f64) -> Self {
        Self {
            value: LiteralValue::Number(value),
        }
    }
}

/// Primitive payload of a literal. Serializes as the bare JSON value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// The attributes of an element, in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type")]
pub struct ObjectExpression {
    pub properties: Vec<Property>,
}

/// A single attribute.
///
/// `value` is `None` for a bare attribute such as `<input checked>`, which is
/// distinct from `checked=""`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Property {
    pub key: PropertyKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Literal>,
}

/// Identifier keys come from bare names; string and numeric keys keep their
/// literal form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyKey {
    Identifier(Identifier),
    Literal(Literal),
}

impl PropertyKey {
    /// The key as written, e.g. `id`, `data-x` or `1`.
    pub fn name(&self) -> String {
        match self {
            PropertyKey::Identifier(ident) => ident.name.clone(),
            PropertyKey::Literal(Literal { value }) => match value {
                LiteralValue::String(s) => s.clone(),
                LiteralValue::Number(n) => n.to_string(),
                LiteralValue::Boolean(b) => b.to_string(),
                LiteralValue::Null => "null".into(),
            },
        }
    }
}

/// The children of an element, in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type")]
pub struct ArrayExpression {
    pub elements: Vec<Expression>,
}
