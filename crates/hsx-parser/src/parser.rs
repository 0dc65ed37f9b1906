//! Element parser for HSX.
//!
//! Recursive descent over the grammar
//!
//! ```text
//! program   := element*
//! element   := '<' identifier attribute* '>' element* '</' identifier '>'
//! attribute := (identifier | string | number) ('=' string)?
//! ```
//!
//! An explicit stack of open tag names is kept so a closing tag is only
//! accepted when it names the innermost open element.

use crate::ast::{
    ArrayExpression, CallExpression, Expression, ExpressionStatement, Identifier, Literal,
    ObjectExpression, Program, Property, PropertyKey, Statement,
};
use crate::ParseError;
use hsx_lexer::{Punctuator, Token, TokenKind};

/// Nesting limit applied by [`ParseOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of simultaneously open elements.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// HSX element parser.
///
/// Owns its tokens and tag stack; a parser is consumed by a single call to
/// [`Parser::parse_program`].
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    tags: Vec<String>,
    options: ParseOptions,
    text: String,
}

impl Parser {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(tokens: Vec<Token>, options: ParseOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            tags: Vec::new(),
            options,
            text: String::new(),
        }
    }

    /// Parse source markup into a program.
    pub fn parse(source: &str) -> Result<Program, ParseError> {
        Self::parse_with(source, &ParseOptions::default())
    }

    /// Parse source markup with explicit options.
    pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Program, ParseError> {
        let tokens = hsx_lexer::lex(source)?;

        let mut parser = Parser::with_options(tokens, options.clone());
        parser.text = source.to_string();
        parser.parse_program()
    }

    /// Parse every remaining token as a sequence of top-level elements.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();

        while !self.is_at_end() {
            body.push(Statement::Expression(self.parse_expression_statement()?));

            if !self.tags.is_empty() {
                return Err(ParseError::UnclosedTags {
                    stack: self.tags.clone(),
                });
            }
        }

        Ok(Program { body })
    }

    fn parse_expression_statement(&mut self) -> Result<ExpressionStatement, ParseError> {
        Ok(ExpressionStatement {
            expression: Expression::Call(self.parse_element()?),
        })
    }

    // =========================================================================
    // Elements
    // =========================================================================

    /// Parse `<tag attrs...> children... </tag>`.
    fn parse_element(&mut self) -> Result<CallExpression, ParseError> {
        let open = self.expect_punctuator(Punctuator::Lt)?;

        if self.tags.len() >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
                position: open.span.start,
            });
        }

        let tag = self.expect_tag_name()?;
        self.tags.push(tag.clone());

        let attributes = self.parse_attributes()?;

        let mut elements = Vec::new();
        loop {
            let closing = match self.peek() {
                None => {
                    return Err(ParseError::UnclosedTags {
                        stack: self.tags.clone(),
                    })
                }
                Some(token) if token.is_punctuator(Punctuator::LtSlash) => true,
                Some(token) if token.is_punctuator(Punctuator::Lt) => false,
                Some(token) => return Err(unexpected(token, "\"<\" or \"</\"")),
            };
            if closing {
                break;
            }

            elements.push(Expression::Call(self.parse_element()?));
        }

        self.expect_closing_tag(&tag)?;
        self.tags.pop();

        Ok(CallExpression::element(
            tag,
            attributes,
            ArrayExpression { elements },
        ))
    }

    fn expect_tag_name(&mut self) -> Result<String, ParseError> {
        let token = self.next_token("a tag name")?;
        match token.kind {
            TokenKind::Identifier(name) => Ok(name),
            _ => Err(unexpected(&token, "a tag name")),
        }
    }

    /// Consume `</tag>` for the innermost open element.
    fn expect_closing_tag(&mut self, tag: &str) -> Result<(), ParseError> {
        self.expect_punctuator(Punctuator::LtSlash)?;

        let expected = format!("\"{tag}\"");
        let token = self.next_token(&expected)?;
        match &token.kind {
            TokenKind::Identifier(name) if name == tag => {}
            _ => return Err(unexpected(&token, &expected)),
        }

        self.expect_punctuator(Punctuator::Gt)?;
        Ok(())
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Parse attributes up to and including the `>` that ends the opening tag.
    fn parse_attributes(&mut self) -> Result<ObjectExpression, ParseError> {
        let mut properties = Vec::new();

        while !self.eat_punctuator(Punctuator::Gt) {
            let token = self.next_token("an attribute or \">\"")?;
            let key = match token.kind {
                TokenKind::Identifier(name) => PropertyKey::Identifier(Identifier::new(name)),
                TokenKind::String(value) => PropertyKey::Literal(Literal::string(value)),
                TokenKind::Number(n) => PropertyKey::Literal(Literal::number(n)),
                other => {
                    return Err(ParseError::InvalidAttribute {
                        found: other.to_string(),
                        position: token.span.start,
                    })
                }
            };

            let value = if self.eat_punctuator(Punctuator::Equals) {
                Some(self.expect_string_literal()?)
            } else {
                None
            };

            properties.push(Property { key, value });
        }

        Ok(ObjectExpression { properties })
    }

    fn expect_string_literal(&mut self) -> Result<Literal, ParseError> {
        let token = self.next_token("a string literal")?;
        match token.kind {
            TokenKind::String(value) => Ok(Literal::string(value)),
            _ => Err(unexpected(&token, "a string literal")),
        }
    }

    // =========================================================================
    // Token navigation helpers
    // =========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Take the next token, failing with `expected` if the input is exhausted.
    fn next_token(&mut self, expected: &str) -> Result<Token, ParseError> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                let token = token.clone();
                self.pos += 1;
                Ok(token)
            }
            None => Err(ParseError::UnexpectedEndOfInput {
                expected: expected.to_string(),
                text: self.text.clone(),
            }),
        }
    }

    fn expect_punctuator(&mut self, punctuator: Punctuator) -> Result<Token, ParseError> {
        let expected = format!("\"{punctuator}\"");
        let token = self.next_token(&expected)?;
        if token.is_punctuator(punctuator) {
            Ok(token)
        } else {
            Err(unexpected(&token, &expected))
        }
    }

    /// Consume the next token if it is `punctuator`.
    fn eat_punctuator(&mut self, punctuator: Punctuator) -> bool {
        let matched = self.peek().is_some_and(|t| t.is_punctuator(punctuator));
        if matched {
            self.pos += 1;
        }
        matched
    }
}

fn unexpected(token: &Token, expected: &str) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.kind.to_string(),
        expected: expected.to_string(),
        position: token.span.start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use hsx_lexer::LexerError;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Program {
        Parser::parse(source).unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        Parser::parse(source).unwrap_err()
    }

    fn first_call(program: &Program) -> &CallExpression {
        match &program.body[0] {
            Statement::Expression(ExpressionStatement {
                expression: Expression::Call(call),
            }) => call,
            other => panic!("Expected call expression, got {other:?}"),
        }
    }

    fn child_call(call: &CallExpression, index: usize) -> &CallExpression {
        match &call.children().unwrap().elements[index] {
            Expression::Call(child) => child,
            other => panic!("Expected call expression, got {other:?}"),
        }
    }

    fn key(name: &str) -> PropertyKey {
        PropertyKey::Identifier(Identifier::new(name))
    }

    // =========================================================================
    // Empty / simple
    // =========================================================================

    #[test]
    fn test_empty_program() {
        assert_eq!(parse(""), Program { body: vec![] });
        assert_eq!(parse("  \n\t"), Program { body: vec![] });
    }

    #[test]
    fn test_single_element_shape() {
        let expected = Program {
            body: vec![Statement::Expression(ExpressionStatement {
                expression: Expression::Call(CallExpression {
                    callee: Identifier::new("h"),
                    arguments: vec![
                        Expression::Literal(Literal::string("div")),
                        Expression::Object(ObjectExpression { properties: vec![] }),
                        Expression::Array(ArrayExpression { elements: vec![] }),
                    ],
                }),
            })],
        };
        assert_eq!(parse("<div></div>"), expected);
    }

    #[test]
    fn test_parse_from_tokens() {
        let tokens = hsx_lexer::lex("<p></p>").unwrap();
        let program = Parser::new(tokens).parse_program().unwrap();
        assert_eq!(first_call(&program).tag_name(), Some("p"));
    }

    #[test]
    fn test_multiple_top_level_elements() {
        let program = parse("<header></header>\n<main></main>");
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_tag_names_keep_case() {
        let program = parse("<AnotherComponent></AnotherComponent>");
        assert_eq!(first_call(&program).tag_name(), Some("AnotherComponent"));
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    #[test]
    fn test_attributes_in_source_order() {
        let program = parse(
            "<div someCoolAttr=\"1\" anotherCoolAttribute=\"I can put whatever I want here\">\n</div>",
        );
        let attrs = first_call(&program).attributes().unwrap();
        assert_eq!(
            attrs.properties,
            vec![
                Property {
                    key: key("someCoolAttr"),
                    value: Some(Literal::string("1")),
                },
                Property {
                    key: key("anotherCoolAttribute"),
                    value: Some(Literal::string("I can put whatever I want here")),
                },
            ]
        );
    }

    #[test]
    fn test_valueless_attribute() {
        let program = parse("<div checked></div>");
        let attrs = first_call(&program).attributes().unwrap();
        assert_eq!(
            attrs.properties,
            vec![Property {
                key: key("checked"),
                value: None,
            }]
        );
    }

    #[test]
    fn test_empty_value_differs_from_missing_value() {
        let program = parse("<input value=\"\" checked>\n</input>");
        let attrs = first_call(&program).attributes().unwrap();
        assert_eq!(attrs.properties[0].value, Some(Literal::string("")));
        assert_eq!(attrs.properties[1].value, None);
    }

    #[test]
    fn test_string_and_numeric_keys() {
        let program = parse("<td 'data-x'=\"a\" 2=\"b\"></td>");
        let attrs = first_call(&program).attributes().unwrap();
        assert_eq!(attrs.properties[0].key, PropertyKey::Literal(Literal::string("data-x")));
        assert_eq!(attrs.properties[1].key, PropertyKey::Literal(Literal::number(2.0)));
        assert_eq!(attrs.properties[1].key.name(), "2");
    }

    #[test]
    fn test_attribute_value_must_be_string() {
        let err = parse_err("<div a=b></div>");
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                found: "b".into(),
                expected: "a string literal".into(),
                position: 7,
            }
        );
        assert_eq!(
            err.to_string(),
            "Parse error: \"b\" at 7 is unexpected, expecting a string literal"
        );
    }

    #[test]
    fn test_numeric_attribute_value_rejected() {
        let err = parse_err("<div a=1></div>");
        assert!(matches!(err, ParseError::UnexpectedToken { position: 7, .. }));
    }

    #[test]
    fn test_impossible_attribute() {
        let err = parse_err("<div true></div>");
        assert_eq!(
            err,
            ParseError::InvalidAttribute {
                found: "true".into(),
                position: 5,
            }
        );
    }

    #[test]
    fn test_equals_as_attribute_name() {
        let err = parse_err("<div =\"x\"></div>");
        assert!(matches!(err, ParseError::InvalidAttribute { ref found, position: 5 } if found == "="));
    }

    // =========================================================================
    // Nesting
    // =========================================================================

    #[test]
    fn test_nested_child() {
        let program = parse("<div><span></span></div>");
        let div = first_call(&program);
        assert_eq!(div.tag_name(), Some("div"));
        assert_eq!(div.children().unwrap().elements.len(), 1);
        assert_eq!(child_call(div, 0).tag_name(), Some("span"));
    }

    #[test]
    fn test_nested_child_with_attribute() {
        let program = parse(
            "\n<div>\n  <AnotherComponent attribute=\"user.name\"></AnotherComponent>\n</div>\n",
        );
        let child = child_call(first_call(&program), 0);
        assert_eq!(child.tag_name(), Some("AnotherComponent"));
        assert_eq!(
            child.attributes().unwrap().properties,
            vec![Property {
                key: key("attribute"),
                value: Some(Literal::string("user.name")),
            }]
        );
        assert!(child.children().unwrap().elements.is_empty());
    }

    #[test]
    fn test_siblings_keep_order() {
        let program = parse("<ul><li a></li><li b></li><li c></li></ul>");
        let ul = first_call(&program);
        let names: Vec<String> = (0..3)
            .map(|i| child_call(ul, i).attributes().unwrap().properties[0].key.name())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_every_call_has_three_arguments() {
        fn check(call: &CallExpression) {
            assert_eq!(call.arguments.len(), 3);
            assert_eq!(call.callee.name, "h");
            for child in &call.children().unwrap().elements {
                match child {
                    Expression::Call(c) => check(c),
                    other => panic!("Expected call expression, got {other:?}"),
                }
            }
        }
        check(first_call(&parse(
            "<a><b><c></c></b><d x=\"1\"><e></e></d></a>",
        )));
    }

    // =========================================================================
    // Tag matching
    // =========================================================================

    #[test]
    fn test_unclosed_tag() {
        let err = parse_err("<span><div></div>");
        assert_eq!(
            err,
            ParseError::UnclosedTags {
                stack: vec!["span".into()],
            }
        );
        assert_eq!(err.to_string(), "Parse error: unclosed tags -> span");
    }

    #[test]
    fn test_unclosed_tag_chain() {
        let err = parse_err("<span><ul>");
        assert_eq!(err.to_string(), "Parse error: unclosed tags -> span -> ul");
    }

    #[test]
    fn test_previously_closed_tag() {
        let err = parse_err(
            "\n<span>\n  <ul>\n    <span><div></div></ul></span>\n</span>\n",
        );
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref found, ref expected, .. }
                if found == "ul" && expected == "\"span\""
        ));
    }

    #[test]
    fn test_unexpected_closing_tag() {
        let err = parse_err("<span></ul></span>");
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                found: "ul".into(),
                expected: "\"span\"".into(),
                position: 8,
            }
        );
    }

    #[test]
    fn test_closing_tag_case_sensitive() {
        let err = parse_err("<Div></div>");
        assert!(matches!(err, ParseError::UnexpectedToken { position: 7, .. }));
    }

    #[test]
    fn test_closing_tag_missing_gt() {
        let err = parse_err("<div></div <p>");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref found, ref expected, position: 11 }
                if found == "<" && expected == "\">\""
        ));
    }

    #[test]
    fn test_closing_tag_truncated() {
        let err = parse_err("<div></div");
        assert_eq!(
            err,
            ParseError::UnexpectedEndOfInput {
                expected: "\">\"".into(),
                text: "<div></div".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Parse error: unexpected end of input, expecting \">\" in: <div></div"
        );
    }

    #[test]
    fn test_unterminated_opening_tag() {
        let err = parse_err("<div class=\"a\"");
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn test_missing_value_after_equals() {
        let err = parse_err("<div a=");
        assert!(matches!(
            err,
            ParseError::UnexpectedEndOfInput { ref expected, .. } if expected == "a string literal"
        ));
    }

    #[test]
    fn test_truncated_tokens_have_no_source_text() {
        let tokens = hsx_lexer::lex("<div").unwrap();
        let err = Parser::new(tokens).parse_program().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error: unexpected end of input, expecting an attribute or \">\""
        );
    }

    // =========================================================================
    // Other malformed input
    // =========================================================================

    #[test]
    fn test_top_level_must_start_with_lt() {
        let err = parse_err("div");
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                found: "div".into(),
                expected: "\"<\"".into(),
                position: 0,
            }
        );
    }

    #[test]
    fn test_tag_name_must_be_identifier() {
        let err = parse_err("<'div'></div>");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref expected, position: 1, .. } if expected == "a tag name"
        ));
    }

    #[test]
    fn test_text_content_rejected() {
        let err = parse_err("<p>hello</p>");
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                found: "hello".into(),
                expected: "\"<\" or \"</\"".into(),
                position: 3,
            }
        );
    }

    #[test]
    fn test_lexer_error_propagates() {
        let err = parse_err("<div a='x></div>");
        assert!(matches!(
            err,
            ParseError::Lex(LexerError::UnterminatedString { start: 7, .. })
        ));
    }

    #[test]
    fn test_same_input_same_error() {
        let source = "<span><div></div></ul></span>";
        let first = parse_err(source);
        let second = parse_err(source);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    // =========================================================================
    // Depth limit
    // =========================================================================

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions { max_depth: 2 };
        assert!(Parser::parse_with("<a><b></b></a>", &options).is_ok());

        let err = Parser::parse_with("<a><b><c></c></b></a>", &options).unwrap_err();
        assert_eq!(
            err,
            ParseError::NestingTooDeep {
                limit: 2,
                position: 6,
            }
        );
    }

    #[test]
    fn test_default_depth_allows_deep_markup() {
        let depth = 100;
        let source = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
        let program = parse(&source);
        assert_eq!(program.body.len(), 1);
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    #[test]
    fn test_estree_json() {
        let program = parse("<div id=\"app\" hidden><br></br></div>");
        let json = serde_json::to_value(&program).unwrap();
        let expected = serde_json::json!({
            "type": "Program",
            "body": [{
                "type": "ExpressionStatement",
                "expression": {
                    "type": "CallExpression",
                    "callee": { "type": "Identifier", "name": "h" },
                    "arguments": [
                        { "type": "Literal", "value": "div" },
                        {
                            "type": "ObjectExpression",
                            "properties": [
                                {
                                    "type": "Property",
                                    "key": { "type": "Identifier", "name": "id" },
                                    "value": { "type": "Literal", "value": "app" }
                                },
                                {
                                    "type": "Property",
                                    "key": { "type": "Identifier", "name": "hidden" }
                                }
                            ]
                        },
                        {
                            "type": "ArrayExpression",
                            "elements": [{
                                "type": "CallExpression",
                                "callee": { "type": "Identifier", "name": "h" },
                                "arguments": [
                                    { "type": "Literal", "value": "br" },
                                    { "type": "ObjectExpression", "properties": [] },
                                    { "type": "ArrayExpression", "elements": [] }
                                ]
                            }]
                        }
                    ]
                }
            }]
        });
        assert_eq!(json, expected);
    }
}
