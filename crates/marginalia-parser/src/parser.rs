//! Recursive descent parser implementation
//!
//! Grammar, informally:
//!
//! ```text
//! marker     = '@' name [ attributes ]
//! attributes = '(' { ',' | name '=' value } ')'
//! value      = array | node | literal          (chosen by the descriptor)
//! array      = '{' { ',' | [ literal ':' ] value } '}'
//! node       = [ '@' name ] attributes
//! literal    = identifier | string | integer | float | true | false | null
//! ```

use std::ops::Range;
use std::sync::Arc;

use marginalia_ast::{Array, Descriptor, Node, NodeType, ScalarKind, Span, Value};
use marginalia_lexer::{tokenize_at, Token, TokenKind, TokenStream};
use tracing::{debug, trace};

use crate::{coerce, Annotations, AttributeFault, Literal, ParseError, ParserConfig, Registry};

/// The attribute a value is parsed for, used to wrap value errors
#[derive(Debug, Clone, Copy)]
struct Owner<'n> {
    node: &'n str,
    attribute: &'n str,
}

pub(crate) struct Parser<'a> {
    /// The full comment body; spans index into it
    source: &'a str,
    stream: TokenStream,
    registry: &'a Registry,
    config: ParserConfig,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Tokenize `source[region]` for parsing against `registry`
    pub(crate) fn new(
        source: &'a str,
        region: Range<usize>,
        registry: &'a Registry,
        config: ParserConfig,
    ) -> Self {
        let tokens = tokenize_at(&source[region.clone()], region.start);
        Self {
            source,
            stream: TokenStream::new(tokens),
            registry,
            config,
            depth: 0,
        }
    }

    // === Utilities ===

    fn peek(&self) -> TokenKind {
        self.stream.peek()
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.stream.is_next(kind)
    }

    fn span(&self) -> Span {
        self.stream.lookahead().span
    }

    fn advance(&mut self) -> Token {
        self.stream.advance().clone()
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// A marker or tag name: a bare identifier or a quoted string
    fn consume_name(&mut self) -> Result<Token, ParseError> {
        if self.stream.is_next_one_of(&[TokenKind::Ident, TokenKind::String]) {
            Ok(self.advance())
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    fn text(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }

    fn name_of(&self, token: &Token) -> String {
        match token.kind {
            TokenKind::String => unquote(self.text(token)),
            _ => self.text(token).to_string(),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.stream.lookahead();
        ParseError::unexpected(expected, token.kind, self.text(token), token.span, self.source)
    }

    fn attribute_error(&self, owner: Owner<'_>, span: Span, fault: AttributeFault) -> ParseError {
        ParseError::Attribute {
            node: owner.node.to_string(),
            attribute: owner.attribute.to_string(),
            fault,
            span,
            body: self.source.to_string(),
        }
    }

    /// Run `f` one nesting level deeper, failing past the configured limit
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_depth,
                span: self.span(),
                body: self.source.to_string(),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // === Comment body ===

    pub(crate) fn parse_annotations(&mut self) -> Result<Annotations, ParseError> {
        let mut annotations = Annotations::new();

        while !self.stream.is_exhausted() {
            // `@` glued to the previous token is text, as in `user@example.com`
            if !self.at(TokenKind::At) || self.stream.is_glued() {
                self.stream.advance();
                continue;
            }
            if let Some(node) = self.parse_marker()? {
                annotations.insert(node);
            }
        }

        Ok(annotations)
    }

    /// Parse one `@name[(...)]`; unregistered names are left as text
    fn parse_marker(&mut self) -> Result<Option<Node>, ParseError> {
        let at = self.advance();
        if !self.stream.is_next_one_of(&[TokenKind::Ident, TokenKind::String]) {
            return Ok(None);
        }
        let name_token = self.advance();
        let name = self.name_of(&name_token);

        let registry = self.registry;
        let Some(node_type) = registry.lookup(&name).cloned() else {
            debug!(name = %name, offset = at.span.start, "skipping unregistered marker");
            return Ok(None);
        };
        trace!(name = %name, offset = at.span.start, "marker");

        let mut node = Node::new(node_type);
        if self.at(TokenKind::LParen) {
            self.nested(|p| p.parse_attribute_list(&mut node))?;
        }
        Ok(Some(node))
    }

    // === Attributes ===

    fn parse_attribute_list(&mut self, node: &mut Node) -> Result<(), ParseError> {
        self.consume(TokenKind::LParen)?;

        loop {
            match self.peek() {
                TokenKind::RParen => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::Ident => self.parse_attribute(node)?,
                _ => return Err(self.unexpected("attribute name or ')'")),
            }
        }
    }

    fn parse_attribute(&mut self, node: &mut Node) -> Result<(), ParseError> {
        let key_token = self.consume(TokenKind::Ident)?;
        let key = self.text(&key_token);

        let node_type = Arc::clone(node.node_type());
        let Some(descriptor) = node_type.descriptor(key) else {
            return Err(ParseError::UnknownAttribute {
                node: node_type.name().to_string(),
                attribute: key.to_string(),
                span: key_token.span,
                body: self.source.to_string(),
            });
        };

        self.consume(TokenKind::Eq)?;
        let start = self.span();
        let owner = Owner {
            node: node_type.name(),
            attribute: key,
        };
        let value = self.parse_value(descriptor, owner)?;

        trace!(node = owner.node, attribute = key, "attribute");
        node.set_attribute(key, value)
            .map_err(|fault| self.attribute_error(owner, start, fault.into()))
    }

    // === Values ===

    fn parse_value(&mut self, descriptor: &Descriptor, owner: Owner<'_>) -> Result<Value, ParseError> {
        match descriptor {
            Descriptor::ArrayOf(element) => self.nested(|p| p.parse_array(element, owner)),
            Descriptor::Node(node_type) => self.nested(|p| p.parse_nested_node(node_type, owner)),
            Descriptor::Scalar(kind) => self.parse_scalar(*kind, owner),
        }
    }

    fn parse_array(&mut self, element: &Descriptor, owner: Owner<'_>) -> Result<Value, ParseError> {
        self.consume(TokenKind::LBrace)?;
        let mut array = Array::new();

        loop {
            match self.peek() {
                TokenKind::RBrace => {
                    self.advance();
                    return Ok(Value::Array(array));
                }
                TokenKind::Comma => {
                    self.advance();
                }
                // Indexed element: `key: value`
                kind if kind.is_literal() && self.stream.glimpse().kind == TokenKind::Colon => {
                    let key = self.parse_literal()?.into_key();
                    self.consume(TokenKind::Colon)?;
                    let value = self.parse_value(element, owner)?;
                    array.insert(key, value);
                }
                _ => {
                    let value = self.parse_value(element, owner)?;
                    array.push(value);
                }
            }
        }
    }

    /// `(...)` or `@name(...)` where `name` must be the declared type
    fn parse_nested_node(&mut self, node_type: &Arc<NodeType>, owner: Owner<'_>) -> Result<Value, ParseError> {
        if self.at(TokenKind::At) {
            self.advance();
            let tag_token = self.consume_name()?;
            let tag = self.name_of(&tag_token);
            if tag != node_type.name() {
                return Err(self.attribute_error(
                    owner,
                    tag_token.span,
                    AttributeFault::TagMismatch {
                        expected: node_type.name().to_string(),
                        found: tag,
                    },
                ));
            }
        }

        let mut node = Node::new(Arc::clone(node_type));
        self.parse_attribute_list(&mut node)?;
        Ok(Value::Node(node))
    }

    fn parse_scalar(&mut self, kind: ScalarKind, owner: Owner<'_>) -> Result<Value, ParseError> {
        let span = self.span();
        let text = self.text(self.stream.lookahead());
        let literal = self.parse_literal()?;
        coerce(literal, text, kind).map_err(|err| self.attribute_error(owner, span, err.into()))
    }

    /// A bare identifier reads as a string: `name = message`
    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let token = self.stream.lookahead().clone();
        let text = self.text(&token);

        let literal = match token.kind {
            TokenKind::Ident => Literal::String(text.to_string()),
            TokenKind::String => Literal::String(unquote(text)),
            TokenKind::Int => Literal::Int(text.parse().map_err(|_| self.invalid_literal(&token))?),
            TokenKind::Float => Literal::Float(text.parse().map_err(|_| self.invalid_literal(&token))?),
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            TokenKind::Null => Literal::Null,
            _ => return Err(self.unexpected("literal value")),
        };

        self.advance();
        Ok(literal)
    }

    fn invalid_literal(&self, token: &Token) -> ParseError {
        ParseError::InvalidLiteral {
            literal: self.text(token).to_string(),
            span: token.span,
            body: self.source.to_string(),
        }
    }
}

/// Strip the quotes from a string token and collapse doubled quotes
///
/// A string wrapped across doc lines loses each continuation line's
/// ` * ` prefix; the line breaks are kept.
fn unquote(text: &str) -> String {
    let inner = &text[1..text.len() - 1];
    let mut lines = inner.split('\n');
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        let rest = line.trim_start_matches([' ', '\t']);
        let rest = match rest.strip_prefix('*') {
            Some(rest) => {
                let rest = rest.trim_start_matches('*');
                rest.strip_prefix(' ').unwrap_or(rest)
            }
            None => line,
        };
        out.push('\n');
        out.push_str(rest);
    }
    out.replace("\"\"", "\"")
}
