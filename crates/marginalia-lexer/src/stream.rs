//! Pull interface over a token vector
//!
//! Mirrors the classic annotation-lexer contract: `token` is the most
//! recently consumed token, `lookahead` the next one, and `glimpse` peeks
//! one token past the lookahead without consuming anything.

use marginalia_ast::Span;

use crate::{Token, TokenKind};

pub struct TokenStream {
    tokens: Vec<Token>,
    /// Index of the lookahead token
    pos: usize,
}

impl TokenStream {
    /// Build a stream; an `Eof` token is appended if missing
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token {
                kind: TokenKind::Eof,
                span: Span::point(end),
            });
        }
        Self { tokens, pos: 0 }
    }

    /// The most recently consumed token
    pub fn token(&self) -> Option<&Token> {
        self.pos.checked_sub(1).map(|i| &self.tokens[i])
    }

    /// The next unconsumed token; `Eof` once the input is exhausted
    pub fn lookahead(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// The token after the lookahead, without consuming anything
    pub fn glimpse(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + 1).min(last)]
    }

    /// Consume the lookahead and return it; `Eof` is never consumed
    pub fn advance(&mut self) -> &Token {
        let current = self.pos;
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[current]
    }

    pub fn peek(&self) -> TokenKind {
        self.lookahead().kind
    }

    pub fn is_next(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    pub fn is_next_one_of(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek())
    }

    /// Whether the lookahead starts exactly where the previous token ended
    pub fn is_glued(&self) -> bool {
        self.token()
            .is_some_and(|previous| previous.span.end == self.lookahead().span.start)
    }

    pub fn is_exhausted(&self) -> bool {
        self.is_next(TokenKind::Eof)
    }
}
