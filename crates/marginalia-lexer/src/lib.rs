//! Marginalia Lexer - Tokenization using logos
//!
//! Tokenizes the annotation region of a doc comment:
//! - whitespace and runs of `*` (comment line prefixes) are skipped
//! - anything outside the grammar becomes an `Error` token, which the
//!   parser treats as ordinary comment text between markers

mod stream;
mod token;

pub use stream::*;
pub use token::*;

use logos::Logos;
use marginalia_ast::Span;

/// Tokenize a source string into a vector of tokens
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_at(source, 0)
}

/// Tokenize `source`, reporting spans shifted by `base`
///
/// Used when `source` is a slice of a larger comment body, so that spans
/// stay relative to the full body.
pub fn tokenize_at(source: &str, base: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end).offset(base);
        let kind = match result {
            Ok(kind) => kind,
            Err(_) => TokenKind::Error,
        };
        tokens.push(Token { kind, span });
    }

    // Add EOF token
    let end = base + source.len();
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::point(end),
    });

    tokens
}

/// A token with its span
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }
}
