//! Token definitions for the annotation micro-language

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip whitespace
#[logos(skip r"\*+")] // Skip doc-comment line prefixes
pub enum TokenKind {
    // === Literals ===
    #[token("true", ignore(ascii_case))]
    True,
    #[token("false", ignore(ascii_case))]
    False,
    #[token("null", ignore(ascii_case))]
    Null,

    #[regex(r"[+-]?[0-9]+", priority = 2)]
    Int,

    #[regex(r"[+-]?[0-9]*\.[0-9]+")]
    #[regex(r"[+-]?[0-9]+(\.[0-9]+)?[eE][+-]?[0-9]+")]
    Float,

    // A doubled quote is an escaped quote
    #[regex(r#""([^"]|"")*""#)]
    String,

    // === Identifiers ===
    #[regex(r"[a-zA-Z_\\][a-zA-Z0-9_\\]*")]
    Ident,

    // === Delimiters ===
    #[token("@")]
    At,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // === Punctuation ===
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token(":")]
    Colon,

    // === Special ===
    /// Any other character; ordinary comment text
    Error,
    Eof,
}

impl TokenKind {
    /// Tokens that can stand as a raw scalar literal
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::String
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Ident => "identifier",
            TokenKind::At => "'@'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Eq => "'='",
            TokenKind::Colon => "':'",
            TokenKind::Error => "unexpected character",
            TokenKind::Eof => "end of string",
        }
    }
}
