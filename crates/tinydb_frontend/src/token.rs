use std::borrow::Cow;

use tinydb_diagnostic::span::Span;
use tinydb_interner::{Interner, Istr};

use crate::NodeCopy;

#[derive(NodeCopy!)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(NodeCopy!)]
pub enum TokenKind {
    /// End of the line. Returned again on every call once reached.
    End,

    /// Any single byte that doesn't start another kind of token.
    Punct(u8),

    Identifier(Istr),
    Number(u64),
}

/// A [`TokenKind`] without its payload, for checking what the parser expects.
#[derive(NodeCopy!)]
pub enum TokenClass {
    End,
    Punct(u8),
    Identifier,
    Number,
}

impl TokenClass {
    pub const DOT: Self = Self::Punct(b'.');
    pub const COMMA: Self = Self::Punct(b',');
    pub const LPAREN: Self = Self::Punct(b'(');
    pub const RPAREN: Self = Self::Punct(b')');

    pub fn name(self) -> Cow<'static, str> {
        match self {
            TokenClass::End => "end of input".into(),
            TokenClass::Punct(byte) => format!("`{}`", byte.escape_ascii()).into(),
            TokenClass::Identifier => "identifier".into(),
            TokenClass::Number => "number".into(),
        }
    }
}

impl TokenKind {
    pub fn class(&self) -> TokenClass {
        match self {
            TokenKind::End => TokenClass::End,
            TokenKind::Punct(byte) => TokenClass::Punct(*byte),
            TokenKind::Identifier(_) => TokenClass::Identifier,
            TokenKind::Number(_) => TokenClass::Number,
        }
    }

    /// Describes the token for an error message, spelling out its payload.
    pub fn describe(&self, interner: &Interner) -> String {
        match self {
            TokenKind::Identifier(ident) => {
                format!("identifier `{}`", interner.get(*ident).unwrap_or("?"))
            }
            TokenKind::Number(n) => format!("number `{n}`"),
            other => other.class().name().into_owned(),
        }
    }
}
