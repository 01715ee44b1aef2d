
use std::str::Bytes;

use tinydb_diagnostic::span::Span;
use tinydb_interner::{InternResult, Interner};
use tinydb_utils::peek::Peek;

use crate::token::*;

/// Scans one line into tokens, one token per call to [`Lexer::next_token`].
///
/// Input is treated as ASCII. Identifiers are interned as they are scanned;
/// that is also the only way lexing can fail.
pub struct Lexer<'a> {
    interner: &'a mut Interner,

    all: &'a str,
    bytes: Bytes<'a>,

    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, interner: &'a mut Interner) -> Self {
        Self {
            interner,

            all: source,
            bytes: source.bytes(),

            token_start: 0,
        }
    }

    pub fn next_token(&mut self) -> InternResult<Token> {
        loop {
            self.token_start = self.byte_pos();

            let Some(byte) = self.bytes.next() else {
                return Ok(self.token(TokenKind::End));
            };

            let kind = match byte {
                b' ' | b'\t'..=b'\r' => continue,

                b @ b'0'..=b'9' => self.lex_number(b),

                b if b.is_ascii_alphabetic() => self.lex_identifier()?,

                b => TokenKind::Punct(b),
            };

            return Ok(self.token(kind));
        }
    }

    /// Lexes the rest of the line, leaving out the final [`TokenKind::End`].
    pub fn tokenize(mut self) -> InternResult<Vec<Token>> {
        let mut tokens = vec![];

        loop {
            let token = self.next_token()?;
            if token.kind == TokenKind::End {
                return Ok(tokens);
            }
            tokens.push(token);
        }
    }

    // Overflow wraps.
    fn lex_number(&mut self, first: u8) -> TokenKind {
        let mut n = u64::from(first - b'0');

        while let Some(digit @ b'0'..=b'9') = self.bytes.peek() {
            self.bytes.next();
            n = n.wrapping_mul(10).wrapping_add(u64::from(digit - b'0'));
        }

        TokenKind::Number(n)
    }

    fn lex_identifier(&mut self) -> InternResult<TokenKind> {
        self.bytes.eat_while(u8::is_ascii_alphanumeric);

        let range = self.token_start..self.byte_pos();
        let ident = self.interner.intern_range(self.all, range)?;

        Ok(TokenKind::Identifier(ident))
    }

    /// Span of the token most recently scanned, including one that failed to
    /// intern.
    pub fn token_span(&self) -> Span {
        Span::new(self.token_start, self.byte_pos())
    }

    fn token(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            span: self.token_span(),
        }
    }

    fn byte_pos(&self) -> usize {
        self.all.len() - self.bytes.len()
    }
}
