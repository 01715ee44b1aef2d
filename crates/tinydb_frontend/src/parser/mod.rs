
use tinydb_diagnostic::span::Span;
use tinydb_diagnostic::{Diagnostic, IntoDiagnostic, Snippet};
use tinydb_interner::{InternError, Interner, Istr};

use crate::ast::*;
use crate::lexer::Lexer;
use crate::registry::{Keyword, MetaCommand, Registry, TypeName};
use crate::token::{Token, TokenClass, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    Expected {
        expected: Vec<TokenClass>,
        found: TokenKind,
    },

    ExpectedKeyword {
        expected: Keyword,
        found: TokenKind,
    },

    /// A line that starts with neither an identifier nor `.`.
    ExpectedCommand(TokenKind),

    /// A line that starts with an identifier other than `create`.
    UnrecognizedStatement(Istr),

    UnknownTypeName(Istr),
    UnknownMetaCommand(Istr),

    ZeroSize(TypeName),
    SizeTooLarge(u64),

    Intern(InternError),
}

pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Whether the session has to stop, rather than just this line.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Intern(_))
    }
}

impl ParseErrorKind {
    pub fn message(&self, interner: &Interner) -> String {
        let name = |istr: &Istr| interner.get(*istr).unwrap_or("?");

        match self {
            ParseErrorKind::Expected { expected, found } => format!(
                "expected token {} got {}",
                expected_list(expected),
                found.describe(interner)
            ),
            ParseErrorKind::ExpectedKeyword { expected, found } => format!(
                "expected keyword `{}` got {}",
                expected.as_str(),
                found.describe(interner)
            ),
            ParseErrorKind::ExpectedCommand(found) => {
                format!("expected a command got {}", found.describe(interner))
            }
            ParseErrorKind::UnrecognizedStatement(ident) => {
                format!("unrecognized statement `{}`", name(ident))
            }
            ParseErrorKind::UnknownTypeName(ident) => {
                format!("unknown type name `{}`", name(ident))
            }
            ParseErrorKind::UnknownMetaCommand(ident) => {
                format!("bad metacommand `{}`", name(ident))
            }
            ParseErrorKind::ZeroSize(ty) => format!("size of `{}` must be > 0", ty.as_str()),
            ParseErrorKind::SizeTooLarge(size) => format!("size {size} is too large"),
            ParseErrorKind::Intern(err) => err.to_string(),
        }
    }

    fn label(&self) -> String {
        match self {
            ParseErrorKind::Expected { expected, .. } => {
                format!("expected {}", expected_list(expected))
            }
            ParseErrorKind::ExpectedKeyword { expected, .. } => {
                format!("expected `{}`", expected.as_str())
            }
            ParseErrorKind::ExpectedCommand(_) | ParseErrorKind::UnrecognizedStatement(_) => {
                "expected `create` or `.`".to_owned()
            }
            ParseErrorKind::UnknownTypeName(_) => {
                "expected `int`, `integer`, `char` or `varchar`".to_owned()
            }
            ParseErrorKind::UnknownMetaCommand(_) => "try `.help`".to_owned(),
            _ => String::new(),
        }
    }
}

fn expected_list(expected: &[TokenClass]) -> String {
    expected
        .iter()
        .map(|class| class.name())
        .collect::<Vec<_>>()
        .join(" or ")
}

impl From<InternError> for ParseErrorKind {
    fn from(err: InternError) -> Self {
        ParseErrorKind::Intern(err)
    }
}

impl IntoDiagnostic<Interner> for ParseError {
    fn into_diagnostic(self, interner: &Interner) -> Diagnostic {
        let diagnostic = if self.is_fatal() {
            Diagnostic::fatal()
        } else {
            Diagnostic::error()
        };

        diagnostic
            .with_message(self.kind.message(interner))
            .with_snippet(Snippet::new(self.kind.label(), self.span))
    }
}

/// Recursive-descent parser over a single line.
///
/// Holds exactly one token of lookahead. Parsing stops at the first error;
/// nothing of a malformed line is returned.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    registry: &'a Registry,

    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(
        source: &'a str,
        interner: &'a mut Interner,
        registry: &'a Registry,
    ) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source, interner);
        let current = lexer
            .next_token()
            .map_err(|err| ParseError::new(err.into(), lexer.token_span()))?;

        Ok(Self {
            lexer,
            registry,
            current,
        })
    }

    /// Parses a whole line: one command followed by the end of the input.
    pub fn parse(mut self) -> ParseResult<Command> {
        let command = self.parse_command()?;
        self.expect(TokenClass::End)?;
        Ok(command)
    }

    pub fn parse_command(&mut self) -> ParseResult<Command> {
        match self.current.kind {
            TokenKind::End => Ok(Command::Empty),

            TokenKind::Identifier(ident) => match self.registry.keyword(ident) {
                Some(Keyword::Create) => self.parse_create_clause().map(Command::CreateTable),
                _ => Err(self.error(ParseErrorKind::UnrecognizedStatement(ident))),
            },

            TokenKind::Punct(b'.') => self.parse_meta_command().map(Command::Meta),

            found => Err(self.error(ParseErrorKind::ExpectedCommand(found))),
        }
    }

    fn parse_meta_command(&mut self) -> ParseResult<MetaCommand> {
        self.expect(TokenClass::DOT)?;
        let name = self.parse_ident()?;

        self.registry.meta_command(name.ident).ok_or_else(|| {
            ParseError::new(ParseErrorKind::UnknownMetaCommand(name.ident), name.span)
        })
    }

    fn parse_create_clause(&mut self) -> ParseResult<CreateTable> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;

        let name = self.parse_ident()?;

        self.expect(TokenClass::LPAREN)?;
        let columns = self.parse_column_list()?;
        self.expect(TokenClass::RPAREN)?;

        Ok(CreateTable { name, columns })
    }

    // Leaves the closing `)` for the caller.
    fn parse_column_list(&mut self) -> ParseResult<Vec<ColumnSpec>> {
        let mut columns = vec![self.parse_column_spec()?];

        loop {
            match self.current.kind.class() {
                TokenClass::COMMA => {
                    self.advance()?;
                    columns.push(self.parse_column_spec()?);
                }
                TokenClass::RPAREN => return Ok(columns),
                _ => return Err(self.error_expected(&[TokenClass::COMMA, TokenClass::RPAREN])),
            }
        }
    }

    fn parse_column_spec(&mut self) -> ParseResult<ColumnSpec> {
        let name = self.parse_ident()?;
        let ty = self.parse_type()?;
        Ok(ColumnSpec { name, ty })
    }

    fn parse_type(&mut self) -> ParseResult<Type> {
        let name = self.parse_ident()?;

        let Some(type_name) = self.registry.type_name(name.ident) else {
            return Err(ParseError::new(
                ParseErrorKind::UnknownTypeName(name.ident),
                name.span,
            ));
        };

        let size = if type_name.is_sized() {
            self.expect(TokenClass::LPAREN)?;
            let (size, span) = self.parse_number()?;
            self.expect(TokenClass::RPAREN)?;

            match usize::try_from(size) {
                Ok(0) => return Err(ParseError::new(ParseErrorKind::ZeroSize(type_name), span)),
                Ok(size) => size,
                Err(_) => return Err(ParseError::new(ParseErrorKind::SizeTooLarge(size), span)),
            }
        } else {
            self.registry.int_size()
        };

        Ok(Type {
            name: name.ident,
            type_name,
            size,
        })
    }

    fn parse_ident(&mut self) -> ParseResult<Ident> {
        match self.current.kind {
            TokenKind::Identifier(ident) => {
                let token = self.advance()?;
                Ok(Ident {
                    ident,
                    span: token.span,
                })
            }
            _ => Err(self.error_expected(&[TokenClass::Identifier])),
        }
    }

    fn parse_number(&mut self) -> ParseResult<(u64, Span)> {
        match self.current.kind {
            TokenKind::Number(n) => {
                let token = self.advance()?;
                Ok((n, token.span))
            }
            _ => Err(self.error_expected(&[TokenClass::Number])),
        }
    }

    fn expect(&mut self, class: TokenClass) -> ParseResult<Token> {
        if self.current.kind.class() == class {
            self.advance()
        } else {
            Err(self.error_expected(&[class]))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<Token> {
        match self.current.kind {
            TokenKind::Identifier(ident) if self.registry.keyword(ident) == Some(keyword) => {
                self.advance()
            }
            found => Err(self.error(ParseErrorKind::ExpectedKeyword {
                expected: keyword,
                found,
            })),
        }
    }

    /// Consumes the lookahead token and lexes the next one.
    fn advance(&mut self) -> ParseResult<Token> {
        let next = self
            .lexer
            .next_token()
            .map_err(|err| ParseError::new(err.into(), self.lexer.token_span()))?;

        Ok(std::mem::replace(&mut self.current, next))
    }

    fn error_expected(&self, expected: &[TokenClass]) -> ParseError {
        self.error(ParseErrorKind::Expected {
            expected: expected.to_vec(),
            found: self.current.kind,
        })
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current.span)
    }
}
