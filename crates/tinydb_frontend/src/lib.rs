#[macro_use]
extern crate macro_rules_attribute;

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod token;

pub use lexer::Lexer;
pub use parser::{ParseError, ParseErrorKind, ParseResult, Parser};
pub use registry::Registry;

use ast::Command;
use tinydb_interner::Interner;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)];
}

/// Parses one input line (without its line terminator).
pub fn parse_line(
    line: &str,
    interner: &mut Interner,
    registry: &Registry,
) -> ParseResult<Command> {
    Parser::new(line, interner, registry)?.parse()
}
