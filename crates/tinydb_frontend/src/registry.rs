//! Words the grammar recognizes by handle.
//!
//! Every keyword, type name and meta-command name is interned once when the
//! session starts. The lexer interns identifiers through the same interner,
//! so recognizing a word is a handle lookup rather than a string comparison.

use std::collections::HashMap;

use target_lexicon::Triple;
use tinydb_interner::{InternResult, Interner, Istr};

use crate::NodeCopy;

/// Width of `int` when the target's C data model is unknown.
pub const DEFAULT_INT_SIZE: usize = 4;

#[derive(NodeCopy!)]
pub enum Keyword {
    Create,
    Table,
}

#[derive(NodeCopy!)]
pub enum TypeName {
    Int,
    Integer,
    Char,
    Varchar,
}

#[derive(NodeCopy!)]
pub enum MetaCommand {
    Tables,
    Help,
    Exit,
}

#[derive(NodeCopy!)]
pub enum Word {
    Keyword(Keyword),
    TypeName(TypeName),
    MetaCommand(MetaCommand),
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Create => "create",
            Keyword::Table => "table",
        }
    }
}

impl TypeName {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::Integer => "integer",
            TypeName::Char => "char",
            TypeName::Varchar => "varchar",
        }
    }

    /// Whether the type takes a parenthesized size, as in `char(8)`.
    pub fn is_sized(self) -> bool {
        matches!(self, TypeName::Char | TypeName::Varchar)
    }
}

impl MetaCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            MetaCommand::Tables => "tables",
            MetaCommand::Help => "help",
            MetaCommand::Exit => "exit",
        }
    }
}

impl Word {
    pub const ALL: [Word; 9] = [
        Word::Keyword(Keyword::Create),
        Word::Keyword(Keyword::Table),
        Word::TypeName(TypeName::Int),
        Word::TypeName(TypeName::Integer),
        Word::TypeName(TypeName::Char),
        Word::TypeName(TypeName::Varchar),
        Word::MetaCommand(MetaCommand::Tables),
        Word::MetaCommand(MetaCommand::Help),
        Word::MetaCommand(MetaCommand::Exit),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Word::Keyword(kw) => kw.as_str(),
            Word::TypeName(ty) => ty.as_str(),
            Word::MetaCommand(cmd) => cmd.as_str(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    words: HashMap<Istr, Word>,

    int_size: usize,
}

impl Registry {
    /// Interns every word in [`Word::ALL`].
    pub fn new(interner: &mut Interner, int_size: usize) -> InternResult<Self> {
        let mut words = HashMap::with_capacity(Word::ALL.len());

        for word in Word::ALL {
            let handle = interner.intern(word.as_str())?;
            words.insert(handle, word);
        }

        Ok(Self {
            words,
            int_size,
        })
    }

    /// Like [`Registry::new`], sizing `int` after the target's C `int`.
    pub fn for_target(interner: &mut Interner, target: &Triple) -> InternResult<Self> {
        Self::new(interner, native_int_size(target))
    }

    pub fn lookup(&self, ident: Istr) -> Option<Word> {
        self.words.get(&ident).copied()
    }

    pub fn keyword(&self, ident: Istr) -> Option<Keyword> {
        match self.lookup(ident)? {
            Word::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    pub fn type_name(&self, ident: Istr) -> Option<TypeName> {
        match self.lookup(ident)? {
            Word::TypeName(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn meta_command(&self, ident: Istr) -> Option<MetaCommand> {
        match self.lookup(ident)? {
            Word::MetaCommand(cmd) => Some(cmd),
            _ => None,
        }
    }

    /// Size in bytes of `int` and `integer` columns.
    pub fn int_size(&self) -> usize {
        self.int_size
    }
}

pub fn native_int_size(target: &Triple) -> usize {
    target
        .data_model()
        .map_or(DEFAULT_INT_SIZE, |model| usize::from(model.int_size().bytes()))
}
