use std::io::{self, Write};

use target_lexicon::Triple;
use tinydb_diagnostic::IntoDiagnostic;
use tinydb_frontend::ast::{Command, CreateTable};
use tinydb_frontend::registry::{MetaCommand, Registry};
use tinydb_frontend::{parse_line, ParseErrorKind};
use tinydb_interner::{InternError, Interner, DEFAULT_CAPACITY};

use crate::catalog::Catalog;
use crate::diagnostics::DiagnosticEmitter;

pub const DEFAULT_PROMPT: &str = "db > ";

const HELP: &str = "\
Statements:
  create table <name> (<column> <type>, ...)

Types:
  int, integer, char(<size>), varchar(<size>)

Meta-commands:
  .tables    list the tables defined so far
  .help      show this message
  .exit      end the session";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Slots in the string table.
    pub capacity: usize,

    /// Shown before each line, only when reading interactively.
    pub prompt: Option<String>,

    pub target: Triple,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            prompt: None,
            target: Triple::host(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The session could not start.
    #[error("fatal: {0}")]
    Fatal(InternError),

    /// The session stopped after reporting a fatal diagnostic.
    #[error("session halted: {0}")]
    Halted(InternError),
}

impl SessionError {
    /// Whether a diagnostic describing the error has already been emitted.
    pub fn is_reported(&self) -> bool {
        matches!(self, SessionError::Halted(_))
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// What the caller should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session<D: DiagnosticEmitter, W: Write> {
    pub diagnostics: D,
    pub output: W,

    interner: Interner,
    registry: Registry,
    catalog: Catalog,

    prompt: Option<String>,
}

impl<D: DiagnosticEmitter, W: Write> Session<D, W> {
    /// Fails if the string table cannot even hold the registered words.
    pub fn new(config: SessionConfig, diagnostics: D, output: W) -> SessionResult<Self> {
        let mut interner = Interner::with_capacity(config.capacity);
        let registry =
            Registry::for_target(&mut interner, &config.target).map_err(SessionError::Fatal)?;

        Ok(Self {
            diagnostics,
            output,

            interner,
            registry,
            catalog: Catalog::default(),

            prompt: config.prompt,
        })
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Parses and runs one line of input.
    ///
    /// Errors confined to the line are reported through the diagnostic
    /// emitter and the session carries on. Only running out of string table
    /// space, or failing to write, ends it.
    pub fn execute_line(&mut self, line: &str) -> SessionResult<Flow> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let command = match parse_line(line, &mut self.interner, &self.registry) {
            Ok(command) => command,
            Err(err) => {
                let fatal = match &err.kind {
                    ParseErrorKind::Intern(intern_err) => Some(intern_err.clone()),
                    _ => None,
                };

                let diagnostic = err.into_diagnostic(&self.interner);
                self.diagnostics.emit_diagnostic(diagnostic, line)?;

                return match fatal {
                    Some(err) => Err(SessionError::Halted(err)),
                    None => Ok(Flow::Continue),
                };
            }
        };

        match command {
            Command::Empty => {}
            Command::CreateTable(table) => self.create_table(table, line)?,
            Command::Meta(MetaCommand::Tables) => self.list_tables()?,
            Command::Meta(MetaCommand::Help) => writeln!(self.output, "{HELP}")?,
            Command::Meta(MetaCommand::Exit) => {
                writeln!(self.output, "Exiting...")?;
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }

    fn create_table(&mut self, table: CreateTable, line: &str) -> SessionResult<()> {
        match self.catalog.define(table) {
            Ok(id) => {
                let name = self
                    .catalog
                    .get(id)
                    .and_then(|table| self.interner.get(table.name))
                    .unwrap_or("?");
                writeln!(self.output, "Created table {name}.")?;
            }
            Err(err) => {
                let diagnostic = err.into_diagnostic(&self.interner);
                self.diagnostics.emit_diagnostic(diagnostic, line)?;
            }
        }

        Ok(())
    }

    fn list_tables(&mut self) -> SessionResult<()> {
        if self.catalog.is_empty() {
            writeln!(self.output, "No tables.")?;
            return Ok(());
        }

        for table in self.catalog.tables() {
            writeln!(self.output, "{}", table.describe(&self.interner))?;
        }

        Ok(())
    }
}
