use std::io;

use tinydb_diagnostic::termcolor::{ColorChoice, StandardStream};
use tinydb_diagnostic::{Config, Diagnostic};

pub trait DiagnosticEmitter {
    /// Emits a diagnostic about `source`, the line it was reported against.
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, source: &str) -> io::Result<()>;
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, _source: &str) -> io::Result<()> {
        self.push(diagnostic);
        Ok(())
    }
}

/// Renders diagnostics to standard output, next to the rest of the session's
/// output.
pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    pub config: Config,
}

impl PrettyDiagnosticEmitter {
    pub fn new(color: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stdout(color),
            config: Config::default(),
        }
    }
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, source: &str) -> io::Result<()> {
        diagnostic.write_to_stream(source, &self.config, &mut self.stream)
    }
}
