mod catalog;
mod cli;
mod diagnostics;
mod repl;
mod session;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as _;
use cli::Cli;

use crate::diagnostics::PrettyDiagnosticEmitter;
use crate::session::{Flow, Session, SessionConfig, SessionError};

#[derive(thiserror::Error, Debug)]
enum ShellError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("could not open script `{}`: {source}", .path.display())]
    Script { path: PathBuf, source: io::Error },
}

type ShellResult<T> = Result<T, ShellError>;

impl ShellError {
    fn is_reported(&self) -> bool {
        match self {
            ShellError::Session(err) => err.is_reported(),
            ShellError::Script { .. } => false,
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            if !err.is_reported() {
                eprintln!("{err}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ShellResult<Flow> {
    let interactive = cli.script.is_none() && cli.commands.is_empty();

    let config = SessionConfig {
        capacity: cli.capacity,
        prompt: interactive.then_some(cli.prompt),
        target: cli.target,
    };

    let emitter = PrettyDiagnosticEmitter::new(cli.color.into());
    let mut session = Session::new(config, emitter, io::stdout())?;

    if interactive {
        return Ok(repl::run(&mut session, io::stdin().lock())?);
    }

    if let Some(path) = cli.script {
        let file = File::open(&path).map_err(|source| ShellError::Script { path, source })?;

        if repl::run(&mut session, BufReader::new(file))? == Flow::Exit {
            return Ok(Flow::Exit);
        }
    }

    Ok(repl::run_lines(&mut session, &cli.commands)?)
}
