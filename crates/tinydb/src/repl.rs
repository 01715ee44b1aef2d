use std::io::{BufRead, Write};

use crate::diagnostics::DiagnosticEmitter;
use crate::session::{Flow, Session, SessionResult};

/// Feeds `input` to the session line by line until `.exit` or the end of the
/// input, showing the session's prompt before each read.
pub fn run<D: DiagnosticEmitter, W: Write>(
    session: &mut Session<D, W>,
    mut input: impl BufRead,
) -> SessionResult<Flow> {
    let mut line = String::new();

    loop {
        if let Some(prompt) = session.prompt() {
            let prompt = prompt.to_owned();
            write!(session.output, "{prompt}")?;
            session.output.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(Flow::Continue);
        }

        if session.execute_line(&line)? == Flow::Exit {
            return Ok(Flow::Exit);
        }
    }
}

/// Runs already-split lines, as given with `--command`. Never prompts.
pub fn run_lines<D: DiagnosticEmitter, W: Write>(
    session: &mut Session<D, W>,
    lines: impl IntoIterator<Item = impl AsRef<str>>,
) -> SessionResult<Flow> {
    for line in lines {
        if session.execute_line(line.as_ref())? == Flow::Exit {
            return Ok(Flow::Exit);
        }
    }

    Ok(Flow::Continue)
}
