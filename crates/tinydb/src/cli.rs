use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use target_lexicon::Triple;
use tinydb_diagnostic::termcolor::ColorChoice;
use tinydb_interner::DEFAULT_CAPACITY;

use crate::session::DEFAULT_PROMPT;

/// Reads `create table` statements and meta-commands, one per line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Script to run instead of reading from standard input.
    pub script: Option<PathBuf>,

    /// A line to run instead of reading from standard input. May be repeated.
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    pub commands: Vec<String>,

    /// Number of slots in the string table. Running out ends the session.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Prompt shown before each line in interactive mode.
    #[arg(long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Target whose C `int` width sizes `int` columns.
    #[arg(long, value_parser = parse_triple, default_value_t = Triple::host())]
    pub target: Triple,

    #[arg(long, value_enum, default_value_t = Color::Auto)]
    pub color: Color,
}

fn parse_triple(s: &str) -> Result<Triple, String> {
    s.parse().map_err(|_| format!("unknown target triple `{s}`"))
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Auto,
    Always,
    Never,
}

impl From<Color> for ColorChoice {
    fn from(color: Color) -> Self {
        match color {
            Color::Auto => ColorChoice::Auto,
            Color::Always => ColorChoice::Always,
            Color::Never => ColorChoice::Never,
        }
    }
}
