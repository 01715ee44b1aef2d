use std::fs::File;
use std::io::BufReader;

use clap::{CommandFactory, Parser as _};
use target_lexicon::Triple;
use tinydb_diagnostic::termcolor::NoColor;
use tinydb_diagnostic::{Config, Diagnostic, DiagnosticKind};
use tinydb_interner::InternError;

use crate::cli::{Cli, Color};
use crate::repl;
use crate::session::{Flow, Session, SessionConfig, SessionError, DEFAULT_PROMPT};
use crate::ShellError;

type TestSession = Session<Vec<Diagnostic>, Vec<u8>>;

fn config(capacity: usize, prompt: Option<&str>) -> SessionConfig {
    SessionConfig {
        capacity,
        prompt: prompt.map(str::to_owned),
        target: "x86_64-unknown-linux-gnu".parse::<Triple>().unwrap(),
    }
}

fn session() -> TestSession {
    session_with(config(tinydb_interner::DEFAULT_CAPACITY, None))
}

fn session_with(config: SessionConfig) -> TestSession {
    match Session::new(config, vec![], vec![]) {
        Ok(session) => session,
        Err(err) => panic!("failed to start session: {err}"),
    }
}

fn run(session: &mut TestSession, lines: &[&str]) -> Flow {
    repl::run_lines(session, lines).unwrap()
}

fn output(session: &TestSession) -> &str {
    std::str::from_utf8(&session.output).unwrap()
}

fn messages(session: &TestSession) -> Vec<&str> {
    session
        .diagnostics
        .iter()
        .filter_map(|d| d.message.as_deref())
        .collect()
}

#[test]
fn create_then_list() {
    let mut session = session();
    let flow = run(
        &mut session,
        &[
            "create table foo (id int, name varchar(10))",
            "create table bar (c char(1))",
            ".tables",
        ],
    );

    assert_eq!(flow, Flow::Continue);
    assert!(session.diagnostics.is_empty());
    insta::assert_snapshot!(output(&session), @r###"
    Created table foo.
    Created table bar.
    foo (id int, name varchar(10))
    bar (c char(1))
    "###);
}

#[test]
fn no_tables() {
    let mut session = session();
    run(&mut session, &[".tables"]);

    assert_eq!(output(&session), "No tables.\n");
}

#[test]
fn duplicate_table() {
    let mut session = session();
    let line = "create table foo (a int)";
    let flow = run(&mut session, &[line, line]);

    assert_eq!(flow, Flow::Continue);
    assert_eq!(output(&session), "Created table foo.\n");
    assert_eq!(messages(&session), ["table `foo` already exists"]);

    let mut stream = NoColor::new(vec![]);
    session.diagnostics[0]
        .write_to_stream(line, &Config::default(), &mut stream)
        .unwrap();
    let rendered = String::from_utf8(stream.into_inner()).unwrap();

    insta::assert_snapshot!(rendered, @r###"
    Error: table `foo` already exists
     │ create table foo (a int)
     │              ^^^  defined earlier in this session
    "###);
}

#[test]
fn help() {
    let mut session = session();
    assert_eq!(run(&mut session, &[".help"]), Flow::Continue);

    let output = output(&session);
    assert!(output.contains("create table"));
    assert!(output.contains(".tables"));
    assert!(output.contains(".exit"));
}

#[test]
fn exit_stops_the_session() {
    let mut session = session();
    let flow = run(&mut session, &[".exit", "create table foo (a int)"]);

    assert_eq!(flow, Flow::Exit);
    assert_eq!(output(&session), "Exiting...\n");
}

#[test]
fn bad_meta_command_continues() {
    let mut session = session();
    let flow = run(&mut session, &[".bogus", ".tables"]);

    assert_eq!(flow, Flow::Continue);
    assert_eq!(messages(&session), ["bad metacommand `bogus`"]);
    assert_eq!(session.diagnostics[0].kind, DiagnosticKind::Error);
    assert_eq!(output(&session), "No tables.\n");
}

#[test]
fn malformed_statement_defines_nothing() {
    let mut session = session();
    run(
        &mut session,
        &["create table foo (id int name varchar(10))", ".tables"],
    );

    assert_eq!(
        messages(&session),
        ["expected token `,` or `)` got identifier `name`"]
    );
    assert_eq!(output(&session), "No tables.\n");
}

#[test]
fn zero_size_is_reported() {
    let mut session = session();
    run(&mut session, &["create table t (a varchar(0))"]);

    assert_eq!(messages(&session), ["size of `varchar` must be > 0"]);
    assert_eq!(output(&session), "");
}

#[test]
fn line_terminators_are_stripped() {
    let mut session = session();
    let flow = run(&mut session, &["create table t (a int)\r\n", ".tables\n", "\n"]);

    assert_eq!(flow, Flow::Continue);
    assert!(session.diagnostics.is_empty());
    assert_eq!(output(&session), "Created table t.\nt (a int)\n");
}

#[test]
fn running_out_of_slots_is_fatal() {
    // room for the registered words only
    let mut session = session_with(config(9, None));
    let result = session.execute_line("create table t (a int)");

    let Err(err) = result else {
        panic!("expected the session to halt");
    };
    assert!(matches!(
        err,
        SessionError::Halted(InternError::CapacityExceeded { capacity: 9 })
    ));

    // the diagnostic already says it; nothing more goes to stderr
    assert!(ShellError::from(err).is_reported());
    assert_eq!(session.diagnostics.len(), 1);
    assert_eq!(session.diagnostics[0].kind, DiagnosticKind::Fatal);
    assert_eq!(output(&session), "");
}

#[test]
fn capacity_too_small_for_registered_words() {
    let result = Session::new(config(3, None), Vec::<Diagnostic>::new(), Vec::<u8>::new());

    let Err(err) = result else {
        panic!("expected the session to fail to start");
    };
    assert!(matches!(
        err,
        SessionError::Fatal(InternError::CapacityExceeded { capacity: 3 })
    ));

    // nothing was emitted, so the error itself has to be printed
    assert!(!ShellError::from(err).is_reported());
}

#[test]
fn repl_prompts_until_exit() {
    let mut session = session_with(config(64, Some(DEFAULT_PROMPT)));
    let input = "create table a (x int)\n.exit\n.tables\n";
    let flow = repl::run(&mut session, input.as_bytes()).unwrap();

    assert_eq!(flow, Flow::Exit);
    assert_eq!(output(&session), "db > Created table a.\ndb > Exiting...\n");
}

#[test]
fn repl_ends_at_end_of_input() {
    let mut session = session_with(config(64, Some("> ")));
    let flow = repl::run(&mut session, ".tables".as_bytes()).unwrap();

    assert_eq!(flow, Flow::Continue);
    assert_eq!(output(&session), "> No tables.\n> ");
}

#[test]
fn script_file() {
    let script = temp_file::with_contents(b"create table t (a int)\r\n\n.tables\n.exit\n.help\n");
    let file = File::open(script.path()).unwrap();

    let mut session = session();
    let flow = repl::run(&mut session, BufReader::new(file)).unwrap();

    assert_eq!(flow, Flow::Exit);
    assert_eq!(
        output(&session),
        "Created table t.\nt (a int)\nExiting...\n"
    );
}

#[test]
fn cli_definition() {
    Cli::command().debug_assert();
}

#[test]
fn cli_defaults() {
    let cli = Cli::try_parse_from(["tinydb"]).unwrap();

    assert_eq!(cli.script, None);
    assert!(cli.commands.is_empty());
    assert_eq!(cli.capacity, tinydb_interner::DEFAULT_CAPACITY);
    assert_eq!(cli.prompt, DEFAULT_PROMPT);
    assert_eq!(cli.target, Triple::host());
    assert_eq!(cli.color, Color::Auto);
}

#[test]
fn cli_commands() {
    let cli = Cli::try_parse_from([
        "tinydb",
        "-c",
        "create table t (a int)",
        "--command",
        ".tables",
        "--capacity",
        "32",
        "--target",
        "aarch64-unknown-linux-gnu",
        "--color",
        "never",
    ])
    .unwrap();

    assert_eq!(cli.commands, ["create table t (a int)", ".tables"]);
    assert_eq!(cli.capacity, 32);
    assert_eq!(cli.target.to_string(), "aarch64-unknown-linux-gnu");
    assert_eq!(cli.color, Color::Never);
}

#[test]
fn cli_rejects_unknown_target() {
    let err = Cli::try_parse_from(["tinydb", "--target", "not-a-real-triple"]).unwrap_err();

    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    assert!(err.to_string().contains("unknown target triple `not-a-real-triple`"));
}
