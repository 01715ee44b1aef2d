mod render;
pub mod span;

pub use termcolor;
use termcolor::{Color, ColorSpec};

use self::span::{AsSpan, Span};

/// A message about one input line, with optional labelled spans of that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    pub message: Option<String>,

    pub snippets: Vec<Snippet>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            message: None,
            snippets: vec![],
        }
    }

    pub fn error() -> Self {
        Self::new(DiagnosticKind::Error)
    }

    pub fn fatal() -> Self {
        Self::new(DiagnosticKind::Fatal)
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: Snippet) -> Self {
        self.snippets.push(snippet);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    Error,

    /// An error after which the session can't continue.
    Fatal,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::Error => "Error",
            DiagnosticKind::Fatal => "Fatal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    label: String,
    span: Span,
}

impl Snippet {
    /// Underlines `span`, followed by `label` unless it is empty.
    pub fn new(label: impl Into<String>, span: impl AsSpan) -> Self {
        Self {
            label: label.into(),
            span: span.as_span(),
        }
    }
}

/// Conversion of an error into a [`Diagnostic`].
///
/// `Context` holds whatever is needed to spell out the error, such as the
/// interner its handles point into.
pub trait IntoDiagnostic<Context: ?Sized> {
    fn into_diagnostic(self, cx: &Context) -> Diagnostic;
}

#[derive(Debug)]
pub struct Config {
    pub error_color: ColorSpec,
    pub subtle: ColorSpec,

    pub gutter: &'static str,

    pub underline: &'static str,
    pub underline_after: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        let mut error_color = ColorSpec::new();
        error_color.set_fg(Some(Color::Red));
        error_color.set_bold(true);

        let mut subtle = ColorSpec::new();
        subtle.set_italic(true);
        subtle.set_dimmed(true);

        Self {
            error_color,
            subtle,

            gutter: "│",

            underline: "^",
            underline_after: "  ",
        }
    }
}
