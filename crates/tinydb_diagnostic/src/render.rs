use std::io;

use termcolor::WriteColor;

use super::{Config, Diagnostic, Snippet};

const TAB: &str = "    ";

impl Diagnostic {
    /// Writes the diagnostic, underlining its snippets in `source`.
    ///
    /// `source` is the line the diagnostic was reported against.
    pub fn write_to_stream(
        &self,
        source: &str,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            source,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor> {
    diagnostic: &'a Diagnostic,
    source: &'a str,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor> DiagnosticWriter<'_, 'a, W> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        if self.diagnostic.snippets.is_empty() {
            return Ok(());
        }

        let mut snippets: Vec<&Snippet> = self.diagnostic.snippets.iter().collect();
        snippets.sort_by_key(|snippet| snippet.span.start);

        self.draw_gutter()?;
        writeln!(self.stream, "{}", self.source.replace('\t', TAB))?;

        for snippet in snippets {
            self.draw_snippet(snippet)?;
        }

        Ok(())
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(&self.config.error_color)?;
        write!(self.stream, "{}:", self.diagnostic.kind.as_str())?;

        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, " {message}"),
            None => writeln!(self.stream),
        }
    }

    fn draw_snippet(&mut self, snippet: &Snippet) -> io::Result<()> {
        // spans past the end point at the end of the line
        let start = snippet.span.start.min(self.source.len());
        let end = snippet.span.end.clamp(start, self.source.len());

        let offset = self.source.get(..start).map_or(start, str_width);

        self.draw_gutter()?;
        write!(self.stream, "{:<offset$}", "")?;

        self.stream.set_color(&self.config.error_color)?;

        for _ in 0..(end - start).max(1) {
            write!(self.stream, "{}", self.config.underline)?;
        }

        if !snippet.label.is_empty() {
            write!(self.stream, "{}{}", self.config.underline_after, snippet.label)?;
        }

        self.stream.reset()?;
        writeln!(self.stream)
    }

    fn draw_gutter(&mut self) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;
        write!(self.stream, " {} ", self.config.gutter)?;
        self.stream.reset()
    }
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.bytes().filter(|&b| b == b'\t').count();
    s.len() - num_tabs + num_tabs * TAB.len()
}
