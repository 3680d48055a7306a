use std::io::Write;

use crate::error::UseError;
use crate::specifier::{ParseError, IDENTIFIER_HELP};

impl ParseError {
    /// Write a labelled report, using the identifier as the source text.
    pub fn write_report<W: Write>(&self, out: W, color: bool) -> std::io::Result<()> {
        use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

        let source_id = "<identifier>";
        let span = self.span.clone();

        Report::build(ReportKind::Error, source_id, span.start)
            .with_config(
                Config::default()
                    .with_color(color)
                    .with_index_type(IndexType::Byte),
            )
            .with_message("invalid package identifier")
            .with_label(
                Label::new((source_id, span))
                    .with_message(self.kind_message())
                    .with_color(Color::Red),
            )
            .with_help(IDENTIFIER_HELP)
            .finish()
            .write((source_id, Source::from(self.identifier.as_str())), out)
    }

    /// Render the report to stderr.
    pub fn render(&self) {
        let _ = self.write_report(std::io::stderr(), true);
    }

    fn kind_message(&self) -> &'static str {
        self.kind.describe()
    }
}

/// Print an error to stderr: parse errors as a labelled report, everything
/// else as `error:` plus one `caused by:` line per cause.
pub fn render_error(err: &UseError) {
    if let UseError::Parse(parse) = err {
        if !parse.identifier.is_empty() {
            parse.render();
            return;
        }
    }

    let chain = err.chain();
    eprintln!("error: {}", chain[0]);
    for cause in &chain[1..] {
        eprintln!("  caused by: {}", cause);
    }
}
