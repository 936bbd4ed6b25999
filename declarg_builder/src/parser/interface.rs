/// How a piece of output should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    /// Diagnostics (ex: a binding error), usually colored by the sink.
    Error,
}

/// The output sink handed to commands, and the target of self-reported errors.
pub trait Writer {
    fn write(&mut self, text: &str, style: Style);

    /// Write `text` followed by a newline.
    fn write_line(&mut self, text: &str, style: Style) {
        self.write(&format!("{text}\n"), style);
    }
}

/// Writes plain text to stdout and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleWriter {}

impl Writer for ConsoleWriter {
    fn write(&mut self, text: &str, style: Style) {
        match style {
            Style::Plain => print!("{text}"),
            Style::Error => eprint!("{text}"),
        }
    }
}

#[cfg(any(test, feature = "unit_test"))]
pub use util::InMemoryWriter;

#[cfg(any(test, feature = "unit_test"))]
mod util {
    use super::*;

    /// Records everything written, for assertions in tests.
    #[derive(Debug, Default)]
    pub struct InMemoryWriter {
        entries: Vec<(Style, String)>,
    }

    impl InMemoryWriter {
        /// Every plain write, concatenated.
        pub fn plain(&self) -> String {
            self.collect(Style::Plain)
        }

        /// Every error write, concatenated.
        pub fn errors(&self) -> String {
            self.collect(Style::Error)
        }

        pub fn entries(&self) -> &[(Style, String)] {
            &self.entries
        }

        fn collect(&self, style: Style) -> String {
            self.entries
                .iter()
                .filter(|(s, _)| *s == style)
                .map(|(_, text)| text.as_str())
                .collect()
        }
    }

    impl Writer for InMemoryWriter {
        fn write(&mut self, text: &str, style: Style) {
            self.entries.push((style, text.to_string()));
        }
    }
}
