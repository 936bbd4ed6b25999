use declarg::{Bindable, Command, ConsoleWriter, Invocation, ReadableFile, Style, WritableFile, Writer};
use std::path::PathBuf;

#[derive(Debug, Default, Bindable)]
#[declarg(name = "copy")]
struct CopyFile {
    /// @argument
    /// The file to read.
    #[declarg(validate = ReadableFile::content())]
    source: String,

    /// Where to write the content; stdout when not given.
    #[declarg(option = ["output", "o"], validate = WritableFile::new())]
    output: Option<PathBuf>,

    /// @option force, f
    force: bool,

    #[declarg(rest, description = "Extra lines appended to the content.")]
    lines: Vec<String>,
}

impl Command for CopyFile {
    fn run(&mut self, writer: &mut dyn Writer) -> i32 {
        let mut content = self.source.clone();

        for line in &self.lines {
            content.push('\n');
            content.push_str(line);
        }

        match &self.output {
            Some(path) if path.exists() && !self.force => {
                writer.write_line(
                    &format!("{} exists, use --force to overwrite", path.display()),
                    Style::Error,
                );
                1
            }
            Some(path) => match std::fs::write(path, content) {
                Ok(()) => 0,
                Err(error) => {
                    writer.write_line(&format!("{}: {error}", path.display()), Style::Error);
                    1
                }
            },
            None => {
                writer.write_line(&content, Style::Plain);
                0
            }
        }
    }
}

fn main() {
    let mut writer = ConsoleWriter::default();
    let status = Invocation::new(&mut writer).execute_env(&mut CopyFile::default());
    std::process::exit(status);
}
