use declarg::{Bindable, Command, ConsoleWriter, Invocation, Style, Writer};

#[derive(Debug, Default, Bindable)]
#[declarg(name = "level")]
struct Level {
    /// @argument
    /// The thing to report on.
    target: String,

    #[declarg(option = ["level", "l"], values = ["low", "medium", "high"], description = "How loud to be.")]
    level: String,

    /// @option verbose, v
    /// Print the bound values too.
    verbose: bool,

    #[declarg(option = "count", kind = "int|float")]
    count: Option<f64>,
}

impl Command for Level {
    fn run(&mut self, writer: &mut dyn Writer) -> i32 {
        if self.verbose {
            writer.write_line(&format!("{self:?}"), Style::Plain);
        }

        let level = if self.level.is_empty() {
            "low"
        } else {
            self.level.as_str()
        };
        let times = self.count.unwrap_or(1.0);
        writer.write_line(
            &format!("{}: {level} (x{times})", self.target),
            Style::Plain,
        );
        0
    }
}

fn main() {
    let mut writer = ConsoleWriter::default();
    let status = Invocation::new(&mut writer).execute_env(&mut Level::default());
    std::process::exit(status);
}
