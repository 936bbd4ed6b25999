use std::env;

use crate::api::{Bindable, Command};
use crate::binder::{Bindings, ParameterBinder};
use crate::error::{InvocationError, SchemaError};
use crate::parser::{Style, Writer};
use crate::schema::{extract, Schema};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Extract the schema of `target`, using its current field values as defaults.
pub fn describe<B: Bindable + ?Sized>(target: &B) -> Result<Schema, SchemaError> {
    extract(&target.declaration())
}

/// Extract, bind `tokens` and write the bound values onto `target`.
///
/// Nothing is written onto `target` unless every token binds.
/// Values are then assigned arguments first, options by property name and the rest-argument last;
/// an [`AssignError`](crate::AssignError) stops at the failing field, leaving the fields before it written.
pub fn bind<B: Bindable + ?Sized>(
    target: &mut B,
    tokens: &[&str],
) -> Result<Bindings, InvocationError> {
    let schema = describe(target)?;
    let bindings = ParameterBinder::new(&schema).bind(tokens)?;

    for (property, value) in bindings.assignments() {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Assigning {property}={value}.");
        }

        target.assign(&property, value)?;
    }

    Ok(bindings)
}

/// Runs a single command against a list of tokens.
///
/// ### Example
/// ```
/// # use declarg_builder as declarg;
/// use declarg::{AssignError, Bindable, Command, CommandDeclaration, ConsoleWriter, Invocation, Value, Writer};
///
/// struct Noop;
///
/// impl Bindable for Noop {
///     fn declaration(&self) -> CommandDeclaration {
///         CommandDeclaration::new("noop")
///     }
///
///     fn assign(&mut self, property: &str, _: Value) -> Result<(), AssignError> {
///         Err(AssignError::UnknownProperty(property.to_string()))
///     }
/// }
///
/// impl Command for Noop {
///     fn run(&mut self, _: &mut dyn Writer) -> i32 {
///         0
///     }
/// }
///
/// let mut writer = ConsoleWriter::default();
/// assert_eq!(Invocation::new(&mut writer).execute(&mut Noop, &[]), 0);
/// assert_eq!(Invocation::new(&mut writer).execute(&mut Noop, &["extra"]), 1);
/// ```
pub struct Invocation<'w> {
    writer: &'w mut dyn Writer,
}

impl<'w> Invocation<'w> {
    pub fn new(writer: &'w mut dyn Writer) -> Self {
        Self { writer }
    }

    /// Bind and run `command`, propagating any failure before `run`.
    pub fn try_execute<C: Command + ?Sized>(
        &mut self,
        command: &mut C,
        tokens: &[&str],
    ) -> Result<i32, InvocationError> {
        bind(command, tokens)?;
        Ok(command.run(&mut *self.writer))
    }

    /// Bind and run `command`, reporting any failure to the writer.
    ///
    /// Returns the command's exit status, or `1` when binding failed.
    pub fn execute<C: Command + ?Sized>(&mut self, command: &mut C, tokens: &[&str]) -> i32 {
        match self.try_execute(command, tokens) {
            Ok(status) => status,
            Err(error) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Invocation failed: {}.", error.code());
                }

                self.writer.write_line(&error.to_string(), Style::Error);
                1
            }
        }
    }

    /// [`Invocation::execute`] against the process arguments, skipping the program path.
    pub fn execute_env<C: Command + ?Sized>(&mut self, command: &mut C) -> i32 {
        let command_input: Vec<String> = env::args().skip(1).collect();
        self.execute(
            command,
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CommandDeclaration, FieldDeclaration, FromValue, IntoValue, Marker};
    use crate::error::{ArgumentError, AssignError};
    use crate::model::Value;
    use crate::parser::InMemoryWriter;

    #[derive(Debug, Default)]
    struct CopyFiles {
        source: String,
        force: bool,
        retries: u8,
        ran: bool,
    }

    fn conversion(property: &str) -> impl FnOnce(String) -> AssignError + '_ {
        move |reason| AssignError::Conversion {
            property: property.to_string(),
            reason,
        }
    }

    impl Bindable for CopyFiles {
        fn declaration(&self) -> CommandDeclaration {
            CommandDeclaration::new("copy")
                .field(
                    FieldDeclaration::new("source")
                        .marker(Marker::argument())
                        .type_hint("string")
                        .default_value(self.source.to_value()),
                )
                .field(
                    FieldDeclaration::new("force")
                        .marker(Marker::option(["force", "f"]))
                        .type_hint("bool")
                        .default_value(self.force.to_value()),
                )
                .field(
                    FieldDeclaration::new("retries")
                        .doc("@option retries, r\nHow many times to retry.")
                        .type_hint("int")
                        .default_value(self.retries.to_value()),
                )
        }

        fn assign(&mut self, property: &str, value: Value) -> Result<(), AssignError> {
            match property {
                "source" => self.source = String::from_value(value).map_err(conversion(property))?,
                "force" => self.force = bool::from_value(value).map_err(conversion(property))?,
                "retries" => self.retries = u8::from_value(value).map_err(conversion(property))?,
                _ => return Err(AssignError::UnknownProperty(property.to_string())),
            }

            Ok(())
        }
    }

    impl Command for CopyFiles {
        fn run(&mut self, writer: &mut dyn Writer) -> i32 {
            self.ran = true;
            writer.write_line(
                &format!("copy {} force={} retries={}", self.source, self.force, self.retries),
                Style::Plain,
            );
            0
        }
    }

    #[test]
    fn describe_command() {
        let schema = describe(&CopyFiles::default()).unwrap();
        assert_eq!(schema.arguments().len(), 1);
        assert_eq!(schema.options().len(), 2);
        assert_eq!(schema.find_option("r").unwrap().description(), "How many times to retry.");
    }

    #[test]
    fn bind_writes_fields() {
        let mut copy = CopyFiles::default();
        let bindings = bind(&mut copy, &["a.txt", "-f", "--retries", "3"]).unwrap();
        assert_eq!(copy.source, "a.txt");
        assert!(copy.force);
        assert_eq!(copy.retries, 3);
        assert_eq!(bindings.option("retries"), Some(&Value::Int(3)));
    }

    #[test]
    fn bind_keeps_defaults() {
        let mut copy = CopyFiles {
            retries: 5,
            ..CopyFiles::default()
        };
        bind(&mut copy, &["a.txt"]).unwrap();
        assert_eq!(copy.retries, 5);
        assert!(!copy.force);
    }

    #[test]
    fn bind_assign_failure() {
        let mut copy = CopyFiles::default();
        let error = bind(&mut copy, &["-r", "300"]).unwrap_err();
        assert_matches!(error, InvocationError::Assign(AssignError::Conversion { .. }));
        assert_eq!(error.code(), "assign-conversion");
    }

    #[test]
    fn bind_failure_leaves_target() {
        let mut copy = CopyFiles::default();
        assert!(bind(&mut copy, &["a.txt", "-f", "--xyz"]).is_err());
        assert_eq!(copy.source, "");
        assert!(!copy.force);
    }

    #[test]
    fn bind_assign_failure_stops_at_field() {
        let mut copy = CopyFiles::default();
        let error = bind(&mut copy, &["a.txt", "-f", "-r", "300"]).unwrap_err();
        assert_eq!(
            error,
            InvocationError::Assign(AssignError::Conversion {
                property: "retries".to_string(),
                reason: "300 is out of range for u8".to_string(),
            })
        );
        assert_eq!(copy.source, "a.txt");
        assert!(copy.force);
        assert_eq!(copy.retries, 0);
    }

    #[test]
    fn execute_status() {
        let mut writer = InMemoryWriter::default();
        let mut copy = CopyFiles::default();
        let status = Invocation::new(&mut writer).execute(&mut copy, &["a.txt", "-fr"]);
        assert_eq!(status, 1);
        assert_eq!(
            writer.errors(),
            "-r option is not a boolean, so you can't use it in an aliases group\n"
        );
        assert!(!copy.ran);

        let mut writer = InMemoryWriter::default();
        let status = Invocation::new(&mut writer).execute(&mut copy, &["a.txt", "-f", "-r=2"]);
        assert_eq!(status, 0);
        assert!(copy.ran);
        assert_eq!(writer.plain(), "copy a.txt force=true retries=2\n");
        assert_eq!(writer.errors(), "");
    }

    #[test]
    fn execute_reports_error() {
        let mut writer = InMemoryWriter::default();
        let mut copy = CopyFiles::default();
        let status = Invocation::new(&mut writer).execute(&mut copy, &["a.txt", "b.txt"]);
        assert_eq!(status, 1);
        assert!(!copy.ran);
        assert_eq!(writer.errors(), "Expect only 1 argument\n");
        assert_eq!(writer.plain(), "");
    }

    #[test]
    fn try_execute_propagates() {
        let mut writer = InMemoryWriter::default();
        let mut copy = CopyFiles::default();
        let error = Invocation::new(&mut writer)
            .try_execute(&mut copy, &["--xyz"])
            .unwrap_err();
        assert_eq!(
            error,
            InvocationError::Argument(ArgumentError::UnknownOption {
                name: "xyz".to_string()
            })
        );
        assert!(writer.entries().is_empty());
        assert!(!copy.ran);
    }
}
