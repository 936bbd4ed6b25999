use crate::api::CommandDeclaration;
use crate::error::AssignError;
use crate::model::Value;
use crate::parser::Writer;

/// Behaviour for a type whose fields are bound from the command line.
///
/// Usually derived via `#[derive(Bindable)]`; may be implemented by hand.
///
/// ### Example
/// ```
/// # use declarg_builder as declarg;
/// use declarg::{prelude::*, AssignError, Bindable, CommandDeclaration, FieldDeclaration, Marker, Value};
///
/// #[derive(Default)]
/// struct Greet {
///     name: String,
/// }
///
/// impl Bindable for Greet {
///     fn declaration(&self) -> CommandDeclaration {
///         CommandDeclaration::new("greet").field(
///             FieldDeclaration::new("name")
///                 .marker(Marker::argument())
///                 .type_hint("string")
///                 .default_value(self.name.to_value()),
///         )
///     }
///
///     fn assign(&mut self, property: &str, value: Value) -> Result<(), AssignError> {
///         match property {
///             "name" => {
///                 self.name = String::from_value(value).map_err(|reason| AssignError::Conversion {
///                     property: property.to_string(),
///                     reason,
///                 })?;
///                 Ok(())
///             }
///             _ => Err(AssignError::UnknownProperty(property.to_string())),
///         }
///     }
/// }
///
/// let mut greet = Greet::default();
/// declarg::bind(&mut greet, &["World"]).unwrap();
/// assert_eq!(greet.name, "World");
/// ```
pub trait Bindable {
    /// Describe the fields, reading current field values as their defaults.
    fn declaration(&self) -> CommandDeclaration;

    /// Write a bound value onto the field named `property`.
    fn assign(&mut self, property: &str, value: Value) -> Result<(), AssignError>;
}

/// A runnable command.
pub trait Command: Bindable {
    /// Execute the command, after every field has been bound.
    /// Returns the exit status.
    fn run(&mut self, writer: &mut dyn Writer) -> i32;
}
