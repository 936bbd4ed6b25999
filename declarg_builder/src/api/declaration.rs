use std::rc::Rc;

use crate::api::Validator;
use crate::model::Value;

/// Where a [`Marker`] was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerSource {
    /// Structured metadata (ex: `#[declarg(option)]` or [`FieldDeclaration::marker`]).
    Attribute,
    /// A free-text `@tag` line in the field's doc comment.
    DocAnnotation,
}

impl std::fmt::Display for MarkerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerSource::Attribute => write!(f, "attribute"),
            MarkerSource::DocAnnotation => write!(f, "doc annotation"),
        }
    }
}

/// The kind of a [`Marker`], used to detect duplicates on a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Argument,
    Option,
    Rest,
    Values,
    Type,
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MarkerKind::Argument => "argument",
            MarkerKind::Option => "option",
            MarkerKind::Rest => "rest",
            MarkerKind::Values => "values",
            MarkerKind::Type => "type",
        };
        write!(f, "{name}")
    }
}

/// A piece of metadata attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// The field is a positional argument.
    Argument { description: Option<String> },
    /// The field is a named option; empty `names` means `[field, first character of field]`.
    Option {
        names: Vec<String>,
        description: Option<String>,
    },
    /// The field absorbs positional tokens beyond the declared arguments.
    Rest { description: Option<String> },
    /// The raw tokens the field accepts.
    Values(Vec<String>),
    /// An explicit, pipe-delimited type declaration (ex: `string|int`).
    Type(String),
}

impl Marker {
    /// Mark a positional argument.
    pub fn argument() -> Self {
        Marker::Argument { description: None }
    }

    /// Mark a named option.
    ///
    /// ### Example
    /// ```
    /// # use declarg_builder as declarg;
    /// use declarg::Marker;
    ///
    /// let marker = Marker::option(["level", "l"]).describe("How loud to be.");
    /// ```
    pub fn option(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Marker::Option {
            names: names.into_iter().map(Into::into).collect(),
            description: None,
        }
    }

    /// Mark the rest-argument.
    pub fn rest() -> Self {
        Marker::Rest { description: None }
    }

    /// Constrain the raw tokens accepted.
    pub fn values(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Marker::Values(values.into_iter().map(Into::into).collect())
    }

    /// Declare the field's type explicitly.
    pub fn kind(declared: impl Into<String>) -> Self {
        Marker::Type(declared.into())
    }

    /// Attach a description.
    /// Has no effect on `values` and `type` markers.
    pub fn describe(self, text: impl Into<String>) -> Self {
        match self {
            Marker::Argument { .. } => Marker::Argument {
                description: Some(text.into()),
            },
            Marker::Option { names, .. } => Marker::Option {
                names,
                description: Some(text.into()),
            },
            Marker::Rest { .. } => Marker::Rest {
                description: Some(text.into()),
            },
            other => other,
        }
    }

    pub fn marker_kind(&self) -> MarkerKind {
        match self {
            Marker::Argument { .. } => MarkerKind::Argument,
            Marker::Option { .. } => MarkerKind::Option,
            Marker::Rest { .. } => MarkerKind::Rest,
            Marker::Values(_) => MarkerKind::Values,
            Marker::Type(_) => MarkerKind::Type,
        }
    }

    pub(crate) fn description(&self) -> Option<&str> {
        match self {
            Marker::Argument { description }
            | Marker::Option { description, .. }
            | Marker::Rest { description } => description.as_deref(),
            _ => None,
        }
    }
}

/// The declared shape of a single command field.
///
/// ### Example
/// ```
/// # use declarg_builder as declarg;
/// use declarg::{FieldDeclaration, Marker, Value};
///
/// let field = FieldDeclaration::new("level")
///     .marker(Marker::option(["level", "l"]))
///     .marker(Marker::values(["low", "medium", "high"]))
///     .type_hint("string")
///     .default_value(Value::Str("low".to_string()))
///     .doc("How loud to be.");
/// assert_eq!(field.name(), "level");
/// ```
#[derive(Clone)]
pub struct FieldDeclaration {
    name: String,
    markers: Vec<(MarkerSource, Marker)>,
    doc: Option<String>,
    type_hint: Option<String>,
    default: Value,
    validators: Vec<Rc<dyn Validator>>,
}

impl FieldDeclaration {
    /// Declare a field by its property name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            markers: Vec::default(),
            doc: None,
            type_hint: None,
            default: Value::Null,
            validators: Vec::default(),
        }
    }

    /// Attach structured metadata.
    /// Repeating a marker kind is reported when the schema is extracted.
    pub fn marker(mut self, marker: Marker) -> Self {
        self.markers.push((MarkerSource::Attribute, marker));
        self
    }

    /// Attach the field's doc comment text; `@tag` lines inside are read as annotations.
    /// If repeated, only the final doc text will apply.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc.replace(text.into());
        self
    }

    /// The static type of the field, as a pipe-delimited declaration (ex: `int|null`).
    /// If repeated, only the final hint will apply.
    pub fn type_hint(mut self, hint: impl Into<String>) -> Self {
        self.type_hint.replace(hint.into());
        self
    }

    /// The field's current (default) value.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = value;
        self
    }

    /// Append a validator; validators run in the order they are added.
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Rc::new(validator));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn markers(&self) -> &[(MarkerSource, Marker)] {
        &self.markers
    }

    pub fn doc_text(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.type_hint.as_deref()
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    pub(crate) fn validators(&self) -> &[Rc<dyn Validator>] {
        &self.validators
    }
}

impl std::fmt::Debug for FieldDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDeclaration")
            .field("name", &self.name)
            .field("markers", &self.markers)
            .field("doc", &self.doc)
            .field("type_hint", &self.type_hint)
            .field("default", &self.default)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// The ordered field list of a command.
#[derive(Debug, Clone)]
pub struct CommandDeclaration {
    name: String,
    fields: Vec<FieldDeclaration>,
}

impl CommandDeclaration {
    /// Declare a command.
    ///
    /// ### Example
    /// ```
    /// # use declarg_builder as declarg;
    /// use declarg::{CommandDeclaration, FieldDeclaration, Marker};
    ///
    /// let declaration = CommandDeclaration::new("copy")
    ///     .field(FieldDeclaration::new("source").marker(Marker::argument()))
    ///     .field(FieldDeclaration::new("target").marker(Marker::argument()));
    /// assert_eq!(declaration.fields().len(), 2);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::default(),
        }
    }

    /// Add a field.
    /// The order of fields is the positional order of arguments.
    pub fn field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_describe() {
        assert_eq!(
            Marker::option(["a"]).describe("x"),
            Marker::Option {
                names: vec!["a".to_string()],
                description: Some("x".to_string()),
            }
        );
        assert_eq!(
            Marker::argument().describe("y").description(),
            Some("y")
        );
        assert_eq!(Marker::values(["a"]).describe("z").description(), None);
    }

    #[test]
    fn field_declaration() {
        let field = FieldDeclaration::new("name")
            .marker(Marker::argument())
            .marker(Marker::kind("int"))
            .doc("--this will get discarded--")
            .doc("The name.")
            .type_hint("string")
            .default_value(Value::Int(3))
            .validator(|value: Value| -> Result<Value, String> { Ok(value) });

        assert_eq!(field.name(), "name");
        assert_eq!(
            field.markers(),
            &[
                (MarkerSource::Attribute, Marker::argument()),
                (MarkerSource::Attribute, Marker::Type("int".to_string())),
            ]
        );
        assert_eq!(field.doc_text(), Some("The name."));
        assert_eq!(field.hint(), Some("string"));
        assert_eq!(field.default(), &Value::Int(3));
        assert_eq!(field.validators().len(), 1);
    }

    #[test]
    fn command_declaration_order() {
        let declaration = CommandDeclaration::new("cmd")
            .field(FieldDeclaration::new("b"))
            .field(FieldDeclaration::new("a"));
        let names: Vec<&str> = declaration.fields().iter().map(|f| f.name()).collect();
        assert_eq!(declaration.name(), "cmd");
        assert_eq!(names, vec!["b", "a"]);
    }
}
