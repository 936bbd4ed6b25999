use std::ops::Deref;
use std::rc::Rc;

use crate::api::Validator;
use crate::model::{TypeList, Value};

/// The normalized description of a bound field, shared by arguments, options and the rest-argument.
#[derive(Clone)]
pub struct FieldDefinition {
    property: String,
    description: String,
    types: TypeList,
    values: Option<Vec<String>>,
    validators: Vec<Rc<dyn Validator>>,
    default: Value,
}

impl FieldDefinition {
    pub(crate) fn new(
        property: impl Into<String>,
        description: impl Into<String>,
        types: TypeList,
        values: Option<Vec<String>>,
        validators: Vec<Rc<dyn Validator>>,
        default: Value,
    ) -> Self {
        Self {
            property: property.into(),
            description: description.into(),
            types,
            values,
            validators,
            default,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The candidate types, in coercion order.
    pub fn types(&self) -> &TypeList {
        &self.types
    }

    /// The raw tokens accepted, if constrained.
    pub fn values(&self) -> Option<&[String]> {
        self.values.as_deref()
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    pub(crate) fn validators(&self) -> &[Rc<dyn Validator>] {
        &self.validators
    }

    pub fn has_validators(&self) -> bool {
        !self.validators.is_empty()
    }
}

impl std::fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Field[{property}, {types}, values={values:?}, validators={validators}, default={default}]",
            property = self.property,
            types = self.types,
            values = self.values,
            validators = self.validators.len(),
            default = self.default,
        )
    }
}

/// A positional argument; its position is its index in [`Schema::arguments`].
#[derive(Debug, Clone)]
pub struct ArgumentDefinition(FieldDefinition);

impl ArgumentDefinition {
    pub(crate) fn new(field: FieldDefinition) -> Self {
        Self(field)
    }
}

impl Deref for ArgumentDefinition {
    type Target = FieldDefinition;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A named option.
#[derive(Debug, Clone)]
pub struct OptionDefinition {
    field: FieldDefinition,
    names: Vec<String>,
}

impl OptionDefinition {
    pub(crate) fn new(field: FieldDefinition, names: Vec<String>) -> Self {
        assert!(!names.is_empty(), "internal error - an option must have a name");
        Self { field, names }
    }

    /// Long names and single character aliases, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_bool(&self) -> bool {
        self.field.types().is_bool()
    }

    /// Whether `name` (without dashes) identifies this option.
    pub fn is_named(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl Deref for OptionDefinition {
    type Target = FieldDefinition;

    fn deref(&self) -> &Self::Target {
        &self.field
    }
}

/// The field absorbing positional tokens beyond the declared arguments.
#[derive(Debug, Clone)]
pub struct RestDefinition(FieldDefinition);

impl RestDefinition {
    pub(crate) fn new(field: FieldDefinition) -> Self {
        Self(field)
    }
}

impl Deref for RestDefinition {
    type Target = FieldDefinition;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The extracted command line interface of a command.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    arguments: Vec<ArgumentDefinition>,
    options: Vec<OptionDefinition>,
    rest: Option<RestDefinition>,
}

impl Schema {
    pub(crate) fn new(
        arguments: Vec<ArgumentDefinition>,
        options: Vec<OptionDefinition>,
        rest: Option<RestDefinition>,
    ) -> Self {
        Self {
            arguments,
            options,
            rest,
        }
    }

    /// The positional arguments, in order.
    pub fn arguments(&self) -> &[ArgumentDefinition] {
        &self.arguments
    }

    pub fn options(&self) -> &[OptionDefinition] {
        &self.options
    }

    pub fn rest(&self) -> Option<&RestDefinition> {
        self.rest.as_ref()
    }

    /// Find an option by any of its names or aliases.
    pub fn find_option(&self, name: &str) -> Option<&OptionDefinition> {
        self.options.iter().find(|option| option.is_named(name))
    }
}
