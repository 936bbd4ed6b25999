use thiserror::Error;

use crate::api::{MarkerKind, MarkerSource};
use crate::coerce::CastFailure;
use crate::model::TypeList;

/// A command declaration that cannot be turned into a schema.
/// Raised before any token is parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{property} cannot be both {left} and {right}.")]
    AttributeConflict {
        property: String,
        left: MarkerKind,
        right: MarkerKind,
    },

    #[error("{property} declares the {kind} marker more than once ({first} and {second}).")]
    DuplicateAttribute {
        property: String,
        kind: MarkerKind,
        first: MarkerSource,
        second: MarkerSource,
    },

    #[error("{property} declares an unknown type '{declared}'.")]
    UnknownType { property: String, declared: String },

    #[error("Option name '{name}' is used by both {first} and {second}.")]
    DuplicateOptionName {
        name: String,
        first: String,
        second: String,
    },
}

impl SchemaError {
    /// A stable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::AttributeConflict { .. } => "attribute-conflict",
            SchemaError::DuplicateAttribute { .. } => "duplicate-attribute",
            SchemaError::UnknownType { .. } => "unknown-type",
            SchemaError::DuplicateOptionName { .. } => "duplicate-option-name",
        }
    }
}

/// How a non-boolean option was misused as a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagUsage {
    /// Inside a grouped short alias cluster (ex: `-abc`).
    AliasGroup,
    /// Named last, with no value following.
    BareFlag,
}

impl std::fmt::Display for FlagUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagUsage::AliasGroup => write!(f, "you can't use it in an aliases group"),
            FlagUsage::BareFlag => write!(f, "it expects a value"),
        }
    }
}

fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

/// Render an option name the way it is typed: `-x` for an alias, `--xyz` for a long name.
pub(crate) fn display_option(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

/// Malformed command line input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ArgumentError {
    #[error("Expect only {expected} argument{}", plural(.expected))]
    InvalidNumberOfArguments { expected: usize },

    #[error("Unknown {} option", display_option(.name))]
    UnknownOption { name: String },

    #[error("{} option is not a boolean, so {usage}", display_option(.name))]
    OptionNotBoolean { name: String, usage: FlagUsage },

    #[error("{} option is boolean and should not have value", display_option(.name))]
    UnexpectedValue { name: String },

    #[error("Unable to parse {token}, maybe you would mean -{token}")]
    MalformedAliasGroup { token: String },

    #[error("The parameter {property} must be one of the following values: [{}]; '{given}' given.", .allowed.join(", "))]
    InvalidValue {
        property: String,
        allowed: Vec<String>,
        given: String,
    },

    #[error("Unable to cast '{token}' into {types} for {property}, {failure}.")]
    UnableToCast {
        property: String,
        token: String,
        types: TypeList,
        failure: CastFailure,
    },

    #[error("{property}: {message}")]
    FailedValidation { property: String, message: String },

    #[error("{property} is mandatory")]
    MandatoryProperty { property: String },
}

impl ArgumentError {
    /// A stable identifier for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ArgumentError::InvalidNumberOfArguments { .. } => "invalid-number-of-arguments",
            ArgumentError::UnknownOption { .. } => "unknown-option",
            ArgumentError::OptionNotBoolean { .. } => "option-not-boolean",
            ArgumentError::UnexpectedValue { .. } => "unexpected-value",
            ArgumentError::MalformedAliasGroup { .. } => "malformed-alias-group",
            ArgumentError::InvalidValue { .. } => "invalid-value",
            ArgumentError::UnableToCast { .. } => "unable-to-cast",
            ArgumentError::FailedValidation { .. } => "failed-validation",
            ArgumentError::MandatoryProperty { .. } => "mandatory-property",
        }
    }
}

/// A bound value that could not be written onto its command field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignError {
    #[error("Cannot assign {property}: {reason}.")]
    Conversion { property: String, reason: String },

    #[error("Cannot assign unknown property '{0}'.")]
    UnknownProperty(String),
}

impl AssignError {
    pub fn code(&self) -> &'static str {
        match self {
            AssignError::Conversion { .. } => "assign-conversion",
            AssignError::UnknownProperty(_) => "assign-unknown-property",
        }
    }
}

/// Any failure between receiving tokens and running a command.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvocationError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Assign(#[from] AssignError),
}

impl InvocationError {
    pub fn code(&self) -> &'static str {
        match self {
            InvocationError::Schema(error) => error.code(),
            InvocationError::Argument(error) => error.code(),
            InvocationError::Assign(error) => error.code(),
        }
    }
}
