use std::collections::HashMap;

use crate::api::run_chain;
use crate::binder::token::{classify, Token};
use crate::coerce::coerce;
use crate::error::{ArgumentError, FlagUsage};
use crate::model::{Kind, Value};
use crate::schema::{FieldDefinition, OptionDefinition, Schema};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The values bound from one command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    arguments: Vec<(String, Value)>,
    options: HashMap<String, Value>,
    rest: Vec<Value>,
    rest_property: Option<String>,
}

impl Bindings {
    /// The bound positional arguments, in order.
    pub fn arguments(&self) -> &[(String, Value)] {
        &self.arguments
    }

    pub fn argument(&self, property: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    /// The options given on the command line or resolved by the validation pass, by property.
    pub fn options(&self) -> &HashMap<String, Value> {
        &self.options
    }

    pub fn option(&self, property: &str) -> Option<&Value> {
        self.options.get(property)
    }

    /// The tokens absorbed by the rest-argument, in order.
    pub fn rest(&self) -> &[Value] {
        &self.rest
    }

    /// The property/value pairs to write onto the command.
    ///
    /// The rest-argument is only included when it absorbed at least one token.
    pub fn assignments(&self) -> Vec<(String, Value)> {
        let mut assignments: Vec<(String, Value)> = self.arguments.clone();
        let mut options: Vec<(&String, &Value)> = self.options.iter().collect();
        options.sort_by_key(|(property, _)| *property);
        assignments.extend(
            options
                .into_iter()
                .map(|(property, value)| (property.clone(), value.clone())),
        );

        if let Some(property) = &self.rest_property {
            if !self.rest.is_empty() {
                assignments.push((property.clone(), Value::List(self.rest.clone())));
            }
        }

        assignments
    }
}

enum State<'s> {
    Idle,
    AwaitingValue {
        option: &'s OptionDefinition,
        name: String,
    },
    PositionalOnly,
}

/// Binds command line tokens against a [`Schema`].
///
/// ### Example
/// ```
/// # use declarg_builder as declarg;
/// use declarg::{extract, CommandDeclaration, FieldDeclaration, Marker, ParameterBinder, Value};
///
/// let schema = extract(
///     &CommandDeclaration::new("copy")
///         .field(FieldDeclaration::new("source").marker(Marker::argument()))
///         .field(FieldDeclaration::new("force").marker(Marker::option(["force", "f"])).type_hint("bool")),
/// )
/// .unwrap();
///
/// let bindings = ParameterBinder::new(&schema).bind(&["-f", "a.txt"]).unwrap();
/// assert_eq!(bindings.argument("source"), Some(&Value::Str("a.txt".to_string())));
/// assert_eq!(bindings.option("force"), Some(&Value::Bool(true)));
/// ```
pub struct ParameterBinder<'s> {
    schema: &'s Schema,
}

impl<'s> ParameterBinder<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Bind every token, then run the validation pass over the options.
    pub fn bind(&self, tokens: &[&str]) -> Result<Bindings, ArgumentError> {
        let mut bindings = self.bind_tokens(tokens)?;
        self.validation_pass(&mut bindings)?;
        Ok(bindings)
    }

    fn bind_tokens(&self, tokens: &[&str]) -> Result<Bindings, ArgumentError> {
        let mut bindings = Bindings {
            rest_property: self.schema.rest().map(|rest| rest.property().to_string()),
            ..Bindings::default()
        };
        let mut state = State::Idle;

        for token in tokens {
            state = match state {
                State::AwaitingValue { option, .. } => {
                    let value = bind_value(option, token, false)?;

                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Option {} takes '{token}'.", option.property());
                    }

                    bindings
                        .options
                        .insert(option.property().to_string(), value);
                    State::Idle
                }
                State::PositionalOnly => {
                    self.bind_positional(&mut bindings, token)?;
                    State::PositionalOnly
                }
                State::Idle => self.feed(&mut bindings, token)?,
            };
        }

        match state {
            State::AwaitingValue { name, .. } => Err(ArgumentError::OptionNotBoolean {
                name,
                usage: FlagUsage::BareFlag,
            }),
            _ => Ok(bindings),
        }
    }

    fn feed(&self, bindings: &mut Bindings, token: &str) -> Result<State<'s>, ArgumentError> {
        let classified = classify(token);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Token '{token}' is {classified:?}.");
        }

        match classified {
            Token::EndOfOptions => Ok(State::PositionalOnly),
            Token::Positional(token) => {
                self.bind_positional(bindings, token)?;
                Ok(State::Idle)
            }
            Token::Long { name, value } => self.bind_option(bindings, name, value),
            Token::Short { alias, value } => self.bind_option(bindings, alias, value),
            Token::Group { value: Some(_), .. } => Err(ArgumentError::MalformedAliasGroup {
                token: token.to_string(),
            }),
            Token::Group {
                aliases,
                value: None,
            } => {
                for alias in aliases.chars() {
                    let name = alias.to_string();
                    let option = self.find_option(&name)?;

                    if !option.is_bool() {
                        return Err(ArgumentError::OptionNotBoolean {
                            name,
                            usage: FlagUsage::AliasGroup,
                        });
                    }

                    bindings
                        .options
                        .insert(option.property().to_string(), Value::Bool(true));
                }

                Ok(State::Idle)
            }
        }
    }

    fn find_option(&self, name: &str) -> Result<&'s OptionDefinition, ArgumentError> {
        self.schema
            .find_option(name)
            .ok_or_else(|| ArgumentError::UnknownOption {
                name: name.to_string(),
            })
    }

    fn bind_option(
        &self,
        bindings: &mut Bindings,
        name: &str,
        value: Option<&str>,
    ) -> Result<State<'s>, ArgumentError> {
        let option = self.find_option(name)?;

        if option.is_bool() {
            if value.is_some() {
                return Err(ArgumentError::UnexpectedValue {
                    name: name.to_string(),
                });
            }

            bindings
                .options
                .insert(option.property().to_string(), Value::Bool(true));
            return Ok(State::Idle);
        }

        match value {
            Some(raw) => {
                let value = bind_value(option, raw, false)?;
                bindings
                    .options
                    .insert(option.property().to_string(), value);
                Ok(State::Idle)
            }
            None => Ok(State::AwaitingValue {
                option,
                name: name.to_string(),
            }),
        }
    }

    fn bind_positional(&self, bindings: &mut Bindings, token: &str) -> Result<(), ArgumentError> {
        let filled = bindings.arguments.len();

        if let Some(argument) = self.schema.arguments().get(filled) {
            let value = bind_value(argument, token, true)?;
            bindings
                .arguments
                .push((argument.property().to_string(), value));
        } else if let Some(rest) = self.schema.rest() {
            let value = bind_value(rest, token, true)?;
            bindings.rest.push(value);
        } else {
            return Err(ArgumentError::InvalidNumberOfArguments {
                expected: self.schema.arguments().len(),
            });
        }

        Ok(())
    }

    /// Options are only validated once every token is consumed, against the bound value or the field default.
    fn validation_pass(&self, bindings: &mut Bindings) -> Result<(), ArgumentError> {
        for option in self.schema.options().iter().filter(|o| o.has_validators()) {
            let property = option.property();
            let current = bindings
                .options
                .get(property)
                .cloned()
                .unwrap_or_else(|| option.default().clone());
            let value = run_chain(option.validators(), current).map_err(|message| {
                ArgumentError::FailedValidation {
                    property: property.to_string(),
                    message,
                }
            })?;

            if value.is_null() && !option.types().contains(Kind::Null) {
                return Err(ArgumentError::MandatoryProperty {
                    property: property.to_string(),
                });
            }

            bindings.options.insert(property.to_string(), value);
        }

        Ok(())
    }
}

/// Check the raw token against the allowed values, coerce it, and optionally run the validator chain.
fn bind_value(field: &FieldDefinition, raw: &str, validate: bool) -> Result<Value, ArgumentError> {
    if let Some(allowed) = field.values() {
        if !raw.is_empty() && !allowed.iter().any(|value| value == raw) {
            return Err(ArgumentError::InvalidValue {
                property: field.property().to_string(),
                allowed: allowed.to_vec(),
                given: raw.to_string(),
            });
        }
    }

    let value = coerce(raw, field.types()).map_err(|failure| ArgumentError::UnableToCast {
        property: field.property().to_string(),
        token: raw.to_string(),
        types: field.types().clone(),
        failure,
    })?;

    if validate {
        run_chain(field.validators(), value).map_err(|message| ArgumentError::FailedValidation {
            property: field.property().to_string(),
            message,
        })
    } else {
        Ok(value)
    }
}
