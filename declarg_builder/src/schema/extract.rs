use std::collections::HashMap;
use std::str::FromStr;

use crate::api::{CommandDeclaration, FieldDeclaration, Marker, MarkerKind, MarkerSource};
use crate::constant::DEFAULT_KIND;
use crate::error::SchemaError;
use crate::model::{is_list_of, split_union, Kind, TypeList, Value};
use crate::schema::annotation::{self, DocComment};
use crate::schema::{ArgumentDefinition, FieldDefinition, OptionDefinition, RestDefinition, Schema};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The markers of one field, after merging structured metadata with doc annotations.
#[derive(Debug, Default)]
struct FieldMarkers {
    argument: Option<Marker>,
    option: Option<Marker>,
    rest: Option<Marker>,
    values: Option<Vec<String>>,
    declared: Option<String>,
    body: String,
}

impl FieldMarkers {
    fn resolve(field: &FieldDeclaration) -> Result<Self, SchemaError> {
        let DocComment { markers, body } = field
            .doc_text()
            .map(annotation::parse)
            .unwrap_or_default();
        // Structured metadata first, so it is the 'first' in any duplicate report.
        let sourced = field.markers().iter().cloned().chain(
            markers
                .into_iter()
                .map(|marker| (MarkerSource::DocAnnotation, marker)),
        );
        let mut seen: HashMap<MarkerKind, (MarkerSource, Marker)> = HashMap::default();

        for (source, marker) in sourced {
            let kind = marker.marker_kind();

            if let Some((first, _)) = seen.get(&kind) {
                return Err(SchemaError::DuplicateAttribute {
                    property: field.name().to_string(),
                    kind,
                    first: *first,
                    second: source,
                });
            }

            seen.insert(kind, (source, marker));
        }

        let mut take = |kind: MarkerKind| seen.remove(&kind).map(|(_, marker)| marker);
        let argument = take(MarkerKind::Argument);
        let option = take(MarkerKind::Option);
        let rest = take(MarkerKind::Rest);
        let values = match take(MarkerKind::Values) {
            Some(Marker::Values(values)) if !values.is_empty() => Some(values),
            _ => None,
        };
        let declared = match take(MarkerKind::Type) {
            Some(Marker::Type(declared)) if !declared.trim().is_empty() => Some(declared),
            _ => None,
        };

        Ok(Self {
            argument,
            option,
            rest,
            values,
            declared,
            body,
        })
    }

    fn check_conflicts(&self, property: &str) -> Result<(), SchemaError> {
        if self.option.is_some() {
            let other = if self.argument.is_some() {
                Some(MarkerKind::Argument)
            } else if self.rest.is_some() {
                Some(MarkerKind::Rest)
            } else {
                None
            };

            if let Some(right) = other {
                return Err(SchemaError::AttributeConflict {
                    property: property.to_string(),
                    left: MarkerKind::Option,
                    right,
                });
            }
        }

        Ok(())
    }

    fn description(&self, role: &Marker) -> String {
        let head = role.description().unwrap_or_default().trim();

        match (head.is_empty(), self.body.is_empty()) {
            (true, _) => self.body.clone(),
            (false, true) => head.to_string(),
            (false, false) => format!("{head}\n\n{}", self.body),
        }
    }
}

/// The declared type by priority: explicit declaration, static type hint, default value, `string`.
fn declared_type(field: &FieldDeclaration, markers: &FieldMarkers) -> String {
    if let Some(declared) = &markers.declared {
        return declared.clone();
    }

    if let Some(hint) = field.hint().filter(|hint| !hint.trim().is_empty()) {
        return hint.to_string();
    }

    match field.default() {
        Value::Null => DEFAULT_KIND.to_string(),
        other => other.kind().to_string(),
    }
}

fn unknown_type(property: &str, declared: &str) -> SchemaError {
    SchemaError::UnknownType {
        property: property.to_string(),
        declared: declared.to_string(),
    }
}

fn field_types(property: &str, declared: &str) -> Result<TypeList, SchemaError> {
    TypeList::parse(declared).map_err(|_| unknown_type(property, declared))
}

/// Rest items are typed by the list's element type: `T[]` collapses to `T`, and a generic
/// `array` is refined from the kinds present in the default value (`string` if there are none).
fn rest_types(property: &str, declared: &str, default: &Value) -> Result<TypeList, SchemaError> {
    let mut kinds = Vec::default();
    let mut nullable = false;

    for part in split_union(declared).into_iter().map(str::trim).filter(|p| !p.is_empty()) {
        let part = match part.strip_prefix('?') {
            Some(bare) => {
                nullable = true;
                bare
            }
            None => part,
        };

        if let Some(element) = is_list_of(part) {
            kinds.extend_from_slice(field_types(property, element)?.kinds());
            continue;
        }

        match Kind::from_str(part) {
            Ok(Kind::Array) => match default {
                Value::List(items) if !items.is_empty() => {
                    kinds.extend(items.iter().map(Value::kind));
                }
                _ => kinds.push(Kind::String),
            },
            Ok(kind) => kinds.push(kind),
            Err(_) => return Err(unknown_type(property, declared)),
        }
    }

    if nullable {
        kinds.push(Kind::Null);
    }

    Ok(TypeList::new(kinds))
}

/// Option names without dashes, de-duplicated; `[field, first character]` when none are given.
fn option_names(property: &str, declared: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::default();

    for name in declared {
        push_name(&mut names, name.trim().trim_start_matches('-'));
    }

    if names.is_empty() {
        push_name(&mut names, property);

        if let Some(first) = property.chars().next() {
            push_name(&mut names, &first.to_string());
        }
    }

    names
}

fn push_name(names: &mut Vec<String>, name: &str) {
    if !name.is_empty() && !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

/// Build the schema of a command from its declaration.
///
/// Fields without an argument, option or rest marker are not part of the command line.
///
/// ### Example
/// ```
/// # use declarg_builder as declarg;
/// use declarg::{extract, CommandDeclaration, FieldDeclaration, Marker};
///
/// let declaration = CommandDeclaration::new("copy")
///     .field(FieldDeclaration::new("source").marker(Marker::argument()))
///     .field(FieldDeclaration::new("force").marker(Marker::option(Vec::<String>::new())).type_hint("bool"))
///     .field(FieldDeclaration::new("extra").doc("@rest\nAnything else."));
///
/// let schema = extract(&declaration).unwrap();
/// assert_eq!(schema.arguments()[0].property(), "source");
/// assert_eq!(schema.options()[0].names(), &["force".to_string(), "f".to_string()]);
/// assert_eq!(schema.rest().unwrap().description(), "Anything else.");
/// ```
pub fn extract(declaration: &CommandDeclaration) -> Result<Schema, SchemaError> {
    let mut arguments = Vec::default();
    let mut options: Vec<OptionDefinition> = Vec::default();
    let mut rest: Option<RestDefinition> = None;
    let mut option_owners: HashMap<String, String> = HashMap::default();

    for field in declaration.fields() {
        let property = field.name();
        let markers = FieldMarkers::resolve(field)?;
        markers.check_conflicts(property)?;

        if markers.argument.is_none() && markers.option.is_none() && markers.rest.is_none() {
            continue;
        }

        let declared = declared_type(field, &markers);
        let definition = |role: &Marker, types: TypeList| {
            FieldDefinition::new(
                property,
                markers.description(role),
                types,
                markers.values.clone(),
                field.validators().to_vec(),
                field.default().clone(),
            )
        };

        if let Some(marker) = &markers.option {
            let names = match marker {
                Marker::Option { names, .. } => option_names(property, names),
                _ => unreachable!("internal error - option slot must hold an option marker"),
            };

            for name in &names {
                if let Some(first) = option_owners.insert(name.clone(), property.to_string()) {
                    return Err(SchemaError::DuplicateOptionName {
                        name: name.clone(),
                        first,
                        second: property.to_string(),
                    });
                }
            }

            let option = OptionDefinition::new(
                definition(marker, field_types(property, &declared)?),
                names,
            );

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Extracted option {option:?} as {:?}.", option.names());
            }

            options.push(option);
        }

        if let Some(marker) = &markers.argument {
            let argument =
                ArgumentDefinition::new(definition(marker, field_types(property, &declared)?));

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Extracted argument #{} {argument:?}.", arguments.len());
            }

            arguments.push(argument);
        }

        if let Some(marker) = &markers.rest {
            let types = rest_types(property, &declared, field.default())?;
            let _replaced = rest.replace(RestDefinition::new(definition(marker, types)));

            #[cfg(feature = "tracing_debug")]
            {
                if let Some(replaced) = &_replaced {
                    debug!("Rest-argument {property} replaces {}.", replaced.property());
                }
            }
        }
    }

    Ok(Schema::new(arguments, options, rest))
}
