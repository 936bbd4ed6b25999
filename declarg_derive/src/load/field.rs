use crate::load::attribute_error;
use crate::model::{DeriveField, DeriveMarker, DeriveValue, IntermediateAttributes};
use quote::quote;
use syn::spanned::Spanned;

const ROLE_TAGS: [&str; 3] = ["@argument", "@option", "@rest"];

impl DeriveField {
    /// Load a named field; `None` when nothing marks it as part of the command line.
    pub(crate) fn load(value: &syn::Field) -> Result<Option<Self>, syn::Error> {
        let field_name = value
            .ident
            .clone()
            .ok_or_else(|| attribute_error(value.span(), "only named fields may be bound"))?;
        let attributes = IntermediateAttributes::collect(&value.attrs)?;
        let doc = collect_doc(&value.attrs);

        let attributes = match attributes {
            Some(attributes) => attributes,
            None if doc.as_deref().is_some_and(declares_role) => IntermediateAttributes::default(),
            None => return Ok(None),
        };

        let mut markers = Vec::default();

        for singleton in &attributes.singletons {
            markers.push(match singleton.as_str() {
                "argument" => DeriveMarker::Argument,
                "option" => DeriveMarker::Option(None),
                "rest" => DeriveMarker::Rest,
                other => {
                    return Err(attribute_error(
                        field_name.span(),
                        format!("unknown attribute `{other}` on `{field_name}`"),
                    ))
                }
            });
        }

        let mut description = None;
        let mut validators = Vec::default();
        let mut keys: Vec<&String> = attributes.pairs.keys().collect();
        keys.sort();

        for key in keys {
            let values = &attributes.pairs[key];

            match key.as_str() {
                "option" => markers.extend(
                    values
                        .iter()
                        .map(|v| DeriveMarker::Option(Some(as_array(v)))),
                ),
                "values" => markers.extend(values.iter().map(|v| DeriveMarker::Values(as_array(v)))),
                "kind" => markers.extend(values.iter().cloned().map(DeriveMarker::Kind)),
                "validate" => validators.extend(values.iter().cloned()),
                "description" => {
                    if values.len() > 1 {
                        return Err(attribute_error(
                            field_name.span(),
                            format!("`{field_name}` cannot repeat `description`"),
                        ));
                    }

                    description = values.first().cloned();
                }
                other => {
                    return Err(attribute_error(
                        field_name.span(),
                        format!("unknown attribute `{other} = ..` on `{field_name}`"),
                    ))
                }
            }
        }

        Ok(Some(DeriveField {
            field_name,
            markers,
            description,
            validators,
            doc,
            type_hint: infer_kind(&value.ty),
        }))
    }
}

/// Wrap a lone expression (ex: `"x"`) as a one element array.
fn as_array(value: &DeriveValue) -> DeriveValue {
    match syn::parse2::<syn::ExprArray>(value.tokens.clone()) {
        Ok(_) => value.clone(),
        Err(_) => {
            let tokens = &value.tokens;
            DeriveValue {
                tokens: quote! { [#tokens] },
            }
        }
    }
}

/// The `///` lines of a field, one leading space removed per line.
fn collect_doc(attributes: &[syn::Attribute]) -> Option<String> {
    let lines: Vec<String> = attributes
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            syn::Meta::NameValue(syn::MetaNameValue {
                value:
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(text),
                        ..
                    }),
                ..
            }) => Some(text.value()),
            _ => None,
        })
        .collect();

    if lines.is_empty() {
        return None;
    }

    Some(
        lines
            .iter()
            .flat_map(|line| line.split('\n'))
            .map(|line| line.strip_prefix(' ').unwrap_or(line))
            .collect::<Vec<&str>>()
            .join("\n"),
    )
}

fn declares_role(doc: &str) -> bool {
    doc.lines()
        .filter_map(|line| line.split_whitespace().next())
        .any(|tag| ROLE_TAGS.contains(&tag))
}

fn generic_argument(segment: &syn::PathSegment) -> Option<&syn::Type> {
    match &segment.arguments {
        syn::PathArguments::AngleBracketed(arguments) => {
            arguments.args.iter().find_map(|argument| match argument {
                syn::GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
        }
        _ => None,
    }
}

/// The declared type implied by the Rust field type, if it is a known one.
fn infer_kind(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Reference(reference) => infer_kind(&reference.elem),
        syn::Type::Group(group) => infer_kind(&group.elem),
        syn::Type::Paren(paren) => infer_kind(&paren.elem),
        syn::Type::Path(path) => {
            let segment = path.path.segments.last()?;

            match segment.ident.to_string().as_str() {
                "String" | "str" | "char" | "PathBuf" => Some("string".to_string()),
                "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
                    Some("int".to_string())
                }
                "f32" | "f64" => Some("float".to_string()),
                "bool" => Some("bool".to_string()),
                "Option" => {
                    infer_kind(generic_argument(segment)?).map(|inner| format!("{inner}|null"))
                }
                "Vec" | "VecDeque" | "HashSet" | "BTreeSet" => {
                    match generic_argument(segment).and_then(infer_kind) {
                        Some(inner) if !inner.contains('|') => Some(format!("{inner}[]")),
                        _ => Some("array".to_string()),
                    }
                }
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn load(field: syn::Field) -> Option<DeriveField> {
        DeriveField::load(&field).unwrap()
    }

    #[test]
    fn load_unmarked() {
        assert_eq!(load(parse_quote! { cache: Vec<String> }), None);
        assert_eq!(
            load(parse_quote! {
                /// Just a comment, with an @argument in the middle.
                cache: Vec<String>
            }),
            None
        );
    }

    #[test]
    fn load_singletons() {
        // Setup
        let field: syn::Field = parse_quote! {
            #[declarg(argument, rest)]
            files: Vec<String>
        };

        // Execute
        let derive_field = load(field).unwrap();

        // Verify
        assert_eq!(derive_field.field_name.to_string(), "files");
        assert_eq!(
            derive_field.markers,
            vec![DeriveMarker::Argument, DeriveMarker::Rest]
        );
        assert_eq!(derive_field.type_hint, Some("string[]".to_string()));
        assert_eq!(derive_field.doc, None);
    }

    #[test]
    fn load_pairs() {
        // Setup
        let field: syn::Field = parse_quote! {
            #[declarg(option = "lvl", values = ["low", "high"], kind = "string", description = "Loudness.")]
            #[declarg(validate = first, validate = second)]
            level: String
        };

        // Execute
        let derive_field = load(field).unwrap();

        // Verify
        let tokens: Vec<String> = derive_field
            .markers
            .iter()
            .map(|marker| match marker {
                DeriveMarker::Option(Some(v)) | DeriveMarker::Values(v) | DeriveMarker::Kind(v) => {
                    v.tokens.to_string()
                }
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            tokens,
            vec![
                "\"string\"".to_string(),
                "[\"lvl\"]".to_string(),
                "[\"low\" , \"high\"]".to_string(),
            ]
        );
        assert_eq!(
            derive_field.description.unwrap().tokens.to_string(),
            "\"Loudness.\""
        );
        assert_eq!(
            derive_field
                .validators
                .iter()
                .map(|v| v.tokens.to_string())
                .collect::<Vec<_>>(),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[test]
    fn load_doc() {
        // Setup
        let field: syn::Field = parse_quote! {
            /// @option verbose, v
            /// Talk more.
            ///
            ///   Indented.
            verbose: bool
        };

        // Execute
        let derive_field = load(field).unwrap();

        // Verify
        assert_eq!(derive_field.markers, vec![]);
        assert_eq!(
            derive_field.doc,
            Some("@option verbose, v\nTalk more.\n\n  Indented.".to_string())
        );
        assert_eq!(derive_field.type_hint, Some("bool".to_string()));
    }

    #[test]
    fn load_doc_multiline_attribute() {
        let field: syn::Field = parse_quote! {
            #[doc = " @argument\n Source file.\n\n Must exist."]
            source: String
        };

        let derive_field = load(field).unwrap();
        assert_eq!(
            derive_field.doc,
            Some("@argument\nSource file.\n\nMust exist.".to_string())
        );
    }

    #[test]
    fn load_invalid() {
        let field: syn::Field = parse_quote! {
            #[declarg(positional)]
            name: String
        };
        assert!(DeriveField::load(&field).is_err());

        let field: syn::Field = parse_quote! {
            #[declarg(short = "n")]
            name: String
        };
        assert!(DeriveField::load(&field).is_err());

        let field: syn::Field = parse_quote! {
            #[declarg(argument, description = "a", description = "b")]
            name: String
        };
        assert!(DeriveField::load(&field).is_err());
    }

    #[rstest::rstest]
    #[case(parse_quote! { String }, Some("string"))]
    #[case(parse_quote! { &'static str }, Some("string"))]
    #[case(parse_quote! { std::path::PathBuf }, Some("string"))]
    #[case(parse_quote! { char }, Some("string"))]
    #[case(parse_quote! { u16 }, Some("int"))]
    #[case(parse_quote! { i64 }, Some("int"))]
    #[case(parse_quote! { f32 }, Some("float"))]
    #[case(parse_quote! { bool }, Some("bool"))]
    #[case(parse_quote! { Option<u8> }, Some("int|null"))]
    #[case(parse_quote! { Option<Vec<f64>> }, Some("float[]|null"))]
    #[case(parse_quote! { Option<Value> }, None)]
    #[case(parse_quote! { Vec<String> }, Some("string[]"))]
    #[case(parse_quote! { std::collections::HashSet<i32> }, Some("int[]"))]
    #[case(parse_quote! { Vec<Option<i32>> }, Some("array"))]
    #[case(parse_quote! { Vec<Value> }, Some("array"))]
    #[case(parse_quote! { declarg::Value }, None)]
    #[case(parse_quote! { (u8, u8) }, None)]
    fn infer_kinds(#[case] ty: syn::Type, #[case] expected: Option<&str>) {
        assert_eq!(infer_kind(&ty), expected.map(str::to_string));
    }
}
