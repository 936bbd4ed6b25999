use crate::load::{attribute_error, ATTRIBUTE};
use crate::model::{DeriveValue, IntermediateAttributes};
use quote::ToTokens;
use syn::spanned::Spanned;

impl TryFrom<&syn::Attribute> for IntermediateAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        let attributes_parser =
            syn::punctuated::Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;
        let expressions = value.parse_args_with(attributes_parser)?;
        let mut attributes = IntermediateAttributes::default();

        for expression in expressions {
            match expression {
                syn::Expr::Assign(assignment) => {
                    let left = assignment.left.to_token_stream();
                    attributes
                        .pairs
                        .entry(left.to_string())
                        .or_default()
                        .push(DeriveValue {
                            tokens: assignment.right.to_token_stream(),
                        });
                }
                syn::Expr::Path(path) if path.path.get_ident().is_some() => {
                    let ident = path.path.get_ident().expect("internal error - checked above");
                    attributes.singletons.push(ident.to_string());
                }
                other => {
                    return Err(attribute_error(
                        other.span(),
                        format!(
                            "unparseable #[{ATTRIBUTE}(..)] item `{}`",
                            other.to_token_stream()
                        ),
                    ));
                }
            };
        }

        Ok(attributes)
    }
}

impl IntermediateAttributes {
    /// Collect every `#[declarg(..)]` attribute, in order.
    pub(crate) fn collect(attributes: &[syn::Attribute]) -> Result<Option<Self>, syn::Error> {
        let mut merged: Option<Self> = None;

        for attribute in attributes.iter().filter(|a| a.path().is_ident(ATTRIBUTE)) {
            let next = IntermediateAttributes::try_from(attribute)?;
            let current = merged.get_or_insert_with(IntermediateAttributes::default);
            current.singletons.extend(next.singletons);

            for (key, values) in next.pairs {
                current.pairs.entry(key).or_default().extend(values);
            }
        }

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Literal;
    use std::collections::HashMap;
    use syn::parse_quote;

    #[test]
    fn construct_attributes_empty() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[declarg()]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(attributes, IntermediateAttributes::default());
    }

    #[test]
    fn construct_attributes() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[declarg(option, kind = "int", validate = check, validate = other)]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(attributes.singletons, vec!["option".to_string()]);
        assert_eq!(
            attributes.pairs.get("kind"),
            Some(&vec![DeriveValue {
                tokens: Literal::string("int").into_token_stream(),
            }])
        );
        assert_eq!(
            attributes
                .pairs
                .get("validate")
                .unwrap()
                .iter()
                .map(|v| v.tokens.to_string())
                .collect::<Vec<_>>(),
            vec!["check".to_string(), "other".to_string()]
        );
    }

    #[test]
    fn construct_attributes_array() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[declarg(option = ["level", "l"])]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(
            attributes.pairs.get("option").unwrap()[0].tokens.to_string(),
            "[\"level\" , \"l\"]"
        );
    }

    #[test]
    fn construct_attributes_invalid() {
        let attribute: syn::Attribute = parse_quote! {
            #[declarg]
        };
        assert!(IntermediateAttributes::try_from(&attribute).is_err());

        let attribute: syn::Attribute = parse_quote! {
            #[declarg(let boo = "boo")]
        };
        assert!(IntermediateAttributes::try_from(&attribute).is_err());
    }

    #[test]
    fn collect_attributes() {
        // Setup
        let field: syn::Field = parse_quote! {
            #[declarg(argument)]
            #[serde(skip)]
            #[declarg(rest, description = "abc")]
            items: Vec<String>
        };

        // Execute
        let attributes = IntermediateAttributes::collect(&field.attrs).unwrap().unwrap();

        // Verify
        assert_eq!(
            attributes,
            IntermediateAttributes {
                singletons: vec!["argument".to_string(), "rest".to_string()],
                pairs: HashMap::from([(
                    "description".to_string(),
                    vec![DeriveValue {
                        tokens: Literal::string("abc").into_token_stream(),
                    }]
                )]),
            }
        );
    }

    #[test]
    fn collect_attributes_none() {
        let field: syn::Field = parse_quote! {
            /// Docs only.
            name: String
        };
        assert_eq!(IntermediateAttributes::collect(&field.attrs).unwrap(), None);
    }
}
