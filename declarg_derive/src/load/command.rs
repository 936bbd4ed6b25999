use crate::load::attribute_error;
use crate::model::{DeriveCommand, DeriveField, DeriveValue, IntermediateAttributes};
use quote::quote;

impl TryFrom<syn::DeriveInput> for DeriveCommand {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let struct_name = value.ident;
        let mut attributes = IntermediateAttributes::collect(&value.attrs)?.unwrap_or_default();

        if let Some(singleton) = attributes.singletons.first() {
            return Err(attribute_error(
                struct_name.span(),
                format!("unknown attribute `{singleton}` on `{struct_name}`"),
            ));
        }

        let command_name = match attributes.pairs.remove("name") {
            Some(mut values) if values.len() == 1 => values.remove(0),
            Some(_) => {
                return Err(attribute_error(
                    struct_name.span(),
                    format!("`{struct_name}` cannot repeat `name`"),
                ))
            }
            None => {
                let name = struct_name.to_string();
                DeriveValue {
                    tokens: quote! { #name },
                }
            }
        };

        if let Some(key) = attributes.pairs.keys().next() {
            return Err(attribute_error(
                struct_name.span(),
                format!("unknown attribute `{key} = ..` on `{struct_name}`"),
            ));
        }

        let fields = match &value.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(named),
                ..
            }) => {
                let mut fields = Vec::default();

                for field in &named.named {
                    if let Some(derive_field) = DeriveField::load(field)? {
                        fields.push(derive_field);
                    }
                }

                fields
            }
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Unit,
                ..
            }) => Vec::default(),
            _ => {
                return Err(attribute_error(
                    struct_name.span(),
                    "Bindable may only be derived for structs with named fields",
                ))
            }
        };

        Ok(DeriveCommand {
            struct_name,
            generics: value.generics,
            command_name,
            fields,
        })
    }
}
