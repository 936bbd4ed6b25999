use crate::model::{DeriveCommand, DeriveField, DeriveMarker, DeriveValue};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl DeriveMarker {
    fn generate(&self, description: Option<&DeriveValue>) -> TokenStream2 {
        let marker = match self {
            DeriveMarker::Argument => quote! { ::declarg::Marker::argument() },
            DeriveMarker::Option(None) => quote! {
                ::declarg::Marker::option(::std::vec::Vec::<::std::string::String>::new())
            },
            DeriveMarker::Option(Some(names)) => {
                let names = &names.tokens;
                quote! { ::declarg::Marker::option(#names) }
            }
            DeriveMarker::Rest => quote! { ::declarg::Marker::rest() },
            DeriveMarker::Values(values) => {
                let values = &values.tokens;
                return quote! { ::declarg::Marker::values(#values) };
            }
            DeriveMarker::Kind(kind) => {
                let kind = &kind.tokens;
                return quote! { ::declarg::Marker::kind(#kind) };
            }
        };

        match description {
            Some(description) => {
                let description = &description.tokens;
                quote! { #marker.describe(#description) }
            }
            None => marker,
        }
    }
}

impl DeriveField {
    fn generate_declaration(&self) -> TokenStream2 {
        let DeriveField {
            field_name,
            markers,
            description,
            validators,
            doc,
            type_hint,
        } = self;
        let field_name_str = field_name.to_string();
        let type_hint = type_hint.iter();
        let doc = doc.iter();
        let markers = markers
            .iter()
            .map(|marker| marker.generate(description.as_ref()));
        let validators = validators.iter().map(|validator| &validator.tokens);

        quote! {
            ::declarg::FieldDeclaration::new(#field_name_str)
                .default_value(::declarg::prelude::IntoValue::to_value(&self.#field_name))
                #( .type_hint(#type_hint) )*
                #( .doc(#doc) )*
                #( .marker(#markers) )*
                #( .validator(#validators) )*
        }
    }

    fn generate_assign(&self) -> TokenStream2 {
        let field_name = &self.field_name;
        let field_name_str = field_name.to_string();

        quote! {
            #field_name_str => {
                self.#field_name = ::declarg::prelude::FromValue::from_value(value).map_err(|reason| {
                    ::declarg::AssignError::Conversion {
                        property: #field_name_str.to_string(),
                        reason,
                    }
                })?;
                ::std::result::Result::Ok(())
            }
        }
    }
}

impl DeriveCommand {
    pub(crate) fn generate(self) -> TokenStream2 {
        let DeriveCommand {
            struct_name,
            generics,
            command_name,
            fields,
        } = self;
        let (impl_generics, type_generics, where_clause) = generics.split_for_impl();
        let command_name = command_name.tokens;
        let declarations = fields.iter().map(DeriveField::generate_declaration);
        let assignments = fields.iter().map(DeriveField::generate_assign);

        quote! {
            impl #impl_generics ::declarg::Bindable for #struct_name #type_generics #where_clause {
                fn declaration(&self) -> ::declarg::CommandDeclaration {
                    ::declarg::CommandDeclaration::new(#command_name)
                        #( .field(#declarations) )*
                }

                #[allow(unused_variables)]
                fn assign(
                    &mut self,
                    property: &str,
                    value: ::declarg::Value,
                ) -> ::std::result::Result<(), ::declarg::AssignError> {
                    match property {
                        #( #assignments )*
                        _ => ::std::result::Result::Err(::declarg::AssignError::UnknownProperty(
                            property.to_string(),
                        )),
                    }
                }
            }
        }
    }
}
