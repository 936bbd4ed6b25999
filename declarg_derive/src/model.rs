use proc_macro2::TokenStream as TokenStream2;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.to_string() == other.tokens.to_string()
    }
}

impl Eq for DeriveValue {}

/// The raw content of one or more `#[declarg(..)]` attributes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IntermediateAttributes {
    pub singletons: Vec<String>,
    pub pairs: HashMap<String, Vec<DeriveValue>>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeriveMarker {
    Argument,
    /// Names as an array expression; `None` for the default names.
    Option(Option<DeriveValue>),
    Rest,
    /// Allowed values as an array expression.
    Values(DeriveValue),
    Kind(DeriveValue),
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveField {
    pub field_name: syn::Ident,
    pub markers: Vec<DeriveMarker>,
    pub description: Option<DeriveValue>,
    pub validators: Vec<DeriveValue>,
    pub doc: Option<String>,
    pub type_hint: Option<String>,
}

pub struct DeriveCommand {
    pub struct_name: syn::Ident,
    pub generics: syn::Generics,
    pub command_name: DeriveValue,
    pub fields: Vec<DeriveField>,
}
