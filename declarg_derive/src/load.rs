mod attribute;
mod command;
mod field;

pub(self) const ATTRIBUTE: &str = "declarg";

pub(self) fn attribute_error(span: proc_macro2::Span, message: impl std::fmt::Display) -> syn::Error {
    syn::Error::new(span, format!("Invalid - {message}."))
}
