extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveCommand;
use proc_macro::TokenStream;

/// Derive `declarg::Bindable` for a struct with named fields.
///
/// See the `declarg::derive` module for the attribute reference.
#[proc_macro_derive(Bindable, attributes(declarg))]
pub fn bindable(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveCommand::try_from(derive_input) {
        Ok(command) => command.generate().into(),
        Err(error) => error.to_compile_error().into(),
    }
}
