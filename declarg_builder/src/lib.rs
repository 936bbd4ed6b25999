//! Builder module for `declarg`.
//! See the `declarg` crate for the derive based usage.
//!
//! The flow of a single invocation:
//! 1. A [`CommandDeclaration`] describes the command's fields.
//! 2. [`extract`] normalizes it into a [`Schema`], merging structured markers with `@tag` doc annotations.
//! 3. A [`ParameterBinder`] binds the command line tokens against the schema into [`Bindings`].
//! 4. [`bind`] writes the bindings onto a [`Bindable`], and [`Invocation`] runs the [`Command`].
mod api;
mod binder;
mod coerce;
mod constant;
mod error;
mod model;
mod parser;
pub mod prelude;
mod schema;

pub use api::*;
pub use binder::{Bindings, ParameterBinder};
pub use coerce::{cast, coerce, CastFailure};
pub use error::*;
pub use model::*;
pub use parser::*;
pub use schema::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
