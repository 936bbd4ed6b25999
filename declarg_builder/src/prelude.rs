//! The traits needed to implement or call [`Bindable`](crate::Bindable) by hand.
pub use crate::api::{FromValue, IntoValue, Validator};
