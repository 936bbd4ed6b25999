//! `declarg` binds command line tokens onto the fields of a command.
//!
//! A command is a plain struct.
//! Each field is declared, either with `#[declarg(..)]` attributes or with `@tag` lines in its doc comment, as one of:
//! * *argument*: a positional value, bound in field order.
//! * *option*: a named value given as `--name value`, `--name=value`, `-n value` or `-n=value`.
//! Boolean options are flags (`--verbose`, `-v`) and may be grouped (`-hv`).
//! * *rest-argument*: a single field absorbing every positional token beyond the arguments.
//!
//! Fields that are not declared are left alone.
//!
//! Every raw token is coerced against the field's declared type list (ex: `int|float`, `?string`, `bool`) in order;
//! the first type that accepts the token wins.
//! Fields may further constrain the raw tokens they accept (`values`), and run a chain of [`Validator`]s that may replace the bound value.
//!
//! # Usage
//! via the [derive Api](./derive/index.html):
//! ```no_run
#![doc = include_str!("../demos/level.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ level server -l high --count 2
//! server: high (x2)
//!
//! $ level server --level=over-high
//! The parameter level must be one of the following values: [low, medium, high]; 'over-high' given.
//!
//! $ level server -vl high
//! -l option is not a boolean, so you can't use it in an aliases group
//!
//! $ level a b
//! Expect only 1 argument
//! ```
//!
//! # Builder Api
//! The derive Api generates a [`Bindable`] implementation, which describes the command as a [`CommandDeclaration`].
//! The same declaration may be written by hand:
//! ```
//! use declarg::{extract, CommandDeclaration, FieldDeclaration, Marker, ParameterBinder, Value};
//!
//! let declaration = CommandDeclaration::new("summer")
//!     .field(
//!         FieldDeclaration::new("items")
//!             .marker(Marker::rest().describe("The items to sum."))
//!             .type_hint("int[]"),
//!     )
//!     .field(FieldDeclaration::new("quiet").doc("@option quiet, q").type_hint("bool"));
//!
//! let schema = extract(&declaration).unwrap();
//! let bindings = ParameterBinder::new(&schema).bind(&["1", "-q", "2"]).unwrap();
//! assert_eq!(bindings.rest(), &[Value::Int(1), Value::Int(2)]);
//! assert_eq!(bindings.option("quiet"), Some(&Value::Bool(true)));
//! ```
//!
//! # Errors
//! Declaration mistakes are reported as [`SchemaError`], before any token is read.
//! Malformed input is reported as [`ArgumentError`].
//! Both carry a stable [`code`](InvocationError::code) next to their message.
//! [`Invocation::execute`] writes the message to the [`Writer`] with [`Style::Error`] and returns `1`;
//! [`Invocation::try_execute`] hands the error back instead.
//!
//! # Features
//! * `tracing_debug`: log the extraction, binding and validation steps via `tracing`.
//! * `unit_test`: expose `InMemoryWriter`, for asserting on command output in tests.
pub use declarg_builder::*;

pub mod derive;
pub use declarg_derive::Bindable;
