//! Derive Api for `declarg` configuration.
//!
//! ### Getting Started
//! Instrument a struct `S` with `#[derive(Bindable)]`, and implement [`Command`](crate::Command) for the work itself.
//! This generates the [`Bindable`](crate::Bindable) implementation: `S::declaration()` reads the declared fields
//! (with the current field values as their defaults), and `S::assign(..)` writes bound values back.
//!
//! ```no_run
#![doc = include_str!("../demos/copy.rs")]
//! ```
//!
//! ### Field Configuration
//! A field takes part in the command line when it carries a `#[declarg(..)]` attribute,
//! or when its doc comment has an `@argument`, `@option` or `@rest` line.
//! The structured attributes, which may be combined and split across several `#[declarg(..)]`:
//! * `argument`, `option` or `rest`, to mark the field's role.
//! A field may not be both an option and an argument/rest-argument.
//! * `option = "name"` or `option = ["name", "n"]`, to set the option names.
//! Without names, the option is named by the field and its first character.
//! * `values = ["a", "b"]`, to constrain the raw tokens accepted.
//! * `kind = "int|null"`, to declare the type list explicitly.
//! * `description = ".."`, to describe the field.
//! * `validate = expr`, to append a [`Validator`](crate::Validator) (repeatable; run in order).
//!
//! The doc comment annotations, one per line:
//! ```console
//! @argument [description]
//! @option [name[, alias ..]]
//! @rest [description]
//! @values a, b, c
//! @var type
//! ```
//! The remaining doc lines become the field description.
//! Declaring the same marker twice on one field, whether through attributes or annotations, is a [`SchemaError`](crate::SchemaError).
//!
//! ### Type Inference
//! Without `kind = ..` or `@var`, the type list is inferred from the field type:
//! ```console
//! Type                               | Type list
//! -------------------------------------------------
//! String, &str, char, PathBuf        | string
//! i8 .. i64, u8 .. u64, isize, usize | int
//! f32, f64                           | float
//! bool                               | bool
//! Option<T>                          | T|null
//! Vec<T>, VecDeque<T>, HashSet<T>    | T[]
//! Value                              | from the default value
//! ```
//!
//! A rest-argument of type `T[]` binds each token as `T`.
//!
//! ### Command Configuration
//! * `#[declarg(name = "..")]` on the struct sets the command name (defaults to the struct name).
