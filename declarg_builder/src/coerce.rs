use thiserror::Error;

use crate::model::{Kind, TypeList, Value};

#[cfg(feature = "tracing_debug")]
use tracing::trace;

/// Why a raw token could not be cast into one specific [`Kind`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert '{token}' to {kind}: {reason}")]
pub struct CastFailure {
    pub token: String,
    pub kind: Kind,
    pub reason: String,
}

impl CastFailure {
    fn new(token: &str, kind: Kind, reason: impl Into<String>) -> Self {
        Self {
            token: token.to_string(),
            kind,
            reason: reason.into(),
        }
    }
}

// Compared ASCII case-insensitively.
const FALSY: [&str; 5] = ["", "0", "false", "off", "no"];

/// Cast a raw token into a single kind.
///
/// * `bool`: always succeeds; `""`, `"0"`, `"false"`, `"off"` and `"no"` are `false`, anything else is `true`.
/// * `int`: strict `i64` parse.
/// * `float`: strict `f64` parse, rejecting non-finite results.
/// * `null`: succeeds for `""` and `"null"` only.
/// * `string`: identity.
/// * `array`: wraps the token in a one element list.
pub fn cast(token: &str, kind: Kind) -> Result<Value, CastFailure> {
    match kind {
        Kind::String => Ok(Value::Str(token.to_string())),
        Kind::Bool => Ok(Value::Bool(
            !FALSY.iter().any(|falsy| falsy.eq_ignore_ascii_case(token)),
        )),
        Kind::Int => token
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|error| CastFailure::new(token, kind, error.to_string())),
        Kind::Float => match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Value::Float(value)),
            Ok(_) => Err(CastFailure::new(token, kind, "value is not finite")),
            Err(error) => Err(CastFailure::new(token, kind, error.to_string())),
        },
        Kind::Null => {
            if token.is_empty() || token.eq_ignore_ascii_case("null") {
                Ok(Value::Null)
            } else {
                Err(CastFailure::new(token, kind, "not a null representation"))
            }
        }
        Kind::Array => Ok(Value::List(vec![Value::Str(token.to_string())])),
    }
}

/// Cast a raw token against each candidate in order; the first success wins.
///
/// When every candidate fails, the first failure is returned.
pub fn coerce(token: &str, types: &TypeList) -> Result<Value, CastFailure> {
    let mut first_failure: Option<CastFailure> = None;

    for kind in types.kinds() {
        match cast(token, *kind) {
            Ok(value) => {
                #[cfg(feature = "tracing_debug")]
                {
                    trace!("Coerced '{token}' into {kind}.");
                }

                return Ok(value);
            }
            Err(failure) => {
                if first_failure.is_none() {
                    first_failure.replace(failure);
                }
            }
        }
    }

    Err(first_failure.expect("internal error - a type list is never empty"))
}
