use std::collections::{BTreeSet, HashSet, VecDeque};
use std::path::PathBuf;

use crate::coerce::cast;
use crate::model::{Kind, Value};

/// Behaviour to describe a field's current value, used as its default.
pub trait IntoValue {
    fn to_value(&self) -> Value;
}

/// Behaviour to assign a bound [`Value`] onto a typed field.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, String>;
}

impl IntoValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, String> {
        Ok(value)
    }
}

impl IntoValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl IntoValue for &str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Str(value) => Ok(value),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => Ok(value.to_string()),
            other => Err(mismatch(&other, "a string")),
        }
    }
}

impl IntoValue for char {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl FromValue for char {
    fn from_value(value: Value) -> Result<Self, String> {
        let text = String::from_value(value)?;
        let mut chars = text.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(format!("'{text}' is not a single character")),
        }
    }
}

impl IntoValue for PathBuf {
    fn to_value(&self) -> Value {
        Value::Str(self.display().to_string())
    }
}

impl FromValue for PathBuf {
    fn from_value(value: Value) -> Result<Self, String> {
        String::from_value(value).map(PathBuf::from)
    }
}

impl IntoValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Bool(value) => Ok(value),
            Value::Int(value) => Ok(value != 0),
            Value::Str(ref token) => match cast(token, Kind::Bool) {
                Ok(Value::Bool(value)) => Ok(value),
                _ => Err(mismatch(&value, "a bool")),
            },
            other => Err(mismatch(&other, "a bool")),
        }
    }
}

macro_rules! integer_value {
    ($($t:ty),*) => {
        $(
            impl IntoValue for $t {
                fn to_value(&self) -> Value {
                    match i64::try_from(*self) {
                        Ok(value) => Value::Int(value),
                        Err(_) => Value::Str(self.to_string()),
                    }
                }
            }

            impl FromValue for $t {
                fn from_value(value: Value) -> Result<Self, String> {
                    let target = stringify!($t);
                    match value {
                        Value::Int(n) => <$t>::try_from(n)
                            .map_err(|_| format!("{n} is out of range for {target}")),
                        Value::Str(ref token) => token
                            .parse::<$t>()
                            .map_err(|_| mismatch(&value, target)),
                        other => Err(mismatch(&other, target)),
                    }
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_value {
    ($($t:ty),*) => {
        $(
            impl IntoValue for $t {
                fn to_value(&self) -> Value {
                    Value::Float(*self as f64)
                }
            }

            impl FromValue for $t {
                fn from_value(value: Value) -> Result<Self, String> {
                    let target = stringify!($t);
                    match value {
                        Value::Float(n) => Ok(n as $t),
                        Value::Int(n) => Ok(n as $t),
                        Value::Str(ref token) => token
                            .parse::<$t>()
                            .map_err(|_| mismatch(&value, target)),
                        other => Err(mismatch(&other, target)),
                    }
                }
            }
        )*
    };
}

float_value!(f32, f64);

impl<T: IntoValue> IntoValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

fn from_list<T: FromValue>(value: Value) -> Result<Vec<T>, String> {
    match value {
        Value::List(values) => values.into_iter().map(T::from_value).collect(),
        Value::Null => Ok(Vec::default()),
        other => T::from_value(other).map(|single| vec![single]),
    }
}

macro_rules! collection_value {
    ($($c:ident $(: $bound:path)*),*) => {
        $(
            impl<T: IntoValue> IntoValue for $c<T> {
                fn to_value(&self) -> Value {
                    Value::List(self.iter().map(IntoValue::to_value).collect())
                }
            }

            impl<T: FromValue $(+ $bound)*> FromValue for $c<T> {
                fn from_value(value: Value) -> Result<Self, String> {
                    from_list(value).map(|items: Vec<T>| items.into_iter().collect())
                }
            }
        )*
    };
}

collection_value!(Vec, VecDeque, HashSet: Eq: std::hash::Hash, BTreeSet: Ord);

fn mismatch(value: &Value, expected: &str) -> String {
    format!("expected {expected}, found {kind} '{value}'", kind = value.kind())
}
