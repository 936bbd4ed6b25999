use std::str::FromStr;
use thiserror::Error;

/// A value bound from the command line, after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value.
    Null,
    /// A boolean flag or a bool coerced token.
    Bool(bool),
    /// A strictly parsed integer.
    Int(i64),
    /// A strictly parsed, finite float.
    Float(f64),
    /// A raw token taken as-is.
    Str(String),
    /// A collection of values (rest-arguments, or list typed fields).
    List(Vec<Value>),
}

impl Value {
    /// The [`Kind`] this value is an instance of.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::String,
            Value::List(_) => Kind::Array,
        }
    }

    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The string content, when this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Str(value) => write!(f, "{value}"),
            Value::List(values) => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

/// The scalar type names a field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `string`
    String,
    /// `int` (synonym: `integer`)
    Int,
    /// `float` (synonyms: `double`, `decimal`)
    Float,
    /// `bool` (synonym: `boolean`)
    Bool,
    /// `null`
    Null,
    /// `array`, `list`, `T[]`, `array<T>` or `list<T>`
    Array,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown type '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();

        match normalized.as_str() {
            "string" | "str" => Ok(Kind::String),
            "int" | "integer" => Ok(Kind::Int),
            "float" | "double" | "decimal" => Ok(Kind::Float),
            "bool" | "boolean" => Ok(Kind::Bool),
            "null" => Ok(Kind::Null),
            "array" | "list" | "iterable" => Ok(Kind::Array),
            other if is_list_of(other).is_some() => Ok(Kind::Array),
            _ => Err(UnknownKind(value.trim().to_string())),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Null => "null",
            Kind::Array => "array",
        };
        write!(f, "{name}")
    }
}

/// Recognize the `T[]`, `array<T>` and `list<T>` markers, yielding `T`.
pub(crate) fn is_list_of(declared: &str) -> Option<&str> {
    let declared = declared.trim();

    if let Some(element) = declared.strip_suffix("[]") {
        return Some(element.trim());
    }

    for prefix in ["array<", "list<"] {
        let head_matches = declared
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));

        if head_matches {
            if let Some(element) = declared[prefix.len()..].strip_suffix('>') {
                return Some(element.trim());
            }
        }
    }

    None
}

/// Split a declaration on the `|` separators outside of any `<..>` element type.
pub(crate) fn split_union(declared: &str) -> Vec<&str> {
    let mut parts = Vec::default();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, c) in declared.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                parts.push(&declared[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    parts.push(&declared[start..]);
    parts
}

/// An ordered, de-duplicated list of candidate kinds.
///
/// Never empty: an empty declaration means `string`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeList(Vec<Kind>);

impl TypeList {
    /// Build from kinds in precedence order, dropping repeats.
    pub fn new(kinds: impl IntoIterator<Item = Kind>) -> Self {
        let mut out: Vec<Kind> = Vec::default();

        for kind in kinds {
            if !out.contains(&kind) {
                out.push(kind);
            }
        }

        if out.is_empty() {
            out.push(Kind::String);
        }

        Self(out)
    }

    /// Parse a pipe-delimited declaration such as `string|int` or `?float`.
    ///
    /// A `?` prefix on any member adds an implicit trailing `null` candidate.
    pub fn parse(declared: &str) -> Result<Self, UnknownKind> {
        let mut kinds = Vec::default();
        let mut nullable = false;

        for part in split_union(declared) {
            let part = part.trim();

            if part.is_empty() {
                continue;
            }

            let part = match part.strip_prefix('?') {
                Some(rest) => {
                    nullable = true;
                    rest
                }
                None => part,
            };

            kinds.push(Kind::from_str(part)?);
        }

        if nullable {
            kinds.push(Kind::Null);
        }

        Ok(Self::new(kinds))
    }

    pub fn kinds(&self) -> &[Kind] {
        &self.0
    }

    pub fn contains(&self, kind: Kind) -> bool {
        self.0.contains(&kind)
    }

    /// Whether this describes a flag: `bool`, optionally nullable.
    pub fn is_bool(&self) -> bool {
        self.contains(Kind::Bool) && self.0.iter().all(|k| matches!(k, Kind::Bool | Kind::Null))
    }
}

impl std::fmt::Display for TypeList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.0.iter().map(Kind::to_string).collect();
        write!(f, "{}", names.join("|"))
    }
}
