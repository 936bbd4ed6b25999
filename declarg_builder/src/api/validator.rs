use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::model::Value;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A check (and optional transform) applied to a bound value.
///
/// Return the value to keep on success (which may differ from the input), or an error message.
///
/// ### Example
/// ```
/// # use declarg_builder as declarg;
/// use declarg::{prelude::*, Value};
///
/// struct Positive;
///
/// impl Validator for Positive {
///     fn proceed(&self, value: Value) -> Result<Value, String> {
///         match value {
///             Value::Int(n) if n <= 0 => Err(format!("{n} is not positive")),
///             other => Ok(other),
///         }
///     }
/// }
///
/// assert_eq!(Positive.proceed(Value::Int(3)), Ok(Value::Int(3)));
/// assert!(Positive.proceed(Value::Int(-3)).is_err());
/// ```
pub trait Validator {
    fn proceed(&self, value: Value) -> Result<Value, String>;
}

impl<F> Validator for F
where
    F: Fn(Value) -> Result<Value, String>,
{
    fn proceed(&self, value: Value) -> Result<Value, String> {
        self(value)
    }
}

/// Run each validator in order, feeding each the previous one's output.
/// The first error stops the chain.
pub(crate) fn run_chain(validators: &[Rc<dyn Validator>], value: Value) -> Result<Value, String> {
    validators.iter().try_fold(value, |value, validator| {
        let outcome = validator.proceed(value);

        #[cfg(feature = "tracing_debug")]
        {
            match &outcome {
                Ok(value) => debug!("Validator accepted: {value}."),
                Err(message) => debug!("Validator rejected: {message}."),
            };
        }

        outcome
    })
}

fn resolve(base: Option<&Path>, path: &str) -> Result<PathBuf, String> {
    let path = Path::new(path);

    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    match base {
        Some(base) => Ok(base.join(path)),
        None => std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .map_err(|error| format!("cannot resolve the working directory: {error}")),
    }
}

fn expect_path(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected a file path, found '{value}'"))
}

/// The value must be the path of an existing, readable file.
///
/// Relative paths resolve against the working directory (or [`ReadableFile::relative_to`]).
/// Null passes through untouched.
#[derive(Debug, Clone)]
pub struct ReadableFile {
    base: Option<PathBuf>,
    read_content: bool,
}

impl ReadableFile {
    /// Keep the path as the bound value.
    pub fn path() -> Self {
        Self {
            base: None,
            read_content: false,
        }
    }

    /// Replace the bound path with the file's contents.
    pub fn content() -> Self {
        Self {
            base: None,
            read_content: true,
        }
    }

    /// Resolve relative paths against `base` instead of the working directory.
    pub fn relative_to(mut self, base: impl Into<PathBuf>) -> Self {
        self.base.replace(base.into());
        self
    }
}

impl Validator for ReadableFile {
    fn proceed(&self, value: Value) -> Result<Value, String> {
        if value.is_null() {
            return Ok(value);
        }

        let raw = expect_path(&value)?;
        let resolved = resolve(self.base.as_deref(), raw)?;

        if !resolved.is_file() {
            return Err(format!("{raw} is not a readable file"));
        }

        let content = std::fs::read_to_string(&resolved)
            .map_err(|error| format!("{raw} is not a readable file: {error}"))?;

        if self.read_content {
            Ok(Value::Str(content))
        } else {
            Ok(value)
        }
    }
}

/// The value, if non-null, must be a path that may be written: its directory must exist and be writable.
#[derive(Debug, Clone, Default)]
pub struct WritableFile {
    base: Option<PathBuf>,
}

impl WritableFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base` instead of the working directory.
    pub fn relative_to(mut self, base: impl Into<PathBuf>) -> Self {
        self.base.replace(base.into());
        self
    }
}

impl Validator for WritableFile {
    fn proceed(&self, value: Value) -> Result<Value, String> {
        if value.is_null() {
            return Ok(value);
        }

        let raw = expect_path(&value)?;
        let resolved = resolve(self.base.as_deref(), raw)?;

        if resolved.is_dir() {
            return Err(format!("{raw} is a directory"));
        }

        if let Ok(metadata) = std::fs::metadata(&resolved) {
            if metadata.permissions().readonly() {
                return Err(format!("{raw} is not writable"));
            }
        }

        let directory = match resolved.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        match std::fs::metadata(&directory) {
            Ok(metadata) if metadata.is_dir() && !metadata.permissions().readonly() => Ok(value),
            Ok(_) => Err(format!("{} directory is not writable", directory.display())),
            Err(_) => Err(format!("{} directory does not exist", directory.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn shout(value: Value) -> Result<Value, String> {
        match value {
            Value::Str(s) => Ok(Value::Str(s.to_uppercase())),
            other => Err(format!("cannot shout '{other}'")),
        }
    }

    fn exclaim(value: Value) -> Result<Value, String> {
        match value {
            Value::Str(s) => Ok(Value::Str(format!("{s}!"))),
            other => Ok(other),
        }
    }

    #[test]
    fn chain_empty() {
        assert_eq!(run_chain(&[], Value::Int(1)), Ok(Value::Int(1)));
    }

    #[test]
    fn chain_in_order() {
        let validators: Vec<Rc<dyn Validator>> = vec![Rc::new(shout), Rc::new(exclaim)];
        assert_eq!(
            run_chain(&validators, Value::Str("hi".to_string())),
            Ok(Value::Str("HI!".to_string()))
        );
    }

    #[test]
    fn chain_stops_on_first_error() {
        let validators: Vec<Rc<dyn Validator>> = vec![
            Rc::new(shout),
            Rc::new(|_: Value| -> Result<Value, String> { panic!("must not run") }),
        ];
        assert_eq!(
            run_chain(&validators, Value::Int(3)),
            Err("cannot shout '3'".to_string())
        );
    }

    #[test]
    fn readable_file() {
        let directory = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(directory.path().join("notes.txt")).unwrap();
        write!(file, "hello").unwrap();

        let keep = ReadableFile::path().relative_to(directory.path());
        assert_eq!(
            keep.proceed(Value::Str("notes.txt".to_string())),
            Ok(Value::Str("notes.txt".to_string()))
        );

        let content = ReadableFile::content().relative_to(directory.path());
        assert_eq!(
            content.proceed(Value::Str("notes.txt".to_string())),
            Ok(Value::Str("hello".to_string()))
        );

        let absolute = directory.path().join("notes.txt").display().to_string();
        assert_eq!(
            ReadableFile::content().proceed(Value::Str(absolute)),
            Ok(Value::Str("hello".to_string()))
        );
    }

    #[test]
    fn readable_file_missing() {
        let directory = tempfile::tempdir().unwrap();
        let validator = ReadableFile::path().relative_to(directory.path());
        assert_eq!(
            validator.proceed(Value::Str("missing.txt".to_string())),
            Err("missing.txt is not a readable file".to_string())
        );
        assert_eq!(validator.proceed(Value::Null), Ok(Value::Null));
        assert!(validator.proceed(Value::Int(1)).is_err());
    }

    #[test]
    fn writable_file() {
        let directory = tempfile::tempdir().unwrap();
        let validator = WritableFile::new().relative_to(directory.path());
        assert_eq!(
            validator.proceed(Value::Str("out.txt".to_string())),
            Ok(Value::Str("out.txt".to_string()))
        );
        assert_eq!(validator.proceed(Value::Null), Ok(Value::Null));
        assert_eq!(
            validator.proceed(Value::Str("nested/out.txt".to_string())),
            Err(format!(
                "{} directory does not exist",
                directory.path().join("nested").display()
            ))
        );
    }
}
