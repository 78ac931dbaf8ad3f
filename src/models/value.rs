//! Typed parameter values and the per-invocation argument set.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::config::ARRAY_SEPARATOR;

/// A typed parameter value, one variant per parameter kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Integer(i32),
    LongInteger(i64),
    Text(String),
    TextArray(Vec<String>),
    Boolean(bool),
    DateTime(NaiveDateTime),
    /// Canonical (declared-case) choice of an enumeration.
    Enumeration(String),
    /// Existing file or directory.
    Path(PathBuf),
}

impl Value {
    /// Human-readable name of the value's kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::LongInteger(_) => "long integer",
            Self::Text(_) => "text",
            Self::TextArray(_) => "text array",
            Self::Boolean(_) => "boolean",
            Self::DateTime(_) => "date-time",
            Self::Enumeration(_) => "enumeration",
            Self::Path(_) => "file or folder",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::LongInteger(v) => write!(f, "{}", v),
            Self::Text(s) | Self::Enumeration(s) => f.write_str(s),
            Self::TextArray(items) => f.write_str(&items.join(&ARRAY_SEPARATOR.to_string())),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::DateTime(dt) => write!(f, "{}", dt),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::LongInteger(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::TextArray(items)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<PathBuf> for Value {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

// =============================================================================
// Bound Argument Set
// =============================================================================

/// Values bound for one command invocation, in declaration order.
///
/// Typed accessors return `None` when the name is unknown or the value has
/// another kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arguments {
    values: Vec<(String, Value)>,
}

impl Arguments {
    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.values.push((name.to_string(), value));
    }

    /// Raw value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn integer(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn long(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::LongInteger(v) => Some(*v),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn text_array(&self, name: &str) -> Option<&[String]> {
        match self.get(name)? {
            Value::TextArray(items) => Some(items),
            _ => None,
        }
    }

    /// Whether a boolean flag was present. Unknown names read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Value::Boolean(true)))
    }

    pub fn datetime(&self, name: &str) -> Option<NaiveDateTime> {
        match self.get(name)? {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Canonical choice of an enumeration parameter.
    pub fn choice(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::Enumeration(s) => Some(s),
            _ => None,
        }
    }

    pub fn path(&self, name: &str) -> Option<&Path> {
        match self.get(name)? {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arguments {
        let mut args = Arguments::default();
        args.insert("count", Value::Integer(3));
        args.insert("name", Value::from("John Smith"));
        args.insert("verbose", Value::Boolean(true));
        args.insert("format", Value::Enumeration("json".to_string()));
        args
    }

    #[test]
    fn test_typed_accessors() {
        let args = sample();
        assert_eq!(args.integer("count"), Some(3));
        assert_eq!(args.text("name"), Some("John Smith"));
        assert!(args.flag("verbose"));
        assert_eq!(args.choice("format"), Some("json"));
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn test_kind_mismatch_is_none() {
        let args = sample();
        assert_eq!(args.text("count"), None);
        assert_eq!(args.long("count"), None);
        assert_eq!(args.choice("name"), None);
    }

    #[test]
    fn test_missing_flag_reads_false() {
        assert!(!sample().flag("quiet"));
    }

    #[test]
    fn test_iteration_keeps_declaration_order() {
        let args = sample();
        let names: Vec<&str> = args.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["count", "name", "verbose", "format"]);
    }

    #[test]
    fn test_display() {
        let items = Value::TextArray(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(items.to_string(), "a,b");
        assert_eq!(Value::Integer(-4).to_string(), "-4");
    }
}
