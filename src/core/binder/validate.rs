//! Per-kind parsing and constraint checks.
//!
//! [`parse`] turns a raw token into a [`Value`] and checks it; [`check`]
//! only checks an already typed value and is shared with registration,
//! which validates declared defaults through [`normalize_default`].

use std::fmt::Display;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::ARRAY_SEPARATOR;
use crate::core::error::BindError;
use crate::models::{Parameter, ParameterKind, Value};

// =============================================================================
// Parsing
// =============================================================================

/// Parse and validate the raw value of a parameter.
///
/// File-or-folder values must exist on the filesystem.
pub(crate) fn parse(parameter: &Parameter, raw: &str) -> Result<Value, BindError> {
    let name = parameter.name();
    let value = match parameter.kind() {
        ParameterKind::Integer { .. } => Value::Integer(
            raw.parse()
                .map_err(|_| bad_format(name, raw, "32-bit integer"))?,
        ),
        ParameterKind::LongInteger { .. } => Value::LongInteger(
            raw.parse()
                .map_err(|_| bad_format(name, raw, "64-bit integer"))?,
        ),
        ParameterKind::Text { .. } => Value::Text(raw.to_string()),
        ParameterKind::TextArray { .. } => Value::TextArray(split_array(raw)),
        ParameterKind::Boolean => {
            Value::Boolean(raw.parse().map_err(|_| bad_format(name, raw, "boolean"))?)
        }
        ParameterKind::DateTime { format, .. } => Value::DateTime(
            parse_datetime(raw, format)
                .ok_or_else(|| bad_format(name, raw, &format!("date matching '{}'", format)))?,
        ),
        ParameterKind::Enumeration { choices } => Value::Enumeration(
            canonical_choice(choices, raw).ok_or_else(|| invalid_choice(name, raw, choices))?,
        ),
        ParameterKind::FileOrFolder => {
            let path = PathBuf::from(raw);
            if !path.exists() {
                return Err(BindError::NotFound {
                    parameter: name.to_string(),
                    path: raw.to_string(),
                });
            }
            Value::Path(path)
        }
    };

    check(parameter, &value)?;
    Ok(value)
}

/// Split a text array value on commas. An empty value has no elements.
fn split_array(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(ARRAY_SEPARATOR).map(str::to_string).collect()
}

/// Parse a date-time exactly; a date-only format yields midnight.
fn parse_datetime(raw: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, format).ok().or_else(|| {
        NaiveDate::parse_from_str(raw, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
}

/// Declared-case choice equal to `raw`, ignoring case.
fn canonical_choice(choices: &[String], raw: &str) -> Option<String> {
    let raw_lower = raw.to_lowercase();
    choices
        .iter()
        .find(|choice| choice.to_lowercase() == raw_lower)
        .cloned()
}

// =============================================================================
// Constraint Checks
// =============================================================================

/// Check a typed value against the parameter's constraints.
pub(crate) fn check(parameter: &Parameter, value: &Value) -> Result<(), BindError> {
    let name = parameter.name();
    match (parameter.kind(), value) {
        (ParameterKind::Integer { min, max }, Value::Integer(v)) => {
            check_range(name, v, min, max)
        }
        (ParameterKind::LongInteger { min, max }, Value::LongInteger(v)) => {
            check_range(name, v, min, max)
        }
        (
            ParameterKind::Text {
                min_length,
                max_length,
                forbidden,
                ..
            },
            Value::Text(text),
        ) => check_text(name, text, *min_length, *max_length, forbidden),
        (ParameterKind::TextArray { min_size, max_size }, Value::TextArray(items)) => {
            if items.len() < *min_size || items.len() > *max_size {
                return Err(BindError::ArraySizeViolation {
                    parameter: name.to_string(),
                    size: items.len(),
                    min: *min_size,
                    max: *max_size,
                });
            }
            Ok(())
        }
        (ParameterKind::DateTime { format, min, max }, Value::DateTime(v)) => {
            let too_early = min.is_some_and(|min| *v < min);
            let too_late = max.is_some_and(|max| *v > max);
            if too_early || too_late {
                let show = |bound: &Option<NaiveDateTime>| {
                    bound.map_or_else(|| "none".to_string(), |b| b.format(format).to_string())
                };
                return Err(BindError::OutOfRange {
                    parameter: name.to_string(),
                    value: v.format(format).to_string(),
                    min: show(min),
                    max: show(max),
                });
            }
            Ok(())
        }
        (ParameterKind::Enumeration { choices }, Value::Enumeration(choice)) => {
            if choices.contains(choice) {
                Ok(())
            } else {
                Err(invalid_choice(name, choice, choices))
            }
        }
        (ParameterKind::Boolean, Value::Boolean(_))
        | (ParameterKind::FileOrFolder, Value::Path(_)) => Ok(()),
        (kind, other) => Err(BadKind::new(name, kind, other).into()),
    }
}

fn check_range<T: PartialOrd + Display>(
    name: &str,
    value: &T,
    min: &T,
    max: &T,
) -> Result<(), BindError> {
    if value < min || value > max {
        return Err(BindError::OutOfRange {
            parameter: name.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

fn check_text(
    name: &str,
    text: &str,
    min_length: usize,
    max_length: usize,
    forbidden: &[char],
) -> Result<(), BindError> {
    // Reported in declared order
    if let Some(&character) = forbidden.iter().find(|c| text.contains(**c)) {
        return Err(BindError::ForbiddenCharacter {
            parameter: name.to_string(),
            character,
        });
    }

    let length = text.chars().count();
    if length > max_length {
        return Err(BindError::TooLong {
            parameter: name.to_string(),
            length,
            max: max_length,
        });
    }
    if length < min_length {
        return Err(BindError::TooShort {
            parameter: name.to_string(),
            length,
            min: min_length,
        });
    }
    Ok(())
}

// =============================================================================
// Defaults
// =============================================================================

/// Convert a declared default to the parameter's value kind and check it.
///
/// Text defaults are accepted for enumerations (matched like user input),
/// date-times (parsed with the parameter's format), text arrays (split on
/// commas) and file-or-folder parameters. File-or-folder defaults are not
/// checked for existence.
pub(crate) fn normalize_default(parameter: &Parameter, default: &Value) -> Result<Value, BindError> {
    let name = parameter.name();
    let normalized = match (parameter.kind(), default) {
        (ParameterKind::LongInteger { .. }, Value::Integer(v)) => Value::LongInteger(i64::from(*v)),
        (ParameterKind::Enumeration { choices }, Value::Text(raw) | Value::Enumeration(raw)) => {
            Value::Enumeration(
                canonical_choice(choices, raw).ok_or_else(|| invalid_choice(name, raw, choices))?,
            )
        }
        (ParameterKind::DateTime { format, .. }, Value::Text(raw)) => Value::DateTime(
            parse_datetime(raw, format)
                .ok_or_else(|| bad_format(name, raw, &format!("date matching '{}'", format)))?,
        ),
        (ParameterKind::TextArray { .. }, Value::Text(raw)) => Value::TextArray(split_array(raw)),
        (ParameterKind::FileOrFolder, Value::Text(raw)) => Value::Path(PathBuf::from(raw)),
        _ => default.clone(),
    };

    check(parameter, &normalized)?;
    Ok(normalized)
}

// =============================================================================
// Error Helpers
// =============================================================================

fn bad_format(name: &str, raw: &str, expected: &str) -> BindError {
    BindError::BadFormat {
        parameter: name.to_string(),
        value: raw.to_string(),
        expected: expected.to_string(),
    }
}

fn invalid_choice(name: &str, raw: &str, choices: &[String]) -> BindError {
    BindError::InvalidChoice {
        parameter: name.to_string(),
        value: raw.to_string(),
        choices: choices.join(", "),
    }
}

/// A value whose kind differs from the parameter's kind.
struct BadKind {
    name: String,
    value: String,
    expected: &'static str,
    found: &'static str,
}

impl BadKind {
    fn new(name: &str, kind: &ParameterKind, value: &Value) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            expected: kind.type_name(),
            found: value.kind_name(),
        }
    }
}

impl From<BadKind> for BindError {
    fn from(bad: BadKind) -> Self {
        BindError::BadFormat {
            parameter: bad.name,
            value: bad.value,
            expected: format!("{} (got {})", bad.expected, bad.found),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_integer_in_range() {
        let number = Parameter::integer("number", 1, 100);
        assert_eq!(parse(&number, "10"), Ok(Value::Integer(10)));
        assert_eq!(parse(&number, "1"), Ok(Value::Integer(1)));
        assert_eq!(parse(&number, "100"), Ok(Value::Integer(100)));
    }

    #[test]
    fn test_integer_out_of_range() {
        let number = Parameter::integer("number", 1, 100);
        assert!(matches!(
            parse(&number, "150"),
            Err(BindError::OutOfRange { ref parameter, ref value, .. })
                if parameter == "number" && value == "150"
        ));
        assert!(matches!(parse(&number, "0"), Err(BindError::OutOfRange { .. })));
    }

    #[test]
    fn test_integer_width() {
        let small = Parameter::integer("n", i32::MIN, i32::MAX);
        let wide = Parameter::long("n", i64::MIN, i64::MAX);
        assert!(matches!(parse(&small, "3000000000"), Err(BindError::BadFormat { .. })));
        assert_eq!(parse(&wide, "3000000000"), Ok(Value::LongInteger(3_000_000_000)));
        assert!(matches!(parse(&wide, "12abc"), Err(BindError::BadFormat { .. })));
    }

    #[test]
    fn test_text_forbidden_character() {
        let name = Parameter::text("name").forbid("/\\");
        assert_eq!(
            parse(&name, "a/b"),
            Err(BindError::ForbiddenCharacter {
                parameter: "name".to_string(),
                character: '/',
            })
        );
    }

    #[test]
    fn test_forbidden_character_reported_in_declared_order() {
        let name = Parameter::text("name").forbid("/\\");
        assert!(matches!(
            parse(&name, "a\\b/c"),
            Err(BindError::ForbiddenCharacter { character: '/', .. })
        ));
    }

    #[test]
    fn test_text_length() {
        let code = Parameter::text("code").length(2, 4);
        assert!(matches!(parse(&code, "a"), Err(BindError::TooShort { length: 1, min: 2, .. })));
        assert!(matches!(parse(&code, "abcde"), Err(BindError::TooLong { length: 5, max: 4, .. })));
        assert_eq!(parse(&code, "ab"), Ok(Value::Text("ab".to_string())));
    }

    #[test]
    fn test_text_length_counts_characters() {
        let code = Parameter::text("code").length(0, 3);
        assert_eq!(parse(&code, "héé"), Ok(Value::Text("héé".to_string())));
    }

    #[test]
    fn test_text_array_size() {
        let tags = Parameter::text_array("tags", 1, 3);
        assert_eq!(
            parse(&tags, "a,b"),
            Ok(Value::TextArray(vec!["a".to_string(), "b".to_string()]))
        );
        assert!(matches!(
            parse(&tags, "a,b,c,d"),
            Err(BindError::ArraySizeViolation { size: 4, min: 1, max: 3, .. })
        ));
        assert!(matches!(
            parse(&tags, ""),
            Err(BindError::ArraySizeViolation { size: 0, .. })
        ));
    }

    #[test]
    fn test_enumeration_is_case_insensitive() {
        let format = Parameter::enumeration("type", ["json", "xml"]);
        assert_eq!(parse(&format, "JSON"), Ok(Value::Enumeration("json".to_string())));
        assert!(matches!(
            parse(&format, "yaml"),
            Err(BindError::InvalidChoice { ref choices, .. }) if choices == "json, xml"
        ));
    }

    #[test]
    fn test_datetime_format() {
        let due = Parameter::datetime("due");
        assert_eq!(parse(&due, "24-12-2025"), Ok(Value::DateTime(date(2025, 12, 24))));
        assert!(matches!(parse(&due, "2025-12-24"), Err(BindError::BadFormat { .. })));
        assert!(matches!(parse(&due, "24-12-2025x"), Err(BindError::BadFormat { .. })));
    }

    #[test]
    fn test_datetime_with_time() {
        let at = Parameter::datetime("at").format("%Y-%m-%dT%H:%M");
        let expected = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(parse(&at, "2025-01-02T09:30"), Ok(Value::DateTime(expected)));
    }

    #[test]
    fn test_datetime_bounds() {
        let due = Parameter::datetime("due").between(date(2025, 1, 1), date(2025, 12, 31));
        assert!(parse(&due, "01-06-2025").is_ok());
        assert!(matches!(
            parse(&due, "01-01-2026"),
            Err(BindError::OutOfRange { ref value, ref max, .. })
                if value == "01-01-2026" && max == "31-12-2025"
        ));
    }

    #[test]
    fn test_file_or_folder_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let target = Parameter::file_or_folder("target");
        let existing = dir.path().to_string_lossy().into_owned();
        assert_eq!(parse(&target, &existing), Ok(Value::Path(dir.path().to_path_buf())));

        let missing = dir.path().join("missing.txt").to_string_lossy().into_owned();
        assert!(matches!(parse(&target, &missing), Err(BindError::NotFound { .. })));
    }

    #[test]
    fn test_check_rejects_other_kind() {
        let number = Parameter::integer("number", 0, 10);
        assert!(matches!(
            check(&number, &Value::Text("3".to_string())),
            Err(BindError::BadFormat { ref expected, .. }) if expected == "integer (got text)"
        ));
    }

    #[test]
    fn test_normalize_default() {
        let format = Parameter::enumeration("type", ["json", "xml"]);
        assert_eq!(
            normalize_default(&format, &Value::from("XML")),
            Ok(Value::Enumeration("xml".to_string()))
        );

        let size = Parameter::long("size", 0, 10);
        assert_eq!(normalize_default(&size, &Value::Integer(4)), Ok(Value::LongInteger(4)));

        let due = Parameter::datetime("due");
        assert_eq!(
            normalize_default(&due, &Value::from("01-01-1970")),
            Ok(Value::DateTime(date(1970, 1, 1)))
        );

        let count = Parameter::integer("count", 1, 5);
        assert!(normalize_default(&count, &Value::Integer(9)).is_err());
    }

    #[test]
    fn test_normalize_default_skips_existence() {
        let target = Parameter::file_or_folder("target");
        assert_eq!(
            normalize_default(&target, &Value::from("does/not/exist")),
            Ok(Value::Path(PathBuf::from("does/not/exist")))
        );
    }
}
