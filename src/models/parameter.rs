//! Parameter descriptors.
//!
//! A [`Parameter`] pairs the attributes every parameter has (name,
//! description, required flag, default) with a [`ParameterKind`] carrying
//! the constraints of its value type.

use chrono::NaiveDateTime;

use crate::config::DEFAULT_DATE_FORMAT;
use crate::core::parser::flag_for;

use super::Value;

/// Value type of a parameter and its kind-specific constraints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParameterKind {
    /// 32-bit integer within `min..=max`.
    Integer { min: i32, max: i32 },
    /// 64-bit integer within `min..=max`.
    LongInteger { min: i64, max: i64 },
    /// Free text. Length is counted in characters.
    Text {
        min_length: usize,
        max_length: usize,
        forbidden: Vec<char>,
        /// Name of the autocompletion list offered for this parameter.
        completion_list: Option<String>,
    },
    /// Comma-separated text elements.
    TextArray { min_size: usize, max_size: usize },
    /// Presence-only flag.
    Boolean,
    /// Date-time parsed with a `chrono` format string.
    DateTime {
        format: String,
        min: Option<NaiveDateTime>,
        max: Option<NaiveDateTime>,
    },
    /// One of a fixed, ordered set of choices (matched case-insensitively).
    Enumeration { choices: Vec<String> },
    /// Path to an existing file or directory.
    FileOrFolder,
}

impl ParameterKind {
    /// Type name shown in help pages and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer { .. } => "integer",
            Self::LongInteger { .. } => "long integer",
            Self::Text { .. } => "text",
            Self::TextArray { .. } => "text array",
            Self::Boolean => "boolean",
            Self::DateTime { .. } => "date-time",
            Self::Enumeration { .. } => "enumeration",
            Self::FileOrFolder => "file or folder",
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean)
    }
}

/// A declared command parameter.
///
/// Required parameters are positional; optional ones are named and written
/// as `-x value` or `--name value`. Booleans are always named.
///
/// ```
/// use icl::models::Parameter;
///
/// let count = Parameter::integer("number", 1, 100)
///     .describe("The number to count to")
///     .required();
/// let format = Parameter::enumeration("type", ["json", "xml"]).default_value("json");
/// assert!(count.is_positional());
/// assert_eq!(format.flag(), "--type");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    description: String,
    required: bool,
    default: Option<Value>,
    kind: ParameterKind,
}

impl Parameter {
    /// Create an optional parameter of the given kind.
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            description: String::from("No description provided"),
            required: false,
            default: None,
            kind,
        }
    }

    pub fn integer(name: impl Into<String>, min: i32, max: i32) -> Self {
        Self::new(name, ParameterKind::Integer { min, max })
    }

    pub fn long(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self::new(name, ParameterKind::LongInteger { min, max })
    }

    /// Unconstrained text; narrow it with [`length`](Self::length) and
    /// [`forbid`](Self::forbid).
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ParameterKind::Text {
                min_length: 0,
                max_length: usize::MAX,
                forbidden: Vec::new(),
                completion_list: None,
            },
        )
    }

    pub fn text_array(name: impl Into<String>, min_size: usize, max_size: usize) -> Self {
        Self::new(name, ParameterKind::TextArray { min_size, max_size })
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Boolean)
    }

    /// Date-time parsed with the default `%d-%m-%Y` format.
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ParameterKind::DateTime {
                format: DEFAULT_DATE_FORMAT.to_string(),
                min: None,
                max: None,
            },
        )
    }

    pub fn enumeration<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            ParameterKind::Enumeration {
                choices: choices.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn file_or_folder(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::FileOrFolder)
    }

    // -------------------------------------------------------------------------
    // Builder methods
    // -------------------------------------------------------------------------

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Make the parameter positional. Has no effect on booleans.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value used when an optional parameter is absent from the line.
    ///
    /// Checked against the parameter's constraints at registration.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Text length bounds, in characters. Text parameters only.
    pub fn length(mut self, min: usize, max: usize) -> Self {
        if let ParameterKind::Text {
            min_length,
            max_length,
            ..
        } = &mut self.kind
        {
            *min_length = min;
            *max_length = max;
        }
        self
    }

    /// Characters that must not appear in the value. Text parameters only.
    pub fn forbid(mut self, characters: &str) -> Self {
        if let ParameterKind::Text { forbidden, .. } = &mut self.kind {
            forbidden.extend(characters.chars());
        }
        self
    }

    /// Offer the named autocompletion list for this value. Text parameters only.
    pub fn completion_list(mut self, list: impl Into<String>) -> Self {
        if let ParameterKind::Text {
            completion_list, ..
        } = &mut self.kind
        {
            *completion_list = Some(list.into());
        }
        self
    }

    /// `chrono` format string. Date-time parameters only.
    pub fn format(mut self, pattern: impl Into<String>) -> Self {
        if let ParameterKind::DateTime { format, .. } = &mut self.kind {
            *format = pattern.into();
        }
        self
    }

    /// Inclusive date-time bounds. Date-time parameters only.
    pub fn between(mut self, earliest: NaiveDateTime, latest: NaiveDateTime) -> Self {
        if let ParameterKind::DateTime { min, max, .. } = &mut self.kind {
            *min = Some(earliest);
            *max = Some(latest);
        }
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the value is located by position rather than by flag.
    pub fn is_positional(&self) -> bool {
        self.required && !self.kind.is_boolean()
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn kind(&self) -> &ParameterKind {
        &self.kind
    }

    /// Flag token naming this parameter on the line (`-x` or `--name`).
    pub fn flag(&self) -> String {
        flag_for(&self.name)
    }

    pub(crate) fn set_default(&mut self, value: Value) {
        self.default = Some(value);
    }
}

// =============================================================================
// Tests
// =============================================================================
