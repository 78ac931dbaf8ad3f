//! Console configuration.
//!
//! Centralizes the constants shared by the tokenizer, binder and
//! autocomplete resolver, plus [`ConsoleConfig`], the host-tunable settings
//! loaded from TOML.

use serde::Deserialize;

use crate::core::error::ConsoleError;

// =============================================================================
// Reserved Identifiers
// =============================================================================

/// Pseudo-command that requests the help overview or a command's help page.
pub const HELP_IDENTIFIER: &str = "help";

// =============================================================================
// Line Grammar
// =============================================================================

/// Prefix of a flag for a single-character parameter name (`-x`).
pub const SHORT_FLAG_PREFIX: &str = "-";

/// Prefix of a flag for a multi-character parameter name (`--name`).
pub const LONG_FLAG_PREFIX: &str = "--";

/// Separator between the elements of a text array value.
pub const ARRAY_SEPARATOR: char = ',';

/// Stand-in for spaces inside quoted spans while the line is split.
///
/// Built from Unicode private-use code points so it cannot collide with
/// anything a user types at a console.
pub const QUOTE_SENTINEL: &str = "\u{F8FF}\u{E000}\u{F8FF}";

// =============================================================================
// Parameter Defaults
// =============================================================================

/// Default `chrono` format for date-time parameters (day-month-year).
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Separator appended to directory names in path completions.
pub const PATH_SEPARATOR: char = '/';

/// Directory listed when a path completion has no directory part.
pub const CURRENT_DIR: &str = "./";

// =============================================================================
// Console Defaults
// =============================================================================

/// Message shown by the default action when no command matches a line.
pub const DEFAULT_NO_MATCH_MESSAGE: &str = "No command matches the line.";

/// Prompt printed before each line is read.
pub const DEFAULT_PROMPT: &str = "> ";

// =============================================================================
// Runtime Settings
// =============================================================================

/// Host-tunable console settings.
///
/// Every field is optional in the TOML source and falls back to the
/// constants above.
///
/// ```toml
/// help_identifier = "?"
/// catch_handler_errors = false
/// no_match_message = "Unknown command."
/// prompt = "icl> "
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Identifier of the help pseudo-command.
    pub help_identifier: String,
    /// Report handler failures as text instead of returning them to the host.
    pub catch_handler_errors: bool,
    /// Message for the default no-match action.
    pub no_match_message: String,
    /// Prompt shown by the line editor.
    pub prompt: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            help_identifier: HELP_IDENTIFIER.to_string(),
            catch_handler_errors: true,
            no_match_message: DEFAULT_NO_MATCH_MESSAGE.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConsoleError> {
        let config: Self = toml::from_str(source)?;
        if config.help_identifier.is_empty()
            || config.help_identifier.chars().any(char::is_whitespace)
        {
            return Err(ConsoleError::Config(format!(
                "help_identifier must be a single word, got {:?}",
                config.help_identifier
            )));
        }
        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================
