//! Autocompletion for partially typed console lines.
//!
//! This module suggests:
//! - Command identifiers (e.g., "gr" → "greet")
//! - Flags of optional parameters (e.g., "geo 1.1.1.1 --t" → "--type")
//! - Values from named autocompletion lists and enumeration choices
//! - Directory entries for file-or-folder parameters
//!
//! Suggestion never fails: whatever cannot be completed yields an empty list.

use std::collections::HashMap;
use std::fs;

use tracing::trace;

use crate::config::{CURRENT_DIR, LONG_FLAG_PREFIX, PATH_SEPARATOR};
use crate::core::parser::{flag_name, is_flag, tokenize, tokenize_after};
use crate::core::registry::Registry;
use crate::models::{Command, Parameter, ParameterKind};

// ============================================================================
// Completion Lists
// ============================================================================

/// Named, ordered autocompletion lists supplied by the host.
///
/// Text parameters refer to a list by name; the host may replace a list
/// between suggestions (e.g., after a command changed the underlying data).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionLists {
    lists: HashMap<String, Vec<String>>,
}

impl CompletionLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the list called `name`.
    pub fn set<I, S>(&mut self, name: impl Into<String>, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists
            .insert(name.into(), items.into_iter().map(Into::into).collect());
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.lists.get(name).map(Vec::as_slice)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.lists.remove(name)
    }
}

// ============================================================================
// Completion Context
// ============================================================================

/// What a partial line asks to complete.
#[derive(Debug, Clone, Copy)]
enum CompletionMode<'a> {
    /// Nothing typed yet.
    Everything,
    /// Argument of the help pseudo-command.
    HelpTopic(&'a str),
    /// Command identifier still being typed.
    Identifier,
    /// Parameters of a matched command.
    Parameters(&'a Command),
}

impl<'a> CompletionMode<'a> {
    fn classify(partial: &'a str, registry: &'a Registry, help_identifier: &str) -> Self {
        if partial.is_empty() {
            return Self::Everything;
        }

        if let Some(rest) = partial
            .strip_prefix(help_identifier)
            .filter(|rest| rest.starts_with(' '))
        {
            let topic = rest.trim_start_matches(' ');
            if tokenize(topic).len() <= 1 && !topic.ends_with(' ') {
                return Self::HelpTopic(topic);
            }
        }

        match registry.match_line(partial) {
            Some(command) if followed_by_space(partial, command.identifier()) => {
                Self::Parameters(command)
            }
            _ => Self::Identifier,
        }
    }
}

fn followed_by_space(partial: &str, identifier: &str) -> bool {
    partial[identifier.len()..].starts_with(char::is_whitespace)
}

// ============================================================================
// Path Parsing
// ============================================================================

/// Partial path split at its last separator.
struct ParsedPath<'a> {
    /// Directory listed for candidates (e.g., "projects/" or "./").
    search_dir: &'a str,
    /// Entry name being completed.
    name_part: &'a str,
}

impl<'a> ParsedPath<'a> {
    fn parse(partial: &'a str) -> Self {
        match partial.rfind(PATH_SEPARATOR) {
            Some(idx) => Self {
                search_dir: &partial[..=idx],
                name_part: &partial[idx + 1..],
            },
            None => Self {
                search_dir: CURRENT_DIR,
                name_part: partial,
            },
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Suggest completions for a partially typed line.
///
/// The result is ordered: identifiers in registration order followed by the
/// help identifier, list entries and choices in declared order, directories
/// before files for paths.
pub fn suggest(
    partial: &str,
    registry: &Registry,
    lists: &CompletionLists,
    help_identifier: &str,
) -> Vec<String> {
    match CompletionMode::classify(partial, registry, help_identifier) {
        CompletionMode::Everything => registry
            .identifiers()
            .chain(std::iter::once(help_identifier))
            .map(str::to_string)
            .collect(),
        CompletionMode::HelpTopic(topic) => filter_prefix(registry.identifiers(), topic),
        CompletionMode::Identifier => filter_prefix(
            registry
                .identifiers()
                .chain(std::iter::once(help_identifier)),
            partial,
        ),
        CompletionMode::Parameters(command) => complete_parameters(command, partial, lists),
    }
}

// ============================================================================
// Parameter Completion
// ============================================================================

/// Complete the parameter currently being typed after a matched command.
fn complete_parameters(command: &Command, partial: &str, lists: &CompletionLists) -> Vec<String> {
    let tokens = tokenize_after(partial, command.identifier());
    let Some(last) = tokens.last() else {
        return Vec::new();
    };

    let positional = command
        .parameters()
        .get(tokens.len() - 1)
        .filter(|p| p.is_positional());
    if let Some(parameter) = positional {
        return complete_value(parameter, last, false, lists);
    }

    if let Some(typed) = last.strip_prefix(LONG_FLAG_PREFIX) {
        return complete_flags(command, typed);
    }

    // Nearest flag: as last token the value is not started, otherwise the
    // last token is its value being typed.
    let target = tokens
        .iter()
        .rev()
        .position(|t| is_flag(t))
        .and_then(|offset| {
            let flag = &tokens[tokens.len() - 1 - offset];
            let parameter = flag_name(flag).and_then(|name| command.parameter_named(name))?;
            Some((parameter, offset == 0))
        });

    match target {
        Some((parameter, true)) => complete_value(parameter, "", true, lists),
        Some((parameter, false)) => complete_value(parameter, last, false, lists),
        None => {
            trace!("No completion target after '{}'", command.identifier());
            Vec::new()
        }
    }
}

/// Long flags of optional parameters starting with `typed`.
fn complete_flags(command: &Command, typed: &str) -> Vec<String> {
    command
        .parameters()
        .iter()
        .filter(|p| !p.is_positional())
        .filter(|p| p.name().chars().count() > 1 && p.name().starts_with(typed))
        .map(Parameter::flag)
        .collect()
}

/// Candidates for the value of `parameter`.
///
/// `at_flag` is set when the flag itself is the current token.
fn complete_value(
    parameter: &Parameter,
    typed: &str,
    at_flag: bool,
    lists: &CompletionLists,
) -> Vec<String> {
    match parameter.kind() {
        ParameterKind::Text {
            completion_list: Some(name),
            ..
        } => match lists.get(name) {
            Some(items) => complete_from(items, typed, at_flag),
            None => {
                trace!("Autocompletion list '{}' is not registered", name);
                Vec::new()
            }
        },
        ParameterKind::Enumeration { choices } => complete_from(choices, typed, at_flag),
        ParameterKind::FileOrFolder => complete_path(typed),
        kind => {
            trace!(
                "No completion for {} parameter '{}'",
                kind.type_name(),
                parameter.name()
            );
            Vec::new()
        }
    }
}

fn complete_from(items: &[String], typed: &str, at_flag: bool) -> Vec<String> {
    if at_flag {
        return items.to_vec();
    }
    filter_prefix(items.iter().map(String::as_str), typed)
}

// ============================================================================
// Path Completion
// ============================================================================

/// Entries of the typed directory matching the typed name.
///
/// Directories come first with a trailing separator, then files; each group
/// is sorted by name.
fn complete_path(typed: &str) -> Vec<String> {
    let parsed = ParsedPath::parse(typed);

    let entries = match fs::read_dir(parsed.search_dir) {
        Ok(entries) => entries,
        Err(err) => {
            trace!("Cannot list '{}': {}", parsed.search_dir, err);
            return Vec::new();
        }
    };

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in entries.flatten() {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !name.starts_with(parsed.name_part) {
            continue;
        }
        if entry.path().is_dir() {
            dirs.push(format!("{}{}", name, PATH_SEPARATOR));
        } else {
            files.push(name);
        }
    }

    dirs.sort();
    files.sort();
    dirs.extend(files);
    dirs
}

// ============================================================================
// Utilities
// ============================================================================

/// Candidates starting with `typed`, ignoring case, in input order.
fn filter_prefix<'a>(candidates: impl Iterator<Item = &'a str>, typed: &str) -> Vec<String> {
    let typed_lower = typed.to_lowercase();
    candidates
        .filter(|c| c.to_lowercase().starts_with(&typed_lower))
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
