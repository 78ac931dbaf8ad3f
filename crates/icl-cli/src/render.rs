//! Text rendering of help pages and line outcomes.

use std::fmt::Write;

use icl::{Command, ConsoleConfig, HelpRequest, Outcome, Parameter, ParameterKind, Registry};

/// List of every command with its description.
pub fn overview(registry: &Registry, help_identifier: &str) -> String {
    let mut out = String::from("AVAILABLE COMMANDS\n");
    let _ = writeln!(
        out,
        "To learn more about a command, type '{} command-name'\n",
        help_identifier
    );

    let width = registry
        .identifiers()
        .map(str::len)
        .max()
        .unwrap_or_default();
    for command in registry {
        let _ = writeln!(
            out,
            "  {:<width$}  {}",
            command.identifier(),
            command.description()
        );
    }
    out
}

/// Help page of one command.
pub fn command_page(command: &Command) -> String {
    let (required, optional): (Vec<&Parameter>, Vec<&Parameter>) = command
        .parameters()
        .iter()
        .partition(|p| p.is_positional());

    let mut out = String::new();
    let _ = writeln!(out, "{}\n", command.identifier());

    let _ = writeln!(out, "Syntax:");
    let mut syntax = command.identifier().to_string();
    for parameter in &required {
        let _ = write!(syntax, " <{}>", parameter.name());
    }
    if !optional.is_empty() {
        syntax.push_str(" [optional parameters]");
    }
    let _ = writeln!(out, "  {}\n", syntax);

    let _ = writeln!(out, "Description:\n  {}\n", command.description());

    if !required.is_empty() {
        let _ = writeln!(out, "Compulsory Parameters:");
        for parameter in &required {
            write_parameter(&mut out, parameter.name(), parameter);
        }
        out.push('\n');
    }

    if !optional.is_empty() {
        let _ = writeln!(out, "Optional Parameters:");
        for parameter in &optional {
            write_parameter(&mut out, &parameter.flag(), parameter);
        }
        out.push('\n');
    }

    if !command.examples().is_empty() {
        let _ = writeln!(out, "Examples:");
        for example in command.examples() {
            let _ = writeln!(out, "  {}", example);
        }
    }
    out
}

fn write_parameter(out: &mut String, label: &str, parameter: &Parameter) {
    let _ = writeln!(out, "  {}", label);
    let _ = writeln!(out, "    Type: {}", parameter.kind().type_name());
    let _ = writeln!(out, "    Description: {}", parameter.description());
    if let Some(constraints) = constraints(parameter.kind()) {
        let _ = writeln!(out, "    Constraints: {}", constraints);
    }
    if let Some(default) = parameter.default() {
        let _ = writeln!(out, "    Default: {}", default);
    }
}

/// Human-readable constraints of a parameter kind, if any.
fn constraints(kind: &ParameterKind) -> Option<String> {
    match kind {
        ParameterKind::Integer { min, max } if (*min, *max) != (i32::MIN, i32::MAX) => {
            Some(format!("{} to {}", min, max))
        }
        ParameterKind::LongInteger { min, max } if (*min, *max) != (i64::MIN, i64::MAX) => {
            Some(format!("{} to {}", min, max))
        }
        ParameterKind::Text {
            min_length,
            max_length,
            forbidden,
            ..
        } => {
            let mut parts = Vec::new();
            if *max_length != usize::MAX {
                parts.push(format!("{} to {} characters", min_length, max_length));
            } else if *min_length > 0 {
                parts.push(format!("at least {} characters", min_length));
            }
            if !forbidden.is_empty() {
                let chars: String = forbidden.iter().collect();
                parts.push(format!("must not contain any of \"{}\"", chars));
            }
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        ParameterKind::TextArray { min_size, max_size } => {
            Some(format!("{} to {} comma-separated elements", min_size, max_size))
        }
        ParameterKind::DateTime { format, .. } => Some(format!("format {}", format)),
        ParameterKind::Enumeration { choices } => Some(format!("one of {}", choices.join(", "))),
        ParameterKind::FileOrFolder => Some("existing file or folder".to_string()),
        _ => None,
    }
}

/// Text to print for an outcome, if any.
pub fn outcome(outcome: &Outcome<'_>, registry: &Registry, config: &ConsoleConfig) -> Option<String> {
    match outcome {
        Outcome::Empty | Outcome::Executed { .. } => None,
        Outcome::Help(HelpRequest::Overview) => Some(overview(registry, &config.help_identifier)),
        Outcome::Help(HelpRequest::Command(command)) => Some(command_page(command)),
        Outcome::Help(HelpRequest::Unknown(word)) => {
            Some(format!("Command '{}' does not exist!", word))
        }
        Outcome::NoMatch => Some(config.no_match_message.clone()),
        Outcome::Rejected { command, error } => Some(format!(
            "{}\nType '{} {}' for usage.",
            error,
            config.help_identifier,
            command.identifier()
        )),
        Outcome::Failed { message, .. } => Some(message.clone()),
    }
}

// =============================================================================
// Tests
// =============================================================================
