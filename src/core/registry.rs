//! Command registry.
//!
//! Holds the declared commands in registration order and resolves a line to
//! the command whose identifier is its longest literal prefix.

use tracing::debug;

use crate::core::binder::normalize_default;
use crate::core::error::RegistrationError;
use crate::models::{Command, ParameterKind};

/// Ordered set of validated commands.
///
/// Every command in a registry has passed registration: its identifier is a
/// unique word, its parameters are well-formed and its defaults are valid.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: Vec<Command>,
    reserved: Vec<String>,
}

impl Registry {
    /// Empty registry with no reserved identifiers.
    ///
    /// The help identifier is reserved by the console that takes the registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry reserving the given identifiers.
    pub fn with_reserved<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: Vec::new(),
            reserved: reserved.into_iter().map(Into::into).collect(),
        }
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Refuse `identifier` for every later registration.
    pub(crate) fn reserve(&mut self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        if !self.reserved.contains(&identifier) {
            self.reserved.push(identifier);
        }
    }

    /// Validate `command` and add it to the registry.
    ///
    /// Defaults are converted to the parameter's value kind on the way in,
    /// so binding can hand them out as-is.
    pub fn register(&mut self, mut command: Command) -> Result<(), RegistrationError> {
        let identifier = command.identifier().to_string();

        if !is_word(&identifier) {
            return Err(RegistrationError::InvalidIdentifier { identifier });
        }
        if self.reserved.iter().any(|r| *r == identifier) {
            return Err(RegistrationError::ReservedIdentifier { identifier });
        }
        if self.get(&identifier).is_some() {
            return Err(RegistrationError::DuplicateIdentifier { identifier });
        }

        validate_parameters(&command)?;

        for parameter in command.parameters_mut() {
            let Some(default) = parameter.default() else {
                continue;
            };
            let normalized = normalize_default(parameter, default).map_err(|err| {
                RegistrationError::InvalidDefault {
                    command: identifier.clone(),
                    parameter: parameter.name().to_string(),
                    reason: err.to_string(),
                }
            })?;
            parameter.set_default(normalized);
        }

        debug!(
            "Registered command '{}' with {} parameters",
            identifier,
            command.parameters().len()
        );
        self.commands.push(command);
        Ok(())
    }

    /// Command whose identifier is the longest prefix of `line`.
    ///
    /// On equal lengths the command registered first wins.
    pub fn match_line(&self, line: &str) -> Option<&Command> {
        self.commands
            .iter()
            .filter(|c| c.matches_line(line))
            .fold(None, |best: Option<&Command>, c| match best {
                Some(b) if b.identifier().len() >= c.identifier().len() => Some(b),
                _ => Some(c),
            })
    }

    pub fn get(&self, identifier: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.identifier() == identifier)
    }

    /// Identifiers in registration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(Command::identifier)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && !s.chars().any(char::is_whitespace)
}

/// Check names, ordering and enumeration choices of a command's parameters.
fn validate_parameters(command: &Command) -> Result<(), RegistrationError> {
    let identifier = command.identifier();
    let mut seen_named = false;

    for (index, parameter) in command.parameters().iter().enumerate() {
        let name = parameter.name();
        let err_fields = || (identifier.to_string(), name.to_string());

        if !is_word(name) || name.starts_with('-') {
            let (command, parameter) = err_fields();
            return Err(RegistrationError::InvalidParameterName { command, parameter });
        }
        if command.parameters()[..index].iter().any(|p| p.name() == name) {
            let (command, parameter) = err_fields();
            return Err(RegistrationError::DuplicateParameterName { command, parameter });
        }
        if parameter.is_positional() {
            if seen_named {
                let (command, parameter) = err_fields();
                return Err(RegistrationError::InvalidParameterOrdering { command, parameter });
            }
        } else {
            seen_named = true;
        }
        if let ParameterKind::Enumeration { choices } = parameter.kind() {
            if choices.is_empty() {
                let (command, parameter) = err_fields();
                return Err(RegistrationError::EmptyChoices { command, parameter });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Builder
// =============================================================================

/// Collects commands and registers them in one go.
///
/// ```
/// use icl::core::Registry;
/// use icl::models::{Command, Parameter};
///
/// let registry = Registry::builder()
///     .command(Command::new("quit"))
///     .command(Command::new("count").parameter(Parameter::integer("number", 1, 100).required()))
///     .build()
///     .unwrap();
/// assert_eq!(registry.identifiers().collect::<Vec<_>>(), ["quit", "count"]);
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    commands: Vec<Command>,
    reserved: Vec<String>,
}

impl RegistryBuilder {
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Refuse `identifier` for every collected command.
    pub fn reserve(mut self, identifier: impl Into<String>) -> Self {
        self.reserved.push(identifier.into());
        self
    }

    /// Register every collected command, stopping at the first rejection.
    pub fn build(self) -> Result<Registry, RegistrationError> {
        let mut registry = Registry::with_reserved(self.reserved);
        for command in self.commands {
            registry.register(command)?;
        }
        Ok(registry)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Parameter, Value};

    fn registry(identifiers: &[&str]) -> Registry {
        let mut registry = Registry::new();
        for id in identifiers {
            registry.register(Command::new(*id)).unwrap();
        }
        registry
    }

    #[test]
    fn test_longest_prefix_wins() {
        let registry = registry(&["todo", "todo-add"]);
        assert_eq!(
            registry.match_line("todo-add milk").map(Command::identifier),
            Some("todo-add")
        );
        assert_eq!(
            registry.match_line("todo list").map(Command::identifier),
            Some("todo")
        );
    }

    #[test]
    fn test_no_match() {
        let registry = registry(&["greet", "quit"]);
        assert!(registry.match_line("gree").is_none());
        assert!(registry.match_line("").is_none());
        assert!(registry.match_line("GREET").is_none());
    }

    #[test]
    fn test_literal_prefix_without_boundary() {
        let registry = registry(&["todo"]);
        assert_eq!(
            registry.match_line("todolist").map(Command::identifier),
            Some("todo")
        );
    }

    #[test]
    fn test_match_is_stable() {
        let registry = registry(&["a", "ab", "abc"]);
        let first = registry.match_line("abcd").map(Command::identifier);
        assert_eq!(first, registry.match_line("abcd").map(Command::identifier));
        assert_eq!(first, Some("abc"));
    }

    #[test]
    fn test_duplicate_identifier() {
        let mut registry = registry(&["greet"]);
        assert_eq!(
            registry.register(Command::new("greet")),
            Err(RegistrationError::DuplicateIdentifier {
                identifier: "greet".to_string()
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reserved_and_invalid_identifiers() {
        let mut registry = Registry::with_reserved(["help"]);
        assert!(matches!(
            registry.register(Command::new("help")),
            Err(RegistrationError::ReservedIdentifier { .. })
        ));
        assert!(matches!(
            registry.register(Command::new("")),
            Err(RegistrationError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            registry.register(Command::new("two words")),
            Err(RegistrationError::InvalidIdentifier { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_required_after_optional_rejected() {
        let cmd = Command::new("geo")
            .parameter(Parameter::text("type"))
            .parameter(Parameter::text("ip").required());
        assert_eq!(
            Registry::new().register(cmd),
            Err(RegistrationError::InvalidParameterOrdering {
                command: "geo".to_string(),
                parameter: "ip".to_string(),
            })
        );
    }

    #[test]
    fn test_required_boolean_does_not_break_ordering() {
        let cmd = Command::new("rm")
            .parameter(Parameter::boolean("f").required())
            .parameter(Parameter::text("target"));
        assert!(Registry::new().register(cmd).is_ok());
    }

    #[test]
    fn test_duplicate_parameter_name() {
        let cmd = Command::new("geo")
            .parameter(Parameter::text("ip"))
            .parameter(Parameter::integer("ip", 0, 1));
        assert!(matches!(
            Registry::new().register(cmd),
            Err(RegistrationError::DuplicateParameterName { .. })
        ));
    }

    #[test]
    fn test_invalid_parameter_name() {
        let cmd = Command::new("geo").parameter(Parameter::text("--ip"));
        assert!(matches!(
            Registry::new().register(cmd),
            Err(RegistrationError::InvalidParameterName { .. })
        ));
    }

    #[test]
    fn test_empty_choices() {
        let cmd = Command::new("geo").parameter(Parameter::enumeration("type", Vec::<String>::new()));
        assert!(matches!(
            Registry::new().register(cmd),
            Err(RegistrationError::EmptyChoices { .. })
        ));
    }

    #[test]
    fn test_invalid_default_rejected() {
        let cmd = Command::new("count").parameter(Parameter::integer("n", 1, 10).default_value(50));
        let err = Registry::new().register(cmd).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidDefault { ref parameter, .. } if parameter == "n"));
    }

    #[test]
    fn test_default_normalized_to_kind() {
        let cmd = Command::new("geo")
            .parameter(Parameter::enumeration("type", ["json", "xml"]).default_value("JSON"));
        let registry = Registry::builder().command(cmd).build().unwrap();
        let param = registry.get("geo").and_then(|c| c.parameter_named("type"));
        assert_eq!(
            param.and_then(|p| p.default()),
            Some(&Value::Enumeration("json".to_string()))
        );
    }

    #[test]
    fn test_plain_registry_reserves_nothing() {
        let registry = Registry::builder().command(Command::new("help")).build().unwrap();
        assert!(registry.get("help").is_some());
    }

    #[test]
    fn test_reserve_after_construction() {
        let mut registry = registry(&["greet"]);
        registry.reserve("?");
        registry.reserve("?");
        assert_eq!(registry.reserved, vec!["?".to_string()]);
        assert!(matches!(
            registry.register(Command::new("?")),
            Err(RegistrationError::ReservedIdentifier { .. })
        ));
    }

    #[test]
    fn test_builder_reserve() {
        let result = Registry::builder()
            .reserve("exit")
            .command(Command::new("exit"))
            .build();
        assert!(matches!(
            result,
            Err(RegistrationError::ReservedIdentifier { .. })
        ));
    }
}
