//! Console session.
//!
//! A [`Console`] owns everything a read loop needs: the command registry,
//! the autocompletion lists and the configuration. [`Console::execute`]
//! runs one line end to end and reports what happened as an [`Outcome`];
//! rendering that outcome is up to the host.

use tracing::{debug, warn};

use crate::config::ConsoleConfig;
use crate::core::autocomplete::{self, CompletionLists};
use crate::core::binder;
use crate::core::error::{BindError, ConsoleError, RegistrationError};
use crate::core::registry::Registry;
use crate::models::{Arguments, Command};

/// What a help line asked for.
#[derive(Debug, Clone, Copy)]
pub enum HelpRequest<'a> {
    /// `help` alone: list every command.
    Overview,
    /// `help <word>` naming a registered command.
    Command(&'a Command),
    /// `help <word>` matching no command.
    Unknown(&'a str),
}

/// Result of executing one line.
#[derive(Debug)]
pub enum Outcome<'a> {
    /// Blank line; nothing to do.
    Empty,
    Help(HelpRequest<'a>),
    /// No command identifier prefixes the line.
    NoMatch,
    /// The line matched a command but its parameters did not bind.
    Rejected {
        command: &'a Command,
        error: BindError,
    },
    Executed { command: &'a Command },
    /// The handler failed and the failure was caught.
    Failed {
        command: &'a Command,
        message: String,
    },
}

/// Interactive command line session.
///
/// ```
/// use icl::config::ConsoleConfig;
/// use icl::core::{Console, Outcome};
/// use icl::models::{Command, Parameter};
///
/// let mut console = Console::new(ConsoleConfig::default());
/// console
///     .register(
///         Command::new("count")
///             .parameter(Parameter::integer("number", 1, 100).required())
///             .handler(|args| {
///                 assert_eq!(args.integer("number"), Some(10));
///                 Ok(())
///             }),
///     )
///     .unwrap();
///
/// assert!(matches!(console.execute("count 10"), Ok(Outcome::Executed { .. })));
/// assert!(matches!(console.execute("count 150"), Ok(Outcome::Rejected { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct Console {
    registry: Registry,
    lists: CompletionLists,
    config: ConsoleConfig,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl Console {
    /// Empty session reserving the configured help identifier.
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            registry: Registry::with_reserved([config.help_identifier.clone()]),
            lists: CompletionLists::new(),
            config,
        }
    }

    /// Session over an already built registry.
    ///
    /// Fails if a registered command uses the configured help identifier;
    /// otherwise that identifier is reserved for later registrations.
    pub fn with_registry(
        mut registry: Registry,
        config: ConsoleConfig,
    ) -> Result<Self, ConsoleError> {
        if registry.get(&config.help_identifier).is_some() {
            return Err(RegistrationError::ReservedIdentifier {
                identifier: config.help_identifier,
            }
            .into());
        }
        registry.reserve(config.help_identifier.clone());
        Ok(Self {
            registry,
            lists: CompletionLists::new(),
            config,
        })
    }

    pub fn register(&mut self, command: Command) -> Result<(), RegistrationError> {
        self.registry.register(command)
    }

    /// Register or replace a named autocompletion list.
    pub fn set_completion_list<I, S>(&mut self, name: impl Into<String>, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists.set(name, items);
    }

    pub fn completion_lists(&self) -> &CompletionLists {
        &self.lists
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Completion candidates for a partially typed line.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        autocomplete::suggest(
            partial,
            &self.registry,
            &self.lists,
            &self.config.help_identifier,
        )
    }

    pub fn match_command(&self, line: &str) -> Option<&Command> {
        self.registry.match_line(line)
    }

    pub fn bind(&self, command: &Command, line: &str) -> Result<Arguments, BindError> {
        binder::bind(command, line)
    }

    /// Run one line: help, match, bind, then the command's handler.
    ///
    /// Handler failures are reported as [`Outcome::Failed`] unless
    /// `catch_handler_errors` is off, in which case they are returned.
    pub fn execute<'a>(&'a self, line: &'a str) -> Result<Outcome<'a>, ConsoleError> {
        if line.trim().is_empty() {
            return Ok(Outcome::Empty);
        }

        if let Some(request) = self.help_request(line) {
            return Ok(Outcome::Help(request));
        }

        let Some(command) = self.match_command(line) else {
            debug!("No command matches '{}'", line);
            return Ok(Outcome::NoMatch);
        };

        let arguments = match self.bind(command, line) {
            Ok(arguments) => arguments,
            Err(error) => {
                debug!("Rejected '{}': {}", command.identifier(), error);
                return Ok(Outcome::Rejected { command, error });
            }
        };

        match command.invoke(&arguments) {
            Ok(()) => Ok(Outcome::Executed { command }),
            Err(source) if self.config.catch_handler_errors => {
                warn!("Command '{}' failed: {}", command.identifier(), source);
                Ok(Outcome::Failed {
                    command,
                    message: source.to_string(),
                })
            }
            Err(source) => Err(ConsoleError::Handler {
                command: command.identifier().to_string(),
                source,
            }),
        }
    }

    /// Help request carried by `line`, if its first word is the help identifier.
    fn help_request<'a>(&'a self, line: &'a str) -> Option<HelpRequest<'a>> {
        let mut words = line.split(' ');
        if words.next()? != self.config.help_identifier {
            return None;
        }

        let request = match words.find(|w| !w.is_empty()) {
            None => HelpRequest::Overview,
            Some(word) => match self.match_command(word) {
                Some(command) => HelpRequest::Command(command),
                None => HelpRequest::Unknown(word),
            },
        };
        Some(request)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Parameter;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn console() -> Console {
        let mut console = Console::default();
        console
            .register(Command::new("greet").parameter(Parameter::text("name").required()))
            .unwrap();
        console
            .register(Command::new("fail").handler(|_| Err("boom".into())))
            .unwrap();
        console
    }

    #[test]
    fn test_empty_line() {
        assert!(matches!(console().execute("   "), Ok(Outcome::Empty)));
    }

    #[test]
    fn test_help_overview() {
        let console = console();
        assert!(matches!(
            console.execute("help"),
            Ok(Outcome::Help(HelpRequest::Overview))
        ));
    }

    #[test]
    fn test_help_command() {
        let console = console();
        match console.execute("help greet") {
            Ok(Outcome::Help(HelpRequest::Command(command))) => {
                assert_eq!(command.identifier(), "greet")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(matches!(
            console.execute("help nope"),
            Ok(Outcome::Help(HelpRequest::Unknown("nope")))
        ));
    }

    #[test]
    fn test_help_prefix_is_not_help() {
        let console = console();
        assert!(matches!(console.execute("helpme"), Ok(Outcome::NoMatch)));
    }

    #[test]
    fn test_no_match() {
        assert!(matches!(console().execute("launch"), Ok(Outcome::NoMatch)));
    }

    #[test]
    fn test_rejected() {
        let console = console();
        match console.execute("greet") {
            Ok(Outcome::Rejected { command, error }) => {
                assert_eq!(command.identifier(), "greet");
                assert_eq!(error.parameter(), "name");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_handler_receives_arguments() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let mut console = Console::default();
        console
            .register(
                Command::new("greet")
                    .parameter(Parameter::text("name").required())
                    .handler(move |args| {
                        *sink.borrow_mut() = args.text("name").map(str::to_string);
                        Ok(())
                    }),
            )
            .unwrap();

        assert!(matches!(
            console.execute("greet \"John Smith\""),
            Ok(Outcome::Executed { .. })
        ));
        assert_eq!(seen.borrow().as_deref(), Some("John Smith"));
    }

    #[test]
    fn test_handler_failure_caught() {
        match console().execute("fail") {
            Ok(Outcome::Failed { message, .. }) => assert_eq!(message, "boom"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_handler_failure_reraised() {
        let config = ConsoleConfig {
            catch_handler_errors: false,
            ..ConsoleConfig::default()
        };
        let mut console = Console::new(config);
        console
            .register(Command::new("fail").handler(|_| Err("boom".into())))
            .unwrap();
        let err = console.execute("fail").unwrap_err();
        assert!(matches!(err, ConsoleError::Handler { ref command, .. } if command == "fail"));
    }

    #[test]
    fn test_custom_help_identifier() {
        let config = ConsoleConfig {
            help_identifier: "?".to_string(),
            ..ConsoleConfig::default()
        };
        let mut console = Console::new(config);
        assert!(matches!(
            console.register(Command::new("?")),
            Err(RegistrationError::ReservedIdentifier { .. })
        ));
        console.register(Command::new("help")).unwrap();
        assert!(matches!(
            console.execute("?"),
            Ok(Outcome::Help(HelpRequest::Overview))
        ));
        assert_eq!(console.suggest(""), vec!["help", "?"]);
    }

    #[test]
    fn test_with_registry_checks_help_identifier() {
        let registry = Registry::builder().command(Command::new("info")).build().unwrap();
        let config = ConsoleConfig {
            help_identifier: "info".to_string(),
            ..ConsoleConfig::default()
        };
        assert!(Console::with_registry(registry, config).is_err());
    }

    #[test]
    fn test_with_registry_reserves_help_identifier() {
        let registry = Registry::builder().command(Command::new("help")).build().unwrap();
        let config = ConsoleConfig {
            help_identifier: "?".to_string(),
            ..ConsoleConfig::default()
        };
        let mut console = Console::with_registry(registry, config).unwrap();
        assert!(matches!(
            console.register(Command::new("?")),
            Err(RegistrationError::ReservedIdentifier { .. })
        ));
        assert!(matches!(
            console.execute("help"),
            Ok(Outcome::Executed { command }) if command.identifier() == "help"
        ));
        assert!(matches!(
            console.execute("?"),
            Ok(Outcome::Help(HelpRequest::Overview))
        ));
    }

    #[test]
    fn test_completion_list_replaced() {
        let mut console = Console::default();
        console
            .register(
                Command::new("todo-done")
                    .parameter(Parameter::text("item").required().completion_list("todos")),
            )
            .unwrap();
        console.set_completion_list("todos", ["milk"]);
        assert_eq!(console.suggest("todo-done m"), vec!["milk"]);
        console.set_completion_list("todos", Vec::<String>::new());
        assert!(console.suggest("todo-done m").is_empty());
    }
}
