//! Command declarations.

use std::error::Error;
use std::fmt;
use std::rc::Rc;

use super::{Arguments, Parameter};

/// Error returned by a command handler.
pub type HandlerError = Box<dyn Error + Send + Sync>;

/// Result of running a command handler.
pub type HandlerResult = Result<(), HandlerError>;

/// Callback executed with the bound arguments of a command.
pub type Handler = Rc<dyn Fn(&Arguments) -> HandlerResult>;

/// A registered console command.
///
/// Built once during registration and read-only afterwards.
///
/// ```
/// use icl::models::{Command, Parameter};
///
/// let greet = Command::new("greet")
///     .describe("Greets you by name")
///     .example("greet John")
///     .parameter(Parameter::text("name").describe("Your name").required())
///     .handler(|args| {
///         println!("Hello {}!", args.text("name").unwrap_or_default());
///         Ok(())
///     });
/// assert!(greet.matches_line("greet John"));
/// ```
#[derive(Clone)]
pub struct Command {
    identifier: String,
    description: String,
    examples: Vec<String>,
    parameters: Vec<Parameter>,
    handler: Option<Handler>,
}

impl Command {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            description: String::from("No description provided"),
            examples: Vec::new(),
            parameters: Vec::new(),
            handler: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an example line shown on the command's help page.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Append a parameter. Required parameters must come first.
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Arguments) -> HandlerResult + 'static,
    {
        self.handler = Some(Rc::new(handler));
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Look up a parameter by its declared name.
    pub fn parameter_named(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// Whether the identifier is a literal prefix of `line`.
    pub fn matches_line(&self, line: &str) -> bool {
        line.starts_with(&self.identifier)
    }

    /// Run the handler. Commands without a handler succeed silently.
    pub(crate) fn invoke(&self, arguments: &Arguments) -> HandlerResult {
        match &self.handler {
            Some(handler) => handler(arguments),
            None => Ok(()),
        }
    }

    pub(crate) fn parameters_mut(&mut self) -> &mut [Parameter] {
        &mut self.parameters
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("identifier", &self.identifier)
            .field("description", &self.description)
            .field("examples", &self.examples)
            .field("parameters", &self.parameters)
            .field("handler", &self.handler.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
