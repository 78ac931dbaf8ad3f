//! Parameter binding.
//!
//! Turns the text of a line into the typed [`Arguments`] of its matched
//! command. Parameters are bound in declaration order:
//!
//! - booleans are `true` when their flag appears anywhere on the line
//! - required parameters take the token at their own index
//! - optional parameters take the token after their flag, or their default
//!
//! Binding is all-or-nothing: the first invalid value aborts it.

mod validate;

pub(crate) use validate::normalize_default;

use tracing::debug;

use crate::core::error::BindError;
use crate::core::parser::tokenize_after;
use crate::models::{Arguments, Command, Parameter, Value};

/// Bind every parameter of `command` from `line`.
pub fn bind(command: &Command, line: &str) -> Result<Arguments, BindError> {
    let tokens = tokenize_after(line, command.identifier());
    let mut arguments = Arguments::default();

    for (index, parameter) in command.parameters().iter().enumerate() {
        if let Some(value) = bind_parameter(parameter, index, &tokens)? {
            arguments.insert(parameter.name(), value);
        }
    }

    debug!(
        "Bound {} of {} parameters for '{}'",
        arguments.len(),
        command.parameters().len(),
        command.identifier()
    );
    Ok(arguments)
}

/// Bind one parameter. `None` means an optional parameter without default
/// was not supplied.
fn bind_parameter(
    parameter: &Parameter,
    index: usize,
    tokens: &[String],
) -> Result<Option<Value>, BindError> {
    let flag = parameter.flag();

    if parameter.kind().is_boolean() {
        let present = tokens.iter().any(|t| *t == flag);
        return Ok(Some(Value::Boolean(present)));
    }

    let raw = if parameter.is_positional() {
        tokens
            .get(index)
            .ok_or_else(|| BindError::MissingRequiredParameter {
                parameter: parameter.name().to_string(),
            })?
    } else {
        let Some(at) = tokens.iter().position(|t| *t == flag) else {
            // Defaults were checked at registration
            return Ok(parameter.default().cloned());
        };
        tokens.get(at + 1).ok_or_else(|| BindError::MissingValue {
            parameter: parameter.name().to_string(),
        })?
    };

    validate::parse(parameter, raw).map(Some)
}

// =============================================================================
// Tests
// =============================================================================
