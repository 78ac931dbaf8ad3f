//! Interactive command line.
//!
//! Register commands with typed parameters, then feed the console one line
//! at a time: it matches the line to a command, binds and validates the
//! parameters and runs the command's handler. While the user types, the
//! console suggests command names, flags and parameter values.
//!
//! - [`models`] - [`Command`], [`Parameter`] and bound [`Arguments`]
//! - [`core`] - tokenizer, registry, binder, autocompletion and [`Console`]
//! - [`config`] - line grammar constants and [`ConsoleConfig`]

pub mod config;
pub mod core;
pub mod models;

pub use config::ConsoleConfig;
pub use crate::core::{
    BindError, CompletionLists, Console, ConsoleError, HelpRequest, Outcome, RegistrationError,
    Registry,
};
pub use models::{Arguments, Command, Parameter, ParameterKind, Value};
