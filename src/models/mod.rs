//! Data models for declared commands and bound values.
//!
//! Contains domain types for:
//! - [`Command`], [`Handler`] - Registered commands and their callbacks
//! - [`Parameter`], [`ParameterKind`] - Parameter descriptors and constraints
//! - [`Value`], [`Arguments`] - Typed values bound for one invocation

mod command;
mod parameter;
mod value;

pub use command::{Command, Handler, HandlerError, HandlerResult};
pub use parameter::{Parameter, ParameterKind};
pub use value::{Arguments, Value};
