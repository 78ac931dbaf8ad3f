//! Core business logic of the interactive command line.
//!
//! This module provides:
//! - [`parser`] tokenizing of console lines
//! - [`Registry`] command registration and longest-prefix matching
//! - [`bind`] typed parameter binding and validation
//! - [`suggest`] context-sensitive autocompletion
//! - [`Console`] dispatching one line end to end

mod autocomplete;
pub mod binder;
mod console;
pub mod error;
pub mod parser;
mod registry;

pub use autocomplete::{suggest, CompletionLists};
pub use binder::bind;
pub use console::{Console, HelpRequest, Outcome};
pub use error::{BindError, ConsoleError, RegistrationError};
pub use registry::{Registry, RegistryBuilder};
