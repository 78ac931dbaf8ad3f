//! Demo front end for the interactive command line.
//!
//! - [`commands`] - example commands and their shared state
//! - [`editor`] - rustyline completion and hints
//! - [`render`] - help pages and outcome messages

pub mod commands;
pub mod editor;
pub mod render;
