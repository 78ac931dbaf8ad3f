//! Console line tokenizer.
//!
//! Supports:
//! - Space-separated words: `calc 1 + 2`
//! - Quoted spans kept as one token: `greet "John Smith"`
//! - Flags for named parameters: `-t json`, `--type json`
//!
//! The tokenizer is pure and shared by the binder and the autocomplete
//! resolver.

mod flags;
mod lexer;

pub use flags::{flag_for, flag_name, is_flag};
pub use lexer::Lexer;

/// Split a line into tokens, honoring quoted spans.
pub fn tokenize(line: &str) -> Vec<String> {
    Lexer::new(line).tokenize()
}

/// Tokens following the command identifier at the start of `line`.
///
/// When the line does not start with `identifier`, its first token is taken
/// to be the identifier.
pub fn tokenize_after(line: &str, identifier: &str) -> Vec<String> {
    match line.strip_prefix(identifier) {
        Some(rest) => tokenize(rest),
        None => Lexer::new(line).skip(1).collect(),
    }
}

// =============================================================================
// Tests
// =============================================================================
