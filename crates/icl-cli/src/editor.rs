//! Line editor integration.
//!
//! Tab completion and ghost-text hints both come from
//! [`Console::suggest`]; the editor only decides which part of the line a
//! candidate replaces.

use std::cell::RefCell;
use std::rc::Rc;

use icl::Console;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Rustyline helper backed by a shared console.
pub struct ConsoleHelper {
    console: Rc<RefCell<Console>>,
}

impl ConsoleHelper {
    pub fn new(console: Rc<RefCell<Console>>) -> Self {
        Self { console }
    }

    fn candidates(&self, line: &str) -> Vec<String> {
        match self.console.try_borrow() {
            Ok(console) => console.suggest(line),
            Err(_) => Vec::new(),
        }
    }
}

/// Byte offset where the word under the cursor starts.
///
/// Words are delimited by spaces and, for paths, by `/`.
pub fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .rfind([' ', '/'])
        .map(|idx| idx + 1)
        .unwrap_or(0)
}

/// Quote candidates that would otherwise split into several tokens.
fn replacement(candidate: &str) -> String {
    if candidate.contains(' ') {
        format!("\"{}\"", candidate)
    } else {
        candidate.to_string()
    }
}

impl Completer for ConsoleHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = word_start(line, pos);
        let pairs = self
            .candidates(&line[..pos])
            .into_iter()
            .map(|candidate| Pair {
                replacement: replacement(&candidate),
                display: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ConsoleHelper {
    type Hint = String;

    /// Remainder of the only candidate extending the current word.
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let word = &line[word_start(line, pos)..pos];
        if word.is_empty() {
            return None;
        }

        let candidates = self.candidates(line);
        match candidates.as_slice() {
            [only] if only.len() > word.len() && only.starts_with(word) => {
                Some(only[word.len()..].to_string())
            }
            _ => None,
        }
    }
}

impl Highlighter for ConsoleHelper {}

impl Validator for ConsoleHelper {}

impl Helper for ConsoleHelper {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_start() {
        assert_eq!(word_start("gre", 3), 0);
        assert_eq!(word_start("geo 1.1.1.1 --ty", 16), 12);
        assert_eq!(word_start("stat src/co", 11), 9);
        assert_eq!(word_start("greet ", 6), 6);
    }

    #[test]
    fn test_replacement_quotes_spaces() {
        assert_eq!(replacement("milk"), "milk");
        assert_eq!(replacement("buy milk"), "\"buy milk\"");
    }

    #[test]
    fn test_candidates_follow_console() {
        let console = Rc::new(RefCell::new(Console::default()));
        console
            .borrow_mut()
            .register(icl::Command::new("greet"))
            .unwrap();
        let helper = ConsoleHelper::new(Rc::clone(&console));
        assert_eq!(helper.candidates("gr"), vec!["greet"]);

        let _busy = console.borrow_mut();
        assert!(helper.candidates("gr").is_empty());
    }
}
