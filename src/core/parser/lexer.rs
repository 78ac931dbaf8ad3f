//! Lexer splitting a console line into tokens.
//!
//! A double-quoted span is one token when its opening quote follows the
//! start of the line, a space or a comma, and its closing quote precedes
//! the end of the line, a space or a comma. Spaces inside such a span are
//! masked with [`QUOTE_SENTINEL`] before the line is split and restored
//! afterwards. Quotes that do not form a span are ordinary characters.

use crate::config::QUOTE_SENTINEL;

// ============================================================================
// Quoted Spans
// ============================================================================

/// Byte offsets of the opening and closing quote of a span.
#[derive(Debug, Clone, Copy, PartialEq)]
struct QuotedSpan {
    open: usize,
    close: usize,
}

fn opens_span(prev: Option<char>) -> bool {
    matches!(prev, None | Some(' ') | Some(','))
}

fn closes_span(next: Option<char>) -> bool {
    matches!(next, None | Some(' ') | Some(','))
}

/// Find the quoted spans of a line, left to right.
///
/// Span content cannot contain a quote, so a span always closes at the next
/// quote. Empty spans (`""`) are not spans.
fn quoted_spans(line: &str) -> Vec<QuotedSpan> {
    let quotes: Vec<usize> = line.match_indices('"').map(|(idx, _)| idx).collect();
    let mut spans = Vec::new();
    let mut k = 0;

    while k + 1 < quotes.len() {
        let (open, close) = (quotes[k], quotes[k + 1]);
        let prev = line[..open].chars().next_back();
        let next = line[close + 1..].chars().next();

        if close > open + 1 && opens_span(prev) && closes_span(next) {
            spans.push(QuotedSpan { open, close });
            k += 2;
        } else {
            k += 1;
        }
    }

    spans
}

/// Drop the quotes of every span and mask the spaces they enclose.
fn mask_quoted_spans(line: &str) -> String {
    let mut masked = String::with_capacity(line.len());
    let mut cursor = 0;

    for span in quoted_spans(line) {
        masked.push_str(&line[cursor..span.open]);
        masked.push_str(&line[span.open + 1..span.close].replace(' ', QUOTE_SENTINEL));
        cursor = span.close + 1;
    }
    masked.push_str(&line[cursor..]);

    masked
}

// ============================================================================
// Lexer
// ============================================================================

/// Lexer for console lines.
pub struct Lexer {
    masked: String,
    pos: usize,
}

impl Lexer {
    /// Create a new lexer for the given line.
    pub fn new(line: &str) -> Self {
        Self {
            masked: mask_quoted_spans(line),
            pos: 0,
        }
    }

    /// Tokenize the entire line into a vector.
    ///
    /// This is a convenience method that collects all tokens.
    /// For lazy evaluation, use the `Iterator` implementation directly.
    pub fn tokenize(self) -> Vec<String> {
        self.collect()
    }
}

impl Iterator for Lexer {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.masked.len() {
            let rest = &self.masked[self.pos..];
            let end = rest.find(' ').unwrap_or(rest.len());
            let token = rest[..end].replace(QUOTE_SENTINEL, " ");
            self.pos += end + 1;

            if !token.trim().is_empty() {
                return Some(token);
            }
        }
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        Lexer::new(line).tokenize()
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(tokens("calc 1 + 2"), vec!["calc", "1", "+", "2"]);
    }

    #[test]
    fn test_quoted_span() {
        assert_eq!(tokens("greet \"John Smith\""), vec!["greet", "John Smith"]);
    }

    #[test]
    fn test_adjacent_quoted_spans() {
        assert_eq!(tokens("\"a b\" \"c d\""), vec!["a b", "c d"]);
    }

    #[test]
    fn test_quoted_span_inside_list() {
        assert_eq!(
            tokens("tag --names a,\"b c\",d"),
            vec!["tag", "--names", "a,b c,d"]
        );
    }

    #[test]
    fn test_repeated_spaces_discarded() {
        assert_eq!(tokens("  ls    -l  "), vec!["ls", "-l"]);
    }

    #[test]
    fn test_unbalanced_quote_is_literal() {
        assert_eq!(tokens("say \"hello world"), vec!["say", "\"hello", "world"]);
    }

    #[test]
    fn test_quote_inside_word_is_literal() {
        assert_eq!(tokens("x\"a b\""), vec!["x\"a", "b\""]);
    }

    #[test]
    fn test_closing_quote_needs_boundary() {
        assert_eq!(
            tokens("\"a b\"c \"d e\""),
            vec!["\"a", "b\"c", "d e"]
        );
    }

    #[test]
    fn test_empty_quotes_are_literal() {
        assert_eq!(tokens("echo \"\""), vec!["echo", "\"\""]);
    }

    #[test]
    fn test_spaces_preserved_verbatim() {
        assert_eq!(tokens("note \"two  spaces\""), vec!["note", "two  spaces"]);
    }

    #[test]
    fn test_empty_line() {
        assert!(tokens("").is_empty());
        assert!(tokens("   ").is_empty());
    }

    #[test]
    fn test_iterator_take() {
        let first_two: Vec<_> = Lexer::new("a b c d").take(2).collect();
        assert_eq!(first_two, vec!["a", "b"]);
    }

    #[test]
    fn test_quoted_spans_offsets() {
        assert_eq!(
            quoted_spans("x \"a b\""),
            vec![QuotedSpan { open: 2, close: 6 }]
        );
        assert!(quoted_spans("x\"a b\"").is_empty());
    }
}
