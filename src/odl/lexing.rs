//! Statement tokenization
//!
//! Splits raw ODL text into an ordered sequence of trimmed, non-empty statements.
//! Every `;` is first rewritten to the statement terminator, so semicolons always
//! separate statements regardless of the chosen terminator. No syntax is checked here;
//! malformed fragments are passed through for the parser to reject.

use std::fmt;

/// Terminator used when none is configured.
pub const DEFAULT_TERMINATOR: &str = "\n";

/// Separator that always ends a statement, whatever the terminator.
pub const STATEMENT_SEPARATOR: char = ';';

/// One trimmed, non-empty unit of input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    text: String,
    /// 1-based position in the statement sequence
    ordinal: usize,
}

impl Statement {
    pub fn new(text: impl Into<String>, ordinal: usize) -> Self {
        Self {
            text: text.into(),
            ordinal,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "statement #{} '{}'", self.ordinal, self.text)
    }
}

/// Split `source` into statements.
///
/// An empty `terminator` falls back to [`DEFAULT_TERMINATOR`].
pub fn tokenize(source: &str, terminator: &str) -> Vec<Statement> {
    let terminator = if terminator.is_empty() {
        DEFAULT_TERMINATOR
    } else {
        terminator
    };

    source
        .replace(STATEMENT_SEPARATOR, terminator)
        .split(terminator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .enumerate()
        .map(|(index, piece)| Statement::new(piece, index + 1))
        .collect()
}
