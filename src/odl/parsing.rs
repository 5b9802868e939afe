//! Grammar parsing
//!
//! Folds the statement sequence into a [`Document`]:
//!
//! ```text
//! document    := statement* END
//! statement   := group_open | group_close | key_value
//! group_open  := ("GROUP" | "BEGIN_GROUP") "=" name statement* group_close
//! group_close := "END_GROUP" "=" name
//! key_value   := key "=" value
//! ```
//!
//! Nesting is tracked on an explicit [`GroupStack`] rather than the call stack. Depth is
//! still capped by [`ParseOptions::max_depth`] because serializing the finished document
//! recurses once per level. Statements are pulled from a [`StatementCursor`] front to back
//! and never re-read.

pub mod error;
pub mod groups;

pub use error::{ErrorKind, ParseError};
pub use groups::GroupStack;

use crate::odl::document::Document;
use crate::odl::lexing::Statement;
use crate::odl::value::classify;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

pub const END_KEYWORD: &str = "END";
pub const GROUP_KEYWORD: &str = "GROUP";
pub const BEGIN_GROUP_KEYWORD: &str = "BEGIN_GROUP";
pub const END_GROUP_KEYWORD: &str = "END_GROUP";

/// `KEY = VALUE`: word-character key, `=` with at least one space on each side
static KEY_VALUE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<key>\w+)[ ]+=[ ]+(?P<value>.+)$").unwrap());

/// What to do with statements after the terminal `END`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingPolicy {
    #[default]
    Ignore,
    Reject,
}

impl FromStr for TrailingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(TrailingPolicy::Ignore),
            "reject" => Ok(TrailingPolicy::Reject),
            other => Err(format!(
                "Invalid trailing policy '{other}' (expected 'ignore' or 'reject')"
            )),
        }
    }
}

impl fmt::Display for TrailingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailingPolicy::Ignore => f.write_str("ignore"),
            TrailingPolicy::Reject => f.write_str("reject"),
        }
    }
}

/// Default cap on group nesting
pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub trailing: TrailingPolicy,
    /// Deepest allowed group nesting; opening one more group fails
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trailing: TrailingPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Front-to-back cursor over the statements still to be parsed
#[derive(Debug)]
pub struct StatementCursor {
    statements: std::vec::IntoIter<Statement>,
}

impl StatementCursor {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            statements: statements.into_iter(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.statements.len()
    }
}

impl Iterator for StatementCursor {
    type Item = Statement;

    fn next(&mut self) -> Option<Statement> {
        self.statements.next()
    }
}

/// Parse statements with the default options.
pub fn parse(statements: Vec<Statement>) -> Result<Document, ParseError> {
    parse_with(statements, &ParseOptions::default())
}

pub fn parse_with(
    statements: Vec<Statement>,
    options: &ParseOptions,
) -> Result<Document, ParseError> {
    let mut cursor = StatementCursor::new(statements);
    let mut groups = GroupStack::with_max_depth(options.max_depth);
    debug!(statements = cursor.remaining(), "parsing odl statements");

    loop {
        let statement = cursor
            .next()
            .ok_or_else(|| ParseError::UnexpectedEndOfInput {
                open_groups: groups.names(),
            })?;

        if statement.text() == END_KEYWORD {
            return finish(groups, statement, cursor, options);
        }

        let (key, value) = split_key_value(&statement)?;
        match key {
            GROUP_KEYWORD | BEGIN_GROUP_KEYWORD => {
                trace!(group = value, depth = groups.depth() + 1, "open group");
                groups.open(value, &statement)?;
            }
            END_GROUP_KEYWORD => {
                groups.close(value, &statement)?;
                trace!(group = value, depth = groups.depth(), "close group");
            }
            _ => {
                groups.current_mut().insert(key, classify(value));
            }
        }
    }
}

fn finish(
    groups: GroupStack,
    end: Statement,
    mut cursor: StatementCursor,
    options: &ParseOptions,
) -> Result<Document, ParseError> {
    let document = groups
        .into_root()
        .map_err(|open_groups| ParseError::UnclosedGroup {
            open_groups,
            statement: end,
        })?;

    let trailing = cursor.remaining();
    if trailing > 0 {
        match options.trailing {
            TrailingPolicy::Reject => {
                if let Some(statement) = cursor.next() {
                    return Err(ParseError::TrailingStatement { statement });
                }
            }
            TrailingPolicy::Ignore => {
                debug!(trailing, "ignoring statements after END");
            }
        }
    }

    debug!(keys = document.len(), "parsed odl document");
    Ok(document)
}

/// Split a `KEY = VALUE` statement into its key and raw value.
pub fn split_key_value(statement: &Statement) -> Result<(&str, &str), ParseError> {
    let captures = KEY_VALUE_REGEX
        .captures(statement.text())
        .ok_or_else(|| ParseError::StatementSyntax {
            statement: statement.clone(),
        })?;

    match (captures.name("key"), captures.name("value")) {
        (Some(key), Some(value)) => Ok((key.as_str(), value.as_str())),
        _ => Err(ParseError::StatementSyntax {
            statement: statement.clone(),
        }),
    }
}
