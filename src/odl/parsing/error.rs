//! Parse errors
//!
//! Every error is fatal to the parse that produced it: there is no partial document
//! and no recovery.

use crate::odl::lexing::Statement;
use std::fmt;

/// Stable names for the kinds of malformed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    StatementSyntax,
    GroupMismatch,
    UnclosedGroup,
    UnexpectedEndOfInput,
    TrailingStatement,
    NestingTooDeep,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::StatementSyntax => "StatementSyntaxError",
            ErrorKind::GroupMismatch => "GroupMismatchError",
            ErrorKind::UnclosedGroup => "UnclosedGroupError",
            ErrorKind::UnexpectedEndOfInput => "UnexpectedEndOfInputError",
            ErrorKind::TrailingStatement => "TrailingStatementError",
            ErrorKind::NestingTooDeep => "NestingTooDeepError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while parsing statements into a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Statement is neither `END`, a group boundary, nor `KEY = VALUE`
    StatementSyntax { statement: Statement },
    /// `END_GROUP` names something other than the innermost open group.
    /// `expected` is `None` when no group is open.
    GroupMismatch {
        expected: Option<String>,
        found: String,
        statement: Statement,
    },
    /// Terminal `END` reached while groups are still open
    UnclosedGroup {
        open_groups: Vec<String>,
        statement: Statement,
    },
    /// Statements ran out before `END`
    UnexpectedEndOfInput { open_groups: Vec<String> },
    /// A statement follows the terminal `END` and trailing content is rejected
    TrailingStatement { statement: Statement },
    /// A group opens while `limit` groups are already open
    NestingTooDeep { limit: usize, statement: Statement },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::StatementSyntax { .. } => ErrorKind::StatementSyntax,
            ParseError::GroupMismatch { .. } => ErrorKind::GroupMismatch,
            ParseError::UnclosedGroup { .. } => ErrorKind::UnclosedGroup,
            ParseError::UnexpectedEndOfInput { .. } => ErrorKind::UnexpectedEndOfInput,
            ParseError::TrailingStatement { .. } => ErrorKind::TrailingStatement,
            ParseError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
        }
    }

    /// The statement that triggered the error, if there was one
    pub fn statement(&self) -> Option<&Statement> {
        match self {
            ParseError::StatementSyntax { statement }
            | ParseError::GroupMismatch { statement, .. }
            | ParseError::UnclosedGroup { statement, .. }
            | ParseError::TrailingStatement { statement }
            | ParseError::NestingTooDeep { statement, .. } => Some(statement),
            ParseError::UnexpectedEndOfInput { .. } => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::StatementSyntax { statement } => {
                write!(f, "Malformed {statement}: expected 'KEY = VALUE', a group boundary or 'END'")
            }
            ParseError::GroupMismatch {
                expected: Some(expected),
                found,
                statement,
            } => write!(
                f,
                "Group mismatch at {statement}: expected END_GROUP = {expected}, found END_GROUP = {found}"
            ),
            ParseError::GroupMismatch {
                expected: None,
                found,
                statement,
            } => write!(
                f,
                "Group mismatch at {statement}: END_GROUP = {found} closes no open group"
            ),
            ParseError::UnclosedGroup {
                open_groups,
                statement,
            } => write!(
                f,
                "Unclosed group at {statement}: still open: {}",
                open_groups.join(" > ")
            ),
            ParseError::UnexpectedEndOfInput { open_groups } if open_groups.is_empty() => {
                write!(f, "Unexpected end of input: missing terminal END")
            }
            ParseError::UnexpectedEndOfInput { open_groups } => write!(
                f,
                "Unexpected end of input: missing END_GROUP for {}",
                open_groups.join(" > ")
            ),
            ParseError::TrailingStatement { statement } => {
                write!(f, "Unexpected {statement} after terminal END")
            }
            ParseError::NestingTooDeep { limit, statement } => {
                write!(f, "Nesting too deep at {statement}: at most {limit} open groups allowed")
            }
        }
    }
}

impl std::error::Error for ParseError {}
