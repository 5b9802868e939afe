//! Group stack
//!
//! Tracks the currently open groups, innermost last, together with the document each
//! one is accumulating. Closing a group folds its document into the enclosing level.

use crate::odl::document::Document;
use crate::odl::lexing::Statement;
use crate::odl::parsing::error::ParseError;
use crate::odl::value::Value;

#[derive(Debug)]
struct OpenGroup {
    name: String,
    document: Document,
}

#[derive(Debug)]
pub struct GroupStack {
    root: Document,
    open: Vec<OpenGroup>,
    max_depth: usize,
}

impl GroupStack {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            root: Document::new(),
            open: Vec::new(),
            max_depth,
        }
    }

    /// Open a group named `name`, failing once `max_depth` groups are already open.
    pub fn open(&mut self, name: &str, statement: &Statement) -> Result<(), ParseError> {
        if self.open.len() >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                statement: statement.clone(),
            });
        }
        self.open.push(OpenGroup {
            name: name.to_string(),
            document: Document::new(),
        });
        Ok(())
    }

    /// Close the innermost group, which must be called `name`.
    pub fn close(&mut self, name: &str, statement: &Statement) -> Result<(), ParseError> {
        match self.open.last() {
            Some(innermost) if innermost.name == name => {}
            innermost => {
                return Err(ParseError::GroupMismatch {
                    expected: innermost.map(|group| group.name.clone()),
                    found: name.to_string(),
                    statement: statement.clone(),
                })
            }
        }

        if let Some(group) = self.open.pop() {
            self.current_mut()
                .insert(group.name, Value::Group(group.document));
        }
        Ok(())
    }

    /// Document of the innermost open group, or the root
    pub fn current_mut(&mut self) -> &mut Document {
        match self.open.last_mut() {
            Some(group) => &mut group.document,
            None => &mut self.root,
        }
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Open group names, outermost first
    pub fn names(&self) -> Vec<String> {
        self.open.iter().map(|group| group.name.clone()).collect()
    }

    /// Hand out the root document once every group is closed.
    pub fn into_root(self) -> Result<Document, Vec<String>> {
        if self.is_empty() {
            Ok(self.root)
        } else {
            Err(self.names())
        }
    }
}
