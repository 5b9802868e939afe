//! Named output formats
//!
//! A [`FormatRegistry`] keeps its formatters in registration order, which is also the
//! order `odl list-formats` prints them in.

use crate::odl::document::Document;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter registered under this name
    FormatNotFound(String),
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => {
                write!(f, "Unknown output format '{name}' (see `odl list-formats`)")
            }
            FormatError::SerializationError(msg) => write!(f, "Could not serialize document: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Turns a finished [`Document`] into text.
pub trait Formatter: Send + Sync {
    fn name(&self) -> &'static str;

    /// One line shown by `odl list-formats`
    fn description(&self) -> &'static str;

    fn serialize(&self, doc: &Document) -> Result<String, FormatError>;
}

#[derive(Default)]
pub struct FormatRegistry {
    formatters: Vec<Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `json` (indented by `json_indent` spaces), `json-compact` and `yaml`
    pub fn builtin(json_indent: usize) -> Self {
        let mut registry = Self::empty();
        registry.register(super::JsonFormatter::new(json_indent));
        registry.register(super::CompactJsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }

    /// Adds `formatter`, replacing an earlier one of the same name in place.
    pub fn register(&mut self, formatter: impl Formatter + 'static) {
        let formatter: Box<dyn Formatter> = Box::new(formatter);
        match self.formatters.iter().position(|f| f.name() == formatter.name()) {
            Some(index) => self.formatters[index] = formatter,
            None => self.formatters.push(formatter),
        }
    }

    pub fn lookup(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.formatters
            .iter()
            .find(|f| f.name() == name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Formatter> {
        self.formatters.iter().map(|f| f.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|f| f.name()).collect()
    }
}
