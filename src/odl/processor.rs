//! File processing API
//!
//! Reads ODL text, converts it and serializes the document in a named output format.
//!
//! ```rust,ignore
//! use odl::odl::config::load_defaults;
//! use odl::odl::processor::process_file;
//!
//! let config = load_defaults()?;
//! let json = process_file("label.odl", &config)?;
//! ```

use crate::odl::config::OdlConfig;
use crate::odl::convert_with;
use crate::odl::document::Document;
use crate::odl::formats::{FormatError, FormatRegistry};
use crate::odl::parsing::ParseError;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    FileNotFound(String),
    IoError(String),
    Parse(ParseError),
    Format(FormatError),
}

impl ProcessingError {
    /// Short kind name for error reports
    pub fn kind_name(&self) -> &'static str {
        match self {
            ProcessingError::FileNotFound(_) => "FileNotFound",
            ProcessingError::IoError(_) => "IoError",
            ProcessingError::Parse(err) => err.kind().name(),
            ProcessingError::Format(_) => "FormatError",
        }
    }
}

impl std::error::Error for ProcessingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessingError::Parse(err) => Some(err),
            ProcessingError::Format(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::FileNotFound(path) => write!(f, "File not found: {}", path),
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
            ProcessingError::Parse(err) => write!(f, "{}", err),
            ProcessingError::Format(err) => write!(f, "{}", err),
        }
    }
}

impl From<ParseError> for ProcessingError {
    fn from(err: ParseError) -> Self {
        ProcessingError::Parse(err)
    }
}

impl From<FormatError> for ProcessingError {
    fn from(err: FormatError) -> Self {
        ProcessingError::Format(err)
    }
}

/// Convert ODL source according to `config`, returning the serialized document.
pub fn process_source(source: &str, config: &OdlConfig) -> Result<String, ProcessingError> {
    let registry = FormatRegistry::builtin(config.output.indent);
    // an unknown format fails before any parsing
    let formatter = registry.lookup(&config.output.format)?;

    let document: Document = convert_with(source, &config.convert_options())?;
    debug!(format = formatter.name(), keys = document.len(), "serializing document");
    Ok(formatter.serialize(&document)?)
}

/// Process an ODL file according to `config`
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    config: &OdlConfig,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(ProcessingError::FileNotFound(
            file_path.display().to_string(),
        ));
    }

    let content =
        fs::read_to_string(file_path).map_err(|e| ProcessingError::IoError(e.to_string()))?;
    debug!(path = %file_path.display(), bytes = content.len(), "read odl source");

    process_source(&content, config)
}
