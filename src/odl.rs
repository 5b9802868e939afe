//! Main module for odl library functionality
//!
//! Processing runs in three steps:
//! 1. **Lexing**: the source text is split into statements ([`lexing::tokenize`])
//! 2. **Parsing**: statements are folded into a [`Document`] ([`parsing::parse`])
//! 3. **Classifying**: every value token gets a typed representation ([`value::classify`])
//!
//! Serialization of the resulting document lives in [`formats`]; [`processor`] glues
//! file reading, conversion and serialization together for the command line.

pub mod config;
pub mod document;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod processor;
pub mod value;

use crate::odl::document::Document;
use crate::odl::lexing::DEFAULT_TERMINATOR;
use crate::odl::parsing::{ParseError, ParseOptions};

/// Options for a single conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Statement terminator. `;` always separates statements as well.
    pub terminator: String,
    pub parse: ParseOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            terminator: DEFAULT_TERMINATOR.to_string(),
            parse: ParseOptions::default(),
        }
    }
}

/// Convert ODL source text into a [`Document`] using the default options.
pub fn convert(source: &str) -> Result<Document, ParseError> {
    convert_with(source, &ConvertOptions::default())
}

/// Convert ODL source text into a [`Document`].
///
/// Side-effect free: each call owns its statements, group stack and document.
pub fn convert_with(source: &str, options: &ConvertOptions) -> Result<Document, ParseError> {
    let statements = lexing::tokenize(source, &options.terminator);
    parsing::parse_with(statements, &options.parse)
}
