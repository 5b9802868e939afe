//! # odl
//!
//! A converter from Object Description Language (ODL) text to a nested key-value document.
//!
//! ODL is a flat statement grammar: `KEY = VALUE` pairs, nested `GROUP = NAME` /
//! `END_GROUP = NAME` blocks and a terminal `END`. Statements are separated by newlines
//! (or a custom terminator) and by `;`.
//!
//! ```rust,ignore
//! let doc = odl::convert("FOO = 1\nGROUP = BAR\nBAZ = \"hello\"\nEND_GROUP = BAR\nEND\n")?;
//! assert_eq!(serde_json::to_string(&doc)?, r#"{"FOO":1,"BAR":{"BAZ":"hello"}}"#);
//! ```

pub mod odl;

pub use odl::document::Document;
pub use odl::parsing::{ErrorKind, ParseError, ParseOptions, TrailingPolicy};
pub use odl::value::{classify, Value};
pub use odl::{convert, convert_with, ConvertOptions};
