//! Output formats for converted documents
//!
//! - `json`: indented JSON (four spaces unless configured otherwise)
//! - `json-compact`: single-line JSON
//! - `yaml`: YAML

pub mod json;
pub mod registry;
pub mod yaml;

pub use json::{CompactJsonFormatter, JsonFormatter, DEFAULT_JSON_INDENT};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use yaml::YamlFormatter;
