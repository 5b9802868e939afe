//! Configuration for the odl converter
//!
//! Settings resolve in layers, later ones winning: the defaults embedded from
//! `defaults/odl.default.toml`, then any TOML files, then individual key overrides
//! (the command line). The merged result deserializes into [`OdlConfig`] and is
//! validated before use.

use crate::odl::parsing::{ParseOptions, TrailingPolicy};
use crate::odl::ConvertOptions;
use config::{Config, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_TOML: &str = include_str!("../../defaults/odl.default.toml");

/// Largest accepted JSON indentation
pub const MAX_INDENT: usize = 16;

/// Largest accepted `parse.max_depth`; serializing deeper documents risks the stack
pub const MAX_NESTING_DEPTH: usize = 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct OdlConfig {
    pub parse: ParseConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub terminator: String,
    pub trailing: TrailingPolicy,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub indent: usize,
}

impl OdlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Message(msg));

        if self.parse.terminator.is_empty() {
            return invalid("parse.terminator must not be empty".to_string());
        }
        if !(1..=MAX_NESTING_DEPTH).contains(&self.parse.max_depth) {
            return invalid(format!(
                "parse.max_depth must be between 1 and {MAX_NESTING_DEPTH}, got {}",
                self.parse.max_depth
            ));
        }
        if self.output.indent > MAX_INDENT {
            return invalid(format!(
                "output.indent must be at most {MAX_INDENT}, got {}",
                self.output.indent
            ));
        }
        Ok(())
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            terminator: self.parse.terminator.clone(),
            parse: ParseOptions {
                trailing: self.parse.trailing,
                max_depth: self.parse.max_depth,
            },
        }
    }
}

/// Collects configuration layers; nothing is read until [`ConfigLoader::load`].
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    files: Vec<(PathBuf, bool)>,
    overrides: Vec<(String, ValueKind)>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a TOML file layer. A missing `required` file fails the load.
    pub fn file(mut self, path: impl Into<PathBuf>, required: bool) -> Self {
        self.files.push((path.into(), required));
        self
    }

    /// Override one dotted key, e.g. `("output.format", "yaml")`.
    pub fn set(mut self, key: &str, value: impl Into<ValueKind>) -> Self {
        self.overrides.push((key.to_string(), value.into()));
        self
    }

    pub fn load(self) -> Result<OdlConfig, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        for (path, required) in self.files {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }
        for (key, value) in self.overrides {
            builder = builder.set_override(key, value)?;
        }

        let config: OdlConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

/// The embedded defaults alone
pub fn load_defaults() -> Result<OdlConfig, ConfigError> {
    ConfigLoader::new().load()
}
