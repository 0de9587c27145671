//! Configuration types for the SAD to OCELOT converter.
//!
//! This module provides configuration structures that control how a
//! lattice is converted. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Example
//!
//! ```
//! # use sadconv::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.convert().root_line().is_none());
//! ```

use serde::Deserialize;

/// Top-level application configuration.
///
/// Groups the conversion settings into a single configuration root so
/// future sections can be added without breaking existing files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Conversion configuration section.
    #[serde(default)]
    convert: ConvertConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified conversion settings.
    pub fn new(convert: ConvertConfig) -> Self {
        Self { convert }
    }

    /// Returns the conversion configuration.
    pub fn convert(&self) -> &ConvertConfig {
        &self.convert
    }

    /// Returns the conversion configuration for modification.
    pub fn convert_mut(&mut self) -> &mut ConvertConfig {
        &mut self.convert
    }
}

/// Settings that control how the output lattice is built.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertConfig {
    /// Name of the line to expand into `lattice_list`. When unset, the
    /// last line declared in the input is used.
    #[serde(default)]
    root_line: Option<String>,
}

impl ConvertConfig {
    /// Creates a new [`ConvertConfig`].
    pub fn new(root_line: Option<String>) -> Self {
        Self { root_line }
    }

    /// Returns the configured root line name, if any.
    pub fn root_line(&self) -> Option<&str> {
        self.root_line.as_deref()
    }

    /// Overrides the root line name.
    pub fn set_root_line(&mut self, name: impl Into<String>) {
        self.root_line = Some(name.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_root_line() {
        let config = AppConfig::default();
        assert!(config.convert().root_line().is_none());
    }

    #[test]
    fn test_set_root_line() {
        let mut config = AppConfig::default();
        config.convert_mut().set_root_line("RING");
        assert_eq!(config.convert().root_line(), Some("RING"));
    }
}
