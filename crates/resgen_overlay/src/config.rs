//! Overlay configuration.
//!
//! Loaded once at startup, from TOML or built in code:
//!
//! ```toml
//! namespace = "modx"
//! providers = ["block_state", "block_model", "item_model"]
//! defer_to_authored = false
//! block_texture_dir = "blocks"
//! item_texture_dir = "items"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::provider::ProviderKind;

/// Settings for one overlay pack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// The single namespace the overlay claims.
    pub namespace: String,
    /// Providers in the order they are consulted.
    pub providers: Vec<ProviderKind>,
    /// Decline names the authored pack already has.
    pub defer_to_authored: bool,
    /// Texture folder referenced by generated block models.
    pub block_texture_dir: String,
    /// Texture folder referenced by generated item models.
    pub item_texture_dir: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            providers: ProviderKind::REFERENCE_ORDER.to_vec(),
            defer_to_authored: false,
            block_texture_dir: "blocks".to_string(),
            item_texture_dir: "items".to_string(),
        }
    }
}

impl OverlayConfig {
    /// Reference configuration for `namespace`.
    #[must_use]
    pub fn for_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Sets `defer_to_authored`.
    #[must_use]
    pub fn with_defer_to_authored(mut self, defer: bool) -> Self {
        self.defer_to_authored = defer;
        self
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` for bad TOML, `ConfigError::Invalid` if
    /// validation fails.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// `ConfigError::Io` if the file cannot be read, otherwise as
    /// `from_toml_str`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks the namespace, the provider list and the texture folders.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() || self.namespace.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "namespace must be a single non-empty segment, got {:?}",
                self.namespace
            )));
        }

        let mut seen = HashSet::new();
        for kind in &self.providers {
            if !seen.insert(kind) {
                return Err(ConfigError::Invalid(format!("provider {kind} listed twice")));
            }
        }

        for (field, dir) in [
            ("block_texture_dir", &self.block_texture_dir),
            ("item_texture_dir", &self.item_texture_dir),
        ] {
            if dir.is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }

        Ok(())
    }
}
