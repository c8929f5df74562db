//! # Content Providers
//!
//! A provider owns one resource-name pattern inside the overlay namespace
//! and can synthesize (or borrow) content for it.
//!
//! ## Contract
//!
//! - `can_provide` is cheap and side-effect free. It may read the registry
//!   and, when `defer_to_authored` is set, ask the authored pack whether it
//!   already has the name.
//! - `provide` is only called after `can_provide` returned true in the same
//!   lookup. Failing there is a contract violation and is reported as an
//!   error, never as partial content.
//! - Nothing is cached. Every call recomputes from current state.
//!
//! Providers reach the authored pack and the registry through a borrowed
//! `PackView` handed in by the owning overlay on each call.

mod block_model;
mod block_state;
mod item_model;

use std::fmt;

use resgen_core::{
    stream_from_bytes, RegistryBridge, ResourcePack, ResourceResult, ResourceStream, ASSETS_PREFIX,
};
use serde::{Deserialize, Serialize};

pub use block_model::BlockModelProvider;
pub use block_state::BlockStateProvider;
pub use item_model::ItemModelProvider;

use crate::config::OverlayConfig;
use crate::error::{ProviderError, ProviderResult};

/// Synthetic content generator for one resource-name pattern.
pub trait ContentProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this provider claims `name`.
    fn can_provide(&self, name: &str, view: &PackView<'_>) -> bool;

    /// Produces the content for a claimed `name`.
    ///
    /// # Errors
    ///
    /// Any `ProviderError`; callers treat it as a contract violation.
    fn provide(&self, name: &str, view: &PackView<'_>) -> ProviderResult<ResourceStream>;
}

/// The reference provider variants, selectable from config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// `blockstates/<stem>.json` -> single-variant state definition.
    BlockState,
    /// `models/block/<stem>.json` -> cube model.
    BlockModel,
    /// `models/item/<stem>.json` -> item model for registered items.
    ItemModel,
}

impl ProviderKind {
    /// Default consultation order.
    pub const REFERENCE_ORDER: [Self; 3] = [Self::BlockState, Self::BlockModel, Self::ItemModel];

    /// Config spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BlockState => "block_state",
            Self::BlockModel => "block_model",
            Self::ItemModel => "item_model",
        }
    }

    /// Instantiates the provider.
    #[must_use]
    pub fn build(self) -> Box<dyn ContentProvider> {
        match self {
            Self::BlockState => Box::new(BlockStateProvider),
            Self::BlockModel => Box::new(BlockModelProvider),
            Self::ItemModel => Box::new(ItemModelProvider),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a provider may see of its owning overlay during one call.
#[derive(Clone, Copy)]
pub struct PackView<'a> {
    config: &'a OverlayConfig,
    authored: &'a dyn ResourcePack,
    registry: &'a RegistryBridge,
}

impl<'a> PackView<'a> {
    /// Creates a view.
    #[must_use]
    pub fn new(
        config: &'a OverlayConfig,
        authored: &'a dyn ResourcePack,
        registry: &'a RegistryBridge,
    ) -> Self {
        Self {
            config,
            authored,
            registry,
        }
    }

    /// The overlay namespace.
    #[must_use]
    pub fn namespace(&self) -> &'a str {
        &self.config.namespace
    }

    /// The overlay configuration.
    #[must_use]
    pub fn config(&self) -> &'a OverlayConfig {
        self.config
    }

    /// Live registry queries.
    #[must_use]
    pub fn registry(&self) -> &'a RegistryBridge {
        self.registry
    }

    /// Whether the authored pack has `name`.
    #[must_use]
    pub fn authored_has_resource(&self, name: &str) -> bool {
        self.authored.has_resource(name)
    }

    /// Opens `name` from the authored pack.
    ///
    /// # Errors
    ///
    /// Whatever the authored pack returns.
    pub fn authored_get_resource(&self, name: &str) -> ResourceResult<ResourceStream> {
        self.authored.get_resource(name)
    }

    /// True if `name` is a `.json` file under `assets/<namespace>/<folder>`.
    ///
    /// `folder` ends with `/`; the file name must be non-empty.
    #[must_use]
    pub fn is_location(&self, name: &str, folder: &str) -> bool {
        let Some(rest) = name
            .strip_prefix(ASSETS_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|rest| rest.strip_prefix(self.namespace()))
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|rest| rest.strip_prefix(folder))
        else {
            return false;
        };

        rest.strip_suffix(".json")
            .is_some_and(|file| !file.is_empty() && !file.ends_with('/'))
    }

    /// True if the overlay should leave `name` to the authored pack.
    #[must_use]
    pub fn defers_to_authored(&self, name: &str) -> bool {
        self.config.defer_to_authored && self.authored.has_resource(name)
    }
}

/// Encodes a generated document as a stream.
pub(crate) fn json_stream(name: &str, document: &serde_json::Value) -> ProviderResult<ResourceStream> {
    serde_json::to_vec(document)
        .map(stream_from_bytes)
        .map_err(|source| ProviderError::Encode {
            name: name.to_string(),
            source,
        })
}
