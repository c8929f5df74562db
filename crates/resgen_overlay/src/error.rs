//! # Overlay Error Types
//!
//! Install-time errors are fatal. Provider errors never leave the overlay:
//! they are logged and reported to the host as "not found".

use std::io;
use std::path::PathBuf;

use resgen_core::{IdentifierError, OrderError, ResourceError};
use thiserror::Error;

/// Errors loading or validating an `OverlayConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read overlay config {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The config is not valid TOML for `OverlayConfig`.
    #[error("failed to parse overlay config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but is unusable.
    #[error("invalid overlay config: {0}")]
    Invalid(String),
}

/// Errors that abort overlay construction. No overlay exists afterwards.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The host has no authored pack to anchor the overlay against.
    #[error("no authored resource pack registered for namespace {namespace}")]
    MissingAuthoredLayer {
        /// Namespace the overlay was built for.
        namespace: String,
    },

    /// Splicing the overlay into a host resolution order failed.
    #[error("failed to register overlay: {0}")]
    Registration(#[from] OrderError),

    /// The overlay configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A provider failed a request it had claimed.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The claimed name could not be translated.
    #[error(transparent)]
    Malformed(#[from] IdentifierError),

    /// The registry entry backing the claim was gone by the time of generation.
    #[error("registry entry for {name} disappeared before generation")]
    OwnerVanished {
        /// The claimed resource name.
        name: String,
    },

    /// The authored resource the provider delegates to could not be opened.
    #[error("delegated lookup of {name} failed: {source}")]
    Delegation {
        /// The authored resource name that was requested.
        name: String,
        /// The authored layer's error.
        #[source]
        source: ResourceError,
    },

    /// The generated document could not be encoded.
    #[error("failed to encode generated {name}: {source}")]
    Encode {
        /// The claimed resource name.
        name: String,
        /// Encoder failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for provider generation.
pub type ProviderResult<T> = Result<T, ProviderError>;
