//! # Core Error Types
//!
//! Errors raised by name translation, pack retrieval and resolution orders.

use std::io;

use thiserror::Error;

/// Errors a pack can return when asked for a resource.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// No layer could serve the resource.
    #[error("resource not found: {name}")]
    NotFound {
        /// The resource name that was requested.
        name: String,
    },

    /// The backing storage failed while opening the resource.
    #[error("failed to read resource {name}: {source}")]
    Io {
        /// The resource name that was requested.
        name: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl ResourceError {
    /// Builds a `NotFound` for `name`.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Returns true if this is a `NotFound`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for pack retrieval.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// A resource name that cannot be split into namespace and path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The name lacks a layer prefix, a namespace or a path.
    #[error("malformed resource name: {name:?}")]
    Malformed {
        /// The offending name.
        name: String,
    },
}

/// Errors raised while splicing a pack into a resolution order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The pack to insert before is not part of the order.
    #[error("anchor pack {anchor} is not present in resolution order {order}")]
    AnchorMissing {
        /// Name of the resolution order.
        order: String,
        /// Pack name that was expected to be present.
        anchor: String,
    },

    /// A pack with the same name is already part of the order.
    #[error("pack {pack} is already registered in resolution order {order}")]
    AlreadyRegistered {
        /// Name of the resolution order.
        order: String,
        /// Pack name that was inserted twice.
        pack: String,
    },
}
