//! Resource names and structured identifiers.
//!
//! Hosts hand packs flat names shaped `<layer-prefix>/<namespace>/<path>`,
//! e.g. `assets/modx/models/block/dirt.json`. Providers work on the
//! structured form.

use std::fmt;

use crate::error::IdentifierError;

/// Layer prefix used by every asset name the host requests.
pub const ASSETS_PREFIX: &str = "assets";

/// Structured form of a resource name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceIdentifier {
    /// Owning namespace (`modx`).
    pub namespace: String,
    /// Path inside the namespace (`models/block/dirt.json`).
    pub path: String,
}

impl ResourceIdentifier {
    /// Creates an identifier from its parts.
    #[must_use]
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Final path segment without its extension (`dirt` for `models/block/dirt.json`).
    #[must_use]
    pub fn stem(&self) -> &str {
        let file = self.path.rsplit('/').next().unwrap_or(&self.path);
        match file.rfind('.') {
            Some(dot) if dot > 0 => &file[..dot],
            _ => file,
        }
    }

    /// Rebuilds the flat resource name under `prefix`.
    #[must_use]
    pub fn to_resource_name(&self, prefix: &str) -> String {
        format!("{prefix}/{}/{}", self.namespace, self.path)
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// Converts a flat resource name into a `ResourceIdentifier`.
///
/// Everything up to and including the first `/` is the layer prefix and is
/// dropped. The next segment is the namespace and the remainder the path.
///
/// # Errors
///
/// Returns `IdentifierError::Malformed` when the prefix, the namespace or
/// the path is missing or empty.
pub fn translate(name: &str) -> Result<ResourceIdentifier, IdentifierError> {
    let malformed = || IdentifierError::Malformed {
        name: name.to_string(),
    };

    let (prefix, rest) = name.split_once('/').ok_or_else(malformed)?;
    let (namespace, path) = rest.split_once('/').ok_or_else(malformed)?;
    if prefix.is_empty() || namespace.is_empty() || path.is_empty() {
        return Err(malformed());
    }

    let id = ResourceIdentifier::new(namespace, path);
    tracing::debug!(resource = name, %id, "translated resource name");
    Ok(id)
}
