//! Owner/tag <-> generated location queries over a live registry.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use super::{GeneratedLocation, ItemOwner, OwnerHandle, RegistryKey, RegistrySource, VariantTag};
use crate::identifier::ResourceIdentifier;

/// Point-in-time location -> key index over the custom-location mapping.
///
/// Locations claimed by more than one key are ambiguous and resolve to no
/// key.
struct LocationIndex {
    inverse: HashMap<GeneratedLocation, Option<RegistryKey>>,
}

impl LocationIndex {
    fn build(snapshot: Vec<(RegistryKey, GeneratedLocation)>) -> Self {
        let mut inverse: HashMap<GeneratedLocation, Option<RegistryKey>> =
            HashMap::with_capacity(snapshot.len());

        for (key, location) in snapshot {
            match inverse.entry(location) {
                Entry::Vacant(slot) => {
                    slot.insert(Some(key));
                }
                Entry::Occupied(mut slot) => {
                    if *slot.get() != Some(key) {
                        slot.insert(None);
                    }
                }
            }
        }

        Self { inverse }
    }

    fn key(&self, location: &GeneratedLocation) -> Option<RegistryKey> {
        match self.inverse.get(location) {
            Some(Some(key)) => Some(*key),
            Some(None) => {
                tracing::warn!(%location, "model location claimed by several registry entries");
                None
            }
            None => None,
        }
    }
}

/// Read-only registry queries used by providers.
///
/// Cheap to clone; clones share the same host source.
#[derive(Clone)]
pub struct RegistryBridge {
    source: Arc<dyn RegistrySource>,
}

impl RegistryBridge {
    /// Wraps a host registry source.
    #[must_use]
    pub fn new(source: Arc<dyn RegistrySource>) -> Self {
        Self { source }
    }

    /// Model location assigned to `owner` with secondary tag `tag`.
    #[must_use]
    pub fn lookup_generated_location(&self, owner: OwnerHandle, tag: i32) -> Option<GeneratedLocation> {
        let key = RegistryKey::new(owner, tag);
        self.source
            .custom_locations()
            .into_iter()
            .find_map(|(candidate, location)| (candidate == key).then_some(location))
    }

    /// Registry entry a model location was assigned to.
    ///
    /// Rebuilds the index from a fresh snapshot on every call.
    #[must_use]
    pub fn resolve_owner(&self, location: &GeneratedLocation) -> Option<RegistryKey> {
        LocationIndex::build(self.source.custom_locations()).key(location)
    }

    /// Finds the item a resource identifier belongs to.
    ///
    /// Tries `<namespace>:<stem>` as an item name first (tag `0`), then the
    /// custom location `<namespace>:<stem>#<variant>`, where the variant is
    /// `inventory` for item-model paths and `normal` otherwise.
    #[must_use]
    pub fn resolve_item(&self, id: &ResourceIdentifier) -> Option<ItemOwner> {
        let stem = id.stem();

        let key = match self.source.owner_by_name(&id.namespace, stem) {
            Some(owner) => RegistryKey::new(owner, 0),
            None => {
                let location =
                    GeneratedLocation::new(id.namespace.as_str(), stem, VariantTag::for_path(&id.path));
                self.resolve_owner(&location)?
            }
        };

        let kind = self.source.owner_kind(key.owner)?;
        tracing::debug!(%id, owner = key.owner.0, tag = key.tag, ?kind, "resolved item owner");

        Some(ItemOwner {
            owner: key.owner,
            kind,
            tag: key.tag,
        })
    }

    /// Secondary tag of the item a resource identifier belongs to, `0` if unknown.
    #[must_use]
    pub fn tag_for(&self, id: &ResourceIdentifier) -> i32 {
        self.resolve_item(id).map_or(0, |owner| owner.tag)
    }
}
