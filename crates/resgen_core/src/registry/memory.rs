//! In-memory registry source.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{GeneratedLocation, OwnerHandle, OwnerKind, RegistryKey, RegistrySource};

#[derive(Default)]
struct RegistryState {
    by_name: HashMap<String, OwnerHandle>,
    kinds: HashMap<OwnerHandle, OwnerKind>,
    custom: Vec<(RegistryKey, GeneratedLocation)>,
    next_handle: u32,
}

/// Registry held in memory, mutable from the host side at any time.
#[derive(Default)]
pub struct MemoryRegistry {
    state: RwLock<RegistryState>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `<namespace>:<name>` and returns its handle.
    ///
    /// Re-registering a name replaces its kind but keeps its handle.
    pub fn register_item(&self, namespace: &str, name: &str, kind: OwnerKind) -> OwnerHandle {
        let mut state = self.state.write();
        let key = format!("{namespace}:{name}");

        let handle = match state.by_name.get(&key) {
            Some(&handle) => handle,
            None => {
                let handle = OwnerHandle(state.next_handle);
                state.next_handle += 1;
                state.by_name.insert(key, handle);
                handle
            }
        };
        state.kinds.insert(handle, kind);
        handle
    }

    /// Unregisters an item together with its custom locations.
    pub fn remove_item(&self, owner: OwnerHandle) {
        let mut state = self.state.write();
        state.by_name.retain(|_, handle| *handle != owner);
        state.kinds.remove(&owner);
        state.custom.retain(|(key, _)| key.owner != owner);
    }

    /// Assigns a custom model location to `owner` with secondary tag `tag`.
    pub fn set_custom_location(&self, owner: OwnerHandle, tag: i32, location: GeneratedLocation) {
        let key = RegistryKey::new(owner, tag);
        let mut state = self.state.write();
        state.custom.retain(|(existing, _)| *existing != key);
        state.custom.push((key, location));
    }

    /// Drops every custom model location, as a host does before a reload.
    pub fn clear_custom_locations(&self) {
        self.state.write().custom.clear();
    }
}

impl RegistrySource for MemoryRegistry {
    fn owner_by_name(&self, namespace: &str, name: &str) -> Option<OwnerHandle> {
        self.state
            .read()
            .by_name
            .get(&format!("{namespace}:{name}"))
            .copied()
    }

    fn owner_kind(&self, owner: OwnerHandle) -> Option<OwnerKind> {
        self.state.read().kinds.get(&owner).copied()
    }

    fn custom_locations(&self) -> Vec<(RegistryKey, GeneratedLocation)> {
        self.state.read().custom.clone()
    }
}
