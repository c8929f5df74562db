//! Host resolution orders.
//!
//! A resolution order is the host-owned, ordered list of packs consulted for
//! a lookup; index 0 is asked first. The overlay touches it exactly once, via
//! `register_before`, to splice itself in front of the authored pack.

use parking_lot::RwLock;

use crate::error::{OrderError, ResourceError, ResourceResult};
use crate::pack::{ResourceStream, SharedPack};

/// Ordered list of packs the host walks on every lookup.
pub trait ResolutionOrder: Send + Sync {
    /// Human-readable name, used in errors and logs.
    fn order_name(&self) -> &str;

    /// Index of the pack named `pack_name`, if present.
    fn position_of(&self, pack_name: &str) -> Option<usize>;

    /// Inserts `pack` immediately before the pack named `anchor`.
    ///
    /// Returns the index `pack` now occupies.
    ///
    /// # Errors
    ///
    /// `OrderError::AnchorMissing` if `anchor` is not in the order, and
    /// `OrderError::AlreadyRegistered` if a pack with the same name is.
    /// The order is unchanged on error.
    fn register_before(&self, anchor: &str, pack: SharedPack) -> Result<usize, OrderError>;
}

/// In-memory resolution order.
pub struct LayerOrder {
    name: String,
    packs: RwLock<Vec<SharedPack>>,
}

impl LayerOrder {
    /// Creates an empty order.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packs: RwLock::new(Vec::new()),
        }
    }

    /// Appends a pack at the lowest priority, as the host does while loading.
    pub fn push(&self, pack: SharedPack) {
        self.packs.write().push(pack);
    }

    /// Pack names in consultation order.
    #[must_use]
    pub fn pack_names(&self) -> Vec<String> {
        self.packs
            .read()
            .iter()
            .map(|pack| pack.pack_name().to_string())
            .collect()
    }

    /// Number of packs in the order.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packs.read().len()
    }

    /// Returns true if the order holds no packs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packs.read().is_empty()
    }

    /// Host-side lookup: the first pack that has `name` serves it.
    ///
    /// # Errors
    ///
    /// `ResourceError::NotFound` if no pack claims `name`, otherwise whatever
    /// the claiming pack returns.
    pub fn open(&self, name: &str) -> ResourceResult<ResourceStream> {
        let packs = self.packs.read();
        match packs.iter().find(|pack| pack.has_resource(name)) {
            Some(pack) => pack.get_resource(name),
            None => Err(ResourceError::not_found(name)),
        }
    }
}

impl ResolutionOrder for LayerOrder {
    fn order_name(&self) -> &str {
        &self.name
    }

    fn position_of(&self, pack_name: &str) -> Option<usize> {
        self.packs
            .read()
            .iter()
            .position(|pack| pack.pack_name() == pack_name)
    }

    fn register_before(&self, anchor: &str, pack: SharedPack) -> Result<usize, OrderError> {
        let mut packs = self.packs.write();

        if packs.iter().any(|p| p.pack_name() == pack.pack_name()) {
            return Err(OrderError::AlreadyRegistered {
                order: self.name.clone(),
                pack: pack.pack_name().to_string(),
            });
        }

        let index = packs
            .iter()
            .position(|p| p.pack_name() == anchor)
            .ok_or_else(|| OrderError::AnchorMissing {
                order: self.name.clone(),
                anchor: anchor.to_string(),
            })?;

        packs.insert(index, pack);
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::sync::Arc;

    use super::*;
    use crate::pack::MemoryPack;

    fn pack(name: &str, entries: &[(&str, &str)]) -> SharedPack {
        let pack = MemoryPack::new(name);
        for (key, value) in entries {
            pack.insert(*key, *value);
        }
        Arc::new(pack)
    }

    #[test]
    fn test_register_before_anchor() {
        let order = LayerOrder::new("global");
        order.push(pack("vanilla", &[]));
        order.push(pack("modx-files", &[]));
        order.push(pack("mody-files", &[]));

        let index = order.register_before("modx-files", pack("overlay", &[])).unwrap();

        assert_eq!(index, 1);
        assert_eq!(order.pack_names(), vec!["vanilla", "overlay", "modx-files", "mody-files"]);
        assert_eq!(order.position_of("overlay"), Some(1));
        assert_eq!(order.position_of("modx-files"), Some(2));
    }

    #[test]
    fn test_register_without_anchor_leaves_order_untouched() {
        let order = LayerOrder::new("global");
        order.push(pack("vanilla", &[]));

        let err = order.register_before("modx-files", pack("overlay", &[])).unwrap_err();

        assert!(matches!(err, OrderError::AnchorMissing { .. }));
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_register_twice_is_rejected() {
        let order = LayerOrder::new("global");
        order.push(pack("modx-files", &[]));
        order.register_before("modx-files", pack("overlay", &[])).unwrap();

        let err = order.register_before("modx-files", pack("overlay", &[])).unwrap_err();

        assert!(matches!(err, OrderError::AlreadyRegistered { .. }));
        assert_eq!(order.pack_names(), vec!["overlay", "modx-files"]);
    }

    #[test]
    fn test_open_walks_in_order() {
        let order = LayerOrder::new("global");
        assert!(order.is_empty());
        order.push(pack("first", &[("assets/modx/a.json", "first")]));
        order.push(pack("second", &[("assets/modx/a.json", "second"), ("assets/modx/b.json", "b")]));

        let mut text = String::new();
        order.open("assets/modx/a.json").unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "first");

        text.clear();
        order.open("assets/modx/b.json").unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "b");

        assert!(order.open("assets/modx/c.json").err().unwrap().is_not_found());
    }
}
