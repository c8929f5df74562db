//! # Host Handles
//!
//! The narrow capability surface a host exposes to the overlay.
//!
//! The overlay never reaches into host internals. Everything it needs is
//! asked for through `HostHandles`:
//!
//! ```text
//! Host implements:            Overlay uses it to:
//! ┌──────────────────────┐    ┌──────────────────────────────────────┐
//! │ authored_layer(ns)   │ ─→ │ anchor itself and serve fallbacks    │
//! │ registry()           │ ─→ │ decide which item models to generate │
//! │ global_order()       │ ─→ │ register before the authored pack    │
//! │ namespace_order(ns)  │ ─→ │ same, for the per-namespace manager  │
//! └──────────────────────┘    └──────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::order::{LayerOrder, ResolutionOrder};
use crate::pack::SharedPack;
use crate::registry::{MemoryRegistry, RegistrySource};

/// Capabilities a host provides to the overlay.
pub trait HostHandles {
    /// The authored pack registered for `namespace`, if any.
    fn authored_layer(&self, namespace: &str) -> Option<SharedPack>;

    /// Live registry source.
    fn registry(&self) -> Arc<dyn RegistrySource>;

    /// The host's global resolution order.
    fn global_order(&self) -> Arc<dyn ResolutionOrder>;

    /// The namespace-scoped fallback order, if the host keeps one.
    fn namespace_order(&self, namespace: &str) -> Option<Arc<dyn ResolutionOrder>>;
}

/// Host held entirely in memory.
///
/// Authored packs added with `add_authored_pack` are appended to the global
/// order and, unless disabled, to a per-namespace order.
pub struct MemoryHost {
    authored: RwLock<HashMap<String, SharedPack>>,
    registry: Arc<MemoryRegistry>,
    global: Arc<LayerOrder>,
    namespaces: Option<RwLock<HashMap<String, Arc<LayerOrder>>>>,
}

impl MemoryHost {
    /// Creates a host with a global order and per-namespace orders.
    #[must_use]
    pub fn new() -> Self {
        Self {
            authored: RwLock::new(HashMap::new()),
            registry: Arc::new(MemoryRegistry::new()),
            global: Arc::new(LayerOrder::new("global")),
            namespaces: Some(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a host that keeps only the global order.
    #[must_use]
    pub fn without_namespace_orders() -> Self {
        Self {
            namespaces: None,
            ..Self::new()
        }
    }

    /// Registers `pack` as the authored layer for `namespace`.
    pub fn add_authored_pack(&self, namespace: &str, pack: SharedPack) {
        self.authored.write().insert(namespace.to_string(), pack.clone());

        if let Some(namespaces) = &self.namespaces {
            namespaces
                .write()
                .entry(namespace.to_string())
                .or_insert_with(|| Arc::new(LayerOrder::new(format!("namespace:{namespace}"))))
                .push(pack.clone());
        }

        self.global.push(pack);
    }

    /// The concrete registry, for host-side mutation.
    #[must_use]
    pub fn memory_registry(&self) -> &Arc<MemoryRegistry> {
        &self.registry
    }

    /// The concrete global order.
    #[must_use]
    pub fn global(&self) -> &Arc<LayerOrder> {
        &self.global
    }

    /// The concrete order for `namespace`, if one exists.
    #[must_use]
    pub fn namespace(&self, namespace: &str) -> Option<Arc<LayerOrder>> {
        self.namespaces.as_ref()?.read().get(namespace).cloned()
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostHandles for MemoryHost {
    fn authored_layer(&self, namespace: &str) -> Option<SharedPack> {
        self.authored.read().get(namespace).cloned()
    }

    fn registry(&self) -> Arc<dyn RegistrySource> {
        self.registry.clone()
    }

    fn global_order(&self) -> Arc<dyn ResolutionOrder> {
        self.global.clone()
    }

    fn namespace_order(&self, namespace: &str) -> Option<Arc<dyn ResolutionOrder>> {
        self.namespace(namespace).map(|order| order as Arc<dyn ResolutionOrder>)
    }
}
