//! # Registry Bridge
//!
//! Read-only view of host registry state used to decide what to generate.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   live read    ┌──────────────────┐
//! │  RegistryBridge  │ ─────────────→ │  RegistrySource  │  (host adapter)
//! │  owner <-> loc   │ ←───────────── │  items, custom   │
//! └──────────────────┘   snapshot     │  model locations │
//!                                     └──────────────────┘
//! ```
//!
//! The host owns the registry and may mutate it at any time (e.g. during a
//! reload). The bridge never caches: every query takes a fresh snapshot.

mod bridge;
mod memory;

use std::fmt;

pub use bridge::RegistryBridge;
pub use memory::MemoryRegistry;

/// Opaque handle to a host registry entry (an item).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerHandle(pub u32);

/// What kind of item an owner is, which decides its generated item model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    /// A plain item rendered from a flat sprite.
    Item,
    /// An item that places a block; its model follows the block model.
    BlockItem,
}

/// Forward key of the custom-location mapping: owner plus secondary tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryKey {
    /// The owning registry entry.
    pub owner: OwnerHandle,
    /// Secondary integer tag (item metadata).
    pub tag: i32,
}

impl RegistryKey {
    /// Creates a key.
    #[inline]
    #[must_use]
    pub const fn new(owner: OwnerHandle, tag: i32) -> Self {
        Self { owner, tag }
    }
}

/// Whether a generated location is looked up from an item-model context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantTag {
    /// Item-model context (`models/item/...`).
    Inventory,
    /// Any other context.
    Normal,
}

impl VariantTag {
    /// Picks the variant for a path inside a namespace.
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        if path.starts_with("models/item/") {
            Self::Inventory
        } else {
            Self::Normal
        }
    }

    /// Host spelling of the variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model location a registry entry is rendered with: `<ns>:<stem>#<variant>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeneratedLocation {
    /// Namespace of the model.
    pub namespace: String,
    /// Model name without folder or extension.
    pub stem: String,
    /// Lookup context.
    pub variant: VariantTag,
}

impl GeneratedLocation {
    /// Creates a location.
    #[must_use]
    pub fn new(namespace: impl Into<String>, stem: impl Into<String>, variant: VariantTag) -> Self {
        Self {
            namespace: namespace.into(),
            stem: stem.into(),
            variant,
        }
    }
}

impl fmt::Display for GeneratedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.namespace, self.stem, self.variant)
    }
}

/// The item a resource name belongs to, as resolved by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemOwner {
    /// The owning registry entry.
    pub owner: OwnerHandle,
    /// Kind of the owner.
    pub kind: OwnerKind,
    /// Secondary tag; `0` when the owner was found by name.
    pub tag: i32,
}

/// Host adapter exposing live registry state.
///
/// Implementations read current host state on every call.
pub trait RegistrySource: Send + Sync {
    /// Finds an item registered as `<namespace>:<name>`.
    fn owner_by_name(&self, namespace: &str, name: &str) -> Option<OwnerHandle>;

    /// Kind of a registered owner, `None` if it is no longer registered.
    fn owner_kind(&self, owner: OwnerHandle) -> Option<OwnerKind>;

    /// Snapshot of the custom model locations the host has assigned.
    fn custom_locations(&self) -> Vec<(RegistryKey, GeneratedLocation)>;
}
