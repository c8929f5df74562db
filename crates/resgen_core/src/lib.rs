//! # RESGEN Core
//!
//! Names, packs and host seams shared by every RESGEN layer.
//!
//! ## Design Principles
//!
//! 1. **Pure translation** - resource names map to identifiers with no state
//! 2. **Injected host** - the authored pack, the resolution orders and the
//!    registry are reached through narrow traits, never ambient globals
//! 3. **Live registry** - every registry query re-reads current host state
//!
//! ## Core Components
//!
//! - `translate`: resource name -> `ResourceIdentifier`
//! - `ResourcePack`: the `has`/`get`/`domains` contract every layer implements
//! - `HostHandles`: authored-layer lookup, resolution orders and registry access
//! - `RegistryBridge`: owner/tag <-> generated location lookups
//!
//! ## Example
//!
//! ```rust,ignore
//! use resgen_core::{translate, ResourceIdentifier};
//!
//! let id = translate("assets/modx/blockstates/dirt.json")?;
//! assert_eq!(id, ResourceIdentifier::new("modx", "blockstates/dirt.json"));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod host;
pub mod identifier;
pub mod order;
pub mod pack;
pub mod registry;

pub use error::{IdentifierError, OrderError, ResourceError, ResourceResult};
pub use host::{HostHandles, MemoryHost};
pub use identifier::{translate, ResourceIdentifier, ASSETS_PREFIX};
pub use order::{LayerOrder, ResolutionOrder};
pub use pack::{stream_from_bytes, FolderPack, MemoryPack, ResourcePack, ResourceStream, SharedPack};
pub use registry::{
    GeneratedLocation, ItemOwner, MemoryRegistry, OwnerHandle, OwnerKind, RegistryBridge,
    RegistryKey, RegistrySource, VariantTag,
};
