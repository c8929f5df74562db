//! # RESGEN Overlay
//!
//! A synthetic resource pack that sits in front of a namespace's authored
//! pack and generates the boilerplate JSON content nobody wants to write by
//! hand.
//!
//! ## Design Principles
//!
//! 1. **First match commits** - providers are asked in a fixed order and the
//!    first claimant answers, success or failure
//! 2. **Authored layer is the fallback** - unclaimed names go to the authored
//!    pack and its answer is returned unchanged
//! 3. **No caching** - every lookup recomputes from current registry and
//!    pack state, so reloads need no invalidation
//! 4. **Install once** - the overlay registers itself immediately before the
//!    authored pack, in every order the host keeps, or not at all
//!
//! ## Resolution Walk
//!
//! ```text
//! host order:  [ ... , resgen:modx , modx-files , ... ]
//!                          │
//!             has_resource │ ProviderChain::claims
//!                          ▼
//!        block_state ─→ block_model ─→ item_model ─→ (none: authored pack)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use resgen_overlay::{OverlayConfig, OverlayPack};
//!
//! let overlay = OverlayPack::install(&host, OverlayConfig::for_namespace("modx"))?;
//! let stream = overlay.get_resource("assets/modx/blockstates/dirt.json")?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chain;
pub mod config;
pub mod error;
pub mod pack;
pub mod provider;

pub use chain::{ProviderChain, Resolution};
pub use config::OverlayConfig;
pub use error::{ConfigError, InstallError, ProviderError, ProviderResult};
pub use pack::{OverlayPack, OVERLAY_PACK_PREFIX};
pub use provider::{
    BlockModelProvider, BlockStateProvider, ContentProvider, ItemModelProvider, PackView,
    ProviderKind,
};
