//! # Overlay Pack
//!
//! The synthetic pack placed directly in front of a namespace's authored
//! pack.
//!
//! ## Lifecycle
//!
//! ```text
//! install() ──→ Constructing ──(authored pack found, anchors checked)──→ Active
//!                    │
//!                    └──→ InstallError (nothing registered, no overlay)
//! ```
//!
//! Once active the overlay lives for the rest of the process. It is
//! registered exactly once, by `install`, immediately before the authored
//! pack in the global order and, if the host keeps one, in the namespace
//! order.
//!
//! ## Lookups
//!
//! - `has_resource`: true iff a provider claims the name. The authored pack
//!   is never asked for membership (it may still be asked by a provider when
//!   `defer_to_authored` is set).
//! - `get_resource`: the claiming provider answers; unclaimed names go to the
//!   authored pack and its answer is returned unchanged. A provider failure
//!   is logged and reported as not found.

use std::collections::BTreeSet;
use std::sync::Arc;

use resgen_core::{
    HostHandles, OrderError, RegistryBridge, ResolutionOrder, ResourceError, ResourcePack,
    ResourceResult, ResourceStream, SharedPack,
};

use crate::chain::{ProviderChain, Resolution};
use crate::config::OverlayConfig;
use crate::error::InstallError;
use crate::provider::PackView;

/// Prefix of every overlay pack name; the namespace follows.
pub const OVERLAY_PACK_PREFIX: &str = "resgen:";

/// Synthetic overlay for one namespace.
pub struct OverlayPack {
    pack_name: String,
    config: OverlayConfig,
    chain: ProviderChain,
    authored: SharedPack,
    registry: RegistryBridge,
}

impl OverlayPack {
    /// Builds the overlay described by `config` and registers it with `host`.
    ///
    /// # Errors
    ///
    /// - `InstallError::Config` if `config` does not validate
    /// - `InstallError::MissingAuthoredLayer` if the host has no authored
    ///   pack for the namespace
    /// - `InstallError::Registration` if the authored pack is absent from a
    ///   resolution order or the overlay is already registered there
    ///
    /// On error the host's resolution orders are left untouched.
    pub fn install<H>(host: &H, config: OverlayConfig) -> Result<Arc<Self>, InstallError>
    where
        H: HostHandles + ?Sized,
    {
        let chain = ProviderChain::from_kinds(&config.providers);
        Self::install_with_chain(host, config, chain)
    }

    /// Like `install`, with a caller-supplied provider chain.
    ///
    /// `config.providers` is ignored; everything else applies.
    ///
    /// # Errors
    ///
    /// As `install`.
    pub fn install_with_chain<H>(
        host: &H,
        config: OverlayConfig,
        chain: ProviderChain,
    ) -> Result<Arc<Self>, InstallError>
    where
        H: HostHandles + ?Sized,
    {
        config.validate()?;
        let namespace = config.namespace.clone();

        let authored = host
            .authored_layer(&namespace)
            .ok_or_else(|| InstallError::MissingAuthoredLayer {
                namespace: namespace.clone(),
            })?;

        let pack = Arc::new(Self {
            pack_name: format!("{OVERLAY_PACK_PREFIX}{namespace}"),
            registry: RegistryBridge::new(host.registry()),
            config,
            chain,
            authored,
        });

        let anchor = pack.authored.pack_name().to_string();
        let global = host.global_order();
        let scoped = host.namespace_order(&namespace);

        // Check every order before touching any, so a failure registers nothing.
        pack.check_insertable(global.as_ref(), &anchor)?;
        if let Some(order) = &scoped {
            pack.check_insertable(order.as_ref(), &anchor)?;
        }

        pack.register(global.as_ref(), &anchor)?;
        match &scoped {
            Some(order) => pack.register(order.as_ref(), &anchor)?,
            None => tracing::warn!(
                namespace = %namespace,
                "host keeps no namespace order; overlay registered globally only"
            ),
        }

        tracing::info!(
            namespace = %namespace,
            pack = %pack.pack_name,
            providers = ?pack.chain.provider_names(),
            "overlay pack active"
        );
        Ok(pack)
    }

    fn check_insertable(&self, order: &dyn ResolutionOrder, anchor: &str) -> Result<(), OrderError> {
        if order.position_of(&self.pack_name).is_some() {
            return Err(OrderError::AlreadyRegistered {
                order: order.order_name().to_string(),
                pack: self.pack_name.clone(),
            });
        }
        if order.position_of(anchor).is_none() {
            return Err(OrderError::AnchorMissing {
                order: order.order_name().to_string(),
                anchor: anchor.to_string(),
            });
        }
        Ok(())
    }

    fn register(self: &Arc<Self>, order: &dyn ResolutionOrder, anchor: &str) -> Result<(), OrderError> {
        let shared: SharedPack = self.clone();
        let index = order.register_before(anchor, shared)?;
        tracing::info!(
            order = order.order_name(),
            anchor,
            index,
            "registered overlay before authored pack"
        );
        Ok(())
    }

    fn view(&self) -> PackView<'_> {
        PackView::new(&self.config, self.authored.as_ref(), &self.registry)
    }

    /// The namespace this overlay claims.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    /// The configuration the overlay was installed with.
    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Provider names in consultation order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.chain.provider_names()
    }

    /// The authored pack this overlay is anchored to.
    #[must_use]
    pub fn authored_layer(&self) -> &SharedPack {
        &self.authored
    }

    /// Whether the authored pack has `name`.
    #[must_use]
    pub fn authored_has_resource(&self, name: &str) -> bool {
        self.authored.has_resource(name)
    }

    /// Opens `name` from the authored pack.
    ///
    /// # Errors
    ///
    /// Whatever the authored pack returns.
    pub fn authored_get_resource(&self, name: &str) -> ResourceResult<ResourceStream> {
        self.authored.get_resource(name)
    }
}

impl ResourcePack for OverlayPack {
    fn pack_name(&self) -> &str {
        &self.pack_name
    }

    fn has_resource(&self, name: &str) -> bool {
        self.chain.claims(name, &self.view())
    }

    fn get_resource(&self, name: &str) -> ResourceResult<ResourceStream> {
        tracing::debug!(resource = name, pack = %self.pack_name, "overlay lookup");

        match self.chain.resolve(name, &self.view()) {
            Resolution::Provided(stream) => Ok(stream),
            Resolution::Failed { provider, error } => {
                tracing::error!(
                    resource = name,
                    provider,
                    error = %error,
                    "provider failed a resource it claimed"
                );
                Err(ResourceError::not_found(name))
            }
            Resolution::Fallback => self.authored.get_resource(name),
        }
    }

    fn resource_domains(&self) -> BTreeSet<String> {
        BTreeSet::from([self.config.namespace.clone()])
    }
}
