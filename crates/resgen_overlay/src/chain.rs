//! Provider chain: ordered, first match commits.
//!
//! Providers are asked in construction order. The first whose
//! `can_provide` is true answers the request, success or failure, and no
//! later provider is consulted. If none claims the name the chain signals
//! `Resolution::Fallback` and the caller goes to the authored pack.

use resgen_core::ResourceStream;

use crate::error::ProviderError;
use crate::provider::{ContentProvider, PackView, ProviderKind};

/// Outcome of resolving one name through the chain.
pub enum Resolution {
    /// A provider claimed the name and produced content.
    Provided(ResourceStream),
    /// A provider claimed the name and then failed.
    Failed {
        /// Name of the provider that claimed the request.
        provider: &'static str,
        /// What went wrong.
        error: ProviderError,
    },
    /// No provider claims the name.
    Fallback,
}

/// Fixed, ordered list of providers.
pub struct ProviderChain {
    providers: Vec<Box<dyn ContentProvider>>,
}

impl ProviderChain {
    /// Builds a chain from providers in priority order.
    #[must_use]
    pub fn new(providers: Vec<Box<dyn ContentProvider>>) -> Self {
        Self { providers }
    }

    /// Builds the reference providers listed in `kinds`, in that order.
    #[must_use]
    pub fn from_kinds(kinds: &[ProviderKind]) -> Self {
        Self::new(kinds.iter().map(|kind| kind.build()).collect())
    }

    /// Provider names in consultation order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Number of providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if the chain has no providers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// The first provider that claims `name`.
    #[must_use]
    pub fn claimant(&self, name: &str, view: &PackView<'_>) -> Option<&dyn ContentProvider> {
        self.providers
            .iter()
            .find(|provider| provider.can_provide(name, view))
            .map(|provider| &**provider)
    }

    /// Whether any provider claims `name`.
    #[must_use]
    pub fn claims(&self, name: &str, view: &PackView<'_>) -> bool {
        self.claimant(name, view).is_some()
    }

    /// Resolves `name` through the first claiming provider.
    #[must_use]
    pub fn resolve(&self, name: &str, view: &PackView<'_>) -> Resolution {
        let Some(provider) = self.claimant(name, view) else {
            return Resolution::Fallback;
        };

        tracing::debug!(resource = name, provider = provider.name(), "provider claimed resource");

        match provider.provide(name, view) {
            Ok(stream) => Resolution::Provided(stream),
            Err(error) => Resolution::Failed {
                provider: provider.name(),
                error,
            },
        }
    }
}
