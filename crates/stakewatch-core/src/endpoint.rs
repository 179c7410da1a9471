//! Shared, overridable RPC endpoint URL.
//!
//! Every clone of an [`Endpoint`] points at the same URL. Transports read it
//! on each request, so calling [`Endpoint::set`] retargets them without
//! rebuilding anything.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

/// Public Solana mainnet-beta RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Handle to a JSON-RPC endpoint URL guarded by a reader/writer lock.
#[derive(Debug, Clone)]
pub struct Endpoint {
    url: Arc<RwLock<String>>,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_URL)
    }
}

impl Endpoint {
    /// Creates a new endpoint handle for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Arc::new(RwLock::new(url.into())),
        }
    }

    /// Returns the current URL.
    ///
    /// Takes the shared lock, so concurrent readers never block each other.
    pub fn get(&self) -> String {
        // A String is always valid, even if a writer panicked mid-update.
        self.url
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the URL for this handle and all of its clones.
    pub fn set(&self, url: impl Into<String>) {
        let url = url.into();
        debug!(%url, "overriding RPC endpoint");
        *self.url.write().unwrap_or_else(PoisonError::into_inner) = url;
    }
}
