//! Shared config with atomic replacement.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! Every reader sees either the old or the new snapshot, never a mix.

use crate::config::AssetsConfig;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Cloneable handle to the current configuration snapshot.
///
/// Clones share the same underlying storage, so a `store` through one
/// handle is observed by every other.
#[derive(Debug, Clone)]
pub struct ConfigHandle(Arc<ArcSwap<AssetsConfig>>);

impl ConfigHandle {
    pub fn new(config: AssetsConfig) -> Self {
        Self(Arc::new(ArcSwap::from_pointee(config)))
    }

    #[inline]
    pub fn load(&self) -> Arc<AssetsConfig> {
        self.0.load_full()
    }

    /// Replace the current snapshot.
    pub fn store(&self, config: AssetsConfig) {
        self.0.store(Arc::new(config));
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(AssetsConfig::default())
    }
}
