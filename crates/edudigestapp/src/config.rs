//! # Configuration
//!
//! EduDigest configuration is managed by [`clapfig`], which handles layered
//! loading from TOML files and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `EDUDIGEST__STORE_TIMEOUT_MS`, `EDUDIGEST__DEFAULT_ACTIVE`
//! 2. **Data dir config**: `<data dir>/edudigest.toml`
//! 3. **Global config**: OS-appropriate config directory (via `directories`)
//! 4. **Compiled defaults**: `#[config(default = ...)]`
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `store_timeout_ms` | `10000` | How long a write waits for the collection lock before the store counts as unreachable |
//! | `default_active` | `true` | Whether newly created entities show on public pages |
//!
//! ## CLI Usage
//!
//! - `edudigest config`: show all values
//! - `edudigest config get <key>`: show one value

use confique::Config;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 10_000;

/// Configuration for edudigest, stored in `edudigest.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DigestConfig {
    /// Milliseconds a write waits for the collection lock
    #[config(default = 10000)]
    pub store_timeout_ms: u64,

    /// Whether new entities start out visible on public pages
    #[config(default = true)]
    pub default_active: bool,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            default_active: true,
        }
    }
}

impl DigestConfig {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Look up a single setting by its TOML key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "store_timeout_ms" => Some(self.store_timeout_ms.to_string()),
            "default_active" => Some(self.default_active.to_string()),
            _ => None,
        }
    }

    pub fn keys() -> &'static [&'static str] {
        &["store_timeout_ms", "default_active"]
    }
}
