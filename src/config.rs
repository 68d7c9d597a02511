//! Configuration Module
//!
//! Handles loading and managing preview cache configuration from environment variables.

use std::env;

use serde::{Deserialize, Serialize};

/// Default number of cached previews.
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Default number of renders allowed to run at once.
pub const DEFAULT_RENDER_WORKERS: usize = 4;

/// Preview cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of previews the cache can hold
    pub cache_capacity: usize,
    /// Size of the render worker pool
    pub render_workers: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PREVIEW_CACHE_CAPACITY` - Maximum cached previews (default: 500)
    /// - `PREVIEW_RENDER_WORKERS` - Concurrent render limit (default: 4)
    ///
    /// Missing, unparseable or zero values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            cache_capacity: positive_var("PREVIEW_CACHE_CAPACITY")
                .unwrap_or(DEFAULT_CACHE_CAPACITY),
            render_workers: positive_var("PREVIEW_RENDER_WORKERS")
                .unwrap_or(DEFAULT_RENDER_WORKERS),
        }
    }

    /// Overrides the cache capacity.
    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Overrides the worker pool size.
    pub fn with_render_workers(mut self, render_workers: usize) -> Self {
        self.render_workers = render_workers;
        self
    }
}

fn positive_var(name: &str) -> Option<usize> {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|v: &usize| *v > 0)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            render_workers: DEFAULT_RENDER_WORKERS,
        }
    }
}
