//! Cache Module
//!
//! Bounded in-memory preview storage with deterministic LRU eviction.

mod key;
mod lru;
mod rendered;
mod stats;
mod store;


// Re-export public types
pub use key::PreviewKey;
pub use lru::LruTracker;
pub use rendered::{CacheEntry, RenderedImage};
pub use stats::CacheStats;
pub use store::CacheStore;
