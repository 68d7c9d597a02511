//! Preview Cache - bounded thumbnail generation for file browsers
//!
//! Renders aspect-fit previews of images, video frames and document pages,
//! coalesces concurrent requests for the same preview and keeps results in
//! a deterministic LRU cache.

pub mod cache;
pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod media;
pub mod render;
pub mod service;
pub mod tasks;
pub mod telemetry;

pub use cache::{CacheStats, PreviewKey, RenderedImage};
pub use config::Config;
pub use coordinator::RequestCoordinator;
pub use error::{PreviewError, Result};
pub use media::MediaKind;
pub use service::{PreviewService, PreviewServiceBuilder};
pub use tasks::spawn_prefetch;
pub use telemetry::init_tracing;
