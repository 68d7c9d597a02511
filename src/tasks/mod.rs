//! Background Tasks Module
//!
//! Tasks the host application spawns alongside interactive requests.
//!
//! # Tasks
//! - Prefetch: warms the cache for items about to scroll into view

mod prefetch;

pub use prefetch::{spawn_prefetch, PrefetchReport};
