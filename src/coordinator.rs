//! Request Coordinator Module
//!
//! Serializes every cache lookup and in-flight bookkeeping step through one
//! lock, coalesces concurrent requests for the same key onto a single render
//! and fans the outcome out to every waiter.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::{watch, Mutex, Semaphore};
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore, PreviewKey, RenderedImage};
use crate::error::{PreviewError, Result};
use crate::render::{CancelSignal, Renderer};

type Outcome = Result<RenderedImage>;

/// One in-flight render. Waiters hold receivers; the driver holds a clone of
/// the sender and publishes the outcome exactly once.
type Flight = Arc<watch::Sender<Option<Outcome>>>;

// == Coordinator State ==
/// Everything guarded by the coordination lock.
struct CoordinatorState {
    cache: CacheStore,
    in_flight: HashMap<PreviewKey, Flight>,
}

struct Inner {
    state: Mutex<CoordinatorState>,
    workers: Arc<Semaphore>,
}

// == Request Coordinator ==
/// Deduplicating front door to the preview cache.
///
/// Cloning is cheap; clones share the cache, the in-flight table and the
/// worker pool.
#[derive(Clone)]
pub struct RequestCoordinator {
    inner: Arc<Inner>,
}

impl RequestCoordinator {
    // == Constructor ==
    /// Creates a coordinator caching up to `capacity` previews and running at
    /// most `render_workers` renders at once (minimum one).
    pub fn new(capacity: usize, render_workers: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(CoordinatorState {
                    cache: CacheStore::new(capacity),
                    in_flight: HashMap::new(),
                }),
                workers: Arc::new(Semaphore::new(render_workers.max(1))),
            }),
        }
    }

    // == Request ==
    /// Returns the preview for `key`, rendering it with `renderer` on a miss.
    ///
    /// Concurrent calls for one key share a single render and all receive
    /// the same outcome. Failures are delivered but never cached. Dropping
    /// the returned future withdraws only this caller's wait.
    pub async fn request(
        &self,
        key: PreviewKey,
        renderer: Arc<dyn Renderer>,
    ) -> Result<RenderedImage> {
        let mut waiter = {
            let mut state = self.inner.state.lock().await;

            if let Some(image) = state.cache.get(&key) {
                debug!(key = %key, "preview cache hit");
                return Ok(image);
            }

            if let Some(flight) = state.in_flight.get(&key).cloned() {
                let waiter = flight.subscribe();
                state.cache.stats_mut().record_coalesced();
                debug!(key = %key, waiters = flight.receiver_count(), "joined in-flight render");
                waiter
            } else {
                let (sender, waiter) = watch::channel(None);
                let flight: Flight = Arc::new(sender);
                state.in_flight.insert(key.clone(), Arc::clone(&flight));
                state.cache.stats_mut().record_render_started();
                debug!(key = %key, kind = %renderer.kind(), "dispatching render");
                tokio::spawn(Arc::clone(&self.inner).drive(key, renderer, flight));
                waiter
            }
        };

        let delivered = waiter
            .wait_for(Option::is_some)
            .await
            .map_err(|_| PreviewError::Render("render ended without a result".to_string()))?;
        Option::clone(&delivered).unwrap_or_else(|| {
            Err(PreviewError::Render(
                "render ended without a result".to_string(),
            ))
        })
    }

    // == Inspection ==
    /// Returns current cache and pipeline statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.state.lock().await.cache.stats()
    }

    /// Number of renders currently in flight.
    pub async fn in_flight_count(&self) -> usize {
        self.inner.state.lock().await.in_flight.len()
    }

    /// Checks for a cached preview without touching LRU order or stats.
    pub async fn is_cached(&self, key: &PreviewKey) -> bool {
        self.inner.state.lock().await.cache.contains(key)
    }

    /// Keys ordered from least to most recently used.
    pub async fn cached_keys(&self) -> Vec<PreviewKey> {
        self.inner.state.lock().await.cache.keys_lru_order()
    }

    // == Invalidation ==
    /// Drops every cached size of `path`. In-flight renders are untouched.
    pub async fn invalidate_path(&self, path: &Path) -> usize {
        let removed = self.inner.state.lock().await.cache.remove_path(path);
        debug!(path = %path.display(), removed, "invalidated previews");
        removed
    }

    /// Drops every cached preview. In-flight renders are untouched.
    pub async fn clear(&self) {
        self.inner.state.lock().await.cache.clear();
    }
}

impl Inner {
    // == Drive ==
    /// Runs the render for one flight and settles it.
    ///
    /// A cancelled render is retried when a waiter attached after the cancel
    /// signal fired, so a live waiter never sees `Cancelled`.
    async fn drive(
        self: Arc<Self>,
        key: PreviewKey,
        renderer: Arc<dyn Renderer>,
        flight: Flight,
    ) {
        loop {
            let outcome = self.run_render(&key, &renderer, &flight).await;

            let mut state = self.state.lock().await;
            if matches!(outcome, Err(PreviewError::Cancelled)) && flight.receiver_count() > 0 {
                state.cache.stats_mut().record_render_started();
                debug!(key = %key, "waiter attached after cancel, rendering again");
                continue;
            }

            match &outcome {
                Ok(image) => {
                    let evicted = state.cache.put(key.clone(), image.clone());
                    debug!(key = %key, evicted = evicted.len(), "preview cached");
                }
                Err(PreviewError::Cancelled) => {
                    state.cache.stats_mut().record_cancelled_render();
                    debug!(key = %key, "render cancelled with no waiters left");
                }
                Err(err) => {
                    state.cache.stats_mut().record_failure();
                    warn!(key = %key, error = %err, "preview render failed");
                }
            }

            // Settle while still holding the lock so no request can attach
            // to a flight that has already published.
            state.in_flight.remove(&key);
            flight.send_replace(Some(outcome));
            return;
        }
    }

    /// Runs one render attempt on the worker pool.
    ///
    /// Raises the cancel signal once every waiter has withdrawn; a render
    /// still queued for a worker at that point never starts.
    async fn run_render(
        &self,
        key: &PreviewKey,
        renderer: &Arc<dyn Renderer>,
        flight: &Flight,
    ) -> Outcome {
        let cancel = CancelSignal::new();

        let permit = tokio::select! {
            permit = Arc::clone(&self.workers).acquire_owned() => permit
                .map_err(|_| PreviewError::Render("render worker pool closed".to_string()))?,
            _ = flight.closed() => return Err(PreviewError::Cancelled),
        };

        let mut job = {
            let renderer = Arc::clone(renderer);
            let path = key.path.clone();
            let (width, height) = (key.width, key.height);
            let cancel = cancel.clone();
            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                renderer.render(&path, width, height, &cancel)
            })
        };

        let joined = tokio::select! {
            joined = &mut job => joined,
            _ = flight.closed() => {
                debug!(key = %key, "all waiters withdrew, signalling cancel");
                cancel.cancel();
                job.await
            }
        };

        joined.unwrap_or_else(|err| {
            Err(PreviewError::Render(format!(
                "render worker failed: {}",
                err
            )))
        })
    }
}
