//! Prefetch Task
//!
//! Background task that renders previews for a batch of paths ahead of
//! display, so the grid finds them cached.

use std::path::PathBuf;

use serde::Serialize;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info};

use crate::service::PreviewService;

/// Outcome counts of one prefetch batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrefetchReport {
    /// Previews now cached
    pub ready: usize,
    /// Paths whose render failed
    pub failed: usize,
    /// Paths with no renderer, never requested
    pub skipped: usize,
}

/// Spawns a background task requesting a `width` x `height` preview for
/// every path concurrently.
///
/// Requests go through the normal coordinator, so they coalesce with any
/// interactive request for the same key. Aborting the returned handle
/// withdraws the prefetch waits only.
///
/// # Example
/// ```ignore
/// let handle = spawn_prefetch(service.clone(), visible_paths, 128, 128);
/// // Later, when the user scrolled elsewhere:
/// handle.abort();
/// ```
pub fn spawn_prefetch(
    service: PreviewService,
    paths: Vec<PathBuf>,
    width: u32,
    height: u32,
) -> JoinHandle<PrefetchReport> {
    tokio::spawn(async move {
        info!(count = paths.len(), width, height, "starting preview prefetch");

        let mut report = PrefetchReport::default();
        let mut requests = JoinSet::new();
        for path in paths {
            if !service.supports(&path) {
                report.skipped += 1;
                continue;
            }
            let service = service.clone();
            requests.spawn(async move {
                let outcome = service.get_preview(&path, width, height).await;
                if let Err(err) = &outcome {
                    debug!(path = %path.display(), error = %err, "prefetch failed");
                }
                outcome.is_ok()
            });
        }

        while let Some(joined) = requests.join_next().await {
            match joined {
                Ok(true) => report.ready += 1,
                _ => report.failed += 1,
            }
        }

        info!(
            ready = report.ready,
            failed = report.failed,
            skipped = report.skipped,
            "preview prefetch finished"
        );
        report
    })
}
