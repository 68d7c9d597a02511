//! Render Module
//!
//! Per-media-type preview strategies. Every renderer decodes through an
//! injected capability, aspect-fits the content into a transparent canvas of
//! the target size and optionally composites a media badge.

mod badge;
mod canvas;
mod capability;
mod document;
mod raster;
mod video;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use badge::{document_badge, play_badge};
pub use canvas::{Canvas, MAX_CANVAS_PIXELS};
pub use capability::{Document, DocumentSource, ImageCrateDecoder, RasterDecoder, VideoFrameSource};
pub use document::DocumentPageRenderer;
pub use raster::ImageRenderer;
pub use video::VideoFrameRenderer;

use crate::cache::RenderedImage;
use crate::error::{PreviewError, Result};
use crate::media::MediaKind;

/// Opacity used for every media badge.
pub const BADGE_OPACITY: f32 = 0.8;

// == Renderer ==
/// A decode-and-compose strategy for one media kind.
///
/// Renderers run on the blocking worker pool. They receive only immutable
/// inputs and return a freshly created image; partial results are never
/// returned.
pub trait Renderer: Send + Sync {
    /// The media kind this renderer handles.
    fn kind(&self) -> MediaKind;

    /// Renders `path` into a `width` x `height` preview.
    ///
    /// Implementations should call [`CancelSignal::check`] between their
    /// decode and compose steps.
    fn render(
        &self,
        path: &Path,
        width: u32,
        height: u32,
        cancel: &CancelSignal,
    ) -> Result<RenderedImage>;
}

// == Cancel Signal ==
/// Cooperative cancellation flag shared between a render job and its driver.
///
/// Raising the signal is a hint: steps already handed to a decode capability
/// run to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    raised: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Returns `Err(PreviewError::Cancelled)` once the signal is raised.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(PreviewError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_signal_is_shared() {
        let signal = CancelSignal::new();
        let observer = signal.clone();
        assert!(observer.check().is_ok());

        signal.cancel();
        assert!(observer.is_cancelled());
        assert_eq!(observer.check(), Err(PreviewError::Cancelled));
    }
}
