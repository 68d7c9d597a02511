//! Video frame renderer.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::RenderedImage;
use crate::error::{PreviewError, Result};
use crate::geometry::{centered_square, fitted_rect, Size};
use crate::media::MediaKind;
use crate::render::{play_badge, CancelSignal, Canvas, Renderer, VideoFrameSource, BADGE_OPACITY};

/// Play badge side as a fraction of the fitted content's shorter side.
pub const PLAY_BADGE_RATIO: f64 = 0.3;

/// Draws the first frame of a video with a centered play badge.
pub struct VideoFrameRenderer {
    source: Arc<dyn VideoFrameSource>,
}

impl VideoFrameRenderer {
    pub fn new(source: Arc<dyn VideoFrameSource>) -> Self {
        Self { source }
    }
}

impl Renderer for VideoFrameRenderer {
    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    fn render(
        &self,
        path: &Path,
        width: u32,
        height: u32,
        cancel: &CancelSignal,
    ) -> Result<RenderedImage> {
        cancel.check()?;
        let frame = self
            .source
            .frame_at(path, Duration::ZERO)
            .map_err(PreviewError::decode)?;
        let natural = Size::from(frame.dimensions());
        if natural.is_degenerate() {
            return Err(PreviewError::Decode(format!(
                "{} produced an empty frame",
                path.display()
            )));
        }

        cancel.check()?;
        let mut canvas = Canvas::new(width, height)?;
        let content = fitted_rect(natural, canvas.size());
        canvas.draw_image(&frame, content);

        let badge = centered_square(content, content.size.min_side() * PLAY_BADGE_RATIO);
        let side = badge.to_pixels().width;
        if side > 0 {
            canvas.draw_overlay(&play_badge(side), badge, BADGE_OPACITY);
        }
        Ok(canvas.finish())
    }
}
