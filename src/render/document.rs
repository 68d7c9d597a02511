//! Document page renderer.

use std::path::Path;
use std::sync::Arc;

use crate::cache::RenderedImage;
use crate::error::{PreviewError, Result};
use crate::geometry::{bottom_right_square, fitted_rect};
use crate::media::MediaKind;
use crate::render::{document_badge, CancelSignal, Canvas, DocumentSource, Renderer, BADGE_OPACITY};

/// Document badge side as a fraction of the fitted page's shorter side.
pub const DOCUMENT_BADGE_RATIO: f64 = 0.2;

/// Inset of the document badge from the page's bottom-right corner.
pub const DOCUMENT_BADGE_INSET: f64 = 8.0;

/// Draws the first page of a document with a corner document badge.
pub struct DocumentPageRenderer {
    source: Arc<dyn DocumentSource>,
}

impl DocumentPageRenderer {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source }
    }
}

impl Renderer for DocumentPageRenderer {
    fn kind(&self) -> MediaKind {
        MediaKind::Document
    }

    fn render(
        &self,
        path: &Path,
        width: u32,
        height: u32,
        cancel: &CancelSignal,
    ) -> Result<RenderedImage> {
        cancel.check()?;
        let document = self.source.open(path).map_err(PreviewError::decode)?;
        if document.page_count() == 0 {
            return Err(PreviewError::Decode(format!(
                "{} has no pages",
                path.display()
            )));
        }
        let bounds = document.page_bounds(0).map_err(PreviewError::decode)?;
        if bounds.is_degenerate() {
            return Err(PreviewError::Decode(format!(
                "{} has an empty first page",
                path.display()
            )));
        }

        cancel.check()?;
        let mut canvas = Canvas::new(width, height)?;
        let page = fitted_rect(bounds, canvas.size());
        document
            .render_page(0, &mut canvas, page)
            .map_err(PreviewError::render)?;

        let badge = bottom_right_square(
            page,
            page.size.min_side() * DOCUMENT_BADGE_RATIO,
            DOCUMENT_BADGE_INSET,
        );
        let side = badge.to_pixels().width;
        if side > 0 {
            canvas.draw_overlay(&document_badge(side), badge, BADGE_OPACITY);
        }
        Ok(canvas.finish())
    }
}
