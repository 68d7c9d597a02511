//! Static image renderer.

use std::path::Path;
use std::sync::Arc;

use crate::cache::RenderedImage;
use crate::error::{PreviewError, Result};
use crate::geometry::{fitted_rect, Size};
use crate::media::MediaKind;
use crate::render::{CancelSignal, Canvas, RasterDecoder, Renderer};

/// Decodes a still image and draws it aspect-fit and centered, no badge.
pub struct ImageRenderer {
    decoder: Arc<dyn RasterDecoder>,
}

impl ImageRenderer {
    pub fn new(decoder: Arc<dyn RasterDecoder>) -> Self {
        Self { decoder }
    }
}

impl Renderer for ImageRenderer {
    fn kind(&self) -> MediaKind {
        MediaKind::StaticImage
    }

    fn render(
        &self,
        path: &Path,
        width: u32,
        height: u32,
        cancel: &CancelSignal,
    ) -> Result<RenderedImage> {
        cancel.check()?;
        let source = self.decoder.decode(path).map_err(PreviewError::decode)?;
        let natural = Size::from(source.dimensions());
        if natural.is_degenerate() {
            return Err(PreviewError::Decode(format!(
                "{} has no pixels",
                path.display()
            )));
        }

        cancel.check()?;
        let mut canvas = Canvas::new(width, height)?;
        let dest = fitted_rect(natural, canvas.size());
        canvas.draw_image(&source, dest);
        Ok(canvas.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::path::PathBuf;
    use std::sync::Mutex;

    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    struct FixedDecoder {
        image: Option<RgbaImage>,
        seen: Mutex<Vec<PathBuf>>,
    }

    impl RasterDecoder for FixedDecoder {
        fn decode(&self, path: &Path) -> anyhow::Result<RgbaImage> {
            self.seen.lock().unwrap().push(path.to_path_buf());
            self.image
                .clone()
                .ok_or_else(|| anyhow::anyhow!("corrupt file"))
        }
    }

    fn renderer(image: Option<RgbaImage>) -> (ImageRenderer, Arc<FixedDecoder>) {
        let decoder = Arc::new(FixedDecoder {
            image,
            seen: Mutex::new(Vec::new()),
        });
        (ImageRenderer::new(decoder.clone()), decoder)
    }

    #[test]
    fn test_renders_wide_image_letterboxed() {
        let (renderer, decoder) = renderer(Some(RgbaImage::from_pixel(200, 100, BLUE)));

        let image = renderer
            .render(Path::new("/p/a.png"), 100, 100, &CancelSignal::new())
            .unwrap();

        assert_eq!(image.dimensions(), (100, 100));
        assert_eq!(image.pixels().get_pixel(50, 10).0[3], 0);
        assert_eq!(*image.pixels().get_pixel(50, 50), BLUE);
        assert_eq!(image.pixels().get_pixel(50, 90).0[3], 0);
        assert_eq!(decoder.seen.lock().unwrap().as_slice(), [PathBuf::from("/p/a.png")]);
    }

    #[test]
    fn test_decode_error_is_decode_failure() {
        let (renderer, _) = renderer(None);
        let err = renderer
            .render(Path::new("/p/bad.png"), 100, 100, &CancelSignal::new())
            .unwrap_err();
        assert_eq!(err, PreviewError::Decode("corrupt file".to_string()));
    }

    #[test]
    fn test_empty_image_is_decode_failure() {
        let (renderer, _) = renderer(Some(RgbaImage::new(0, 0)));
        let err = renderer
            .render(Path::new("/p/empty.png"), 100, 100, &CancelSignal::new())
            .unwrap_err();
        assert!(matches!(err, PreviewError::Decode(_)));
    }

    #[test]
    fn test_zero_target_is_render_failure() {
        let (renderer, _) = renderer(Some(RgbaImage::from_pixel(2, 2, BLUE)));
        let err = renderer
            .render(Path::new("/p/a.png"), 0, 100, &CancelSignal::new())
            .unwrap_err();
        assert!(matches!(err, PreviewError::Render(_)));
    }

    #[test]
    fn test_cancelled_before_decode_skips_decoder() {
        let (renderer, decoder) = renderer(Some(RgbaImage::from_pixel(2, 2, BLUE)));
        let cancel = CancelSignal::new();
        cancel.cancel();

        let err = renderer
            .render(Path::new("/p/a.png"), 10, 10, &cancel)
            .unwrap_err();
        assert_eq!(err, PreviewError::Cancelled);
        assert!(decoder.seen.lock().unwrap().is_empty());
    }
}
