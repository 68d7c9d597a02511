//! Decode Capabilities
//!
//! Seams to the platform decoders. Renderers own no decoding logic; they
//! drive one of these traits and compose the result. Implementations report
//! failures as `anyhow` errors which the renderers classify.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use image::RgbaImage;

use crate::geometry::{Rect, Size};
use crate::render::Canvas;

// == Raster Decoder ==
/// Decodes a still image into RGBA pixels at its natural size.
pub trait RasterDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> anyhow::Result<RgbaImage>;
}

// == Video Frame Source ==
/// Extracts one decoded frame from a video at its natural size.
pub trait VideoFrameSource: Send + Sync {
    fn frame_at(&self, path: &Path, timestamp: Duration) -> anyhow::Result<RgbaImage>;
}

// == Document Source ==
/// Opens paginated documents.
pub trait DocumentSource: Send + Sync {
    fn open(&self, path: &Path) -> anyhow::Result<Box<dyn Document>>;
}

/// An opened paginated document.
pub trait Document {
    fn page_count(&self) -> usize;

    /// Natural bounds of a page in document units.
    fn page_bounds(&self, index: usize) -> anyhow::Result<Size>;

    /// Draws page `index` scaled into `dest` on the canvas.
    fn render_page(&self, index: usize, canvas: &mut Canvas, dest: Rect) -> anyhow::Result<()>;
}

// == Image Crate Decoder ==
/// Default raster decoder backed by the `image` crate.
///
/// Handles the formats the crate was built with (PNG, JPEG, GIF, WebP by
/// default); anything else, HEIC included, surfaces as a decode failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl RasterDecoder for ImageCrateDecoder {
    fn decode(&self, path: &Path) -> anyhow::Result<RgbaImage> {
        let metadata =
            fs::metadata(path).with_context(|| format!("cannot read {}", path.display()))?;
        if metadata.len() == 0 {
            bail!("{} is empty", path.display());
        }

        let decoded = image::ImageReader::open(path)
            .with_context(|| format!("cannot open {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("cannot sniff format of {}", path.display()))?
            .decode()
            .with_context(|| format!("cannot decode {}", path.display()))?;
        Ok(decoded.into_rgba8())
    }
}
