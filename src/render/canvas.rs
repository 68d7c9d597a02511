//! Canvas Module
//!
//! Fixed-size RGBA compositing surface used by all renderers.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::cache::RenderedImage;
use crate::error::{PreviewError, Result};
use crate::geometry::{PixelRect, Rect, Size};

/// Largest canvas area accepted, in pixels.
pub const MAX_CANVAS_PIXELS: u64 = 16_384 * 16_384;

// == Canvas ==
/// A transparent canvas of a fixed size.
///
/// Destination rectangles are snapped to whole pixels; anything drawn
/// outside the canvas is clipped.
#[derive(Debug)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    // == Constructor ==
    /// Allocates a fully transparent canvas.
    ///
    /// Fails with a render error for empty or oversized dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PreviewError::Render(format!(
                "cannot allocate a {}x{} canvas",
                width, height
            )));
        }
        if width as u64 * height as u64 > MAX_CANVAS_PIXELS {
            return Err(PreviewError::Render(format!(
                "canvas of {}x{} exceeds {} pixels",
                width, height, MAX_CANVAS_PIXELS
            )));
        }
        Ok(Self {
            pixels: RgbaImage::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::from(self.pixels.dimensions())
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    // == Draw Image ==
    /// Scales `source` into `dest` with high-quality resampling, replacing
    /// the pixels underneath.
    pub fn draw_image(&mut self, source: &RgbaImage, dest: Rect) {
        let px = visible(dest.to_pixels());
        let scaled = imageops::resize(source, px.width, px.height, FilterType::CatmullRom);
        imageops::replace(&mut self.pixels, &scaled, px.x, px.y);
    }

    // == Fill Rect ==
    /// Paints `dest` with a solid color, replacing the pixels underneath.
    pub fn fill_rect(&mut self, dest: Rect, color: Rgba<u8>) {
        let px = dest.to_pixels();
        if px.width == 0 || px.height == 0 {
            return;
        }
        let block = RgbaImage::from_pixel(px.width, px.height, color);
        imageops::replace(&mut self.pixels, &block, px.x, px.y);
    }

    // == Draw Overlay ==
    /// Blends `icon` over `dest` (source-over) at the given opacity.
    pub fn draw_overlay(&mut self, icon: &RgbaImage, dest: Rect, opacity: f32) {
        let px = dest.to_pixels();
        if px.width == 0 || px.height == 0 {
            return;
        }

        let mut scaled = if icon.dimensions() == (px.width, px.height) {
            icon.clone()
        } else {
            imageops::resize(icon, px.width, px.height, FilterType::CatmullRom)
        };
        let opacity = opacity.clamp(0.0, 1.0);
        for pixel in scaled.pixels_mut() {
            pixel.0[3] = (pixel.0[3] as f32 * opacity).round() as u8;
        }

        imageops::overlay(&mut self.pixels, &scaled, px.x, px.y);
    }

    // == Finish ==
    /// Flattens the canvas into an immutable preview.
    pub fn finish(self) -> RenderedImage {
        RenderedImage::new(self.pixels)
    }
}

/// Content that survives fitting always covers at least one pixel.
fn visible(px: PixelRect) -> PixelRect {
    PixelRect {
        width: px.width.max(1),
        height: px.height.max(1),
        ..px
    }
}
