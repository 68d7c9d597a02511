//! Rendered Image Module
//!
//! Immutable preview pixels shared between the cache and every waiter.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use image::RgbaImage;

// == Rendered Image ==
/// An immutable RGBA buffer of exactly the requested target size.
///
/// Cloning is cheap: all clones share the same pixel buffer, which is never
/// mutated after the renderer hands it over.
#[derive(Clone)]
pub struct RenderedImage {
    pixels: Arc<RgbaImage>,
}

impl RenderedImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Borrows the underlying pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Returns true if both handles share one buffer.
    pub fn ptr_eq(&self, other: &RenderedImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl fmt::Debug for RenderedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

// == Cache Entry ==
/// A cached preview together with its access metadata.
///
/// The timestamps and hit count feed eviction logs and diagnostics only;
/// eviction order comes from the store's recency tracker.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored preview
    pub image: RenderedImage,
    /// When the preview was inserted
    pub inserted_at: DateTime<Utc>,
    /// Last time the preview was served from the cache
    pub last_accessed: DateTime<Utc>,
    /// Number of cache hits served by this entry
    pub hits: u64,
}

impl CacheEntry {
    pub fn new(image: RenderedImage) -> Self {
        let now = Utc::now();
        Self {
            image,
            inserted_at: now,
            last_accessed: now,
            hits: 0,
        }
    }

    // == Touch ==
    /// Records a hit on this entry.
    pub fn touch(&mut self) {
        self.last_accessed = Utc::now();
        self.hits += 1;
    }

    /// Time since the preview was last served, or inserted if never hit.
    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_accessed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_rendered_image_dimensions() {
        let image = RenderedImage::new(RgbaImage::new(100, 50));
        assert_eq!(image.dimensions(), (100, 50));
        assert_eq!(image.width(), 100);
        assert_eq!(image.height(), 50);
    }

    #[test]
    fn test_clones_share_pixels() {
        let image = RenderedImage::new(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        let clone = image.clone();
        assert!(image.ptr_eq(&clone));

        let other = RenderedImage::new(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])));
        assert!(!image.ptr_eq(&other));
    }

    #[test]
    fn test_debug_omits_pixels() {
        let image = RenderedImage::new(RgbaImage::new(3, 4));
        assert_eq!(
            format!("{:?}", image),
            "RenderedImage { width: 3, height: 4 }"
        );
    }

    #[test]
    fn test_entry_touch() {
        let mut entry = CacheEntry::new(RenderedImage::new(RgbaImage::new(1, 1)));
        assert_eq!(entry.hits, 0);
        assert_eq!(entry.inserted_at, entry.last_accessed);

        entry.touch();
        entry.touch();
        assert_eq!(entry.hits, 2);
        assert!(entry.last_accessed >= entry.inserted_at);
    }

    #[test]
    fn test_entry_idle_time() {
        let entry = CacheEntry::new(RenderedImage::new(RgbaImage::new(1, 1)));
        let later = entry.last_accessed + Duration::seconds(90);
        assert_eq!(entry.idle_for(later).num_seconds(), 90);
        assert_eq!(entry.idle_for(entry.last_accessed), Duration::zero());
    }
}
