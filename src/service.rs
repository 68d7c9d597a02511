//! Preview Service Module
//!
//! The single entry point surrounding UI code talks to: classify a path,
//! serve a cached preview or coordinate a render for it.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::cache::{CacheStats, PreviewKey, RenderedImage};
use crate::config::Config;
use crate::coordinator::RequestCoordinator;
use crate::dispatch::TypeDispatcher;
use crate::error::Result;
use crate::media::MediaKind;
use crate::render::{
    DocumentPageRenderer, DocumentSource, ImageCrateDecoder, ImageRenderer, RasterDecoder,
    VideoFrameRenderer, VideoFrameSource,
};

// == Preview Service ==
/// Owns one cache and coordinator for the lifetime of the host application.
///
/// Cloning is cheap and every clone serves from the same cache.
#[derive(Clone)]
pub struct PreviewService {
    dispatcher: Arc<TypeDispatcher>,
    coordinator: RequestCoordinator,
}

impl PreviewService {
    /// Creates a service rendering still images only, decoded by the
    /// `image` crate.
    pub fn new(config: &Config) -> Self {
        Self::builder(config.clone()).build()
    }

    pub fn builder(config: Config) -> PreviewServiceBuilder {
        PreviewServiceBuilder::new(config)
    }

    // == Get Preview ==
    /// Returns a `width` x `height` preview of `path`.
    ///
    /// Unsupported paths fail with `PreviewError::Unsupported` before the
    /// cache is consulted, so they leave no trace in it or its statistics.
    pub async fn get_preview(
        &self,
        path: impl AsRef<Path>,
        width: u32,
        height: u32,
    ) -> Result<RenderedImage> {
        let path = path.as_ref();
        let renderer = self.dispatcher.select(path)?;
        self.coordinator
            .request(PreviewKey::new(path, width, height), renderer)
            .await
    }

    // == Capability Queries ==
    /// Media kinds a preview can be produced for.
    pub fn supported_kinds(&self) -> Vec<MediaKind> {
        self.dispatcher.supported_kinds()
    }

    /// Extensions a preview can be attempted for.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        self.dispatcher.supported_extensions()
    }

    /// Media kind `path` would be rendered as.
    pub fn classify(&self, path: impl AsRef<Path>) -> MediaKind {
        self.dispatcher.classify(path.as_ref())
    }

    /// Whether a preview should even be attempted for `path`.
    pub fn supports(&self, path: impl AsRef<Path>) -> bool {
        self.classify(path).is_supported()
    }

    // == Maintenance ==
    pub async fn stats(&self) -> CacheStats {
        self.coordinator.stats().await
    }

    /// Drops every cached size of `path`, e.g. after the file changed on disk.
    pub async fn invalidate_path(&self, path: impl AsRef<Path>) -> usize {
        self.coordinator.invalidate_path(path.as_ref()).await
    }

    pub async fn clear(&self) {
        self.coordinator.clear().await;
    }

    pub fn coordinator(&self) -> &RequestCoordinator {
        &self.coordinator
    }
}

// == Builder ==
/// Injects decode capabilities into a [`PreviewService`].
pub struct PreviewServiceBuilder {
    config: Config,
    raster: Arc<dyn RasterDecoder>,
    video: Option<Arc<dyn VideoFrameSource>>,
    document: Option<Arc<dyn DocumentSource>>,
}

impl PreviewServiceBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            raster: Arc::new(ImageCrateDecoder),
            video: None,
            document: None,
        }
    }

    /// Replaces the default `image` crate decoder.
    pub fn raster_decoder(mut self, decoder: Arc<dyn RasterDecoder>) -> Self {
        self.raster = decoder;
        self
    }

    /// Enables video previews.
    pub fn video_source(mut self, source: Arc<dyn VideoFrameSource>) -> Self {
        self.video = Some(source);
        self
    }

    /// Enables document previews.
    pub fn document_source(mut self, source: Arc<dyn DocumentSource>) -> Self {
        self.document = Some(source);
        self
    }

    pub fn build(self) -> PreviewService {
        let mut dispatcher = TypeDispatcher::new();
        dispatcher.register(Arc::new(ImageRenderer::new(self.raster)));
        if let Some(video) = self.video {
            dispatcher.register(Arc::new(VideoFrameRenderer::new(video)));
        }
        if let Some(document) = self.document {
            dispatcher.register(Arc::new(DocumentPageRenderer::new(document)));
        }

        let coordinator =
            RequestCoordinator::new(self.config.cache_capacity, self.config.render_workers);
        info!(
            capacity = self.config.cache_capacity,
            workers = self.config.render_workers,
            kinds = ?dispatcher.supported_kinds(),
            "preview service ready"
        );

        PreviewService {
            dispatcher: Arc::new(dispatcher),
            coordinator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreviewError;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_default_service_supports_images_only() {
        let service = PreviewService::new(&Config::default());
        assert_eq!(service.supported_kinds(), vec![MediaKind::StaticImage]);
        assert!(service.supports("/p/a.jpeg"));
        assert!(!service.supports("/v/a.mp4"));
        assert!(!service.supports("/d/a.pdf"));
    }

    #[test]
    fn test_fresh_service_stats() {
        let service = PreviewService::new(&Config::default().with_cache_capacity(12));
        let stats = tokio_test::block_on(service.stats());
        assert_eq!(stats.capacity, 12);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[tokio::test]
    async fn test_unsupported_leaves_no_trace() {
        let service = PreviewService::new(&Config::default());

        let err = service.get_preview("/notes/todo.txt", 64, 64).await.unwrap_err();

        assert_eq!(err, PreviewError::Unsupported("txt".to_string()));
        let stats = service.stats().await;
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.renders_started, 0);
        assert_eq!(service.coordinator().in_flight_count().await, 0);
    }

    #[tokio::test]
    async fn test_renders_real_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tall.png");
        RgbaImage::from_pixel(50, 200, Rgba([200, 10, 10, 255]))
            .save(&path)
            .unwrap();
        let service = PreviewService::new(&Config::default());

        let image = service.get_preview(&path, 100, 100).await.unwrap();

        assert_eq!(image.dimensions(), (100, 100));
        // content is 25px wide, centered
        assert_eq!(image.pixels().get_pixel(10, 50).0[3], 0);
        assert_eq!(image.pixels().get_pixel(50, 50).0, [200, 10, 10, 255]);
        assert_eq!(service.stats().await.total_entries, 1);
    }
}
