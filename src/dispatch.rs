//! Type Dispatcher Module
//!
//! Selects the renderer for a path from its media kind.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{PreviewError, Result};
use crate::media::{classify, extension_of, MediaKind};
use crate::render::Renderer;

// == Type Dispatcher ==
/// Registry of one renderer per media kind.
///
/// A kind without a registered renderer is treated exactly like an
/// unrecognized extension.
#[derive(Clone, Default)]
pub struct TypeDispatcher {
    renderers: HashMap<MediaKind, Arc<dyn Renderer>>,
}

impl TypeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `renderer` for its kind, replacing any previous one.
    pub fn register(&mut self, renderer: Arc<dyn Renderer>) {
        self.renderers.insert(renderer.kind(), renderer);
    }

    // == Classify ==
    /// Media kind of `path`, downgraded to `Unsupported` when no renderer
    /// is installed for it.
    pub fn classify(&self, path: &Path) -> MediaKind {
        let kind = classify(path);
        if self.renderers.contains_key(&kind) {
            kind
        } else {
            MediaKind::Unsupported
        }
    }

    // == Select ==
    /// Renderer for `path`, or `Unsupported`.
    pub fn select(&self, path: &Path) -> Result<Arc<dyn Renderer>> {
        self.renderers
            .get(&classify(path))
            .cloned()
            .ok_or_else(|| {
                let ext = extension_of(path);
                PreviewError::Unsupported(if ext.is_empty() {
                    path.display().to_string()
                } else {
                    ext
                })
            })
    }

    /// Kinds that currently have a renderer, in a stable order.
    pub fn supported_kinds(&self) -> Vec<MediaKind> {
        MediaKind::RENDERABLE
            .into_iter()
            .filter(|kind| self.renderers.contains_key(kind))
            .collect()
    }

    /// Every extension a preview can be attempted for.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        self.supported_kinds()
            .into_iter()
            .flat_map(|kind| kind.extensions().iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RenderedImage;
    use crate::render::CancelSignal;

    struct KindOnly(MediaKind);

    impl Renderer for KindOnly {
        fn kind(&self) -> MediaKind {
            self.0
        }

        fn render(&self, _: &Path, _: u32, _: u32, _: &CancelSignal) -> Result<RenderedImage> {
            Err(PreviewError::Render("not used".to_string()))
        }
    }

    fn dispatcher(kinds: &[MediaKind]) -> TypeDispatcher {
        let mut dispatcher = TypeDispatcher::new();
        for kind in kinds {
            dispatcher.register(Arc::new(KindOnly(*kind)));
        }
        dispatcher
    }

    #[test]
    fn test_selects_renderer_by_kind() {
        let dispatcher = dispatcher(&[MediaKind::StaticImage, MediaKind::Document]);

        let renderer = dispatcher.select(Path::new("/p/a.PNG")).unwrap();
        assert_eq!(renderer.kind(), MediaKind::StaticImage);
        let renderer = dispatcher.select(Path::new("/d/b.pdf")).unwrap();
        assert_eq!(renderer.kind(), MediaKind::Document);
    }

    #[test]
    fn test_missing_renderer_is_unsupported() {
        let dispatcher = dispatcher(&[MediaKind::StaticImage]);

        assert_eq!(dispatcher.classify(Path::new("/v/clip.mp4")), MediaKind::Unsupported);
        assert_eq!(
            dispatcher.select(Path::new("/v/clip.mp4")).err(),
            Some(PreviewError::Unsupported("mp4".to_string()))
        );
        assert_eq!(
            dispatcher.select(Path::new("/bin/tool")).err(),
            Some(PreviewError::Unsupported("/bin/tool".to_string()))
        );
    }

    #[test]
    fn test_supported_kinds_and_extensions() {
        let dispatcher = dispatcher(&[MediaKind::Document, MediaKind::StaticImage]);

        assert_eq!(
            dispatcher.supported_kinds(),
            vec![MediaKind::StaticImage, MediaKind::Document]
        );
        let extensions = dispatcher.supported_extensions();
        assert!(extensions.contains(&"heic"));
        assert!(extensions.contains(&"pdf"));
        assert!(!extensions.contains(&"mov"));
    }
}
