//! Media Classification Module
//!
//! Maps a path's extension onto the media kind that decides which renderer
//! handles it.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Extensions rendered by the static image renderer.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "heic", "webp"];

/// Extensions rendered by the video frame renderer.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v"];

/// Extensions rendered by the document page renderer.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

// == Media Kind ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    StaticImage,
    Video,
    Document,
    Unsupported,
}

impl MediaKind {
    /// Every kind that has a renderer.
    pub const RENDERABLE: [MediaKind; 3] =
        [MediaKind::StaticImage, MediaKind::Video, MediaKind::Document];

    /// Extensions recognized for this kind (lowercase, without the dot).
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::StaticImage => IMAGE_EXTENSIONS,
            MediaKind::Video => VIDEO_EXTENSIONS,
            MediaKind::Document => DOCUMENT_EXTENSIONS,
            MediaKind::Unsupported => &[],
        }
    }

    pub fn is_supported(self) -> bool {
        self != MediaKind::Unsupported
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaKind::StaticImage => "image",
            MediaKind::Video => "video",
            MediaKind::Document => "document",
            MediaKind::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

// == Classify ==
/// Classifies a path by its extension, case-insensitively.
///
/// Paths without an extension (including directories and dotfiles such as
/// `.png`) are `Unsupported`.
pub fn classify(path: &Path) -> MediaKind {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return MediaKind::Unsupported;
    };
    let ext = ext.to_ascii_lowercase();

    MediaKind::RENDERABLE
        .into_iter()
        .find(|kind| kind.extensions().contains(&ext.as_str()))
        .unwrap_or(MediaKind::Unsupported)
}

/// Lowercased extension of `path`, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}
