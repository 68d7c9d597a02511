//! Preview Key Module
//!
//! Identifies one cached preview: a file path rendered at one target size.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::geometry::Size;

// == Preview Key ==
/// Composite cache key of (path, target width, target height).
///
/// Two requests for the same path at different sizes are distinct entries.
/// The key deliberately carries no modification time, so a file edited after
/// its preview was cached keeps serving the old preview until the path is
/// invalidated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewKey {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl PreviewKey {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Target size as floating point geometry.
    pub fn target_size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

impl fmt::Display for PreviewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}x{}", self.path.display(), self.width, self.height)
    }
}
