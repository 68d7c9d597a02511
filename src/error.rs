//! Error types for preview generation
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Preview Error Enum ==
/// Unified error type for preview generation.
///
/// `Clone` because a single render outcome is delivered to every waiter
/// attached to the same key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    /// Extension is not in the recognized set (or its capability is not installed)
    #[error("Unsupported file type: {0}")]
    Unsupported(String),

    /// Source missing, unreadable, corrupt, zero-length or without pages
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Canvas allocation or compositing failed after a successful decode
    #[error("Render failed: {0}")]
    Render(String),

    /// The render observed its cancel signal and stopped early
    #[error("Render cancelled")]
    Cancelled,
}

impl PreviewError {
    // == Capability Error Mapping ==
    /// Wraps an error reported by a decode capability.
    pub fn decode(err: impl std::fmt::Display) -> Self {
        PreviewError::Decode(err.to_string())
    }

    /// Wraps an error reported while compositing.
    pub fn render(err: impl std::fmt::Display) -> Self {
        PreviewError::Render(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for preview generation.
pub type Result<T> = std::result::Result<T, PreviewError>;
