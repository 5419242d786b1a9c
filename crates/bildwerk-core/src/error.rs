// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bildwerk.

use thiserror::Error;

/// Top-level error type for all Bildwerk operations.
#[derive(Debug, Error)]
pub enum BildwerkError {
    // -- Capture / pick errors --
    #[error("camera capture failed: {0}")]
    Camera(String),

    #[error("gallery pick failed: {0}")]
    Gallery(String),

    #[error("permission denied for {0}")]
    PermissionDenied(String),

    // -- Assembly errors --
    #[error("image load failed: {0}")]
    ImageLoad(String),

    #[error("image {path} did not load within {seconds}s")]
    ImageLoadTimeout { path: String, seconds: u64 },

    #[error("image processing failed: {0}")]
    Image(String),

    #[error("PDF operation failed: {0}")]
    Pdf(String),

    // -- Share errors --
    #[error("no share mechanism is available on this platform")]
    ShareUnavailable,

    #[error("share failed: {0}")]
    Share(String),

    // -- Operation guards --
    #[error("an assembly is already in progress")]
    AssemblyInProgress,

    // -- Storage / serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BildwerkError>;

/// Failure classification for caller feedback.
///
/// Replaces the blanket catch-all of the original flow: every operation
/// returns a typed error and callers branch on its kind to render feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The platform lacks the capability entirely (no share sheet, stub bridge).
    CapabilityUnavailable,
    /// A capability call failed or was denied; state is unchanged, retry via UI.
    CapabilityFailed,
    /// Document assembly failed; no partial artifact was produced.
    AssemblyFailed,
    /// An assembly is already running; the request was rejected.
    Busy,
}

impl BildwerkError {
    /// Classify this error for user-facing handling.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ShareUnavailable | Self::PlatformUnavailable => {
                FailureKind::CapabilityUnavailable
            }
            Self::Camera(_)
            | Self::Gallery(_)
            | Self::PermissionDenied(_)
            | Self::Share(_)
            | Self::Bridge(_) => FailureKind::CapabilityFailed,
            Self::AssemblyInProgress => FailureKind::Busy,
            Self::ImageLoad(_)
            | Self::ImageLoadTimeout { .. }
            | Self::Image(_)
            | Self::Pdf(_)
            | Self::Io(_)
            | Self::Serialization(_) => FailureKind::AssemblyFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_unavailable_is_capability_unavailable() {
        assert_eq!(
            BildwerkError::ShareUnavailable.kind(),
            FailureKind::CapabilityUnavailable
        );
    }

    #[test]
    fn camera_failure_is_capability_failed() {
        let err = BildwerkError::Camera("user denied access".into());
        assert_eq!(err.kind(), FailureKind::CapabilityFailed);
    }

    #[test]
    fn load_timeout_is_assembly_failed() {
        let err = BildwerkError::ImageLoadTimeout {
            path: "/tmp/photo.jpg".into(),
            seconds: 10,
        };
        assert_eq!(err.kind(), FailureKind::AssemblyFailed);
    }

    #[test]
    fn busy_is_its_own_kind() {
        assert_eq!(BildwerkError::AssemblyInProgress.kind(), FailureKind::Busy);
    }
}
