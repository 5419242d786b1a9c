// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge for development and CI builds.
//
// There is no camera or share sheet on desktop: capture and pick both open a
// file dialog over the user's existing images, and the share capability
// reports itself unavailable so the composer aborts before producing a
// document.

use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::types::{CaptureOptions, ImageEntry, PickOptions, ShareRequest};

use crate::traits::*;

/// Extensions offered by the desktop file dialogs.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "bmp"];

/// Bridge returned on non-mobile platforms.
pub struct DesktopBridge;

impl DesktopBridge {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DesktopBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl NativeCamera for DesktopBridge {
    /// Desktop "capture": pick one existing image from disk.
    ///
    /// Quality and edit options are camera parameters and have no effect on
    /// an already-encoded file.
    fn capture_photo(&self, _opts: &CaptureOptions) -> Result<Option<ImageEntry>> {
        tracing::info!("desktop: substituting file dialog for camera capture");

        let picked = rfd::FileDialog::new()
            .set_title("Select a photo")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file();

        Ok(picked.map(ImageEntry::local))
    }
}

impl NativeGallery for DesktopBridge {
    /// Desktop "gallery": multi-select images from disk, truncated to the
    /// pick limit.
    fn pick_photos(&self, opts: &PickOptions) -> Result<Vec<ImageEntry>> {
        tracing::info!(limit = opts.limit, "desktop: opening multi-file dialog");

        let picked = rfd::FileDialog::new()
            .set_title("Select photos")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_files()
            .unwrap_or_default();

        if picked.len() > opts.limit {
            tracing::warn!(
                picked = picked.len(),
                limit = opts.limit,
                "truncating selection to pick limit"
            );
        }

        Ok(picked
            .into_iter()
            .take(opts.limit)
            .map(ImageEntry::local)
            .collect())
    }
}

impl NativeShare for DesktopBridge {
    fn can_share(&self) -> bool {
        false
    }

    fn share(&self, _request: &ShareRequest) -> Result<()> {
        tracing::warn!("NativeShare::share called on desktop bridge");
        Err(BildwerkError::ShareUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_name() {
        let bridge = DesktopBridge::new();
        assert_eq!(bridge.platform_name(), "Desktop");
    }

    #[test]
    fn share_is_unavailable() {
        let bridge = DesktopBridge::new();
        assert!(!bridge.can_share());

        let request = ShareRequest {
            files: Vec::new(),
            title: "Shared PDF".into(),
            text: "Here is your shared PDF.".into(),
        };
        let err = bridge.share(&request).unwrap_err();
        assert!(matches!(err, BildwerkError::ShareUnavailable));
    }

    // Dialog-presenting methods require a display server and are exercised
    // manually rather than via `cargo test`.
}
