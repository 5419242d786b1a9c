// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.
//
// The composer never talks to a platform SDK directly: camera, gallery, and
// share are each one narrow trait, so platform implementations and test
// doubles substitute freely.

use bildwerk_core::error::Result;
use bildwerk_core::types::{CaptureOptions, ImageEntry, PickOptions, ShareRequest};

/// Unified bridge that groups the native capabilities Bildwerk consumes.
pub trait PlatformBridge: NativeCamera + NativeGallery + NativeShare + Send + Sync {
    /// Human-readable platform name (e.g. "iOS", "Android").
    fn platform_name(&self) -> &str;
}

/// Capture a single photo with the device camera.
pub trait NativeCamera {
    /// Launch the system camera and return the captured photo's paths.
    /// Returns `Ok(None)` if the user cancelled.
    fn capture_photo(&self, opts: &CaptureOptions) -> Result<Option<ImageEntry>>;
}

/// Pick photos from the device gallery.
pub trait NativeGallery {
    /// Show the system photo picker and return the chosen photos in the
    /// order the platform reports them, at most `opts.limit` entries.
    /// An empty vector means the user cancelled.
    fn pick_photos(&self, opts: &PickOptions) -> Result<Vec<ImageEntry>>;
}

/// Hand files to the OS share sheet.
pub trait NativeShare {
    /// Whether this platform offers a share mechanism at all.
    fn can_share(&self) -> bool;

    /// Present the share sheet for the request's files, title, and text.
    fn share(&self, request: &ShareRequest) -> Result<()>;
}
