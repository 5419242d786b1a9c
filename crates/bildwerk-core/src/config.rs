// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration. Held in memory only — nothing is written to disk
// between sessions.

use serde::{Deserialize, Serialize};

use crate::types::{CaptureOptions, PageSize, PickOptions};

/// Settings for capture, pick, and document assembly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AppConfig {
    /// Camera capture quality (1-100).
    pub capture_quality: u8,
    /// Offer the platform edit step after capture.
    pub allow_editing: bool,
    /// Gallery pick quality (1-100).
    pub gallery_quality: u8,
    /// Maximum photos returned by one gallery pick.
    pub gallery_limit: usize,
    /// Page size for assembled documents.
    pub page_size: PageSize,
    /// Inset from the page's left/top edges for placed images and text.
    pub page_margin_mm: f32,
    /// Images wider than this are downscaled before placement.
    pub max_image_width_px: u32,
    /// JPEG quality for the lossy re-encode of each placed image (1-100).
    pub jpeg_quality: u8,
    /// Upper bound on waiting for one image to load during assembly.
    pub image_load_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capture_quality: 90,
            allow_editing: true,
            gallery_quality: 90,
            gallery_limit: 10,
            page_size: PageSize::A4,
            page_margin_mm: 10.0,
            max_image_width_px: 800,
            jpeg_quality: 70,
            image_load_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Capture parameters for the camera capability.
    pub fn capture_options(&self) -> CaptureOptions {
        CaptureOptions {
            quality: self.capture_quality,
            allow_editing: self.allow_editing,
        }
    }

    /// Pick parameters for the gallery capability.
    pub fn pick_options(&self) -> PickOptions {
        PickOptions {
            quality: self.gallery_quality,
            limit: self.gallery_limit,
        }
    }
}
