// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bildwerk photo composer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one assemble-and-share run, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositionId(pub Uuid);

impl CompositionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CompositionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CompositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One captured or picked photo.
///
/// `device_path` is where the platform stored the file; `display_path` is the
/// path the UI can render directly. On desktop the two are the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub device_path: PathBuf,
    pub display_path: PathBuf,
}

impl ImageEntry {
    pub fn new(device_path: impl Into<PathBuf>, display_path: impl Into<PathBuf>) -> Self {
        Self {
            device_path: device_path.into(),
            display_path: display_path.into(),
        }
    }

    /// Entry whose device and display paths are the same file.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            device_path: path.clone(),
            display_path: path,
        }
    }
}

/// Page sizes the composer can target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PageSize {
    A4,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PageSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// Parameters for a single camera capture.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// JPEG quality the platform camera should use (1-100).
    pub quality: u8,
    /// Whether the platform editing step (crop/rotate) is offered after capture.
    pub allow_editing: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            quality: 90,
            allow_editing: true,
        }
    }
}

/// Parameters for a gallery multi-pick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PickOptions {
    /// JPEG quality for picked photos (1-100).
    pub quality: u8,
    /// Upper bound on photos returned per invocation.
    pub limit: usize,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            quality: 90,
            limit: 10,
        }
    }
}

/// One named file handed to the platform share facility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareFile {
    pub name: String,
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ShareFile {
    pub fn pdf(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: "application/pdf".into(),
            bytes,
        }
    }
}

/// A complete share invocation: named files plus title and descriptive text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRequest {
    pub files: Vec<ShareFile>,
    pub title: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_dimensions() {
        let (w, h) = PageSize::A4.dimensions_mm();
        assert_eq!((w, h), (210.0, 297.0));
    }

    #[test]
    fn local_entry_shares_paths() {
        let entry = ImageEntry::local("/tmp/photo.jpg");
        assert_eq!(entry.device_path, entry.display_path);
    }

    #[test]
    fn share_file_pdf_mime() {
        let file = ShareFile::pdf("shared_images.pdf", vec![1, 2, 3]);
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.bytes.len(), 3);
    }
}
