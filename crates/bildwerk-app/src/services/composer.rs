// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Composer service — wires the camera, gallery, document, and share
// capabilities together for the UI.
//
// One assembly runs at a time: an atomic in-progress flag rejects a second
// assemble-and-share while the first is in flight, and is released on every
// exit path by a drop guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bildwerk_bridge::platform_bridge;
use bildwerk_bridge::traits::PlatformBridge;
use bildwerk_core::AppConfig;
use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::types::{CompositionId, ImageEntry, ShareFile, ShareRequest};
use bildwerk_document::PdfComposer;
use bildwerk_document::{integrity, loader};
use tracing::{info, warn};

/// Name under which the assembled document is handed to the share sheet.
const SHARE_FILE_NAME: &str = "shared_images.pdf";
/// Title shown by the share sheet.
const SHARE_TITLE: &str = "Shared PDF";
/// Descriptive text accompanying the shared file.
const SHARE_TEXT: &str = "Here is your shared PDF.";

/// What a successful assemble-and-share produced.
#[derive(Debug, Clone)]
pub struct ShareSummary {
    pub id: CompositionId,
    /// Photo pages plus the caption page.
    pub pages: usize,
    /// Size of the exported document.
    pub document_bytes: usize,
    /// SHA-256 fingerprint of the exported document.
    pub document_hash: String,
}

/// Shared application service accessible from all components via
/// `use_context::<ComposerService>()`.
///
/// All fields are cheaply cloneable (Arc-wrapped or Copy) so the struct can
/// be passed into closures and async blocks without lifetime issues.
#[derive(Clone)]
pub struct ComposerService {
    bridge: Arc<dyn PlatformBridge>,
    config: AppConfig,
    composer: Arc<PdfComposer>,
    busy: Arc<AtomicBool>,
}

impl ComposerService {
    /// Initialise against the compiled-in platform bridge. Call once at app
    /// startup.
    pub fn init() -> Self {
        Self::with_bridge(Arc::from(platform_bridge()), AppConfig::default())
    }

    /// Initialise against an explicit bridge — the seam test doubles use.
    pub fn with_bridge(bridge: Arc<dyn PlatformBridge>, config: AppConfig) -> Self {
        Self {
            bridge,
            composer: Arc::new(PdfComposer::from_config(&config)),
            config,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Name of the platform the bridge talks to.
    pub fn platform_name(&self) -> &str {
        self.bridge.platform_name()
    }

    /// Whether an assemble-and-share is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    // -- Capture / pick -------------------------------------------------------

    /// Capture one photo with the device camera.
    ///
    /// `Ok(None)` means the user cancelled; the selection is left for the
    /// caller to mutate so cancellation changes nothing.
    pub fn capture_photo(&self) -> Result<Option<ImageEntry>> {
        let entry = self.bridge.capture_photo(&self.config.capture_options())?;
        match &entry {
            Some(e) => info!(path = %e.device_path.display(), "photo captured"),
            None => info!("capture cancelled"),
        }
        Ok(entry)
    }

    /// Pick photos from the gallery, in the order the platform returned them.
    pub fn pick_photos(&self) -> Result<Vec<ImageEntry>> {
        let entries = self.bridge.pick_photos(&self.config.pick_options())?;
        info!(count = entries.len(), "photos picked");
        Ok(entries)
    }

    // -- Assemble and share ---------------------------------------------------

    /// Load every selected photo, assemble the document, and hand it to the
    /// platform share sheet.
    ///
    /// Fails before any photo is loaded when the platform has no share
    /// mechanism, so an unavailable share produces no export side effect.
    /// Any later failure aborts the whole operation; no partial document is
    /// shared.
    pub async fn assemble_and_share(
        &self,
        entries: &[ImageEntry],
        caption: &str,
    ) -> Result<ShareSummary> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("assemble-and-share rejected: already in progress");
            return Err(BildwerkError::AssemblyInProgress);
        }
        let _guard = BusyGuard(Arc::clone(&self.busy));

        let id = CompositionId::new();
        info!(%id, photos = entries.len(), "assembly started");

        if !self.bridge.can_share() {
            warn!(%id, "share capability unavailable — nothing assembled or shared");
            return Err(BildwerkError::ShareUnavailable);
        }

        // Sequential loads: each photo must be decoded before the next
        // begins, and each wait is bounded.
        let timeout = Duration::from_secs(self.config.image_load_timeout_secs);
        let mut images = Vec::with_capacity(entries.len());
        for entry in entries {
            let img = loader::load_with_timeout(&entry.display_path, timeout).await?;
            images.push(img);
        }

        let document = self.composer.assemble(&images, caption)?;
        let document_bytes = document.len();
        let document_hash = integrity::hash_bytes(&document);
        info!(%id, hash = %document_hash, bytes = document_bytes, "document ready to share");

        let request = ShareRequest {
            files: vec![ShareFile::pdf(SHARE_FILE_NAME, document)],
            title: SHARE_TITLE.into(),
            text: SHARE_TEXT.into(),
        };
        self.bridge.share(&request)?;
        info!(%id, "share sheet invoked");

        Ok(ShareSummary {
            id,
            pages: entries.len() + 1,
            document_bytes,
            document_hash,
        })
    }
}

/// Releases the in-progress flag when the assembly scope exits, on success
/// and on every error path alike.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use bildwerk_bridge::traits::{NativeCamera, NativeGallery, NativeShare};
    use bildwerk_core::types::{CaptureOptions, PickOptions};
    use image::{Rgb, RgbImage};

    /// Scriptable bridge double recording every share request it receives.
    struct MockBridge {
        capture_result: Option<ImageEntry>,
        pick_result: Vec<ImageEntry>,
        share_available: bool,
        shared: Mutex<Vec<ShareRequest>>,
    }

    impl MockBridge {
        fn sharing() -> Self {
            Self {
                capture_result: None,
                pick_result: Vec::new(),
                share_available: true,
                shared: Mutex::new(Vec::new()),
            }
        }

        fn without_share() -> Self {
            Self {
                share_available: false,
                ..Self::sharing()
            }
        }

        fn share_count(&self) -> usize {
            self.shared.lock().unwrap().len()
        }
    }

    impl PlatformBridge for MockBridge {
        fn platform_name(&self) -> &str {
            "Mock"
        }
    }

    impl NativeCamera for MockBridge {
        fn capture_photo(&self, _opts: &CaptureOptions) -> Result<Option<ImageEntry>> {
            Ok(self.capture_result.clone())
        }
    }

    impl NativeGallery for MockBridge {
        fn pick_photos(&self, opts: &PickOptions) -> Result<Vec<ImageEntry>> {
            Ok(self.pick_result.iter().take(opts.limit).cloned().collect())
        }
    }

    impl NativeShare for MockBridge {
        fn can_share(&self) -> bool {
            self.share_available
        }

        fn share(&self, request: &ShareRequest) -> Result<()> {
            if !self.share_available {
                return Err(BildwerkError::ShareUnavailable);
            }
            self.shared.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn service(mock: Arc<MockBridge>) -> ComposerService {
        ComposerService::with_bridge(mock, AppConfig::default())
    }

    fn write_photo(dir: &std::path::Path, name: &str, w: u32, h: u32) -> ImageEntry {
        let path = dir.join(name);
        RgbImage::from_pixel(w, h, Rgb([90u8, 120, 200]))
            .save(&path)
            .expect("write test photo");
        ImageEntry::local(path)
    }

    #[tokio::test]
    async fn shares_one_pdf_named_and_typed() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![
            write_photo(dir.path(), "a.png", 64, 48),
            write_photo(dir.path(), "b.png", 40, 30),
        ];
        let mock = Arc::new(MockBridge::sharing());
        let svc = service(mock.clone());

        let summary = svc.assemble_and_share(&entries, "Trip report").await.unwrap();
        assert_eq!(summary.pages, 3);
        assert!(summary.document_bytes > 0);

        let shared = mock.shared.lock().unwrap();
        assert_eq!(shared.len(), 1);
        let request = &shared[0];
        assert_eq!(request.title, "Shared PDF");
        assert_eq!(request.text, "Here is your shared PDF.");
        assert_eq!(request.files.len(), 1);
        assert_eq!(request.files[0].name, "shared_images.pdf");
        assert_eq!(request.files[0].mime_type, "application/pdf");
        assert!(request.files[0].bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn no_photos_still_shares_a_caption_only_document() {
        let mock = Arc::new(MockBridge::sharing());
        let svc = service(mock.clone());

        let summary = svc.assemble_and_share(&[], "caption only").await.unwrap();
        assert_eq!(summary.pages, 1);
        assert_eq!(mock.share_count(), 1);
    }

    #[tokio::test]
    async fn share_unavailable_aborts_before_any_load() {
        // Entries point at nothing; if loading ran first this would be an
        // ImageLoad error instead of ShareUnavailable.
        let entries = vec![ImageEntry::local("/nowhere/missing.png")];
        let mock = Arc::new(MockBridge::without_share());
        let svc = service(mock.clone());

        let err = svc.assemble_and_share(&entries, "x").await.unwrap_err();
        assert!(matches!(err, BildwerkError::ShareUnavailable));
        assert_eq!(mock.share_count(), 0);
    }

    #[tokio::test]
    async fn missing_photo_aborts_without_sharing() {
        let entries = vec![ImageEntry::local("/nowhere/missing.png")];
        let mock = Arc::new(MockBridge::sharing());
        let svc = service(mock.clone());

        let err = svc.assemble_and_share(&entries, "x").await.unwrap_err();
        assert!(matches!(err, BildwerkError::ImageLoad(_)));
        assert_eq!(mock.share_count(), 0);
    }

    #[tokio::test]
    async fn concurrent_assembly_is_rejected() {
        let mock = Arc::new(MockBridge::sharing());
        let svc = service(mock);

        svc.busy.store(true, Ordering::Release);
        let err = svc.assemble_and_share(&[], "x").await.unwrap_err();
        assert!(matches!(err, BildwerkError::AssemblyInProgress));
        // The rejected call must not clear the flag the running one owns.
        assert!(svc.is_busy());
    }

    #[tokio::test]
    async fn busy_flag_is_released_after_failure() {
        let entries = vec![ImageEntry::local("/nowhere/missing.png")];
        let mock = Arc::new(MockBridge::sharing());
        let svc = service(mock.clone());

        let _ = svc.assemble_and_share(&entries, "x").await.unwrap_err();
        assert!(!svc.is_busy());

        // A fresh run afterwards is not spuriously rejected as busy.
        let err = svc.assemble_and_share(&entries, "x").await.unwrap_err();
        assert!(matches!(err, BildwerkError::ImageLoad(_)));
    }

    #[tokio::test]
    async fn capture_and_pick_pass_entries_through() {
        let entry = ImageEntry::local("/photos/cap.jpg");
        let mock = Arc::new(MockBridge {
            capture_result: Some(entry.clone()),
            pick_result: vec![
                ImageEntry::local("/photos/1.jpg"),
                ImageEntry::local("/photos/2.jpg"),
            ],
            ..MockBridge::sharing()
        });
        let svc = service(mock);

        assert_eq!(svc.capture_photo().unwrap(), Some(entry));
        let picked = svc.pick_photos().unwrap();
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0], ImageEntry::local("/photos/1.jpg"));
    }
}
