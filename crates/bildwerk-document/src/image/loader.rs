// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image loading with a bounded wait.
//
// Assembly suspends on each photo until its pixel data is available. The wait
// is capped: a photo that never loads fails the whole operation with a
// timeout error instead of stalling it indefinitely.

use std::path::Path;
use std::time::Duration;

use bildwerk_core::error::{BildwerkError, Result};
use image::DynamicImage;
use tracing::debug;

/// Load and decode the image at `path`, failing if it takes longer than
/// `timeout`.
pub async fn load_with_timeout(path: &Path, timeout: Duration) -> Result<DynamicImage> {
    match tokio::time::timeout(timeout, load(path)).await {
        Ok(result) => result,
        Err(_) => Err(BildwerkError::ImageLoadTimeout {
            path: path.display().to_string(),
            seconds: timeout.as_secs(),
        }),
    }
}

/// Load and decode the image at `path` with no time bound.
pub async fn load(path: &Path) -> Result<DynamicImage> {
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        BildwerkError::ImageLoad(format!("failed to read {}: {}", path.display(), err))
    })?;
    let img = decode(&bytes)?;
    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "image loaded"
    );
    Ok(img)
}

/// Decode raw encoded bytes (JPEG, PNG, etc.) into pixel data.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|err| BildwerkError::Image(format!("failed to decode image: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::{Rgb, RgbImage};

    fn write_test_png(dir: &std::path::Path, name: &str, w: u32, h: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        let img = RgbImage::from_pixel(w, h, Rgb([120u8, 80, 40]));
        img.save(&path).expect("write test png");
        path
    }

    #[tokio::test]
    async fn loads_a_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "photo.png", 64, 48);

        let img = load_with_timeout(&path, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!((img.width(), img.height()), (64, 48));
    }

    #[tokio::test]
    async fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-there.png");

        let err = load_with_timeout(&path, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, BildwerkError::ImageLoad(_)));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, BildwerkError::Image(_)));
    }
}
