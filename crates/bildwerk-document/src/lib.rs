// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildwerk-document — Document assembly for the Bildwerk photo composer.
//
// Provides bounded-timeout image loading, aspect-preserving downscaling with
// lossy re-encoding, PDF page composition (one page per photo plus a caption
// page), and SHA-256 fingerprinting of the exported document.

pub mod compose;
pub mod image;
pub mod integrity;

// Re-export the primary entry points so callers can use `bildwerk_document::PdfComposer` etc.
pub use compose::PdfComposer;
pub use image::loader;
