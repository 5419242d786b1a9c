// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF composer — assemble photos and a caption into a paginated document
// using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use bildwerk_core::AppConfig;
use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::types::PageSize;
use image::DynamicImage;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// Heading drawn above the caption on the final page.
const CAPTION_HEADING: &str = "Description:";

/// Font sizes matching the original layout: 14 pt heading, 12 pt body.
const HEADING_SIZE_PT: f32 = 14.0;
const BODY_SIZE_PT: f32 = 12.0;
const BODY_LINE_HEIGHT_PT: f32 = 15.0;

/// Vertical positions of the caption page content, measured from the top edge.
const HEADING_TOP_MM: f32 = 20.0;
const BODY_TOP_MM: f32 = 30.0;

/// Builds one document per assemble-and-share run: one page per photo, each
/// scaled to the page content width, followed by a single caption page.
pub struct PdfComposer {
    page_size: PageSize,
    /// Inset from the page's left/top edges for images and text.
    margin_mm: f32,
    /// Photos wider than this are downscaled before placement.
    max_image_width_px: u32,
    /// Quality of the lossy re-encode applied to every placed photo (1-100).
    jpeg_quality: u8,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

impl PdfComposer {
    /// Create a composer targeting the given page size with layout defaults.
    pub fn new(page_size: PageSize) -> Self {
        let defaults = AppConfig::default();
        Self {
            page_size,
            margin_mm: defaults.page_margin_mm,
            max_image_width_px: defaults.max_image_width_px,
            jpeg_quality: defaults.jpeg_quality,
            title: "Bildwerk Photos".into(),
        }
    }

    /// Create a composer from application settings.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            page_size: config.page_size,
            margin_mm: config.page_margin_mm,
            max_image_width_px: config.max_image_width_px,
            jpeg_quality: config.jpeg_quality,
            title: "Bildwerk Photos".into(),
        }
    }

    /// Set the title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Page dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.page_size.dimensions_mm();
        (Mm(w_mm), Mm(h_mm))
    }

    /// Width available to content: page width minus both margins.
    pub fn content_width_mm(&self) -> f32 {
        let (w_mm, _) = self.page_size.dimensions_mm();
        w_mm - 2.0 * self.margin_mm
    }

    /// Size a photo occupies on its page: full content width, height
    /// proportional to the source aspect ratio.
    fn placed_size_mm(&self, img_width_px: u32, img_height_px: u32) -> (f32, f32) {
        let content_w = self.content_width_mm();
        let aspect = img_height_px as f32 / img_width_px as f32;
        (content_w, content_w * aspect)
    }

    // -- Assembly -------------------------------------------------------------

    /// Assemble photos and caption into PDF bytes.
    #[instrument(skip(self, images, caption), fields(images = images.len(), caption_len = caption.len()))]
    pub fn assemble(&self, images: &[DynamicImage], caption: &str) -> Result<Vec<u8>> {
        let doc = self.compose_document(images, caption)?;

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "PDF serialisation warnings");
        }

        info!(bytes = bytes.len(), "document assembled");
        Ok(bytes)
    }

    /// Build the in-memory document: one page per photo plus the caption page.
    ///
    /// Exposed so callers and tests can inspect the page structure before
    /// serialisation.
    pub fn compose_document(&self, images: &[DynamicImage], caption: &str) -> Result<PdfDocument> {
        let (page_w, page_h) = self.page_dimensions();

        let mut doc = PdfDocument::new(&self.title);
        let mut pages: Vec<PdfPage> = Vec::new();

        for (index, img) in images.iter().enumerate() {
            let raw = self.prepare_image(img)?;
            let ops = self.image_page_ops(&mut doc, &raw, page_h);
            pages.push(PdfPage::new(page_w, page_h, ops));
            debug!(index, width = raw.width, height = raw.height, "photo page added");
        }

        pages.push(self.caption_page(caption, page_w, page_h));

        doc.with_pages(pages);
        Ok(doc)
    }

    // -- Photo pages ----------------------------------------------------------

    /// Downscale and re-encode one photo for placement.
    ///
    /// Photos wider than the configured cap are shrunk to it, preserving
    /// aspect ratio; narrower photos pass through at their native size. The
    /// page then stores the lossy JPEG pixels, not the original decode.
    fn prepare_image(&self, img: &DynamicImage) -> Result<RawImage> {
        let resized = downscale_to_width(img, self.max_image_width_px);
        let jpeg = encode_jpeg(&resized, self.jpeg_quality)?;
        let placed = image::load_from_memory(&jpeg)
            .map_err(|err| BildwerkError::Image(format!("failed to re-read encoded photo: {err}")))?;

        let rgb = placed.to_rgb8();
        Ok(RawImage {
            width: rgb.width() as usize,
            height: rgb.height() as usize,
            pixels: RawImageData::U8(rgb.into_raw()),
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        })
    }

    /// Operations placing one photo on its page, inset by the margin from the
    /// left/top edges and scaled to the content width.
    fn image_page_ops(&self, doc: &mut PdfDocument, raw: &RawImage, page_h: Mm) -> Vec<Op> {
        let xobject_id = doc.add_image(raw);

        let (_, drawn_h_mm) = self.placed_size_mm(raw.width as u32, raw.height as u32);

        // At 72 dpi the image's native size in pt equals its pixel size, so a
        // single uniform scale maps pixels to the content width.
        let dpi: f32 = 72.0;
        let content_w_pt = Mm(self.content_width_mm()).into_pt().0;
        let scale = content_w_pt / raw.width as f32;

        let margin_pt = Mm(self.margin_mm).into_pt().0;
        let page_h_pt = page_h.into_pt().0;
        let drawn_h_pt = Mm(drawn_h_mm).into_pt().0;

        // printpdf places images from their bottom-left corner; the top inset
        // translates to page height minus margin minus drawn height.
        let y_offset = page_h_pt - margin_pt - drawn_h_pt;

        vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(margin_pt)),
                translate_y: Some(Pt(y_offset)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(dpi),
                rotate: None,
            },
        }]
    }

    // -- Caption page ---------------------------------------------------------

    /// The final page: heading label plus the caption, word-wrapped to the
    /// content width. Present even when no photos were selected.
    fn caption_page(&self, caption: &str, page_w: Mm, page_h: Mm) -> PdfPage {
        let margin_pt = Mm(self.margin_mm).into_pt().0;
        let page_h_pt = page_h.into_pt().0;

        let mut ops: Vec<Op> = Vec::new();

        // Heading.
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(margin_pt),
                y: Pt(page_h_pt - Mm(HEADING_TOP_MM).into_pt().0),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(HEADING_SIZE_PT),
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(CAPTION_HEADING.into())],
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::EndTextSection);

        // Body, wrapped at an estimated character count for Helvetica at the
        // body size. Average glyph width is roughly 0.50 * font size in pt,
        // converted to mm (1pt = 0.3528mm).
        let avg_char_width_mm = 0.50 * BODY_SIZE_PT * 0.3528;
        let max_chars_per_line = (self.content_width_mm() / avg_char_width_mm) as usize;
        let lines = wrap_text(caption, max_chars_per_line);

        let body_top_pt = page_h_pt - Mm(BODY_TOP_MM).into_pt().0;
        for (line_idx, line) in lines.iter().enumerate() {
            let y_pt = body_top_pt - line_idx as f32 * BODY_LINE_HEIGHT_PT;

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Pt(margin_pt),
                    y: Pt(y_pt),
                },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(BODY_SIZE_PT),
                font: BuiltinFont::Helvetica,
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(line.clone())],
                font: BuiltinFont::Helvetica,
            });
            ops.push(Op::EndTextSection);
        }

        PdfPage::new(page_w, page_h, ops)
    }
}

// -- Image helpers ------------------------------------------------------------

/// Shrink `img` so its width does not exceed `max_width_px`, preserving aspect
/// ratio. Images at or under the cap are returned unchanged — never upscaled.
fn downscale_to_width(img: &DynamicImage, max_width_px: u32) -> DynamicImage {
    if img.width() <= max_width_px {
        return img.clone();
    }
    let scaled_h =
        ((img.height() as u64 * max_width_px as u64) / img.width() as u64).max(1) as u32;
    img.resize(max_width_px, scaled_h, image::imageops::FilterType::Lanczos3)
}

/// Encode the image as JPEG bytes with the given quality (1-100).
fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let rgb = img.to_rgb8();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|err| BildwerkError::Image(format!("JPEG encoding failed: {err}")))?;
    Ok(buffer)
}

// -- Text wrapping ------------------------------------------------------------

/// Wrap a multi-line string so no line exceeds `max_chars` characters.
///
/// Paragraph breaks are preserved, wrapping is word-based within each
/// paragraph, and words longer than `max_chars` are hard-broken. No character
/// of any word is dropped.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for mut word in words {
            // Hard-break oversized words at the limit.
            while word.chars().count() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let split_at = word
                    .char_indices()
                    .nth(max_chars)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                let (head, tail) = word.split_at(split_at);
                lines.push(head.to_string());
                word = tail;
            }
            if word.is_empty() {
                continue;
            }

            let fits = current.is_empty()
                || current.chars().count() + 1 + word.chars().count() <= max_chars;
            if !fits {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::{Rgb, RgbImage};

    fn photo(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([200u8, 150, 100])))
    }

    fn composer() -> PdfComposer {
        PdfComposer::new(PageSize::A4)
    }

    // -- Page structure -------------------------------------------------------

    #[test]
    fn one_page_per_photo_plus_caption() {
        let images = vec![photo(64, 48), photo(32, 32), photo(100, 40)];
        let doc = composer()
            .compose_document(&images, "three photos")
            .unwrap();
        assert_eq!(doc.pages.len(), 4);
    }

    #[test]
    fn no_photos_still_yields_the_caption_page() {
        let doc = composer().compose_document(&[], "just words").unwrap();
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn trip_report_scenario_is_three_pages() {
        let images = vec![photo(1024, 768), photo(400, 300)];
        let doc = composer().compose_document(&images, "Trip report").unwrap();
        assert_eq!(doc.pages.len(), 3);
    }

    #[test]
    fn assemble_produces_pdf_bytes() {
        let bytes = composer().assemble(&[photo(16, 16)], "hello").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    // -- Placement geometry ---------------------------------------------------

    #[test]
    fn placed_width_equals_content_width() {
        let c = composer();
        // A4 (210mm) minus two 10mm margins.
        assert!((c.content_width_mm() - 190.0).abs() < f32::EPSILON);
        let (w, _) = c.placed_size_mm(1024, 768);
        assert!((w - 190.0).abs() < 1e-3);
    }

    #[test]
    fn placed_height_preserves_aspect_ratio() {
        let c = composer();
        let (w, h) = c.placed_size_mm(1024, 768);
        let source_aspect = 768.0 / 1024.0;
        assert!((h / w - source_aspect).abs() < 1e-4);

        let (w2, h2) = c.placed_size_mm(400, 300);
        assert!((h2 / w2 - 0.75).abs() < 1e-4);
    }

    // -- Downscaling ----------------------------------------------------------

    #[test]
    fn wide_photos_are_capped_at_the_width_limit() {
        let resized = downscale_to_width(&photo(1600, 1200), 800);
        assert_eq!(resized.width(), 800);
        let aspect = resized.height() as f32 / resized.width() as f32;
        assert!((aspect - 0.75).abs() < 0.01);
    }

    #[test]
    fn narrow_photos_are_not_upscaled() {
        let resized = downscale_to_width(&photo(400, 300), 800);
        assert_eq!((resized.width(), resized.height()), (400, 300));
    }

    #[test]
    fn jpeg_encode_round_trips_dimensions() {
        let bytes = encode_jpeg(&photo(64, 48), 70).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    // -- Wrapping -------------------------------------------------------------

    #[test]
    fn wrap_respects_the_line_limit() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_drops_no_characters() {
        let caption = "a fairly long trip report describing several days of travel photos";
        let lines = wrap_text(caption, 12);
        assert_eq!(lines.join(" "), caption);
    }

    #[test]
    fn short_captions_stay_on_one_line() {
        assert_eq!(wrap_text("Trip report", 40), vec!["Trip report".to_string()]);
    }

    #[test]
    fn oversized_words_are_hard_broken_without_loss() {
        let caption = "abcdefghijklmnop done";
        let lines = wrap_text(caption, 6);
        assert!(lines.iter().all(|l| l.chars().count() <= 6));
        assert_eq!(lines.concat().replace(' ', ""), caption.replace(' ', ""));
    }

    #[test]
    fn paragraph_breaks_are_preserved() {
        let lines = wrap_text("first\n\nsecond", 20);
        assert_eq!(
            lines,
            vec!["first".to_string(), String::new(), "second".to_string()]
        );
    }

    #[test]
    fn empty_caption_is_a_single_empty_line() {
        assert_eq!(wrap_text("", 20), vec![String::new()]);
    }
}
