// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: builds a multi-page document from laid-out pages using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use image::DynamicImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::types::QualityTier;
use tracing::{debug, info, instrument};

use crate::layout::engine::PageSpec;

/// Embedding resolution for placed rasters. The placement rectangle fixes
/// the physical size on the page, so this only anchors the scale factors.
const EMBED_DPI: f32 = 150.0;

/// Writes laid-out pages into a PDF document.
///
/// Exposes exactly the two operations the assembly loop relies on: append a
/// page with given physical dimensions, and draw a raster into that page's
/// placement rectangle at the configured quality. Serialisation happens once
/// in [`PdfWriter::finish`].
pub struct PdfWriter {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    quality: QualityTier,
}

impl PdfWriter {
    /// Create a writer with the given document title and image quality tier.
    pub fn new(title: &str, quality: QualityTier) -> Self {
        Self {
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            quality,
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append one page and draw the image into its placement rectangle.
    ///
    /// The raster goes through a JPEG encode at the tier's quality factor
    /// before embedding, so the tier governs the quantisation of what ends
    /// up in the document.
    #[instrument(skip(self, spec, image), fields(
        page = self.pages.len(),
        img_w = image.width(),
        img_h = image.height(),
    ))]
    pub fn add_page(&mut self, spec: &PageSpec, image: &DynamicImage) -> Result<()> {
        let compressed = recompress_jpeg(image, self.quality.jpeg_quality())?;
        let rgb = compressed.to_rgb8();
        let (img_width, img_height) = rgb.dimensions();

        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: img_width as usize,
            height: img_height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        // Native size of the embedded raster at the anchor DPI; the scale
        // factors map it onto the placement rectangle exactly.
        let native_w_pt = img_width as f32 / EMBED_DPI * 72.0;
        let native_h_pt = img_height as f32 / EMBED_DPI * 72.0;
        let target_w_pt = Mm(spec.placement.width_mm as f32).into_pt().0;
        let target_h_pt = Mm(spec.placement.height_mm as f32).into_pt().0;

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(Mm(spec.placement.x_mm as f32).into_pt().0)),
                translate_y: Some(Pt(Mm(spec.placement.y_mm as f32).into_pt().0)),
                scale_x: Some(target_w_pt / native_w_pt),
                scale_y: Some(target_h_pt / native_h_pt),
                dpi: Some(EMBED_DPI),
                rotate: None,
            },
        }];

        self.pages.push(PdfPage::new(
            Mm(spec.width_mm as f32),
            Mm(spec.height_mm as f32),
            ops,
        ));

        debug!(
            page_w_mm = spec.width_mm,
            page_h_mm = spec.height_mm,
            placed_w_mm = spec.placement.width_mm,
            placed_h_mm = spec.placement.height_mm,
            "Image placed on page"
        );
        Ok(())
    }

    /// Serialise the document and return its bytes.
    #[instrument(skip(self), fields(pages = self.pages.len()))]
    pub fn finish(self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(SeitenwerkError::PdfError(
                "document has no pages".to_string(),
            ));
        }

        let mut doc = self.doc;
        doc.with_pages(self.pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        info!(bytes = output.len(), "Document serialised");
        Ok(output)
    }

    /// Serialise the document and write it to a file.
    pub fn finish_to_file(self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.finish()?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote PDF to {}", path.as_ref().display());
        Ok(())
    }
}

/// Run a raster through a JPEG encode/decode round at the given quality.
fn recompress_jpeg(image: &DynamicImage, quality: u8) -> Result<DynamicImage> {
    let rgb = image.to_rgb8();
    let mut buffer = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|err| SeitenwerkError::ImageError(format!("JPEG encoding failed: {}", err)))?;

    image::load_from_memory(&buffer)
        .map_err(|err| SeitenwerkError::ImageError(format!("JPEG decoding failed: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::engine::PlacementRect;
    use image::{Rgb, RgbImage};
    use seitenwerk_core::types::Orientation;

    fn a4_spec(first: bool) -> PageSpec {
        PageSpec {
            width_mm: 210.0,
            height_mm: 297.0,
            orientation: Orientation::Portrait,
            placement: PlacementRect::new(10.0, 58.5, 190.0, 180.0),
            is_first_page: first,
        }
    }

    /// Deterministic pseudo-noise so JPEG quantisation has something to bite on.
    fn noisy_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let v = ((x * 7 + y * 13) % 251) as u8;
            Rgb([v, v.wrapping_mul(3), v.wrapping_add(89)])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn produces_pdf_bytes_with_header() {
        let mut writer = PdfWriter::new("test", QualityTier::Medium);
        writer.add_page(&a4_spec(true), &noisy_image(64, 48)).unwrap();
        writer.add_page(&a4_spec(false), &noisy_image(48, 64)).unwrap();
        assert_eq!(writer.page_count(), 2);

        let bytes = writer.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_document_fails_to_finish() {
        let writer = PdfWriter::new("empty", QualityTier::Medium);
        let err = writer.finish().unwrap_err();
        assert!(matches!(err, SeitenwerkError::PdfError(_)));
    }

    #[test]
    fn quality_tier_changes_embedded_pixels() {
        let image = noisy_image(120, 90);
        let high = recompress_jpeg(&image, QualityTier::High.jpeg_quality()).unwrap();
        let low = recompress_jpeg(&image, QualityTier::Low.jpeg_quality()).unwrap();

        assert_eq!((high.width(), high.height()), (120, 90));
        assert_ne!(
            high.to_rgb8().as_raw(),
            low.to_rgb8().as_raw(),
            "different quality factors should quantise differently"
        );
    }
}
