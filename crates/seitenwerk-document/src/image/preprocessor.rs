// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image preprocessor: crop normalisation and near-white border trimming.
// Operates on in-memory images using the `image` crate.

use image::DynamicImage;
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::types::CropRegion;
use tracing::{debug, instrument};

/// Normalises a raster before layout: applies a caller-supplied crop, or
/// trims uniform near-white borders, or passes the image through unchanged.
///
/// An explicit crop always wins over automatic trimming: the crop rectangle
/// is a deliberate user choice, so the trim flag is ignored whenever a crop
/// is present.
///
/// Output is deterministic: identical pixel data and threshold produce a
/// bit-identical result.
#[derive(Debug, Clone, Copy)]
pub struct ImagePreprocessor {
    /// Channel value above which a pixel counts as background.
    white_threshold: u8,
}

impl ImagePreprocessor {
    /// Default trim threshold: a channel is "near white" above 240 of 255.
    pub const DEFAULT_WHITE_THRESHOLD: u8 = 240;

    pub fn new() -> Self {
        Self {
            white_threshold: Self::DEFAULT_WHITE_THRESHOLD,
        }
    }

    /// Create a preprocessor with a non-default background threshold.
    pub fn with_threshold(white_threshold: u8) -> Self {
        Self { white_threshold }
    }

    /// The configured background threshold.
    pub fn white_threshold(&self) -> u8 {
        self.white_threshold
    }

    /// Normalise one raster.
    ///
    /// With a crop region, the output is exactly that sub-rectangle. Without
    /// one, and with `trim` set, the output is the inclusive bounding box of
    /// all non-background pixels; an image with no such pixel is returned
    /// unchanged rather than collapsed to a zero-size raster. Otherwise the
    /// image passes through as-is.
    #[instrument(skip(self, image), fields(
        width = image.width(),
        height = image.height(),
        cropped = crop.is_some(),
        trim,
    ))]
    pub fn prepare(
        &self,
        image: DynamicImage,
        crop: Option<&CropRegion>,
        trim: bool,
    ) -> Result<DynamicImage> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(SeitenwerkError::InvalidImage(format!(
                "image has degenerate dimensions {width}x{height}"
            )));
        }

        if let Some(region) = crop {
            region.validate_within(width, height)?;
            debug!(
                x = region.x,
                y = region.y,
                crop_w = region.width,
                crop_h = region.height,
                "Applying crop region"
            );
            return Ok(image.crop_imm(region.x, region.y, region.width, region.height));
        }

        if trim {
            return Ok(self.trim_borders(image));
        }

        Ok(image)
    }

    /// Trim uniform near-white borders.
    ///
    /// A pixel is background iff every one of its three colour channels
    /// exceeds the threshold. The output is the inclusive bounding box of
    /// the remaining pixels.
    fn trim_borders(&self, image: DynamicImage) -> DynamicImage {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let threshold = self.white_threshold;

        let mut min_x = width;
        let mut min_y = height;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut found = false;

        for (x, y, pixel) in rgb.enumerate_pixels() {
            let image::Rgb([r, g, b]) = *pixel;
            if r > threshold && g > threshold && b > threshold {
                continue;
            }
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        // All background: keep the image rather than produce a zero-size raster.
        if !found {
            debug!("No content pixels found; image returned unchanged");
            return image;
        }

        // Already tight, nothing to remove.
        if min_x == 0 && min_y == 0 && max_x == width - 1 && max_y == height - 1 {
            return image;
        }

        let trimmed_w = max_x - min_x + 1;
        let trimmed_h = max_y - min_y + 1;
        debug!(min_x, min_y, trimmed_w, trimmed_h, "Trimmed near-white border");
        image.crop_imm(min_x, min_y, trimmed_w, trimmed_h)
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
