// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Seitenwerk PDF assembly engine.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeitenwerkError};

/// Standard page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PageSize {
    /// Dimensions in millimetres (width, height), portrait aspect.
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Tabloid => (279, 432),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }

    /// Parse a page-size token as supplied by a caller ("a4", "letter", ...).
    ///
    /// Unrecognised tokens are a configuration error, not a fallback to a
    /// default size.
    pub fn from_token(token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "a3" => Ok(Self::A3),
            "a5" => Ok(Self::A5),
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            "tabloid" | "ledger" => Ok(Self::Tabloid),
            other => Err(SeitenwerkError::InvalidConfiguration(format!(
                "unrecognised page size token: {other:?}"
            ))),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Apply this orientation to a pair of page dimensions in millimetres.
    ///
    /// Portrait yields the short edge as the width, landscape the long edge.
    pub fn apply_to_mm(&self, width_mm: f64, height_mm: f64) -> (f64, f64) {
        let (short, long) = if width_mm <= height_mm {
            (width_mm, height_mm)
        } else {
            (height_mm, width_mm)
        };
        match self {
            Self::Portrait => (short, long),
            Self::Landscape => (long, short),
        }
    }

    /// The natural orientation of a raster with the given pixel dimensions:
    /// landscape when it is wider than tall, portrait otherwise.
    pub fn of_pixels(width_px: u32, height_px: u32) -> Self {
        if width_px > height_px {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    /// Parse an orientation token ("portrait" or "landscape").
    pub fn from_token(token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            other => Err(SeitenwerkError::InvalidConfiguration(format!(
                "unrecognised orientation token: {other:?}"
            ))),
        }
    }
}

/// Output quality tier for embedded images.
///
/// The named tiers map to JPEG quality factors: high 0.95, medium 0.85,
/// low 0.75. `Custom` accepts any factor in (0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum QualityTier {
    High,
    Medium,
    Low,
    Custom(f64),
}

impl QualityTier {
    /// Quality factor on the 0.0 to 1.0 scale.
    pub fn factor(&self) -> f64 {
        match self {
            Self::High => 0.95,
            Self::Medium => 0.85,
            Self::Low => 0.75,
            Self::Custom(factor) => *factor,
        }
    }

    /// JPEG encoder quality (1 to 100).
    pub fn jpeg_quality(&self) -> u8 {
        (self.factor() * 100.0).round().clamp(1.0, 100.0) as u8
    }

    /// Reject custom factors outside (0.0, 1.0].
    pub fn validate(&self) -> Result<()> {
        let factor = self.factor();
        if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
            return Err(SeitenwerkError::InvalidConfiguration(format!(
                "quality factor must be in (0.0, 1.0], got {factor}"
            )));
        }
        Ok(())
    }
}

impl Default for QualityTier {
    fn default() -> Self {
        Self::Medium
    }
}

/// A rectangular crop region in source-pixel coordinates, origin top-left.
///
/// Produced by an external interactive cropping tool; the engine only ever
/// consumes the finished rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check that the region is non-empty and lies entirely within an image
    /// of the given pixel dimensions.
    pub fn validate_within(&self, image_width: u32, image_height: u32) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SeitenwerkError::InvalidImage(format!(
                "crop region has zero extent: {}x{}",
                self.width, self.height
            )));
        }

        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        let in_bounds = matches!(
            (right, bottom),
            (Some(r), Some(b)) if r <= image_width && b <= image_height
        );
        if !in_bounds {
            return Err(SeitenwerkError::InvalidImage(format!(
                "crop region {}x{}+{}+{} exceeds image bounds {}x{}",
                self.width, self.height, self.x, self.y, image_width, image_height
            )));
        }
        Ok(())
    }
}

/// How images are mapped onto pages. Chosen once per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Every image shares one physical page geometry and is letterboxed
    /// into the margin-inset usable area.
    FitToFixedPage {
        page_size: PageSize,
        orientation: Orientation,
        margin_mm: f64,
    },
    /// Each page is sized exactly to its image at the given resolution.
    /// No margins, no letterboxing; orientation follows the image.
    ExactFit { pixels_per_mm: f64 },
}

impl LayoutMode {
    /// Reject geometrically impossible configurations up front.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::FitToFixedPage {
                page_size,
                orientation,
                margin_mm,
            } => {
                if !margin_mm.is_finite() || *margin_mm < 0.0 {
                    return Err(SeitenwerkError::InvalidConfiguration(format!(
                        "margin must be a non-negative number of millimetres, got {margin_mm}"
                    )));
                }
                let (w, h) = page_size.dimensions_mm();
                let (page_w, page_h) = orientation.apply_to_mm(w as f64, h as f64);
                let usable_w = page_w - 2.0 * margin_mm;
                let usable_h = page_h - 2.0 * margin_mm;
                if usable_w <= 0.0 || usable_h <= 0.0 {
                    return Err(SeitenwerkError::InvalidConfiguration(format!(
                        "margin of {margin_mm}mm leaves no usable area on a \
                         {page_w}x{page_h}mm page"
                    )));
                }
                Ok(())
            }
            Self::ExactFit { pixels_per_mm } => {
                if !pixels_per_mm.is_finite() || *pixels_per_mm <= 0.0 {
                    return Err(SeitenwerkError::InvalidConfiguration(format!(
                        "pixels per millimetre must be positive, got {pixels_per_mm}"
                    )));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_tokens_parse() {
        assert_eq!(PageSize::from_token("A4").unwrap(), PageSize::A4);
        assert_eq!(PageSize::from_token("letter").unwrap(), PageSize::Letter);
        assert_eq!(PageSize::from_token("ledger").unwrap(), PageSize::Tabloid);
    }

    #[test]
    fn unknown_page_size_token_is_configuration_error() {
        let err = PageSize::from_token("b5").unwrap_err();
        assert!(matches!(err, SeitenwerkError::InvalidConfiguration(_)));
    }

    #[test]
    fn orientation_swaps_dimensions() {
        assert_eq!(
            Orientation::Portrait.apply_to_mm(210.0, 297.0),
            (210.0, 297.0)
        );
        assert_eq!(
            Orientation::Landscape.apply_to_mm(210.0, 297.0),
            (297.0, 210.0)
        );
        // A custom size declared landscape-first still obeys the request.
        assert_eq!(
            Orientation::Portrait.apply_to_mm(300.0, 200.0),
            (200.0, 300.0)
        );
    }

    #[test]
    fn orientation_of_pixels() {
        assert_eq!(Orientation::of_pixels(2000, 1000), Orientation::Landscape);
        assert_eq!(Orientation::of_pixels(1000, 2000), Orientation::Portrait);
        assert_eq!(Orientation::of_pixels(1500, 1500), Orientation::Portrait);
    }

    #[test]
    fn quality_tier_presets() {
        assert_eq!(QualityTier::High.jpeg_quality(), 95);
        assert_eq!(QualityTier::Medium.jpeg_quality(), 85);
        assert_eq!(QualityTier::Low.jpeg_quality(), 75);
    }

    #[test]
    fn quality_custom_out_of_range_rejected() {
        assert!(QualityTier::Custom(0.5).validate().is_ok());
        assert!(QualityTier::Custom(0.0).validate().is_err());
        assert!(QualityTier::Custom(1.5).validate().is_err());
        assert!(QualityTier::Custom(f64::NAN).validate().is_err());
    }

    #[test]
    fn crop_region_bounds() {
        let crop = CropRegion::new(10, 10, 100, 50);
        assert!(crop.validate_within(200, 200).is_ok());
        assert!(crop.validate_within(100, 100).is_err());
        assert!(CropRegion::new(0, 0, 0, 10).validate_within(100, 100).is_err());
    }

    #[test]
    fn crop_region_overflow_is_rejected() {
        let crop = CropRegion::new(u32::MAX, 0, 2, 2);
        assert!(crop.validate_within(u32::MAX, 100).is_err());
    }

    #[test]
    fn layout_mode_margin_validation() {
        let ok = LayoutMode::FitToFixedPage {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 10.0,
        };
        assert!(ok.validate().is_ok());

        let negative = LayoutMode::FitToFixedPage {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: -1.0,
        };
        assert!(negative.validate().is_err());

        // A 210mm wide page with 105mm margins has zero usable width.
        let swallowed = LayoutMode::FitToFixedPage {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 105.0,
        };
        assert!(swallowed.validate().is_err());
    }

    #[test]
    fn exact_fit_requires_positive_resolution() {
        assert!(LayoutMode::ExactFit { pixels_per_mm: 7.5 }.validate().is_ok());
        assert!(
            LayoutMode::ExactFit { pixels_per_mm: 0.0 }
                .validate()
                .is_err()
        );
        assert!(
            LayoutMode::ExactFit {
                pixels_per_mm: -2.0
            }
            .validate()
            .is_err()
        );
    }
}
