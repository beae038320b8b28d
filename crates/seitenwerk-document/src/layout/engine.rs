// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout engine: computes one page geometry per image.
//
// Two modes. FitToFixedPage letterboxes every image into the margin-inset
// usable area of one shared physical page. ExactFit sizes each page to its
// own image at a fixed resolution, so page geometry varies page to page.

use serde::{Deserialize, Serialize};
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::types::{LayoutMode, Orientation};
use tracing::{debug, instrument};

/// A rectangle on a page, in millimetres, origin at the page's bottom-left
/// corner (PDF coordinate convention).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementRect {
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PlacementRect {
    pub fn new(x_mm: f64, y_mm: f64, width_mm: f64, height_mm: f64) -> Self {
        Self {
            x_mm,
            y_mm,
            width_mm,
            height_mm,
        }
    }

    /// Centre x coordinate.
    pub fn center_x(&self) -> f64 {
        self.x_mm + self.width_mm / 2.0
    }

    /// Centre y coordinate.
    pub fn center_y(&self) -> f64 {
        self.y_mm + self.height_mm / 2.0
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width_mm / self.height_mm
    }
}

/// The layout decision for one image: the physical page to create and where
/// the image lands on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    /// Physical page width in millimetres.
    pub width_mm: f64,
    /// Physical page height in millimetres.
    pub height_mm: f64,
    /// Page orientation.
    pub orientation: Orientation,
    /// Where the image is drawn on the page.
    pub placement: PlacementRect,
    /// True only for the document's first page; the writer's implicit first
    /// page is reused rather than appended.
    pub is_first_page: bool,
}

/// Computes page geometry for an ordered sequence of raster dimensions.
///
/// The mode is validated at construction, so an engine that exists can lay
/// out any sequence of well-formed dimensions without configuration errors.
#[derive(Debug)]
pub struct PageLayoutEngine {
    mode: LayoutMode,
}

impl PageLayoutEngine {
    /// Create an engine for the given mode.
    ///
    /// Fails with `InvalidConfiguration` if the mode is geometrically
    /// impossible (negative margin, margins swallowing the whole page, or a
    /// non-positive resolution).
    pub fn new(mode: LayoutMode) -> Result<Self> {
        mode.validate()?;
        Ok(Self { mode })
    }

    /// The mode this engine lays out with.
    pub fn mode(&self) -> &LayoutMode {
        &self.mode
    }

    /// Lay out a whole sequence, one `PageSpec` per input, order-preserving.
    ///
    /// An empty input yields an empty output; whether that constitutes an
    /// error ("nothing to export") is decided one layer up, by the assembler.
    #[instrument(skip(self, dims), fields(count = dims.len()))]
    pub fn layout(&self, dims: &[(u32, u32)]) -> Result<Vec<PageSpec>> {
        dims.iter()
            .enumerate()
            .map(|(index, &(width_px, height_px))| self.layout_one(index, width_px, height_px))
            .collect()
    }

    /// Lay out a single image at the given position in the sequence.
    pub fn layout_one(&self, index: usize, width_px: u32, height_px: u32) -> Result<PageSpec> {
        if width_px == 0 || height_px == 0 {
            return Err(SeitenwerkError::InvalidImage(format!(
                "image {index} has degenerate dimensions {width_px}x{height_px}"
            )));
        }

        let spec = match &self.mode {
            LayoutMode::FitToFixedPage {
                page_size,
                orientation,
                margin_mm,
            } => {
                let (w, h) = page_size.dimensions_mm();
                let (page_w, page_h) = orientation.apply_to_mm(w as f64, h as f64);
                fit_to_page(
                    index,
                    width_px,
                    height_px,
                    page_w,
                    page_h,
                    *margin_mm,
                    *orientation,
                )
            }
            LayoutMode::ExactFit { pixels_per_mm } => {
                exact_fit(index, width_px, height_px, *pixels_per_mm)
            }
        };

        debug!(
            index,
            page_w = spec.width_mm,
            page_h = spec.height_mm,
            placed_w = spec.placement.width_mm,
            placed_h = spec.placement.height_mm,
            "Page laid out"
        );
        Ok(spec)
    }
}

/// Letterbox an image into the usable area of a fixed page and centre it.
///
/// The margin caps the placement size but does not shift the centring
/// origin: the rectangle is centred on the full page, not the usable area.
/// Deliberate, not an oversight; with symmetric margins on both axes the
/// two choices coincide anyway.
fn fit_to_page(
    index: usize,
    width_px: u32,
    height_px: u32,
    page_w: f64,
    page_h: f64,
    margin_mm: f64,
    orientation: Orientation,
) -> PageSpec {
    let usable_w = page_w - 2.0 * margin_mm;
    let usable_h = page_h - 2.0 * margin_mm;

    let ratio = width_px as f64 / height_px as f64;
    let usable_ratio = usable_w / usable_h;

    // Wider than the usable area: width-limited. Otherwise height-limited.
    let (placed_w, placed_h) = if ratio > usable_ratio {
        (usable_w, usable_w / ratio)
    } else {
        (usable_h * ratio, usable_h)
    };

    let x = (page_w - placed_w) / 2.0;
    let y = (page_h - placed_h) / 2.0;

    PageSpec {
        width_mm: page_w,
        height_mm: page_h,
        orientation,
        placement: PlacementRect::new(x, y, placed_w, placed_h),
        is_first_page: index == 0,
    }
}

/// Size the page exactly to the image: no margin, no letterboxing, and the
/// orientation follows the image itself.
fn exact_fit(index: usize, width_px: u32, height_px: u32, pixels_per_mm: f64) -> PageSpec {
    let page_w = width_px as f64 / pixels_per_mm;
    let page_h = height_px as f64 / pixels_per_mm;

    PageSpec {
        width_mm: page_w,
        height_mm: page_h,
        orientation: Orientation::of_pixels(width_px, height_px),
        placement: PlacementRect::new(0.0, 0.0, page_w, page_h),
        is_first_page: index == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seitenwerk_core::types::PageSize;

    const EPSILON: f64 = 1e-6;

    fn a4_portrait_10mm() -> PageLayoutEngine {
        PageLayoutEngine::new(LayoutMode::FitToFixedPage {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 10.0,
        })
        .unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        let scale = a.abs().max(b.abs()).max(1.0);
        assert!(
            (a - b).abs() <= EPSILON * scale,
            "expected {a} and {b} to agree within {EPSILON} relative"
        );
    }

    #[test]
    fn placement_preserves_aspect_ratio() {
        let engine = a4_portrait_10mm();
        for &(w, h) in &[(1000u32, 2000u32), (2000, 1000), (1500, 1500), (3, 7000)] {
            let spec = engine.layout_one(0, w, h).unwrap();
            assert_close(spec.placement.aspect_ratio(), w as f64 / h as f64);
        }
    }

    #[test]
    fn placement_fits_usable_area_with_one_axis_exact() {
        let engine = a4_portrait_10mm();
        let (usable_w, usable_h) = (190.0, 277.0);

        for &(w, h) in &[(1000u32, 2000u32), (2000, 1000), (1500, 1500)] {
            let spec = engine.layout_one(0, w, h).unwrap();
            let placed = spec.placement;
            assert!(placed.width_mm <= usable_w + EPSILON);
            assert!(placed.height_mm <= usable_h + EPSILON);

            let width_exact = (placed.width_mm - usable_w).abs() <= EPSILON;
            let height_exact = (placed.height_mm - usable_h).abs() <= EPSILON;
            assert!(width_exact || height_exact, "neither axis is tight for {w}x{h}");
        }
    }

    #[test]
    fn placement_is_centred_on_the_full_page() {
        let engine = a4_portrait_10mm();
        let spec = engine.layout_one(0, 2000, 1000).unwrap();
        assert_close(spec.placement.center_x(), 210.0 / 2.0);
        assert_close(spec.placement.center_y(), 297.0 / 2.0);
    }

    #[test]
    fn fixed_page_sequence_shares_geometry() {
        // Three mixed-aspect images, all on 210x297 pages, only the first
        // flagged as the document's first page.
        let engine = a4_portrait_10mm();
        let specs = engine
            .layout(&[(1000, 2000), (2000, 1000), (1500, 1500)])
            .unwrap();

        assert_eq!(specs.len(), 3);
        for spec in &specs {
            assert_close(spec.width_mm, 210.0);
            assert_close(spec.height_mm, 297.0);
        }
        assert!(specs[0].is_first_page);
        assert!(!specs[1].is_first_page);
        assert!(!specs[2].is_first_page);
    }

    #[test]
    fn landscape_swaps_page_dimensions() {
        let engine = PageLayoutEngine::new(LayoutMode::FitToFixedPage {
            page_size: PageSize::A4,
            orientation: Orientation::Landscape,
            margin_mm: 10.0,
        })
        .unwrap();

        let spec = engine.layout_one(0, 2000, 1000).unwrap();
        assert_close(spec.width_mm, 297.0);
        assert_close(spec.height_mm, 210.0);
    }

    #[test]
    fn zero_margin_uses_the_whole_page() {
        let engine = PageLayoutEngine::new(LayoutMode::FitToFixedPage {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 0.0,
        })
        .unwrap();

        // An image with exactly the page's aspect ratio fills it edge to edge.
        let spec = engine.layout_one(0, 2100, 2970).unwrap();
        assert_close(spec.placement.width_mm, 210.0);
        assert_close(spec.placement.height_mm, 297.0);
        assert_close(spec.placement.x_mm, 0.0);
        assert_close(spec.placement.y_mm, 0.0);
    }

    #[test]
    fn exact_fit_pages_match_their_images() {
        let engine = PageLayoutEngine::new(LayoutMode::ExactFit { pixels_per_mm: 10.0 }).unwrap();
        let spec = engine.layout_one(0, 2000, 1000).unwrap();

        assert_close(spec.width_mm, 200.0);
        assert_close(spec.height_mm, 100.0);
        assert_eq!(spec.orientation, Orientation::Landscape);
        assert_eq!(spec.placement, PlacementRect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn exact_fit_pages_do_not_interfere() {
        // Page i depends only on image i: swapping a neighbour leaves it alone.
        let engine = PageLayoutEngine::new(LayoutMode::ExactFit { pixels_per_mm: 8.0 }).unwrap();

        let a = engine.layout(&[(800, 600), (1234, 567)]).unwrap();
        let b = engine.layout(&[(800, 600), (4000, 4000)]).unwrap();

        assert_eq!(a[0].width_mm, b[0].width_mm);
        assert_eq!(a[0].height_mm, b[0].height_mm);
        assert_eq!(a[0].placement, b[0].placement);
    }

    #[test]
    fn exact_fit_square_image_is_portrait() {
        let engine = PageLayoutEngine::new(LayoutMode::ExactFit { pixels_per_mm: 10.0 }).unwrap();
        let spec = engine.layout_one(0, 1500, 1500).unwrap();
        assert_eq!(spec.orientation, Orientation::Portrait);
    }

    #[test]
    fn empty_sequence_yields_empty_output() {
        let engine = a4_portrait_10mm();
        assert!(engine.layout(&[]).unwrap().is_empty());
    }

    #[test]
    fn degenerate_dimensions_fail_before_layout_math() {
        let engine = a4_portrait_10mm();
        let err = engine.layout_one(0, 0, 1000).unwrap_err();
        assert!(matches!(err, SeitenwerkError::InvalidImage(_)));

        let err = engine.layout(&[(100, 100), (100, 0)]).unwrap_err();
        assert!(matches!(err, SeitenwerkError::InvalidImage(_)));
    }

    #[test]
    fn impossible_margins_fail_at_construction() {
        let err = PageLayoutEngine::new(LayoutMode::FitToFixedPage {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 150.0,
        })
        .unwrap_err();
        assert!(matches!(err, SeitenwerkError::InvalidConfiguration(_)));
    }
}
