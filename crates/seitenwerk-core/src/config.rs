// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{LayoutMode, Orientation, PageSize, QualityTier};

/// Settings for one document export.
///
/// Chosen once per document, never per image. The defaults are A4 portrait
/// with a 10mm margin, medium quality, no whitespace trimming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// How images are mapped onto pages.
    pub layout: LayoutMode,
    /// Quality tier for embedded images.
    pub quality: QualityTier,
    /// Trim uniform near-white borders from each image before layout.
    /// Ignored for images that carry an explicit crop region.
    pub trim_whitespace: bool,
    /// Channel threshold above which a pixel counts as background during
    /// trimming. Defaults to 240 of 255.
    pub white_threshold: u8,
    /// Title embedded in the PDF /Info dictionary.
    pub title: Option<String>,
}

impl ExportConfig {
    /// Default channel threshold for the whitespace trim.
    pub const DEFAULT_WHITE_THRESHOLD: u8 = 240;

    /// Check the whole configuration surface before any work starts.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.quality.validate()?;
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            layout: LayoutMode::FitToFixedPage {
                page_size: PageSize::A4,
                orientation: Orientation::Portrait,
                margin_mm: 10.0,
            },
            quality: QualityTier::Medium,
            trim_whitespace: false,
            white_threshold: Self::DEFAULT_WHITE_THRESHOLD,
            title: None,
        }
    }
}
