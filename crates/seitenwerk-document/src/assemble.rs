// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembly: the sequential preprocess, layout, draw pipeline that
// turns an ordered image list into one PDF.

use std::path::Path;

use chrono::Utc;
use image::DynamicImage;
use seitenwerk_core::config::ExportConfig;
use seitenwerk_core::error::{Result, SeitenwerkError};
use seitenwerk_core::types::CropRegion;
use tracing::{debug, info, instrument};

use crate::image::preprocessor::ImagePreprocessor;
use crate::layout::engine::PageLayoutEngine;
use crate::pdf::writer::PdfWriter;

/// One entry in the document: a decoded raster and, optionally, the crop
/// rectangle a user chose for it.
#[derive(Debug)]
pub struct PageInput {
    pub image: DynamicImage,
    pub crop: Option<CropRegion>,
}

impl PageInput {
    pub fn new(image: DynamicImage) -> Self {
        Self { image, crop: None }
    }

    pub fn with_crop(image: DynamicImage, crop: CropRegion) -> Self {
        Self {
            image,
            crop: Some(crop),
        }
    }
}

impl From<DynamicImage> for PageInput {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}

/// Assembles an ordered sequence of images into a single paginated PDF.
///
/// Images are processed strictly in input order, one at a time: preprocess,
/// lay out, draw, next. Any failure aborts the whole build and nothing is
/// returned; the unit of success is the complete document, never a document
/// with pages skipped.
///
/// The assembler places no bound on the number of inputs. A front-end that
/// wants a ceiling (30 is a common choice) enforces it before calling.
#[derive(Debug)]
pub struct DocumentAssembler {
    config: ExportConfig,
}

impl DocumentAssembler {
    /// Create an assembler, validating the configuration up front.
    pub fn new(config: ExportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Assembler with the default export settings.
    pub fn with_defaults() -> Self {
        // The default configuration is valid by construction.
        Self {
            config: ExportConfig::default(),
        }
    }

    /// The configuration this assembler exports with.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Build the document and return its bytes.
    ///
    /// Fails with `EmptyInput` when there is nothing to export.
    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub fn assemble(&self, inputs: Vec<PageInput>) -> Result<Vec<u8>> {
        if inputs.is_empty() {
            return Err(SeitenwerkError::EmptyInput);
        }

        let engine = PageLayoutEngine::new(self.config.layout.clone())?;
        let preprocessor = ImagePreprocessor::with_threshold(self.config.white_threshold);
        let title = self.config.title.as_deref().unwrap_or("Seitenwerk Document");
        let mut writer = PdfWriter::new(title, self.config.quality);

        info!(count = inputs.len(), "Assembling document");

        for (index, input) in inputs.into_iter().enumerate() {
            let prepared = preprocessor.prepare(
                input.image,
                input.crop.as_ref(),
                self.config.trim_whitespace,
            )?;
            let spec = engine.layout_one(index, prepared.width(), prepared.height())?;
            writer.add_page(&spec, &prepared)?;
            debug!(index, "Page appended");
        }

        writer.finish()
    }

    /// Build the document and write it to a file.
    #[instrument(skip(self, inputs), fields(count = inputs.len(), path = %path.as_ref().display()))]
    pub fn assemble_to_file(&self, inputs: Vec<PageInput>, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.assemble(inputs)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote document to {}", path.as_ref().display());
        Ok(())
    }
}

/// Default output filename, stamped with today's date:
/// `images-to-pdf-YYYY-MM-DD.pdf`.
pub fn default_output_filename() -> String {
    format!("images-to-pdf-{}.pdf", Utc::now().format("%Y-%m-%d"))
}
