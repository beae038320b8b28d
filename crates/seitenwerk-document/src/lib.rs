// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// seitenwerk-document: document assembly for Seitenwerk.
//
// Provides image preprocessing (crop normalisation, near-white border
// trimming), the page layout engine (fixed-page letterboxing and exact-fit
// sizing), PDF writing, and the sequential assembly pipeline tying them
// together.

pub mod assemble;
pub mod image;
pub mod layout;
pub mod pdf;

// Re-export the primary types so callers can use `seitenwerk_document::DocumentAssembler` etc.
pub use assemble::{DocumentAssembler, PageInput, default_output_filename};
pub use image::preprocessor::ImagePreprocessor;
pub use layout::engine::{PageLayoutEngine, PageSpec, PlacementRect};
pub use pdf::writer::PdfWriter;
