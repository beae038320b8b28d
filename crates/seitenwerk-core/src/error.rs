// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Seitenwerk.

use thiserror::Error;

/// Top-level error type for all Seitenwerk operations.
///
/// The boundary variants (`InvalidImage`, `InvalidConfiguration`,
/// `EmptyInput`) indicate precondition violations caught before any page is
/// produced. They are non-retryable: the caller must fix the input or the
/// settings. A failure on any single image aborts the whole document build;
/// no partially assembled document is ever returned.
#[derive(Debug, Error)]
pub enum SeitenwerkError {
    // -- Boundary violations --
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no images to export")]
    EmptyInput,

    // -- Document errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage / I/O --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SeitenwerkError>;
