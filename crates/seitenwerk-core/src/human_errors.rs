// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for end users of export front-ends.
//
// Every technical error is mapped to plain English with a clear suggestion,
// so UIs can surface a message and a next step without inspecting variants.

use crate::error::SeitenwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk hiccup or similar; trying again may succeed.
    Transient,
    /// User must change something (add images, fix settings, redo a crop).
    ActionRequired,
    /// Cannot be fixed by retrying or user action on this input.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether simply retrying the export might succeed.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `SeitenwerkError` into a `HumanError` suitable for a dialog.
pub fn humanize_error(err: &SeitenwerkError) -> HumanError {
    match err {
        SeitenwerkError::InvalidImage(detail) => HumanError {
            message: "One of the images can't be used.".into(),
            suggestion: format!(
                "The image may be empty, or its crop area falls outside the picture. \
                 Try the original image or redo the crop. ({detail})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SeitenwerkError::InvalidConfiguration(detail) => HumanError {
            message: "These export settings don't work.".into(),
            suggestion: format!(
                "Check the page size, margins and quality settings, then try again. ({detail})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SeitenwerkError::EmptyInput => HumanError {
            message: "Please add images first.".into(),
            suggestion: "Select at least one image, then start the export again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SeitenwerkError::ImageError(detail) => HumanError {
            message: "We couldn't read one of the images.".into(),
            suggestion: format!(
                "The file may be damaged or in an unusual format. \
                 Try re-saving it as JPEG or PNG. ({detail})"
            ),
            retriable: false,
            severity: Severity::Permanent,
        },

        SeitenwerkError::PdfError(detail) => HumanError {
            message: "Error creating PDF. Please try again.".into(),
            suggestion: format!("If this keeps happening, try fewer or smaller images. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        SeitenwerkError::Io(detail) => HumanError {
            message: "We couldn't save the file.".into(),
            suggestion: format!(
                "Check that there is enough disk space and that the folder is writable. ({detail})"
            ),
            retriable: true,
            severity: Severity::Transient,
        },

        SeitenwerkError::Serialization(detail) => HumanError {
            message: "The export settings couldn't be read.".into(),
            suggestion: format!("Reset the settings to their defaults and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}
