// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: whitespace trimming and crop normalisation before layout.

pub mod preprocessor;

pub use preprocessor::ImagePreprocessor;
