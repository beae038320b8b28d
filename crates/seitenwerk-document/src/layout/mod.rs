// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module: maps raster dimensions to per-page geometry.

pub mod engine;

pub use engine::{PageLayoutEngine, PageSpec, PlacementRect};
