// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// xrayprep-imaging — Image processing for the X-Ray preprocessor.
//
// Provides the four radiograph enhancement filters (histogram equalization,
// CLAHE, Canny edge detection, Gaussian denoising), grayscale decode and PNG
// encode helpers, and the image session that ties them together.

pub mod codec;
pub mod filters;
pub mod session;

// Re-export the primary types so callers can use `xrayprep_imaging::Session`.
pub use image::GrayImage;
pub use session::Session;
