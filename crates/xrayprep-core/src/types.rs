// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the X-Ray preprocessor.

use serde::{Deserialize, Serialize};

/// The enhancement filters an operator can apply to the loaded radiograph.
///
/// This is the action identifier the shell dispatches on; each variant maps to
/// exactly one session method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// Global histogram equalization.
    EqualizeHistogram,
    /// Contrast-limited adaptive histogram equalization (CLAHE).
    AdaptiveContrast,
    /// Canny edge detection.
    DetectEdges,
    /// Gaussian smoothing.
    Denoise,
}

impl FilterKind {
    /// Every filter, in toolbar order.
    pub const ALL: [FilterKind; 4] = [
        FilterKind::EqualizeHistogram,
        FilterKind::AdaptiveContrast,
        FilterKind::DetectEdges,
        FilterKind::Denoise,
    ];

    /// Button label shown in the shell.
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::EqualizeHistogram => "Histogram Equalization",
            FilterKind::AdaptiveContrast => "Apply CLAHE",
            FilterKind::DetectEdges => "Edge Detection",
            FilterKind::Denoise => "Noise Reduction",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FilterKind::EqualizeHistogram => "equalize_histogram",
            FilterKind::AdaptiveContrast => "adaptive_contrast",
            FilterKind::DetectEdges => "detect_edges",
            FilterKind::Denoise => "denoise",
        };
        f.write_str(name)
    }
}

/// Pixel dimensions of an image buffer. Images carry no other metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Lifecycle state of an image session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Nothing has been loaded yet.
    Unloaded,
    /// An original and a processed image are held.
    Loaded,
}
