// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the X-Ray preprocessor.

use thiserror::Error;

/// Top-level error type for all preprocessor operations.
///
/// Every variant is recoverable: the session is left exactly as it was before
/// the failing call, and the shell reports the error to the operator.
#[derive(Debug, Error)]
pub enum XrayPrepError {
    // -- Session errors --
    #[error("failed to load image: {0}")]
    Load(String),

    #[error("no image loaded")]
    NoImageLoaded,

    #[error("no processed image to save")]
    NoProcessedImage,

    #[error("failed to write image: {0}")]
    Write(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    // -- Settings --
    #[error("invalid filter settings: {0}")]
    InvalidSettings(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, XrayPrepError>;
