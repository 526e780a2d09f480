// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the operator.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity drives how the shell presents the notice.

use crate::error::XrayPrepError;

/// Severity of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk hiccup or similar — trying again may work.
    Transient,
    /// The operator must do something first (load an image, pick another path).
    ActionRequired,
    /// Retrying the same input will not help.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary (shown as a heading).
    pub message: String,
    /// What the operator should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert an `XrayPrepError` into a `HumanError` for display.
pub fn humanize_error(err: &XrayPrepError) -> HumanError {
    match err {
        XrayPrepError::Load(_) => HumanError {
            message: "Failed to load image.".into(),
            suggestion: "Please select a valid PNG or JPEG image file.".into(),
            severity: Severity::ActionRequired,
        },

        XrayPrepError::NoImageLoaded => HumanError {
            message: "No X-ray image loaded.".into(),
            suggestion: "Please load an X-ray image first!".into(),
            severity: Severity::ActionRequired,
        },

        XrayPrepError::NoProcessedImage => HumanError {
            message: "No processed image to save!".into(),
            suggestion: "Load an X-ray image and apply a filter before saving.".into(),
            severity: Severity::ActionRequired,
        },

        XrayPrepError::Write(detail) => {
            let lower = detail.to_ascii_lowercase();
            if lower.contains("permission denied") {
                HumanError {
                    message: "The app doesn't have permission to write there.".into(),
                    suggestion: "Choose a folder you can write to, such as your Documents folder."
                        .into(),
                    severity: Severity::ActionRequired,
                }
            } else if lower.contains("no such file") || lower.contains("not found") {
                HumanError {
                    message: "The destination folder doesn't exist.".into(),
                    suggestion: "Pick an existing folder and try saving again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "The image couldn't be saved.".into(),
                    suggestion: format!(
                        "Try again or choose a different location. (Detail: {detail})"
                    ),
                    severity: Severity::Transient,
                }
            }
        }

        XrayPrepError::Encode(_) => HumanError {
            message: "The processed image couldn't be encoded as PNG.".into(),
            suggestion: "Try reloading the original image and applying the filter again.".into(),
            severity: Severity::Permanent,
        },

        XrayPrepError::InvalidSettings(detail) => HumanError {
            message: "The filter settings are invalid.".into(),
            suggestion: format!("Fix or delete the settings file to restore defaults. ({detail})"),
            severity: Severity::Permanent,
        },

        XrayPrepError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again."
                        .into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to access that file.".into(),
                    suggestion: "Check the file permissions, or copy the file somewhere else first."
                        .into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                    severity: Severity::Transient,
                }
            }
        }

        XrayPrepError::Serialization(_) => HumanError {
            message: "The settings file is damaged.".into(),
            suggestion: "Default settings are being used. Delete the settings file to silence this."
                .into(),
            severity: Severity::Permanent,
        },
    }
}
