// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// UI-side state — notices shown to the operator after each action.

use xrayprep_core::error::XrayPrepError;
use xrayprep_core::human_errors::{Severity, humanize_error};

/// How a notice is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A message shown below the toolbar until the next action.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub heading: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn info(heading: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            heading: heading.into(),
            detail,
        }
    }

    /// Build a notice from a session error and log it.
    pub fn from_error(err: &XrayPrepError) -> Self {
        tracing::warn!(error = %err, "operation failed");
        let human = humanize_error(err);
        let kind = match human.severity {
            Severity::ActionRequired => NoticeKind::Warning,
            Severity::Transient | Severity::Permanent => NoticeKind::Error,
        };
        Self {
            kind,
            heading: human.message,
            detail: Some(human.suggestion),
        }
    }

    /// Inline CSS colour for the notice text.
    pub fn colour(&self) -> &'static str {
        match self.kind {
            NoticeKind::Info => "#2e7d32",
            NoticeKind::Warning => "#b26a00",
            NoticeKind::Error => "#ff3b30",
        }
    }
}
