// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview rendering — the webview shows the processed image as an inline PNG.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use xrayprep_core::error::Result;
use xrayprep_imaging::{GrayImage, Session};
use xrayprep_imaging::codec::encode_png;

/// Encode `image` as a `data:image/png;base64,...` URI for an `img` element.
pub fn data_uri(image: &GrayImage) -> Result<String> {
    let png = encode_png(image)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

/// Preview URI for the session's processed image, `None` before a load.
pub fn render(session: &Session) -> Result<Option<String>> {
    session.current().map(data_uri).transpose()
}
