// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Codec glue — decode radiographs as 8-bit grayscale, encode the processed
// buffer as PNG, and write it to disk without leaving partial files behind.

use std::fs::Permissions;
use std::io::{Cursor, Write};
use std::path::Path;

use image::{GrayImage, ImageFormat, ImageReader};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};
use xrayprep_core::error::{Result, XrayPrepError};

/// Decode an image file as single-channel grayscale.
///
/// The format is sniffed from the file contents, falling back to the
/// extension. Colour is reduced to luma and alpha is dropped.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open_gray(path: impl AsRef<Path>) -> Result<GrayImage> {
    let path = path.as_ref();
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| XrayPrepError::Load(format!("{}: {}", path.display(), err)))?;
    let decoded = reader
        .decode()
        .map_err(|err| XrayPrepError::Load(format!("{}: {}", path.display(), err)))?;
    let gray = decoded.into_luma8();
    info!(
        width = gray.width(),
        height = gray.height(),
        "Image loaded"
    );
    Ok(gray)
}

/// Decode raw encoded bytes (PNG, JPEG, ...) as single-channel grayscale.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_gray(data: &[u8]) -> Result<GrayImage> {
    let decoded = image::load_from_memory(data)
        .map_err(|err| XrayPrepError::Load(format!("failed to decode image: {}", err)))?;
    let gray = decoded.into_luma8();
    debug!(
        width = gray.width(),
        height = gray.height(),
        "Image decoded from bytes"
    );
    Ok(gray)
}

/// Encode a grayscale buffer as PNG bytes.
pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|err| XrayPrepError::Encode(err.to_string()))?;
    Ok(buffer)
}

/// Write `image` to `path` as PNG, replacing any existing file.
///
/// The PNG is written to a temporary file next to the destination and renamed
/// into place, so on failure `path` is either untouched or absent. An existing
/// destination keeps its permissions; a new one gets the usual `0644`.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_png_atomic(image: &GrayImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_png(image)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |err: std::io::Error| XrayPrepError::Write(format!("{}: {}", path.display(), err));

    let mut staging = NamedTempFile::new_in(dir).map_err(write_err)?;
    staging.write_all(&bytes).map_err(write_err)?;
    staging.as_file().sync_all().map_err(write_err)?;
    if let Some(permissions) = destination_permissions(path) {
        staging
            .as_file()
            .set_permissions(permissions)
            .map_err(write_err)?;
    }
    staging.persist(path).map_err(|err| write_err(err.error))?;

    info!(bytes = bytes.len(), "PNG written");
    Ok(())
}

/// Permissions the written file should end up with.
///
/// Staging files are created owner-only, so the mode has to be set before the
/// rename or the saved PNG would inherit it.
fn destination_permissions(path: &Path) -> Option<Permissions> {
    match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}
