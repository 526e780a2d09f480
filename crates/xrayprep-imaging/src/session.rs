// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image session — the loaded radiograph, its processed counterpart, and the
// filter operations that replace the processed image in place.

use std::path::Path;

use image::GrayImage;
use tracing::{debug, info, instrument, warn};
use xrayprep_core::error::{Result, XrayPrepError};
use xrayprep_core::{FilterKind, FilterSettings, ImageInfo, SessionStatus};

use crate::codec;
use crate::filters;

/// The two buffers held once a load has succeeded.
#[derive(Debug, Clone)]
struct LoadedImages {
    /// The image as decoded; never modified after load.
    original: GrayImage,
    /// The image every filter reads from and replaces.
    current: GrayImage,
}

/// A single-owner working session over one radiograph.
///
/// The session starts unloaded. A successful [`load`](Self::load) stores the
/// decoded image twice: an untouched original and a working copy. Each filter
/// replaces the working copy with its output and returns it for display.
/// Loading again discards both buffers, including any unsaved result.
///
/// ```ignore
/// let mut session = Session::new();
/// session.load("chest.png")?;
/// session.apply_adaptive_contrast()?;
/// session.save("chest-clahe.png")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// `None` until the first successful load.
    images: Option<LoadedImages>,
    settings: FilterSettings,
}

impl Session {
    // -- Construction ---------------------------------------------------------

    /// Create an empty session with the default filter parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the given filter parameters.
    pub fn with_settings(settings: FilterSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            images: None,
            settings,
        })
    }

    // -- Accessors ------------------------------------------------------------

    /// Whether an image has been loaded.
    pub fn status(&self) -> SessionStatus {
        match self.images {
            None => SessionStatus::Unloaded,
            Some(_) => SessionStatus::Loaded,
        }
    }

    /// The image as it was loaded.
    pub fn original(&self) -> Option<&GrayImage> {
        self.images.as_ref().map(|images| &images.original)
    }

    /// The processed image, if any.
    pub fn current(&self) -> Option<&GrayImage> {
        self.images.as_ref().map(|images| &images.current)
    }

    /// Dimensions of the processed image.
    pub fn info(&self) -> Option<ImageInfo> {
        self.current().map(|image| ImageInfo {
            width: image.width(),
            height: image.height(),
        })
    }

    /// The filter parameters this session applies.
    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    // -- Loading --------------------------------------------------------------

    /// Decode `path` as grayscale and make it both the original and the
    /// processed image.
    ///
    /// On failure the session keeps whatever it held before.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&GrayImage> {
        let image = codec::open_gray(path)?;
        Ok(self.replace(image))
    }

    /// Like [`load`](Self::load), for an encoded in-memory buffer.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn load_from_bytes(&mut self, data: &[u8]) -> Result<&GrayImage> {
        let image = codec::decode_gray(data)?;
        Ok(self.replace(image))
    }

    fn replace(&mut self, image: GrayImage) -> &GrayImage {
        if self.images.is_some() {
            debug!("Discarding previous session images");
        }
        let images = self.images.insert(LoadedImages {
            current: image.clone(),
            original: image,
        });
        &images.current
    }

    // -- Filters --------------------------------------------------------------

    /// Replace the processed image with its global histogram equalization.
    pub fn equalize_histogram(&mut self) -> Result<&GrayImage> {
        self.apply(FilterKind::EqualizeHistogram)
    }

    /// Replace the processed image with its CLAHE-enhanced version.
    pub fn apply_adaptive_contrast(&mut self) -> Result<&GrayImage> {
        self.apply(FilterKind::AdaptiveContrast)
    }

    /// Replace the processed image with its Canny edge map.
    pub fn detect_edges(&mut self) -> Result<&GrayImage> {
        self.apply(FilterKind::DetectEdges)
    }

    /// Replace the processed image with a Gaussian-smoothed copy.
    pub fn denoise(&mut self) -> Result<&GrayImage> {
        self.apply(FilterKind::Denoise)
    }

    /// Run the filter named by `kind` on the processed image.
    ///
    /// Fails with [`XrayPrepError::NoImageLoaded`] before the first load.
    #[instrument(skip(self), fields(filter = %kind))]
    pub fn apply(&mut self, kind: FilterKind) -> Result<&GrayImage> {
        let settings = self.settings;
        let Some(images) = self.images.as_mut() else {
            warn!("Filter requested with no image loaded");
            return Err(XrayPrepError::NoImageLoaded);
        };
        images.current = filters::apply(kind, &images.current, &settings);
        info!(
            width = images.current.width(),
            height = images.current.height(),
            "Filter applied"
        );
        Ok(&images.current)
    }

    /// Discard all processing and start again from the original image.
    #[instrument(skip(self))]
    pub fn revert(&mut self) -> Result<&GrayImage> {
        let Some(images) = self.images.as_mut() else {
            return Err(XrayPrepError::NoImageLoaded);
        };
        images.current.clone_from(&images.original);
        info!("Reverted to original image");
        Ok(&images.current)
    }

    // -- Output ---------------------------------------------------------------

    /// Write the processed image to `path` as PNG, replacing any existing file.
    ///
    /// Fails with [`XrayPrepError::NoProcessedImage`] before the first load and
    /// with [`XrayPrepError::Write`] when the destination cannot be written.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let Some(current) = self.current() else {
            warn!("Save requested with no processed image");
            return Err(XrayPrepError::NoProcessedImage);
        };
        codec::write_png_atomic(current, path)
    }

    /// Encode the processed image as PNG bytes (used for previews).
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let current = self.current().ok_or(XrayPrepError::NoProcessedImage)?;
        codec::encode_png(current)
    }
}

// -- Tests --------------------------------------------------------------------
