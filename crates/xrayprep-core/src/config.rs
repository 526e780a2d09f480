// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XrayPrepError};

/// Largest CLAHE tile count along either axis.
pub const MAX_CLAHE_TILES: u32 = 64;
/// Largest Gaussian kernel side accepted for denoising.
pub const MAX_DENOISE_KERNEL_SIZE: u32 = 31;

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed parameters for the enhancement filters.
    pub filters: FilterSettings,
    /// Directory the last open/save dialog was pointed at.
    pub last_directory: Option<PathBuf>,
}

/// Parameters of the four enhancement filters.
///
/// These are not exposed for tuning in the UI; they exist so the values live
/// in one place and can be overridden from the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// CLAHE contrast-limit factor, relative to a flat tile histogram.
    pub clahe_clip_limit: f32,
    /// CLAHE tile grid as (columns, rows).
    pub clahe_tile_grid: (u32, u32),
    /// Canny hysteresis low threshold.
    pub canny_low: f32,
    /// Canny hysteresis high threshold.
    pub canny_high: f32,
    /// Side length of the square Gaussian kernel used for denoising (odd).
    pub denoise_kernel_size: u32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            clahe_clip_limit: 2.0,
            clahe_tile_grid: (8, 8),
            canny_low: 100.0,
            canny_high: 200.0,
            denoise_kernel_size: 5,
        }
    }
}

impl FilterSettings {
    /// Reject settings the filters cannot honour.
    pub fn validate(&self) -> Result<()> {
        if !(self.clahe_clip_limit.is_finite() && self.clahe_clip_limit > 0.0) {
            return Err(XrayPrepError::InvalidSettings(format!(
                "CLAHE clip limit must be positive, got {}",
                self.clahe_clip_limit
            )));
        }
        let (cols, rows) = self.clahe_tile_grid;
        if cols == 0 || rows == 0 || cols > MAX_CLAHE_TILES || rows > MAX_CLAHE_TILES {
            return Err(XrayPrepError::InvalidSettings(format!(
                "CLAHE tile grid must be 1..={MAX_CLAHE_TILES} per axis, got {cols}x{rows}"
            )));
        }
        if !(self.canny_low.is_finite() && self.canny_high.is_finite())
            || self.canny_low < 0.0
            || self.canny_low > self.canny_high
        {
            return Err(XrayPrepError::InvalidSettings(format!(
                "Canny thresholds must satisfy 0 <= low <= high, got {} / {}",
                self.canny_low, self.canny_high
            )));
        }
        if self.denoise_kernel_size == 0
            || self.denoise_kernel_size % 2 == 0
            || self.denoise_kernel_size > MAX_DENOISE_KERNEL_SIZE
        {
            return Err(XrayPrepError::InvalidSettings(format!(
                "denoise kernel size must be odd and at most {MAX_DENOISE_KERNEL_SIZE}, got {}",
                self.denoise_kernel_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = FilterSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.clahe_tile_grid, (8, 8));
        assert_eq!(settings.denoise_kernel_size, 5);
    }

    #[test]
    fn even_kernel_is_rejected() {
        let settings = FilterSettings {
            denoise_kernel_size: 4,
            ..FilterSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(XrayPrepError::InvalidSettings(_))
        ));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let settings = FilterSettings {
            canny_low: 250.0,
            canny_high: 200.0,
            ..FilterSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn oversized_tile_grid_is_rejected() {
        for grid in [(70_000, 70_000), (65, 8), (8, 65), (0, 8)] {
            let settings = FilterSettings {
                clahe_tile_grid: grid,
                ..FilterSettings::default()
            };
            assert!(
                matches!(settings.validate(), Err(XrayPrepError::InvalidSettings(_))),
                "grid {grid:?} accepted"
            );
        }
        let widest = FilterSettings {
            clahe_tile_grid: (MAX_CLAHE_TILES, MAX_CLAHE_TILES),
            ..FilterSettings::default()
        };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn oversized_kernel_is_rejected() {
        for size in [33, u32::MAX] {
            let settings = FilterSettings {
                denoise_kernel_size: size,
                ..FilterSettings::default()
            };
            assert!(settings.validate().is_err(), "kernel {size} accepted");
        }
        let largest = FilterSettings {
            denoise_kernel_size: MAX_DENOISE_KERNEL_SIZE,
            ..FilterSettings::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn non_positive_clip_limit_is_rejected() {
        let settings = FilterSettings {
            clahe_clip_limit: 0.0,
            ..FilterSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn partial_settings_file_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "filters": { "canny_low": 50.0 } }"#).unwrap();
        assert_eq!(config.filters.canny_low, 50.0);
        assert_eq!(config.filters.canny_high, 200.0);
        assert_eq!(config.last_directory, None);
    }
}
