// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings persistence — `settings.json` in the data directory.

use std::path::Path;

use tracing::{debug, warn};
use xrayprep_core::AppConfig;
use xrayprep_core::error::Result;

use super::data_dir;

const CONFIG_FILE: &str = "settings.json";

/// Load persisted settings, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_config() -> AppConfig {
    let path = data_dir::data_dir().join(CONFIG_FILE);
    match read_config(&path) {
        Ok(config) => {
            debug!(path = %path.display(), "settings loaded");
            config
        }
        Err(xrayprep_core::XrayPrepError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            AppConfig::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "settings unreadable — using defaults");
            AppConfig::default()
        }
    }
}

/// Write settings back to the data directory.
pub fn persist_config(config: &AppConfig) -> Result<()> {
    let path = data_dir::data_dir().join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
