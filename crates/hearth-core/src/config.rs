// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Platform-service configuration, loaded from TOML.

use crate::error::{Result, SystemError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of frames captured in a crash backtrace.
pub const DEFAULT_BACKTRACE_FRAMES: usize = 15;

/// Identity and behavior settings for the platform services.
///
/// Every field has a default, so a configuration file only needs to name the
/// settings it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Product name printed in crash reports and used for the home directory.
    pub product: String,
    /// Version string printed in crash reports.
    pub version: String,
    /// Crash-log file. When unset, crash reports go to the console.
    pub crash_log: Option<PathBuf>,
    /// Maximum number of backtrace frames written to a crash report.
    pub backtrace_frames: usize,
    /// Overrides the per-user home directory.
    pub home_dir: Option<PathBuf>,
    /// Dedicated (headless) mode: enables line input from stdin.
    pub dedicated: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            product: "Hearth".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            crash_log: None,
            backtrace_frames: DEFAULT_BACKTRACE_FRAMES,
            home_dir: None,
            dedicated: false,
        }
    }
}

impl SystemConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SystemError::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded system configuration from '{}'", path.display());
        Ok(config)
    }

    /// Saves the configuration to a TOML file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|e| SystemError::io(path, e))
    }
}
