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

//! Defines the error type shared by every platform service.
//!
//! Only conditions the caller can act on are errors. Metadata lookups and
//! directory scans that simply find nothing report `false` / `None` instead.

use std::path::PathBuf;
use thiserror::Error;

/// A convenient result alias for platform-service operations.
pub type Result<T> = std::result::Result<T, SystemError>;

/// An error raised by one of the platform services.
#[derive(Debug, Error)]
pub enum SystemError {
    /// `find_first` was called while a directory cursor was still open.
    ///
    /// This is a caller bug, not an environmental condition; the process-level
    /// facade escalates it to the fatal-error path.
    #[error("find_first called without closing the previous search")]
    CursorAlreadyOpen,

    /// The operating system refused to install a signal disposition.
    #[error("failed to install handler for {signal}: {reason}")]
    SignalRegistration {
        /// The name of the signal (e.g. `SIGSEGV`).
        signal: &'static str,
        /// The error reported by the operating system.
        reason: String,
    },

    /// An I/O operation on a specific path failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The path the operation was applied to.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

impl SystemError {
    /// Wraps an I/O error together with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SystemError::Io {
            path: path.into(),
            source,
        }
    }
}
