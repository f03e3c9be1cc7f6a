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

//! Single-slot, pattern-filtered directory search.
//!
//! A search is driven by three calls: [`FileFinder::find_first`] opens the
//! cursor and returns the first match, [`FileFinder::find_next`] continues the
//! scan, and [`FileFinder::find_close`] releases the directory handle. Only one
//! cursor can be open per finder; opening a second one without closing the
//! first is a caller bug and is reported as [`SystemError::CursorAlreadyOpen`].

use hearth_core::{GlobPattern, Result, SystemError};
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

/// Pattern used when the search path has no pattern component.
const MATCH_ALL: &str = "*";

/// The open state of a search.
#[derive(Debug)]
struct DirectoryCursor {
    base: PathBuf,
    pattern: GlobPattern,
    entries: ReadDir,
}

impl DirectoryCursor {
    /// Returns the next entry accepted by the pattern as `base/name`.
    fn advance(&mut self) -> Option<PathBuf> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping unreadable entry in '{}': {e}", self.base.display());
                    continue;
                }
            };

            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name == "." || name == ".." {
                continue;
            }
            if self.pattern.matches(&name) {
                return Some(self.base.join(&file_name));
            }
        }
        None
    }
}

/// The directory search context.
#[derive(Debug, Default)]
pub struct FileFinder {
    cursor: Option<DirectoryCursor>,
}

impl FileFinder {
    /// Creates a finder with no open cursor.
    pub const fn new() -> Self {
        Self { cursor: None }
    }

    /// Returns `true` while a cursor is open.
    pub fn is_open(&self) -> bool {
        self.cursor.is_some()
    }

    /// Starts a search.
    ///
    /// `path` is split at its last `/`: the part before is the directory, the
    /// part after is the glob pattern (`*.*` is treated as `*`). A path without
    /// `/` names a directory and matches every entry in it.
    ///
    /// ## Returns
    /// * `Ok(Some(path))` - the first match, as `directory/name`.
    /// * `Ok(None)` - the directory could not be opened or nothing matched.
    /// * `Err(SystemError::CursorAlreadyOpen)` - the previous search was not closed.
    pub fn find_first(&mut self, path: &str) -> Result<Option<PathBuf>> {
        if self.cursor.is_some() {
            return Err(SystemError::CursorAlreadyOpen);
        }

        let (base, pattern) = split_search_path(path);
        let entries = match fs::read_dir(&base) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("Cannot open '{}' for search: {e}", base.display());
                return Ok(None);
            }
        };

        self.cursor = Some(DirectoryCursor {
            base,
            pattern: GlobPattern::new(pattern),
            entries,
        });
        Ok(self.find_next())
    }

    /// Continues the open search.
    ///
    /// ## Returns
    /// The next match, or `None` at the end of the directory or if no search is open.
    pub fn find_next(&mut self) -> Option<PathBuf> {
        self.cursor.as_mut()?.advance()
    }

    /// Closes the open search, if any. Safe to call repeatedly.
    pub fn find_close(&mut self) {
        self.cursor = None;
    }
}

/// Splits a search path into its directory and pattern parts.
fn split_search_path(path: &str) -> (PathBuf, &str) {
    let (base, pattern) = match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => (path, MATCH_ALL),
    };
    let pattern = if pattern == "*.*" { MATCH_ALL } else { pattern };
    (Path::new(base).to_path_buf(), pattern)
}
