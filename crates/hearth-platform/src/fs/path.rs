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

//! Path and metadata helpers.
//!
//! Lookups report failure as `false` / `None` rather than as errors: a missing
//! file is an ordinary outcome for the callers of these functions.

use hearth_core::{Result, SystemConfig, SystemError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Returns `true` if `path` exists and is a directory (symlinks are followed).
pub fn is_dir(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Returns `true` if `path` exists and is a regular file (symlinks are followed).
pub fn is_file(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Creates a directory with mode `0755`. Failure (including "already
/// exists") is ignored.
pub fn mkdir(path: impl AsRef<Path>) {
    let path = path.as_ref();
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    if let Err(e) = builder.create(path) {
        log::debug!("mkdir '{}' failed: {e}", path.display());
    }
}

/// Returns the current working directory, or `None` if it cannot be read.
pub fn work_dir() -> Option<PathBuf> {
    env::current_dir().ok()
}

/// Changes the current working directory.
///
/// ## Returns
/// `true` on success.
pub fn set_work_dir(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match env::set_current_dir(path) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("chdir '{}' failed: {e}", path.display());
            false
        }
    }
}

/// Removes a single file, symlink or empty directory.
///
/// ## Returns
/// `true` if the path was removed.
pub fn remove(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let result = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir(path),
        Ok(_) => fs::remove_file(path),
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => true,
        Err(e) => {
            log::debug!("remove '{}' failed: {e}", path.display());
            false
        }
    }
}

/// Renames `from` to `to`.
pub fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let from = from.as_ref();
    fs::rename(from, to.as_ref()).map_err(|e| SystemError::io(from, e))
}

/// Removes a directory and everything below it.
///
/// Entries are removed children-first through [`remove`]. Symbolic links are
/// removed as links, never followed: if `path` is itself a link to a
/// directory, only the link is removed. Does nothing if `path` is not a
/// directory.
pub fn remove_dir(path: impl AsRef<Path>) {
    let path = path.as_ref();
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            if is_dir(path) {
                remove(path);
            }
            return;
        }
        Ok(meta) if meta.is_dir() => {}
        _ => return,
    }

    let entries = WalkDir::new(path)
        .min_depth(1)
        .follow_links(false)
        .follow_root_links(false)
        .contents_first(true);
    for entry in entries {
        match entry {
            Ok(entry) => {
                remove(entry.path());
            }
            Err(e) => log::warn!("Skipping entry under '{}': {e}", path.display()),
        }
    }

    remove(path);
}

/// Returns the per-user directory for the product's own data.
///
/// This is the `home_dir` configured in `config` if set. Otherwise it is
/// `<platform data dir>/<product>/`, with the product name lowercased and
/// spaces replaced by dashes.
pub fn home_dir(config: &SystemConfig) -> Option<PathBuf> {
    if let Some(dir) = &config.home_dir {
        return Some(dir.clone());
    }
    let product = config.product.to_lowercase().replace(' ', "-");
    dirs::data_dir().map(|dir| dir.join(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn metadata_queries() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("pak0.pak");
        File::create(&file).unwrap();

        assert!(is_dir(dir.path()));
        assert!(!is_file(dir.path()));
        assert!(is_file(&file));
        assert!(!is_dir(&file));
        assert!(!is_dir(dir.path().join("missing")));
        assert!(!is_file(dir.path().join("missing")));
    }

    #[test]
    fn mkdir_creates_and_tolerates_existing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("saves");

        mkdir(&target);
        assert!(is_dir(&target));
        mkdir(&target);
        assert!(is_dir(&target));
    }

    #[cfg(unix)]
    #[test]
    fn mkdir_uses_mode_0755() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("screenshots");
        mkdir(&target);

        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        // The process umask can only clear bits.
        assert_eq!(mode & !0o755, 0, "mode {mode:o} exceeds 0755");
    }

    #[test]
    fn rename_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("old.cfg");
        let to = dir.path().join("new.cfg");
        File::create(&from).unwrap();

        rename(&from, &to).unwrap();
        assert!(!from.exists());
        assert!(to.exists());
    }

    #[test]
    fn rename_missing_source_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("ghost");
        match rename(&from, dir.path().join("x")) {
            Err(SystemError::Io { path, .. }) => assert_eq!(path, from),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn remove_single_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a");
        let empty = dir.path().join("empty");
        File::create(&file).unwrap();
        fs::create_dir(&empty).unwrap();

        assert!(remove(&file));
        assert!(remove(&empty));
        assert!(!remove(&file));
    }

    #[test]
    fn remove_dir_clears_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("mod");
        fs::create_dir_all(root.join("maps/textures")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        File::create(root.join("pak0.pak")).unwrap();
        File::create(root.join("maps/base1.bsp")).unwrap();
        File::create(root.join("maps/textures/wall.wal")).unwrap();

        remove_dir(&root);

        assert!(!root.exists());
        assert!(dir.path().exists());
    }

    #[test]
    fn remove_dir_on_file_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("keep.txt");
        File::create(&file).unwrap();

        remove_dir(&file);
        assert!(file.exists());

        remove_dir(dir.path().join("missing"));
    }

    #[cfg(unix)]
    #[test]
    fn remove_dir_does_not_follow_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("outside");
        fs::create_dir(&outside).unwrap();
        File::create(outside.join("precious")).unwrap();

        let root = dir.path().join("tree");
        fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        remove_dir(&root);

        assert!(!root.exists());
        assert!(outside.join("precious").exists());
    }

    #[cfg(unix)]
    #[test]
    fn remove_dir_on_symlinked_root_removes_only_the_link() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("outside");
        fs::create_dir(&outside).unwrap();
        File::create(outside.join("precious")).unwrap();

        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&outside, &link).unwrap();

        remove_dir(&link);

        assert!(fs::symlink_metadata(&link).is_err(), "link should be gone");
        assert!(outside.join("precious").exists());

        let file_link = dir.path().join("file-link");
        std::os::unix::fs::symlink(outside.join("precious"), &file_link).unwrap();
        remove_dir(&file_link);
        assert!(fs::symlink_metadata(&file_link).is_ok());
    }

    #[test]
    fn home_dir_prefers_override() {
        let config = SystemConfig {
            home_dir: Some(PathBuf::from("/srv/hearth")),
            ..Default::default()
        };
        assert_eq!(home_dir(&config), Some(PathBuf::from("/srv/hearth")));
    }

    #[test]
    fn home_dir_is_product_subdirectory() {
        let config = SystemConfig {
            product: "Hollow Peak".to_string(),
            ..Default::default()
        };
        if let Some(home) = home_dir(&config) {
            assert!(home.ends_with("hollow-peak"), "got {}", home.display());
        }
    }
}
