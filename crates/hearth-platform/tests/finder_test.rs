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

use hearth_core::SystemError;
use hearth_platform::fs::{self, FileFinder};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::PathBuf;

fn file_names(paths: &[PathBuf]) -> BTreeSet<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_search_walks_a_game_directory() {
    // --- 1. ARRANGE ---
    let dir = tempfile::tempdir().unwrap();
    let game = dir.path().join("baseq2");
    fs::mkdir(&game);
    for name in ["pak0.pak", "pak1.pak", "config.cfg", "autoexec.cfg"] {
        File::create(game.join(name)).unwrap();
    }
    fs::mkdir(game.join("maps"));
    let base = game.to_str().unwrap();
    let mut finder = FileFinder::new();

    // --- 2. ACT ---
    let mut paks = Vec::new();
    let mut next = finder.find_first(&format!("{base}/pak?.pak")).unwrap();
    while let Some(path) = next {
        paks.push(path);
        next = finder.find_next();
    }
    finder.find_close();

    let mut everything = Vec::new();
    let mut next = finder.find_first(&format!("{base}/*.*")).unwrap();
    while let Some(path) = next {
        everything.push(path);
        next = finder.find_next();
    }
    finder.find_close();

    // --- 3. ASSERT ---
    assert_eq!(
        file_names(&paks),
        BTreeSet::from(["pak0.pak".to_string(), "pak1.pak".to_string()])
    );
    assert!(paks.iter().all(|p| p.starts_with(&game)));
    assert_eq!(everything.len(), 5, "subdirectories are returned too");
    assert!(everything.iter().any(|p| fs::is_dir(p)));
}

#[test]
fn test_reopening_without_close_is_rejected_until_closed() {
    let dir = tempfile::tempdir().unwrap();
    File::create(dir.path().join("a")).unwrap();
    let base = dir.path().to_str().unwrap();
    let mut finder = FileFinder::new();

    assert!(finder.find_first(base).unwrap().is_some());
    let err = finder.find_first(base).unwrap_err();
    assert!(matches!(err, SystemError::CursorAlreadyOpen));

    // The first search is still usable after the rejected call.
    assert_eq!(finder.find_next(), None);
    finder.find_close();
    assert!(finder.find_first(base).unwrap().is_some());
    finder.find_close();
}

#[test]
fn test_remove_dir_then_search_finds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path().join("tree");
    fs::mkdir(&tree);
    fs::mkdir(tree.join("sub"));
    File::create(tree.join("sub/leaf")).unwrap();

    fs::remove_dir(&tree);

    let mut finder = FileFinder::new();
    assert_eq!(finder.find_first(tree.to_str().unwrap()).unwrap(), None);
    assert!(!finder.is_open());
}
