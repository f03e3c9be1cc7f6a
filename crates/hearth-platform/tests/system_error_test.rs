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

use hearth_core::lifecycle::NoHooks;
use hearth_core::SystemConfig;
use hearth_platform::System;
use std::fs::File;
use std::process::Command;

/// Set in the child process to the directory it should search twice.
const CHILD_DIR_ENV: &str = "HEARTH_DOUBLE_FIND_DIR";

/// Runs only inside the child spawned below. In a normal test run the
/// variable is absent and this is a no-op.
#[test]
fn double_find_child_entrypoint() {
    let Ok(dir) = std::env::var(CHILD_DIR_ENV) else {
        return;
    };

    let mut system = System::new(SystemConfig::default(), NoHooks);
    assert!(system.find_first(&dir).is_some());
    system.find_first(&dir);
    unreachable!("a second open search must take the fatal-error path");
}

#[test]
fn test_second_find_first_without_close_exits_with_error() {
    // --- 1. ARRANGE ---
    let dir = tempfile::tempdir().unwrap();
    File::create(dir.path().join("pak0.pak")).unwrap();
    let exe = std::env::current_exe().unwrap();

    // --- 2. ACT ---
    let output = Command::new(exe)
        .args(["--exact", "double_find_child_entrypoint", "--nocapture", "--test-threads=1"])
        .env(CHILD_DIR_ENV, dir.path())
        .output()
        .expect("child test process should spawn");

    // --- 3. ASSERT ---
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        output.status.code(),
        Some(1),
        "child should exit through the error path, stderr:\n{stderr}"
    );
    assert!(
        stderr.contains("Error: find_first called without closing the previous search"),
        "error line missing, stderr:\n{stderr}"
    );
}
