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

use hearth_platform::fs;

// The working directory is process-wide; this binary holds a single test.
#[test]
fn test_set_and_restore_work_dir() {
    let original = fs::work_dir().expect("cwd should be readable");
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().canonicalize().unwrap();

    assert!(fs::set_work_dir(&target));
    assert_eq!(fs::work_dir().unwrap().canonicalize().unwrap(), target);

    assert!(!fs::set_work_dir(target.join("missing")));
    assert_eq!(fs::work_dir().unwrap().canonicalize().unwrap(), target);

    assert!(fs::set_work_dir(&original));
}
