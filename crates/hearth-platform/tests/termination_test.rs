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

#![cfg(unix)]

use hearth_core::command::QUIT_COMMAND;
use hearth_core::CommandQueue;
use hearth_platform::signals::TerminationRouter;
use nix::sys::signal::{self, Signal};
use std::sync::Arc;

// The handler is process-wide, so every check lives in one test.
#[test]
fn test_interrupts_enqueue_quit_and_process_keeps_running() {
    // --- 1. ARRANGE ---
    let queue = Arc::new(CommandQueue::new());
    TerminationRouter::register_handler(Arc::clone(&queue)).unwrap();
    assert!(Arc::ptr_eq(TerminationRouter::queue().unwrap(), &queue));

    // Registering again is harmless and keeps the first queue.
    TerminationRouter::register_handler(Arc::clone(&queue)).unwrap();
    let other = Arc::new(CommandQueue::new());
    TerminationRouter::register_handler(Arc::clone(&other)).unwrap();
    assert!(Arc::ptr_eq(TerminationRouter::queue().unwrap(), &queue));

    queue.add_text("map base1");

    // --- 2. ACT ---
    // raise(3) runs the handler on this thread before returning.
    signal::raise(Signal::SIGINT).unwrap();
    signal::raise(Signal::SIGTERM).unwrap();

    // --- 3. ASSERT ---
    assert_eq!(queue.pending_quits(), 2);
    assert!(other.is_empty(), "later queues must not receive requests");
    assert_eq!(
        queue.drain(),
        vec![
            QUIT_COMMAND.to_string(),
            QUIT_COMMAND.to_string(),
            "map base1".to_string(),
        ]
    );
    assert!(queue.is_empty());
}
