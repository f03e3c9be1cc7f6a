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

//! The application command queue.
//!
//! Commands are plain text lines executed by the main loop. Two producers feed
//! the queue: ordinary code on the main path, which appends text under a lock,
//! and signal handlers, which must never lock or allocate. The latter only bump
//! an atomic counter; the counter is turned into `"quit"` lines the next time
//! the main loop drains the queue.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// The command appended when the operating system asks the process to stop.
pub const QUIT_COMMAND: &str = "quit";

/// A text command queue with a signal-safe quit request path.
#[derive(Debug)]
pub struct CommandQueue {
    pending_quits: AtomicUsize,
    buffer: Mutex<VecDeque<String>>,
}

impl CommandQueue {
    /// Creates an empty queue.
    ///
    /// ## Returns
    /// A new instance of the CommandQueue struct. The constructor is `const`
    /// so a queue can live in a `static`.
    pub const fn new() -> Self {
        Self {
            pending_quits: AtomicUsize::new(0),
            buffer: Mutex::new(VecDeque::new()),
        }
    }

    /// Appends a command line. Main execution path only.
    ///
    /// ## Arguments
    /// * `text` - The command text, e.g. `"map base1"`.
    pub fn add_text(&self, text: impl Into<String>) {
        let text = text.into();
        log::trace!("Queueing command '{text}'.");
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(text);
    }

    /// Requests a quit. Safe to call from a signal handler: it performs a
    /// single atomic increment and nothing else.
    #[inline]
    pub fn request_quit(&self) {
        self.pending_quits.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns the number of quit requests not yet drained.
    pub fn pending_quits(&self) -> usize {
        self.pending_quits.load(Ordering::SeqCst)
    }

    /// Returns `true` if there is nothing to drain.
    pub fn is_empty(&self) -> bool {
        self.pending_quits() == 0
            && self
                .buffer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_empty()
    }

    /// Removes and returns every queued command.
    ///
    /// Quit requests raised by signal handlers come first, one `"quit"` line
    /// per request, followed by the text commands in insertion order.
    ///
    /// ## Returns
    /// The drained command lines.
    pub fn drain(&self) -> Vec<String> {
        let quits = self.pending_quits.swap(0, Ordering::SeqCst);
        let mut buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut commands = Vec::with_capacity(quits + buffer.len());
        commands.extend(std::iter::repeat(QUIT_COMMAND.to_string()).take(quits));
        commands.extend(buffer.drain(..));
        commands
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
