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

//! Dedicated-mode console I/O.
//!
//! A dedicated (headless) server reads operator commands from stdin without
//! blocking the main loop: every frame it polls for a line and moves on if
//! none is ready.

use std::io::{self, Write};

/// Bytes read from stdin per poll.
const LINE_CAPACITY: usize = 256;

/// Non-blocking line reader over stdin.
#[derive(Debug)]
pub struct ConsoleInput {
    dedicated: bool,
    stdin_active: bool,
}

impl ConsoleInput {
    /// Creates a reader. Input is only read when `dedicated` is set.
    pub fn new(dedicated: bool) -> Self {
        Self {
            dedicated,
            stdin_active: true,
        }
    }

    /// Returns `false` once stdin has reached end-of-file.
    pub fn is_active(&self) -> bool {
        self.stdin_active
    }

    /// Returns the next line typed on the console, without its line ending.
    ///
    /// Returns `None` immediately if not in dedicated mode, if stdin has been
    /// closed, or if no input is pending. Reaching end-of-file disables input
    /// for the rest of the process.
    pub fn poll_line(&mut self) -> Option<String> {
        if !self.dedicated || !self.stdin_active {
            return None;
        }
        if !stdin_ready() {
            return None;
        }

        let mut buf = [0u8; LINE_CAPACITY];
        match read_stdin(&mut buf) {
            Ok(0) => {
                log::info!("Console input closed.");
                self.stdin_active = false;
                None
            }
            Ok(len) => {
                let text = String::from_utf8_lossy(&buf[..len]);
                Some(text.trim_end_matches(['\r', '\n']).to_string())
            }
            Err(e) => {
                log::debug!("Console read failed: {e}");
                None
            }
        }
    }
}

/// Writes `text` to stdout as-is and flushes it.
pub fn console_output(text: &str) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

#[cfg(unix)]
fn stdin_ready() -> bool {
    use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
    use std::os::fd::AsFd;

    let stdin = io::stdin();
    let mut fds = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];
    match poll(&mut fds, PollTimeout::ZERO) {
        Ok(n) if n > 0 => fds[0]
            .revents()
            .is_some_and(|r| r.intersects(PollFlags::POLLIN | PollFlags::POLLHUP)),
        _ => false,
    }
}

#[cfg(not(unix))]
fn stdin_ready() -> bool {
    false
}

/// Reads straight from the stdin descriptor, bypassing std's buffer so that
/// `poll` keeps reporting data that has not been consumed yet.
#[cfg(unix)]
fn read_stdin(buf: &mut [u8]) -> io::Result<usize> {
    nix::unistd::read(io::stdin(), buf).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn read_stdin(_buf: &mut [u8]) -> io::Result<usize> {
    Ok(0)
}
