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

//! Symbolic backtrace capture.
//!
//! [`PlatformBacktrace`] is the capture implementation selected for the target:
//! [`SymbolicBacktrace`] where the standard library can unwind and symbolize,
//! [`NoBacktrace`] everywhere else.

use hearth_core::crash::{Backtrace, BacktraceCapture};

pub use hearth_core::crash::NoBacktrace;

/// The backtrace capability of the current target.
#[cfg(any(unix, windows))]
pub type PlatformBacktrace = SymbolicBacktrace;

/// The backtrace capability of the current target.
#[cfg(not(any(unix, windows)))]
pub type PlatformBacktrace = NoBacktrace;

/// Captures backtraces through `std::backtrace`, regardless of `RUST_BACKTRACE`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymbolicBacktrace;

impl BacktraceCapture for SymbolicBacktrace {
    fn capture(&self, max_frames: usize) -> Backtrace {
        let captured = std::backtrace::Backtrace::force_capture();
        if captured.status() != std::backtrace::BacktraceStatus::Captured {
            return Backtrace::Unavailable;
        }

        let frames = parse_frames(&captured.to_string(), max_frames);
        if frames.is_empty() {
            Backtrace::Unavailable
        } else {
            Backtrace::Frames(frames)
        }
    }
}

/// Folds the standard library's multi-line backtrace rendering into one line
/// per frame.
///
/// The rendering looks like:
/// ```text
///    0: symbol::name
///              at /path/to/file.rs:12:5
///    1: other::symbol
/// ```
/// which becomes `symbol::name (/path/to/file.rs:12:5)` and `other::symbol`.
fn parse_frames(rendered: &str, max_frames: usize) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    let mut located = true;

    for line in rendered.lines() {
        let trimmed = line.trim_start();

        if let Some(location) = trimmed.strip_prefix("at ") {
            // Inlined frames can list several locations; keep the first.
            if let (Some(last), false) = (frames.last_mut(), located) {
                last.push_str(&format!(" ({location})"));
                located = true;
            }
            continue;
        }

        let Some((index, symbol)) = trimmed.split_once(": ") else {
            continue;
        };
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        if frames.len() == max_frames {
            break;
        }
        frames.push(symbol.trim().to_string());
        located = false;
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    const RENDERED: &str = "   0: hearth_platform::signals::crash::fatal_signal_handler
             at ./crates/hearth-platform/src/signals/crash.rs:120:21
   1: <unknown>
   2: sandbox::main
             at ./sandbox/src/main.rs:40:5
             at ./sandbox/src/main.rs:12:9
   3: __libc_start_main
";

    #[test]
    fn frames_fold_locations() {
        let frames = parse_frames(RENDERED, 15);
        assert_eq!(
            frames,
            vec![
                "hearth_platform::signals::crash::fatal_signal_handler (./crates/hearth-platform/src/signals/crash.rs:120:21)",
                "<unknown>",
                "sandbox::main (./sandbox/src/main.rs:40:5)",
                "__libc_start_main",
            ]
        );
    }

    #[test]
    fn frames_are_capped() {
        let frames = parse_frames(RENDERED, 2);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1], "<unknown>");
    }

    #[test]
    fn unrelated_text_is_ignored() {
        assert!(parse_frames("disabled backtrace", 15).is_empty());
    }

    #[test]
    fn live_capture_has_frames() {
        match PlatformBacktrace::default().capture(15) {
            Backtrace::Frames(frames) => {
                assert!(!frames.is_empty());
                assert!(frames.len() <= 15);
            }
            // Targets without unwind support are allowed to report nothing.
            Backtrace::Unavailable => {}
        }
    }
}
