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

//! Crash report model and the backtrace capability contract.
//!
//! A [`CrashReport`] is produced once per fatal signal and written straight to a
//! diagnostic sink; it is never stored. Whether symbolic backtraces are
//! available is a property of the platform, expressed as a [`BacktraceCapture`]
//! implementation chosen at build time rather than as conditional code inside
//! the reporter.

use crate::config::SystemConfig;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

/// Text written in place of the frame list when no backtrace is available.
pub const BACKTRACE_UNAVAILABLE: &str = "Not available on this platform.";

const RULE: &str = "=======================================================";

/// Static identification of the running binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildIdentity {
    /// Product name.
    pub product: String,
    /// Product version.
    pub version: String,
    /// Operating system name (e.g. `linux`).
    pub platform: String,
    /// CPU architecture name (e.g. `x86_64`).
    pub architecture: String,
    /// Compiler identifier (e.g. `rustc 1.85.0 (...)`).
    pub compiler: String,
}

/// A captured backtrace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backtrace {
    /// One human-readable description per frame, innermost first.
    Frames(Vec<String>),
    /// The platform has no introspection facility.
    Unavailable,
}

/// The capability of capturing a symbolic backtrace of the current thread.
pub trait BacktraceCapture: Send + Sync {
    /// Captures at most `max_frames` frames.
    fn capture(&self, max_frames: usize) -> Backtrace;
}

/// Capture implementation for platforms without introspection.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBacktrace;

impl BacktraceCapture for NoBacktrace {
    fn capture(&self, _max_frames: usize) -> Backtrace {
        Backtrace::Unavailable
    }
}

/// Where crash diagnostics are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrashSink {
    /// The process's standard error stream.
    Console,
    /// A dedicated crash-log file, truncated on every crash.
    File(PathBuf),
}

impl CrashSink {
    /// Selects the sink requested by `config`: the crash log if one is
    /// configured, the console otherwise.
    pub fn from_config(config: &SystemConfig) -> Self {
        match &config.crash_log {
            Some(path) => CrashSink::File(path.clone()),
            None => CrashSink::Console,
        }
    }
}

/// The diagnostic record written when the process receives a fatal signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashReport<'a> {
    identity: &'a BuildIdentity,
    signal: i32,
    backtrace: Backtrace,
}

impl<'a> CrashReport<'a> {
    /// Creates a report for `signal`.
    pub fn new(identity: &'a BuildIdentity, signal: i32, backtrace: Backtrace) -> Self {
        Self {
            identity,
            signal,
            backtrace,
        }
    }

    /// Returns the signal number that triggered the report.
    pub fn signal(&self) -> i32 {
        self.signal
    }

    /// Returns the captured backtrace.
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Writes the full report (banner, header, backtrace) to `sink` and
    /// flushes it.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        // Format up front: the sink may be an unbuffered file descriptor.
        let text = self.to_string();
        sink.write_all(text.as_bytes())?;
        sink.flush()
    }
}

impl fmt::Display for CrashReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.identity;

        writeln!(f, "\n{RULE}\n")?;
        writeln!(f, "{} crashed! This should not happen...\n", id.product)?;
        writeln!(f, "Make sure that you're using the latest version. If you")?;
        writeln!(f, "are, please file a bug report and include:\n")?;
        writeln!(f, " - This output")?;
        writeln!(f, " - The conditions that triggered the crash")?;
        writeln!(f, " - How to reproduce the crash (if known)")?;
        writeln!(f, " - The executable, so the backtrace can be symbolized")?;
        writeln!(f, " - Any other data which you think might be useful")?;
        writeln!(f, "\n{RULE}\n")?;

        writeln!(f, "{:<14}{}", "Product:", id.product)?;
        writeln!(f, "{:<14}{}", "Version:", id.version)?;
        writeln!(f, "{:<14}{}", "Platform:", id.platform)?;
        writeln!(f, "{:<14}{}", "Architecture:", id.architecture)?;
        writeln!(f, "{:<14}{}", "Compiler:", id.compiler)?;
        writeln!(f, "{:<14}{}", "Signal:", self.signal)?;
        writeln!(f, "\nBacktrace:")?;

        match &self.backtrace {
            Backtrace::Frames(frames) if !frames.is_empty() => {
                for frame in frames {
                    writeln!(f, "  {frame}")?;
                }
            }
            _ => writeln!(f, "  {BACKTRACE_UNAVAILABLE}")?,
        }

        writeln!(f)
    }
}
