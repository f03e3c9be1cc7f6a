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

//! Fatal-signal crash reporter.
//!
//! On SIGSEGV, SIGILL, SIGFPE or SIGABRT the handler:
//! 1. writes a [`CrashReport`] to the configured sink and flushes it,
//! 2. resets all four fatal signals to their default disposition,
//! 3. re-raises the signal, so the OS still produces a core dump or breaks
//!    into a debugger.
//!
//! Reporting is best-effort: if the sink cannot be opened the report is
//! skipped, but steps 2 and 3 always happen.
//!
//! The handler runs on the alternate signal stack when the faulting thread
//! has one (std sets one up for the threads it manages), so a stack overflow
//! is still reported.

use super::{install, OsSignalControl, SignalControl, FATAL_SIGNALS};
use crate::backtrace::PlatformBacktrace;
use crate::build_info;
use hearth_core::crash::{BacktraceCapture, BuildIdentity, CrashReport, CrashSink};
use hearth_core::{Result, SystemConfig};
use nix::sys::signal::{SaFlags, Signal};
use std::fs::File;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

static CONTEXT: OnceLock<CrashContext> = OnceLock::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// `SA_ONSTACK` lets the handler run on the alternate stack after a stack overflow.
const HANDLER_FLAGS: SaFlags = SaFlags::SA_ONSTACK;

/// Everything the handler needs, prepared outside of signal context.
#[derive(Debug, Clone)]
pub struct CrashContext {
    identity: BuildIdentity,
    sink: CrashSink,
    max_frames: usize,
}

impl CrashContext {
    /// Prepares the reporting context described by `config`.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            identity: build_info::identity(config),
            sink: CrashSink::from_config(config),
            max_frames: config.backtrace_frames,
        }
    }

    /// Returns the configured sink.
    pub fn sink(&self) -> &CrashSink {
        &self.sink
    }
}

/// Installs the crash handler for the fatal-signal set.
pub struct CrashReporter;

impl CrashReporter {
    /// Registers the handler. Only the first call per process has an effect;
    /// later calls keep the original context.
    pub fn register_handler(config: &SystemConfig) -> Result<()> {
        if CONTEXT.set(CrashContext::from_config(config)).is_err() {
            log::debug!("Crash context already set; keeping the first registration.");
        }

        if INSTALLED.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        if let Err(e) = install(&FATAL_SIGNALS, fatal_signal_handler, HANDLER_FLAGS) {
            INSTALLED.store(false, Ordering::SeqCst);
            return Err(e);
        }

        log::info!("Crash handler installed (SIGSEGV, SIGILL, SIGFPE, SIGABRT)");
        Ok(())
    }

    /// Returns `true` once the handler has been installed.
    pub fn is_registered() -> bool {
        INSTALLED.load(Ordering::SeqCst)
    }
}

extern "C" fn fatal_signal_handler(signum: libc::c_int) {
    handle_fatal_signal(
        signum,
        CONTEXT.get(),
        &OsSignalControl,
        &PlatformBacktrace::default(),
    );
}

/// The body of the fatal-signal handler.
///
/// Reports (if a context is available and its sink opens), then restores the
/// default disposition of every fatal signal, then re-raises `signum`.
pub fn handle_fatal_signal<C, B>(
    signum: libc::c_int,
    context: Option<&CrashContext>,
    control: &C,
    capture: &B,
) where
    C: SignalControl,
    B: BacktraceCapture,
{
    if let Some(context) = context {
        if let Some(mut sink) = open_sink(&context.sink) {
            let _ = write_report(&mut sink, context, signum, capture);
        }
    }

    for sig in FATAL_SIGNALS {
        let _ = control.reset_to_default(sig);
    }

    match Signal::try_from(signum) {
        Ok(sig) => {
            let _ = control.raise(sig);
        }
        // Not a signal we can name: nothing to hand back to the OS.
        Err(_) => std::process::abort(),
    }
}

/// Writes the crash report for `signum` to `sink`.
pub fn write_report<W, B>(
    sink: &mut W,
    context: &CrashContext,
    signum: libc::c_int,
    capture: &B,
) -> io::Result<()>
where
    W: Write + ?Sized,
    B: BacktraceCapture,
{
    let backtrace = capture.capture(context.max_frames);
    CrashReport::new(&context.identity, signum, backtrace).write_to(sink)
}

fn open_sink(sink: &CrashSink) -> Option<Box<dyn Write>> {
    match sink {
        CrashSink::Console => Some(Box::new(RawStderr)),
        CrashSink::File(path) => File::create(path)
            .ok()
            .map(|file| Box::new(SyncedFile(file)) as Box<dyn Write>),
    }
}

/// Unbuffered, lock-free writer for file descriptor 2.
///
/// `std::io::stderr()` takes a lock that the interrupted thread may hold.
struct RawStderr;

impl Write for RawStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        nix::unistd::write(io::stderr(), buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A crash-log file whose `flush` reaches the disk.
struct SyncedFile(File);

impl Write for SyncedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.sync_all()
    }
}
