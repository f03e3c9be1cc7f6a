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

//! POSIX signal handling.
//!
//! Two routers share the process's signal disposition table:
//! * [`crash::CrashReporter`] owns the fatal set and terminates the process.
//! * [`terminate::TerminationRouter`] owns the interrupt set and only queues a
//!   quit request.
//!
//! The interrupt handler only touches an atomic counter. The crash handler
//! does best-effort reporting: it allocates while formatting the report,
//! creates the crash-log file and symbolizes the backtrace, then resets the
//! fatal dispositions and re-raises. The process is terminating either way,
//! so a report lost to a reentrancy deadlock is accepted.

pub mod crash;
pub mod terminate;

pub use crash::CrashReporter;
pub use terminate::TerminationRouter;

use hearth_core::{Result, SystemError};
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

/// Signals after which the process cannot safely continue.
pub const FATAL_SIGNALS: [Signal; 4] = [
    Signal::SIGSEGV,
    Signal::SIGILL,
    Signal::SIGFPE,
    Signal::SIGABRT,
];

/// Signals asking the process to stop.
pub const INTERRUPT_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGTERM];

/// The two disposition operations the crash path performs after reporting.
///
/// Abstracted so the reset-before-raise ordering can be observed in tests
/// without killing the test process.
pub trait SignalControl {
    /// Restores the default disposition of `signal`.
    fn reset_to_default(&self, signal: Signal) -> nix::Result<()>;

    /// Sends `signal` to the calling thread.
    fn raise(&self, signal: Signal) -> nix::Result<()>;
}

/// [`SignalControl`] backed by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSignalControl;

impl SignalControl for OsSignalControl {
    fn reset_to_default(&self, signal: Signal) -> nix::Result<()> {
        // SAFETY: SIG_DFL is not a Rust function; installing it cannot violate
        // any handler invariants.
        unsafe { signal::signal(signal, SigHandler::SigDfl) }.map(|_| ())
    }

    fn raise(&self, signal: Signal) -> nix::Result<()> {
        signal::raise(signal)
    }
}

/// Installs `handler` for every signal in `signals`.
fn install(
    signals: &[Signal],
    handler: extern "C" fn(libc::c_int),
    flags: SaFlags,
) -> Result<()> {
    let action = SigAction::new(SigHandler::Handler(handler), flags, SigSet::empty());

    for &sig in signals {
        // SAFETY: the handlers passed here are `extern "C"` functions that
        // never unwind. Their restrictions are listed in the module docs.
        unsafe { signal::sigaction(sig, &action) }.map_err(|e| {
            SystemError::SignalRegistration {
                signal: sig.as_str(),
                reason: e.to_string(),
            }
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_sets_are_disjoint() {
        for sig in INTERRUPT_SIGNALS {
            assert!(!FATAL_SIGNALS.contains(&sig));
        }
    }

    #[test]
    fn registration_error_names_the_signal() {
        // SIGKILL's disposition can never be changed.
        extern "C" fn ignore(_: libc::c_int) {}
        let err = install(&[Signal::SIGKILL], ignore, SaFlags::empty()).unwrap_err();
        match err {
            SystemError::SignalRegistration { signal, .. } => assert_eq!(signal, "SIGKILL"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
