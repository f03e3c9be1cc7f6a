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

//! Routes SIGINT / SIGTERM into the application command queue.
//!
//! The handler never exits and never tears anything down: it bumps the queue's
//! quit counter and returns. The main loop later drains a `"quit"` command and
//! shuts down in its own time.

use super::{install, INTERRUPT_SIGNALS};
use hearth_core::{CommandQueue, Result};
use nix::sys::signal::SaFlags;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

static TARGET: OnceLock<Arc<CommandQueue>> = OnceLock::new();
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Installs the interrupt handler.
pub struct TerminationRouter;

impl TerminationRouter {
    /// Binds `queue` as the destination of interrupt requests and installs the
    /// handler for SIGINT and SIGTERM.
    ///
    /// The first queue bound in a process stays bound; later calls log a
    /// warning if they pass a different queue.
    pub fn register_handler(queue: Arc<CommandQueue>) -> Result<()> {
        if let Err(rejected) = TARGET.set(queue) {
            let bound = TARGET.get().is_some_and(|q| Arc::ptr_eq(q, &rejected));
            if !bound {
                log::warn!("Interrupt handler already bound to another command queue.");
            }
        }

        if INSTALLED.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        // SA_RESTART: an interrupt must not make blocking reads on the main
        // path fail with EINTR.
        if let Err(e) = install(&INTERRUPT_SIGNALS, interrupt_handler, SaFlags::SA_RESTART) {
            INSTALLED.store(false, Ordering::SeqCst);
            return Err(e);
        }

        log::info!("Interrupt handler installed (SIGINT, SIGTERM)");
        Ok(())
    }

    /// Returns the bound queue, if any.
    pub fn queue() -> Option<&'static Arc<CommandQueue>> {
        TARGET.get()
    }
}

extern "C" fn interrupt_handler(_signum: libc::c_int) {
    if let Some(queue) = TARGET.get() {
        queue.request_quit();
    }
}
