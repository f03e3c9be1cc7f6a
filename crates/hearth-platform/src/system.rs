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

//! The platform facade used by the host application.
//!
//! [`System`] owns the process-level platform state: the configuration, the
//! teardown hooks, the directory finder, focus tracking, console input and the
//! command queue that interrupts are routed into. It also implements the two
//! ways out of the process, in a fixed teardown order:
//!
//! * [`System::quit`]: client, console log, common, separator line, platform,
//!   network, then exit code 0.
//! * [`System::error`]: message on stderr, client, common, crash log,
//!   platform, network, then exit code 1.

use crate::console::{console_output, ConsoleInput};
use crate::fs::{self, FileFinder};
use hearth_core::lifecycle::{ExitReason, FocusState, FocusTracker, FocusTransition};
use hearth_core::{CommandQueue, Result, ShutdownHooks, SystemConfig};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

const QUIT_SEPARATOR: &str = "------------------------------------\n";

/// Process-level platform services.
pub struct System<H: ShutdownHooks> {
    config: SystemConfig,
    hooks: H,
    finder: FileFinder,
    focus: FocusTracker,
    console: ConsoleInput,
    commands: Arc<CommandQueue>,
}

impl<H: ShutdownHooks> System<H> {
    /// Creates the platform services. Nothing is installed until [`System::init`].
    pub fn new(config: SystemConfig, hooks: H) -> Self {
        let console = ConsoleInput::new(config.dedicated);
        Self {
            config,
            hooks,
            finder: FileFinder::new(),
            focus: FocusTracker::new(),
            console,
            commands: Arc::new(CommandQueue::new()),
        }
    }

    /// Installs the crash and interrupt handlers, then runs the platform
    /// init hook.
    #[cfg(unix)]
    pub fn init(&mut self) -> Result<()> {
        use crate::signals::{CrashReporter, TerminationRouter};

        CrashReporter::register_handler(&self.config)?;
        TerminationRouter::register_handler(Arc::clone(&self.commands))?;
        self.hooks.platform_init();
        log::info!(
            "{} {} platform services initialized",
            self.config.product,
            self.config.version
        );
        Ok(())
    }

    /// Runs the platform init hook. This target has no signal support.
    #[cfg(not(unix))]
    pub fn init(&mut self) -> Result<()> {
        self.hooks.platform_init();
        log::info!(
            "{} {} platform services initialized (no signal support)",
            self.config.product,
            self.config.version
        );
        Ok(())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Returns the command queue that interrupts are routed into.
    pub fn commands(&self) -> &Arc<CommandQueue> {
        &self.commands
    }

    /// Returns the teardown hooks.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Starts a directory search.
    ///
    /// Opening a second search without closing the first is a programming
    /// error and takes the fatal-error path.
    pub fn find_first(&mut self, path: &str) -> Option<PathBuf> {
        match self.finder.find_first(path) {
            Ok(found) => found,
            Err(e) => self.error(&e.to_string()),
        }
    }

    /// Continues the open directory search.
    pub fn find_next(&mut self) -> Option<PathBuf> {
        self.finder.find_next()
    }

    /// Closes the open directory search, if any.
    pub fn find_close(&mut self) {
        self.finder.find_close();
    }

    /// Returns the per-user data directory.
    pub fn home_dir(&self) -> Option<PathBuf> {
        fs::home_dir(&self.config)
    }

    /// Installs the hook that receives focus transitions.
    pub fn on_focus_change<F>(&mut self, hook: F)
    where
        F: FnMut(FocusTransition) + Send + 'static,
    {
        self.focus.set_hook(hook);
    }

    /// Forwards a raw focus notification from the platform.
    pub fn notify_focus(&mut self, state: FocusState) -> Option<FocusTransition> {
        self.focus.update(state)
    }

    /// Polls the dedicated console for a line of input.
    pub fn console_input(&mut self) -> Option<String> {
        self.console.poll_line()
    }

    /// Writes text to the console.
    pub fn console_output(&self, text: &str) {
        console_output(text);
    }

    /// Tears down for an orderly exit, writing the separator line to `out`.
    ///
    /// ## Returns
    /// The process exit code (0).
    pub fn teardown_quit(&mut self, out: &mut dyn Write) -> i32 {
        log::info!("Shutting down.");
        self.finder.find_close();

        self.hooks.client_shutdown();
        self.hooks.close_console_log();
        self.hooks.common_shutdown();

        let _ = out.write_all(QUIT_SEPARATOR.as_bytes());
        let _ = out.flush();

        self.hooks.platform_release();
        self.hooks.network_shutdown();
        ExitReason::Quit.code()
    }

    /// Tears down after an unrecoverable error, writing the message to `err`
    /// and, best-effort, to the configured crash log.
    ///
    /// ## Returns
    /// The process exit code (1).
    pub fn teardown_error(&mut self, message: &str, err: &mut dyn Write) -> i32 {
        let _ = writeln!(err, "Error: {message}");
        let _ = err.flush();
        self.finder.find_close();

        self.hooks.client_shutdown();
        self.hooks.common_shutdown();

        if let Some(path) = &self.config.crash_log {
            if let Err(e) = write_crash_log(path, message) {
                log::warn!("Cannot write crash log '{}': {e}", path.display());
            }
        }

        self.hooks.platform_release();
        self.hooks.network_shutdown();
        ExitReason::Error.code()
    }

    /// Shuts everything down and exits successfully.
    pub fn quit(mut self) -> ! {
        let code = self.teardown_quit(&mut io::stdout());
        std::process::exit(code)
    }

    /// Reports `message`, shuts everything down and exits with a failure code.
    pub fn error(&mut self, message: &str) -> ! {
        let code = self.teardown_error(message, &mut io::stderr());
        std::process::exit(code)
    }
}

fn write_crash_log(path: &std::path::Path, message: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "Error: {message}")?;
    file.sync_all()
}

impl<H: ShutdownHooks> std::fmt::Debug for System<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System")
            .field("config", &self.config)
            .field("finder", &self.finder)
            .field("focus", &self.focus)
            .field("console", &self.console)
            .finish_non_exhaustive()
    }
}
