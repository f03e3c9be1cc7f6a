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

//! Process lifecycle contracts: teardown hooks, exit reasons and focus tracking.

/// Subsystem teardown calls issued by the platform layer.
///
/// The platform layer does not know what these subsystems do; it only
/// guarantees the order in which they are invoked. Every method defaults to a
/// no-op so hosts implement only what they own.
pub trait ShutdownHooks {
    /// Called once by `System::init`, after the signal handlers are installed.
    fn platform_init(&mut self) {}

    /// Client-side teardown (renderer, sound, input).
    fn client_shutdown(&mut self) {}

    /// Closes the console log file, if one is open.
    fn close_console_log(&mut self) {}

    /// Core subsystem teardown (file system, cvars, commands).
    fn common_shutdown(&mut self) {}

    /// Releases OS-level resources held by the platform layer (windowing, audio devices).
    fn platform_release(&mut self) {}

    /// Network teardown.
    fn network_shutdown(&mut self) {}
}

/// Hooks for hosts with nothing to tear down.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl ShutdownHooks for NoHooks {}

/// Why the process is exiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Orderly shutdown requested by the user or the application.
    Quit,
    /// Unrecoverable error.
    Error,
}

impl ExitReason {
    /// Returns the process exit code for this reason.
    pub const fn code(self) -> i32 {
        match self {
            ExitReason::Quit => 0,
            ExitReason::Error => 1,
        }
    }
}

/// Whether the application currently has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// The application is in the foreground.
    #[default]
    Focused,
    /// The application is in the background or the device is asleep.
    Unfocused,
}

/// An edge in the focus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTransition {
    /// The application went to the background.
    Lost,
    /// The application came back to the foreground.
    Gained,
}

type FocusHook = Box<dyn FnMut(FocusTransition) + Send>;

/// Turns raw focus-state notifications into transition events.
///
/// The platform may report the same state many times in a row; the hook only
/// sees changes. No policy (pausing, muting) is applied here.
pub struct FocusTracker {
    state: FocusState,
    hook: Option<FocusHook>,
}

impl FocusTracker {
    /// Creates a tracker that starts out focused, with no hook.
    pub fn new() -> Self {
        Self {
            state: FocusState::Focused,
            hook: None,
        }
    }

    /// Installs the hook invoked on every transition, replacing any previous one.
    pub fn set_hook<F>(&mut self, hook: F)
    where
        F: FnMut(FocusTransition) + Send + 'static,
    {
        self.hook = Some(Box::new(hook));
    }

    /// Returns the last reported state.
    pub fn state(&self) -> FocusState {
        self.state
    }

    /// Records a state notification.
    ///
    /// ## Returns
    /// The transition, if the state changed.
    pub fn update(&mut self, state: FocusState) -> Option<FocusTransition> {
        let transition = match (self.state, state) {
            (FocusState::Focused, FocusState::Unfocused) => FocusTransition::Lost,
            (FocusState::Unfocused, FocusState::Focused) => FocusTransition::Gained,
            _ => return None,
        };

        self.state = state;
        log::debug!("Focus transition: {transition:?}");
        if let Some(hook) = self.hook.as_mut() {
            hook(transition);
        }
        Some(transition)
    }
}

impl Default for FocusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FocusTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusTracker")
            .field("state", &self.state)
            .field("has_hook", &self.hook.is_some())
            .finish()
    }
}
