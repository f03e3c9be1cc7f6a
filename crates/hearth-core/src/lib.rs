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

//! # Hearth Core
//!
//! Foundational crate containing the contracts, core types, and portable logic
//! of the platform services layer. Everything that touches the operating system
//! directly lives in `hearth-platform`; this crate only describes *what* the
//! platform must provide and implements the parts that are pure arithmetic or
//! text processing (clock calibration, glob matching, crash report layout).

#![warn(missing_docs)]

pub mod clock;
pub mod command;
pub mod config;
pub mod crash;
pub mod error;
pub mod glob;
pub mod lifecycle;

pub use clock::{ClockReading, MonotonicClock, TimeSource};
pub use command::CommandQueue;
pub use config::SystemConfig;
pub use crash::{Backtrace, BacktraceCapture, BuildIdentity, CrashReport, CrashSink};
pub use error::{Result, SystemError};
pub use glob::GlobPattern;
pub use lifecycle::{ExitReason, FocusState, FocusTracker, FocusTransition, ShutdownHooks};
