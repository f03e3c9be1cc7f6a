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

//! # Hearth Platform
//!
//! Concrete implementations of the contracts defined in `hearth-core`, backed
//! by the host operating system:
//!
//! * [`signals`]: crash reporting and interrupt routing (POSIX signals).
//! * [`clock`]: the process-wide monotonic microsecond clock and sleep.
//! * [`fs`]: the single-slot directory finder and path helpers.
//! * [`console`]: dedicated-mode console input and raw output.
//! * [`system`]: the facade tying these together with ordered teardown.

#![warn(missing_docs)]

pub mod backtrace;
pub mod build_info;
pub mod clock;
pub mod console;
pub mod fs;
#[cfg(unix)]
pub mod signals;
pub mod system;

pub use backtrace::PlatformBacktrace;
pub use clock::{now_microseconds, now_milliseconds, sleep_nanoseconds, PlatformClock};
pub use fs::FileFinder;
pub use system::System;
