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

//! Monotonic microsecond clock built on top of an arbitrary-epoch time source.
//!
//! The platform time source (e.g. `CLOCK_MONOTONIC`) starts counting at an
//! unspecified point. [`MonotonicClock`] captures its own zero point on the
//! first query and moves it back by one millisecond, so no reading, not even
//! the very first one, is ever zero.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::OnceLock;

/// Nanoseconds in one second.
pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// How far the epoch is moved back when it is captured.
const CALIBRATION_OFFSET_NANOS: i64 = 1_000_000;

/// A raw reading of a time source, split into whole seconds and nanoseconds.
///
/// Readings produced by a [`TimeSource`] keep `nanos` within `0..NANOS_PER_SEC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockReading {
    /// Whole seconds.
    pub secs: i64,
    /// Nanoseconds within the second.
    pub nanos: i64,
}

impl ClockReading {
    /// Creates a new reading.
    #[inline]
    pub const fn new(secs: i64, nanos: i64) -> Self {
        Self { secs, nanos }
    }

    /// Returns `self - earlier`, borrowing one second when the nanosecond
    /// difference goes negative.
    #[inline]
    pub const fn since(self, earlier: ClockReading) -> ClockReading {
        let mut secs = self.secs - earlier.secs;
        let mut nanos = self.nanos - earlier.nanos;
        if nanos < 0 {
            nanos += NANOS_PER_SEC;
            secs -= 1;
        }
        ClockReading { secs, nanos }
    }

    /// Returns this reading moved back by one millisecond, used as the epoch.
    #[inline]
    pub const fn calibrated(self) -> ClockReading {
        let mut secs = self.secs;
        let mut nanos = self.nanos - CALIBRATION_OFFSET_NANOS;
        if nanos < 0 {
            nanos += NANOS_PER_SEC;
            secs -= 1;
        }
        ClockReading { secs, nanos }
    }

    /// Converts the reading to whole microseconds, truncating.
    #[inline]
    pub const fn as_micros(self) -> i64 {
        self.secs * 1_000_000 + self.nanos / 1_000
    }
}

/// A source of raw time readings.
pub trait TimeSource: Send + Sync {
    /// Reads the current time.
    fn now(&self) -> ClockReading;
}

/// A lazily calibrated microsecond clock.
///
/// The epoch is written exactly once, by the first query. Every query returns
/// the time elapsed since the epoch. Results never decrease, even if the
/// underlying source steps backwards (as a wall-clock fallback can).
#[derive(Debug)]
pub struct MonotonicClock<S: TimeSource> {
    source: S,
    epoch: OnceLock<ClockReading>,
    last_micros: AtomicI64,
}

impl<S: TimeSource> MonotonicClock<S> {
    /// Creates an uncalibrated clock over `source`.
    ///
    /// ## Returns
    /// A new instance of the MonotonicClock struct. `const`, so the clock can
    /// live in a `static`.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            epoch: OnceLock::new(),
            // Floor of 1 keeps every reading strictly positive.
            last_micros: AtomicI64::new(1),
        }
    }

    /// Returns the number of microseconds elapsed since the epoch.
    ///
    /// The first call captures the epoch; its result is therefore about one
    /// millisecond.
    ///
    /// ## Returns
    /// A strictly positive, non-decreasing microsecond count.
    pub fn now_microseconds(&self) -> i64 {
        let now = self.source.now();
        let epoch = *self.epoch.get_or_init(|| now.calibrated());
        let micros = now.since(epoch).as_micros();

        let previous = self.last_micros.fetch_max(micros, Ordering::AcqRel);
        previous.max(micros)
    }

    /// Returns `now_microseconds() / 1000`, truncating.
    #[inline]
    pub fn now_milliseconds(&self) -> i64 {
        self.now_microseconds() / 1_000
    }

    /// Returns the captured epoch, or `None` before the first query.
    pub fn epoch(&self) -> Option<ClockReading> {
        self.epoch.get().copied()
    }

    /// Returns the underlying time source.
    pub fn source(&self) -> &S {
        &self.source
    }
}
