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

//! The process-wide monotonic clock.

use hearth_core::clock::{ClockReading, MonotonicClock, TimeSource};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Reads `CLOCK_MONOTONIC` on Unix and the wall clock elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformClock;

impl TimeSource for PlatformClock {
    #[cfg(unix)]
    fn now(&self) -> ClockReading {
        use nix::time::{clock_gettime, ClockId};

        match clock_gettime(ClockId::CLOCK_MONOTONIC) {
            Ok(ts) => ClockReading::new(ts.tv_sec() as i64, ts.tv_nsec() as i64),
            Err(e) => {
                log::warn!("CLOCK_MONOTONIC unavailable ({e}); falling back to wall clock");
                wall_clock()
            }
        }
    }

    #[cfg(not(unix))]
    fn now(&self) -> ClockReading {
        wall_clock()
    }
}

fn wall_clock() -> ClockReading {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    ClockReading::new(
        since_epoch.as_secs() as i64,
        i64::from(since_epoch.subsec_nanos()),
    )
}

static CLOCK: MonotonicClock<PlatformClock> = MonotonicClock::new(PlatformClock);

/// Returns the microseconds elapsed since the first call in this process,
/// plus one millisecond. Strictly positive and non-decreasing.
pub fn now_microseconds() -> i64 {
    CLOCK.now_microseconds()
}

/// Returns `now_microseconds() / 1000`, truncating.
pub fn now_milliseconds() -> i64 {
    CLOCK.now_milliseconds()
}

/// Suspends the calling thread for at least `nanos` nanoseconds.
///
/// Best-effort: the thread may oversleep. Not cancellable.
pub fn sleep_nanoseconds(nanos: u64) {
    std::thread::sleep(Duration::from_nanos(nanos));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    const SLEEP_DURATION_NS: u64 = 20_000_000;

    #[test]
    fn readings_are_positive_and_non_decreasing() {
        let mut previous = now_microseconds();
        assert!(previous > 0, "first reading must be positive, got {previous}");

        for _ in 0..1_000 {
            let current = now_microseconds();
            assert!(
                current >= previous,
                "clock went backwards: {previous} -> {current}"
            );
            previous = current;
        }
    }

    #[test]
    fn milliseconds_track_microseconds() {
        let before = now_microseconds();
        let millis = now_milliseconds();
        let after = now_microseconds();

        assert!(millis >= before / 1_000);
        assert!(millis <= after / 1_000);
    }

    #[test]
    fn sleep_lasts_at_least_the_requested_time() {
        let start = Instant::now();
        let before = now_microseconds();
        sleep_nanoseconds(SLEEP_DURATION_NS);
        let after = now_microseconds();

        assert!(start.elapsed() >= Duration::from_nanos(SLEEP_DURATION_NS));
        assert!(
            after - before >= (SLEEP_DURATION_NS / 1_000) as i64,
            "clock advanced only {}us over a {}us sleep",
            after - before,
            SLEEP_DURATION_NS / 1_000
        );
    }

    #[test]
    fn platform_source_reports_normalized_nanos() {
        let reading = PlatformClock.now();
        assert!((0..1_000_000_000).contains(&reading.nanos));
        assert!(reading.secs >= 0);
    }
}
