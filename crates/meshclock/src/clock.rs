// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The monotonic counter contract and the standard-library implementation.
//!
//! The core assumes a free-running 64-bit microsecond counter that never
//! decreases and never wraps within the lifetime of the system. The
//! counter must be safe to read from the execution context of the radio
//! receive callback, which on embedded hosts may be an interrupt or driver
//! bottom-half — implementations must not allocate, lock, or block.

use std::time::{Duration, Instant};

/// A free-running, non-wrapping microsecond counter.
///
/// Hardware hosts typically have two counter readers, a checked one for
/// arbitrary contexts and a faster one for interrupt context; either
/// satisfies this trait. Mesh time is defined as `now_us() + offset`, so
/// counters that start near zero keep the 56-bit wire stamp unambiguous
/// for centuries.
pub trait MonotonicClock: Send + Sync {
    /// Current counter reading in microseconds.
    fn now_us(&self) -> u64;

    /// Current counter reading in the host millisecond domain.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}

/// A [`MonotonicClock`] over [`std::time::Instant`].
///
/// Reads elapsed microseconds from an anchor captured at construction, so
/// the counter starts at zero.
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    anchor: Instant,
}

impl StdClock {
    /// Create a counter anchored at the current instant.
    pub fn new() -> Self {
        StdClock {
            anchor: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for StdClock {
    fn now_us(&self) -> u64 {
        self.anchor.elapsed().as_micros() as u64
    }
}

/// Check that the counter is actually counting.
///
/// Takes two readings around a ~1 ms delay and reports whether the second
/// is ahead of the first. A stalled counter is a hardware or driver bug;
/// the caller logs it prominently and continues, since a user-supplied
/// counter may still be functional.
pub(crate) fn counter_advances(clock: &dyn MonotonicClock) -> bool {
    let first = clock.now_us();
    std::thread::sleep(Duration::from_millis(1));
    let second = clock.now_us();
    second > first
}
