// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Randomized-interval broadcast scheduling.
//!
//! On a shared broadcast medium without CSMA arbitration, two nodes that
//! boot in lockstep would collide on every emission if they broadcast at a
//! fixed period. The scheduler therefore draws a fresh randomized interval
//! after every emission — not once per boot — which decorrelates broadcast
//! phases even for nodes that started synchronized.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use rand::Rng;

/// Decides when the next broadcast is due.
///
/// All state is atomic so [`poll`](BroadcastScheduler::poll) can be driven
/// through a shared reference. Only the tick path calls `poll`; the
/// atomics exist because the same instance is reachable from the receive
/// path's owner.
#[derive(Debug)]
pub struct BroadcastScheduler {
    interval_ms: u32,
    jitter_percent: u8,
    last_broadcast_ms: AtomicU64,
    /// The currently chosen randomized interval; 0 means "pick a new one
    /// on the next poll".
    next_interval_ms: AtomicU32,
}

impl BroadcastScheduler {
    /// Create a scheduler with the given nominal period and ± jitter.
    pub fn new(interval_ms: u32, jitter_percent: u8) -> Self {
        BroadcastScheduler {
            interval_ms,
            jitter_percent,
            last_broadcast_ms: AtomicU64::new(0),
            next_interval_ms: AtomicU32::new(0),
        }
    }

    /// Returns true if a broadcast is due now, and records the emission.
    ///
    /// Non-blocking and cheap when nothing is due. The first broadcast
    /// fires once the first randomized interval has elapsed from counter
    /// zero.
    pub fn poll(&self, now_ms: u64) -> bool {
        self.poll_with_rng(now_ms, &mut rand::rng())
    }

    /// [`poll`](BroadcastScheduler::poll) with a caller-supplied RNG, for
    /// deterministic tests.
    pub fn poll_with_rng<R: Rng + ?Sized>(&self, now_ms: u64, rng: &mut R) -> bool {
        let mut next = self.next_interval_ms.load(Ordering::Relaxed);
        if next == 0 {
            next = self.draw_interval(rng);
            self.next_interval_ms.store(next, Ordering::Relaxed);
        }
        let last = self.last_broadcast_ms.load(Ordering::Relaxed);
        if now_ms.saturating_sub(last) < next as u64 {
            return false;
        }
        self.last_broadcast_ms.store(now_ms, Ordering::Relaxed);
        // Force a fresh draw next time.
        self.next_interval_ms.store(0, Ordering::Relaxed);
        true
    }

    /// The configured nominal broadcast period in milliseconds.
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Draw `interval ± variation` where `variation` is the configured
    /// percentage of the interval. Both bounds are inclusive. The
    /// arithmetic stays in `i64` so intervals with the high bit set
    /// survive the round trip.
    fn draw_interval<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let variation = self.interval_ms as i64 * self.jitter_percent as i64 / 100;
        let jitter = if variation > 0 {
            rng.random_range(-variation..=variation)
        } else {
            0
        };
        (self.interval_ms as i64 + jitter).clamp(0, u32::MAX as i64) as u32
    }
}
