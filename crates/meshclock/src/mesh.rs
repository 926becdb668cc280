// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The core façade binding clock, codec, scheduler, and radio.
//!
//! [`MeshClock`] owns the mesh offset and exposes the whole programmatic
//! surface: `mesh_now_us`/`mesh_now_ms`, the drive-loop `tick`, the
//! sync-state query, and the receive discriminator. Construction is via a
//! builder; the instance is an `Arc` so the radio's receive callback can
//! hold a handle without process-global state.
//!
//! # Concurrency
//!
//! `tick()` runs in the host's drive loop; `handle_frame()` runs in
//! whatever context the radio delivers frames from. The two interleave
//! freely: the offset, sync flag, and reception timestamp are atomics,
//! stored with release ordering on the receive path and loaded with
//! acquire ordering everywhere, so a reader that observes the sync flag
//! also observes the reception timestamp that set it. Nothing blocks,
//! sleeps, or busy-waits.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use log::{debug, error, info};
use meshclock_proto::ClockFrame;

use crate::adjust;
use crate::clock::{self, MonotonicClock, StdClock};
use crate::error::MeshClockError;
use crate::radio::{BROADCAST_ADDR, PeerAddr, Radio, RecvCallback};
use crate::scheduler::BroadcastScheduler;
use crate::state::{self, SyncState};

/// Default nominal broadcast period (ms).
pub const DEFAULT_INTERVAL_MS: u32 = 1000;

/// Default slew fraction applied to small positive deltas.
pub const DEFAULT_SLEW_ALPHA: f64 = 0.25;

/// Default threshold (µs) above which corrections are applied whole.
pub const DEFAULT_LARGE_STEP_US: u64 = 10_000;

/// Default reception silence (ms) after which SYNCED degrades to LOST.
pub const DEFAULT_SYNC_TIMEOUT_MS: u64 = 5000;

/// Default ± randomization applied to the broadcast interval (percent).
pub const DEFAULT_JITTER_PERCENT: u8 = 10;

/// Default estimated one-way transmission delay (µs), added to outgoing
/// stamps as an advisory pre-compensation.
pub const DEFAULT_TX_DELAY_US: u64 = 1000;

/// Builder for configuring and creating a [`MeshClock`].
///
/// All knobs default to the values above; the radio is the only required
/// collaborator.
pub struct MeshClockBuilder {
    radio: Arc<dyn Radio>,
    interval_ms: u32,
    slew_alpha: f64,
    large_step_us: u64,
    sync_timeout_ms: u64,
    jitter_percent: u8,
    tx_delay_us: u64,
    clock: Option<Arc<dyn MonotonicClock>>,
}

impl MeshClockBuilder {
    fn new(radio: Arc<dyn Radio>) -> Self {
        MeshClockBuilder {
            radio,
            interval_ms: DEFAULT_INTERVAL_MS,
            slew_alpha: DEFAULT_SLEW_ALPHA,
            large_step_us: DEFAULT_LARGE_STEP_US,
            sync_timeout_ms: DEFAULT_SYNC_TIMEOUT_MS,
            jitter_percent: DEFAULT_JITTER_PERCENT,
            tx_delay_us: DEFAULT_TX_DELAY_US,
            clock: None,
        }
    }

    /// Set the nominal broadcast period in milliseconds.
    pub fn interval_ms(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Set the slew fraction applied to small positive deltas.
    pub fn slew_alpha(mut self, slew_alpha: f64) -> Self {
        self.slew_alpha = slew_alpha;
        self
    }

    /// Set the threshold above which corrections are applied whole.
    pub fn large_step_us(mut self, large_step_us: u64) -> Self {
        self.large_step_us = large_step_us;
        self
    }

    /// Set the reception silence after which SYNCED degrades to LOST.
    pub fn sync_timeout_ms(mut self, sync_timeout_ms: u64) -> Self {
        self.sync_timeout_ms = sync_timeout_ms;
        self
    }

    /// Set the ± randomization applied to the broadcast interval.
    pub fn jitter_percent(mut self, jitter_percent: u8) -> Self {
        self.jitter_percent = jitter_percent;
        self
    }

    /// Set the outgoing-stamp pre-compensation in microseconds. Zero
    /// disables it.
    pub fn tx_delay_us(mut self, tx_delay_us: u64) -> Self {
        self.tx_delay_us = tx_delay_us;
        self
    }

    /// Supply a counter other than [`StdClock`] (e.g. a hardware timer
    /// reader on an embedded host).
    pub fn clock(mut self, clock: Arc<dyn MonotonicClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the configuration and build the core.
    ///
    /// Does not touch the radio; call [`begin`](MeshClock::begin) for
    /// that.
    ///
    /// # Errors
    ///
    /// Returns [`MeshClockError::Config`] if `slew_alpha` is outside
    /// [0.0, 1.0], `jitter_percent` exceeds 100, or `interval_ms` is zero.
    pub fn build(self) -> Result<Arc<MeshClock>, MeshClockError> {
        if !self.slew_alpha.is_finite() || !(0.0..=1.0).contains(&self.slew_alpha) {
            return Err(MeshClockError::Config {
                field: "slew_alpha",
                reason: "must be within [0.0, 1.0]",
            });
        }
        if self.jitter_percent > 100 {
            return Err(MeshClockError::Config {
                field: "jitter_percent",
                reason: "must be within [0, 100]",
            });
        }
        if self.interval_ms == 0 {
            return Err(MeshClockError::Config {
                field: "interval_ms",
                reason: "must be nonzero",
            });
        }
        Ok(Arc::new_cyclic(|self_ref| MeshClock {
            slew_alpha: self.slew_alpha,
            large_step_us: self.large_step_us,
            sync_timeout_ms: self.sync_timeout_ms,
            tx_delay_us: self.tx_delay_us,
            clock: self.clock.unwrap_or_else(|| Arc::new(StdClock::new())),
            radio: self.radio,
            scheduler: BroadcastScheduler::new(self.interval_ms, self.jitter_percent),
            offset_us: AtomicI64::new(0),
            synced: AtomicBool::new(false),
            last_sync_ms: AtomicU64::new(0),
            user_callback: RwLock::new(None),
            self_ref: self_ref.clone(),
        }))
    }
}

/// A master-less mesh time synchronization core.
///
/// Mesh time is `counter + offset`, where the offset only ever moves
/// forward. One instance per radio; see the crate docs for the drive
/// model.
pub struct MeshClock {
    slew_alpha: f64,
    large_step_us: u64,
    sync_timeout_ms: u64,
    tx_delay_us: u64,
    clock: Arc<dyn MonotonicClock>,
    radio: Arc<dyn Radio>,
    scheduler: BroadcastScheduler,
    offset_us: AtomicI64,
    synced: AtomicBool,
    last_sync_ms: AtomicU64,
    user_callback: RwLock<Option<RecvCallback>>,
    /// Handle to self for the owning-mode radio callback; set at
    /// construction via `Arc::new_cyclic`.
    self_ref: Weak<MeshClock>,
}

impl MeshClock {
    /// Create a builder around the given radio transport.
    pub fn builder(radio: Arc<dyn Radio>) -> MeshClockBuilder {
        MeshClockBuilder::new(radio)
    }

    /// Initialize the radio and join the mesh.
    ///
    /// With `register_callback` the core installs itself as the radio's
    /// receive callback (owning mode); host traffic then arrives through
    /// [`set_user_callback`](MeshClock::set_user_callback). Without it,
    /// the host owns the radio callback and feeds frames to
    /// [`handle_frame`](MeshClock::handle_frame) itself (delegated mode).
    ///
    /// # Errors
    ///
    /// Radio initialization failure is fatal — the core has no useful
    /// function without the radio. The recommended response is to log and
    /// restart the process.
    pub fn begin(&self, register_callback: bool) -> Result<(), MeshClockError> {
        if !clock::counter_advances(self.clock.as_ref()) {
            error!("monotonic counter is not advancing; mesh time will not move");
        }
        self.radio.init()?;
        if register_callback
            && let Some(core) = self.self_ref.upgrade()
        {
            self.radio.set_recv_callback(Box::new(move |src, data| {
                core.handle_frame(src, data);
            }))?;
        }
        self.radio.add_broadcast_peer(BROADCAST_ADDR)?;
        info!(
            "mesh clock started (interval {} ms)",
            self.scheduler.interval_ms()
        );
        Ok(())
    }

    /// Current mesh time in microseconds.
    ///
    /// Safe to call from the receive path.
    pub fn mesh_now_us(&self) -> u64 {
        self.clock
            .now_us()
            .wrapping_add(self.offset_us.load(Ordering::Acquire) as u64)
    }

    /// Low 32 bits of the current mesh time in milliseconds.
    ///
    /// The narrowing is deliberate for callers doing phase math; use
    /// modular (wrapping) subtraction on the result.
    pub fn mesh_now_ms(&self) -> u32 {
        (self.mesh_now_us() / 1000) as u32
    }

    /// The node's current synchronization state, derived on demand.
    pub fn sync_state(&self) -> SyncState {
        state::derive(
            self.synced.load(Ordering::Acquire),
            self.last_sync_ms.load(Ordering::Acquire),
            self.clock.now_ms(),
            self.sync_timeout_ms,
        )
    }

    /// The current offset added to the counter to obtain mesh time.
    pub fn offset_us(&self) -> i64 {
        self.offset_us.load(Ordering::Acquire)
    }

    /// Drive the broadcast scheduler once.
    ///
    /// Emits at most one broadcast; non-blocking and cheap when none is
    /// due. Call this from the host's periodic loop.
    pub fn tick(&self) {
        if self.scheduler.poll(self.clock.now_ms()) {
            self.broadcast();
        }
    }

    /// Process one received datagram.
    ///
    /// Returns true iff it was a valid clock frame. Anything else is
    /// forwarded verbatim to the user callback, if one is installed, and
    /// otherwise dropped silently — non-clock traffic is expected on a
    /// shared medium.
    pub fn handle_frame(&self, src: PeerAddr, data: &[u8]) -> bool {
        match ClockFrame::decode(data) {
            Ok(frame) => {
                self.adjust(frame.timestamp_us);
                true
            }
            Err(_) => {
                let guard = self
                    .user_callback
                    .read()
                    .unwrap_or_else(PoisonError::into_inner);
                if let Some(callback) = guard.as_ref() {
                    callback(src, data);
                }
                false
            }
        }
    }

    /// Install the host's handler for non-clock frames (owning mode).
    pub fn set_user_callback(&self, callback: RecvCallback) {
        *self
            .user_callback
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(callback);
    }

    /// Pull the clock toward a received remote stamp.
    fn adjust(&self, remote_us: u64) {
        let local_us = self.mesh_now_us();
        let delta_us = remote_us.wrapping_sub(local_us) as i64;

        // Reception recency is tracked even when no adjustment results.
        self.last_sync_ms.store(self.clock.now_ms(), Ordering::Release);

        let adjustment = adjust::compute(
            delta_us,
            self.synced.load(Ordering::Acquire),
            self.slew_alpha,
            self.large_step_us,
        );
        if adjustment.advance_us > 0 {
            self.offset_us
                .fetch_add(adjustment.advance_us as i64, Ordering::AcqRel);
        }
        if adjustment.discontinuous {
            self.synced.store(true, Ordering::Release);
            debug!(
                "sync: stepped clock, offset now {} us (delta {} us)",
                self.offset_us.load(Ordering::Acquire),
                delta_us
            );
        } else if adjustment.advance_us > 0 {
            debug!(
                "sync: slewed clock by {} us (delta {} us)",
                adjustment.advance_us, delta_us
            );
        }
    }

    /// Emit one broadcast carrying the pre-compensated mesh time.
    fn broadcast(&self) {
        let stamp_us = self.mesh_now_us().wrapping_add(self.tx_delay_us);
        let frame = ClockFrame::new(stamp_us).encode();
        match self.radio.send(BROADCAST_ADDR, &frame) {
            Ok(()) => debug!("broadcast: sent mesh time {} us", stamp_us),
            // Best-effort medium: the next scheduled broadcast retries
            // naturally.
            Err(e) => debug!("broadcast dropped: {}", e),
        }
    }
}
