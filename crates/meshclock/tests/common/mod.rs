// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared test fixtures: a manually-driven counter and a recording radio.

// Each tests/*.rs binary compiles its own copy of this module and not
// every binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use meshclock::{MonotonicClock, PeerAddr, Radio, RadioError, RecvCallback};

/// A counter advanced explicitly by the test.
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub fn new(start_us: u64) -> Arc<Self> {
        Arc::new(ManualClock(AtomicU64::new(start_us)))
    }

    pub fn advance_us(&self, by: u64) {
        self.0.fetch_add(by, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, by: u64) {
        self.advance_us(by * 1000);
    }

}

impl MonotonicClock for ManualClock {
    fn now_us(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// A radio that records outgoing frames and lets the test deliver
/// incoming ones through the installed callback.
#[derive(Default)]
pub struct MockRadio {
    sent: Mutex<Vec<(PeerAddr, Vec<u8>)>>,
    callback: Mutex<Option<RecvCallback>>,
}

impl MockRadio {
    pub fn new() -> Arc<Self> {
        Arc::new(MockRadio::default())
    }

    /// Frames sent so far, oldest first.
    pub fn sent(&self) -> Vec<(PeerAddr, Vec<u8>)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// True if an owning-mode callback was installed via `begin(true)`.
    pub fn has_callback(&self) -> bool {
        self.callback.lock().unwrap().is_some()
    }

    /// Deliver a datagram as if it arrived over the air.
    pub fn deliver(&self, src: PeerAddr, data: &[u8]) {
        let guard = self.callback.lock().unwrap();
        let callback = guard.as_ref().expect("no receive callback installed");
        callback(src, data);
    }
}

impl Radio for MockRadio {
    fn init(&self) -> Result<(), RadioError> {
        Ok(())
    }

    fn add_broadcast_peer(&self, _addr: PeerAddr) -> Result<(), RadioError> {
        Ok(())
    }

    fn send(&self, dest: PeerAddr, frame: &[u8]) -> Result<(), RadioError> {
        self.sent.lock().unwrap().push((dest, frame.to_vec()));
        Ok(())
    }

    fn set_recv_callback(&self, callback: RecvCallback) -> Result<(), RadioError> {
        *self.callback.lock().unwrap() = Some(callback);
        Ok(())
    }
}
