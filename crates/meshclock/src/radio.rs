// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The radio seam: addressing, the transport trait, and its error type.
//!
//! The underlying radio layer is out of scope for the core; this module
//! specifies only the interface the core consumes. A transport delivers
//! short best-effort datagrams to a group-broadcast address, exposes one
//! receive callback per process, and makes no delivery or ordering
//! guarantees.

use std::fmt;
use std::io;

/// A link-layer peer address (six bytes, MAC-style).
pub type PeerAddr = [u8; 6];

/// The pre-agreed group broadcast address: the all-ones MAC.
pub const BROADCAST_ADDR: PeerAddr = [0xFF; 6];

/// A receive handler: source address plus the raw datagram bytes.
///
/// Invoked in whatever execution context the radio layer provides, which
/// may be another thread or (on embedded hosts) an interrupt.
pub type RecvCallback = Box<dyn Fn(PeerAddr, &[u8]) + Send + Sync>;

/// The transport contract the core drives.
pub trait Radio: Send + Sync {
    /// Bring up the radio subsystem. Called once from `begin`.
    fn init(&self) -> Result<(), RadioError>;

    /// Register the group broadcast address as an unencrypted peer on the
    /// default channel. Must be idempotent: registering an address that is
    /// already a peer is a no-op, not an error.
    fn add_broadcast_peer(&self, addr: PeerAddr) -> Result<(), RadioError>;

    /// Send one datagram, best-effort. Called from the tick context only.
    fn send(&self, dest: PeerAddr, frame: &[u8]) -> Result<(), RadioError>;

    /// Install the process-wide receive callback, replacing any previous
    /// one.
    fn set_recv_callback(&self, callback: RecvCallback) -> Result<(), RadioError>;
}

/// Errors surfaced by a [`Radio`] implementation.
#[derive(Debug)]
pub enum RadioError {
    /// The radio subsystem failed to initialize. Fatal: the core has no
    /// useful function without the radio.
    Init(io::Error),
    /// An outgoing frame was rejected. Transient: the next scheduled
    /// broadcast takes the place of the lost one.
    Send(io::Error),
    /// The receive callback could not be installed.
    Callback(io::Error),
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadioError::Init(e) => write!(f, "radio init failed: {}", e),
            RadioError::Send(e) => write!(f, "radio send failed: {}", e),
            RadioError::Callback(e) => write!(f, "radio callback install failed: {}", e),
        }
    }
}

impl std::error::Error for RadioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RadioError::Init(e) | RadioError::Send(e) | RadioError::Callback(e) => Some(e),
        }
    }
}
