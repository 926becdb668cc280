// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for configuration and radio failures.
//!
//! Everything that can go wrong during normal operation — malformed
//! frames, stale sync, dropped broadcasts — is deliberately not an error:
//! malformed frames are expected host traffic, sync loss is a first-class
//! [`SyncState`](crate::SyncState) value, and send failures are logged and
//! absorbed by the next scheduled broadcast.

use std::fmt;

use crate::radio::RadioError;

/// Errors surfaced by [`MeshClock`](crate::MeshClock) construction and
/// startup.
#[derive(Debug)]
pub enum MeshClockError {
    /// A configuration value is out of its documented range.
    Config {
        /// Name of the offending configuration field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// The radio layer failed; fatal when raised from `begin`.
    Radio(RadioError),
}

impl fmt::Display for MeshClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshClockError::Config { field, reason } => {
                write!(f, "invalid configuration: {}: {}", field, reason)
            }
            MeshClockError::Radio(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MeshClockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshClockError::Config { .. } => None,
            MeshClockError::Radio(e) => Some(e),
        }
    }
}

impl From<RadioError> for MeshClockError {
    fn from(err: RadioError) -> Self {
        MeshClockError::Radio(err)
    }
}
