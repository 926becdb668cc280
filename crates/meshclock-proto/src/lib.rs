// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Wire-format types and codec for the mesh clock broadcast protocol.
//!
//! A mesh clock datagram is a fixed 10-byte frame: a 3-byte `MCK` magic
//! header followed by a 56-bit little-endian microsecond timestamp. This
//! crate provides the frame type, its codec, and nothing else — it has no
//! dependency on the radio layer or the clock core and is usable from
//! `no_std` environments.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

/// Custom error types for buffer-based frame parsing and serialization.
pub mod error;

/// The mesh clock frame type, codec constants, and codec implementations.
pub mod frame;

/// Traits for reading and writing protocol types to and from bytes.
pub mod traits;

pub use self::error::FrameError;
pub use self::frame::{ClockFrame, MAGIC, TIMESTAMP_MASK};
pub use self::traits::*;
