// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Custom error types for buffer-based frame parsing and serialization.
//!
//! [`FrameError`] is `no_std`-compatible and uses no heap allocation. When
//! the `std` feature is enabled it also implements [`std::error::Error`]
//! and can be converted to [`std::io::Error`].
//!
//! On a shared broadcast medium every datagram that is not a clock frame
//! lands here, so these errors are expected in normal operation and carry
//! just enough detail for trace-level diagnostics.

use core::fmt;

/// Errors that can occur when parsing or serializing a mesh clock frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameError {
    /// The buffer is not exactly one clock frame long.
    BadLength {
        /// Number of bytes required for a clock frame.
        needed: usize,
        /// Number of bytes in the buffer.
        available: usize,
    },
    /// The magic header does not match `MCK`.
    BadMagic {
        /// The three bytes found where the magic header was expected.
        found: [u8; 3],
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::BadLength { needed, available } => {
                write!(
                    f,
                    "not a clock frame: expected {} bytes, got {}",
                    needed, available
                )
            }
            FrameError::BadMagic { found } => {
                write!(
                    f,
                    "not a clock frame: bad magic {:02x} {:02x} {:02x}",
                    found[0], found[1], found[2]
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<FrameError> for std::io::Error {
    fn from(err: FrameError) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::InvalidData, err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}
