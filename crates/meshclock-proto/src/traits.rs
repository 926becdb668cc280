// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Traits for reading and writing mesh clock protocol types to and from bytes.
//!
//! Two families are provided. The slice-based [`FromBytes`] / [`ToBytes`]
//! traits operate directly on `&[u8]` and are suitable for `no_std`
//! environments and for datagram discrimination (where the caller holds a
//! complete received buffer). The io-based [`ReadFromBytes`] /
//! [`WriteToBytes`] traits extend the `byteorder` reader/writer extension
//! traits and require the `std` feature.

#[cfg(feature = "std")]
use byteorder::{ReadBytesExt, WriteBytesExt};
#[cfg(feature = "std")]
use std::io;

use crate::error::FrameError;

/// A trait for writing any of the mesh clock protocol types to bytes.
///
/// A blanket implementation is provided for all types that implement
/// `byteorder::WriteBytesExt`. Requires the `std` feature.
#[cfg(feature = "std")]
pub trait WriteBytes {
    /// Writes a mesh clock protocol type to this writer.
    fn write_bytes<P: WriteToBytes>(&mut self, protocol: P) -> io::Result<()>;
}

/// A trait for reading any of the mesh clock protocol types from bytes.
///
/// A blanket implementation is provided for all types that implement
/// `byteorder::ReadBytesExt`. Requires the `std` feature.
#[cfg(feature = "std")]
pub trait ReadBytes {
    /// Reads a mesh clock protocol type from this reader.
    fn read_bytes<P: ReadFromBytes>(&mut self) -> io::Result<P>;
}

/// Mesh clock protocol types that may be written to bytes.
/// Requires the `std` feature.
#[cfg(feature = "std")]
pub trait WriteToBytes {
    /// Write the value to the given writer.
    fn write_to_bytes<W: WriteBytesExt>(&self, writer: W) -> io::Result<()>;
}

/// Mesh clock protocol types that may be read from bytes.
/// Requires the `std` feature.
#[cfg(feature = "std")]
pub trait ReadFromBytes: Sized {
    /// Read the value from the given reader.
    fn read_from_bytes<R: ReadBytesExt>(reader: R) -> io::Result<Self>;
}

/// Types that have a constant size when packed for transmission.
pub trait ConstPackedSizeBytes {
    /// The constant size in bytes when this type is packed for transmission.
    const PACKED_SIZE_BYTES: usize;
}

/// Parse a type from a byte slice.
///
/// Unlike [`ReadFromBytes`], this trait does not require `std::io`. It
/// operates directly on `&[u8]` slices, making it suitable for `no_std`
/// environments and for the receive-path discriminator, which must judge a
/// complete datagram (including its length) rather than a stream prefix.
pub trait FromBytes: Sized {
    /// Parse from the given byte slice.
    fn from_bytes(buf: &[u8]) -> Result<Self, FrameError>;
}

/// Serialize a type into a byte slice.
///
/// Unlike [`WriteToBytes`], this trait does not require `std::io` and is
/// usable from `no_std` environments.
pub trait ToBytes {
    /// Write this value into the given byte slice. Returns the number of
    /// bytes written. Fails with [`FrameError::BadLength`] if `buf` is too
    /// short.
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, FrameError>;
}
