// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The mesh clock frame type and its codec.
//!
//! ### Layout
//!
//! ```ignore
//!  offset 0..3   magic = 0x4D 0x43 0x4B ("MCK")
//!  offset 3..10  timestamp, 56-bit unsigned little-endian microseconds
//! ```
//!
//! The 56-bit field holds the low 56 bits of the 64-bit mesh microsecond
//! value. Mesh time starts near zero, so natural wrap at 2^56 µs (≈ 2283
//! years) is ignored. Decoding zero-extends — the top 8 bits of the
//! reassembled `u64` are always zero, never sign-extended.

use core::fmt;

use crate::error::FrameError;
use crate::traits::{ConstPackedSizeBytes, FromBytes, ToBytes};

/// Magic header identifying a mesh clock frame: `"MCK"`.
pub const MAGIC: [u8; 3] = *b"MCK";

/// Number of bytes in the packed timestamp field.
pub const TIMESTAMP_BYTES: usize = 7;

/// Mask selecting the 56 timestamp bits carried on the wire.
pub const TIMESTAMP_MASK: u64 = (1 << 56) - 1;

/// A mesh clock broadcast frame carrying one mesh timestamp.
///
/// Constructed via [`ClockFrame::new`], which masks the stamp to the 56
/// bits representable on the wire.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ClockFrame {
    /// The advertised mesh time in microseconds. Always < 2^56.
    pub timestamp_us: u64,
}

impl ConstPackedSizeBytes for ClockFrame {
    const PACKED_SIZE_BYTES: usize = 3 + TIMESTAMP_BYTES;
}

impl ClockFrame {
    /// Create a frame for the given mesh timestamp.
    ///
    /// The top 8 bits of `timestamp_us` are silently truncated; they are
    /// zero for any mesh time reachable within the lifetime of a system
    /// whose counter starts near zero.
    pub fn new(timestamp_us: u64) -> Self {
        ClockFrame {
            timestamp_us: timestamp_us & TIMESTAMP_MASK,
        }
    }

    /// Serialize this frame into a fixed 10-byte array.
    pub fn encode(&self) -> [u8; Self::PACKED_SIZE_BYTES] {
        let mut buf = [0u8; Self::PACKED_SIZE_BYTES];
        buf[..3].copy_from_slice(&MAGIC);
        for (i, byte) in buf[3..].iter_mut().enumerate() {
            *byte = (self.timestamp_us >> (i * 8)) as u8;
        }
        buf
    }

    /// Parse a received datagram as a clock frame.
    ///
    /// Fails with [`FrameError::BadLength`] unless the buffer is exactly
    /// 10 bytes, and with [`FrameError::BadMagic`] unless it starts with
    /// `MCK`. Any failure means the datagram belongs to some other
    /// protocol sharing the medium.
    pub fn decode(buf: &[u8]) -> Result<Self, FrameError> {
        Self::from_bytes(buf)
    }
}

impl fmt::Display for ClockFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clock frame @ {} us", self.timestamp_us)
    }
}

impl FromBytes for ClockFrame {
    fn from_bytes(buf: &[u8]) -> Result<Self, FrameError> {
        if buf.len() != Self::PACKED_SIZE_BYTES {
            return Err(FrameError::BadLength {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        if buf[..3] != MAGIC {
            return Err(FrameError::BadMagic {
                found: [buf[0], buf[1], buf[2]],
            });
        }
        let mut timestamp_us = 0u64;
        for (i, &byte) in buf[3..].iter().enumerate() {
            timestamp_us |= (byte as u64) << (i * 8);
        }
        Ok(ClockFrame { timestamp_us })
    }
}

impl ToBytes for ClockFrame {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(FrameError::BadLength {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        buf[..Self::PACKED_SIZE_BYTES].copy_from_slice(&self.encode());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

#[cfg(feature = "std")]
mod io {
    use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
    use std::io;

    use super::{ClockFrame, MAGIC, TIMESTAMP_BYTES, TIMESTAMP_MASK};
    use crate::error::FrameError;
    use crate::traits::{ReadBytes, ReadFromBytes, WriteBytes, WriteToBytes};

    impl<W> WriteBytes for W
    where
        W: WriteBytesExt,
    {
        fn write_bytes<P: WriteToBytes>(&mut self, protocol: P) -> io::Result<()> {
            protocol.write_to_bytes(self)
        }
    }

    impl<R> ReadBytes for R
    where
        R: ReadBytesExt,
    {
        fn read_bytes<P: ReadFromBytes>(&mut self) -> io::Result<P> {
            P::read_from_bytes(self)
        }
    }

    impl<P> WriteToBytes for &P
    where
        P: WriteToBytes,
    {
        fn write_to_bytes<W: WriteBytesExt>(&self, writer: W) -> io::Result<()> {
            (*self).write_to_bytes(writer)
        }
    }

    impl WriteToBytes for ClockFrame {
        fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
            writer.write_all(&MAGIC)?;
            writer.write_uint::<LittleEndian>(
                self.timestamp_us & TIMESTAMP_MASK,
                TIMESTAMP_BYTES,
            )?;
            Ok(())
        }
    }

    impl ReadFromBytes for ClockFrame {
        fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
            let mut magic = [0u8; 3];
            reader.read_exact(&mut magic)?;
            if magic != MAGIC {
                return Err(FrameError::BadMagic { found: magic }.into());
            }
            let timestamp_us = reader.read_uint::<LittleEndian>(TIMESTAMP_BYTES)?;
            Ok(ClockFrame { timestamp_us })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let frame = ClockFrame::new(0x0102_0304_0506);
        let buf = frame.encode();
        assert_eq!(&buf[..3], b"MCK");
        // Little-endian: low byte first.
        assert_eq!(&buf[3..], &[0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0x00]);
    }

    #[test]
    fn test_decode_literal() {
        let buf = [0x4D, 0x43, 0x4B, 0x40, 0x42, 0x0F, 0x00, 0x00, 0x00, 0x00];
        let frame = ClockFrame::decode(&buf).unwrap();
        assert_eq!(frame.timestamp_us, 1_000_000);
    }

    #[test]
    fn test_roundtrip() {
        let frame = ClockFrame::new(2_100_000);
        let parsed = ClockFrame::decode(&frame.encode()).unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn test_new_truncates_top_bits() {
        let frame = ClockFrame::new(u64::MAX);
        assert_eq!(frame.timestamp_us, TIMESTAMP_MASK);
    }

    #[test]
    fn test_encode_truncates_top_bits() {
        // A raw struct with dirty top bits still encodes only the low 56.
        let frame = ClockFrame {
            timestamp_us: 0xAB00_0000_0000_0001,
        };
        let parsed = ClockFrame::decode(&frame.encode()).unwrap();
        assert_eq!(parsed.timestamp_us, 0xAB00_0000_0000_0001 & TIMESTAMP_MASK);
    }

    #[test]
    fn test_decode_zero_extends() {
        // High stamp byte 0xFF must not sign-extend into the top 8 bits.
        let mut buf = ClockFrame::new(TIMESTAMP_MASK).encode();
        assert_eq!(buf[9], 0xFF);
        let frame = ClockFrame::decode(&buf).unwrap();
        assert_eq!(frame.timestamp_us >> 56, 0);

        buf[9] = 0x80;
        let frame = ClockFrame::decode(&buf).unwrap();
        assert_eq!(frame.timestamp_us >> 56, 0);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let frame = ClockFrame::new(42);
        let buf = frame.encode();
        assert!(matches!(
            ClockFrame::decode(&buf[..9]),
            Err(FrameError::BadLength {
                needed: 10,
                available: 9
            })
        ));

        let mut long = [0u8; 32];
        long[..10].copy_from_slice(&buf);
        assert!(matches!(
            ClockFrame::decode(&long),
            Err(FrameError::BadLength { .. })
        ));

        assert!(matches!(
            ClockFrame::decode(&[]),
            Err(FrameError::BadLength { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let mut buf = ClockFrame::new(42).encode();
        buf[2] = b'X';
        assert!(matches!(
            ClockFrame::decode(&buf),
            Err(FrameError::BadMagic {
                found: [0x4D, 0x43, b'X']
            })
        ));
    }

    #[test]
    fn test_to_bytes_into_larger_buffer() {
        let frame = ClockFrame::new(7);
        let mut buf = [0u8; 16];
        let written = frame.to_bytes(&mut buf).unwrap();
        assert_eq!(written, ClockFrame::PACKED_SIZE_BYTES);
        assert_eq!(ClockFrame::decode(&buf[..written]).unwrap(), frame);
    }

    #[test]
    fn test_to_bytes_short_buffer() {
        let frame = ClockFrame::new(7);
        let mut buf = [0u8; 9];
        assert!(matches!(
            frame.to_bytes(&mut buf),
            Err(FrameError::BadLength { .. })
        ));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_io_roundtrip() {
        use crate::traits::{ReadBytes, WriteBytes};

        let frame = ClockFrame::new(123_456_789);
        let mut buf = [0u8; ClockFrame::PACKED_SIZE_BYTES];
        (&mut buf[..]).write_bytes(frame).unwrap();
        let parsed: ClockFrame = (&buf[..]).read_bytes().unwrap();
        assert_eq!(parsed, frame);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_io_read_rejects_bad_magic() {
        let mut buf = ClockFrame::new(1).encode();
        buf[0] = 0;
        let result: std::io::Result<ClockFrame> = {
            use crate::traits::ReadBytes;
            (&buf[..]).read_bytes()
        };
        let err = result.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_display() {
        let frame = ClockFrame::new(5);
        assert_eq!(frame.to_string(), "clock frame @ 5 us");
    }
}
