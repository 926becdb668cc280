// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the clock frame codec.

use meshclock_proto::frame::TIMESTAMP_BYTES;
use meshclock_proto::{ClockFrame, ConstPackedSizeBytes, FrameError, MAGIC, TIMESTAMP_MASK};

#[test]
fn test_frame_is_ten_bytes() {
    assert_eq!(ClockFrame::PACKED_SIZE_BYTES, 10);
    assert_eq!(ClockFrame::PACKED_SIZE_BYTES, MAGIC.len() + TIMESTAMP_BYTES);
}

#[test]
fn test_magic_is_mck() {
    assert_eq!(MAGIC, [0x4D, 0x43, 0x4B]);
}

#[test]
fn test_known_vector() {
    // 2 100 000 µs = 0x200B20, little-endian in the 7-byte field.
    let frame = ClockFrame::new(2_100_000);
    assert_eq!(
        frame.encode(),
        [0x4D, 0x43, 0x4B, 0x20, 0x0B, 0x20, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn test_decode_arbitrary_nonframe_traffic() {
    // Typical host-protocol datagrams sharing the medium.
    assert!(matches!(
        ClockFrame::decode(b"hello, mesh!"),
        Err(FrameError::BadLength { .. })
    ));
    assert!(matches!(
        ClockFrame::decode(&[0u8; 10]),
        Err(FrameError::BadMagic { .. })
    ));
    assert!(matches!(
        ClockFrame::decode(&[0u8; 250]),
        Err(FrameError::BadLength { .. })
    ));
}

#[test]
fn test_max_representable_stamp() {
    let frame = ClockFrame::new(TIMESTAMP_MASK);
    let parsed = ClockFrame::decode(&frame.encode()).unwrap();
    assert_eq!(parsed.timestamp_us, TIMESTAMP_MASK);
}

#[test]
fn test_wraparound_stamp_truncates() {
    let frame = ClockFrame::new(TIMESTAMP_MASK + 1);
    assert_eq!(frame.timestamp_us, 0);
}
