//! Tests for the record codec
//!
//! These tests verify:
//! - Exact byte layout of an encoded frame (u32 little-endian header)
//! - Decoding reproduces timestamp, key and value exactly
//! - Header-only decoding
//! - Malformed input (short header, short body)

use caskdb::record::{decode_header, decode_kv, encode, Header, Record, HEADER_SIZE};
use caskdb::CaskError;

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_header_size_is_twelve() {
    assert_eq!(HEADER_SIZE, 12);
}

#[test]
fn test_encode_layout() {
    let (size, bytes) = encode(0x0102_0304, b"ab", b"xyz").unwrap();

    assert_eq!(size, 17);
    assert_eq!(bytes.len(), 17);
    assert_eq!(
        &bytes[..],
        &[
            0x04, 0x03, 0x02, 0x01, // timestamp
            2, 0, 0, 0, // key size
            3, 0, 0, 0, // value size
            b'a', b'b', b'x', b'y', b'z',
        ][..]
    );
}

#[test]
fn test_encode_empty_key_and_value() {
    let (size, bytes) = encode(7, b"", b"").unwrap();

    assert_eq!(size as usize, HEADER_SIZE);
    assert_eq!(bytes.len(), HEADER_SIZE);

    let record = decode_kv(&bytes).unwrap();
    assert_eq!(record.timestamp, 7);
    assert!(record.key.is_empty());
    assert!(record.value.is_empty());
}

// =============================================================================
// Decode Tests
// =============================================================================

#[test]
fn test_decode_kv_reproduces_fields() {
    let (_, bytes) = encode(1_700_000_000, b"othello", b"shakespeare").unwrap();
    let record = decode_kv(&bytes).unwrap();

    assert_eq!(
        record,
        Record {
            timestamp: 1_700_000_000,
            key: b"othello".to_vec(),
            value: b"shakespeare".to_vec(),
        }
    );
}

#[test]
fn test_decode_kv_binary_bytes() {
    let key = vec![0u8, 0xFF, 0x00, 0x7F, b'\n'];
    let value: Vec<u8> = (0..=255).collect();

    let (_, bytes) = encode(3, &key, &value).unwrap();
    let record = decode_kv(&bytes).unwrap();

    assert_eq!(record.key, key);
    assert_eq!(record.value, value);
}

#[test]
fn test_timestamp_preserved() {
    for ts in [0, 1, u32::MAX, 1_234_567_890] {
        let (_, bytes) = encode(ts, b"k", b"v").unwrap();
        assert_eq!(decode_kv(&bytes).unwrap().timestamp, ts);
    }
}

#[test]
fn test_decode_header() {
    let (_, bytes) = encode(99, b"key", b"value!").unwrap();
    let header = decode_header(&bytes).unwrap();

    assert_eq!(
        header,
        Header {
            timestamp: 99,
            key_size: 3,
            value_size: 6,
        }
    );
    assert_eq!(header.record_size(), bytes.len() as u64);
}

#[test]
fn test_decode_kv_ignores_trailing_bytes() {
    let (_, bytes) = encode(1, b"k", b"v").unwrap();
    let mut padded = bytes.to_vec();
    padded.extend_from_slice(b"next record");

    let record = decode_kv(&padded).unwrap();
    assert_eq!(record.key, b"k");
    assert_eq!(record.value, b"v");
}

#[test]
fn test_large_value() {
    let large_value = vec![0xAB; 1024 * 1024]; // 1 MB value
    let (size, bytes) = encode(1, b"big_key", &large_value).unwrap();

    assert_eq!(size as usize, HEADER_SIZE + 7 + large_value.len());
    assert_eq!(decode_kv(&bytes).unwrap().value, large_value);
}

// =============================================================================
// Malformed Input Tests
// =============================================================================

#[test]
fn test_header_too_small() {
    let bytes = [0u8; 11];
    let result = decode_header(&bytes);

    assert!(matches!(result, Err(CaskError::MalformedHeader { len: 11 })));
}

#[test]
fn test_empty_buffer() {
    let result = decode_kv(&[]);

    assert!(matches!(result, Err(CaskError::MalformedHeader { len: 0 })));
}

#[test]
fn test_truncated_body() {
    let (_, bytes) = encode(1, b"key", b"value").unwrap();
    let truncated = &bytes[..bytes.len() - 2];

    let result = decode_kv(truncated);
    assert!(matches!(
        result,
        Err(CaskError::MalformedRecord {
            expected: 20,
            actual: 18
        })
    ));
}

#[test]
fn test_malformed_errors_are_not_fatal() {
    let err = decode_header(&[1, 2, 3]).unwrap_err();
    assert!(!err.is_fatal());
}
