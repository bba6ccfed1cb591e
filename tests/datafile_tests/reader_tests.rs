//! Tests for the sequential LogReader
//!
//! These tests verify:
//! - Reading records back in write order with their positions
//! - Clean end-of-file
//! - Torn tails: short header, short key, short value
//! - Garbage sizes do not abort the scan

use std::io::Cursor;

use caskdb::datafile::LogReader;
use caskdb::record::encode;

// =============================================================================
// Helper Functions
// =============================================================================

fn frames(records: &[(&[u8], &[u8])]) -> Vec<u8> {
    let mut buf = Vec::new();
    for (i, (key, value)) in records.iter().enumerate() {
        let (_, bytes) = encode(i as u32, key, value).unwrap();
        buf.extend_from_slice(&bytes);
    }
    buf
}

// =============================================================================
// Clean File Tests
// =============================================================================

#[test]
fn test_empty_input() {
    let mut reader = LogReader::new(Cursor::new(Vec::new()));

    assert!(reader.next_record().unwrap().is_none());
    assert_eq!(reader.offset(), 0);
    assert!(!reader.hit_torn_tail());
}

#[test]
fn test_reads_records_in_order() {
    let data = frames(&[(b"a", b"1"), (b"bb", b"22"), (b"a", b"333")]);
    let mut reader = LogReader::new(Cursor::new(data.clone()));

    let first = reader.next_record().unwrap().unwrap();
    assert_eq!(first.position, 0);
    assert_eq!(first.total_size, 14);
    assert_eq!(first.record.key, b"a");
    assert_eq!(first.record.value, b"1");
    assert_eq!(first.record.timestamp, 0);

    let second = reader.next_record().unwrap().unwrap();
    assert_eq!(second.position, 14);
    assert_eq!(second.total_size, 16);

    let third = reader.next_record().unwrap().unwrap();
    assert_eq!(third.position, 30);
    assert_eq!(third.record.value, b"333");

    assert!(reader.next_record().unwrap().is_none());
    assert_eq!(reader.offset(), data.len() as u64);
    assert!(!reader.hit_torn_tail());
}

#[test]
fn test_iterator_yields_all_records() {
    let data = frames(&[(b"k1", b"v1"), (b"k2", b"v2"), (b"k3", b"v3")]);
    let reader = LogReader::new(data.as_slice());

    let keys: Vec<Vec<u8>> = reader.map(|r| r.unwrap().record.key).collect();
    assert_eq!(keys, vec![b"k1".to_vec(), b"k2".to_vec(), b"k3".to_vec()]);
}

#[test]
fn test_empty_key_and_value_records() {
    let data = frames(&[(b"", b""), (b"", b"x")]);
    let mut reader = LogReader::new(data.as_slice());

    let first = reader.next_record().unwrap().unwrap();
    assert_eq!(first.total_size, 12);
    let second = reader.next_record().unwrap().unwrap();
    assert_eq!(second.position, 12);
    assert_eq!(second.record.value, b"x");
    assert!(reader.next_record().unwrap().is_none());
    assert!(!reader.hit_torn_tail());
}

// =============================================================================
// Torn Tail Tests
// =============================================================================

#[test]
fn test_short_header_is_torn_tail() {
    let mut data = frames(&[(b"a", b"1")]);
    let complete = data.len() as u64;
    data.extend_from_slice(&[1, 2, 3, 4, 5]);

    let mut reader = LogReader::new(data.as_slice());
    assert!(reader.next_record().unwrap().is_some());
    assert!(reader.next_record().unwrap().is_none());

    assert!(reader.hit_torn_tail());
    assert_eq!(reader.offset(), complete);
}

#[test]
fn test_truncated_key_is_torn_tail() {
    let mut data = frames(&[(b"a", b"1")]);
    let complete = data.len();
    let (_, next) = encode(5, b"long-key", b"value").unwrap();
    data.extend_from_slice(&next[..12 + 3]);

    let mut reader = LogReader::new(data.as_slice());
    assert!(reader.next_record().unwrap().is_some());
    assert!(reader.next_record().unwrap().is_none());

    assert!(reader.hit_torn_tail());
    assert_eq!(reader.offset(), complete as u64);
}

#[test]
fn test_truncated_value_is_torn_tail() {
    let mut data = frames(&[(b"a", b"1")]);
    let (_, next) = encode(5, b"key", b"value").unwrap();
    data.extend_from_slice(&next[..next.len() - 1]);

    let reader = LogReader::new(data.as_slice());
    let records: Vec<_> = reader.map(|r| r.unwrap()).collect();

    assert_eq!(records.len(), 1);
}

#[test]
fn test_header_only_with_missing_body_is_torn_tail() {
    let (_, next) = encode(5, b"key", b"value").unwrap();
    let data = next[..12].to_vec();

    let mut reader = LogReader::new(data.as_slice());
    assert!(reader.next_record().unwrap().is_none());
    assert!(reader.hit_torn_tail());
    assert_eq!(reader.offset(), 0);
}

#[test]
fn test_garbage_sizes_are_torn_tail() {
    let mut data = frames(&[(b"a", b"1")]);
    // Header claiming ~8 GB of key and value
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&u32::MAX.to_le_bytes());
    data.extend_from_slice(&u32::MAX.to_le_bytes());
    data.extend_from_slice(b"junk");

    let mut reader = LogReader::new(data.as_slice());
    assert!(reader.next_record().unwrap().is_some());
    assert!(reader.next_record().unwrap().is_none());
    assert!(reader.hit_torn_tail());
}

#[test]
fn test_reader_stays_done_after_torn_tail() {
    let data = vec![0u8; 3];
    let mut reader = LogReader::new(data.as_slice());

    assert!(reader.next_record().unwrap().is_none());
    assert!(reader.next_record().unwrap().is_none());
    assert!(reader.hit_torn_tail());
}
