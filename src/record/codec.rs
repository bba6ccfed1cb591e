//! Record codec
//!
//! Converts records to and from their on-disk frame.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{CaskError, Result};

use super::{Header, Record, HEADER_SIZE};

/// Encode a record frame.
///
/// Returns the total frame size alongside the bytes so callers can advance
/// their write cursor without re-measuring.
pub fn encode(timestamp: u32, key: &[u8], value: &[u8]) -> Result<(u32, Bytes)> {
    let size = HEADER_SIZE as u64 + key.len() as u64 + value.len() as u64;
    let total_size = u32::try_from(size).map_err(|_| CaskError::RecordTooLarge { size })?;

    let mut buf = BytesMut::with_capacity(total_size as usize);
    buf.put_u32_le(timestamp);
    // Both fit: their sum with the header already fit in u32
    buf.put_u32_le(key.len() as u32);
    buf.put_u32_le(value.len() as u32);
    buf.put_slice(key);
    buf.put_slice(value);

    Ok((total_size, buf.freeze()))
}

/// Decode the fixed-size header from the front of `bytes`.
///
/// Extra trailing bytes are ignored.
pub fn decode_header(bytes: &[u8]) -> Result<Header> {
    if bytes.len() < HEADER_SIZE {
        return Err(CaskError::MalformedHeader { len: bytes.len() });
    }

    let mut buf = &bytes[..HEADER_SIZE];
    Ok(Header {
        timestamp: buf.get_u32_le(),
        key_size: buf.get_u32_le(),
        value_size: buf.get_u32_le(),
    })
}

/// Decode a complete frame (header + key + value).
pub fn decode_kv(bytes: &[u8]) -> Result<Record> {
    let header = decode_header(bytes)?;

    let expected = header.record_size();
    if (bytes.len() as u64) < expected {
        return Err(CaskError::MalformedRecord {
            expected: expected as usize,
            actual: bytes.len(),
        });
    }

    let key_end = HEADER_SIZE + header.key_size as usize;
    let value_end = key_end + header.value_size as usize;

    Ok(Record {
        timestamp: header.timestamp,
        key: bytes[HEADER_SIZE..key_end].to_vec(),
        value: bytes[key_end..value_end].to_vec(),
    })
}
