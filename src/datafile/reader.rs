//! Data file reader
//!
//! Sequential scan over the records of a data file.

use std::io::{self, BufReader, ErrorKind, Read};

use crate::error::Result;
use crate::record::{decode_header, decode_kv, Record, HEADER_SIZE};

/// A record found by the scanner, with its location in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedRecord {
    /// Offset of the record header
    pub position: u64,

    /// Header + key + value length
    pub total_size: u32,

    pub record: Record,
}

/// Reads records front to back.
///
/// Generic over any `Read` so tests can scan in-memory buffers. A short read
/// anywhere inside a record (header, key or value) ends the scan cleanly: the
/// partial record is a torn tail, not an error.
pub struct LogReader<R: Read> {
    rdr: BufReader<R>,
    /// End of the last complete record
    offset: u64,
    torn: bool,
    done: bool,
}

impl<R: Read> LogReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            rdr: BufReader::new(inner),
            offset: 0,
            torn: false,
            done: false,
        }
    }

    /// Read the next complete record.
    ///
    /// Returns `Ok(None)` at clean end-of-file or at a torn tail.
    pub fn next_record(&mut self) -> Result<Option<ScannedRecord>> {
        if self.done {
            return Ok(None);
        }

        let mut header_buf = [0u8; HEADER_SIZE];
        let n = read_full(&mut self.rdr, &mut header_buf)?;
        if n == 0 {
            return Ok(self.finish(false));
        }
        if n < HEADER_SIZE {
            return Ok(self.finish(true));
        }

        let header = decode_header(&header_buf)?;
        let record_size = header.record_size();

        // A valid writer never produces frames past u32::MAX
        let total_size = match u32::try_from(record_size) {
            Ok(size) => size,
            Err(_) => return Ok(self.finish(true)),
        };

        // Grow the buffer as bytes arrive so garbage sizes in a torn header
        // cannot force a huge allocation.
        let body_len = record_size - HEADER_SIZE as u64;
        let mut frame = Vec::with_capacity(HEADER_SIZE);
        frame.extend_from_slice(&header_buf);
        let read = (&mut self.rdr).take(body_len).read_to_end(&mut frame)?;
        if (read as u64) < body_len {
            return Ok(self.finish(true));
        }

        let record = decode_kv(&frame)?;
        let position = self.offset;
        self.offset += record_size;

        Ok(Some(ScannedRecord {
            position,
            total_size,
            record,
        }))
    }

    /// End of the last complete record scanned so far
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether the scan stopped on a partial record
    pub fn hit_torn_tail(&self) -> bool {
        self.torn
    }

    fn finish(&mut self, torn: bool) -> Option<ScannedRecord> {
        self.done = true;
        self.torn = torn;
        None
    }
}

impl<R: Read> Iterator for LogReader<R> {
    type Item = Result<ScannedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Fill `buf` as far as the reader allows, returning how many bytes landed.
/// Fewer than `buf.len()` means end-of-file was reached.
fn read_full<R: Read>(rdr: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match rdr.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
