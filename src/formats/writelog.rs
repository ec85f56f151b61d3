use std::io::{self, BufReader, BufWriter, Read, Write};

use crate::record_types::Record;

/// A length-prefixed record stream named for the original use case,
/// which was to write a log of all write operations to a database.
///
/// # WriteLog
///
/// WriteLog is a persistent data structure designed to be written to disk
/// that is a sequence of bytestrings.
/// It can be read back in relatively efficiently and yields the same byte
/// strings; on disk, it is represented as records prefixed by 4 byte
/// big-endian length prefixes:
///
/// ```text
/// llllbbbbbbllllbbllllbbbbbbbbb...
/// ```
///
/// Where l is a length byte and b are bytes of a bytestring.
///
/// A partition stored as WriteLog alternates keys and values, so it always holds an even
/// number of entries.
pub struct WriteLogWriter<W: Write> {
    dest: W,

    current_length: u64,
    records_written: u32,
}

impl<W: Write> WriteLogWriter<W> {
    /// Return a new WriteLog that writes to dest
    pub fn new(dest: W) -> WriteLogWriter<W> {
        WriteLogWriter {
            dest,
            current_length: 0,
            records_written: 0,
        }
    }

    /// Appends one length-prefixed entry.
    pub fn write_entry(&mut self, buf: &[u8]) -> io::Result<()> {
        if buf.len() > u32::MAX as usize {
            return Err(io::Error::new(io::ErrorKind::InvalidInput,
                                      "entry too long for a 4 byte length prefix"));
        }
        self.dest.write_all(&(buf.len() as u32).to_be_bytes())?;
        self.dest.write_all(buf)?;
        self.current_length += 4 + buf.len() as u64;
        self.records_written += 1;
        Ok(())
    }

    /// Return how many (bytes,records) have been written.
    pub fn get_stats(&self) -> (u64, u32) {
        (self.current_length, self.records_written)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.dest.flush()
    }
}

/// A Reader for WriteLog files. (more information on WriteLog files is to
/// be found above at WriteLogWriter).
pub struct WriteLogReader<R: Read> {
    src: R,
    records_read: u32,
    bytes_read: usize,
}

impl<R: Read> WriteLogReader<R> {
    pub fn new(src: R) -> WriteLogReader<R> {
        WriteLogReader {
            src,
            records_read: 0,
            bytes_read: 0,
        }
    }

    pub fn get_stats(&self) -> (u32, usize) {
        (self.records_read, self.bytes_read)
    }

    /// Fills buf completely. Returns Ok(false) if the source was already at its end, and an
    /// error if it ended in the middle of buf.
    fn read_exact_or_end(&mut self, buf: &mut [u8]) -> io::Result<bool> {
        let mut off = 0;
        while off < buf.len() {
            match self.src.read(&mut buf[off..]) {
                Ok(0) if off == 0 => return Ok(false),
                Ok(0) => {
                    return Err(io::Error::new(io::ErrorKind::InvalidData,
                                              "Could not read enough data"))
                }
                Ok(s) => off += s,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        self.bytes_read += off;
        Ok(true)
    }

    /// Reads the next entry. Returns None at a clean end of the log.
    pub fn read_vec(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut lengthbuf = [0; 4];
        if !self.read_exact_or_end(&mut lengthbuf)? {
            return Ok(None);
        }
        let length = u32::from_be_bytes(lengthbuf) as u64;

        // Grow the buffer as data arrives instead of trusting the prefix with an allocation.
        let mut buffer = Vec::new();
        let n = (&mut self.src).take(length).read_to_end(&mut buffer)?;
        if (n as u64) < length {
            return Err(io::Error::new(io::ErrorKind::InvalidData,
                                      format!("entry truncated: expected {} bytes, got {}",
                                              length,
                                              n)));
        }
        self.bytes_read += n;
        self.records_read += 1;
        Ok(Some(buffer))
    }

    /// Reads the next entry as UTF-8 text.
    pub fn read_string(&mut self) -> io::Result<Option<String>> {
        match self.read_vec()? {
            None => Ok(None),
            Some(v) => String::from_utf8(v)
                .map(Some)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
        }
    }
}

impl<R: Read> Iterator for WriteLogReader<R> {
    type Item = io::Result<String>;
    fn next(&mut self) -> Option<Self::Item> {
        self.read_string().transpose()
    }
}

/// Reads a complete partition of alternating keys and values.
pub fn decode_records<R: Read>(src: R) -> io::Result<Vec<Record>> {
    let mut reader = WriteLogReader::new(BufReader::new(src));
    let mut records = Vec::new();

    while let Some(key) = reader.read_string()? {
        match reader.read_string()? {
            Some(value) => records.push(Record { key, value }),
            None => {
                return Err(io::Error::new(io::ErrorKind::InvalidData,
                                          format!("key {:?} has no value", key)))
            }
        }
    }
    Ok(records)
}

pub fn encode_records<W: Write>(dst: W, records: &[Record]) -> io::Result<()> {
    let mut w = WriteLogWriter::new(BufWriter::new(dst));
    for r in records {
        w.write_entry(r.key.as_bytes())?;
        w.write_entry(r.value.as_bytes())?;
    }
    w.flush()
}
