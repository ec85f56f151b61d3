//! JSON encoding of partitions: one array of `{"key","value"}` objects per file, which is what
//! the map tasks emit by default.

use std::io::{self, BufReader, Read, Write};

use crate::record_types::Record;

/// Reads a complete partition. An empty file is not a valid partition; a map task without
/// output for this reduce task writes `[]`.
///
/// Errors of the underlying reader are passed on as they are; anything wrong with the content,
/// including a document that ends too early, is `InvalidData`.
pub fn decode_records<R: Read>(src: R) -> io::Result<Vec<Record>> {
    serde_json::from_reader(BufReader::new(src)).map_err(|e| {
        if e.is_io() {
            io::Error::from(e)
        } else {
            io::Error::new(io::ErrorKind::InvalidData, e)
        }
    })
}

pub fn encode_records<W: Write>(dst: W, records: &[Record]) -> io::Result<()> {
    serde_json::to_writer(dst, records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_decode() {
        let src = r#"[{"key":"a","value":"1"},{"key":"b","value":"x y"}]"#;
        let records = decode_records(src.as_bytes()).unwrap();
        assert_eq!(records, vec![Record::new("a", "1"), Record::new("b", "x y")]);
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_records("[]".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_is_invalid_data() {
        let cases = [r#"[{"key":"a"}]"#, r#"{"a":"1"}"#, "[1,2]", "not json"];
        for c in cases.iter() {
            let e = decode_records(c.as_bytes()).unwrap_err();
            assert_eq!(e.kind(), io::ErrorKind::InvalidData, "{}", c);
        }
    }

    #[test]
    fn test_truncated_is_invalid_data() {
        for c in ["", r#"[{"key":"a","val"#].iter() {
            let e = decode_records(c.as_bytes()).unwrap_err();
            assert_eq!(e.kind(), io::ErrorKind::InvalidData, "{:?}", c);
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_reader_error_passes_through() {
        let e = decode_records(FailingReader).unwrap_err();
        assert_eq!(e.kind(), io::ErrorKind::PermissionDenied);
    }
}
