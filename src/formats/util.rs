//! File naming and the partition format selector shared by the map side (writer) and the reduce
//! side (reader).

use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formats::{json, writelog};
use crate::parameters::MRParameters;
use crate::record_types::Record;

/// Name of the partition written by map task `mapper` for reduce task `shard`.
pub fn partition_name(job: &str, mapper: usize, shard: usize) -> String {
    format!("mrtmp.{}-{}-{}", job, mapper, shard)
}

/// Location of a partition below `work_dir`. Map and reduce tasks agree on partitions through
/// this function alone.
pub fn partition_path(work_dir: &Path, job: &str, mapper: usize, shard: usize) -> PathBuf {
    work_dir.join(partition_name(job, mapper, shard))
}

/// Calculates the location of a reduce output shard from the parameters.
pub fn reduce_output_name(params: &MRParameters) -> PathBuf {
    params
        .work_dir
        .join(format!("mrtmp.{}-res-{}", params.job_name, params.shard_id))
}

/// On-disk encoding of an intermediate partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionFormat {
    /// A JSON array of `{"key": .., "value": ..}` objects.
    Json,
    /// Length-prefixed strings, alternating key and value. See `formats::writelog`.
    WriteLog,
}

impl PartitionFormat {
    /// Decodes a whole partition. Malformed or truncated input is reported as `InvalidData`.
    pub fn decode<R: Read>(self, src: R) -> io::Result<Vec<Record>> {
        match self {
            PartitionFormat::Json => json::decode_records(src),
            PartitionFormat::WriteLog => writelog::decode_records(src),
        }
    }

    pub fn encode<W: Write>(self, dst: W, records: &[Record]) -> io::Result<()> {
        match self {
            PartitionFormat::Json => json::encode_records(dst, records),
            PartitionFormat::WriteLog => writelog::encode_records(dst, records),
        }
    }
}

impl fmt::Display for PartitionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionFormat::Json => f.write_str("json"),
            PartitionFormat::WriteLog => f.write_str("writelog"),
        }
    }
}

impl FromStr for PartitionFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<PartitionFormat, String> {
        match s {
            "json" => Ok(PartitionFormat::Json),
            "writelog" | "wlg" => Ok(PartitionFormat::WriteLog),
            other => Err(format!("unknown partition format '{}'", other)),
        }
    }
}

/// Writes the partition of map task `mapper` destined for reduce task `shard`, replacing any
/// earlier one. This is the map side of the naming and format contract.
pub fn write_partition(params: &MRParameters,
                       mapper: usize,
                       shard: usize,
                       records: &[Record])
                       -> Result<PathBuf> {
    let path = partition_path(&params.work_dir, &params.job_name, mapper, shard);
    let f = fs::File::create(&path).map_err(|e| Error::io(&path, e))?;
    let mut w = BufWriter::new(f);
    params
        .format
        .encode(&mut w, records)
        .and_then(|_| w.flush())
        .map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_names() {
        assert_eq!(partition_name("wcseq", 2, 0), "mrtmp.wcseq-2-0");
        assert_eq!(partition_path(Path::new("/tmp/x"), "j", 0, 1),
                   Path::new("/tmp/x/mrtmp.j-0-1"));

        let params = MRParameters::new()
            .set_job_name("iiseq")
            .set_work_dir("/data")
            .set_shard_id(3);
        assert_eq!(reduce_output_name(&params), Path::new("/data/mrtmp.iiseq-res-3"));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<PartitionFormat>().unwrap(), PartitionFormat::Json);
        assert_eq!("wlg".parse::<PartitionFormat>().unwrap(), PartitionFormat::WriteLog);
        assert!("csv".parse::<PartitionFormat>().is_err());
        assert_eq!(PartitionFormat::WriteLog.to_string(), "writelog");
    }

    #[test]
    fn test_formats_preserve_order() {
        let records = vec![Record::new("b", "1"),
                           Record::new("a", "2"),
                           Record::new("b", "0"),
                           Record::new("", "")];

        for format in [PartitionFormat::Json, PartitionFormat::WriteLog] {
            let mut buf = Vec::new();
            format.encode(&mut buf, &records).unwrap();
            assert_eq!(format.decode(&buf[..]).unwrap(), records);
        }
    }

    #[test]
    fn test_write_partition() {
        let dir = tempfile::tempdir().unwrap();
        let params = MRParameters::new().set_job_name("j").set_work_dir(dir.path());
        let path = write_partition(&params, 1, 0, &[Record::new("a", "1")]).unwrap();

        assert_eq!(path, dir.path().join("mrtmp.j-1-0"));
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"[{"key":"a","value":"1"}]"#);
    }
}
