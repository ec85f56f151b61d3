use std::fs;

use log::debug;

use crate::error::{Error, Result};
use crate::formats::util::partition_path;
use crate::parameters::MRParameters;
use crate::record_types::Record;

/// Reads and decodes the whole partition of map task `mapper` for reduce task `shard`.
pub fn read_partition(params: &MRParameters, mapper: usize, shard: usize) -> Result<Vec<Record>> {
    let name = partition_path(&params.work_dir, &params.job_name, mapper, shard);
    let f = fs::File::open(&name).map_err(|e| Error::io(&name, e))?;
    let records = params
        .format
        .decode(f)
        .map_err(|e| Error::from_read(&name, e))?;

    debug!("read {} records from {}", records.len(), name.display());
    Ok(records)
}

/// Opens the partitions of every map task for reduce task `shard`, in map task order.
/// Each partition is read only when the iterator reaches it.
pub fn open_reduce_inputs(params: &MRParameters,
                          partitions: usize,
                          shard: usize)
                          -> impl Iterator<Item = Result<Vec<Record>>> + '_ {
    (0..partitions).map(move |part| read_partition(params, part, shard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::util::{write_partition, PartitionFormat};
    use std::fs;

    fn params(dir: &std::path::Path) -> MRParameters {
        MRParameters::new().set_job_name("t").set_work_dir(dir)
    }

    #[test]
    fn test_read_partition() {
        let dir = tempfile::tempdir().unwrap();
        for format in [PartitionFormat::Json, PartitionFormat::WriteLog] {
            let p = params(dir.path()).set_format(format);
            let records = vec![Record::new("x", "1"), Record::new("y", "2"), Record::new("x", "3")];
            write_partition(&p, 0, 1, &records).unwrap();

            assert_eq!(read_partition(&p, 0, 1).unwrap(), records);
        }
    }

    #[test]
    fn test_missing_partition() {
        let dir = tempfile::tempdir().unwrap();
        match read_partition(&params(dir.path()), 0, 0) {
            Err(Error::IoFailure { path, .. }) => assert!(path.ends_with("mrtmp.t-0-0")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_malformed_partition() {
        let dir = tempfile::tempdir().unwrap();
        let p = params(dir.path());
        fs::write(dir.path().join("mrtmp.t-0-0"), "[{\"key\": \"a\"").unwrap();
        fs::write(dir.path().join("mrtmp.t-1-0"), "{}").unwrap();

        assert!(matches!(read_partition(&p, 0, 0), Err(Error::DecodeFailure { .. })));
        assert!(matches!(read_partition(&p, 1, 0), Err(Error::DecodeFailure { .. })));
    }

    #[test]
    fn test_inputs_in_map_order() {
        let dir = tempfile::tempdir().unwrap();
        let p = params(dir.path());
        for m in 0..3 {
            write_partition(&p, m, 0, &[Record::new("k", m.to_string())]).unwrap();
        }

        let values: Vec<String> = open_reduce_inputs(&p, 3, 0)
            .map(|r| r.unwrap().remove(0).value)
            .collect();
        assert_eq!(values, vec!["0", "1", "2"]);
    }
}
