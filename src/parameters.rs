//! Parameters for a reduce task or a set of reduce tasks.
//!

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::formats::util::PartitionFormat;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MRParameters {
    pub job_name: String,

    pub mappers: usize,
    pub reducers: usize,

    pub work_dir: PathBuf,
    pub format: PartitionFormat,

    pub reduce_group_prealloc_size: usize,

    pub keep_temp_files: bool,

    // Internal parameters
    pub shard_id: usize,
}

impl Default for MRParameters {
    fn default() -> MRParameters {
        MRParameters::new()
    }
}

impl MRParameters {
    pub fn new() -> MRParameters {
        MRParameters {
            job_name: String::from("mr"),
            mappers: 4,
            reducers: 4,
            work_dir: PathBuf::from("."),
            format: PartitionFormat::Json,
            reduce_group_prealloc_size: 1,
            keep_temp_files: true,
            shard_id: 0,
        }
    }

    /// Reads parameters from a JSON file. Missing fields take their default values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<MRParameters> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let params: MRParameters = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(params)
    }

    /// Name of the job; it is part of every intermediate and output file name.
    ///
    /// Default "mr"
    pub fn set_job_name<S: Into<String>>(mut self, name: S) -> MRParameters {
        self.job_name = name.into();
        self
    }

    /// How many map tasks have run (and thus how many partitions every reduce task reads), and
    /// how many reduce tasks there are. The local driver runs the reducers in parallel.
    ///
    /// Default 4/4
    pub fn set_concurrency(mut self, mappers: usize, reducers: usize) -> MRParameters {
        self.mappers = mappers;
        self.reducers = reducers;
        self
    }

    /// Directory holding the intermediate partitions and, by default, the reduce outputs.
    ///
    /// Default: the current directory
    pub fn set_work_dir<P: Into<PathBuf>>(mut self, dir: P) -> MRParameters {
        self.work_dir = dir.into();
        self
    }

    /// Encoding of the intermediate partitions; has to match what the map phase wrote.
    ///
    /// Default: Json
    pub fn set_format(mut self, format: PartitionFormat) -> MRParameters {
        self.format = format;
        self
    }

    /// How big are the groups of values per key expected to be? (used for pre-allocating
    /// buffers when a key is first seen)
    /// Default 1.
    pub fn set_reduce_group_prealloc_size(mut self, prealloc_size: usize) -> MRParameters {
        self.reduce_group_prealloc_size = prealloc_size;
        self
    }

    /// Whether the local driver keeps the intermediate partitions once all reduce tasks
    /// succeeded. Removing them makes the reduce phase impossible to re-run.
    ///
    /// Default: true
    pub fn set_keep_temp_files(mut self, keep: bool) -> MRParameters {
        self.keep_temp_files = keep;
        self
    }

    /// For internal use: Sets the ID of the executing reduce task (for file naming etc.)
    ///
    pub fn set_shard_id(mut self, n: usize) -> MRParameters {
        self.shard_id = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::MRParameters;
    use crate::formats::util::PartitionFormat;
    use std::fs;

    #[test]
    fn test_builder() {
        let p = MRParameters::new()
            .set_job_name("wcseq")
            .set_concurrency(3, 2)
            .set_format(PartitionFormat::WriteLog)
            .set_shard_id(1);
        assert_eq!(p.job_name, "wcseq");
        assert_eq!((p.mappers, p.reducers), (3, 2));
        assert_eq!(p.format, PartitionFormat::WriteLog);
        assert_eq!(p.shard_id, 1);
    }

    #[test]
    fn test_load_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, r#"{"job_name": "iiseq", "mappers": 5, "format": "writelog"}"#).unwrap();

        let p = MRParameters::load(&path).unwrap();
        assert_eq!(p.job_name, "iiseq");
        assert_eq!(p.mappers, 5);
        assert_eq!(p.reducers, 4);
        assert_eq!(p.format, PartitionFormat::WriteLog);
        assert!(p.keep_temp_files);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, "mappers = 3").unwrap();

        let err = format!("{:#}", MRParameters::load(&path).unwrap_err());
        assert!(err.starts_with(&format!("parsing config {}: ", path.display())), "{}", err);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = format!("{:#}", MRParameters::load(&path).unwrap_err());
        assert!(err.contains(&format!("reading config {}", path.display())), "{}", err);
    }
}
