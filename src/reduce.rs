//! Implements the Reduce phase.
//!

use std::path::Path;

use log::info;
use time::{Duration, OffsetDateTime};

use crate::error::{Error, Result};
use crate::group::GroupingTable;
use crate::mapreducer::Reducer;
use crate::parameters::MRParameters;
use crate::phases::input::open_reduce_inputs;
use crate::phases::output::write_reduce_output;
use crate::record_types::{MultiRecord, ReducedMapping};

/// What a reduce task did.
#[derive(Clone, Debug)]
pub struct ReduceStats {
    pub shard: usize,
    pub partitions_read: usize,
    pub records_read: usize,
    pub distinct_keys: usize,
    pub reducer_calls: usize,
    pub bytes_written: usize,
    pub started: OffsetDateTime,
    pub elapsed: Duration,
}

/// One reduce task: reads the partitions of all map tasks for one shard, groups them by key,
/// calls the reducer once per key in key order, and publishes the result.
pub struct ReducePartition<'a, R: Reducer + ?Sized> {
    reducer: &'a R,
    params: MRParameters,
}

impl<'a, R: Reducer + ?Sized> ReducePartition<'a, R> {
    /// Create a new Reduce partition for the given reducer.
    /// params names the job and the reduce shard (shard_id) and says how many map partitions
    /// (mappers) there are to read, where they are and in which format.
    pub fn new(reducer: &'a R, params: MRParameters) -> ReducePartition<'a, R> {
        ReducePartition { reducer, params }
    }

    /// Run the Reduce partition, writing the output to `out`. Nothing is written unless every
    /// partition was read and every reducer call succeeded.
    pub fn run(self, out: &Path) -> Result<ReduceStats> {
        let started = OffsetDateTime::now_utc();

        let table = self.group_inputs()?;
        let (partitions_read, records_read) = (table.partitions(), table.records());

        let groups = table.into_sorted_groups();
        let distinct_keys = groups.len();
        let reduced = self.reduce_groups(groups)?;

        let bytes_written = write_reduce_output(out, &reduced)?;

        let stats = ReduceStats {
            shard: self.params.shard_id,
            partitions_read,
            records_read,
            distinct_keys,
            reducer_calls: reduced.len(),
            bytes_written,
            started,
            elapsed: OffsetDateTime::now_utc() - started,
        };
        info!("reduce {}/{}: {} records, {} keys from {} partitions -> {} ({})",
              self.params.job_name,
              stats.shard,
              stats.records_read,
              stats.distinct_keys,
              stats.partitions_read,
              out.display(),
              stats.elapsed);
        Ok(stats)
    }

    /// Reads all partitions one after another, in map task order.
    fn group_inputs(&self) -> Result<GroupingTable> {
        let mut table = GroupingTable::new(self.params.reduce_group_prealloc_size);
        for partition in open_reduce_inputs(&self.params, self.params.mappers, self.params.shard_id) {
            table.add_partition(partition?);
        }
        Ok(table)
    }

    /// Calls the reducer once per group. Groups arrive in key order.
    fn reduce_groups(&self, groups: Vec<MultiRecord>) -> Result<ReducedMapping> {
        let mut reduced = ReducedMapping::with_capacity(groups.len());
        for group in groups {
            let (key, values) = group.into_parts();
            match self.reducer.reduce(&key, &values) {
                Ok(v) => reduced.push(key, v),
                Err(source) => return Err(Error::ReduceFailure { key, source }),
            }
        }
        Ok(reduced)
    }
}

/// Runs reduce task `reduce_task` of job `job_name`: reads the partitions written by map tasks
/// 0..map_tasks from the current directory and writes the reduced mapping to `out_file`.
///
/// Safe to call again after a failure; the same inputs give a byte-identical output.
pub fn reduce<R: Reducer + ?Sized>(job_name: &str,
                                   reduce_task: usize,
                                   out_file: &Path,
                                   map_tasks: usize,
                                   reducer: &R)
                                   -> Result<ReduceStats> {
    reduce_in(Path::new("."), job_name, reduce_task, out_file, map_tasks, reducer)
}

/// Like `reduce()`, with the partitions read from `work_dir`.
pub fn reduce_in<R: Reducer + ?Sized>(work_dir: &Path,
                                      job_name: &str,
                                      reduce_task: usize,
                                      out_file: &Path,
                                      map_tasks: usize,
                                      reducer: &R)
                                      -> Result<ReduceStats> {
    let params = MRParameters::new()
        .set_job_name(job_name)
        .set_work_dir(work_dir)
        .set_shard_id(reduce_task);
    let params = MRParameters { mappers: map_tasks, ..params };
    ReducePartition::new(reducer, params).run(out_file)
}
