//! Runs all reduce tasks of a job on the local machine.

use std::cmp;
use std::fs;
use std::io;
use std::sync::mpsc::channel;

use log::{error, warn};
use scoped_threadpool::Pool;

use crate::error::Result;
use crate::formats::util::{partition_path, reduce_output_name};
use crate::mapreducer::Reducer;
use crate::parameters::MRParameters;
use crate::reduce::{ReducePartition, ReduceStats};

pub struct MRController<'a, R: Reducer + Sync + ?Sized> {
    params: MRParameters,
    reducer: &'a R,
}

impl<'a, R: Reducer + Sync + ?Sized> MRController<'a, R> {
    /// Run reduce tasks 0..params.reducers in parallel. Every task reads params.mappers
    /// partitions from params.work_dir and writes `reduce_output_name()` for its shard.
    ///
    /// Returns the stats of all tasks in shard order, or the error of the lowest failed shard.
    /// Tasks do not affect each other; a failed task leaves the outputs of the others in place.
    pub fn run(reducer: &'a R, params: MRParameters) -> Result<Vec<ReduceStats>> {
        let controller = MRController { params, reducer };
        let stats = controller.run_reduce()?;
        controller.clean_up();
        Ok(stats)
    }

    fn run_reduce(&self) -> Result<Vec<ReduceStats>> {
        let mut pool = Pool::new(cmp::max(self.params.reducers, 1) as u32);
        let (send, recv) = channel();

        pool.scoped(|scope| {
            for i in 0..self.params.reducers {
                let params = self.params.clone().set_shard_id(i);
                let reducer = self.reducer;
                let done = send.clone();

                scope.execute(move || {
                    let output = reduce_output_name(&params);
                    let result = ReducePartition::new(reducer, params).run(&output);
                    let _ = done.send((i, result));
                });
            }
        });
        drop(send);

        let mut results: Vec<_> = recv.into_iter().collect();
        results.sort_by_key(|(i, _)| *i);

        let mut stats = Vec::with_capacity(results.len());
        let mut first_err = None;
        for (i, result) in results {
            match result {
                Ok(s) => stats.push(s),
                Err(e) => {
                    error!("reduce task {} of {} failed: {}", i, self.params.job_name, e);
                    first_err.get_or_insert(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(stats),
        }
    }

    /// Removes the intermediate partitions unless they are to be kept.
    fn clean_up(&self) {
        if self.params.keep_temp_files {
            return;
        }
        for mpart in 0..self.params.mappers {
            for rshard in 0..self.params.reducers {
                let name = partition_path(&self.params.work_dir, &self.params.job_name, mpart, rshard);
                match fs::remove_file(&name) {
                    Ok(()) => (),
                    Err(ref e) if e.kind() == io::ErrorKind::NotFound => (),
                    Err(e) => warn!("could not remove {}: {}", name.display(), e),
                }
            }
        }
    }
}
