//! Implements the reduce phase of a mapreduce process bounded to one machine:
//! the partitions written by all map tasks for one reduce task are grouped by key,
//! reduced once per key in key order, and published as one output file.
//!

pub mod apps;
pub mod closure_mr;
pub mod controller;
pub mod error;
pub mod formats;
pub mod group;
pub mod mapreducer;
pub mod parameters;
pub mod phases;
pub mod record_types;
pub mod reduce;
pub mod sort;

pub use error::{Error, Result};
pub use mapreducer::Reducer;
pub use reduce::{reduce, reduce_in, ReducePartition, ReduceStats};
