//! The I/O ends of a reduce task: reading partitions and publishing the output.

pub mod input;
pub mod output;
