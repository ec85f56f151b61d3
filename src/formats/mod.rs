//! Encodings of the intermediate partitions, and the file naming shared with the map phase.

pub mod json;
pub mod util;
pub mod writelog;
