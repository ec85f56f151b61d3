//! Collects the values of all partitions of a reduce task by key.

use std::collections::HashMap;

use crate::record_types::{MultiRecord, Record};
use crate::sort::{byte_compare, sort_groups};

/// Maps every key to all of its values. Values are kept in the order they were added: feed
/// partitions in map task order and each key's values are ordered by (map task, position in
/// the partition).
pub struct GroupingTable {
    groups: HashMap<String, Vec<String>>,
    /// Efficiency knob: How big groups of values are expected to be.
    expected_group_size: usize,

    partitions: usize,
    records: usize,
}

impl GroupingTable {
    pub fn new(expected_group_size: usize) -> GroupingTable {
        GroupingTable {
            groups: HashMap::new(),
            expected_group_size,
            partitions: 0,
            records: 0,
        }
    }

    pub fn insert(&mut self, record: Record) {
        let egs = self.expected_group_size;
        self.groups
            .entry(record.key)
            .or_insert_with(|| Vec::with_capacity(egs))
            .push(record.value);
        self.records += 1;
    }

    /// Appends all records of one partition.
    pub fn add_partition<I: IntoIterator<Item = Record>>(&mut self, records: I) {
        for r in records {
            self.insert(r);
        }
        self.partitions += 1;
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(|v| v.as_slice())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of values over all keys; equal to the number of records added.
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn partitions(&self) -> usize {
        self.partitions
    }

    /// Consumes the table and returns one group per key, in ascending byte order of the keys.
    pub fn into_sorted_groups(self) -> Vec<MultiRecord> {
        let mut groups: Vec<(String, Vec<String>)> = self.groups.into_iter().collect();
        sort_groups(&mut groups, byte_compare);

        groups.into_iter()
            .map(|(k, values)| MultiRecord::new(k, values))
            .collect()
    }
}
