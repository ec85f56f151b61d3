use serde::{Deserialize, Serialize, Serializer};

/// A (key,value) pair, as emitted by a map task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Record {
        Record {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A (key,[value]) pair; the input to one reducer call.
/// Values keep the order in which they were collected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiRecord {
    key: String,
    values: Vec<String>,
}

impl MultiRecord {
    pub fn new(key: String, values: Vec<String>) -> MultiRecord {
        MultiRecord { key, values }
    }

    /// Retrieves the key of the record.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.key, self.values)
    }
}

impl IntoIterator for MultiRecord {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;
    /// Allows iterating over all the values.
    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// The result of a reduce task: one reduced value per key, in key order.
///
/// Serializes as a single JSON object whose members appear in the stored order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReducedMapping {
    entries: Vec<(String, String)>,
}

impl ReducedMapping {
    pub fn with_capacity(n: usize) -> ReducedMapping {
        ReducedMapping {
            entries: Vec::with_capacity(n),
        }
    }

    /// Appends an entry. Callers push keys in ascending order.
    pub fn push(&mut self, key: String, value: String) {
        debug_assert!(self.entries.last().map_or(true, |(k, _)| *k < key));
        self.entries.push((key, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|i| self.entries[i].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for ReducedMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}
