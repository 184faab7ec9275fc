//! Sensor data types
//!
//! Defines the sensor manifest and the per-cycle reading set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One polled sensor: one-wire address plus short display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorEntry {
    /// One-wire address (e.g., "28.ABCD01234567")
    pub address: String,

    /// Short name used as column header and time-series field key
    pub name: String,
}

impl SensorEntry {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }
}

/// Ordered list of polled sensors
///
/// Loaded once at startup and read-only thereafter. The order defines the
/// column order of every log row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorManifest {
    entries: Vec<SensorEntry>,
}

impl SensorManifest {
    pub fn new(entries: Vec<SensorEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SensorEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SensorEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sensor names in manifest order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Names that appear more than once, in order of first repetition
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dups = Vec::new();
        for name in self.names() {
            if !seen.insert(name) && !dups.contains(&name) {
                dups.push(name);
            }
        }
        dups
    }
}

impl From<Vec<SensorEntry>> for SensorManifest {
    fn from(entries: Vec<SensorEntry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a SensorManifest {
    type Item = &'a SensorEntry;
    type IntoIter = std::slice::Iter<'a, SensorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Readings collected during one cycle, keyed by sensor name
///
/// Only sensors read successfully in this cycle are present. Inserting a
/// name twice keeps the later value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingSet {
    values: BTreeMap<String, f64>,
}

impl ReadingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for ReadingSet {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
