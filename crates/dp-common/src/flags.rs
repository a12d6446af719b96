//! Flag groups and the per-run flag-group table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named set of compiler/linker flags for one detected capability.
///
/// Created once when a probe succeeds and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlagGroup {
    /// Ordered flag tokens as emitted by the probe.
    pub flags: Vec<String>,

    /// Human-readable description of the probe that produced this group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl FlagGroup {
    /// Create a group from flag tokens.
    pub fn new(flags: Vec<String>) -> Self {
        Self {
            flags,
            origin: None,
        }
    }

    /// Attach a probe description.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Mapping from group name to flag group, accumulated during one run.
///
/// Keys are unique; a successful probe inserts its group exactly once.
/// Iteration order is the sorted key order, which keeps serialized output
/// deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FlagTable {
    groups: BTreeMap<String, FlagGroup>,
}

impl FlagTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group under `name`. Replaces any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, group: FlagGroup) {
        self.groups.insert(name.into(), group);
    }

    /// Check whether a group is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Get a group by name.
    pub fn get(&self, name: &str) -> Option<&FlagGroup> {
        self.groups.get(name)
    }

    /// Registered group names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Iterate over (name, group) pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagGroup)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the table has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Split probe output into flag tokens.
///
/// Probe programs emit flags on one line separated by whitespace; trailing
/// newlines and repeated spaces carry no meaning.
pub fn split_flags(output: &str) -> Vec<String> {
    output.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_flags() {
        assert_eq!(
            split_flags("-I/usr/include/glib-2.0  -lglib-2.0\n"),
            vec!["-I/usr/include/glib-2.0", "-lglib-2.0"]
        );
        assert!(split_flags("").is_empty());
        assert!(split_flags("  \n\t").is_empty());
    }

    #[test]
    fn test_table_insert_and_lookup() {
        let mut table = FlagTable::new();
        assert!(table.is_empty());
        assert!(!table.contains("mad"));

        table.insert("mad", FlagGroup::new(vec!["-lmad".to_string()]));
        assert_eq!(table.len(), 1);
        assert!(table.contains("mad"));
        assert_eq!(table.get("mad").unwrap().flags, vec!["-lmad"]);
        assert!(table.get("vorbis").is_none());
    }

    #[test]
    fn test_table_names_sorted() {
        let mut table = FlagTable::new();
        table.insert("vorbis", FlagGroup::new(vec![]));
        table.insert("glib", FlagGroup::new(vec![]));
        table.insert("mad", FlagGroup::new(vec![]));

        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["glib", "mad", "vorbis"]);
    }

    #[test]
    fn test_group_origin() {
        let group = FlagGroup::new(vec!["-lmad".to_string()])
            .with_origin("pkg-config --libs --cflags mad");
        assert_eq!(
            group.origin.as_deref(),
            Some("pkg-config --libs --cflags mad")
        );
    }

    #[test]
    fn test_table_serializes_as_plain_map() {
        let mut table = FlagTable::new();
        table.insert("math", FlagGroup::new(vec!["-lm".to_string()]));

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["math"]["flags"][0], "-lm");
        // origin is omitted when unset
        assert!(json["math"].get("origin").is_none());
    }
}
