//! Per-pool snapshot directory
//!
//! Maps snapshot ids to their name, creation version and stamp. Ids come
//! from a per-pool counter starting at 1 and are never reused, even after
//! the snapshot holding them is removed. Names are unique among the
//! snapshots that currently exist.
//!
//! ## Usage
//!
//! ```rust
//! use poolsnap_core::Timestamp;
//! use poolsnap_storage::SnapRegistry;
//!
//! let mut registry = SnapRegistry::new();
//! let id = registry.create("nightly", 7, Timestamp::now()).unwrap();
//! assert_eq!(registry.lookup("nightly"), Some(id));
//! ```

use std::collections::BTreeMap;

use poolsnap_core::{SnapId, Timestamp};

/// One snapshot as recorded by the cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapEntry {
    /// Name given at creation
    pub name: String,
    /// Cluster version current at creation; reads see versions at or below it
    pub seq: u64,
    /// Creation stamp
    pub stamp: Timestamp,
}

/// Snapshot directory of one pool
#[derive(Debug, Clone)]
pub struct SnapRegistry {
    entries: BTreeMap<SnapId, SnapEntry>,
    next_id: u64,
}

impl Default for SnapRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        SnapRegistry {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Record a new snapshot, returning its id
    ///
    /// Returns `None` if the name is already taken.
    pub fn create(&mut self, name: &str, seq: u64, stamp: Timestamp) -> Option<SnapId> {
        if self.lookup(name).is_some() {
            return None;
        }
        let id = SnapId::new(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            SnapEntry {
                name: name.to_string(),
                seq,
                stamp,
            },
        );
        Some(id)
    }

    /// Remove a snapshot by name, returning what was removed
    pub fn remove(&mut self, name: &str) -> Option<(SnapId, SnapEntry)> {
        let id = self.lookup(name)?;
        self.entries.remove(&id).map(|entry| (id, entry))
    }

    /// Resolve a name to its id
    pub fn lookup(&self, name: &str) -> Option<SnapId> {
        self.entries
            .iter()
            .find(|(_, e)| e.name == name)
            .map(|(id, _)| *id)
    }

    /// Entry for an id
    pub fn get(&self, id: SnapId) -> Option<&SnapEntry> {
        self.entries.get(&id)
    }

    /// Entry for a name
    pub fn get_by_name(&self, name: &str) -> Option<&SnapEntry> {
        self.entries.values().find(|e| e.name == name)
    }

    /// All ids in ascending order
    pub fn ids(&self) -> Vec<SnapId> {
        self.entries.keys().copied().collect()
    }

    /// Creation versions of all remaining snapshots
    pub fn pinned_seqs(&self) -> Vec<u64> {
        self.entries.values().map(|e| e.seq).collect()
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the pool has no snapshots
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
