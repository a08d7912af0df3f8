//! Copy-on-write object history
//!
//! Each write stores the object's full new content under the cluster version
//! that produced it. Deletion stores a tombstone. Reading at version `v`
//! returns the newest entry at or below `v`, so a snapshot taken at `v` keeps
//! seeing the same bytes no matter what is written later.
//!
//! # Design Notes
//!
//! - **Full copies**: every version owns its bytes; simple, and objects in a
//!   reference cluster are small
//! - **Ascending order**: versions are pushed in allocation order, which the
//!   owning pool guarantees by allocating under its write lock
//! - **Trimming**: versions no snapshot can see are dropped when a snapshot is
//!   removed

use poolsnap_core::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ObjectVersion {
    version: u64,
    /// `None` is a tombstone
    data: Option<Vec<u8>>,
    modified: Timestamp,
}

/// All retained versions of one object, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectHistory {
    versions: Vec<ObjectVersion>,
}

impl ObjectHistory {
    /// Create an empty history (object never written)
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, version: u64, data: Option<Vec<u8>>, modified: Timestamp) {
        debug_assert!(
            self.versions.last().map_or(true, |v| v.version < version),
            "object versions must be pushed in ascending order"
        );
        self.versions.push(ObjectVersion {
            version,
            data,
            modified,
        });
    }

    fn visible(&self, max_version: u64) -> Option<&ObjectVersion> {
        self.versions.iter().rev().find(|v| v.version <= max_version)
    }

    /// Live content, `None` if the object does not exist
    pub fn head(&self) -> Option<&[u8]> {
        self.versions.last().and_then(|v| v.data.as_deref())
    }

    /// True if the object exists in the live state
    pub fn exists_live(&self) -> bool {
        self.head().is_some()
    }

    /// Content and modification time as of `max_version`
    ///
    /// Returns `None` if the object did not exist at that version.
    pub fn at(&self, max_version: u64) -> Option<(&[u8], Timestamp)> {
        self.visible(max_version)
            .and_then(|v| v.data.as_deref().map(|d| (d, v.modified)))
    }

    /// Replace the whole content
    pub fn put(&mut self, version: u64, data: Vec<u8>, modified: Timestamp) {
        self.push(version, Some(data), modified);
    }

    /// Write `data` at `offset`, zero-filling any gap past the current end
    pub fn write_at(&mut self, version: u64, offset: usize, data: &[u8], modified: Timestamp) {
        let mut content = self.head().map(<[u8]>::to_vec).unwrap_or_default();
        let end = offset + data.len();
        if content.len() < end {
            content.resize(end, 0);
        }
        content[offset..end].copy_from_slice(data);
        self.push(version, Some(content), modified);
    }

    /// Append `data` to the current content
    pub fn append(&mut self, version: u64, data: &[u8], modified: Timestamp) {
        let mut content = self.head().map(<[u8]>::to_vec).unwrap_or_default();
        content.extend_from_slice(data);
        self.push(version, Some(content), modified);
    }

    /// Delete the object from the live state
    pub fn delete(&mut self, version: u64, modified: Timestamp) {
        self.push(version, None, modified);
    }

    /// Drop versions that neither the live state nor any pinned version sees
    ///
    /// `pinned` holds the creation versions of the snapshots that remain.
    pub fn retain_visible(&mut self, pinned: &[u64]) {
        let Some(head) = self.versions.last().map(|v| v.version) else {
            return;
        };
        let mut keep: Vec<u64> = pinned
            .iter()
            .filter_map(|&p| self.visible(p).map(|v| v.version))
            .collect();
        keep.push(head);
        self.versions.retain(|v| keep.contains(&v.version));

        // A lone tombstone carries no information
        if self.versions.len() == 1 && self.versions[0].data.is_none() {
            self.versions.clear();
        }
    }

    /// True when nothing is retained
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Number of retained versions, tombstones included
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }
}
