//! One storage pool: its objects and its snapshot directory
//!
//! Pool methods answer with `Ok(value)` or `Err(errno)` (positive); the
//! cluster turns those into reply statuses. Versions and stamps are handed
//! in by the cluster so that all pools share one version sequence.

use std::collections::BTreeMap;

use poolsnap_core::errno::{EEXIST, EFBIG, EINVAL, ENOENT, ERANGE};
use poolsnap_core::{ObjectStat, SnapId, Timestamp, MAX_OBJECT_SIZE};

use crate::object::ObjectHistory;
use crate::registry::SnapRegistry;

/// Result of a pool operation: a value or a positive errno
pub type OpResult<T> = std::result::Result<T, i32>;

/// Objects and snapshots of one pool
#[derive(Debug, Clone, Default)]
pub struct Pool {
    objects: BTreeMap<String, ObjectHistory>,
    snaps: SnapRegistry,
}

impl Pool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Total retained object versions, tombstones included
    pub fn retained_versions(&self) -> usize {
        self.objects.values().map(ObjectHistory::version_count).sum()
    }

    /// Drop versions of `oid` that neither live reads nor any snapshot can see
    fn settle(&mut self, oid: &str) {
        let pinned = self.snaps.pinned_seqs();
        if let Some(history) = self.objects.get_mut(oid) {
            history.retain_visible(&pinned);
            if history.is_empty() {
                self.objects.remove(oid);
            }
        }
    }

    /// The highest version a read at `snap` may observe
    fn resolve_seq(&self, snap: SnapId) -> OpResult<u64> {
        if snap.is_head() {
            return Ok(u64::MAX);
        }
        self.snaps.get(snap).map(|e| e.seq).ok_or(ENOENT)
    }

    // ========================================================================
    // Snapshot directory
    // ========================================================================

    /// Take a pool-wide snapshot at version `seq`
    pub fn snap_create(&mut self, name: &str, seq: u64, stamp: Timestamp) -> OpResult<SnapId> {
        if name.is_empty() {
            return Err(EINVAL);
        }
        self.snaps.create(name, seq, stamp).ok_or(EEXIST)
    }

    /// Remove a snapshot and trim versions nothing can see any more
    pub fn snap_remove(&mut self, name: &str) -> OpResult<SnapId> {
        let (id, _) = self.snaps.remove(name).ok_or(ENOENT)?;
        let pinned = self.snaps.pinned_seqs();
        for history in self.objects.values_mut() {
            history.retain_visible(&pinned);
        }
        self.objects.retain(|_, h| !h.is_empty());
        Ok(id)
    }

    /// Resolve a snapshot name
    pub fn snap_lookup(&self, name: &str) -> OpResult<SnapId> {
        self.snaps.lookup(name).ok_or(ENOENT)
    }

    /// All snapshot ids, or `ERANGE` if there are more than `max_len`
    pub fn snap_list(&self, max_len: usize) -> OpResult<Vec<SnapId>> {
        if self.snaps.len() > max_len {
            return Err(ERANGE);
        }
        Ok(self.snaps.ids())
    }

    /// Snapshot name, or `ERANGE` if it does not fit `buf_len` with its terminator
    pub fn snap_get_name(&self, snap: SnapId, buf_len: usize) -> OpResult<String> {
        let entry = self.snaps.get(snap).ok_or(ENOENT)?;
        if entry.name.len() + 1 > buf_len {
            return Err(ERANGE);
        }
        Ok(entry.name.clone())
    }

    /// Snapshot creation stamp
    pub fn snap_get_stamp(&self, snap: SnapId) -> OpResult<Timestamp> {
        self.snaps.get(snap).map(|e| e.stamp).ok_or(ENOENT)
    }

    /// Restore an object's live content to its content in snapshot `name`
    ///
    /// An object absent from the snapshot is deleted from the live state; an
    /// object absent from both is `ENOENT`.
    pub fn snap_rollback(
        &mut self,
        oid: &str,
        name: &str,
        version: u64,
        stamp: Timestamp,
    ) -> OpResult<()> {
        let seq = self.snaps.get_by_name(name).ok_or(ENOENT)?.seq;
        let history = self.objects.get_mut(oid).ok_or(ENOENT)?;
        match history.at(seq).map(|(data, _)| data.to_vec()) {
            Some(data) => history.put(version, data, stamp),
            None if history.exists_live() => history.delete(version, stamp),
            None => return Err(ENOENT),
        }
        self.settle(oid);
        Ok(())
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// Write `data` at `offset`
    ///
    /// `EFBIG` if the write would end past `MAX_OBJECT_SIZE`.
    pub fn write(
        &mut self,
        oid: &str,
        data: &[u8],
        offset: u64,
        version: u64,
        stamp: Timestamp,
    ) -> OpResult<()> {
        let end = offset.checked_add(data.len() as u64).ok_or(EFBIG)?;
        check_size(end)?;
        self.objects
            .entry(oid.to_string())
            .or_default()
            .write_at(version, offset as usize, data, stamp);
        self.settle(oid);
        Ok(())
    }

    /// Replace the whole object
    pub fn write_full(
        &mut self,
        oid: &str,
        data: Vec<u8>,
        version: u64,
        stamp: Timestamp,
    ) -> OpResult<()> {
        check_size(data.len() as u64)?;
        self.objects
            .entry(oid.to_string())
            .or_default()
            .put(version, data, stamp);
        self.settle(oid);
        Ok(())
    }

    /// Append to the object, creating it if needed
    pub fn append(
        &mut self,
        oid: &str,
        data: &[u8],
        version: u64,
        stamp: Timestamp,
    ) -> OpResult<()> {
        let current = self
            .objects
            .get(oid)
            .and_then(ObjectHistory::head)
            .map_or(0, <[u8]>::len);
        check_size(current as u64 + data.len() as u64)?;
        self.objects
            .entry(oid.to_string())
            .or_default()
            .append(version, data, stamp);
        self.settle(oid);
        Ok(())
    }

    /// Delete the object from the live state
    pub fn remove(&mut self, oid: &str, version: u64, stamp: Timestamp) -> OpResult<()> {
        let history = self.objects.get_mut(oid).ok_or(ENOENT)?;
        if !history.exists_live() {
            return Err(ENOENT);
        }
        history.delete(version, stamp);
        self.settle(oid);
        Ok(())
    }

    /// Read up to `len` bytes at `offset` as of `snap`
    ///
    /// Reading at or past the end returns no bytes.
    pub fn read(&self, oid: &str, offset: u64, len: usize, snap: SnapId) -> OpResult<Vec<u8>> {
        let seq = self.resolve_seq(snap)?;
        let (data, _) = self
            .objects
            .get(oid)
            .and_then(|h| h.at(seq))
            .ok_or(ENOENT)?;
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(data.len());
        let end = start.saturating_add(len).min(data.len());
        Ok(data[start..end].to_vec())
    }

    /// Size and modification time as of `snap`
    pub fn stat(&self, oid: &str, snap: SnapId) -> OpResult<ObjectStat> {
        let seq = self.resolve_seq(snap)?;
        let (data, modified) = self
            .objects
            .get(oid)
            .and_then(|h| h.at(seq))
            .ok_or(ENOENT)?;
        Ok(ObjectStat {
            size: data.len() as u64,
            modified,
        })
    }
}

fn check_size(end: u64) -> OpResult<()> {
    if end > MAX_OBJECT_SIZE as u64 {
        return Err(EFBIG);
    }
    Ok(())
}
