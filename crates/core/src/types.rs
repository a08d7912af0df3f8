//! Snapshot identifiers and metadata
//!
//! - `SnapId`: opaque cluster-assigned snapshot id
//! - `SNAP_HEAD`: the reserved "no snapshot" id meaning "read live data"
//! - `ReadEpoch`: the state a pool handle's reads resolve against
//! - `SnapshotInfo`: id, name and creation stamp of one snapshot
//! - `ObjectStat`: size and modification time of one object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;

/// Opaque snapshot identifier assigned by the cluster
///
/// Ids are only meaningful within the pool that created them and must not be
/// compared for recency. `Ord` exists so ids can be sorted and used as map
/// keys, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapId(u64);

/// The "no snapshot" id: reads on a handle set to this id see live data
///
/// Matches the cluster's head sentinel, `(u64)-2`.
pub const SNAP_HEAD: SnapId = SnapId(u64::MAX - 1);

impl SnapId {
    /// Wrap a raw id as reported by the cluster
    #[inline]
    pub const fn new(raw: u64) -> Self {
        SnapId(raw)
    }

    /// The raw id
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// True for the `SNAP_HEAD` sentinel
    #[inline]
    pub const fn is_head(&self) -> bool {
        self.0 == SNAP_HEAD.0
    }
}

impl From<u64> for SnapId {
    fn from(raw: u64) -> Self {
        SnapId(raw)
    }
}

impl From<SnapId> for u64 {
    fn from(id: SnapId) -> Self {
        id.0
    }
}

impl fmt::Display for SnapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_head() {
            write!(f, "head")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// The temporal view a pool handle reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadEpoch {
    /// Reads see the current live state
    #[default]
    Live,
    /// Reads see the pool as of the given snapshot
    PinnedTo(SnapId),
}

impl ReadEpoch {
    /// The id sent to the cluster for this epoch
    pub fn snap_id(&self) -> SnapId {
        match self {
            ReadEpoch::Live => SNAP_HEAD,
            ReadEpoch::PinnedTo(id) => *id,
        }
    }
}

impl From<SnapId> for ReadEpoch {
    fn from(id: SnapId) -> Self {
        if id.is_head() {
            ReadEpoch::Live
        } else {
            ReadEpoch::PinnedTo(id)
        }
    }
}

/// Read-only metadata of one pool snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    /// Cluster-assigned id
    pub id: SnapId,
    /// Name given at creation
    pub name: String,
    /// When the cluster took the snapshot
    pub created_at: Timestamp,
}

/// Size and modification time of one object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectStat {
    /// Object length in bytes
    pub size: u64,
    /// Time of the last write visible in the view that was read
    pub modified: Timestamp,
}
