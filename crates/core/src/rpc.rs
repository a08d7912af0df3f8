//! Request and reply messages exchanged with a cluster
//!
//! Every client operation is one [`Request`] answered by one [`Reply`]. A
//! reply carries a signed status in the cluster's convention (non-negative on
//! success, `-errno` on failure) and a typed payload that is only meaningful
//! on success.
//!
//! | Request | Success status | Payload |
//! |---------|----------------|---------|
//! | SnapCreate, SnapRemove, SnapRollback | 0 | `Empty` |
//! | SnapLookup | 0 | `SnapId` |
//! | SnapList | count | `SnapIds` |
//! | SnapGetName | 0 | `Name` |
//! | SnapGetStamp | 0 | `Stamp` |
//! | PoolCreate, PoolDelete | 0 | `Empty` |
//! | PoolList | count | `Names` |
//! | PoolLookup | 0 | `Empty` |
//! | Write, WriteFull, Append, Remove | 0 | `Empty` |
//! | Read | bytes read | `Data` |
//! | Stat | 0 | `Stat` |

use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;
use crate::types::{ObjectStat, SnapId};

/// A self-contained cluster operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    // ==================== Snapshot directory ====================
    /// Create a pool-wide snapshot
    SnapCreate {
        /// Pool name
        pool: String,
        /// Snapshot name
        name: String,
    },

    /// Remove a pool-wide snapshot
    SnapRemove {
        /// Pool name
        pool: String,
        /// Snapshot name
        name: String,
    },

    /// Resolve a snapshot name to its id
    SnapLookup {
        /// Pool name
        pool: String,
        /// Snapshot name
        name: String,
    },

    /// List snapshot ids, failing with `-ERANGE` above `max_len`
    SnapList {
        /// Pool name
        pool: String,
        /// Largest number of ids the caller accepts
        max_len: u32,
    },

    /// Resolve a snapshot id to its name
    SnapGetName {
        /// Pool name
        pool: String,
        /// Snapshot id
        snap: SnapId,
        /// Reply buffer size including the terminator
        buf_len: u32,
    },

    /// Resolve a snapshot id to its creation stamp
    SnapGetStamp {
        /// Pool name
        pool: String,
        /// Snapshot id
        snap: SnapId,
    },

    // ==================== Rollback ====================
    /// Replace an object's live content with its content in a snapshot
    SnapRollback {
        /// Pool name
        pool: String,
        /// Object id
        oid: String,
        /// Snapshot name
        name: String,
    },

    // ==================== Pools ====================
    /// Create a pool
    PoolCreate {
        /// Pool name
        pool: String,
    },

    /// Delete a pool together with its objects and snapshots
    PoolDelete {
        /// Pool name
        pool: String,
    },

    /// Check that a pool exists
    PoolLookup {
        /// Pool name
        pool: String,
    },

    /// List pool names
    PoolList,

    // ==================== Objects ====================
    /// Write bytes at an offset, extending the object as needed
    Write {
        /// Pool name
        pool: String,
        /// Object id
        oid: String,
        /// Bytes to write
        data: Vec<u8>,
        /// Byte offset
        offset: u64,
    },

    /// Replace the whole object
    WriteFull {
        /// Pool name
        pool: String,
        /// Object id
        oid: String,
        /// New content
        data: Vec<u8>,
    },

    /// Append bytes to the end of the object
    Append {
        /// Pool name
        pool: String,
        /// Object id
        oid: String,
        /// Bytes to append
        data: Vec<u8>,
    },

    /// Read up to `len` bytes at `offset` as of `snap`
    Read {
        /// Pool name
        pool: String,
        /// Object id
        oid: String,
        /// Byte offset
        offset: u64,
        /// Maximum bytes to return
        len: u32,
        /// Read epoch, `SNAP_HEAD` for live data
        snap: SnapId,
    },

    /// Stat an object as of `snap`
    Stat {
        /// Pool name
        pool: String,
        /// Object id
        oid: String,
        /// Read epoch, `SNAP_HEAD` for live data
        snap: SnapId,
    },

    /// Remove an object from the live state
    Remove {
        /// Pool name
        pool: String,
        /// Object id
        oid: String,
    },
}

impl Request {
    /// Operation name, for logs and error context
    pub fn op(&self) -> &'static str {
        match self {
            Request::SnapCreate { .. } => "snap_create",
            Request::SnapRemove { .. } => "snap_remove",
            Request::SnapLookup { .. } => "snap_lookup",
            Request::SnapList { .. } => "snap_list",
            Request::SnapGetName { .. } => "snap_get_name",
            Request::SnapGetStamp { .. } => "snap_get_stamp",
            Request::SnapRollback { .. } => "snap_rollback",
            Request::PoolCreate { .. } => "pool_create",
            Request::PoolDelete { .. } => "pool_delete",
            Request::PoolLookup { .. } => "pool_lookup",
            Request::PoolList => "pool_list",
            Request::Write { .. } => "write",
            Request::WriteFull { .. } => "write_full",
            Request::Append { .. } => "append",
            Request::Read { .. } => "read",
            Request::Stat { .. } => "stat",
            Request::Remove { .. } => "remove",
        }
    }

    /// True for requests that change cluster state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Request::SnapCreate { .. }
                | Request::SnapRemove { .. }
                | Request::SnapRollback { .. }
                | Request::PoolCreate { .. }
                | Request::PoolDelete { .. }
                | Request::Write { .. }
                | Request::WriteFull { .. }
                | Request::Append { .. }
                | Request::Remove { .. }
        )
    }
}

/// Typed result data carried by a successful [`Reply`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// No return value
    Empty,
    /// Single snapshot id
    SnapId(SnapId),
    /// Snapshot ids in cluster order
    SnapIds(Vec<SnapId>),
    /// Snapshot name
    Name(String),
    /// List of names
    Names(Vec<String>),
    /// Creation stamp
    Stamp(Timestamp),
    /// Object bytes
    Data(Vec<u8>),
    /// Object stat
    Stat(ObjectStat),
}

/// The answer to one [`Request`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Non-negative on success, `-errno` on failure
    pub status: i32,
    /// Result data, `Payload::Empty` on failure
    pub payload: Payload,
}

impl Reply {
    /// Success with no data
    pub fn ok() -> Self {
        Reply {
            status: 0,
            payload: Payload::Empty,
        }
    }

    /// Success carrying a payload
    pub fn with(payload: Payload) -> Self {
        Reply { status: 0, payload }
    }

    /// Success carrying a count and a payload
    pub fn counted(count: usize, payload: Payload) -> Self {
        Reply {
            status: i32::try_from(count).unwrap_or(i32::MAX),
            payload,
        }
    }

    /// Failure with `-errno`
    pub fn err(errno: i32) -> Self {
        Reply {
            status: -errno,
            payload: Payload::Empty,
        }
    }

    /// True for a non-negative status
    pub fn is_ok(&self) -> bool {
        self.status >= 0
    }
}
