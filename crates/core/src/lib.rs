//! Core types for poolsnap
//!
//! This crate defines the foundational types shared by the client and the
//! cluster side:
//! - SnapId: Cluster-assigned snapshot identifier (and the `SNAP_HEAD` sentinel)
//! - SnapshotInfo: Read-only snapshot metadata
//! - ReadEpoch: The temporal view a pool handle reads from
//! - Timestamp: Microsecond-precision creation stamps
//! - Request/Reply: The typed request/response messages exchanged with a cluster
//! - ClusterTransport: The synchronous RPC seam
//! - Error: Error taxonomy and the status-code translation table

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errno;
pub mod error;
pub mod limits;
pub mod rpc;
pub mod timestamp;
pub mod traits;
pub mod types;

pub use error::{check, check_count, Error, ErrorKind, Result};
pub use limits::{
    validate_snap_name, validate_snap_ref, DEFAULT_LIST_LEN, DEFAULT_NAME_BUF_LEN, MAX_OBJECT_SIZE,
};
pub use rpc::{Payload, Reply, Request};
pub use timestamp::Timestamp;
pub use traits::ClusterTransport;
pub use types::{ObjectStat, ReadEpoch, SnapId, SnapshotInfo, SNAP_HEAD};
