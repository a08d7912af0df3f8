//! In-memory reference cluster for poolsnap
//!
//! This crate implements the cluster side of the snapshot protocol:
//! - MemCluster: pools behind a `parking_lot::RwLock`, answering typed requests
//! - ObjectHistory: copy-on-write object versions, read back at any snapshot
//! - SnapRegistry: per-pool snapshot directory with cluster-assigned ids
//!
//! # Versioning
//!
//! A cluster-wide `AtomicU64` assigns each write a monotonically increasing
//! version. A snapshot records the version current at its creation, and a
//! read pinned to it sees, per object, the newest version at or below it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cluster;
pub mod object;
pub mod pool;
pub mod registry;

pub use cluster::MemCluster;
pub use object::ObjectHistory;
pub use pool::Pool;
pub use registry::{SnapEntry, SnapRegistry};
