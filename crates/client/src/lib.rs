//! # poolsnap client
//!
//! Client-side management of pool-wide snapshots in a distributed object
//! store. It provides:
//! - [`Client`] - a connection to one cluster, used to open pool handles
//! - [`PoolHandle`] - snapshot directory, read epoch, rollback and object I/O
//! - [`ClientConfig`] - settings loaded from `poolsnap.toml`
//! - [`MsgpackTransport`] - the MessagePack wire codec as a transport wrapper
//!
//! ## Quick Start
//!
//! ```
//! use poolsnap_client::{Client, SNAP_HEAD};
//! use poolsnap_storage::MemCluster;
//!
//! # fn main() -> poolsnap_client::Result<()> {
//! let client = Client::connect(MemCluster::new());
//! client.create_pool("rbd")?;
//! let mut pool = client.open_pool("rbd")?;
//!
//! pool.write_full("obj42", b"initial input data")?;
//! pool.snap_create("test")?;
//! pool.append("obj42", b" additional data appended")?;
//!
//! // Read as of the snapshot
//! pool.set_snap_read(pool.snap_lookup("test")?);
//! let mut buf = [0u8; 43];
//! assert_eq!(pool.read("obj42", &mut buf, 0)?, 18);
//!
//! // Back to live data
//! pool.set_snap_read(SNAP_HEAD);
//! assert_eq!(pool.read("obj42", &mut buf, 0)?, 43);
//!
//! pool.snap_remove("test")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
pub mod codec;
mod config;
mod directory;
mod handle;
mod io;
mod rollback;

pub use client::Client;
pub use codec::{CodecError, MsgpackTransport};
pub use config::{ClientConfig, CodecKind, ConfigError, CONFIG_FILE_NAME};
pub use handle::PoolHandle;

// Re-export core types so callers don't need poolsnap-core directly
pub use poolsnap_core::errno;
pub use poolsnap_core::{
    ClusterTransport, Error, ErrorKind, ObjectStat, Payload, ReadEpoch, Reply, Request, Result,
    SnapId, SnapshotInfo, Timestamp, MAX_OBJECT_SIZE, SNAP_HEAD,
};
