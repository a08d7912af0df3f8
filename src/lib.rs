//! poolsnap - Pool-wide snapshots for distributed object-storage pools
//!
//! A snapshot captures the state of every object in a pool at one instant.
//! Snapshots are created and removed by name, enumerated by id, queried for
//! name and creation stamp, used as a read epoch for subsequent reads, and
//! used to roll individual objects back.
//!
//! # Quick Start
//!
//! ```
//! use poolsnap::{Client, MemCluster, SNAP_HEAD};
//!
//! # fn main() -> poolsnap::Result<()> {
//! let client = Client::connect(MemCluster::new());
//! client.create_pool("rbd")?;
//! let mut pool = client.open_pool("rbd")?;
//!
//! pool.write_full("obj", b"v1")?;
//! pool.snap_create("before")?;
//! pool.write_full("obj", b"v2")?;
//!
//! pool.set_snap_read(pool.snap_lookup("before")?);
//! let mut buf = [0u8; 8];
//! let n = pool.read("obj", &mut buf, 0)?;
//! assert_eq!(&buf[..n], b"v1");
//! pool.set_snap_read(SNAP_HEAD);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The client speaks to a cluster through the [`ClusterTransport`] trait.
//! [`MemCluster`] is the in-process cluster used for tests and embedding.

// Re-export the public API from poolsnap-client
pub use poolsnap_client::*;

pub use poolsnap_storage::MemCluster;
