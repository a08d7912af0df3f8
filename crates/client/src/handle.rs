//! PoolHandle: a handle on one pool and its read epoch
//!
//! A pool handle carries exactly one piece of mutable state: the snapshot
//! its reads resolve against. The snapshot directory, rollback and object
//! I/O operations live in their own modules as further `impl PoolHandle`
//! blocks.
//!
//! # Read epoch
//!
//! ```text
//!            set_snap_read(id)
//!   Live  ───────────────────────▶  PinnedTo(id)
//!     ▲                                  │
//!     └──────── set_snap_read(SNAP_HEAD) ┘
//! ```
//!
//! Every `read` and `stat` sends the current epoch with the request; writes
//! always go to the live state.
//!
//! # Concurrency
//!
//! The epoch is a plain field behind `&mut self`, with no locking. Only one
//! thread can change a handle's epoch at a time; a handle shared between
//! threads for mutation needs the caller's own lock. Clones copy the epoch
//! and then evolve independently.

use std::fmt;
use std::sync::Arc;

use poolsnap_core::{ClusterTransport, ReadEpoch, Reply, Request, Result, SnapId, SNAP_HEAD};
use tracing::debug;

use crate::client::send;
use crate::config::ClientConfig;

/// Handle on one pool
#[derive(Clone)]
pub struct PoolHandle {
    transport: Arc<dyn ClusterTransport>,
    config: Arc<ClientConfig>,
    pool: String,
    /// Snapshot reads resolve against, `SNAP_HEAD` for live data
    snap_read: SnapId,
}

impl fmt::Debug for PoolHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolHandle")
            .field("pool", &self.pool)
            .field("snap_read", &self.snap_read)
            .finish_non_exhaustive()
    }
}

impl PoolHandle {
    pub(crate) fn new(
        transport: Arc<dyn ClusterTransport>,
        config: Arc<ClientConfig>,
        pool: String,
    ) -> Self {
        Self {
            transport,
            config,
            pool,
            snap_read: SNAP_HEAD,
        }
    }

    /// Name of the pool this handle is bound to
    pub fn pool_name(&self) -> &str {
        &self.pool
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Set the snapshot subsequent reads and stats resolve against
    ///
    /// Pass `SNAP_HEAD` to go back to live data. Purely local: no request is
    /// sent and the id is not checked, so pinning to an id that does not
    /// exist surfaces as `NotFound` on the next read.
    pub fn set_snap_read(&mut self, snap: SnapId) {
        debug!(target: "poolsnap::client", pool = %self.pool, snap = %snap, "Read epoch set");
        self.snap_read = snap;
    }

    /// The snapshot reads currently resolve against
    pub fn snap_read(&self) -> SnapId {
        self.snap_read
    }

    /// The current read epoch as a state
    pub fn read_epoch(&self) -> ReadEpoch {
        ReadEpoch::from(self.snap_read)
    }

    pub(crate) fn send(&self, request: Request, context: impl FnOnce() -> String) -> Result<Reply> {
        send(self.transport.as_ref(), request, context)
    }
}
