//! Pool snapshot directory operations
//!
//! Each call is one synchronous request through the pool handle. The
//! directory performs no retries: in particular, `snap_list` reports
//! `RangeExceeded` when the pool holds more snapshots than the bound, and
//! growing the bound is up to the caller.
//!
//! ```ignore
//! let mut bound = 0;
//! let ids = loop {
//!     match pool.snap_list(bound) {
//!         Err(e) if e.is_range_exceeded() => bound = bound.max(256) * 2,
//!         other => break other?,
//!     }
//! };
//! ```

use tracing::info;

use poolsnap_core::{
    check_count, validate_snap_name, validate_snap_ref, Payload, Request, Result, SnapId,
    SnapshotInfo, Timestamp,
};

use crate::client::unexpected_payload;
use crate::handle::PoolHandle;

impl PoolHandle {
    /// Create a pool-wide snapshot named `name`
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if a snapshot with this name exists, `InvalidArgument`
    /// for an empty name, or the cluster's error for an unreachable pool or
    /// missing permission.
    pub fn snap_create(&self, name: &str) -> Result<()> {
        validate_snap_name("snap_create", name)?;
        self.send(
            Request::SnapCreate {
                pool: self.pool_name().to_string(),
                name: name.to_string(),
            },
            || format!("snap_create {:?} in pool {:?}", name, self.pool_name()),
        )?;
        info!(target: "poolsnap::client", pool = %self.pool_name(), name = %name, "Snapshot created");
        Ok(())
    }

    /// Remove the snapshot named `name`
    ///
    /// Handles pinned to the removed snapshot are not reset; their next read
    /// answers whatever the cluster decides (`NotFound` in practice).
    pub fn snap_remove(&self, name: &str) -> Result<()> {
        validate_snap_ref("snap_remove", name)?;
        self.send(
            Request::SnapRemove {
                pool: self.pool_name().to_string(),
                name: name.to_string(),
            },
            || format!("snap_remove {:?} in pool {:?}", name, self.pool_name()),
        )?;
        info!(target: "poolsnap::client", pool = %self.pool_name(), name = %name, "Snapshot removed");
        Ok(())
    }

    /// Resolve a snapshot name to its id
    pub fn snap_lookup(&self, name: &str) -> Result<SnapId> {
        validate_snap_ref("snap_lookup", name)?;
        let reply = self.send(
            Request::SnapLookup {
                pool: self.pool_name().to_string(),
                name: name.to_string(),
            },
            || format!("snap_lookup {:?} in pool {:?}", name, self.pool_name()),
        )?;
        match reply.payload {
            Payload::SnapId(id) => Ok(id),
            _ => Err(unexpected_payload("snap_lookup")),
        }
    }

    /// Ids of every snapshot of the pool, in cluster order
    ///
    /// `max_len` bounds how many ids the caller accepts; zero or negative
    /// means the configured default (512 unless changed).
    ///
    /// # Errors
    ///
    /// `RangeExceeded` if the pool has more snapshots than the bound. No
    /// partial list is returned.
    pub fn snap_list(&self, max_len: i32) -> Result<Vec<SnapId>> {
        let bound = if max_len < 1 {
            self.config().default_list_len
        } else {
            max_len as usize
        };
        let context = || {
            format!(
                "snap_list in pool {:?} with bound {}",
                self.pool_name(),
                bound
            )
        };
        let reply = self.send(
            Request::SnapList {
                pool: self.pool_name().to_string(),
                max_len: u32::try_from(bound).unwrap_or(u32::MAX),
            },
            context,
        )?;
        let count = check_count(reply.status, context)?;
        match reply.payload {
            Payload::SnapIds(ids) if ids.len() == count && count <= bound => Ok(ids),
            _ => Err(unexpected_payload("snap_list")),
        }
    }

    /// Name of the snapshot with id `snap`
    ///
    /// # Errors
    ///
    /// `NotFound` if the id no longer exists; `RangeExceeded` if the name does
    /// not fit the configured name buffer.
    pub fn snap_get_name(&self, snap: SnapId) -> Result<String> {
        let buf_len = self.config().name_buf_len;
        let reply = self.send(
            Request::SnapGetName {
                pool: self.pool_name().to_string(),
                snap,
                buf_len: u32::try_from(buf_len).unwrap_or(u32::MAX),
            },
            || format!("snap_get_name {} in pool {:?}", snap, self.pool_name()),
        )?;
        match reply.payload {
            Payload::Name(name) => Ok(name),
            _ => Err(unexpected_payload("snap_get_name")),
        }
    }

    /// Creation stamp of the snapshot with id `snap`
    pub fn snap_get_stamp(&self, snap: SnapId) -> Result<Timestamp> {
        let reply = self.send(
            Request::SnapGetStamp {
                pool: self.pool_name().to_string(),
                snap,
            },
            || format!("snap_get_stamp {} in pool {:?}", snap, self.pool_name()),
        )?;
        match reply.payload {
            Payload::Stamp(stamp) => Ok(stamp),
            _ => Err(unexpected_payload("snap_get_stamp")),
        }
    }

    /// Name and stamp of `snap`, fetched with two follow-up requests
    ///
    /// The snapshot may disappear between the two requests, in which case
    /// the second one fails with `NotFound`.
    pub fn snap_info(&self, snap: SnapId) -> Result<SnapshotInfo> {
        let name = self.snap_get_name(snap)?;
        let created_at = self.snap_get_stamp(snap)?;
        Ok(SnapshotInfo {
            id: snap,
            name,
            created_at,
        })
    }
}
