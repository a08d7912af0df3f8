//! Object rollback to a pool snapshot

use tracing::info;

use poolsnap_core::{validate_snap_ref, Request, Result};

use crate::handle::PoolHandle;

impl PoolHandle {
    /// Overwrite `oid`'s live content with its content in snapshot `snap_name`
    ///
    /// Destructive and immediate. Only `oid` changes and no snapshot is
    /// created. The handle's read epoch plays no part: the snapshot is named
    /// explicitly and the write lands on the live state.
    ///
    /// # Errors
    ///
    /// `NotFound` if the snapshot does not exist, or if the object exists
    /// neither live nor in the snapshot.
    pub fn snap_rollback(&self, oid: &str, snap_name: &str) -> Result<()> {
        validate_snap_ref("snap_rollback", snap_name)?;
        self.send(
            Request::SnapRollback {
                pool: self.pool_name().to_string(),
                oid: oid.to_string(),
                name: snap_name.to_string(),
            },
            || {
                format!(
                    "snap_rollback {:?} to {:?} in pool {:?}",
                    oid,
                    snap_name,
                    self.pool_name()
                )
            },
        )?;
        info!(target: "poolsnap::client", pool = %self.pool_name(), oid = %oid, snap = %snap_name, "Object rolled back");
        Ok(())
    }
}
