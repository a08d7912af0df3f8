//! Defaults and name validation for snapshot operations

use crate::error::{Error, Result};

/// List bound used when a caller passes zero or a negative bound
pub const DEFAULT_LIST_LEN: usize = 512;

/// Reply buffer for snapshot names, including the terminator
pub const DEFAULT_NAME_BUF_LEN: usize = 4096;

/// Largest object a cluster stores; writes past it fail with `EFBIG`
pub const MAX_OBJECT_SIZE: usize = 128 * 1024 * 1024;

/// Reject names a new snapshot may not take
///
/// Names must be non-empty and may not contain NUL, which terminates names
/// on the wire.
pub fn validate_snap_name(op: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument(format!(
            "{}: snapshot name must not be empty",
            op
        )));
    }
    validate_snap_ref(op, name)
}

/// Reject names that cannot be sent to the cluster
///
/// Used for references to existing snapshots: an empty name is passed
/// through and the cluster answers `NotFound`, as for any unknown name.
pub fn validate_snap_ref(op: &str, name: &str) -> Result<()> {
    if name.contains('\0') {
        return Err(Error::invalid_argument(format!(
            "{} {:?}: snapshot name must not contain NUL",
            op, name
        )));
    }
    Ok(())
}
