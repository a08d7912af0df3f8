//! POSIX errno values used on the wire
//!
//! Cluster replies carry `-errno` on failure. Only the codes the client
//! classifies are listed here; anything else surfaces as `Error::Unknown`.

/// Operation not permitted
pub const EPERM: i32 = 1;
/// No such object, snapshot or pool
pub const ENOENT: i32 = 2;
/// Permission denied
pub const EACCES: i32 = 13;
/// Entity exists
pub const EEXIST: i32 = 17;
/// Object would exceed the maximum object size
pub const EFBIG: i32 = 27;
/// Invalid argument
pub const EINVAL: i32 = 22;
/// Read-only target
pub const EROFS: i32 = 30;
/// Result does not fit the supplied buffer
pub const ERANGE: i32 = 34;
/// Transport endpoint is not connected
pub const ENOTCONN: i32 = 107;
/// Transport endpoint has shut down
pub const ESHUTDOWN: i32 = 108;
/// Connection timed out
pub const ETIMEDOUT: i32 = 110;
/// Connection refused
pub const ECONNREFUSED: i32 = 111;
