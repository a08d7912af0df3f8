//! Error types for poolsnap
//!
//! Every cluster call answers with a signed status: zero (or a non-negative
//! count) on success, `-errno` on failure. This module owns the translation
//! table from those codes to typed errors. We use `thiserror` for automatic
//! `Display` and `Error` trait implementations.

use thiserror::Error;

use crate::errno::{
    EACCES, ECONNREFUSED, EEXIST, EINVAL, ENOENT, ENOTCONN, EPERM, ERANGE, EROFS, ESHUTDOWN,
    ETIMEDOUT,
};

/// Result type alias for poolsnap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`], for callers that branch on the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Duplicate snapshot name (or pool name)
    AlreadyExists,
    /// Unknown snapshot name, snapshot id, object or pool
    NotFound,
    /// Result does not fit the caller-supplied bound
    RangeExceeded,
    /// Caller lacks permission for the operation
    PermissionDenied,
    /// Cluster could not be reached
    Unreachable,
    /// Request rejected as malformed
    InvalidArgument,
    /// Any cluster code not otherwise classified
    Unknown,
}

/// Error types for snapshot and object operations
///
/// Each variant carries a context string naming the operation and its
/// subject, e.g. `snap_create "nightly"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The entity already exists
    #[error("Already exists: {context}")]
    AlreadyExists {
        /// Operation and subject
        context: String,
    },

    /// The entity does not exist
    #[error("Not found: {context}")]
    NotFound {
        /// Operation and subject
        context: String,
    },

    /// The result exceeds the caller-supplied bound; no partial result is kept
    #[error("Result out of range: {context}")]
    RangeExceeded {
        /// Operation and subject
        context: String,
    },

    /// The cluster refused the operation
    #[error("Permission denied ({code}): {context}")]
    PermissionDenied {
        /// Operation and subject
        context: String,
        /// Positive errno reported by the cluster
        code: i32,
    },

    /// The cluster could not be reached
    ///
    /// `code` is `None` when the failure happened on the client side of the
    /// transport (e.g. a message that could not be encoded).
    #[error("Cluster unreachable: {context}")]
    Unreachable {
        /// Operation and subject, or the local transport failure
        context: String,
        /// Positive errno reported by the cluster, if any
        code: Option<i32>,
    },

    /// The request was malformed
    #[error("Invalid argument: {context}")]
    InvalidArgument {
        /// Operation and subject
        context: String,
    },

    /// A status code with no classification
    #[error("Cluster error {code}: {context}")]
    Unknown {
        /// Operation and subject
        context: String,
        /// Positive errno reported by the cluster
        code: i32,
    },
}

impl Error {
    /// Translate a negative cluster status into a typed error
    ///
    /// `status` is expected to be negative; a non-negative value is treated as
    /// an unclassified code rather than silently accepted.
    pub fn from_status(status: i32, context: impl Into<String>) -> Self {
        let context = context.into();
        let code = status.checked_neg().unwrap_or(i32::MAX);
        match code {
            EEXIST => Error::AlreadyExists { context },
            ENOENT => Error::NotFound { context },
            ERANGE => Error::RangeExceeded { context },
            EPERM | EACCES | EROFS => Error::PermissionDenied { context, code },
            ENOTCONN | ESHUTDOWN | ETIMEDOUT | ECONNREFUSED => Error::Unreachable {
                context,
                code: Some(code),
            },
            EINVAL => Error::InvalidArgument { context },
            _ => Error::Unknown { context, code },
        }
    }

    /// Create an invalid argument error for a request rejected before sending
    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Error::InvalidArgument {
            context: context.into(),
        }
    }

    /// Create an unreachable error for a client-side transport failure
    pub fn transport(context: impl Into<String>) -> Self {
        Error::Unreachable {
            context: context.into(),
            code: None,
        }
    }

    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::RangeExceeded { .. } => ErrorKind::RangeExceeded,
            Error::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Error::Unreachable { .. } => ErrorKind::Unreachable,
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// The negative status code this error corresponds to
    ///
    /// Client-side transport failures report `-ENOTCONN`.
    pub fn status(&self) -> i32 {
        let code = match self {
            Error::AlreadyExists { .. } => EEXIST,
            Error::NotFound { .. } => ENOENT,
            Error::RangeExceeded { .. } => ERANGE,
            Error::PermissionDenied { code, .. } => *code,
            Error::Unreachable { code, .. } => code.unwrap_or(ENOTCONN),
            Error::InvalidArgument { .. } => EINVAL,
            Error::Unknown { code, .. } => *code,
        };
        -code
    }

    /// The operation context attached to this error
    pub fn context(&self) -> &str {
        match self {
            Error::AlreadyExists { context }
            | Error::NotFound { context }
            | Error::RangeExceeded { context }
            | Error::PermissionDenied { context, .. }
            | Error::Unreachable { context, .. }
            | Error::InvalidArgument { context }
            | Error::Unknown { context, .. } => context,
        }
    }

    /// True for [`ErrorKind::NotFound`]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// True for [`ErrorKind::AlreadyExists`]
    pub fn is_already_exists(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }

    /// True for [`ErrorKind::RangeExceeded`]
    pub fn is_range_exceeded(&self) -> bool {
        self.kind() == ErrorKind::RangeExceeded
    }
}

/// Map a status to `Ok(())` for zero and a typed error otherwise
///
/// The context closure only runs on failure.
pub fn check(status: i32, context: impl FnOnce() -> String) -> Result<()> {
    if status == 0 {
        Ok(())
    } else {
        Err(Error::from_status(status, context()))
    }
}

/// Accept a non-negative status as a count, map a negative one to an error
pub fn check_count(status: i32, context: impl FnOnce() -> String) -> Result<usize> {
    if status < 0 {
        Err(Error::from_status(status, context()))
    } else {
        Ok(status as usize)
    }
}
