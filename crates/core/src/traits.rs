//! The cluster transport seam
//!
//! Clients never talk to a cluster directly; they hand typed requests to a
//! `ClusterTransport` and translate the reply status themselves. This lets
//! the in-memory cluster, a codec wrapper, or a real network client sit
//! behind the same pool handle.

use crate::rpc::{Reply, Request};

/// Synchronous request/reply channel to one cluster
///
/// Thread safety: implementations must accept concurrent calls from
/// multiple threads (requires Send + Sync). Each call blocks until the
/// cluster answers; timeouts and cancellation belong to the implementation.
pub trait ClusterTransport: Send + Sync {
    /// Issue one request and wait for its reply
    ///
    /// Failures are reported in `Reply::status`, never by panicking.
    fn call(&self, request: Request) -> Reply;
}

impl<T: ClusterTransport + ?Sized> ClusterTransport for std::sync::Arc<T> {
    fn call(&self, request: Request) -> Reply {
        (**self).call(request)
    }
}

impl<T: ClusterTransport + ?Sized> ClusterTransport for Box<T> {
    fn call(&self, request: Request) -> Reply {
        (**self).call(request)
    }
}
