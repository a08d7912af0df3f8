//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::{Arc, Once};

pub use poolsnap::{
    Client, ClientConfig, CodecKind, ErrorKind, MemCluster, PoolHandle, ReadEpoch, SnapId,
    SNAP_HEAD,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route tracing output through the test harness's captured writer.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

// ============================================================================
// TestPool - cluster, client and one open pool
// ============================================================================

/// A fresh cluster with one pool named "rbd" already open.
pub struct TestPool {
    pub cluster: Arc<MemCluster>,
    pub client: Client,
    pub pool: PoolHandle,
}

impl TestPool {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        init_tracing();
        let cluster = Arc::new(MemCluster::new());
        let client = Client::new(Arc::clone(&cluster), config).expect("valid config");
        client.create_pool("rbd").expect("create pool");
        let pool = client.open_pool("rbd").expect("open pool");
        Self {
            cluster,
            client,
            pool,
        }
    }

    /// Another handle on the same pool, starting out live.
    pub fn reopen(&self) -> PoolHandle {
        self.client.open_pool("rbd").expect("open pool")
    }
}

/// Read the whole object (up to 4 KiB) through `pool`'s current epoch.
pub fn read_all(pool: &PoolHandle, oid: &str) -> poolsnap::Result<Vec<u8>> {
    let mut buf = vec![0u8; 4096];
    let n = pool.read(oid, &mut buf, 0)?;
    buf.truncate(n);
    Ok(buf)
}

/// Distinct, valid snapshot names.
pub fn snap_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("snap-{:04}", i)).collect()
}
