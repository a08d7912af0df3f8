//! MemCluster: in-memory cluster answering snapshot and object requests
//!
//! This module implements `ClusterTransport` using:
//! - `BTreeMap<String, Pool>` behind a `parking_lot::RwLock`
//! - `AtomicU64` for the cluster-wide write version
//! - `AtomicBool` switches for failure injection (offline, read-only)
//!
//! # Design Notes
//!
//! - **Version allocation under the write lock**: a snapshot records the
//!   current version while holding the same lock writers allocate under, so
//!   it can never observe half of a write
//! - **Status codes**: every answer follows the cluster convention, zero or a
//!   count on success and `-errno` on failure

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, info};

use poolsnap_core::errno::{EEXIST, EINVAL, ENOENT, ENOTCONN, EPERM};
use poolsnap_core::{ClusterTransport, Payload, Reply, Request, Timestamp};

use crate::pool::{OpResult, Pool};

/// In-memory cluster holding any number of pools
///
/// Thread-safe: requests from many clients and threads may be served
/// concurrently. Reads share the lock; mutations take it exclusively.
#[derive(Debug)]
pub struct MemCluster {
    pools: RwLock<BTreeMap<String, Pool>>,
    /// Last allocated write version
    version: AtomicU64,
    online: AtomicBool,
    read_only: AtomicBool,
}

impl Default for MemCluster {
    fn default() -> Self {
        Self::new()
    }
}

impl MemCluster {
    /// Create an empty cluster with no pools
    pub fn new() -> Self {
        Self {
            pools: RwLock::new(BTreeMap::new()),
            version: AtomicU64::new(0),
            online: AtomicBool::new(true),
            read_only: AtomicBool::new(false),
        }
    }

    /// Take the cluster offline; every request then fails with `-ENOTCONN`
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Refuse every mutating request with `-EPERM`
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Last allocated write version
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Total retained object versions in a pool, `None` for an unknown pool
    pub fn retained_versions(&self, pool: &str) -> Option<usize> {
        self.pools.read().get(pool).map(Pool::retained_versions)
    }

    /// Allocate the next write version
    ///
    /// Callers hold the pools write lock, which keeps versions in the same
    /// order as the writes they label.
    fn next_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn with_pool<T>(&self, pool: &str, f: impl FnOnce(&Pool) -> OpResult<T>) -> OpResult<T> {
        let pools = self.pools.read();
        pools.get(pool).ok_or(ENOENT).and_then(f)
    }

    fn with_pool_mut<T>(
        &self,
        pool: &str,
        f: impl FnOnce(&mut Pool, u64, Timestamp) -> OpResult<T>,
    ) -> OpResult<T> {
        let mut pools = self.pools.write();
        let target = pools.get_mut(pool).ok_or(ENOENT)?;
        let version = self.next_version();
        f(target, version, Timestamp::now())
    }

    fn dispatch(&self, request: Request) -> OpResult<Reply> {
        match request {
            Request::SnapCreate { pool, name } => {
                let mut pools = self.pools.write();
                let target = pools.get_mut(&pool).ok_or(ENOENT)?;
                let seq = self.current_version();
                let id = target.snap_create(&name, seq, Timestamp::now())?;
                info!(target: "poolsnap::cluster", pool = %pool, snap = %id, name = %name, seq, "Snapshot created");
                Ok(Reply::ok())
            }
            Request::SnapRemove { pool, name } => {
                let mut pools = self.pools.write();
                let target = pools.get_mut(&pool).ok_or(ENOENT)?;
                let id = target.snap_remove(&name)?;
                info!(target: "poolsnap::cluster", pool = %pool, snap = %id, name = %name, "Snapshot removed");
                Ok(Reply::ok())
            }
            Request::SnapLookup { pool, name } => self
                .with_pool(&pool, |p| p.snap_lookup(&name))
                .map(|id| Reply::with(Payload::SnapId(id))),
            Request::SnapList { pool, max_len } => self
                .with_pool(&pool, |p| p.snap_list(max_len as usize))
                .map(|ids| Reply::counted(ids.len(), Payload::SnapIds(ids))),
            Request::SnapGetName {
                pool,
                snap,
                buf_len,
            } => self
                .with_pool(&pool, |p| p.snap_get_name(snap, buf_len as usize))
                .map(|name| Reply::with(Payload::Name(name))),
            Request::SnapGetStamp { pool, snap } => self
                .with_pool(&pool, |p| p.snap_get_stamp(snap))
                .map(|stamp| Reply::with(Payload::Stamp(stamp))),
            Request::SnapRollback { pool, oid, name } => {
                self.with_pool_mut(&pool, |p, version, now| {
                    p.snap_rollback(&oid, &name, version, now)
                })?;
                info!(target: "poolsnap::cluster", pool = %pool, oid = %oid, name = %name, "Object rolled back");
                Ok(Reply::ok())
            }
            Request::PoolCreate { pool } => {
                if pool.is_empty() {
                    return Err(EINVAL);
                }
                let mut pools = self.pools.write();
                if pools.contains_key(&pool) {
                    return Err(EEXIST);
                }
                pools.insert(pool, Pool::new());
                Ok(Reply::ok())
            }
            Request::PoolDelete { pool } => {
                self.pools.write().remove(&pool).ok_or(ENOENT)?;
                Ok(Reply::ok())
            }
            Request::PoolLookup { pool } => self.with_pool(&pool, |_| Ok(Reply::ok())),
            Request::PoolList => {
                let names: Vec<String> = self.pools.read().keys().cloned().collect();
                Ok(Reply::counted(names.len(), Payload::Names(names)))
            }
            Request::Write {
                pool,
                oid,
                data,
                offset,
            } => self
                .with_pool_mut(&pool, |p, version, now| {
                    p.write(&oid, &data, offset, version, now)
                })
                .map(|_| Reply::ok()),
            Request::WriteFull { pool, oid, data } => self
                .with_pool_mut(&pool, |p, version, now| p.write_full(&oid, data, version, now))
                .map(|_| Reply::ok()),
            Request::Append { pool, oid, data } => self
                .with_pool_mut(&pool, |p, version, now| p.append(&oid, &data, version, now))
                .map(|_| Reply::ok()),
            Request::Read {
                pool,
                oid,
                offset,
                len,
                snap,
            } => self
                .with_pool(&pool, |p| p.read(&oid, offset, len as usize, snap))
                .map(|data| Reply::counted(data.len(), Payload::Data(data))),
            Request::Stat { pool, oid, snap } => self
                .with_pool(&pool, |p| p.stat(&oid, snap))
                .map(|stat| Reply::with(Payload::Stat(stat))),
            Request::Remove { pool, oid } => self
                .with_pool_mut(&pool, |p, version, now| p.remove(&oid, version, now))
                .map(|_| Reply::ok()),
        }
    }
}

impl ClusterTransport for MemCluster {
    fn call(&self, request: Request) -> Reply {
        let op = request.op();
        if !self.online.load(Ordering::SeqCst) {
            debug!(target: "poolsnap::cluster", op, "Refused: cluster offline");
            return Reply::err(ENOTCONN);
        }
        if request.is_mutation() && self.read_only.load(Ordering::SeqCst) {
            debug!(target: "poolsnap::cluster", op, "Refused: cluster read-only");
            return Reply::err(EPERM);
        }
        match self.dispatch(request) {
            Ok(reply) => {
                debug!(target: "poolsnap::cluster", op, status = reply.status, "Request served");
                reply
            }
            Err(errno) => {
                debug!(target: "poolsnap::cluster", op, errno, "Request failed");
                Reply::err(errno)
            }
        }
    }
}
