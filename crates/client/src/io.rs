//! Object I/O on a pool handle
//!
//! Reads and stats carry the handle's read epoch; writes, appends and
//! removals always target the live state.

use poolsnap_core::{ObjectStat, Payload, Request, Result};

use crate::client::unexpected_payload;
use crate::handle::PoolHandle;

impl PoolHandle {
    /// Write `data` at `offset`, extending the object as needed
    pub fn write(&self, oid: &str, data: &[u8], offset: u64) -> Result<()> {
        self.send(
            Request::Write {
                pool: self.pool_name().to_string(),
                oid: oid.to_string(),
                data: data.to_vec(),
                offset,
            },
            || format!("write {:?} at {} in pool {:?}", oid, offset, self.pool_name()),
        )?;
        Ok(())
    }

    /// Replace the whole object with `data`
    pub fn write_full(&self, oid: &str, data: &[u8]) -> Result<()> {
        self.send(
            Request::WriteFull {
                pool: self.pool_name().to_string(),
                oid: oid.to_string(),
                data: data.to_vec(),
            },
            || format!("write_full {:?} in pool {:?}", oid, self.pool_name()),
        )?;
        Ok(())
    }

    /// Append `data` to the object, creating it if needed
    pub fn append(&self, oid: &str, data: &[u8]) -> Result<()> {
        self.send(
            Request::Append {
                pool: self.pool_name().to_string(),
                oid: oid.to_string(),
                data: data.to_vec(),
            },
            || format!("append {:?} in pool {:?}", oid, self.pool_name()),
        )?;
        Ok(())
    }

    /// Read into `buf` from `offset` as of the current read epoch
    ///
    /// Returns the number of bytes read, which is less than `buf.len()` when
    /// the object ends first and zero at or past its end. Bytes of `buf`
    /// beyond the count are left untouched.
    ///
    /// # Errors
    ///
    /// `NotFound` if the object does not exist in the epoch being read, or if
    /// the handle is pinned to a snapshot that no longer exists.
    pub fn read(&self, oid: &str, buf: &mut [u8], offset: u64) -> Result<usize> {
        let snap = self.snap_read();
        let reply = self.send(
            Request::Read {
                pool: self.pool_name().to_string(),
                oid: oid.to_string(),
                offset,
                len: u32::try_from(buf.len()).unwrap_or(u32::MAX),
                snap,
            },
            || {
                format!(
                    "read {:?} at {} as of {} in pool {:?}",
                    oid,
                    offset,
                    snap,
                    self.pool_name()
                )
            },
        )?;
        match reply.payload {
            Payload::Data(data) if data.len() <= buf.len() => {
                buf[..data.len()].copy_from_slice(&data);
                Ok(data.len())
            }
            _ => Err(unexpected_payload("read")),
        }
    }

    /// Size and modification time as of the current read epoch
    pub fn stat(&self, oid: &str) -> Result<ObjectStat> {
        let snap = self.snap_read();
        let reply = self.send(
            Request::Stat {
                pool: self.pool_name().to_string(),
                oid: oid.to_string(),
                snap,
            },
            || format!("stat {:?} as of {} in pool {:?}", oid, snap, self.pool_name()),
        )?;
        match reply.payload {
            Payload::Stat(stat) => Ok(stat),
            _ => Err(unexpected_payload("stat")),
        }
    }

    /// Delete the object from the live state
    pub fn remove(&self, oid: &str) -> Result<()> {
        self.send(
            Request::Remove {
                pool: self.pool_name().to_string(),
                oid: oid.to_string(),
            },
            || format!("remove {:?} in pool {:?}", oid, self.pool_name()),
        )?;
        Ok(())
    }
}
