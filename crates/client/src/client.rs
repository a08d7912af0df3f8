//! Cluster connection and pool handle acquisition

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use poolsnap_core::{ClusterTransport, Error, ErrorKind, Payload, Reply, Request, Result};

use crate::codec::MsgpackTransport;
use crate::config::{ClientConfig, CodecKind};
use crate::handle::PoolHandle;

/// A connection to one cluster
///
/// Cheap to clone; clones share the transport and configuration.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn ClusterTransport>,
    config: Arc<ClientConfig>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Connect through `transport` with a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the configuration does not validate.
    pub fn new<T: ClusterTransport + 'static>(transport: T, config: ClientConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::invalid_argument(e.to_string()))?;
        Ok(Self::from_validated(transport, config))
    }

    /// Connect through `transport` with the default configuration
    pub fn connect<T: ClusterTransport + 'static>(transport: T) -> Self {
        Self::from_validated(transport, ClientConfig::default())
    }

    fn from_validated<T: ClusterTransport + 'static>(transport: T, config: ClientConfig) -> Self {
        let transport: Arc<dyn ClusterTransport> = match config.codec {
            CodecKind::None => Arc::new(transport),
            CodecKind::Msgpack => Arc::new(MsgpackTransport::new(transport)),
        };
        info!(target: "poolsnap::client", codec = ?config.codec, "Client connected");
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a pool
    pub fn create_pool(&self, name: &str) -> Result<()> {
        send(
            self.transport.as_ref(),
            Request::PoolCreate {
                pool: name.to_string(),
            },
            || format!("pool_create {:?}", name),
        )?;
        Ok(())
    }

    /// Delete a pool with all its objects and snapshots
    pub fn delete_pool(&self, name: &str) -> Result<()> {
        send(
            self.transport.as_ref(),
            Request::PoolDelete {
                pool: name.to_string(),
            },
            || format!("pool_delete {:?}", name),
        )?;
        Ok(())
    }

    /// Names of all pools
    pub fn list_pools(&self) -> Result<Vec<String>> {
        let reply = send(self.transport.as_ref(), Request::PoolList, || {
            "pool_list".to_string()
        })?;
        match reply.payload {
            Payload::Names(names) => Ok(names),
            _ => Err(unexpected_payload("pool_list")),
        }
    }

    /// Open a handle on an existing pool
    ///
    /// The handle starts out reading live data.
    pub fn open_pool(&self, name: &str) -> Result<PoolHandle> {
        send(
            self.transport.as_ref(),
            Request::PoolLookup {
                pool: name.to_string(),
            },
            || format!("open_pool {:?}", name),
        )?;
        Ok(PoolHandle::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.config),
            name.to_string(),
        ))
    }
}

/// Issue one request and translate its status
///
/// The context closure only runs on failure. Failed mutations are logged at
/// warn level unless the failure is an ordinary control-flow signal
/// (`NotFound`, `AlreadyExists`).
pub(crate) fn send(
    transport: &dyn ClusterTransport,
    request: Request,
    context: impl FnOnce() -> String,
) -> Result<Reply> {
    let op = request.op();
    let mutation = request.is_mutation();
    let reply = transport.call(request);
    if reply.status < 0 {
        let err = Error::from_status(reply.status, context());
        let routine = matches!(err.kind(), ErrorKind::NotFound | ErrorKind::AlreadyExists);
        if mutation && !routine {
            warn!(target: "poolsnap::client", op, error = %err, "Request failed");
        } else {
            debug!(target: "poolsnap::client", op, error = %err, "Request failed");
        }
        return Err(err);
    }
    debug!(target: "poolsnap::client", op, status = reply.status, "Request completed");
    Ok(reply)
}

/// Error for a successful reply whose payload does not match the request
pub(crate) fn unexpected_payload(op: &str) -> Error {
    Error::transport(format!("{}: unexpected reply payload", op))
}
