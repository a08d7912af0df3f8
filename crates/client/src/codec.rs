//! MessagePack wire codec
//!
//! The encode/decode functions define the byte format a network transport
//! would put on the wire. [`MsgpackTransport`] wraps any transport and
//! pushes every request and reply through that format, so the typed
//! messages are exercised exactly as a remote peer would see them.

use poolsnap_core::errno::ENOTCONN;
use poolsnap_core::{ClusterTransport, Reply, Request};
use tracing::warn;

/// Failure to marshal or unmarshal a message
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Message could not be encoded
    #[error("encode failed: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// Bytes are not a valid message
    #[error("decode failed: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// Encode a request
pub fn encode_request(request: &Request) -> Result<Vec<u8>, CodecError> {
    Ok(rmp_serde::to_vec(request)?)
}

/// Decode a request
pub fn decode_request(bytes: &[u8]) -> Result<Request, CodecError> {
    Ok(rmp_serde::from_slice(bytes)?)
}

/// Encode a reply
pub fn encode_reply(reply: &Reply) -> Result<Vec<u8>, CodecError> {
    Ok(rmp_serde::to_vec(reply)?)
}

/// Decode a reply
pub fn decode_reply(bytes: &[u8]) -> Result<Reply, CodecError> {
    Ok(rmp_serde::from_slice(bytes)?)
}

/// Transport wrapper marshalling every message through MessagePack
///
/// A message that fails to marshal in either direction is answered with
/// `-ENOTCONN`, the same as a dropped connection.
#[derive(Debug)]
pub struct MsgpackTransport<T> {
    inner: T,
}

impl<T: ClusterTransport> MsgpackTransport<T> {
    /// Wrap a transport
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    fn round_trip(&self, request: &Request) -> Result<Reply, CodecError> {
        let sent = decode_request(&encode_request(request)?)?;
        let reply = self.inner.call(sent);
        decode_reply(&encode_reply(&reply)?)
    }
}

impl<T: ClusterTransport> ClusterTransport for MsgpackTransport<T> {
    fn call(&self, request: Request) -> Reply {
        match self.round_trip(&request) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(target: "poolsnap::codec", op = request.op(), error = %e, "Message marshalling failed");
                Reply::err(ENOTCONN)
            }
        }
    }
}
