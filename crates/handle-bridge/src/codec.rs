//! # Handle Codec
//!
//! Byte format for serialized actor handles. An encoded handle is an envelope
//! followed by a body:
//!
//! ```text
//! offset 0   4 bytes  magic "AHDL"
//! offset 4   2 bytes  format version, big-endian
//! offset 6   4 bytes  body length N, big-endian
//! offset 10  N bytes  bincode body (varint integers, fixed field order)
//! ```
//!
//! The body contains no maps or clocks, so encoding the same handle always yields
//! the same bytes.

use bincode::Options;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CodecConfig;
use crate::descriptor::FunctionDescriptor;
use crate::error::{BridgeError, BridgeResult};
use crate::handle::ActorHandle;
use crate::id::{ActorId, JobId};
use crate::language::Language;

pub const HANDLE_MAGIC: [u8; 4] = *b"AHDL";

/// Newest format version this build reads and the one it writes
pub const FORMAT_VERSION: u16 = 1;

pub const HEADER_LEN: usize = 10;

#[derive(Debug, Serialize, Deserialize)]
struct WireHandle {
    actor_id: ActorId,
    creation_job_id: JobId,
    language: i32,
    creation_descriptor: Option<FunctionDescriptor>,
    extension_data: Vec<u8>,
    max_task_retries: i64,
}

impl From<&ActorHandle> for WireHandle {
    fn from(handle: &ActorHandle) -> Self {
        Self {
            actor_id: handle.actor_id().clone(),
            creation_job_id: handle.creation_job_id(),
            language: handle.language().code(),
            creation_descriptor: handle.creation_descriptor().cloned(),
            extension_data: handle.extension_data().to_vec(),
            max_task_retries: handle.max_task_retries(),
        }
    }
}

impl TryFrom<WireHandle> for ActorHandle {
    type Error = BridgeError;

    fn try_from(wire: WireHandle) -> Result<Self, Self::Error> {
        let language = Language::try_from(wire.language)?;
        let mut builder = ActorHandle::builder(wire.actor_id, language)
            .creation_job_id(wire.creation_job_id)
            .extension_data(wire.extension_data)
            .max_task_retries(wire.max_task_retries);
        if let Some(descriptor) = wire.creation_descriptor {
            builder = builder.creation_descriptor(descriptor);
        }
        Ok(builder.build())
    }
}

#[derive(Debug, Clone, Default)]
pub struct HandleCodec {
    config: CodecConfig,
}

impl HandleCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn body_options() -> impl Options {
        bincode::DefaultOptions::new()
            .with_varint_encoding()
            .reject_trailing_bytes()
    }

    pub fn encode(&self, handle: &ActorHandle) -> BridgeResult<Vec<u8>> {
        let body = Self::body_options().serialize(&WireHandle::from(handle))?;
        let body_len = u32::try_from(body.len())
            .map_err(|_| BridgeError::malformed("handle body exceeds 4 GiB"))?;

        let len = HEADER_LEN + body.len();
        if len > self.config.max_encoded_len {
            return Err(BridgeError::HandleTooLarge {
                len,
                limit: self.config.max_encoded_len,
            });
        }

        let mut out = Vec::with_capacity(len);
        out.extend_from_slice(&HANDLE_MAGIC);
        out.extend_from_slice(&FORMAT_VERSION.to_be_bytes());
        out.extend_from_slice(&body_len.to_be_bytes());
        out.extend_from_slice(&body);

        debug!(
            "Encoded handle for actor {} ({} bytes)",
            handle.actor_id(),
            out.len()
        );
        Ok(out)
    }

    pub fn decode(&self, bytes: &[u8]) -> BridgeResult<ActorHandle> {
        if bytes.is_empty() {
            return Err(BridgeError::malformed("empty handle buffer"));
        }
        if bytes.len() < HEADER_LEN {
            return Err(BridgeError::malformed(format!(
                "handle buffer too short: {} bytes, header needs {}",
                bytes.len(),
                HEADER_LEN
            )));
        }
        if bytes[..4] != HANDLE_MAGIC {
            return Err(BridgeError::malformed(format!(
                "unrecognized handle magic {}",
                hex::encode(&bytes[..4])
            )));
        }

        let version = u16::from_be_bytes([bytes[4], bytes[5]]);
        if version == 0 {
            return Err(BridgeError::malformed("unrecognized handle format version 0"));
        }
        if version > FORMAT_VERSION {
            return Err(BridgeError::VersionMismatch {
                found: version,
                supported: FORMAT_VERSION,
            });
        }

        if bytes.len() > self.config.max_encoded_len {
            return Err(BridgeError::HandleTooLarge {
                len: bytes.len(),
                limit: self.config.max_encoded_len,
            });
        }

        let body_len = u32::from_be_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
        let body = &bytes[HEADER_LEN..];
        if body.len() != body_len {
            return Err(BridgeError::malformed(format!(
                "handle body length mismatch: header says {}, found {}",
                body_len,
                body.len()
            )));
        }

        let wire: WireHandle = Self::body_options().deserialize(body)?;
        ActorHandle::try_from(wire)
    }
}
