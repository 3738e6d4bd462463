//! # Bridge Errors
//!
//! Every boundary operation returns a [`BridgeResult`]. Failures are surfaced to the
//! caller as they happen; nothing in this crate retries or substitutes a default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::ActorId;

pub type BridgeResult<T> = Result<T, BridgeError>;

/// # BridgeError
///
/// Errors produced by the handle bridge and its collaborators.
///
/// The variants are finer grained than the four categories a boundary caller
/// dispatches on; use [`BridgeError::kind`] to collapse them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The native reference does not resolve to live runtime state
    #[error("Invalid native reference: {native_ref}")]
    InvalidReference { native_ref: i64 },

    /// A byte buffer could not be parsed
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    /// An encoded handle is longer than the configured limit
    #[error("Encoded handle of {len} bytes exceeds limit of {limit}")]
    HandleTooLarge { len: usize, limit: usize },

    /// No handle is registered under the actor id
    #[error("Actor {actor_id} not found")]
    UnknownActor { actor_id: ActorId },

    /// The handle exists but no creation descriptor was recorded for it
    #[error("No creation function descriptor recorded for actor {actor_id}")]
    MissingCreationDescriptor { actor_id: ActorId },

    /// The encoded handle uses a newer format than this build understands
    #[error("Handle format version {found} is newer than supported version {supported}")]
    VersionMismatch { found: u16, supported: u16 },
}

impl BridgeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        BridgeError::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::InvalidReference { .. } => ErrorKind::InvalidReference,
            BridgeError::MalformedInput { .. } | BridgeError::HandleTooLarge { .. } => {
                ErrorKind::MalformedInput
            }
            BridgeError::UnknownActor { .. } | BridgeError::MissingCreationDescriptor { .. } => {
                ErrorKind::NotFound
            }
            BridgeError::VersionMismatch { .. } => ErrorKind::VersionMismatch,
        }
    }
}

impl From<bincode::Error> for BridgeError {
    fn from(e: bincode::Error) -> Self {
        BridgeError::malformed(format!("undecodable handle body: {}", e))
    }
}

/// The failure categories visible at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidReference,
    MalformedInput,
    NotFound,
    VersionMismatch,
}

impl ErrorKind {
    /// Stable status code for callers that cannot carry a Rust enum.
    pub fn code(&self) -> i32 {
        match self {
            ErrorKind::InvalidReference => -1,
            ErrorKind::MalformedInput => -2,
            ErrorKind::NotFound => -3,
            ErrorKind::VersionMismatch => -4,
        }
    }
}
