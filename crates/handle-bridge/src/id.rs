use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{BridgeError, BridgeResult};

/// Length in bytes of a [`JobId`]
pub const JOB_ID_LEN: usize = 4;

/// Length in bytes of the random part of an [`ActorId`]
pub const ACTOR_UNIQUE_LEN: usize = 12;

/// Length in bytes of an [`ActorId`]
pub const ACTOR_ID_LEN: usize = ACTOR_UNIQUE_LEN + JOB_ID_LEN;

/// Identifies the job (driver) that created an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId([u8; JOB_ID_LEN]);

impl JobId {
    pub fn from_int(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    pub fn to_int(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; JOB_ID_LEN] {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// A unique identifier for an actor.
///
/// The last four bytes are the [`JobId`] of the job that created the actor, so the
/// owning job can be recovered from the id alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId([u8; ACTOR_ID_LEN]);

impl ActorId {
    /// Generate a new random ID for an actor created by `job_id`
    pub fn of(job_id: JobId) -> Self {
        let entropy = Uuid::new_v4();
        let mut bytes = [0u8; ACTOR_ID_LEN];
        bytes[..ACTOR_UNIQUE_LEN].copy_from_slice(&entropy.as_bytes()[..ACTOR_UNIQUE_LEN]);
        bytes[ACTOR_UNIQUE_LEN..].copy_from_slice(job_id.as_bytes());
        Self(bytes)
    }

    /// Parse an ActorId from its binary form
    pub fn from_binary(bytes: &[u8]) -> BridgeResult<Self> {
        let bytes: [u8; ACTOR_ID_LEN] = bytes.try_into().map_err(|_| {
            BridgeError::malformed(format!(
                "actor id must be {} bytes, got {}",
                ACTOR_ID_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn job_id(&self) -> JobId {
        let mut job = [0u8; JOB_ID_LEN];
        job.copy_from_slice(&self.0[ACTOR_UNIQUE_LEN..]);
        JobId(job)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_binary(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl FromStr for ActorId {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)
            .map_err(|e| BridgeError::malformed(format!("invalid actor id '{}': {}", s, e)))?;
        Self::from_binary(&bytes)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
