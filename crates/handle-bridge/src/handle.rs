//! # Actor Handle
//!
//! This module provides the `ActorHandle` type, the portable description of an actor
//! that can be serialized, shipped to another process and registered there.

use serde::{Deserialize, Serialize};

use crate::descriptor::FunctionDescriptor;
use crate::id::{ActorId, JobId};
use crate::language::Language;

/// Retry count meaning "retry forever"
pub const INFINITE_TASK_RETRIES: i64 = -1;

/// # ActorHandle
///
/// A reference to a live or previously created actor.
///
/// ## Purpose
///
/// ActorHandle carries everything needed to rebuild a usable reference after it has
/// crossed a process boundary: the actor's id, the job that created it, the language
/// it is implemented in and the descriptor of its constructor task. Fields are only
/// readable; the identity of a handle never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorHandle {
    actor_id: ActorId,
    creation_job_id: JobId,
    language: Language,
    creation_descriptor: Option<FunctionDescriptor>,
    extension_data: Vec<u8>,
    max_task_retries: i64,
}

impl ActorHandle {
    /// Starts building a handle for `actor_id`.
    ///
    /// The creation job defaults to the job embedded in the actor id.
    pub fn builder(actor_id: ActorId, language: Language) -> ActorHandleBuilder {
        ActorHandleBuilder {
            creation_job_id: actor_id.job_id(),
            actor_id,
            language,
            creation_descriptor: None,
            extension_data: Vec::new(),
            max_task_retries: 0,
        }
    }

    pub fn actor_id(&self) -> &ActorId {
        &self.actor_id
    }

    pub fn creation_job_id(&self) -> JobId {
        self.creation_job_id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn creation_descriptor(&self) -> Option<&FunctionDescriptor> {
        self.creation_descriptor.as_ref()
    }

    /// Opaque payload owned by the language frontend that created the handle
    pub fn extension_data(&self) -> &[u8] {
        &self.extension_data
    }

    pub fn max_task_retries(&self) -> i64 {
        self.max_task_retries
    }
}

#[derive(Debug, Clone)]
pub struct ActorHandleBuilder {
    actor_id: ActorId,
    creation_job_id: JobId,
    language: Language,
    creation_descriptor: Option<FunctionDescriptor>,
    extension_data: Vec<u8>,
    max_task_retries: i64,
}

impl ActorHandleBuilder {
    pub fn creation_job_id(mut self, job_id: JobId) -> Self {
        self.creation_job_id = job_id;
        self
    }

    pub fn creation_descriptor(mut self, descriptor: FunctionDescriptor) -> Self {
        self.creation_descriptor = Some(descriptor);
        self
    }

    pub fn extension_data(mut self, data: Vec<u8>) -> Self {
        self.extension_data = data;
        self
    }

    pub fn max_task_retries(mut self, retries: i64) -> Self {
        self.max_task_retries = retries;
        self
    }

    pub fn build(self) -> ActorHandle {
        ActorHandle {
            actor_id: self.actor_id,
            creation_job_id: self.creation_job_id,
            language: self.language,
            creation_descriptor: self.creation_descriptor,
            extension_data: self.extension_data,
            max_task_retries: self.max_task_retries,
        }
    }
}
