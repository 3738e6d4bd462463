//! # Actor Runtime
//!
//! The per-worker state that native references point at: the job the worker runs
//! for, the registry of actor handles it knows about, and the codec it speaks.

use tracing::{debug, info, warn};

use crate::codec::HandleCodec;
use crate::config::BridgeConfig;
use crate::descriptor::FunctionDescriptor;
use crate::error::{BridgeError, BridgeResult};
use crate::handle::ActorHandle;
use crate::id::{ActorId, JobId};
use crate::language::Language;
use crate::registry::{ActorRegistry, Registration};

#[derive(Debug)]
pub struct ActorRuntime {
    job_id: JobId,
    registry: ActorRegistry,
    codec: HandleCodec,
}

impl ActorRuntime {
    pub fn new(job_id: JobId, config: &BridgeConfig) -> Self {
        info!("Creating actor runtime for job {}", job_id);
        Self {
            job_id,
            registry: ActorRegistry::new(),
            codec: HandleCodec::new(config.codec.clone()),
        }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    pub fn codec(&self) -> &HandleCodec {
        &self.codec
    }

    /// Record a newly created actor and return its id.
    pub fn create_actor(&self, language: Language, descriptor: FunctionDescriptor) -> ActorId {
        let actor_id = ActorId::of(self.job_id);
        let handle = ActorHandle::builder(actor_id.clone(), language)
            .creation_descriptor(descriptor)
            .build();
        self.registry.register(handle);
        debug!("Created {} actor {}", language, actor_id);
        actor_id
    }

    /// Register a handle built elsewhere. Returns `false` if the id was already known.
    pub fn add_handle(&self, handle: ActorHandle) -> bool {
        self.registry.register(handle).is_inserted()
    }

    pub fn handle(&self, actor_id: &ActorId) -> BridgeResult<ActorHandle> {
        self.registry
            .get(actor_id)
            .ok_or_else(|| BridgeError::UnknownActor {
                actor_id: actor_id.clone(),
            })
    }

    pub fn serialize_handle(&self, actor_id: &ActorId) -> BridgeResult<Vec<u8>> {
        let handle = self.handle(actor_id)?;
        self.codec.encode(&handle)
    }

    /// Decode a serialized handle and register it, returning the actor id.
    ///
    /// If the actor is already known, the existing handle is kept. A decoded handle
    /// that disagrees with the stored one is logged and discarded.
    pub fn deserialize_and_register(&self, bytes: &[u8]) -> BridgeResult<ActorId> {
        let handle = self.codec.decode(bytes)?;
        let actor_id = handle.actor_id().clone();
        match self.registry.register(handle) {
            Registration::Inserted => {
                debug!("Registered deserialized handle for actor {}", actor_id)
            }
            Registration::AlreadyPresent => {}
            Registration::Conflicting => warn!(
                "Deserialized handle for actor {} conflicts with the registered one, keeping it",
                actor_id
            ),
        }
        Ok(actor_id)
    }

    pub fn remove_actor(&self, actor_id: &ActorId) -> bool {
        self.registry.remove(actor_id).is_some()
    }
}
