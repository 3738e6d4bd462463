//! # Actor Handle Bridge
//!
//! The four boundary operations. Each takes a native reference naming a runtime in
//! the [`RuntimeArena`] and a byte buffer, and returns a freshly allocated result.
//! The bridge itself holds no mutable state: registration performed by
//! [`ActorHandleBridge::deserialize`] happens in the runtime's registry.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::arena::RuntimeArena;
use crate::error::{BridgeError, BridgeResult};
use crate::id::ActorId;
use crate::runtime::ActorRuntime;

#[derive(Debug, Clone, Copy)]
pub struct ActorHandleBridge<'a> {
    arena: &'a RuntimeArena,
}

impl<'a> ActorHandleBridge<'a> {
    pub fn new(arena: &'a RuntimeArena) -> Self {
        Self { arena }
    }

    /// Returns the language code of the actor.
    ///
    /// ## Errors
    ///
    /// * `InvalidReference` - `native_ref` does not name a live runtime
    /// * `MalformedInput` - `actor_id` is not a binary actor id
    /// * `UnknownActor` - the runtime has no handle for the actor
    pub fn get_language(&self, native_ref: i64, actor_id: &[u8]) -> BridgeResult<i32> {
        let result = self.with_actor(native_ref, actor_id, |runtime, actor_id| {
            Ok(runtime.handle(actor_id)?.language().code())
        });
        Self::traced("get_language", native_ref, result)
    }

    /// Returns the components of the descriptor the actor was created with, in the
    /// order they were recorded.
    ///
    /// ## Errors
    ///
    /// As [`get_language`](Self::get_language), plus `MissingCreationDescriptor` when
    /// the handle carries no descriptor.
    pub fn get_actor_creation_function_descriptor(
        &self,
        native_ref: i64,
        actor_id: &[u8],
    ) -> BridgeResult<Vec<Vec<u8>>> {
        let result = self.with_actor(native_ref, actor_id, |runtime, actor_id| {
            let handle = runtime.handle(actor_id)?;
            handle
                .creation_descriptor()
                .map(|descriptor| descriptor.to_byte_list())
                .ok_or_else(|| BridgeError::MissingCreationDescriptor {
                    actor_id: actor_id.clone(),
                })
        });
        Self::traced("get_actor_creation_function_descriptor", native_ref, result)
    }

    /// Encodes the actor's handle. Identical handle state always yields identical bytes.
    pub fn serialize(&self, native_ref: i64, actor_id: &[u8]) -> BridgeResult<Vec<u8>> {
        let result = self.with_actor(native_ref, actor_id, |runtime, actor_id| {
            runtime.serialize_handle(actor_id)
        });
        Self::traced("serialize", native_ref, result)
    }

    /// Decodes a serialized handle, registers it with the runtime and returns the
    /// binary actor id it is now reachable under.
    ///
    /// ## Errors
    ///
    /// * `InvalidReference` - `native_ref` does not name a live runtime
    /// * `MalformedInput` - the buffer is empty, truncated or not a handle
    /// * `VersionMismatch` - the buffer uses a newer format version
    pub fn deserialize(&self, native_ref: i64, bytes: &[u8]) -> BridgeResult<Vec<u8>> {
        let result = self
            .arena
            .resolve(native_ref)
            .and_then(|runtime| runtime.deserialize_and_register(bytes))
            .map(|actor_id| actor_id.to_binary());
        Self::traced("deserialize", native_ref, result)
    }

    fn with_actor<T>(
        &self,
        native_ref: i64,
        actor_id: &[u8],
        op: impl FnOnce(&Arc<ActorRuntime>, &ActorId) -> BridgeResult<T>,
    ) -> BridgeResult<T> {
        let runtime = self.arena.resolve(native_ref)?;
        let actor_id = ActorId::from_binary(actor_id)?;
        debug!("Resolved actor {} on native ref {:#x}", actor_id, native_ref);
        op(&runtime, &actor_id)
    }

    fn traced<T>(operation: &str, native_ref: i64, result: BridgeResult<T>) -> BridgeResult<T> {
        match &result {
            Ok(_) => debug!("{} succeeded on native ref {:#x}", operation, native_ref),
            Err(e) => warn!("{} failed on native ref {:#x}: {}", operation, native_ref, e),
        }
        result
    }
}
