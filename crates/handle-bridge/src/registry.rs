//! # Actor Registry
//!
//! Live actor handles known to one runtime, keyed by actor id.

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use crate::handle::ActorHandle;
use crate::id::ActorId;

/// Outcome of [`ActorRegistry::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    /// The id was known and the stored handle equals the incoming one
    AlreadyPresent,
    /// The id was known under a different handle; the stored one was kept
    Conflicting,
}

impl Registration {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Registration::Inserted)
    }
}

#[derive(Debug, Default)]
pub struct ActorRegistry {
    handles: RwLock<HashMap<ActorId, ActorHandle>>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle.
    ///
    /// The first registration of an actor id wins. A later handle for the same id
    /// never replaces it, whether or not it matches.
    pub fn register(&self, handle: ActorHandle) -> Registration {
        let mut handles = self.handles.write();
        if let Some(existing) = handles.get(handle.actor_id()) {
            debug!("Actor {} already registered", handle.actor_id());
            return if *existing == handle {
                Registration::AlreadyPresent
            } else {
                Registration::Conflicting
            };
        }
        debug!("Registering actor: {}", handle.actor_id());
        handles.insert(handle.actor_id().clone(), handle);
        Registration::Inserted
    }

    pub fn get(&self, actor_id: &ActorId) -> Option<ActorHandle> {
        self.handles.read().get(actor_id).cloned()
    }

    pub fn contains(&self, actor_id: &ActorId) -> bool {
        self.handles.read().contains_key(actor_id)
    }

    pub fn remove(&self, actor_id: &ActorId) -> Option<ActorHandle> {
        debug!("Removing actor: {}", actor_id);
        self.handles.write().remove(actor_id)
    }

    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.read().is_empty()
    }

    /// All registered ids, sorted
    pub fn actor_ids(&self) -> Vec<ActorId> {
        let mut ids: Vec<ActorId> = self.handles.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}
