//! # Runtime Arena
//!
//! Native references handed across the boundary are plain `i64`s. They index into
//! this arena instead of pointing at memory, so a stale or forged reference is
//! detected and reported rather than dereferenced.
//!
//! A reference packs a slot index in its low 32 bits and the slot's generation in
//! the high bits. Releasing a runtime bumps the generation of its slot, which
//! invalidates every reference issued for the previous occupant.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{BridgeError, BridgeResult};
use crate::runtime::ActorRuntime;

const INDEX_MASK: i64 = 0xffff_ffff;
const MAX_GENERATION: u32 = i32::MAX as u32;

/// Opaque reference to a runtime registered in a [`RuntimeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeRef(i64);

impl NativeRef {
    fn pack(index: u32, generation: u32) -> Self {
        Self(((generation as i64) << 32) | index as i64)
    }

    fn index(self) -> usize {
        (self.0 & INDEX_MASK) as usize
    }

    fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub fn as_raw(self) -> i64 {
        self.0
    }
}

impl From<NativeRef> for i64 {
    fn from(native_ref: NativeRef) -> Self {
        native_ref.0
    }
}

impl fmt::Display for NativeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    runtime: Option<Arc<ActorRuntime>>,
}

#[derive(Debug, Default)]
struct Slots {
    entries: Vec<Slot>,
    free: Vec<u32>,
}

#[derive(Debug, Default)]
pub struct RuntimeArena {
    slots: RwLock<Slots>,
}

impl RuntimeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, runtime: Arc<ActorRuntime>) -> NativeRef {
        let mut slots = self.slots.write();
        let native_ref = match slots.free.pop() {
            Some(index) => {
                let slot = &mut slots.entries[index as usize];
                slot.runtime = Some(runtime);
                NativeRef::pack(index, slot.generation)
            }
            None => {
                let index = slots.entries.len() as u32;
                slots.entries.push(Slot {
                    generation: 1,
                    runtime: Some(runtime),
                });
                NativeRef::pack(index, 1)
            }
        };
        info!("Registered runtime under native ref {}", native_ref);
        native_ref
    }

    pub fn resolve(&self, raw: i64) -> BridgeResult<Arc<ActorRuntime>> {
        let slots = self.slots.read();
        Self::live_slot(&slots, raw)
            .and_then(|slot| slot.runtime.clone())
            .ok_or_else(|| {
                warn!("Native ref {:#x} does not resolve to a live runtime", raw);
                BridgeError::InvalidReference { native_ref: raw }
            })
    }

    /// Remove a runtime, invalidating every reference to its slot.
    pub fn release(&self, raw: i64) -> BridgeResult<Arc<ActorRuntime>> {
        let mut slots = self.slots.write();
        if Self::live_slot(&slots, raw).is_none() {
            warn!("Cannot release native ref {:#x}: not live", raw);
            return Err(BridgeError::InvalidReference { native_ref: raw });
        }

        let native_ref = NativeRef(raw);
        let index = native_ref.index();
        let slot = &mut slots.entries[index];
        let runtime = slot.runtime.take();
        slot.generation = if slot.generation >= MAX_GENERATION {
            1
        } else {
            slot.generation + 1
        };
        slots.free.push(index as u32);
        debug!("Released native ref {}", native_ref);

        runtime.ok_or(BridgeError::InvalidReference { native_ref: raw })
    }

    pub fn len(&self) -> usize {
        self.slots
            .read()
            .entries
            .iter()
            .filter(|slot| slot.runtime.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live_slot(slots: &Slots, raw: i64) -> Option<&Slot> {
        if raw <= 0 {
            return None;
        }
        let native_ref = NativeRef(raw);
        slots
            .entries
            .get(native_ref.index())
            .filter(|slot| slot.generation == native_ref.generation() && slot.runtime.is_some())
    }
}
