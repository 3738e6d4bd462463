#![allow(dead_code)]

use std::sync::Arc;

use handle_bridge::{ActorRuntime, BridgeConfig, JobId, RuntimeArena};

/// Create a runtime for `job` and register it, returning the runtime and its native ref
pub fn setup_runtime(arena: &RuntimeArena, job: u32) -> (Arc<ActorRuntime>, i64) {
    let runtime = Arc::new(ActorRuntime::new(
        JobId::from_int(job),
        &BridgeConfig::default(),
    ));
    let native_ref = arena.insert(runtime.clone()).as_raw();
    (runtime, native_ref)
}

/// Convert string components to the byte lists the bridge returns
pub fn byte_list(components: &[&str]) -> Vec<Vec<u8>> {
    components.iter().map(|c| c.as_bytes().to_vec()).collect()
}
