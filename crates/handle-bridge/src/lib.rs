//! # Handle Bridge
//!
//! Handle Bridge exposes the boundary through which an embedding runtime inspects,
//! serializes and restores actor handles. Callers never touch runtime state directly:
//! they pass an opaque `i64` native reference together with an actor id (or a
//! serialized handle) and receive freshly allocated results.
//!
//! ## Core Operations
//!
//! * **get_language**: Which language implements an actor
//! * **get_actor_creation_function_descriptor**: The descriptor of the constructor task
//! * **serialize**: Encode a handle into a portable, versioned byte buffer
//! * **deserialize**: Decode such a buffer and register the handle with a runtime
//!
//! ## Architecture
//!
//! * `ActorHandleBridge`: Stateless front for the four operations
//! * `RuntimeArena`: Issues and resolves native references to runtimes
//! * `ActorRuntime`: Owns the actor registry and the codec for one worker
//! * `ActorRegistry`: Live handles keyed by `ActorId`
//! * `HandleCodec`: The magic/version/length envelope around an encoded handle

pub mod arena;
pub mod bridge;
pub mod codec;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod handle;
pub mod id;
pub mod language;
pub mod logging;
pub mod registry;
pub mod runtime;

pub use arena::{NativeRef, RuntimeArena};
pub use bridge::ActorHandleBridge;
pub use codec::{HandleCodec, FORMAT_VERSION, HANDLE_MAGIC};
pub use config::{BridgeConfig, CodecConfig, LogOutput, LoggingConfig};
pub use descriptor::FunctionDescriptor;
pub use error::{BridgeError, BridgeResult, ErrorKind};
pub use handle::{ActorHandle, ActorHandleBuilder};
pub use id::{ActorId, JobId};
pub use language::Language;
pub use registry::{ActorRegistry, Registration};
pub use runtime::ActorRuntime;
