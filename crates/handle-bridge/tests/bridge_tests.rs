mod common;

use common::{byte_list, setup_runtime};
use handle_bridge::{
    ActorHandle, ActorHandleBridge, ActorId, BridgeError, ErrorKind, FunctionDescriptor, JobId,
    Language, RuntimeArena, FORMAT_VERSION,
};
use pretty_assertions::assert_eq;

#[test_log::test]
fn test_create_inspect_and_restore_scenario() {
    let arena = RuntimeArena::new();
    let (runtime, native_ref) = setup_runtime(&arena, 1);
    let bridge = ActorHandleBridge::new(&arena);

    let actor_a = runtime.create_actor(
        Language::Java,
        FunctionDescriptor::new(vec!["m".into(), "C".into(), "f".into(), "()V".into()]),
    );

    assert_eq!(
        bridge.get_language(native_ref, actor_a.as_bytes()).unwrap(),
        Language::Java.code()
    );
    assert_eq!(
        bridge
            .get_actor_creation_function_descriptor(native_ref, actor_a.as_bytes())
            .unwrap(),
        byte_list(&["m", "C", "f", "()V"])
    );

    let serialized = bridge.serialize(native_ref, actor_a.as_bytes()).unwrap();

    // Restore in a second runtime, standing in for another process.
    let (_, other_ref) = setup_runtime(&arena, 2);
    let actor_b = bridge.deserialize(other_ref, &serialized).unwrap();

    assert_eq!(
        bridge.get_language(other_ref, &actor_b).unwrap(),
        Language::Java.code()
    );
    assert_eq!(
        bridge
            .get_actor_creation_function_descriptor(other_ref, &actor_b)
            .unwrap(),
        byte_list(&["m", "C", "f", "()V"])
    );
    assert_eq!(bridge.serialize(other_ref, &actor_b).unwrap(), serialized);
}

#[test]
fn test_descriptor_order_preserved() {
    let arena = RuntimeArena::new();
    let (runtime, native_ref) = setup_runtime(&arena, 1);
    let actor_id = runtime.create_actor(
        Language::Java,
        ["pkg", "Cls", "method", "(I)V"].into_iter().collect(),
    );

    let descriptor = ActorHandleBridge::new(&arena)
        .get_actor_creation_function_descriptor(native_ref, actor_id.as_bytes())
        .unwrap();
    assert_eq!(descriptor, byte_list(&["pkg", "Cls", "method", "(I)V"]));
}

#[test]
fn test_serialize_is_deterministic() {
    let arena = RuntimeArena::new();
    let (runtime, native_ref) = setup_runtime(&arena, 1);
    let actor_id = runtime.create_actor(
        Language::Python,
        FunctionDescriptor::python("counter", "Counter", "__init__", "0f3a"),
    );
    let bridge = ActorHandleBridge::new(&arena);

    let first = bridge.serialize(native_ref, actor_id.as_bytes()).unwrap();
    let second = bridge.serialize(native_ref, actor_id.as_bytes()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_serialize_deserialize_serialize_is_stable() {
    let arena = RuntimeArena::new();
    let (runtime, native_ref) = setup_runtime(&arena, 1);
    let actor_id = ActorId::of(JobId::from_int(1));
    runtime.add_handle(
        ActorHandle::builder(actor_id.clone(), Language::Cpp)
            .creation_descriptor(FunctionDescriptor::cpp("CreateCounter", "", "Counter"))
            .extension_data(vec![0xde, 0xad])
            .max_task_retries(3)
            .build(),
    );
    let bridge = ActorHandleBridge::new(&arena);

    let once = bridge.serialize(native_ref, actor_id.as_bytes()).unwrap();
    let (_, other_ref) = setup_runtime(&arena, 9);
    let restored = bridge.deserialize(other_ref, &once).unwrap();
    let twice = bridge.serialize(other_ref, &restored).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_deserialize_keeps_existing_handle() {
    let arena = RuntimeArena::new();
    let (runtime, native_ref) = setup_runtime(&arena, 1);
    let actor_id =
        runtime.create_actor(Language::Java, FunctionDescriptor::java("A", "<init>", "()V"));
    let bridge = ActorHandleBridge::new(&arena);

    let bytes = bridge.serialize(native_ref, actor_id.as_bytes()).unwrap();
    assert_eq!(bridge.deserialize(native_ref, &bytes).unwrap(), actor_id.to_binary());
    assert_eq!(runtime.registry().len(), 1);
}

#[test]
fn test_invalid_reference_for_every_operation() {
    let arena = RuntimeArena::new();
    let (runtime, native_ref) = setup_runtime(&arena, 1);
    let actor_id = runtime.create_actor(Language::Java, FunctionDescriptor::java("A", "b", "()V"));
    let bridge = ActorHandleBridge::new(&arena);
    let serialized = bridge.serialize(native_ref, actor_id.as_bytes()).unwrap();

    arena.release(native_ref).unwrap();

    let id = actor_id.as_bytes();
    let errors = [
        bridge.get_language(native_ref, id).unwrap_err(),
        bridge
            .get_actor_creation_function_descriptor(native_ref, id)
            .unwrap_err(),
        bridge.serialize(native_ref, id).unwrap_err(),
        bridge.deserialize(native_ref, &serialized).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err, BridgeError::InvalidReference { native_ref });
    }

    for never_issued in [0, -7, 123_456] {
        assert_eq!(
            bridge.get_language(never_issued, id).unwrap_err().kind(),
            ErrorKind::InvalidReference
        );
    }
}

#[test]
fn test_malformed_actor_id() {
    let arena = RuntimeArena::new();
    let (_, native_ref) = setup_runtime(&arena, 1);
    let bridge = ActorHandleBridge::new(&arena);

    for bad in [&b""[..], &b"short"[..], &[0u8; 17][..]] {
        assert_eq!(
            bridge.get_language(native_ref, bad).unwrap_err().kind(),
            ErrorKind::MalformedInput
        );
        assert_eq!(
            bridge.serialize(native_ref, bad).unwrap_err().kind(),
            ErrorKind::MalformedInput
        );
    }
}

#[test]
fn test_unknown_actor_is_not_found() {
    let arena = RuntimeArena::new();
    let (_, native_ref) = setup_runtime(&arena, 1);
    let actor_id = ActorId::of(JobId::from_int(1));

    let err = ActorHandleBridge::new(&arena)
        .get_language(native_ref, actor_id.as_bytes())
        .unwrap_err();
    assert_eq!(err, BridgeError::UnknownActor { actor_id });
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_deserialize_zero_length_buffer() {
    let arena = RuntimeArena::new();
    let (runtime, native_ref) = setup_runtime(&arena, 1);

    let err = ActorHandleBridge::new(&arena)
        .deserialize(native_ref, &[])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert!(runtime.registry().is_empty());
}

#[test]
fn test_deserialize_newer_version() {
    let arena = RuntimeArena::new();
    let (runtime, native_ref) = setup_runtime(&arena, 1);
    let actor_id = runtime.create_actor(Language::Python, FunctionDescriptor::default());
    let bridge = ActorHandleBridge::new(&arena);

    let mut bytes = bridge.serialize(native_ref, actor_id.as_bytes()).unwrap();
    bytes[4..6].copy_from_slice(&(FORMAT_VERSION + 1).to_be_bytes());

    let (_, other_ref) = setup_runtime(&arena, 2);
    assert_eq!(
        bridge.deserialize(other_ref, &bytes).unwrap_err(),
        BridgeError::VersionMismatch {
            found: FORMAT_VERSION + 1,
            supported: FORMAT_VERSION,
        }
    );
}

#[test]
fn test_deserialize_garbage() {
    let arena = RuntimeArena::new();
    let (_, native_ref) = setup_runtime(&arena, 1);
    let bridge = ActorHandleBridge::new(&arena);

    for garbage in [&b"x"[..], &b"not a serialized actor handle"[..], &[0xff; 64][..]] {
        assert_eq!(
            bridge.deserialize(native_ref, garbage).unwrap_err().kind(),
            ErrorKind::MalformedInput
        );
    }
}

#[test]
fn test_concurrent_callers() {
    let arena = RuntimeArena::new();
    let (runtime, native_ref) = setup_runtime(&arena, 1);
    let (target, target_ref) = setup_runtime(&arena, 2);
    let actors: Vec<ActorId> = (0..16)
        .map(|i| {
            runtime.create_actor(
                Language::Java,
                FunctionDescriptor::java(format!("Actor{}", i), "<init>", "()V"),
            )
        })
        .collect();
    let bridge = ActorHandleBridge::new(&arena);
    let expected: Vec<Vec<u8>> = actors
        .iter()
        .map(|id| bridge.serialize(native_ref, id.as_bytes()).unwrap())
        .collect();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for (actor_id, bytes) in actors.iter().zip(&expected) {
                    assert_eq!(
                        bridge.get_language(native_ref, actor_id.as_bytes()).unwrap(),
                        Language::Java.code()
                    );
                    assert_eq!(&bridge.serialize(native_ref, actor_id.as_bytes()).unwrap(), bytes);
                    assert_eq!(
                        bridge.deserialize(target_ref, bytes).unwrap(),
                        actor_id.to_binary()
                    );
                }
            });
        }
    });

    assert_eq!(target.registry().len(), actors.len());
}

#[test]
fn test_oversized_handle_fails_to_serialize() {
    let arena = RuntimeArena::new();
    let (runtime, native_ref) = setup_runtime(&arena, 1);
    let (target, target_ref) = setup_runtime(&arena, 2);
    let actor_id = ActorId::of(JobId::from_int(1));
    runtime.add_handle(
        ActorHandle::builder(actor_id.clone(), Language::Java)
            .creation_descriptor(FunctionDescriptor::java("Big", "<init>", "()V"))
            .extension_data(vec![7u8; 70 * 1024])
            .build(),
    );
    let bridge = ActorHandleBridge::new(&arena);

    let err = bridge.serialize(native_ref, actor_id.as_bytes()).unwrap_err();
    assert!(matches!(err, BridgeError::HandleTooLarge { limit: 65536, .. }));
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert!(target.registry().is_empty());

    // A handle just under the limit still round-trips.
    let small_id = ActorId::of(JobId::from_int(1));
    runtime.add_handle(
        ActorHandle::builder(small_id.clone(), Language::Java)
            .extension_data(vec![7u8; 60 * 1024])
            .build(),
    );
    let bytes = bridge.serialize(native_ref, small_id.as_bytes()).unwrap();
    let restored = bridge.deserialize(target_ref, &bytes).unwrap();
    assert_eq!(bridge.serialize(target_ref, &restored).unwrap(), bytes);
}

#[test_log::test]
fn test_deserialize_conflicting_handle_keeps_registered() {
    let arena = RuntimeArena::new();
    let (local, local_ref) = setup_runtime(&arena, 1);
    let (remote, remote_ref) = setup_runtime(&arena, 2);
    let actor_id = ActorId::of(JobId::from_int(1));
    local.add_handle(
        ActorHandle::builder(actor_id.clone(), Language::Cpp)
            .creation_descriptor(FunctionDescriptor::cpp("Make", "", "Widget"))
            .build(),
    );
    remote.add_handle(
        ActorHandle::builder(actor_id.clone(), Language::Java)
            .creation_descriptor(FunctionDescriptor::java("Widget", "<init>", "()V"))
            .build(),
    );
    let bridge = ActorHandleBridge::new(&arena);
    let local_bytes = bridge.serialize(local_ref, actor_id.as_bytes()).unwrap();
    let remote_bytes = bridge.serialize(remote_ref, actor_id.as_bytes()).unwrap();
    assert_ne!(local_bytes, remote_bytes);

    assert_eq!(
        bridge.deserialize(local_ref, &remote_bytes).unwrap(),
        actor_id.to_binary()
    );
    assert_eq!(
        bridge.get_language(local_ref, actor_id.as_bytes()).unwrap(),
        Language::Cpp.code()
    );
    assert_eq!(bridge.serialize(local_ref, actor_id.as_bytes()).unwrap(), local_bytes);
    assert_eq!(local.registry().len(), 1);
}
