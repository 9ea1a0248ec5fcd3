use neurodata_core::*;

fn registered_store() -> ParameterStore {
    let mut store = ParameterStore::new();
    store
        .register(
            "gain",
            "Amplifier gain",
            10.0,
            0.0,
            100.0,
            ParameterType::Float,
            true,
            Some("acquisition"),
        )
        .unwrap();
    store
        .register(
            "spike_threshold",
            "Detection threshold in standard deviations",
            4.0,
            1.0,
            12.0,
            ParameterType::Float,
            true,
            None,
        )
        .unwrap();
    store
        .register(
            "refractory_ms",
            "Enforced refractory period",
            2.0,
            0.0,
            10.0,
            ParameterType::Float,
            false,
            Some("sorting"),
        )
        .unwrap();
    store
}

#[test]
fn test_register_set_get() {
    let mut store = registered_store();
    assert_eq!(store.get("gain").unwrap(), 10.0);

    store.set("gain", 20.0).unwrap();
    assert_eq!(store.get("gain").unwrap(), 20.0);

    let parameter = store.parameter("refractory_ms").unwrap();
    assert_eq!(parameter.description(), "Enforced refractory period");
    assert_eq!(parameter.data_type(), ParameterType::Float);
    assert!(!parameter.is_basic());
    assert_eq!(parameter.tag(), Some("sorting"));
}

#[test]
fn test_out_of_range_set_is_rejected_and_value_retained() {
    let mut store = registered_store();

    let err = store.set("gain", 150.0).unwrap_err();
    assert!(matches!(err, NeurodataError::Validation(_)));
    assert_eq!(store.get("gain").unwrap(), 10.0);

    // Bounds are inclusive.
    store.set("gain", 100.0).unwrap();
    store.set("gain", 0.0).unwrap();
}

#[test]
fn test_unknown_key_is_key_not_found() {
    let mut store = registered_store();
    assert!(matches!(
        store.set("window_ms", 5.0).unwrap_err(),
        NeurodataError::KeyNotFound(_)
    ));
    assert!(matches!(
        store.get("window_ms").unwrap_err(),
        NeurodataError::KeyNotFound(_)
    ));
}

#[test]
fn test_out_of_range_default_is_rejected() {
    let mut store = ParameterStore::new();
    let err = store
        .register(
            "gain",
            "",
            150.0,
            0.0,
            100.0,
            ParameterType::Float,
            true,
            None,
        )
        .unwrap_err();
    assert!(matches!(err, NeurodataError::Validation(_)));
    assert!(store.is_empty());
}

#[test]
fn test_save_load_roundtrip_through_a_file() {
    let mut original = registered_store();
    original.set("gain", 35.5).unwrap();
    original.set("spike_threshold", 5.0).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis_params.json");
    original.save_to_path(&path).unwrap();

    // Values load only into a store with the same registrations.
    let mut restored = registered_store();
    restored.load_from_path(&path).unwrap();

    for name in ["gain", "spike_threshold", "refractory_ms"] {
        assert_eq!(restored.get(name).unwrap(), original.get(name).unwrap());
    }
}

#[test]
fn test_save_load_roundtrip_through_a_buffer() {
    let mut original = registered_store();
    original.set("refractory_ms", 1.5).unwrap();

    let mut buffer = Vec::new();
    original.save(&mut buffer).unwrap();

    let mut restored = registered_store();
    restored.load(buffer.as_slice()).unwrap();
    assert_eq!(restored.get("refractory_ms").unwrap(), 1.5);
}

#[test]
fn test_load_aborts_on_unknown_key_keeping_earlier_entries() {
    let mut store = registered_store();
    let source = r#"{"gain": 25.0, "window_ms": 5.0, "refractory_ms": 3.0}"#;

    let err = store.load(source.as_bytes()).unwrap_err();
    assert!(matches!(err, NeurodataError::KeyNotFound(_)));

    // Entries before the failure stay committed; entries after are untouched.
    assert_eq!(store.get("gain").unwrap(), 25.0);
    assert_eq!(store.get("refractory_ms").unwrap(), 2.0);
}

#[test]
fn test_load_aborts_on_out_of_range_value() {
    let mut store = registered_store();
    let source = r#"{"spike_threshold": 40.0}"#;

    let err = store.load(source.as_bytes()).unwrap_err();
    assert!(matches!(err, NeurodataError::Validation(_)));
    assert_eq!(store.get("spike_threshold").unwrap(), 4.0);
}

#[test]
fn test_malformed_source_is_a_persistence_error() {
    let mut store = registered_store();
    let err = store.load("not json".as_bytes()).unwrap_err();
    assert!(matches!(err, NeurodataError::Persist(_)));
}

#[test]
fn test_reregistration_overwrites() {
    let mut store = registered_store();
    store.set("gain", 90.0).unwrap();

    store
        .register(
            "gain",
            "Amplifier gain, narrowed",
            10.0,
            0.0,
            50.0,
            ParameterType::Float,
            true,
            None,
        )
        .unwrap();

    assert_eq!(store.get("gain").unwrap(), 10.0);
    assert_eq!(store.parameter("gain").unwrap().max(), 50.0);
    assert_eq!(store.len(), 3);
}

#[test]
fn test_registration_order_is_preserved() {
    let store = registered_store();
    let names: Vec<_> = store.names().collect();
    assert_eq!(names, vec!["gain", "spike_threshold", "refractory_ms"]);
}
