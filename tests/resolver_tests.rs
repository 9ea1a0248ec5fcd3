use neurodata_core::*;

use test_helpers::*;

#[test]
fn test_resolution_agrees_with_the_identifier_sequence() {
    let store = sample_store();
    let table = store.units_table().unwrap();
    let ids = table.unit_ids().unwrap();

    for id in &ids {
        let position = resolve_unit(&store, id).unwrap();
        assert_eq!(&ids[position], id);
    }
}

#[test]
fn test_absent_identifier_is_not_found() {
    let store = sample_store();
    let err = resolve_unit(&store, &UnitId::from(42)).unwrap_err();
    assert!(matches!(err, NeurodataError::NotFound(_)));
    assert!(err.to_string().contains("42"));
}

#[test]
fn test_store_without_units_table_is_not_found() {
    let store = MemoryStore::builder().session_id("empty").build();
    let err = resolve_unit(&store, &UnitId::from(7)).unwrap_err();
    assert!(matches!(err, NeurodataError::NotFound(_)));

    assert!(UnitIndexResolver::for_store(&store).is_err());
}

#[test]
fn test_string_identifiers_resolve() {
    let table = MemoryUnitsTable::new(vec!["probe1-u0", "probe1-u1", "probe2-u0"]);
    assert_eq!(
        resolve_in_table(&table, &UnitId::from("probe2-u0")).unwrap(),
        2
    );
    // Integer and string identifiers never compare equal.
    assert!(resolve_in_table(&table, &UnitId::from(0)).is_err());
}

#[test]
fn test_cached_resolver_scans_the_identifiers_once() {
    let store = sample_store();
    let resolver = UnitIndexResolver::for_store(&store).unwrap();

    assert_eq!(resolver.resolve(&UnitId::from(7)).unwrap(), 0);
    assert_eq!(resolver.resolve(&UnitId::from(3)).unwrap(), 1);
    assert_eq!(resolver.resolve(&UnitId::from(9)).unwrap(), 2);
    assert!(resolver.resolve(&UnitId::from(8)).is_err());

    assert_eq!(store.units_table().unwrap().unit_id_reads(), 1);
}

#[test]
fn test_cached_and_uncached_resolution_agree() {
    let store = sample_store();
    let table = store.units_table().unwrap();
    let resolver = UnitIndexResolver::new(table);

    for id in table.unit_ids().unwrap() {
        assert_eq!(
            resolver.resolve(&id).unwrap(),
            resolve_in_table(table, &id).unwrap()
        );
    }
}
