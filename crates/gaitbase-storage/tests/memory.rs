use gaitbase_core::models::patient::PatientInfo;
use gaitbase_core::models::value::FieldValue;
use gaitbase_storage::error::StorageError;
use gaitbase_storage::memory::MemoryStore;
use gaitbase_storage::record::RecordStore;

fn store() -> MemoryStore {
    let mut store = MemoryStore::new(["AntropPaino", "TiedotPvm"]);
    store.insert_record(1, PatientInfo::default());
    store
}

#[test]
fn writes_round_trip_and_are_logged() {
    let mut store = store();
    store
        .update(1, &["AntropPaino", "TiedotPvm"], &[
            FieldValue::NoValue,
            FieldValue::Text("02.03.2024".into()),
        ])
        .unwrap();
    assert_eq!(
        store.select(1, &["AntropPaino", "TiedotPvm"]).unwrap(),
        vec![
            Some(FieldValue::NoValue),
            Some(FieldValue::Text("02.03.2024".into()))
        ]
    );
    assert_eq!(store.writes().len(), 2);
}

#[test]
fn failing_writes_leave_the_row_untouched() {
    let mut store = store();
    store.set_fail_writes(true);
    let err = store
        .update(1, &["AntropPaino"], &[FieldValue::Number(30.0)])
        .unwrap_err();
    assert!(matches!(err, StorageError::WriteRejected(_)));
    assert_eq!(store.select(1, &["AntropPaino"]).unwrap(), vec![None]);
    assert!(store.writes().is_empty());
}

#[test]
fn unknown_columns_are_a_schema_mismatch() {
    let store = store();
    assert!(matches!(
        store.select(1, &["Nope"]),
        Err(StorageError::SchemaMismatch { .. })
    ));
}
