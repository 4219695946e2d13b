use gaitbase_core::error::CoreError;
use gaitbase_core::models::patient::PatientInfo;
use gaitbase_core::models::value::FieldValue;
use gaitbase_entry::error::SessionError;
use gaitbase_entry::session::EntrySession;
use gaitbase_export::render::Renderer;
use gaitbase_export::template::{Block, TextTemplate};
use gaitbase_rom::{rom_form, RomForm, DATE_FIELD, WEIGHT_FIELD};
use gaitbase_storage::error::StorageError;
use gaitbase_storage::memory::MemoryStore;

const ROM_ID: i64 = 7;

fn patient() -> PatientInfo {
    PatientInfo {
        firstname: "Matti".to_string(),
        lastname: "Meikäläinen".to_string(),
        ssn: "010101-123X".to_string(),
        patient_code: "C1234_MM".to_string(),
        diagnosis: "CP".to_string(),
    }
}

fn memory_store(form: &RomForm) -> MemoryStore {
    let mut store = MemoryStore::new(form.fields().iter().map(|f| f.name.clone()));
    store.insert_record(ROM_ID, patient());
    store
}

#[test]
fn existing_record_is_loaded() {
    let form = rom_form().unwrap();
    let mut store = memory_store(&form);
    store.put(ROM_ID, DATE_FIELD, FieldValue::from_text("01.02.2023"));
    store.put(ROM_ID, WEIGHT_FIELD, FieldValue::Number(40.0));
    store.put(ROM_ID, "IsokinPolviFleksioVasNormUn", FieldValue::Number(60.0));
    store.put(ROM_ID, "LonkkaFleksioOik", FieldValue::from_text("Ei mitattu"));

    let session = EntrySession::open(&form, store, ROM_ID, false).unwrap();
    assert_eq!(session.get(WEIGHT_FIELD), Some(&FieldValue::Number(40.0)));
    assert_eq!(session.get("LonkkaFleksioOik"), Some(&FieldValue::NoValue));
    // NULL column keeps the default
    assert_eq!(session.get("TiedotMittaajat"), Some(&FieldValue::Text(String::new())));
    // derived value is recomputed on load
    assert_eq!(
        session.get("IsokinPolviFleksioVasNorm"),
        Some(&FieldValue::Number(1.5))
    );
    assert_eq!(session.patient(), &patient());
    assert!(session.open_warnings().is_empty());
}

#[test]
fn loaded_values_are_not_defaults() {
    let form = rom_form().unwrap();
    let mut store = memory_store(&form);
    store.put(ROM_ID, "AntropPituus", FieldValue::Number(140.0));

    let session = EntrySession::open(&form, store, ROM_ID, false).unwrap();
    let defaulted = session.fields().defaulted_names().unwrap();
    assert!(!defaulted.contains("AntropPituus"));
    assert!(defaulted.contains("AntropPaino"));
}

#[test]
fn new_record_gets_todays_date() {
    let form = rom_form().unwrap();
    let session = EntrySession::open(&form, memory_store(&form), ROM_ID, true).unwrap();

    let date = session.get(DATE_FIELD).unwrap().to_string();
    assert!(gaitbase_core::validate::validate_date(&date), "{date}");
    assert_eq!(
        session.store().writes(),
        &[(ROM_ID, DATE_FIELD.to_string(), FieldValue::Text(date))]
    );
    assert!(session.validate().is_ok());
}

#[test]
fn edit_writes_through_and_recomputes() {
    let form = rom_form().unwrap();
    let mut session = EntrySession::open(&form, memory_store(&form), ROM_ID, false).unwrap();

    session
        .edit("IsokinPolviEkstensioOikNormUn", FieldValue::Number(100.0))
        .unwrap();
    let outcome = session.edit(WEIGHT_FIELD, FieldValue::Number(50.0)).unwrap();

    assert_eq!(outcome.previous, FieldValue::NoValue);
    assert_eq!(outcome.recomputed.len(), 8);
    assert!(outcome.warnings.is_empty());
    assert_eq!(
        session.get("IsokinPolviEkstensioOikNorm"),
        Some(&FieldValue::Number(2.0))
    );

    // the weight and each normalized torque were written, in that order
    let writes = session.store().writes();
    let from_weight = writes
        .iter()
        .position(|(_, name, _)| name == WEIGHT_FIELD)
        .unwrap();
    assert_eq!(writes.len() - from_weight, 9);
    assert!(writes.contains(&(
        ROM_ID,
        "IsokinPolviEkstensioOikNorm".to_string(),
        FieldValue::Number(2.0)
    )));
}

#[test]
fn scale_grade_updates_limb_total() {
    let form = rom_form().unwrap();
    let mut session = EntrySession::open(&form, memory_store(&form), ROM_ID, false).unwrap();

    session
        .edit_input("SCALELonkkaTotVas", "Normaali (2)")
        .unwrap();
    let outcome = session.edit_input("SCALENilkkaTotVas", "Alentunut (1)").unwrap();
    assert_eq!(outcome.recomputed, vec!["SCALEWholeLimbTotVasPts".to_string()]);
    assert_eq!(
        session.get("SCALEWholeLimbTotVasPts"),
        Some(&FieldValue::Number(3.0))
    );
}

#[test]
fn edit_input_parses_decimal_comma() {
    let form = rom_form().unwrap();
    let mut session = EntrySession::open(&form, memory_store(&form), ROM_ID, false).unwrap();
    session.edit_input(WEIGHT_FIELD, "34,5").unwrap();
    assert_eq!(session.get(WEIGHT_FIELD), Some(&FieldValue::Number(34.5)));
}

#[test]
fn write_failure_is_a_warning() {
    let form = rom_form().unwrap();
    let mut session = EntrySession::open(&form, memory_store(&form), ROM_ID, false).unwrap();
    session.store_mut().set_fail_writes(true);

    let outcome = session.edit(WEIGHT_FIELD, FieldValue::Number(30.0)).unwrap();
    // the weight and all eight normalized torques failed to save
    assert_eq!(outcome.warnings.len(), 9);
    assert_eq!(outcome.warnings[0].field, WEIGHT_FIELD);
    assert_eq!(session.get(WEIGHT_FIELD), Some(&FieldValue::Number(30.0)));
    assert!(session.store().writes().is_empty());

    // later edits go through once the store recovers
    session.store_mut().set_fail_writes(false);
    let outcome = session.edit("AntropPituus", FieldValue::Number(120.0)).unwrap();
    assert!(outcome.warnings.is_empty());
}

#[test]
fn derived_fields_are_read_only() {
    let form = rom_form().unwrap();
    let mut session = EntrySession::open(&form, memory_store(&form), ROM_ID, false).unwrap();
    let err = session
        .edit("IsokinPolviEkstensioOikNorm", FieldValue::Number(1.0))
        .unwrap_err();
    assert!(matches!(err, SessionError::Field(CoreError::ReadOnlyField(_))));
}

#[test]
fn invalid_choice_is_rejected() {
    let form = rom_form().unwrap();
    let mut session = EntrySession::open(&form, memory_store(&form), ROM_ID, false).unwrap();
    let err = session
        .edit("SCALELonkkaTotOik", FieldValue::from_text("Hyvä"))
        .unwrap_err();
    assert!(matches!(err, SessionError::Field(CoreError::InvalidChoice { .. })));
    assert!(session.store().writes().is_empty());
}

#[test]
fn missing_record_is_a_load_error() {
    let form = rom_form().unwrap();
    let err = EntrySession::open(&form, memory_store(&form), 99, false).err().unwrap();
    assert!(matches!(err, SessionError::Load { record_id: 99, .. }));
}

#[test]
fn schema_mismatch_is_a_load_error() {
    let form = rom_form().unwrap();
    let mut store = MemoryStore::new(
        form.fields()
            .iter()
            .map(|f| f.name.clone())
            .filter(|name| name != "AntropPituus"),
    );
    store.insert_record(ROM_ID, patient());

    let err = EntrySession::open(&form, store, ROM_ID, false).err().unwrap();
    assert!(matches!(
        err,
        SessionError::Load {
            source: StorageError::SchemaMismatch { .. },
            ..
        }
    ));
}

#[test]
fn wrongly_typed_stored_value_is_a_load_error() {
    let form = rom_form().unwrap();
    let mut store = memory_store(&form);
    store.put(ROM_ID, WEIGHT_FIELD, FieldValue::from_text("painava"));

    let err = EntrySession::open(&form, store, ROM_ID, false).err().unwrap();
    assert!(matches!(err, SessionError::Load { .. }));
}

#[test]
fn close_requires_a_valid_date() {
    let form = rom_form().unwrap();
    let mut session = EntrySession::open(&form, memory_store(&form), ROM_ID, false).unwrap();

    assert!(matches!(session.close(false), Err(SessionError::Validation(_))));

    session.edit_input(DATE_FIELD, "31.02.2023").unwrap();
    assert!(matches!(session.close(false), Err(SessionError::Validation(_))));

    session.edit_input(DATE_FIELD, "28.02.23").unwrap();
    assert!(matches!(session.close(false), Err(SessionError::Validation(_))));

    session.edit_input(DATE_FIELD, "28.02.2023").unwrap();
    assert_eq!(session.close(false).unwrap(), None);
}

#[test]
fn forced_close_skips_validation() {
    let form = rom_form().unwrap();
    let session = EntrySession::open(&form, memory_store(&form), ROM_ID, false).unwrap();
    assert_eq!(session.close(true).unwrap(), None);
}

#[test]
fn units_follow_the_value() {
    let form = rom_form().unwrap();
    let mut session = EntrySession::open(&form, memory_store(&form), ROM_ID, false).unwrap();
    assert_eq!(session.units(WEIGHT_FIELD), Some(""));
    session.edit(WEIGHT_FIELD, FieldValue::Number(34.0)).unwrap();
    assert_eq!(session.units(WEIGHT_FIELD), Some(" kg"));
    assert_eq!(session.units("LonkkaFleksioOik"), Some(""));
    assert_eq!(session.units("nope"), None);
}

#[test]
fn text_report_elides_untouched_clauses() {
    let form = rom_form().unwrap();
    let mut session = EntrySession::open(&form, memory_store(&form), ROM_ID, false).unwrap();
    session.edit(WEIGHT_FIELD, FieldValue::Number(34.0)).unwrap();

    let template = TextTemplate {
        blocks: vec![
            Block::text("{patient_code}: "),
            Block::text("pituus {AntropPituus}"),
            Block::Separator,
            Block::text("paino {AntropPaino}"),
            Block::Separator,
            Block::text("lonkan fleksio {LonkkaFleksioOik}"),
        ],
    };
    let renderer = Renderer::default();
    assert_eq!(
        session.text_report(&template, &renderer, true).unwrap(),
        "C1234_MM: paino 34 kg"
    );
    assert_eq!(
        session.text_report(&template, &renderer, false).unwrap(),
        "C1234_MM: paino 34"
    );
}

#[test]
fn legacy_scale_grade_counts_towards_the_total() {
    let form = rom_form().unwrap();
    let mut store = memory_store(&form);
    store.put(ROM_ID, "SCALEPolviTotOik", FieldValue::from_text("Alentunnut (1)"));
    store.put(ROM_ID, "SCALELonkkaTotOik", FieldValue::from_text("Normaali (2)"));

    let session = EntrySession::open(&form, store, ROM_ID, false).unwrap();
    assert_eq!(
        session.get("SCALEWholeLimbTotOikPts"),
        Some(&FieldValue::Number(3.0))
    );
    // the recomputed total was stored
    assert!(session.store().writes().contains(&(
        ROM_ID,
        "SCALEWholeLimbTotOikPts".to_string(),
        FieldValue::Number(3.0)
    )));
}
