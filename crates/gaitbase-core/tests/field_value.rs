use gaitbase_core::error::CoreError;
use gaitbase_core::models::field::{Affinity, FieldDecl};
use gaitbase_core::models::value::{FieldValue, NO_VALUE_TEXT};

#[test]
fn numbers_display_without_trailing_zero_fraction() {
    assert_eq!(FieldValue::Number(10.0).to_string(), "10");
    assert_eq!(FieldValue::Number(10.5).to_string(), "10.5");
    assert_eq!(FieldValue::NoValue.to_string(), NO_VALUE_TEXT);
}

#[test]
fn sentinel_text_maps_to_no_value() {
    assert_eq!(FieldValue::from_text(NO_VALUE_TEXT), FieldValue::NoValue);
    assert_eq!(
        FieldValue::from_text("Kyllä"),
        FieldValue::Text("Kyllä".to_string())
    );
}

#[test]
fn json_form_keeps_numbers_numeric() {
    let json = serde_json::to_string(&vec![
        FieldValue::Number(2.5),
        FieldValue::Text("x".into()),
        FieldValue::NoValue,
    ])
    .unwrap();
    assert_eq!(json, r#"[2.5,"x","Ei mitattu"]"#);

    let back: Vec<FieldValue> = serde_json::from_str(r#"[2.5,"x","Ei mitattu",null]"#).unwrap();
    assert_eq!(
        back,
        vec![
            FieldValue::Number(2.5),
            FieldValue::Text("x".into()),
            FieldValue::NoValue,
            FieldValue::NoValue,
        ]
    );
}

#[test]
fn affinity_follows_kind() {
    assert_eq!(FieldDecl::numeric("a").affinity(), Affinity::Numeric);
    assert_eq!(FieldDecl::text("b").affinity(), Affinity::Text);
    assert_eq!(
        FieldDecl::choice("c", &["Ei", "Kyllä"]).affinity(),
        Affinity::Text
    );
}

#[test]
fn unit_is_shown_only_for_measured_numbers() {
    let decl = FieldDecl::numeric("LonkkaFleksioOik").with_unit("°");
    assert_eq!(decl.unit_for(&FieldValue::Number(90.0)), "°");
    assert_eq!(decl.unit_for(&FieldValue::NoValue), "");
}

#[test]
fn display_rounds_to_declared_decimals() {
    let decl = FieldDecl::numeric("IsokinPolviEkstensioOikNorm").with_decimals(2);
    assert_eq!(decl.display(&FieldValue::Number(100.0 / 30.0)), "3.33");
    assert_eq!(decl.display(&FieldValue::Number(0.5)), "0.5");
    assert_eq!(decl.display(&FieldValue::NoValue), NO_VALUE_TEXT);
    let plain = FieldDecl::numeric("AntropPaino");
    assert_eq!(plain.display(&FieldValue::Number(32.25)), "32.25");
}

#[test]
fn numeric_input_accepts_decimal_comma_and_blank() {
    let decl = FieldDecl::numeric("AntropPaino");
    assert_eq!(decl.parse_input("31,5").unwrap(), FieldValue::Number(31.5));
    assert_eq!(decl.parse_input(" 40 ").unwrap(), FieldValue::Number(40.0));
    assert_eq!(decl.parse_input("").unwrap(), FieldValue::NoValue);
    assert!(matches!(
        decl.parse_input("kolme"),
        Err(CoreError::InvalidNumber { .. })
    ));
}

#[test]
fn choice_input_must_be_an_option() {
    let decl = FieldDecl::choice("KyselyApuvalineet", &["Ei", "Kyllä"]);
    assert_eq!(
        decl.parse_input("Kyllä").unwrap(),
        FieldValue::Text("Kyllä".into())
    );
    assert!(decl.parse_input("Ehkä").is_err());
}
