use gaitbase_export::error::ExportError;
use gaitbase_export::template::{parse_placeholders, Block, Segment, TextTemplate};

#[test]
fn loads_strings_and_separator_markers() {
    let template =
        TextTemplate::from_json(r#"["Paino {AntropPaino}", {"separator": true}, "pituus {AntropPituus}"]"#)
            .unwrap();
    assert_eq!(
        template.blocks,
        vec![
            Block::text("Paino {AntropPaino}"),
            Block::Separator,
            Block::text("pituus {AntropPituus}"),
        ]
    );
}

#[test]
fn false_separator_marker_is_rejected() {
    let err = TextTemplate::from_json(r#"["a", {"separator": false}]"#).unwrap_err();
    assert!(matches!(err, ExportError::TemplateParse(_)));
}

#[test]
fn malformed_placeholders_are_rejected() {
    for text in ["{unclosed", "stray }", "{}", "{x:>5}", "{x!r}"] {
        let json = serde_json::to_string(&[text]).unwrap();
        assert!(
            matches!(TextTemplate::from_json(&json), Err(ExportError::TemplateParse(_))),
            "{text:?} should not parse"
        );
    }
}

#[test]
fn parse_splits_literals_and_fields() {
    assert_eq!(
        parse_placeholders("oik {a}{{b}} vas {c}").unwrap(),
        vec![
            Segment::Literal("oik ".to_string()),
            Segment::Field("a"),
            Segment::Literal("{b} vas ".to_string()),
            Segment::Field("c"),
        ]
    );
}

#[test]
fn bundled_template_parses() {
    let template = TextTemplate::bundled().unwrap();
    assert!(template.blocks.contains(&Block::Separator));
}

#[test]
fn missing_file_falls_back_to_bundled() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    assert!(matches!(
        TextTemplate::load(&missing),
        Err(ExportError::TemplateNotFound(_))
    ));
    let template = TextTemplate::load_or_default(Some(&missing)).unwrap();
    assert_eq!(template, TextTemplate::bundled().unwrap());
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("template.json");
    std::fs::write(&path, r#"["{a}", {"separator": true}, "{b}"]"#).unwrap();
    let template = TextTemplate::load_or_default(Some(&path)).unwrap();
    assert_eq!(template.blocks.len(), 3);
}
