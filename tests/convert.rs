use hikiko_script::{
    config::ConverterConfig,
    convert_script_from_file,
    diagnostics::{NullSink, RecordingSink, Severity},
    modifiers::{self, ModifierType},
    parsers::ParseError,
};
use std::io::Write;

fn script_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn converts_a_script_file() {
    let file = script_file(
        "Sunny[SU 2]: Hello [~]world[~]!\r\n\r\nHikiko[HI 0]: [-]...[-]\r\nnarration without speaker\r\nBasil[BA 5]: *Sunny!*\r\n",
    );
    let filename = file.path().to_str().unwrap();
    let mut sink = RecordingSink::new(NullSink);

    let messages =
        convert_script_from_file(filename, &ConverterConfig::default(), &mut sink).unwrap();

    assert_eq!(messages.len(), 3);

    assert_eq!(messages[0].record.faceset_id.as_deref(), Some("SU_DreamSunny"));
    assert_eq!(messages[0].record.face_index, 2);
    assert_eq!(messages[0].plain_text.as_deref(), Some("Hello world!"));

    assert_eq!(
        messages[1].record.faceset_id.as_deref(),
        Some("MainCharacter_Hikiko")
    );
    assert_eq!(messages[1].record.face_index, 0);
    assert_eq!(messages[1].modifiers[0].kind, ModifierType::SmallerFont);

    assert_eq!(messages[2].record.speaker_name, "Basil");
    assert_eq!(messages[2].plain_text.as_deref(), Some("Sunny!"));

    assert_eq!(sink.count(Severity::Error), 1);
    assert!(sink
        .entries()
        .iter()
        .any(|(_, m)| m.starts_with("On line 4 of")));
}

#[test]
fn fatal_error_reports_location() {
    let file = script_file("Hero: ok\nMari[MA 1]: unknown writer code\nHero: after\n");
    let filename = file.path().to_str().unwrap();

    let err = convert_script_from_file(filename, &ConverterConfig::default(), &mut NullSink)
        .unwrap_err();
    let err = err.downcast_ref::<ParseError>().unwrap();

    assert_eq!(err.line_number, 2);
    assert_eq!(err.line, "Mari[MA 1]: unknown writer code");
    assert!(err.to_string().contains("Writer used an unknown faceset. Text: [MA 1]"));
}

#[test]
fn custom_faceset_table() {
    let table = script_file(r#"[["MA", "MA_DreamMari"]]"#);
    let config =
        ConverterConfig::with_faceset_file(table.path().to_str()).unwrap();

    let file = script_file("Mari[MA 3]: Welcome back.\n");
    let messages =
        convert_script_from_file(file.path().to_str().unwrap(), &config, &mut NullSink).unwrap();

    assert_eq!(messages[0].record.faceset_id.as_deref(), Some("MA_DreamMari"));
    assert_eq!(messages[0].record.face_index, 3);
}

#[test]
fn scan_never_repeats_a_type() {
    let text = "[~]a[~]b*c*d*[#][#][#]";
    let found = modifiers::scan(text);
    let mut kinds: Vec<ModifierType> = found.iter().map(|m| m.kind).collect();
    let total = kinds.len();
    kinds.dedup();
    assert_eq!(kinds.len(), total);
    assert_eq!(total, 3);
}
