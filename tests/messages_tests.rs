use casesheet::state::column::ColumnType;
use casesheet::state::ids::Id;
use casesheet::state::messages;
use casesheet::state::mode::OperationMode;
use casesheet::state::rejection::Rejection;
use casesheet::state::template::TemplateKind;

#[test]
fn test_known_key_resolves() {
    assert_eq!(messages::tr("toolbar.open"), "Open");
    assert_eq!(messages::tr("column_type.long_text"), "Long text");
}

#[test]
fn test_missing_key_falls_back_to_key() {
    assert_eq!(messages::tr("nope.missing"), "nope.missing");
}

#[test]
fn test_placeholders_are_filled() {
    assert_eq!(
        messages::tr_with("files.uploading", &[("name", "a.png"), ("index", "2"), ("total", "3")]),
        "Uploading a.png (2/3)"
    );
}

#[test]
fn test_every_label_key_is_in_catalog() {
    let mut keys: Vec<&str> = Vec::new();
    keys.extend(ColumnType::all().iter().map(|ty| ty.label_key()));
    keys.extend(OperationMode::all().iter().map(|mode| mode.label_key()));
    keys.extend(TemplateKind::all().iter().map(|kind| kind.label_key()));
    keys.extend(
        [
            Rejection::LastRow,
            Rejection::ColumnLimit { max: 1 },
            Rejection::ColumnMinimum { min: 1 },
            Rejection::ReorderNotAllowed,
            Rejection::NoSuchRow(0),
            Rejection::NotEditable,
            Rejection::NoColumnInRow { row: Id(1), column: 0 },
            Rejection::UnknownColumn(Id(1)),
        ]
        .iter()
        .map(Rejection::message_key),
    );

    for key in keys {
        assert_ne!(messages::tr(key), key, "missing catalog entry for {key}");
    }
}
