use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};

use roster::{
    core::store::PersonStore,
    export::{COLUMNS, SHEET_NAME, export_people},
    validate::PersonForm,
};

// 1995-05-23 as a 1900-system serial date.
const JOHN_DOB_SERIAL: f64 = 34842.0;

fn form_born(date_of_birth: &str) -> PersonForm {
    PersonForm {
        first_name: Some("Old".to_string()),
        last_name: Some("Timer".to_string()),
        gender: Some("Other".to_string()),
        date_of_birth: Some(date_of_birth.to_string()),
        phone_number: Some("0912345678".to_string()),
        birth_place: None,
        is_graduated: None,
    }
}

fn read_back(bytes: Vec<u8>) -> calamine::Range<Data> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).expect("open xlsx");
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    workbook.worksheet_range(SHEET_NAME).expect("sheet")
}

fn cell(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
    range
        .get_value((row, col))
        .map(ToString::to_string)
        .unwrap_or_default()
}

#[test]
fn export_writes_header_and_rows_in_store_order() {
    let store = PersonStore::seeded();
    let range = read_back(export_people(store.all()).expect("export"));

    assert_eq!(range.height(), 21);
    assert_eq!(range.width(), COLUMNS.len());
    for (col, title) in COLUMNS.iter().enumerate() {
        assert_eq!(cell(&range, 0, col as u32), *title);
    }
    assert_eq!(cell(&range, 1, 1), "John");
    assert_eq!(cell(&range, 1, 2), "Doe");
    assert_eq!(cell(&range, 1, 3), "Male");
    assert_eq!(cell(&range, 1, 5), "0587960813");
    assert_eq!(cell(&range, 1, 6), "New York");
    assert_eq!(range.get_value((1, 7)), Some(&Data::Bool(true)));
    assert_eq!(range.get_value((2, 7)), Some(&Data::Bool(false)));
    assert_eq!(range.get_value((1, 0)), Some(&Data::Float(1.0)));
    assert_eq!(range.get_value((20, 0)), Some(&Data::Float(20.0)));

    match range.get_value((1, 4)) {
        Some(Data::DateTime(dt)) => assert_eq!(dt.as_f64(), JOHN_DOB_SERIAL),
        other => panic!("expected a date cell, got {other:?}"),
    }
}

#[test]
fn dates_outside_spreadsheet_range_export_as_text() {
    for (input, rendered) in [
        ("1850-06-01", "01/06/1850"),
        ("1899-12-30", "30/12/1899"),
        ("0001-01-01", "01/01/0001"),
    ] {
        let draft = form_born(input).validate().expect("valid form");
        let mut store = PersonStore::seeded();
        let id = store.insert(draft).id;
        assert_eq!(id, 21);

        let range = read_back(export_people(store.all()).expect("export"));
        assert_eq!(range.height(), 22, "{input}");
        assert_eq!(range.get_value((1, 0)), Some(&Data::Float(21.0)));
        assert_eq!(
            range.get_value((1, 4)),
            Some(&Data::String(rendered.to_string())),
            "{input}"
        );
        // the rest of the roster keeps real dates
        assert!(matches!(range.get_value((2, 4)), Some(Data::DateTime(_))));
    }
}

#[test]
fn last_representable_date_stays_a_date() {
    let draft = form_born("9999-12-31").validate().expect("valid form");
    let mut store = PersonStore::new();
    store.insert(draft);
    let range = read_back(export_people(store.all()).expect("export"));
    assert!(matches!(range.get_value((1, 4)), Some(Data::DateTime(_))));
}

#[test]
fn export_reflects_current_collection() {
    let mut store = PersonStore::seeded();
    store.delete_by_id(1).unwrap();
    let range = read_back(export_people(store.all()).expect("export"));
    assert_eq!(range.height(), 20);
    assert_eq!(cell(&range, 1, 1), "Jane");
}

#[test]
fn export_of_empty_roster_has_only_header() {
    let range = read_back(export_people(&[]).expect("export"));
    assert_eq!(range.height(), 1);
    assert_eq!(cell(&range, 0, 0), "ID");
}
