//! Spreadsheet export of the full roster.

use std::fmt;

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};

use crate::person::Person;

/// Worksheet name, also used for the download file name.
pub const SHEET_NAME: &str = "Rookies";

/// Header row, in column order.
pub const COLUMNS: [&str; 8] = [
    "ID",
    "First Name",
    "Last Name",
    "Gender",
    "Date of Birth",
    "Phone Number",
    "Birth Place",
    "Is Graduated",
];

/// Failure while encoding the workbook.
#[derive(Debug)]
pub enum ExportError {
    /// The xlsx writer rejected a cell or failed to serialize.
    Xlsx(XlsxError),
    /// More records than a worksheet can hold.
    TooManyRows(usize),
}

impl From<XlsxError> for ExportError {
    fn from(value: XlsxError) -> Self {
        Self::Xlsx(value)
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Xlsx(err) => write!(f, "xlsx encoding failed: {err}"),
            ExportError::TooManyRows(n) => write!(f, "{n} rows exceed the worksheet limit"),
        }
    }
}

impl std::error::Error for ExportError {}

/// Spreadsheet serial date, or `None` outside the 1900-01-01..=9999-12-31 range xlsx supports.
fn excel_date(person: &Person) -> Option<ExcelDateTime> {
    let d = person.date_of_birth;
    let year = u16::try_from(d.year()).ok()?;
    ExcelDateTime::from_ymd(year, u8::from(d.month()), d.day()).ok()
}

/// Encodes `people` as an `.xlsx` workbook with a single [`SHEET_NAME`] sheet.
///
/// Rows follow slice order. Column widths are fitted to their content. Birth
/// dates the format cannot represent are written as `dd/mm/yyyy` text so one
/// record never blocks the export.
pub fn export_people(people: &[Person]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in (0u16..).zip(COLUMNS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }

    for (idx, person) in people.iter().enumerate() {
        let row = u32::try_from(idx + 1).map_err(|_| ExportError::TooManyRows(people.len()))?;

        sheet.write_number(row, 0, f64::from(person.id))?;
        sheet.write_string(row, 1, &person.first_name)?;
        sheet.write_string(row, 2, &person.last_name)?;
        sheet.write_string(row, 3, person.gender.as_str())?;
        match excel_date(person) {
            Some(dob) => sheet.write_datetime_with_format(row, 4, &dob, &date_format)?,
            None => sheet.write_string(row, 4, person.date_of_birth_string())?,
        };
        sheet.write_string(row, 5, &person.phone_number)?;
        sheet.write_string(row, 6, &person.birth_place)?;
        sheet.write_boolean(row, 7, person.is_graduated)?;
    }

    sheet.autofit();

    Ok(workbook.save_to_buffer()?)
}
