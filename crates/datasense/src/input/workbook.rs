//! Spreadsheet workbook decoding.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};

use crate::error::{DataSenseError, Result};
use crate::value::{CellValue, Row};

use super::parser::unique_headers;
use super::source::DecodedTable;

/// Header used for a blank header cell.
const EMPTY_HEADER: &str = "__EMPTY";

/// Decode the first sheet of a workbook.
///
/// The first row holds the headers. Blank cells are left out of their
/// record and fully blank rows are skipped. The columns are the keys of
/// the first record; any other record missing one of them gets an absent
/// cell.
pub(crate) fn parse_workbook(
    bytes: &[u8],
    max_rows: Option<usize>,
) -> Result<(DecodedTable, &'static str)> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| DataSenseError::Workbook(e.to_string()))?;

    let format = match &workbook {
        Sheets::Xls(_) => "xls",
        Sheets::Xlsx(_) => "xlsx",
        Sheets::Xlsb(_) => "xlsb",
        Sheets::Ods(_) => "ods",
    };

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(empty_sheet)?
        .map_err(|e| DataSenseError::Workbook(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let header_row = sheet_rows.next().ok_or_else(empty_sheet)?;

    let names: Vec<String> = header_row.iter().map(header_name).collect();
    let headers = unique_headers(names.iter().map(String::as_str));

    let records: Vec<Row> = sheet_rows
        .map(|cells| {
            headers
                .iter()
                .zip(cells)
                .filter_map(|(header, cell)| decode_cell(cell).map(|v| (header.clone(), v)))
                .collect::<Row>()
        })
        .filter(|record| !record.is_empty())
        .take(max_rows.unwrap_or(usize::MAX))
        .collect();

    let columns: Vec<String> = records.first().ok_or_else(empty_sheet)?.keys().cloned().collect();

    let rows = records
        .into_iter()
        .map(|mut record| {
            columns
                .iter()
                .map(|column| {
                    let cell = record.shift_remove(column).unwrap_or(CellValue::Absent);
                    (column.clone(), cell)
                })
                .collect::<Row>()
        })
        .collect();

    tracing::debug!(format, columns = columns.len(), "decoded first sheet");
    Ok((DecodedTable::new(columns, rows), format))
}

fn empty_sheet() -> DataSenseError {
    DataSenseError::EmptySource("The spreadsheet is empty".to_string())
}

fn header_name(cell: &Data) -> String {
    match decode_cell(cell).map(|v| v.to_string()) {
        Some(name) if !name.is_empty() => name,
        _ => EMPTY_HEADER.to_string(),
    }
}

/// Typed value of a cell, or `None` for a blank one. Dates stay serial numbers.
fn decode_cell(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::Int(n) => Some(CellValue::Number(*n as f64)),
        Data::Float(n) => Some(CellValue::Number(*n)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => Some(CellValue::Text(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn sales_workbook() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        sheet.write_string(0, 0, "id").unwrap();
        sheet.write_string(0, 1, "region").unwrap();
        sheet.write_string(0, 2, "amount").unwrap();

        sheet.write_number(1, 0, 1).unwrap();
        sheet.write_string(1, 1, "north").unwrap();
        sheet.write_number(1, 2, 10.5).unwrap();

        // Blank region cell.
        sheet.write_number(2, 0, 2).unwrap();
        sheet.write_number(2, 2, 7).unwrap();

        // Row 3 is left blank.
        sheet.write_number(4, 0, 3).unwrap();
        sheet.write_string(4, 1, "east").unwrap();
        sheet.write_boolean(4, 2, true).unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_first_sheet_is_decoded() {
        let (table, format) = parse_workbook(&sales_workbook(), None).unwrap();

        assert_eq!(format, "xlsx");
        assert_eq!(table.columns, vec!["id", "region", "amount"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows[0]["amount"], CellValue::Number(10.5));
        assert_eq!(table.rows[1]["region"], CellValue::Absent);
        assert_eq!(table.rows[2]["amount"], CellValue::Bool(true));
    }

    #[test]
    fn test_columns_follow_first_record() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "id").unwrap();
        sheet.write_string(0, 1, "note").unwrap();
        sheet.write_number(1, 0, 1).unwrap();
        sheet.write_number(2, 0, 2).unwrap();
        sheet.write_string(2, 1, "late").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let (table, _) = parse_workbook(&bytes, None).unwrap();
        assert_eq!(table.columns, vec!["id"]);
        assert!(table.rows.iter().all(|r| r.len() == 1));
    }

    #[test]
    fn test_max_rows() {
        let (table, _) = parse_workbook(&sales_workbook(), Some(2)).unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_empty_sheet_is_empty_source() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        let bytes = workbook.save_to_buffer().unwrap();

        let err = parse_workbook(&bytes, None).unwrap_err();
        assert!(matches!(err, DataSenseError::EmptySource(msg) if msg == "The spreadsheet is empty"));
    }

    #[test]
    fn test_header_only_sheet_is_empty_source() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().write_string(0, 0, "id").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let err = parse_workbook(&bytes, None).unwrap_err();
        assert!(matches!(err, DataSenseError::EmptySource(_)));
    }

    #[test]
    fn test_not_a_workbook() {
        let err = parse_workbook(b"not really a workbook", None).unwrap_err();
        assert!(matches!(err, DataSenseError::Workbook(_)));
    }
}
