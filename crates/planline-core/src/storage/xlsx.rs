//! Excel workbook bridge.
//!
//! Import reads the first sheet only and recognizes columns by exact header
//! text; any other header layout yields zero recognized fields per row.
//! Export writes a header row plus one row per record in store order, with
//! a 1-based sequence column and the amount coerced to a number.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use rust_xlsxwriter::Workbook;

use crate::document::{Field, Record, parse_amount};
use crate::error::{PlanlineError, Result};

/// Sheet name used on export.
pub const SHEET_NAME: &str = "Projects";

/// Header of the 1-based sequence-number column.
pub const SEQUENCE_HEADER: &str = "ลำดับที่";

/// Display-language column header for a field.
///
/// The mapping is one-to-one with no aliases; import matches these strings
/// exactly.
pub fn field_header(field: Field) -> &'static str {
    match field {
        Field::Name => "งาน/โครงการ",
        Field::Department => "ฝ่ายงานรับผิดชอบ",
        Field::Amount => "จำนวนเงินที่เสนอขออนุมัติ",
        Field::Manager => "ผู้รับผิดชอบโครงการ",
        Field::Duration => "ระยะเวลาดำเนินงาน",
    }
}

fn header_field(text: &str) -> Option<Field> {
    Field::ALL.into_iter().find(|f| field_header(*f) == text)
}

/// Default export filename, embedding the fiscal-year label.
pub fn default_export_name(fiscal_year: i32) -> String {
    format!("แผนงานและโครงการ-ปีงบประมาณ-{fiscal_year}.xlsx")
}

/// Read records from the first sheet of the workbook at `path`.
///
/// Rows whose mapped name is empty are dropped. Returns an empty vec when
/// nothing survives; callers decide whether that is an error.
pub fn read_workbook(path: &Path) -> Result<Vec<Record>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| PlanlineError::Workbook(format!("failed to open {}: {e}", path.display())))?;
    records_from_sheets(&mut workbook)
}

/// Read records from an in-memory workbook byte stream.
pub fn read_workbook_bytes(bytes: &[u8]) -> Result<Vec<Record>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| PlanlineError::Workbook(format!("failed to open byte stream: {e}")))?;
    records_from_sheets(&mut workbook)
}

fn records_from_sheets<RS: std::io::Read + std::io::Seek>(
    workbook: &mut Sheets<RS>,
) -> Result<Vec<Record>> {
    let sheet_names = workbook.sheet_names().to_vec();
    let Some(first) = sheet_names.first() else {
        return Err(PlanlineError::Workbook("workbook contains no sheets".to_string()));
    };

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| PlanlineError::Workbook(format!("failed to read sheet '{first}': {e}")))?;

    let mut rows = range.rows();

    // The first non-empty row is the header row. Unrecognized headers map
    // to None and their columns are ignored below.
    let columns: Vec<Option<Field>> = loop {
        match rows.next() {
            Some(row) if row.iter().any(|c| !matches!(c, Data::Empty)) => {
                break row.iter().map(|c| header_field(&cell_text(c))).collect();
            }
            Some(_) => continue,
            None => return Ok(Vec::new()),
        }
    };

    let mut records = Vec::new();
    for row in rows {
        let mut record = Record::blank();
        for (field, cell) in columns.iter().zip(row) {
            if let Some(field) = field {
                record.set(*field, &cell_text(cell));
            }
        }
        // Rows without a project name are dropped, matching the count
        // semantics of the summary.
        if record.name.is_empty() {
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

/// Coerce a raw cell to the text a record stores.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        // Integral floats print without a trailing ".0" so an exported
        // amount of 150000 survives a round trip as the same text.
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        Data::Float(n) => n.to_string(),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Write `records` to an xlsx workbook at `path`.
///
/// One sheet named [`SHEET_NAME`]: the header row, then one row per record
/// in store order. The amount column is written as a number via
/// [`parse_amount`], so a non-numeric amount exports as 0.
pub fn write_workbook(path: &Path, records: &[Record]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    worksheet.write_string(0, 0, SEQUENCE_HEADER)?;
    for (col, field) in Field::ALL.into_iter().enumerate() {
        worksheet.write_string(0, (col + 1) as u16, field_header(field))?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_number(row, 0, (idx + 1) as f64)?;
        worksheet.write_string(row, 1, &record.name)?;
        worksheet.write_string(row, 2, &record.department)?;
        worksheet.write_number(row, 3, parse_amount(&record.amount))?;
        worksheet.write_string(row, 4, &record.manager)?;
        worksheet.write_string(row, 5, &record.duration)?;
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_xlsx(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "planline_{}_{}_{}_{:?}.xlsx",
            tag,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos(),
            std::thread::current().id(),
        ))
    }

    struct Cleanup(std::path::PathBuf);
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn test_header_mapping_is_one_to_one() {
        for field in Field::ALL {
            assert_eq!(header_field(field_header(field)), Some(field));
        }
        assert_eq!(header_field("Name"), None);
        assert_eq!(header_field(SEQUENCE_HEADER), None);
    }

    #[test]
    fn test_default_export_name_embeds_year() {
        assert_eq!(
            default_export_name(2569),
            "แผนงานและโครงการ-ปีงบประมาณ-2569.xlsx"
        );
    }

    #[test]
    fn test_cell_text_coercion() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("x".to_string())), "x");
        assert_eq!(cell_text(&Data::Float(150000.0)), "150000");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Bool(true)), "TRUE");
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let path = temp_xlsx("round_trip");
        let _cleanup = Cleanup(path.clone());

        let records = vec![
            Record::new("งานแรก", "ฝ่ายหนึ่ง", "150,000", "สมชาย", "ม.ค."),
            Record::new("งานที่สอง", "ฝ่ายสอง", "85000", "สมศรี", "เม.ย."),
            Record::blank(),
        ];
        write_workbook(&path, &records).unwrap();

        let imported = read_workbook(&path).unwrap();
        // The blank placeholder has no name and is dropped on import.
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].name, "งานแรก");
        assert_eq!(imported[0].department, "ฝ่ายหนึ่ง");
        // Export writes the parsed number, so the grouped text comes back
        // as its plain numeric form.
        assert_eq!(imported[0].amount, "150000");
        assert_eq!(imported[1].manager, "สมศรี");
        assert_eq!(imported[1].duration, "เม.ย.");
        assert_ne!(imported[0].id(), records[0].id());
    }

    #[test]
    fn test_non_numeric_amount_exports_as_zero() {
        let path = temp_xlsx("bad_amount");
        let _cleanup = Cleanup(path.clone());

        let records = vec![Record::new("งาน", "", "abc", "", "")];
        write_workbook(&path, &records).unwrap();

        let imported = read_workbook(&path).unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].amount, "0");
    }

    #[test]
    fn test_unrecognized_headers_yield_no_records() {
        let path = temp_xlsx("wrong_headers");
        let _cleanup = Cleanup(path.clone());

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Name").unwrap();
        worksheet.write_string(0, 1, "Amount").unwrap();
        worksheet.write_string(1, 0, "project").unwrap();
        worksheet.write_string(1, 1, "100").unwrap();
        workbook.save(&path).unwrap();

        // No recognized name column, so every row is dropped.
        assert!(read_workbook(&path).unwrap().is_empty());
    }

    #[test]
    fn test_header_only_sheet_yields_no_records() {
        let path = temp_xlsx("header_only");
        let _cleanup = Cleanup(path.clone());

        write_workbook(&path, &[]).unwrap();
        assert!(read_workbook(&path).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_bytes_error() {
        let err = read_workbook_bytes(b"this is not a workbook").unwrap_err();
        assert!(matches!(err, PlanlineError::Workbook(_)));
    }
}
