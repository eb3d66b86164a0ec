//! Excel workbook import/export.

pub mod xlsx;

pub use xlsx::{
    SEQUENCE_HEADER, SHEET_NAME, default_export_name, field_header, read_workbook,
    read_workbook_bytes, write_workbook,
};
