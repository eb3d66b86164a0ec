//! Error types for planline core.

use thiserror::Error;

/// Errors that can occur in the planline application
#[derive(Error, Debug)]
pub enum PlanlineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("No rows with a project name found in the imported file")]
    EmptyImport,

    #[error("No file path set")]
    NoFilePath,
}

pub type Result<T> = std::result::Result<T, PlanlineError>;
