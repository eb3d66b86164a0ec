use super::Document;
use crate::error::{PlanlineError, Result};
use crate::storage::{default_export_name, read_workbook, read_workbook_bytes, write_workbook};
use std::path::{Path, PathBuf};

impl Document {
    /// Import records from the workbook at `path`, replacing the current
    /// rows wholesale.
    ///
    /// The replace is transactional: if the workbook cannot be read, or no
    /// row carries a project name, the document is left untouched and the
    /// error is returned. Returns the number of records imported.
    pub fn import_xlsx(&mut self, path: &Path) -> Result<usize> {
        let records = read_workbook(path)?;
        if records.is_empty() {
            return Err(PlanlineError::EmptyImport);
        }
        let count = records.len();
        self.replace_all(records);
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(count)
    }

    /// Import from an in-memory workbook byte stream.
    ///
    /// Same semantics as [`Document::import_xlsx`].
    pub fn import_xlsx_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        let records = read_workbook_bytes(bytes)?;
        if records.is_empty() {
            return Err(PlanlineError::EmptyImport);
        }
        let count = records.len();
        self.replace_all(records);
        self.modified = false;
        Ok(count)
    }

    /// Export the plan to `path`.
    ///
    /// Returns the path written to.
    pub fn export_xlsx_to(&mut self, path: &Path) -> Result<PathBuf> {
        write_workbook(path, &self.records)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(path.to_path_buf())
    }

    /// Export into `dir` under the fiscal-year-templated default filename.
    pub fn export_xlsx(&mut self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(default_export_name(self.fiscal_year));
        self.export_xlsx_to(&path)
    }
}
