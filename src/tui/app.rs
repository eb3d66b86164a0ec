//! Application state and logic.
//!
//! [`App`] wraps the core [`Document`] with cursor position, editing
//! buffers, and modal UI state. The document is the sole mutable resource;
//! every edit goes through its operations, one complete mutation per key
//! event.

use planline_core::storage::default_export_name;
use planline_core::{Document, Field, PlanlineError};
use std::path::{Path, PathBuf};

/// Import error shown when the workbook cannot be decoded.
const MSG_IMPORT_DECODE: &str =
    "เกิดข้อผิดพลาดในการนำเข้าไฟล์ โปรดตรวจสอบว่าไฟล์เป็นรูปแบบ .xlsx ที่ถูกต้อง";

/// Import error shown when no row carries a project name.
const MSG_IMPORT_EMPTY: &str = "ไม่พบข้อมูลที่ถูกต้องในไฟล์ Excel หรือไฟล์อาจจะว่างเปล่า";

/// Modal editing state for the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Navigate the table, execute single-key commands.
    Normal,
    /// Edit the current field through a text buffer.
    Edit,
    /// Enter ex-style commands (`:w`, `:import`, `:q`, ...).
    Command,
}

/// Main application state container.
pub struct App {
    /// The budget plan being edited
    pub document: Document,
    /// Cursor row into the record list
    pub cursor_row: usize,
    /// Cursor column into [`Field::ALL`]
    pub cursor_col: usize,
    /// First visible table row
    pub viewport_row: usize,
    /// Visible data rows, updated from the layout on every draw
    pub visible_rows: usize,
    pub mode: Mode,
    pub edit_buffer: String,
    pub edit_cursor: usize,
    pub command_buffer: String,
    pub command_cursor: usize,
    /// Transient status line message, cleared on the next key press
    pub status_message: String,
    /// Directory default-named exports are written into
    pub export_dir: PathBuf,
}

impl App {
    pub fn new() -> Self {
        App {
            document: Document::new(),
            cursor_row: 0,
            cursor_col: 0,
            viewport_row: 0,
            visible_rows: 1,
            mode: Mode::Normal,
            edit_buffer: String::new(),
            edit_cursor: 0,
            command_buffer: String::new(),
            command_cursor: 0,
            status_message: String::new(),
            export_dir: PathBuf::from("."),
        }
    }

    /// Create the app, apply config overrides, and import a workbook if a
    /// path was given on the command line.
    pub fn with_file(
        path: Option<PathBuf>,
        budget: Option<f64>,
        fiscal_year: Option<i32>,
        export_dir: Option<PathBuf>,
    ) -> planline_core::Result<Self> {
        let mut app = Self::new();
        if let Some(dir) = export_dir {
            app.export_dir = dir;
        }
        if let Some(budget) = budget {
            app.document.set_budget(budget);
        }
        if let Some(year) = fiscal_year {
            app.document.set_fiscal_year(year);
        }
        // Config overrides are not edits.
        app.document.modified = false;

        if let Some(ref path) = path {
            app.document.import_xlsx(path)?;
        }
        Ok(app)
    }

    pub fn current_field(&self) -> Field {
        Field::ALL[self.cursor_col]
    }

    // --- Cursor movement -------------------------------------------------

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let rows = self.document.records().len();
        if rows == 0 {
            self.cursor_row = 0;
        } else {
            let row = self.cursor_row as i64 + dy as i64;
            self.cursor_row = row.clamp(0, rows as i64 - 1) as usize;
        }
        let col = self.cursor_col as i64 + dx as i64;
        self.cursor_col = col.clamp(0, Field::ALL.len() as i64 - 1) as usize;
        self.update_viewport();
    }

    pub fn goto_first(&mut self) {
        self.cursor_row = 0;
        self.update_viewport();
    }

    pub fn goto_last(&mut self) {
        self.cursor_row = self.document.records().len().saturating_sub(1);
        self.update_viewport();
    }

    /// Keep the cursor row inside the visible window.
    pub fn update_viewport(&mut self) {
        if self.cursor_row < self.viewport_row {
            self.viewport_row = self.cursor_row;
        }
        if self.cursor_row >= self.viewport_row + self.visible_rows {
            self.viewport_row = self.cursor_row + 1 - self.visible_rows;
        }
    }

    // --- Editing ---------------------------------------------------------

    pub fn begin_edit(&mut self) {
        if self.document.records().is_empty() {
            self.status_message = "No rows - press a to add one".to_string();
            return;
        }
        let value = self.document.records()[self.cursor_row].get(self.current_field());
        self.edit_buffer = value.to_string();
        self.edit_cursor = self.edit_buffer.len();
        self.mode = Mode::Edit;
    }

    pub fn commit_edit(&mut self) {
        let field = self.current_field();
        let value = std::mem::take(&mut self.edit_buffer);
        self.document.update_field(self.cursor_row, field, &value);
        self.edit_cursor = 0;
        self.mode = Mode::Normal;
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.mode = Mode::Normal;
    }

    pub fn add_row(&mut self) {
        self.cursor_row = self.document.append_row();
        self.cursor_col = 0;
        self.update_viewport();
        self.status_message = format!("Added row {}", self.cursor_row + 1);
    }

    pub fn delete_row(&mut self) {
        if !self.document.remove_row(self.cursor_row) {
            return;
        }
        self.status_message = format!("Deleted row {}", self.cursor_row + 1);
        let rows = self.document.records().len();
        if self.cursor_row >= rows {
            self.cursor_row = rows.saturating_sub(1);
        }
        self.update_viewport();
    }

    // --- Import/export ---------------------------------------------------

    pub fn import(&mut self, path: &Path) {
        match self.document.import_xlsx(path) {
            Ok(count) => {
                self.cursor_row = 0;
                self.viewport_row = 0;
                self.status_message = format!("Imported {} rows from {}", count, path.display());
            }
            Err(PlanlineError::EmptyImport) => {
                self.status_message = MSG_IMPORT_EMPTY.to_string();
            }
            Err(_) => {
                self.status_message = MSG_IMPORT_DECODE.to_string();
            }
        }
    }

    pub fn export(&mut self, path: Option<&str>) {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => self
                .export_dir
                .join(default_export_name(self.document.fiscal_year())),
        };
        match self.document.export_xlsx_to(&path) {
            Ok(path) => self.status_message = format!("Exported to {}", path.display()),
            Err(e) => self.status_message = format!("Error: {}", e),
        }
    }

    // --- Command mode ----------------------------------------------------

    /// Execute a command entered in command mode.
    ///
    /// Returns `true` if the application should quit, `false` otherwise.
    pub fn execute_command(&mut self) -> bool {
        let cmd = self.command_buffer.trim().to_string();
        self.command_buffer.clear();
        self.command_cursor = 0;
        self.mode = Mode::Normal;

        let parts: Vec<&str> = cmd.splitn(2, ' ').collect();
        let command = parts[0];
        let args = parts.get(1).map(|s| s.trim());

        match command {
            "" => {}
            "q" => {
                if self.document.modified {
                    self.status_message =
                        "Unsaved changes! Use :q! to force quit or :wq to export and quit"
                            .to_string();
                    return false;
                }
                return true;
            }
            "q!" => {
                return true;
            }
            "w" | "export" => {
                self.export(args);
            }
            "wq" => {
                self.export(None);
                if !self.document.modified {
                    return true;
                }
            }
            "import" | "i" => {
                if let Some(path) = args {
                    self.import(Path::new(path));
                } else {
                    self.status_message = "Usage: :import <file.xlsx>".to_string();
                }
            }
            "budget" | "b" => {
                match args.and_then(|a| a.replace(',', "").parse::<f64>().ok()) {
                    Some(value) => {
                        self.document.set_budget(value);
                        self.status_message = format!("Budget set to {}", self.document.budget());
                    }
                    None => self.status_message = "Usage: :budget <amount>".to_string(),
                }
            }
            "year" | "y" => match args.and_then(|a| a.parse::<i32>().ok()) {
                Some(year) => {
                    self.document.set_fiscal_year(year);
                    self.status_message = format!("Fiscal year set to {}", year);
                }
                None => self.status_message = "Usage: :year <year>".to_string(),
            },
            _ => {
                self.status_message = format!("Unknown command: {}", command);
            }
        }
        false
    }

    /// `:q` semantics for the plain `q` key in normal mode.
    pub fn request_quit(&mut self) -> bool {
        self.command_buffer = "q".to_string();
        self.execute_command()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
