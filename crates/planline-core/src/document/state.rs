use chrono::Datelike;
use std::path::PathBuf;
use uuid::Uuid;

/// Offset between a Gregorian year and its Buddhist Era label.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Budget figure a fresh plan starts with.
pub(crate) const DEFAULT_BUDGET: f64 = 1_000_000.0;

/// The closed set of editable record fields, in display/column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Department,
    Amount,
    Manager,
    Duration,
}

impl Field {
    /// All fields in display/column order.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Department,
        Field::Amount,
        Field::Manager,
        Field::Duration,
    ];
}

/// One budget line-item: five editable text fields plus a stable identifier.
///
/// The identifier is generated at creation, never reused, and unchanged by
/// field edits. It is not displayed anywhere.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    id: Uuid,
    pub name: String,
    pub department: String,
    pub amount: String,
    pub manager: String,
    pub duration: String,
}

impl Record {
    /// Create a blank placeholder record with a fresh identifier.
    pub fn blank() -> Self {
        Record {
            id: Uuid::new_v4(),
            name: String::new(),
            department: String::new(),
            amount: String::new(),
            manager: String::new(),
            duration: String::new(),
        }
    }

    pub fn new(name: &str, department: &str, amount: &str, manager: &str, duration: &str) -> Self {
        Record {
            id: Uuid::new_v4(),
            name: name.to_string(),
            department: department.to_string(),
            amount: amount.to_string(),
            manager: manager.to_string(),
            duration: duration.to_string(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Department => &self.department,
            Field::Amount => &self.amount,
            Field::Manager => &self.manager,
            Field::Duration => &self.duration,
        }
    }

    pub fn set(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Department => &mut self.department,
            Field::Amount => &mut self.amount,
            Field::Manager => &mut self.manager,
            Field::Duration => &mut self.duration,
        };
        *slot = value.to_string();
    }
}

/// UI-agnostic document state for a budget plan.
///
/// Holds the ordered record list, the budget figure it is checked against,
/// and the fiscal-year label used for display and export filenames. All
/// mutation goes through the methods in `ops`/`io`; readers get shared
/// slices, never a writable alias.
pub struct Document {
    /// Project line-items in display order
    pub(crate) records: Vec<Record>,
    /// Total allocated funds for the fiscal year
    pub(crate) budget: f64,
    /// Buddhist Era year label (display and export filename only)
    pub(crate) fiscal_year: i32,
    /// Last import/export path
    pub file_path: Option<PathBuf>,
    /// Whether the plan has been modified since the last import/export
    pub modified: bool,
}

impl Document {
    /// Create a new plan seeded with two sample projects and one blank
    /// placeholder row.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Document {
            records: vec![
                Record::new(
                    "จัดทำเว็บไซต์หน่วยงาน",
                    "ฝ่ายเทคโนโลยีสารสนเทศ",
                    "150000",
                    "นายสมชาย ใจดี",
                    "ม.ค. - มี.ค.",
                ),
                Record::new(
                    "โครงการอบรมพนักงาน",
                    "ฝ่ายบุคคล",
                    "85000",
                    "นางสาวสมศรี มีสุข",
                    "เม.ย.",
                ),
                Record::blank(),
            ],
            budget: DEFAULT_BUDGET,
            fiscal_year: current_fiscal_year(),
            file_path: None,
            modified: false,
        }
    }

    /// Create a new plan and import a workbook if a path is provided.
    pub fn with_file(path: Option<PathBuf>) -> crate::error::Result<Self> {
        let mut doc = Self::new();
        if let Some(ref p) = path {
            if p.exists() {
                doc.import_xlsx(p)?;
            } else {
                doc.file_path = Some(p.clone());
            }
        }
        Ok(doc)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn fiscal_year(&self) -> i32 {
        self.fiscal_year
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Current Buddhist Era year. A label only, never validated against a
/// real calendar.
pub(crate) fn current_fiscal_year() -> i32 {
    chrono::Local::now().year() + BUDDHIST_ERA_OFFSET
}
