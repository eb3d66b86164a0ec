//! planline-core - UI-agnostic budget-plan document model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{Document, Field, Record, Summary, parse_amount, summarize};
pub use error::{PlanlineError, Result};
