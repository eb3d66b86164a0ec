//! Document state and logic (UI-agnostic).

mod io;
mod ops;
mod state;
mod summary;

pub use state::{BUDDHIST_ERA_OFFSET, Document, Field, Record};
pub use summary::{Summary, parse_amount, summarize};
