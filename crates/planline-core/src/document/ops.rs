use super::state::{Document, Field, Record};
use super::summary::{Summary, summarize};

impl Document {
    /// Append a blank record at the end of the plan.
    ///
    /// Returns the index of the new row.
    pub fn append_row(&mut self) -> usize {
        self.records.push(Record::blank());
        self.modified = true;
        self.records.len() - 1
    }

    /// Replace one field of the record at `index`, leaving the identifier
    /// and the other fields untouched.
    ///
    /// Out-of-range indices are a no-op; returns whether the edit applied.
    pub fn update_field(&mut self, index: usize, field: Field, value: &str) -> bool {
        let Some(record) = self.records.get_mut(index) else {
            return false;
        };
        record.set(field, value);
        self.modified = true;
        true
    }

    /// Remove the record at `index`, shifting later rows up.
    ///
    /// Out-of-range indices are a no-op; returns whether a row was removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if index >= self.records.len() {
            return false;
        }
        self.records.remove(index);
        self.modified = true;
        true
    }

    /// Discard the current rows and install `records` in their place.
    ///
    /// Callers are responsible for rejecting an all-empty import before
    /// calling this; an empty `records` empties the plan.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
        self.modified = true;
    }

    /// Set the budget figure. NaN collapses to zero.
    pub fn set_budget(&mut self, budget: f64) {
        self.budget = if budget.is_nan() { 0.0 } else { budget };
        self.modified = true;
    }

    /// Set the fiscal-year label.
    pub fn set_fiscal_year(&mut self, year: i32) {
        self.fiscal_year = year;
        self.modified = true;
    }

    /// Derive the current summary (project count, total, remaining budget).
    pub fn summary(&self) -> Summary {
        summarize(&self.records, self.budget)
    }
}
