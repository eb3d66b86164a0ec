//! Derived totals over the record list.

use super::state::Record;

/// Aggregates derived from the record list and the budget figure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Records whose trimmed name is non-empty
    pub project_count: usize,
    /// Sum of every record's amount, unparseable amounts counting as zero
    pub total_amount: f64,
    /// `budget - total_amount`; negative when the plan is over budget
    pub remaining_budget: f64,
}

/// Derive the summary for `records` against `budget`.
///
/// A single O(n) reduction; recomputed from scratch on every call so it
/// always reflects the latest state.
pub fn summarize(records: &[Record], budget: f64) -> Summary {
    let project_count = records
        .iter()
        .filter(|r| !r.name.trim().is_empty())
        .count();
    let total_amount: f64 = records.iter().map(|r| parse_amount(&r.amount)).sum();
    Summary {
        project_count,
        total_amount,
        remaining_budget: budget - total_amount,
    }
}

/// Parse an amount field as a decimal number.
///
/// Comma grouping separators are stripped first. Anything that still does
/// not parse to a finite number contributes zero; this function never
/// errors. Both the summary and the export path go through here so the two
/// cannot diverge.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned = text.replace(',', "");
    match cleaned.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, amount: &str) -> Record {
        Record::new(name, "", amount, "", "")
    }

    #[test]
    fn test_parse_amount_plain() {
        assert_eq!(parse_amount("150000"), 150000.0);
        assert_eq!(parse_amount("85000.50"), 85000.50);
    }

    #[test]
    fn test_parse_amount_grouping_separators() {
        assert_eq!(parse_amount("150,000"), 150000.0);
        assert_eq!(parse_amount("1,234,567.89"), 1234567.89);
    }

    #[test]
    fn test_parse_amount_garbage_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("12x"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
    }

    #[test]
    fn test_project_count_skips_blank_names() {
        let records = vec![record("A", "1"), record("B", "2"), record("", "")];
        assert_eq!(summarize(&records, 0.0).project_count, 2);
    }

    #[test]
    fn test_project_count_trims_whitespace_names() {
        let records = vec![record("   ", "1"), record("ok", "2")];
        assert_eq!(summarize(&records, 0.0).project_count, 1);
    }

    #[test]
    fn test_total_includes_blank_name_rows() {
        // Blank-name rows are excluded from the count but not the sum.
        let records = vec![record("A", "100"), record("", "50")];
        let summary = summarize(&records, 200.0);
        assert_eq!(summary.project_count, 1);
        assert_eq!(summary.total_amount, 150.0);
        assert_eq!(summary.remaining_budget, 50.0);
    }

    #[test]
    fn test_remaining_budget_can_go_negative() {
        let records = vec![record("A", "150,000"), record("B", "85000")];
        let summary = summarize(&records, 100_000.0);
        assert_eq!(summary.total_amount, 235_000.0);
        assert_eq!(summary.remaining_budget, -135_000.0);
    }

    #[test]
    fn test_empty_store_summary_is_zero() {
        let summary = summarize(&[], 1000.0);
        assert_eq!(summary.project_count, 0);
        assert_eq!(summary.total_amount, 0.0);
        assert_eq!(summary.remaining_budget, 1000.0);
    }
}
