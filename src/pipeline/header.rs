//! Header resolution
//!
//! Matches the configured field names against the CSV header row and
//! records the positions whose values must be encrypted. Matching is
//! case-insensitive and positional: a field name that matches no header
//! is silently ignored, and a header name that appears in multiple
//! columns marks every matching position.

use std::collections::HashSet;

use csv::StringRecord;

/// Column positions selected for encryption
///
/// Built once from the header row, immutable afterward.
#[derive(Debug, Clone)]
pub struct TargetColumns {
    // Sorted ascending; resolve() visits headers left to right.
    positions: Vec<usize>,
}

impl TargetColumns {
    /// Resolve the comma-separated field list against a header row
    ///
    /// Field names are split on commas and case-folded; no whitespace
    /// trimming is applied, so `"a, b"` targets the headers `a` and
    /// ` b`.
    pub fn resolve(headers: &StringRecord, fields: &str) -> Self {
        let targets: HashSet<String> = fields.split(',').map(|f| f.to_lowercase()).collect();

        let positions = headers
            .iter()
            .enumerate()
            .filter(|(_, name)| targets.contains(&name.to_lowercase()))
            .map(|(i, _)| i)
            .collect();

        Self { positions }
    }

    /// Whether the column at `index` must be encrypted
    pub fn contains(&self, index: usize) -> bool {
        self.positions.binary_search(&index).is_ok()
    }

    /// Number of columns selected
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no column was selected
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The selected positions, ascending
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> StringRecord {
        StringRecord::from(names.to_vec())
    }

    #[test]
    fn test_exact_match() {
        let targets = TargetColumns::resolve(&headers(&["name", "card"]), "card");
        assert_eq!(targets.positions(), &[1]);
    }

    #[test]
    fn test_case_insensitive_match() {
        let targets = TargetColumns::resolve(
            &headers(&["name", "issuing bank"]),
            "Issuing Bank",
        );
        assert!(targets.contains(1));
        assert!(!targets.contains(0));
    }

    #[test]
    fn test_multiple_fields() {
        let targets = TargetColumns::resolve(
            &headers(&["Card Type Full Name", "Issuing Bank", "amount"]),
            "card type full name,issuing bank",
        );
        assert_eq!(targets.positions(), &[0, 1]);
    }

    #[test]
    fn test_zero_match_is_silent() {
        let targets = TargetColumns::resolve(&headers(&["name", "card"]), "no such column");
        assert!(targets.is_empty());
    }

    #[test]
    fn test_duplicate_header_marks_every_position() {
        let targets = TargetColumns::resolve(&headers(&["card", "name", "card"]), "Card");
        assert_eq!(targets.positions(), &[0, 2]);
    }

    #[test]
    fn test_no_whitespace_trimming() {
        // "a, b" targets the literal header " b", not "b"
        let targets = TargetColumns::resolve(&headers(&["a", "b", " b"]), "a, b");
        assert_eq!(targets.positions(), &[0, 2]);
    }

    #[test]
    fn test_len_counts_positions() {
        let targets = TargetColumns::resolve(&headers(&["x", "x", "y"]), "x,y");
        assert_eq!(targets.len(), 3);
    }
}
