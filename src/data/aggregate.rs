use std::collections::HashMap;

use super::clean::CleanSet;
use super::model::{CellValue, Field};

// ---------------------------------------------------------------------------
// FrequencyTable – counts per category of one field
// ---------------------------------------------------------------------------

/// Category counts for one field, most frequent first. Equal counts keep the
/// order in which the categories first appear in the clean set.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    pub field: Field,
    entries: Vec<(CellValue, usize)>,
}

impl FrequencyTable {
    /// `(category, count)` pairs in display order.
    pub fn entries(&self) -> &[(CellValue, usize)] {
        &self.entries
    }

    /// Count for `category`, zero if never observed.
    pub fn count(&self, category: &CellValue) -> usize {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Sum of all counts; equals the clean set size.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Fraction of the total for `count`, 0.0 on an empty table.
    pub fn share(&self, count: usize) -> f64 {
        match self.total() {
            0 => 0.0,
            total => count as f64 / total as f64,
        }
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Count rows per distinct value of `field`.
pub fn count_by_category(clean: &CleanSet, field: Field) -> FrequencyTable {
    let mut index: HashMap<&CellValue, usize> = HashMap::new();
    let mut entries: Vec<(CellValue, usize)> = Vec::new();

    for rec in &clean.records {
        let value = rec.field(field);
        match index.get(value) {
            Some(&slot) => entries[slot].1 += 1,
            None => {
                index.insert(value, entries.len());
                entries.push((value.clone(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    log::debug!("{field}: {} categories over {} rows", entries.len(), clean.len());
    FrequencyTable { field, entries }
}

// ---------------------------------------------------------------------------
// CrossTab – joint counts of two fields
// ---------------------------------------------------------------------------

/// Joint counts: one row per category of `row_field`, one column per
/// category of `col_field`. Categories are sorted ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub row_field: Field,
    pub col_field: Field,
    rows: Vec<CellValue>,
    cols: Vec<CellValue>,
    /// `counts[r][c]`
    counts: Vec<Vec<usize>>,
}

impl CrossTab {
    pub fn rows(&self) -> &[CellValue] {
        &self.rows
    }

    pub fn cols(&self) -> &[CellValue] {
        &self.cols
    }

    /// Count at row index `r`, column index `c`.
    pub fn cell(&self, r: usize, c: usize) -> usize {
        self.counts[r][c]
    }

    /// Count for a category pair; zero for unobserved combinations.
    pub fn get(&self, row: &CellValue, col: &CellValue) -> usize {
        let r = self.rows.binary_search(row);
        let c = self.cols.binary_search(col);
        match (r, c) {
            (Ok(r), Ok(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    pub fn row_totals(&self) -> Vec<usize> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    pub fn col_totals(&self) -> Vec<usize> {
        (0..self.cols.len())
            .map(|c| self.counts.iter().map(|row| row[c]).sum())
            .collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Largest cell count (0 when empty), used to scale colours.
    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Joint frequency of `row_field` × `col_field`. Callers must pass two
/// different fields.
pub fn cross_tabulate(clean: &CleanSet, row_field: Field, col_field: Field) -> CrossTab {
    debug_assert_ne!(row_field, col_field);

    let mut pairs: HashMap<(&CellValue, &CellValue), usize> = HashMap::new();
    for rec in &clean.records {
        *pairs
            .entry((rec.field(row_field), rec.field(col_field)))
            .or_insert(0) += 1;
    }

    let mut rows: Vec<CellValue> = pairs.keys().map(|(r, _)| (*r).clone()).collect();
    rows.sort();
    rows.dedup();
    let mut cols: Vec<CellValue> = pairs.keys().map(|(_, c)| (*c).clone()).collect();
    cols.sort();
    cols.dedup();

    let mut counts = vec![vec![0usize; cols.len()]; rows.len()];
    for ((r, c), n) in pairs {
        // Both searches succeed: every key was collected above.
        if let (Ok(ri), Ok(ci)) = (rows.binary_search(r), cols.binary_search(c)) {
            counts[ri][ci] = n;
        }
    }

    CrossTab {
        row_field,
        col_field,
        rows,
        cols,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::clean;
    use crate::data::model::tests::record_set;

    fn survey() -> CleanSet {
        clean(&record_set(&[
            (Some("Single"), Some("EN"), Some("Employed")),
            (Some("Married"), Some("HI"), Some("Employed")),
            (Some("Married"), Some("EN"), Some("Student")),
            (Some("Single"), Some("EN"), Some("Unemployed")),
            (Some("Divorced"), Some("MR"), Some("Employed")),
            (None, Some("EN"), Some("Employed")),
            (Some("Married"), Some("HI"), Some("Retired")),
        ]))
    }

    #[test]
    fn scenario_counts_marital_status() {
        let clean = clean(&record_set(&[
            (Some("Single"), Some("EN"), Some("Employed")),
            (None, Some("EN"), Some("Employed")),
            (Some("Married"), Some("FR"), Some("Unemployed")),
        ]));
        assert_eq!(clean.len(), 2);
        let table = count_by_category(&clean, Field::MaritalStatus);
        assert_eq!(table.len(), 2);
        assert_eq!(table.count(&"Single".into()), 1);
        assert_eq!(table.count(&"Married".into()), 1);
        assert_eq!(table.count(&"Divorced".into()), 0);
    }

    #[test]
    fn frequency_totals_match_clean_size() {
        let clean = survey();
        for field in Field::ALL {
            assert_eq!(count_by_category(&clean, field).total(), clean.len());
        }
    }

    #[test]
    fn frequency_orders_by_count_then_first_seen() {
        let table = count_by_category(&survey(), Field::MaritalStatus);
        let order: Vec<String> = table.entries().iter().map(|(c, _)| c.to_string()).collect();
        assert_eq!(order, vec!["Married", "Single", "Divorced"]);

        let table = count_by_category(&survey(), Field::EmploymentStatus);
        let order: Vec<String> = table.entries().iter().map(|(c, _)| c.to_string()).collect();
        // Student, Unemployed and Retired tie at 1; first-seen order wins.
        assert_eq!(order, vec!["Employed", "Student", "Unemployed", "Retired"]);
    }

    #[test]
    fn share_of_total() {
        let table = count_by_category(&survey(), Field::MaritalStatus);
        assert!((table.share(3) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn crosstab_totals_and_marginals() {
        let clean = survey();
        for a in Field::ALL {
            for b in Field::ALL {
                if a == b {
                    continue;
                }
                let tab = cross_tabulate(&clean, a, b);
                assert_eq!(tab.total(), clean.len());

                let freq = count_by_category(&clean, a);
                for (row, total) in tab.rows().iter().zip(tab.row_totals()) {
                    assert_eq!(freq.count(row), total);
                }
                let freq = count_by_category(&clean, b);
                for (col, total) in tab.cols().iter().zip(tab.col_totals()) {
                    assert_eq!(freq.count(col), total);
                }
            }
        }
    }

    #[test]
    fn crosstab_cells_and_zero_defaults() {
        let tab = cross_tabulate(&survey(), Field::MaritalStatus, Field::BoloAppLanguage);
        let names = |v: &[CellValue]| v.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(names(tab.rows()), vec!["Divorced", "Married", "Single"]);
        assert_eq!(names(tab.cols()), vec!["EN", "HI", "MR"]);
        assert_eq!(tab.get(&"Married".into(), &"HI".into()), 2);
        assert_eq!(tab.get(&"Single".into(), &"EN".into()), 2);
        assert_eq!(tab.get(&"Single".into(), &"MR".into()), 0);
        assert_eq!(tab.get(&"Widowed".into(), &"EN".into()), 0);
        assert_eq!(tab.max_count(), 2);
    }

    #[test]
    fn empty_clean_set_gives_empty_aggregates() {
        let clean = clean(&record_set(&[(None, None, None)]));
        let table = count_by_category(&clean, Field::BoloAppLanguage);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.share(0), 0.0);

        let tab = cross_tabulate(&clean, Field::MaritalStatus, Field::EmploymentStatus);
        assert!(tab.is_empty());
        assert_eq!(tab.total(), 0);
        assert_eq!(tab.max_count(), 0);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let clean = survey();
        assert_eq!(
            count_by_category(&clean, Field::EmploymentStatus),
            count_by_category(&clean, Field::EmploymentStatus)
        );
        assert_eq!(
            cross_tabulate(&clean, Field::EmploymentStatus, Field::MaritalStatus),
            cross_tabulate(&clean, Field::EmploymentStatus, Field::MaritalStatus)
        );
    }
}
