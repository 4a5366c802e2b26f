use super::model::{Record, RecordSet};

// ---------------------------------------------------------------------------
// CleanSet – rows usable for aggregation
// ---------------------------------------------------------------------------

/// The records of a [`RecordSet`] whose required fields are all present,
/// in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanSet {
    /// Same header as the source table.
    pub columns: Vec<String>,
    pub records: Vec<Record>,
    /// Index of each kept record in the source table.
    pub source_rows: Vec<usize>,
}

impl CleanSet {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no row survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Drop every record with a missing required field.
///
/// Other columns are not inspected: a row with a blank `City` but complete
/// required fields is kept.
pub fn clean(records: &RecordSet) -> CleanSet {
    let (source_rows, kept): (Vec<usize>, Vec<Record>) = records
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.is_complete())
        .map(|(i, rec)| (i, rec.clone()))
        .unzip();

    log::debug!(
        "Cleaning kept {} of {} records",
        kept.len(),
        records.len()
    );

    CleanSet {
        columns: records.columns.clone(),
        records: kept,
        source_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record_set;
    use crate::data::model::{CellValue, Field};

    #[test]
    fn drops_rows_with_missing_required_fields() {
        let set = record_set(&[
            (Some("Single"), Some("EN"), Some("Employed")),
            (None, Some("EN"), Some("Employed")),
            (Some("Married"), Some("FR"), Some("Unemployed")),
            (Some("Single"), Some(""), Some("Employed")),
            (Some("Single"), Some("EN"), None),
        ]);
        let clean = clean(&set);
        assert_eq!(clean.len(), 2);
        assert_eq!(clean.source_rows, vec![0, 2]);
        assert_eq!(clean.columns, set.columns);
    }

    #[test]
    fn clean_rows_are_a_subset_with_complete_fields() {
        let set = record_set(&[
            (Some("Single"), None, Some("Employed")),
            (Some("Married"), Some("HI"), Some("Student")),
            (None, None, None),
            (Some("Divorced"), Some("EN"), Some("Retired")),
        ]);
        let clean = clean(&set);
        for (rec, &src) in clean.records.iter().zip(&clean.source_rows) {
            assert_eq!(rec, &set.records[src]);
            for field in Field::ALL {
                assert!(!rec.field(field).is_missing());
            }
        }
    }

    #[test]
    fn other_columns_do_not_gate_cleaning() {
        let mut set = record_set(&[(Some("Single"), Some("EN"), Some("Employed"))]);
        set.records[0].extra.insert("City".into(), CellValue::Null);
        assert_eq!(clean(&set).len(), 1);
    }

    #[test]
    fn all_rows_dropped_is_valid() {
        let set = record_set(&[(None, Some("EN"), Some("Employed")), (None, None, None)]);
        let clean = clean(&set);
        assert!(clean.is_empty());
        assert_eq!(clean.columns.len(), 4);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let set = record_set(&[
            (Some("Single"), Some("EN"), Some("Employed")),
            (Some("Married"), None, Some("Employed")),
        ]);
        assert_eq!(clean(&set), clean(&set));
    }
}
