use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as read from the uploaded workbook.
/// Frequency tables key on `CellValue`, so it must be `Ord` and `Hash`.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Date/time cells kept as text.
    Date(String),
    Null,
}

impl CellValue {
    /// Sort bucket for a category: blanks first, then flags, numbers, text
    /// and dates. Integers and floats are separate buckets, so `3` and `3.0`
    /// are distinct categories.
    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Integer(_) => 2,
            CellValue::Float(_) => 3,
            CellValue::String(_) => 4,
            CellValue::Date(_) => 5,
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank()).then_with(|| match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => a.total_cmp(b),
            (CellValue::String(a), CellValue::String(b))
            | (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            // Same rank with no payload: both Null.
            _ => Ordering::Equal,
        })
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality follows `cmp`, so floats compare by `total_cmp` and NaN equals NaN.
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for CellValue {}

// Must agree with `cmp`: `total_cmp` equality is bit equality.
impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.rank());
        match self {
            CellValue::Null => {}
            CellValue::Bool(b) => b.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(v) => v.to_bits().hash(state),
            CellValue::String(s) | CellValue::Date(s) => s.hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl CellValue {
    /// Absent, empty or NaN. These rows are dropped by the cleaner.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Text written to the CSV export. Missing values become an empty field.
    pub fn export_text(&self) -> String {
        if self.is_missing() {
            String::new()
        } else {
            self.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Field – the three required categorical columns
// ---------------------------------------------------------------------------

/// A required categorical field. Column names match the workbook headers exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    MaritalStatus,
    BoloAppLanguage,
    EmploymentStatus,
}

impl Field {
    pub const ALL: [Field; 3] = [
        Field::MaritalStatus,
        Field::BoloAppLanguage,
        Field::EmploymentStatus,
    ];

    /// Header name in the uploaded workbook.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::MaritalStatus => "MaritalStatus",
            Field::BoloAppLanguage => "BoloAppLanguage",
            Field::EmploymentStatus => "EmploymentStatus",
        }
    }

    /// Human-readable chart title.
    pub fn label(self) -> &'static str {
        match self {
            Field::MaritalStatus => "Marital Status",
            Field::BoloAppLanguage => "App Language",
            Field::EmploymentStatus => "Employment Status",
        }
    }

    pub fn from_column(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the uploaded sheet
// ---------------------------------------------------------------------------

/// A single survey/profile row: the required fields plus every other column.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub marital_status: CellValue,
    pub app_language: CellValue,
    pub employment_status: CellValue,
    /// Remaining columns: column_name → value.
    pub extra: BTreeMap<String, CellValue>,
}

impl Record {
    /// Build a record from `column → value` pairs. Required columns that are
    /// not present come out as `Null`.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (String, CellValue)>,
    {
        let mut record = Record {
            marital_status: CellValue::Null,
            app_language: CellValue::Null,
            employment_status: CellValue::Null,
            extra: BTreeMap::new(),
        };
        for (column, value) in cells {
            match Field::from_column(&column) {
                Some(field) => *record.field_mut(field) = value,
                None => {
                    record.extra.insert(column, value);
                }
            }
        }
        record
    }

    pub fn field(&self, field: Field) -> &CellValue {
        match field {
            Field::MaritalStatus => &self.marital_status,
            Field::BoloAppLanguage => &self.app_language,
            Field::EmploymentStatus => &self.employment_status,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut CellValue {
        match field {
            Field::MaritalStatus => &mut self.marital_status,
            Field::BoloAppLanguage => &mut self.app_language,
            Field::EmploymentStatus => &mut self.employment_status,
        }
    }

    /// Look up any column by header name.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        match Field::from_column(column) {
            Some(field) => Some(self.field(field)),
            None => self.extra.get(column),
        }
    }

    /// True when every required field holds a value.
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|&f| !self.field(f).is_missing())
    }
}

// ---------------------------------------------------------------------------
// RecordSet – the complete uploaded table
// ---------------------------------------------------------------------------

/// The full parsed table, header order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    /// Column names in sheet order.
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        RecordSet { columns, records }
    }

    /// Required columns absent from the header, in `Field::ALL` order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| !self.columns.iter().any(|c| c == f.column_name()))
            .collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a record set from `(marital, language, employment)` triples.
    /// `None` marks a blank cell.
    pub(crate) fn record_set(rows: &[(Option<&str>, Option<&str>, Option<&str>)]) -> RecordSet {
        let cell = |v: Option<&str>| v.map(CellValue::from).unwrap_or(CellValue::Null);
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, &(m, l, e))| {
                Record::from_cells([
                    ("UserId".to_string(), CellValue::Integer(i as i64 + 1)),
                    ("MaritalStatus".to_string(), cell(m)),
                    ("BoloAppLanguage".to_string(), cell(l)),
                    ("EmploymentStatus".to_string(), cell(e)),
                ])
            })
            .collect();
        RecordSet::new(
            vec![
                "UserId".into(),
                "MaritalStatus".into(),
                "BoloAppLanguage".into(),
                "EmploymentStatus".into(),
            ],
            records,
        )
    }

    #[test]
    fn missing_values() {
        assert!(CellValue::Null.is_missing());
        assert!(CellValue::from("").is_missing());
        assert!(CellValue::Float(f64::NAN).is_missing());
        assert!(!CellValue::from("Single").is_missing());
        assert!(!CellValue::Integer(0).is_missing());
        assert!(!CellValue::Bool(false).is_missing());
    }

    #[test]
    fn record_routes_required_columns_to_fields() {
        let rec = Record::from_cells([
            ("MaritalStatus".to_string(), CellValue::from("Single")),
            ("City".to_string(), CellValue::from("Pune")),
        ]);
        assert_eq!(rec.marital_status, CellValue::from("Single"));
        assert_eq!(rec.app_language, CellValue::Null);
        assert_eq!(rec.get("City"), Some(&CellValue::from("Pune")));
        assert_eq!(rec.get("MaritalStatus"), Some(&CellValue::from("Single")));
        assert_eq!(rec.get("Nope"), None);
        assert!(!rec.is_complete());
    }

    #[test]
    fn missing_fields_reports_absent_headers() {
        let set = RecordSet::new(vec!["MaritalStatus".into(), "Age".into()], Vec::new());
        assert_eq!(
            set.missing_fields(),
            vec![Field::BoloAppLanguage, Field::EmploymentStatus]
        );
        assert!(record_set(&[]).missing_fields().is_empty());
    }

    #[test]
    fn ordering_groups_by_kind_then_value() {
        let mut vals = vec![
            CellValue::from("b"),
            CellValue::Integer(3),
            CellValue::from("a"),
            CellValue::Integer(1),
        ];
        vals.sort();
        assert_eq!(
            vals,
            vec![
                CellValue::Integer(1),
                CellValue::Integer(3),
                CellValue::from("a"),
                CellValue::from("b"),
            ]
        );
    }

    #[test]
    fn categories_sort_by_kind_then_value() {
        let mut vals = vec![
            CellValue::Date("2024-01-01".into()),
            CellValue::from("x"),
            CellValue::Float(0.5),
            CellValue::Integer(7),
            CellValue::Bool(true),
            CellValue::Null,
        ];
        vals.sort();
        let ranks: Vec<u8> = vals.iter().map(CellValue::rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5]);
        assert!(CellValue::Integer(3) < CellValue::Float(0.5));
        assert_ne!(CellValue::Integer(3), CellValue::Float(3.0));
        assert_ne!(CellValue::from("2024"), CellValue::Date("2024".into()));
    }

    #[test]
    fn equal_values_hash_alike() {
        use std::collections::HashSet;

        let set: HashSet<CellValue> = [
            CellValue::from("Single"),
            CellValue::from("Single"),
            CellValue::Float(f64::NAN),
            CellValue::Float(f64::NAN),
            CellValue::Float(2.5),
            CellValue::Float(2.5),
            CellValue::Integer(2),
            CellValue::Null,
            CellValue::Null,
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 5);
        assert!(set.contains(&CellValue::Float(f64::NAN)));
        assert!(!set.contains(&CellValue::Float(2.0)));
    }

    #[test]
    fn export_text_formats() {
        assert_eq!(CellValue::Null.export_text(), "");
        assert_eq!(CellValue::Bool(true).export_text(), "True");
        assert_eq!(CellValue::Float(2.5).export_text(), "2.5");
        assert_eq!(CellValue::Integer(42).export_text(), "42");
    }
}
