use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use thiserror::Error;

use super::model::{CellValue, Record, RecordSet};

/// Text cells read as null, matching what spreadsheet tooling commonly treats
/// as "not available".
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Not a readable spreadsheet: {0}")]
    Parse(String),
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read an `.xlsx` workbook from disk.
pub fn load_file(path: &Path) -> Result<RecordSet, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_bytes(&bytes)
}

/// Parse an in-memory `.xlsx` workbook.
///
/// Only the first worksheet is read and its first row supplies the column
/// names. Fully blank rows are skipped. Fails when any of
/// [`Field::ALL`](super::model::Field::ALL) is missing from the header, so an
/// unusable file never turns into an empty-but-valid table.
pub fn load_bytes(bytes: &[u8]) -> Result<RecordSet, LoadError> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| LoadError::Parse(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::Parse("workbook has no worksheets".into()))?
        .map_err(|e| LoadError::Parse(e.to_string()))?;

    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => header_names(header),
        None => Vec::new(),
    };

    let records: Vec<Record> = rows
        .filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)))
        .map(|row| {
            Record::from_cells(
                columns
                    .iter()
                    .cloned()
                    .zip(row.iter().map(cell_value).chain(std::iter::repeat(CellValue::Null))),
            )
        })
        .collect();

    let set = RecordSet::new(columns, records);

    let missing = set.missing_fields();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(
            missing.iter().map(|f| f.column_name().to_string()).collect(),
        ));
    }

    log::info!(
        "Loaded {} records with columns {:?}",
        set.len(),
        set.columns
    );
    Ok(set)
}

// ---------------------------------------------------------------------------
// Cell conversion
// ---------------------------------------------------------------------------

/// Name header cells. Blank headers become `Unnamed: <i>`, repeats get a
/// `.1`, `.2`, … suffix. A suffixed name that is itself taken is suffixed
/// again, so every returned name is unique.
fn header_names(header: &[Data]) -> Vec<String> {
    // Next suffix to try for each name handed out so far.
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let mut name = match cell {
                Data::Empty => format!("Unnamed: {i}"),
                Data::String(s) if s.trim().is_empty() => format!("Unnamed: {i}"),
                other => cell_value(other).to_string(),
            };
            while let Some(n) = next_suffix.get_mut(&name) {
                let suffix = *n;
                *n += 1;
                name = format!("{name}.{suffix}");
            }
            next_suffix.insert(name.clone(), 1);
            name
        })
        .collect()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::String(s) => {
            if NULL_MARKERS.contains(&s.as_str()) {
                CellValue::Null
            } else {
                CellValue::String(s.clone())
            }
        }
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => {
            if f.is_nan() {
                CellValue::Null
            } else if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                CellValue::Integer(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) => CellValue::Date(d.to_string()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::Date(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
    }
}
