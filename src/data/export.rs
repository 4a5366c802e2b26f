use std::path::Path;

use anyhow::{Context, Result};

use super::clean::CleanSet;

/// Suggested file name for the cleaned-data download.
pub const EXPORT_FILE_NAME: &str = "cleaned_user_data.csv";
pub const EXPORT_MIME: &str = "text/csv";

/// Serialise the clean set as comma-separated text: header row, one line per
/// record, no index column. Missing values are written as empty fields.
pub fn to_csv(clean: &CleanSet) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(&clean.columns)
        .context("writing CSV header")?;

    for (row_no, rec) in clean.records.iter().enumerate() {
        let fields = clean.columns.iter().map(|col| {
            rec.get(col)
                .map(|v| v.export_text())
                .unwrap_or_default()
        });
        writer
            .write_record(fields)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))
}

/// A ready-to-save download of the clean set.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl CsvExport {
    pub fn from_clean(clean: &CleanSet) -> Result<Self> {
        Ok(CsvExport {
            file_name: EXPORT_FILE_NAME,
            mime: EXPORT_MIME,
            bytes: to_csv(clean)?,
        })
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!(
            "Exported {} bytes of {} to {}",
            self.bytes.len(),
            self.mime,
            path.display()
        );
        Ok(())
    }
}
