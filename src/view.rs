use crate::data::aggregate::{count_by_category, cross_tabulate, CrossTab, FrequencyTable};
use crate::data::clean::{clean, CleanSet};
use crate::data::model::{Field, RecordSet};

/// Shown in place of the heatmap when both axes name the same field.
pub const IDENTICAL_AXES_WARNING: &str = "Please select different variables for X and Y axes";

// ---------------------------------------------------------------------------
// Session – one uploaded file and its clean subset
// ---------------------------------------------------------------------------

/// Everything derived from a single upload. Replaced wholesale on the next one.
#[derive(Debug, Clone)]
pub struct Session {
    /// Name of the uploaded file, for the top bar.
    pub source_name: String,
    pub records: RecordSet,
    pub clean: CleanSet,
}

impl Session {
    pub fn new(source_name: impl Into<String>, records: RecordSet) -> Self {
        let clean = clean(&records);
        Session {
            source_name: source_name.into(),
            records,
            clean,
        }
    }
}

// ---------------------------------------------------------------------------
// DashboardView – what one frame shows
// ---------------------------------------------------------------------------

/// The two cross-analysis selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSelection {
    pub x: Field,
    pub y: Field,
}

impl Default for AxisSelection {
    fn default() -> Self {
        AxisSelection {
            x: Field::ALL[0],
            y: Field::ALL[1],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CrossAnalysis {
    /// Rows are X-axis categories, columns are Y-axis categories.
    Table(CrossTab),
    /// Both selectors name this field; the heatmap is suppressed.
    IdenticalAxes(Field),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub total_records: usize,
    pub clean_records: usize,
    pub marital_status: FrequencyTable,
    pub app_language: FrequencyTable,
    pub employment_status: FrequencyTable,
    pub axes: AxisSelection,
    pub cross: CrossAnalysis,
}

/// Recompute every aggregate for the current session and selectors.
pub fn render(session: &Session, axes: AxisSelection) -> DashboardView {
    let clean = &session.clean;

    let cross = if axes.x == axes.y {
        log::warn!("Cross analysis suppressed: both axes are {}", axes.x);
        CrossAnalysis::IdenticalAxes(axes.x)
    } else {
        CrossAnalysis::Table(cross_tabulate(clean, axes.x, axes.y))
    };

    DashboardView {
        total_records: session.records.len(),
        clean_records: clean.len(),
        marital_status: count_by_category(clean, Field::MaritalStatus),
        app_language: count_by_category(clean, Field::BoloAppLanguage),
        employment_status: count_by_category(clean, Field::EmploymentStatus),
        axes,
        cross,
    }
}

impl DashboardView {
    /// Caption under the raw-data table.
    pub fn record_caption(&self) -> String {
        format!(
            "Total records: {} | Clean records: {}",
            self.total_records, self.clean_records
        )
    }
}
