use std::path::Path;

use anyhow::Result;

use crate::data::export::CsvExport;
use crate::data::loader::{load_bytes, load_file, LoadError};
use crate::data::model::{Field, RecordSet};
use crate::view::{render, AxisSelection, DashboardView, Session};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No file uploaded yet; the upload prompt is shown.
    Empty,
    /// A file is loaded; charts and controls are shown.
    Loaded,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Current upload (None until the user loads a file).
    pub session: Option<Session>,

    /// Cross-analysis selectors.
    pub axes: AxisSelection,

    /// Aggregates for `session` and `axes`, rebuilt after every input event.
    pub view: Option<DashboardView>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn phase(&self) -> Phase {
        match self.session {
            Some(_) => Phase::Loaded,
            None => Phase::Empty,
        }
    }

    /// Load a workbook from disk and make it the current session.
    pub fn open_path(&mut self, path: &Path) -> Result<(), LoadError> {
        let name = display_name(path);
        self.apply_load(name, load_file(path))
    }

    /// Load an in-memory workbook and make it the current session.
    pub fn open_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<(), LoadError> {
        self.apply_load(name.to_string(), load_bytes(bytes))
    }

    fn apply_load(
        &mut self,
        name: String,
        loaded: Result<RecordSet, LoadError>,
    ) -> Result<(), LoadError> {
        match loaded {
            Ok(records) => {
                self.set_session(Session::new(name, records));
                Ok(())
            }
            Err(e) => {
                // The previous session, if any, stays on screen.
                log::error!("Failed to load {name}: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Ingest a freshly loaded session and rebuild the view.
    pub fn set_session(&mut self, session: Session) {
        log::info!(
            "{}: {} records, {} clean",
            session.source_name,
            session.records.len(),
            session.clean.len()
        );
        self.session = Some(session);
        self.status_message = None;
        self.rerender();
    }

    pub fn set_x_axis(&mut self, field: Field) {
        if self.axes.x != field {
            self.axes.x = field;
            self.rerender();
        }
    }

    pub fn set_y_axis(&mut self, field: Field) {
        if self.axes.y != field {
            self.axes.y = field;
            self.rerender();
        }
    }

    /// Recompute `view` from scratch.
    pub fn rerender(&mut self) {
        self.view = self.session.as_ref().map(|s| render(s, self.axes));
    }

    /// CSV download of the current clean set.
    pub fn export(&self) -> Option<Result<CsvExport>> {
        self.session
            .as_ref()
            .map(|s| CsvExport::from_clean(&s.clean))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
