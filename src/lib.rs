//! User Data Dashboard
//!
//! Loads a survey/profile workbook (`.xlsx`), drops rows missing any of the
//! required fields (`MaritalStatus`, `BoloAppLanguage`, `EmploymentStatus`)
//! and shows category counts, a cross-tabulation heatmap and a CSV export of
//! the cleaned rows.
//!
//! ```no_run
//! use user_dashboard::data::{aggregate, clean, loader, model::Field};
//!
//! let records = loader::load_file("users.xlsx".as_ref())?;
//! let clean = clean::clean(&records);
//! let marital = aggregate::count_by_category(&clean, Field::MaritalStatus);
//! for (status, count) in marital.entries() {
//!     println!("{status}: {count}");
//! }
//! # Ok::<(), user_dashboard::data::loader::LoadError>(())
//! ```

pub mod app;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
pub mod view;
