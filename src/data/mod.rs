//! Data layer: core types, loading, cleaning, aggregation and export.
//!
//! Architecture:
//! ```text
//!      .xlsx
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  first sheet → RecordSet (required columns checked)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  clean    │  drop rows missing a required field → CleanSet
//!   └──────────┘
//!        │
//!        ├──────────────────┐
//!        ▼                  ▼
//!   ┌───────────┐     ┌──────────┐
//!   │ aggregate  │     │  export   │  CleanSet → cleaned_user_data.csv
//!   └───────────┘     └──────────┘
//!   FrequencyTable, CrossTab
//! ```

pub mod aggregate;
pub mod clean;
pub mod export;
pub mod loader;
pub mod model;
