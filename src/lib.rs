//! Daily discounted-sales export.
//!
//! Aggregates completed commerce orders into three derived views
//! (customer directory, order-line ledger, product sales summary) and
//! writes them as a three-sheet xlsx workbook. A scheduler module decides
//! when the daily run is due, and a JSON-backed settings store carries the
//! handful of knobs (debug mode, output directory, forced run).

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod files;
pub mod models;
pub mod schedule;
pub mod sheet;

pub use error::{Result, TallysheetError};
