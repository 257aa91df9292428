//! Tourist Informatics: upload a tourist table (CSV or XLSX), filter it by
//! country and destination, and view means, charts and a CSV export of the
//! filtered rows.
//!
//! The [`data`] module is the pure core; [`state`], [`ui`] and [`app`] are
//! the egui dashboard on top of it, and [`headless`] is the terminal
//! counterpart used by `--export`.

pub mod app;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod headless;
pub mod state;
pub mod ui;
