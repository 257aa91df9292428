/// Data layer: record table, loading, filtering and the derived outputs.
///
/// Architecture:
/// ```text
///  upload (.csv / .xlsx)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse + check required columns → RecordTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  country / destination equality → TableView
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌─────────┐    ┌─────────┐    ┌─────────┐
///   │ summary │    │  chart  │    │ export  │
///   └─────────┘    └─────────┘    └─────────┘
/// ```

pub mod chart;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
