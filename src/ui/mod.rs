//! egui widgets: sidebar and main panel, the record table, and the charts.

pub mod panels;
pub mod plot;
pub mod table;
