use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::{choice_for_label, filter_options, FilterSelection};
use crate::data::model::{RecordTable, COUNTRY, DESTINATION};

#[derive(Parser, Debug, Default)]
#[command(version, about = "Tourist Informatics: filter, summarize, chart and export tourist records")]
pub struct Cli {
    /// CSV or XLSX file to open at start-up
    pub file: Option<PathBuf>,

    /// Read configuration from this TOML file instead of the default location
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Initial country filter ("All" or an observed value)
    #[arg(long = "country")]
    pub country: Option<String>,

    /// Initial destination filter ("All" or an observed value)
    #[arg(long = "destination")]
    pub destination: Option<String>,

    /// Write the filtered rows to this CSV file and exit without opening a window
    #[arg(long = "export", requires = "file")]
    pub export: Option<PathBuf>,
}

impl Cli {
    /// The selection requested on the command line, resolved against the
    /// values present in `table`.
    pub fn selection(&self, table: &RecordTable) -> FilterSelection {
        let mut selection = FilterSelection::all();
        if let Some(label) = &self.country {
            selection.country = choice_for_label(&filter_options(table, COUNTRY), label);
        }
        if let Some(label) = &self.destination {
            selection.destination =
                choice_for_label(&filter_options(table, DESTINATION), label);
        }
        selection
    }
}
