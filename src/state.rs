use std::path::Path;

use crate::color::ColorMap;
use crate::data::chart::{prepare_charts, ChartData};
use crate::data::export::{export_csv_named, Download, ExportError, DEFAULT_FILE_NAME};
use crate::data::filter::{filter_options, filtered_indices, Choice, FilterSelection, TableView};
use crate::data::loader::{self, LoadError};
use crate::data::model::{RecordTable, COUNTRY, DESTINATION};
use crate::data::summary::{summarize, Summary};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// `table` is `None` until a file loads successfully; a failed load drops
/// any previous table. Everything below `selection` is derived and rebuilt by
/// [`AppState::refilter`].
pub struct AppState {
    /// Loaded tourist table.
    pub table: Option<RecordTable>,

    /// Name of the file the table came from.
    pub file_name: Option<String>,

    pub selection: FilterSelection,

    /// Selector entries ("All" + observed values).
    pub country_options: Vec<Choice>,
    pub destination_options: Vec<Choice>,

    /// Indices of rows passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Derived from the visible rows; `None` means "no data".
    pub summary: Option<Summary>,
    pub charts: Option<ChartData>,

    /// Slice colours per destination.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Suggested name for exported CSV files.
    pub export_file_name: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            file_name: None,
            selection: FilterSelection::all(),
            country_options: Vec::new(),
            destination_options: Vec::new(),
            visible_indices: Vec::new(),
            summary: None,
            charts: None,
            color_map: None,
            status_message: None,
            export_file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl AppState {
    pub fn with_export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = name.into();
        self
    }

    /// Ingest a newly loaded table: reset the selection and rebuild the
    /// selector options and colours.
    pub fn set_table(&mut self, file_name: &str, table: RecordTable) {
        self.selection = FilterSelection::all();
        self.country_options = filter_options(&table, COUNTRY);
        self.destination_options = filter_options(&table, DESTINATION);
        self.color_map = Some(ColorMap::new(&table.unique_values(DESTINATION)));

        self.table = Some(table);
        self.file_name = Some(file_name.to_string());
        self.status_message = None;
        self.refilter();
    }

    /// Forget the current table (back to "no file").
    pub fn clear_table(&mut self) {
        let export_file_name = std::mem::take(&mut self.export_file_name);
        *self = AppState {
            export_file_name,
            ..AppState::default()
        };
    }

    /// Load an uploaded byte stream. On failure the error is kept as the
    /// status message and no table is held.
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<(), LoadError> {
        let result = loader::load_bytes(name, bytes);
        self.apply_load(name, result)
    }

    /// Load a file from disk, see [`AppState::load_bytes`].
    pub fn load_path(&mut self, path: &Path) -> Result<(), LoadError> {
        let result = loader::load_file(path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.apply_load(&name, result)
    }

    fn apply_load(
        &mut self,
        name: &str,
        result: Result<RecordTable, LoadError>,
    ) -> Result<(), LoadError> {
        match result {
            Ok(table) => {
                log::info!(
                    "Loaded {} with {} rows and columns {:?}",
                    name,
                    table.len(),
                    table.columns
                );
                self.set_table(name, table);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {name}: {e}");
                self.clear_table();
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    pub fn set_country(&mut self, choice: Choice) {
        if self.selection.country != choice {
            log::debug!("country filter -> {choice}");
            self.selection.country = choice;
            self.refilter();
        }
    }

    pub fn set_destination(&mut self, choice: Choice) {
        if self.selection.destination != choice {
            log::debug!("destination filter -> {choice}");
            self.selection.destination = choice;
            self.refilter();
        }
    }

    /// Recompute the visible rows and everything derived from them.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            self.visible_indices.clear();
            self.summary = None;
            self.charts = None;
            return;
        };
        self.visible_indices = filtered_indices(table, &self.selection);
        let view = TableView::new(table, self.visible_indices.as_slice());
        self.summary = summarize(&view);
        self.charts = prepare_charts(&view);
    }

    /// The filtered view over the loaded table.
    pub fn view(&self) -> Option<TableView<'_>> {
        self.table
            .as_ref()
            .map(|t| TableView::new(t, self.visible_indices.as_slice()))
    }

    /// CSV of the filtered view, if a table is loaded.
    pub fn export(&self) -> Option<Result<Download, ExportError>> {
        self.view()
            .map(|view| export_csv_named(&view, &self.export_file_name))
    }
}
