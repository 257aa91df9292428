use thiserror::Error;

use super::filter::TableView;

pub const DEFAULT_FILE_NAME: &str = "filtered_tourists.csv";
pub const CSV_MEDIA_TYPE: &str = "text/csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("finishing CSV buffer: {0}")]
    Buffer(String),
    #[error("saving {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A file ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub media_type: &'static str,
    pub data: Vec<u8>,
}

impl Download {
    /// Write the payload to `path`.
    pub fn save(&self, path: &std::path::Path) -> Result<(), ExportError> {
        std::fs::write(path, &self.data).map_err(|source| ExportError::Save {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Serialize every row and column of the view as UTF-8 CSV with a header
/// row in table column order. An empty view yields the header alone.
pub fn export_csv(view: &TableView<'_>) -> Result<Download, ExportError> {
    export_csv_named(view, DEFAULT_FILE_NAME)
}

/// [`export_csv`] with a caller-chosen download name.
pub fn export_csv_named(view: &TableView<'_>, file_name: &str) -> Result<Download, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(view.columns())?;
    for row in view.rows() {
        writer.write_record(row.iter().map(|v| v.to_field()))?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;

    log::debug!("exported {} rows ({} bytes)", view.len(), data.len());
    Ok(Download {
        file_name: file_name.to_string(),
        media_type: CSV_MEDIA_TYPE,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSelection};
    use crate::data::model::{RecordTable, Value};

    fn table() -> RecordTable {
        RecordTable::new(
            vec![
                "Name".into(),
                "Country".into(),
                "Destination".into(),
                "Duration".into(),
                "Rating".into(),
                "Notes".into(),
            ],
            vec![
                vec!["Ann".into(), "FR".into(), "Paris".into(), 3i64.into(), 4.5f64.into(), "a, b".into()],
                vec!["Bob".into(), "DE".into(), "Berlin".into(), 2i64.into(), 5.0f64.into(), Value::Null],
            ],
        )
    }

    #[test]
    fn exports_all_columns_of_filtered_rows() {
        let t = table();
        let dl = export_csv(&apply(&t, &FilterSelection::country("FR"))).unwrap();
        assert_eq!(dl.file_name, "filtered_tourists.csv");
        assert_eq!(dl.media_type, "text/csv");
        assert_eq!(
            String::from_utf8(dl.data).unwrap(),
            "Name,Country,Destination,Duration,Rating,Notes\nAnn,FR,Paris,3,4.5,\"a, b\"\n"
        );
    }

    #[test]
    fn nulls_become_empty_fields() {
        let t = table();
        let dl = export_csv(&apply(&t, &FilterSelection::country("DE"))).unwrap();
        let text = String::from_utf8(dl.data).unwrap();
        assert!(text.ends_with("Bob,DE,Berlin,2,5.0,\n"));
    }

    #[test]
    fn empty_view_exports_header_only() {
        let t = table();
        let dl = export_csv(&apply(&t, &FilterSelection::country("JP"))).unwrap();
        assert_eq!(
            String::from_utf8(dl.data).unwrap(),
            "Name,Country,Destination,Duration,Rating,Notes\n"
        );
    }
}
