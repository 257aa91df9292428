use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, DataType, Reader, Xlsx};
use thiserror::Error;

use super::model::{RecordTable, Row, Value};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an upload could not become a [`RecordTable`]. Every variant is
/// reported to the user verbatim; no partial table is ever kept.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("Unsupported file format: {name}")]
    UnsupportedFormat { name: String },
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("{0}")]
    ParseError(String),
}

// ---------------------------------------------------------------------------
// Format detection
// ---------------------------------------------------------------------------

/// Upload formats the dashboard accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Xlsx,
}

impl SourceFormat {
    /// Detect the format from a file name's extension (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, LoadError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" => Ok(SourceFormat::Xlsx),
            _ => Err(LoadError::UnsupportedFormat {
                name: name.to_string(),
            }),
        }
    }

    /// Extensions offered by the open-file dialog.
    pub const EXTENSIONS: [&'static str; 2] = ["csv", "xlsx"];
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and validate a tourist table from a file on disk. The extension is
/// checked before the file is read.
pub fn load_file(path: &Path) -> Result<RecordTable, LoadError> {
    let name = path.to_string_lossy();
    SourceFormat::from_name(&name)?;
    let bytes = std::fs::read(path).map_err(|e| LoadError::ParseError(e.to_string()))?;
    load_bytes(&name, &bytes)
}

/// Load and validate a tourist table from an uploaded byte stream whose
/// format is declared by `name`'s extension.
pub fn load_bytes(name: &str, bytes: &[u8]) -> Result<RecordTable, LoadError> {
    let format = SourceFormat::from_name(name)?;
    let mut table = match format {
        SourceFormat::Csv => parse_csv(bytes)?,
        SourceFormat::Xlsx => parse_xlsx(bytes)?,
    };
    table.unify_numeric_columns();

    let missing = table.missing_required();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    log::debug!(
        "parsed {name} as {format:?}: {} rows, columns {:?}",
        table.len(),
        table.columns
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Cell texts read as missing values, matching the default NA markers of
/// common data-table readers.
const NA_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// CSV layout: a header row with column names, then one record per line.
/// Short records are padded with Null; records longer than the header and
/// invalid UTF-8 are parse errors.
fn parse_csv(bytes: &[u8]) -> Result<RecordTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::ParseError(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::ParseError(
            "No columns to parse from file".to_string(),
        ));
    }

    let mut rows = Vec::new();
    let width = headers.len();
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::ParseError(e.to_string()))?;
        if record.len() > width {
            return Err(LoadError::ParseError(format!(
                "Error tokenizing data. Expected {width} fields in line {}, saw {}",
                line + 2,
                record.len()
            )));
        }
        let mut row: Row = record.iter().map(guess_value).collect();
        row.resize(width, Value::Null);
        rows.push(row);
    }

    Ok(RecordTable::new(normalize_headers(headers), rows))
}

fn guess_value(s: &str) -> Value {
    if NA_MARKERS.contains(&s) {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    match s {
        "True" | "TRUE" | "true" => Value::Bool(true),
        "False" | "FALSE" | "false" => Value::Bool(false),
        _ => Value::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// XLSX
// ---------------------------------------------------------------------------

/// Read the first worksheet; its first row is the header.
fn parse_xlsx(bytes: &[u8]) -> Result<RecordTable, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e| LoadError::ParseError(format!("Excel: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::ParseError("Excel file has no worksheets".to_string()))?
        .map_err(|e| LoadError::ParseError(format!("Excel: {e}")))?;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Ok(RecordTable::default());
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|c| c.as_string().unwrap_or_else(|| c.to_string()))
        .collect();
    let width = headers.len();

    let rows = sheet_rows
        .map(|cells| {
            let mut row: Row = cells.iter().map(excel_value).collect();
            row.resize(width, Value::Null);
            row
        })
        .collect();

    Ok(RecordTable::new(normalize_headers(headers), rows))
}

fn excel_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::Text(s.clone()),
        Data::Int(i) => Value::Integer(*i),
        // Spreadsheets store every number as a float; whole numbers read back as integers.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Value::Integer(*f as i64),
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(|dt| Value::Date(dt.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or_else(|| Value::Text(cell.to_string())),
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}

// ---------------------------------------------------------------------------
// Header clean-up
// ---------------------------------------------------------------------------

/// Name blank headers `Unnamed: <index>` and suffix repeated names with
/// `.1`, `.2`, ... so every column can be addressed by name.
fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(headers.len());
    for (idx, header) in headers.into_iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header
        };
        let mut name = base.clone();
        let mut n = 1;
        while out.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        out.push(name);
    }
    out
}
