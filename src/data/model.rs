use std::collections::BTreeSet;
use std::fmt;

/// Columns every uploaded tourist table must carry (exact, case-sensitive).
pub const REQUIRED_COLUMNS: [&str; 5] = ["Name", "Country", "Destination", "Duration", "Rating"];

pub const COUNTRY: &str = "Country";
pub const DESTINATION: &str = "Destination";
pub const DURATION: &str = "Duration";
pub const RATING: &str = "Rating";

// ---------------------------------------------------------------------------
// Value – a single cell of the record table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes a data-table library
/// infers from CSV text or spreadsheet cells.
///
/// `Value` is `Ord` so distinct values can be collected into a `BTreeSet`
/// and offered to the filter selectors in sorted order.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Spreadsheet date/datetime, kept as ISO-8601 text.
    Date(String),
    Null,
}

impl Eq for Value {}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
                Date(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) | Value::Date(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "<null>"),
            other => write!(f, "{}", other.to_field()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl Value {
    /// Numeric view of the value, used for means and rating ordering.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text written to a delimited export field. Null becomes an empty field
    /// and whole floats keep their decimal point (`3.0`), as a float column
    /// is written by a data-table library.
    pub fn to_field(&self) -> String {
        match self {
            Value::Text(s) | Value::Date(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
                    format!("{v:.1}")
                } else {
                    format!("{v}")
                }
            }
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Null => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordTable – the loaded dataset
// ---------------------------------------------------------------------------

/// One record; cells are aligned with [`RecordTable::columns`].
pub type Row = Vec<Value>;

/// The uploaded dataset: ordered column names and rows aligned to them.
/// Extra columns beyond [`REQUIRED_COLUMNS`] are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RecordTable {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        RecordTable { columns, rows }
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` for the named column; `None` if the column does not
    /// exist, `Some(&Value::Null)` for a missing cell.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Required columns that the table does not have, in canonical order.
    pub fn missing_required(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|req| !self.columns.iter().any(|c| c == *req))
            .map(|req| req.to_string())
            .collect()
    }

    /// Sorted set of distinct non-null values in a column.
    pub fn unique_values(&self, column: &str) -> BTreeSet<Value> {
        let Some(col) = self.column_index(column) else {
            return BTreeSet::new();
        };
        self.rows
            .iter()
            .filter_map(|r| r.get(col))
            .filter(|v| !v.is_null())
            .cloned()
            .collect()
    }

    /// Widen integers to floats in every column that mixes both, so each
    /// column carries a single numeric type.
    pub fn unify_numeric_columns(&mut self) {
        for col in 0..self.columns.len() {
            let mut has_int = false;
            let mut has_float = false;
            for row in &self.rows {
                match row.get(col) {
                    Some(Value::Integer(_)) => has_int = true,
                    Some(Value::Float(_)) => has_float = true,
                    _ => {}
                }
            }
            if !(has_int && has_float) {
                continue;
            }
            for row in &mut self.rows {
                if let Some(cell) = row.get_mut(col) {
                    if let Value::Integer(i) = *cell {
                        *cell = Value::Float(i as f64);
                    }
                }
            }
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
