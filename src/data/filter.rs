use std::borrow::Cow;
use std::fmt;

use super::model::{RecordTable, Row, Value, COUNTRY, DESTINATION};

// ---------------------------------------------------------------------------
// Filter predicate: one optional equality constraint per field
// ---------------------------------------------------------------------------

/// A selector position: no constraint, or equality with an observed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Choice {
    #[default]
    All,
    Equals(Value),
}

impl Choice {
    /// Whether a cell passes this constraint. Missing cells never match a
    /// concrete value.
    pub fn matches(&self, cell: Option<&Value>) -> bool {
        match self {
            Choice::All => true,
            Choice::Equals(want) => match cell {
                Some(v) if !v.is_null() => v == want,
                _ => false,
            },
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => write!(f, "All"),
            Choice::Equals(v) => write!(f, "{v}"),
        }
    }
}

/// Country and destination constraints applied to the record table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub country: Choice,
    pub destination: Choice,
}

impl FilterSelection {
    /// Both selectors on "All".
    pub fn all() -> Self {
        Self::default()
    }

    pub fn country(value: impl Into<Value>) -> Self {
        FilterSelection {
            country: Choice::Equals(value.into()),
            destination: Choice::All,
        }
    }

    pub fn destination(value: impl Into<Value>) -> Self {
        FilterSelection {
            country: Choice::All,
            destination: Choice::Equals(value.into()),
        }
    }

    /// Conjunction of two selections that constrain different fields. Where
    /// both constrain the same field, `self` wins.
    pub fn and(&self, other: &FilterSelection) -> FilterSelection {
        fn pick(a: &Choice, b: &Choice) -> Choice {
            if a.is_all() {
                b.clone()
            } else {
                a.clone()
            }
        }
        FilterSelection {
            country: pick(&self.country, &other.country),
            destination: pick(&self.destination, &other.destination),
        }
    }

    fn constraints(&self) -> [(&'static str, &Choice); 2] {
        [(COUNTRY, &self.country), (DESTINATION, &self.destination)]
    }

    /// Whether `row` of `table` passes every active constraint.
    pub fn matches(&self, table: &RecordTable, row: &Row) -> bool {
        self.constraints().iter().all(|(column, choice)| {
            if choice.is_all() {
                return true;
            }
            let cell = table.column_index(column).and_then(|idx| row.get(idx));
            choice.matches(cell)
        })
    }
}

/// Selector entries for a column: "All" followed by the distinct non-null
/// values observed in the table, sorted.
pub fn filter_options(table: &RecordTable, column: &str) -> Vec<Choice> {
    std::iter::once(Choice::All)
        .chain(table.unique_values(column).into_iter().map(Choice::Equals))
        .collect()
}

/// Resolve a selector label (as shown to the user) against `options`.
/// "All" is unconstrained; a label matching no observed value becomes a
/// text constraint that matches nothing.
pub fn choice_for_label(options: &[Choice], label: &str) -> Choice {
    if label == "All" {
        return Choice::All;
    }
    options
        .iter()
        .find(|opt| !opt.is_all() && opt.to_string() == label)
        .cloned()
        .unwrap_or_else(|| Choice::Equals(Value::Text(label.to_string())))
}

/// Return indices of rows that pass the selection, in table order.
pub fn filtered_indices(table: &RecordTable, selection: &FilterSelection) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| selection.matches(table, row))
        .map(|(i, _)| i)
        .collect()
}

/// Narrow the table by `selection`. The table itself is never modified.
pub fn apply<'a>(table: &'a RecordTable, selection: &FilterSelection) -> TableView<'a> {
    TableView::new(table, filtered_indices(table, selection))
}

// ---------------------------------------------------------------------------
// TableView – the filtered view handed to summary, charts and export
// ---------------------------------------------------------------------------

/// A read-only subsequence of a [`RecordTable`], addressed by row index.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    table: &'a RecordTable,
    indices: Cow<'a, [usize]>,
}

impl<'a> TableView<'a> {
    pub fn new(table: &'a RecordTable, indices: impl Into<Cow<'a, [usize]>>) -> Self {
        TableView {
            table,
            indices: indices.into(),
        }
    }

    /// Every row of the table.
    pub fn all(table: &'a RecordTable) -> Self {
        TableView::new(table, (0..table.len()).collect::<Vec<_>>())
    }

    /// Narrow this view further; row order is kept.
    pub fn filter(&self, selection: &FilterSelection) -> TableView<'a> {
        let indices: Vec<usize> = self
            .indices
            .iter()
            .copied()
            .filter(|&i| selection.matches(self.table, &self.table.rows[i]))
            .collect();
        TableView::new(self.table, indices)
    }

    pub fn table(&self) -> &'a RecordTable {
        self.table
    }

    pub fn columns(&self) -> &'a [String] {
        &self.table.columns
    }

    /// Indices into the underlying table.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a Row> + '_ {
        let table = self.table;
        self.indices.iter().map(move |&i| &table.rows[i])
    }

    /// Cells of one column across the view; empty if the column is absent.
    pub fn column(&self, name: &str) -> impl Iterator<Item = &'a Value> + '_ {
        let idx = self.table.column_index(name);
        self.rows()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RecordTable {
        RecordTable::new(
            vec![
                "Name".into(),
                "Country".into(),
                "Destination".into(),
                "Duration".into(),
                "Rating".into(),
            ],
            vec![
                vec!["a".into(), "FR".into(), "Paris".into(), 3i64.into(), 5i64.into()],
                vec!["b".into(), "FR".into(), "Nice".into(), 5i64.into(), 4i64.into()],
                vec!["c".into(), "DE".into(), "Berlin".into(), 2i64.into(), 5i64.into()],
                vec!["d".into(), Value::Null, "Paris".into(), 1i64.into(), 3i64.into()],
                vec!["e".into(), "DE".into(), "Paris".into(), 4i64.into(), Value::Null],
            ],
        )
    }

    #[test]
    fn unconstrained_selection_is_identity() {
        let t = table();
        assert_eq!(filtered_indices(&t, &FilterSelection::all()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn country_filter_preserves_order() {
        let t = table();
        assert_eq!(filtered_indices(&t, &FilterSelection::country("DE")), vec![2, 4]);
    }

    #[test]
    fn both_constraints_must_hold() {
        let t = table();
        let sel = FilterSelection::country("DE").and(&FilterSelection::destination("Paris"));
        assert_eq!(filtered_indices(&t, &sel), vec![4]);
    }

    #[test]
    fn nulls_never_match_a_value() {
        assert!(!Choice::Equals("FR".into()).matches(Some(&Value::Null)));
        assert!(!Choice::Equals(Value::Null).matches(Some(&Value::Null)));
        assert!(!Choice::Equals("FR".into()).matches(None));
        assert!(Choice::All.matches(None));
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let t = table();
        let sel = FilterSelection::destination("Paris");
        let once = apply(&t, &sel);
        let twice = once.filter(&sel);
        assert_eq!(once.indices(), twice.indices());
    }

    #[test]
    fn chained_filters_equal_combined_selection() {
        let t = table();
        let s1 = FilterSelection::country("FR");
        let s2 = FilterSelection::destination("Paris");
        let chained = apply(&t, &s1).filter(&s2);
        let combined = apply(&t, &s1.and(&s2));
        assert_eq!(chained.indices(), combined.indices());
        assert_eq!(chained.indices(), &[0]);
    }

    #[test]
    fn options_start_with_all_and_are_sorted() {
        let t = table();
        let opts = filter_options(&t, "Country");
        assert_eq!(
            opts,
            vec![
                Choice::All,
                Choice::Equals("DE".into()),
                Choice::Equals("FR".into())
            ]
        );
        assert_eq!(opts[0].to_string(), "All");
    }

    #[test]
    fn labels_resolve_to_observed_values() {
        let t = RecordTable::new(
            vec!["Rating".into()],
            vec![vec![4i64.into()], vec![5i64.into()]],
        );
        let opts = filter_options(&t, "Rating");
        assert_eq!(choice_for_label(&opts, "All"), Choice::All);
        assert_eq!(choice_for_label(&opts, "5"), Choice::Equals(Value::Integer(5)));
        assert_eq!(
            choice_for_label(&opts, "7"),
            Choice::Equals(Value::Text("7".into()))
        );
    }

    #[test]
    fn view_column_iterates_filtered_cells() {
        let t = table();
        let view = apply(&t, &FilterSelection::country("FR"));
        let names: Vec<String> = view.column("Name").map(|v| v.to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(view.column("Missing").count(), 0);
    }
}
