//! Frequency tables behind the destination pie chart and the rating bar chart.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::filter::TableView;
use super::model::{Value, DESTINATION, RATING};

/// Number of rows carrying one distinct value.
#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    pub value: Value,
    pub count: usize,
}

impl Count {
    /// Percentage of `total` this bucket represents.
    pub fn share(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 * 100.0 / total as f64
        }
    }
}

/// Both distributions for the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Rows per destination, most frequent first.
    pub destinations: Vec<Count>,
    /// Rows per rating, ascending by rating.
    pub ratings: Vec<Count>,
}

impl ChartData {
    pub fn destination_total(&self) -> usize {
        self.destinations.iter().map(|c| c.count).sum()
    }
}

/// Prepare chart data, or `None` when the view is empty and there is
/// nothing to visualize.
pub fn prepare_charts(view: &TableView<'_>) -> Option<ChartData> {
    if view.is_empty() {
        return None;
    }
    Some(ChartData {
        destinations: destination_counts(view),
        ratings: rating_counts(view),
    })
}

/// Rows per destination, ordered by descending count; ties keep the order
/// in which values first appear. Missing destinations are not counted.
pub fn destination_counts(view: &TableView<'_>) -> Vec<Count> {
    let mut counts = value_counts(view, DESTINATION);
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Rows per rating, ordered ascending by rating. Missing ratings are not
/// counted.
pub fn rating_counts(view: &TableView<'_>) -> Vec<Count> {
    let mut counts = value_counts(view, RATING);
    counts.sort_by(|a, b| compare_ratings(&a.value, &b.value));
    counts
}

/// Numeric comparison when both sides are numbers, otherwise the total
/// order on [`Value`].
fn compare_ratings(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// Count non-null values of `column` in first-seen order.
fn value_counts(view: &TableView<'_>, column: &str) -> Vec<Count> {
    let mut position: HashMap<&Value, usize> = HashMap::new();
    let mut counts: Vec<Count> = Vec::new();
    for value in view.column(column).filter(|v| !v.is_null()) {
        match position.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                position.insert(value, counts.len());
                counts.push(Count {
                    value: value.clone(),
                    count: 1,
                });
            }
        }
    }
    counts
}
