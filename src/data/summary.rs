use super::filter::TableView;
use super::model::{DURATION, RATING};

/// Means over the filtered view. A field is `None` when the view has rows
/// but none of them carries a numeric value for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub avg_duration: Option<f64>,
    pub avg_rating: Option<f64>,
}

/// Compute the summary, or `None` when the view is empty ("no data").
pub fn summarize(view: &TableView<'_>) -> Option<Summary> {
    if view.is_empty() {
        return None;
    }
    Some(Summary {
        avg_duration: mean(view, DURATION),
        avg_rating: mean(view, RATING),
    })
}

/// Arithmetic mean of the numeric cells of `column`; missing and
/// non-numeric cells are skipped.
pub fn mean(view: &TableView<'_>, column: &str) -> Option<f64> {
    let (sum, count) = view
        .column(column)
        .filter_map(|v| v.as_f64())
        .fold((0.0_f64, 0usize), |(sum, n), x| (sum + x, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Two-decimal presentation of a mean; rounding happens only here.
pub fn format_mean(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

impl Summary {
    /// Display lines for the summary section.
    pub fn lines(&self) -> [String; 2] {
        [
            format!("Average Duration: {} days", format_mean(self.avg_duration)),
            format!("Average Rating: {} out of 5", format_mean(self.avg_rating)),
        ]
    }
}
