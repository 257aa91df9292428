//! Window-less run: load, filter, report, export, exit.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::data::chart::prepare_charts;
use crate::data::export::export_csv_named;
use crate::data::filter::{apply, TableView};
use crate::data::loader::load_file;
use crate::data::summary::summarize;

/// Plain-text rendering of what the dashboard shows for `view`, one line per
/// item and newline-terminated.
pub fn render_report(view: &TableView<'_>) -> String {
    let mut lines = vec![format!(
        "Filtered tourists: {} of {}",
        view.len(),
        view.table().len()
    )];

    match summarize(view) {
        Some(summary) => lines.extend(summary.lines().into_iter().map(|l| format!("- {l}"))),
        None => lines.push("No data found for the selected filters.".to_string()),
    }

    match prepare_charts(view) {
        Some(charts) => {
            let total = charts.destination_total();
            lines.push("Destination distribution:".to_string());
            lines.extend(
                charts
                    .destinations
                    .iter()
                    .map(|c| format!("  {}: {} ({:.1}%)", c.value, c.count, c.share(total))),
            );
            lines.push("Tourist ratings:".to_string());
            lines.extend(
                charts
                    .ratings
                    .iter()
                    .map(|c| format!("  {}: {}", c.value, c.count)),
            );
        }
        None => lines.push("No data to visualize.".to_string()),
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Run without a window, writing the filtered CSV to `output`.
pub fn run(cli: &Cli, output: &Path) -> Result<()> {
    let input = cli
        .file
        .as_deref()
        .context("an input file is required with --export")?;
    let table = load_file(input).with_context(|| format!("loading {}", input.display()))?;
    log::info!("Loaded {} rows from {}", table.len(), input.display());

    let selection = cli.selection(&table);
    log::info!(
        "Filtering by country={} destination={}",
        selection.country,
        selection.destination
    );
    let view = apply(&table, &selection);
    print!("{}", render_report(&view));

    let file_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let download = export_csv_named(&view, &file_name).context("exporting filtered rows")?;
    download.save(output)?;
    log::info!("Wrote {} rows to {}", view.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::FilterSelection;
    use crate::data::loader::load_bytes;

    const CSV: &str = "Name,Country,Destination,Duration,Rating\n\
                       Ann,FR,Paris,3,5\n\
                       Bob,FR,Nice,5,4\n\
                       Cid,DE,Berlin,2,5\n";

    #[test]
    fn report_for_matching_rows() {
        let table = load_bytes("t.csv", CSV.as_bytes()).unwrap();
        let report = render_report(&apply(&table, &FilterSelection::country("FR")));
        assert_eq!(
            report,
            "Filtered tourists: 2 of 3\n\
             - Average Duration: 4.00 days\n\
             - Average Rating: 4.50 out of 5\n\
             Destination distribution:\n  Paris: 1 (50.0%)\n  Nice: 1 (50.0%)\n\
             Tourist ratings:\n  4: 1\n  5: 1\n"
        );
    }

    #[test]
    fn report_for_empty_view() {
        let table = load_bytes("t.csv", CSV.as_bytes()).unwrap();
        let report = render_report(&apply(&table, &FilterSelection::country("JP")));
        assert_eq!(
            report,
            "Filtered tourists: 0 of 3\n\
             No data found for the selected filters.\n\
             No data to visualize.\n"
        );
    }
}
