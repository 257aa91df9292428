mod common;

use std::path::Path;

use common::{write_temp, TOURISTS_CSV};
use tourist_informatics::cli::Cli;
use tourist_informatics::data::chart::{prepare_charts, Count};
use tourist_informatics::data::export::export_csv;
use tourist_informatics::data::filter::{apply, FilterSelection, TableView};
use tourist_informatics::data::loader::{load_bytes, load_file, LoadError};
use tourist_informatics::data::model::Value;
use tourist_informatics::data::summary::{format_mean, summarize};

#[test]
fn worked_example_country_fr() {
    let (_dir, path) = write_temp("tourists.csv", TOURISTS_CSV.as_bytes());
    let table = load_file(&path).unwrap();
    let view = apply(&table, &FilterSelection::country("FR"));
    assert_eq!(view.len(), 2);

    let summary = summarize(&view).unwrap();
    assert_eq!(format_mean(summary.avg_duration), "4.00");
    assert_eq!(format_mean(summary.avg_rating), "4.50");

    let charts = prepare_charts(&view).unwrap();
    let mut destinations: Vec<(String, usize)> = charts
        .destinations
        .iter()
        .map(|c| (c.value.to_string(), c.count))
        .collect();
    destinations.sort();
    assert_eq!(
        destinations,
        vec![("Nice".to_string(), 1), ("Paris".to_string(), 1)]
    );
    assert_eq!(
        charts.ratings,
        vec![
            Count { value: Value::Integer(4), count: 1 },
            Count { value: Value::Integer(5), count: 1 },
        ]
    );
}

#[test]
fn extra_columns_are_preserved() {
    let table = load_bytes("tourists.csv", TOURISTS_CSV.as_bytes()).unwrap();
    assert_eq!(
        table.columns,
        vec!["Name", "Country", "Destination", "Duration", "Rating", "Age"]
    );
    assert_eq!(table.value(2, "Age"), Some(&Value::Integer(29)));
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    // The file does not exist; an attempted read would be a ParseError.
    let err = load_file(Path::new("/nonexistent/tourists.txt")).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
}

#[test]
fn unreadable_file_is_a_parse_error() {
    let err = load_file(Path::new("/nonexistent/tourists.csv")).unwrap_err();
    assert!(matches!(err, LoadError::ParseError(_)));
}

#[test]
fn each_missing_column_is_reported() {
    for dropped in ["Name", "Country", "Destination", "Duration", "Rating"] {
        let header: Vec<&str> = ["Name", "Country", "Destination", "Duration", "Rating"]
            .into_iter()
            .filter(|c| *c != dropped)
            .collect();
        let csv = format!("{}\n", header.join(","));
        let err = load_bytes("t.csv", csv.as_bytes()).unwrap_err();
        assert_eq!(err, LoadError::MissingColumns(vec![dropped.to_string()]));
    }
}

#[test]
fn invalid_utf8_is_a_parse_error() {
    let mut bytes = b"Name,Country,Destination,Duration,Rating\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, b',', b'a', b',', b'b', b',', b'1', b',', b'2', b'\n']);
    let err = load_bytes("t.csv", &bytes).unwrap_err();
    assert!(matches!(err, LoadError::ParseError(_)));
}

#[test]
fn filter_is_an_order_preserving_subsequence() {
    let table = load_bytes("tourists.csv", TOURISTS_CSV.as_bytes()).unwrap();
    let selections = [
        FilterSelection::all(),
        FilterSelection::country("FR"),
        FilterSelection::country("DE"),
        FilterSelection::destination("Paris"),
        FilterSelection::country("DE").and(&FilterSelection::destination("Paris")),
    ];
    for sel in &selections {
        let view = apply(&table, sel);
        assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
        for row in view.rows() {
            assert!(table.rows.contains(row));
        }
    }
    assert_eq!(apply(&table, &FilterSelection::all()).len(), table.len());
}

#[test]
fn independent_filters_commute() {
    let table = load_bytes("tourists.csv", TOURISTS_CSV.as_bytes()).unwrap();
    let s1 = FilterSelection::country("FR");
    let s2 = FilterSelection::destination("Nice");
    let a = apply(&table, &s1).filter(&s2);
    let b = apply(&table, &s2).filter(&s1);
    let c = TableView::all(&table).filter(&s1.and(&s2));
    assert_eq!(a.indices(), b.indices());
    assert_eq!(a.indices(), c.indices());
    assert_eq!(a.indices(), &[1]);
}

#[test]
fn empty_view_exports_source_header() {
    let table = load_bytes("tourists.csv", TOURISTS_CSV.as_bytes()).unwrap();
    let view = apply(&table, &FilterSelection::country("JP"));
    assert_eq!(summarize(&view), None);
    assert_eq!(prepare_charts(&view), None);

    let download = export_csv(&view).unwrap();
    assert_eq!(
        String::from_utf8(download.data).unwrap(),
        "Name,Country,Destination,Duration,Rating,Age\n"
    );
}

#[test]
fn export_reloads_to_the_same_rows() {
    let table = load_bytes("tourists.csv", TOURISTS_CSV.as_bytes()).unwrap();
    let view = apply(&table, &FilterSelection::country("FR"));
    let download = export_csv(&view).unwrap();
    let reloaded = load_bytes(&download.file_name, &download.data).unwrap();
    assert_eq!(reloaded.columns, table.columns);
    assert_eq!(reloaded.rows, view.rows().cloned().collect::<Vec<_>>());
}

#[test]
fn headless_run_writes_filtered_csv() {
    let (dir, input) = write_temp("tourists.csv", TOURISTS_CSV.as_bytes());
    let output = dir.path().join("out.csv");
    let cli = Cli {
        file: Some(input),
        country: Some("DE".into()),
        export: Some(output.clone()),
        ..Cli::default()
    };
    tourist_informatics::headless::run(&cli, &output).unwrap();
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Name,Country,Destination,Duration,Rating,Age\nCid,DE,Berlin,2,5,29\n"
    );
}

#[test]
fn headless_run_fails_on_missing_columns() {
    let (dir, input) = write_temp("bad.csv", b"Name,Country\nAnn,FR\n");
    let output = dir.path().join("out.csv");
    let cli = Cli {
        file: Some(input),
        ..Cli::default()
    };
    let err = tourist_informatics::headless::run(&cli, &output).unwrap_err();
    let root = err.downcast_ref::<LoadError>().unwrap();
    assert_eq!(
        root.to_string(),
        "Missing columns: Destination, Duration, Rating"
    );
    assert!(!output.exists());
}
