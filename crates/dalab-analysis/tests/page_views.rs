//! Integration tests for the forum page view time series.

use chrono::NaiveDate;
use dalab_analysis::config::PageViewConfig;
use dalab_analysis::io::{read_csv_records_from_reader, CsvReaderConfig};
use dalab_analysis::page_views::{
    clean, monthly_averages, monthly_distribution, yearly_distribution, PageView,
};

fn view(y: i32, m: u32, d: u32, value: f64) -> PageView {
    PageView {
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        value,
    }
}

#[test]
fn reads_dates_and_values() {
    let csv = "date,value\n2016-05-09,1201\n2016-05-10,2329\n";
    let views: Vec<PageView> =
        read_csv_records_from_reader(csv.as_bytes(), &CsvReaderConfig::default()).unwrap();
    assert_eq!(views, vec![view(2016, 5, 9, 1201.0), view(2016, 5, 10, 2329.0)]);
}

#[test]
fn bad_date_reports_row() {
    let csv = "date,value\n2016-05-09,1201\nnot-a-date,5\n";
    let err = read_csv_records_from_reader::<PageView, _>(csv.as_bytes(), &CsvReaderConfig::default())
        .unwrap_err();
    assert!(format!("{:#}", err).contains("row 3"));
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

#[test]
fn clean_drops_extreme_days() {
    let views: Vec<PageView> = (1..=40)
        .map(|i| view(2017, 1 + (i % 12) as u32, 1, i as f64))
        .collect();
    let cleaned = clean(&views, &PageViewConfig::default()).unwrap();
    assert_eq!(cleaned.len(), 38);
    assert!(cleaned.iter().all(|v| v.value >= 2.0 && v.value <= 39.0));
}

#[test]
fn clean_keeps_bounds_inclusive() {
    let views = vec![view(2017, 1, 1, 5.0), view(2017, 1, 2, 5.0)];
    let config = PageViewConfig {
        lower_quantile: 0.0,
        upper_quantile: 1.0,
    };
    assert_eq!(clean(&views, &config).unwrap().len(), 2);
}

#[test]
fn clean_rejects_empty_series() {
    assert!(clean(&[], &PageViewConfig::default()).is_err());
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

fn sample() -> Vec<PageView> {
    vec![
        view(2016, 5, 9, 100.0),
        view(2016, 5, 10, 300.0),
        view(2016, 12, 1, 50.0),
        view(2017, 1, 1, 10.0),
        view(2017, 1, 2, 30.0),
        view(2017, 5, 1, 70.0),
    ]
}

#[test]
fn monthly_averages_pivot_by_year() {
    let averages = monthly_averages(&sample());
    assert_eq!(averages.len(), 2);
    assert_eq!(averages[0].year, 2016);
    assert_eq!(averages[0].months[4], Some(200.0));
    assert_eq!(averages[0].months[11], Some(50.0));
    assert_eq!(averages[0].months[0], None);
    assert_eq!(averages[1].year, 2017);
    assert_eq!(averages[1].months[0], Some(20.0));
}

#[test]
fn yearly_distribution_is_ascending() {
    let yearly = yearly_distribution(&sample()).unwrap();
    let labels: Vec<&str> = yearly.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["2016", "2017"]);
    assert_eq!(yearly[0].values.len(), 3);
    assert!((yearly[0].summary.median - 100.0).abs() < 1e-12);
}

#[test]
fn monthly_distribution_starts_in_january() {
    let monthly = monthly_distribution(&sample()).unwrap();
    let labels: Vec<&str> = monthly.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["Jan", "May", "Dec"]);
    assert_eq!(monthly[1].values, vec![100.0, 300.0, 70.0]);
}
