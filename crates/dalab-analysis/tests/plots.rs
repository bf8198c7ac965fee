//! Chart builders produce plotly figures with the expected titles and traces.

use chrono::NaiveDate;
use dalab_analysis::config::{MedicalConfig, SeaLevelConfig};
use dalab_analysis::medical::{categorical_counts, heat_map, prepare, MedicalRecord};
use dalab_analysis::page_views::{
    monthly_averages, monthly_distribution, yearly_distribution, PageView,
};
use dalab_analysis::report::plots::{
    plot_categorical_counts, plot_correlation_heat_map, plot_monthly_averages_bar,
    plot_page_view_boxes, plot_page_views_line, plot_sea_level,
};
use dalab_analysis::report::write_plot_html;
use dalab_analysis::sea_level::{analyze, SeaLevelObservation};

fn views() -> Vec<PageView> {
    (0..60)
        .map(|i| PageView {
            date: NaiveDate::from_ymd_opt(2016, 5, 1).unwrap() + chrono::Duration::days(i * 7),
            value: 1000.0 + (i * 37 % 500) as f64,
        })
        .collect()
}

fn exams() -> Vec<dalab_analysis::medical::Examination> {
    let records: Vec<MedicalRecord> = (0..8)
        .map(|i| MedicalRecord {
            id: i,
            age: 15_000 + 300 * i as u32,
            sex: 1 + (i % 2) as u8,
            height: 155.0 + 3.0 * i as f64,
            weight: 55.0 + 4.0 * (i % 5) as f64,
            ap_hi: 110 + 5 * i as i64,
            ap_lo: 70 + (i % 3) as i64,
            cholesterol: 1 + (i % 3) as u8,
            gluc: 1 + (i % 2) as u8,
            smoke: (i % 4 == 0) as u8,
            alco: (i % 3 == 0) as u8,
            active: (i % 2) as u8,
            cardio: (i % 2) as u8,
        })
        .collect();
    prepare(&records, &MedicalConfig::default())
}

#[test]
fn page_view_charts_carry_titles() {
    let views = views();
    let line = plot_page_views_line(&views).to_json();
    assert!(line.contains("Daily freeCodeCamp Forum Page Views 5/2016-12/2019"));
    assert!(line.contains("Page Views"));

    let bar = plot_monthly_averages_bar(&monthly_averages(&views)).to_json();
    assert!(bar.contains("Average Page Views"));
    assert!(bar.contains("January"));
    assert!(bar.contains("December"));

    let boxes = plot_page_view_boxes(
        &yearly_distribution(&views).unwrap(),
        &monthly_distribution(&views).unwrap(),
    )
    .to_json();
    assert!(boxes.contains("Year-wise Box Plot (Trend)"));
    assert!(boxes.contains("Month-wise Box Plot (Seasonality)"));
}

#[test]
fn medical_charts_build() {
    let exams = exams();
    let cat = plot_categorical_counts(&categorical_counts(&exams)).to_json();
    assert!(cat.contains("cholesterol"));
    assert!(cat.contains("overweight"));

    let config = MedicalConfig {
        lower_quantile: 0.0,
        upper_quantile: 1.0,
        ..MedicalConfig::default()
    };
    let corr = heat_map(&exams, &config).unwrap();
    let heat = plot_correlation_heat_map(&corr).to_json();
    assert!(heat.contains("ap_hi"));
}

#[test]
fn heat_map_labels_only_visible_cells() {
    // weight is an exact linear function of height
    let records: Vec<MedicalRecord> = (0..6u64)
        .map(|i| MedicalRecord {
            id: i,
            age: 16_000 + 250 * i as u32,
            sex: 1 + (i % 2) as u8,
            height: 150.0 + 5.0 * i as f64,
            weight: 50.0 + 10.0 * i as f64,
            ap_hi: 120 + (i % 3) as i64,
            ap_lo: 80,
            cholesterol: 1 + (i % 3) as u8,
            gluc: 1,
            smoke: 0,
            alco: 0,
            active: 1,
            cardio: (i % 2) as u8,
        })
        .collect();
    let config = MedicalConfig {
        lower_quantile: 0.0,
        upper_quantile: 1.0,
        ..MedicalConfig::default()
    };
    let corr = heat_map(&prepare(&records, &config), &config).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&plot_correlation_heat_map(&corr).to_json()).unwrap();
    let annotations = json["layout"]["annotations"].as_array().unwrap();

    let position = |label: &serde_json::Value| {
        corr.labels
            .iter()
            .position(|l| l.as_str() == label.as_str().unwrap())
            .unwrap()
    };
    let expected: usize = corr
        .visible_values()
        .iter()
        .map(|row| row.iter().filter(|v| v.is_some()).count())
        .sum();
    assert_eq!(annotations.len(), expected);
    for annotation in annotations {
        // only strictly below the diagonal
        assert!(position(&annotation["x"]) < position(&annotation["y"]));
        let text = annotation["text"].as_str().unwrap();
        assert_eq!(text.split('.').nth(1).map(str::len), Some(1), "{}", text);
    }

    let weight_height = annotations
        .iter()
        .find(|a| a["x"] == "height" && a["y"] == "weight")
        .unwrap();
    assert_eq!(weight_height["text"], "1.0");
    // constant columns are left unlabelled
    assert!(annotations.iter().all(|a| a["x"] != "smoke" && a["y"] != "smoke"));
}

#[test]
fn sea_level_chart_writes_html() {
    let obs: Vec<SeaLevelObservation> = (1880..=2013)
        .map(|year| SeaLevelObservation {
            year,
            level: 0.06 * (year - 1880) as f64,
        })
        .collect();
    let projection = analyze(&obs, &SeaLevelConfig::default()).unwrap();
    let plot = plot_sea_level(&obs, &projection);
    let json = plot.to_json();
    assert!(json.contains("Rise in Sea Level"));
    assert!(json.contains("Fit: Since 2000"));
    assert!(json.contains("Sea Level (inches)"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sea_level_plot.html");
    write_plot_html(&plot, &path).unwrap();
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("Rise in Sea Level"));
}
