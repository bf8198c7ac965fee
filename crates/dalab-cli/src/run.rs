//! One runner per analysis. Each reads its dataset, computes the result and
//! writes charts under the configured output directory.
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use dalab_analysis::config::AnalysisConfig;
use dalab_analysis::demographic::calculate_demographic_data;
use dalab_analysis::io::{read_census, read_medical_examinations, read_page_views, read_sea_levels};
use dalab_analysis::matrix_stats::{calculate, MatrixStatistics};
use dalab_analysis::medical::{categorical_counts, heat_map, prepare};
use dalab_analysis::page_views::{
    clean, monthly_averages, monthly_distribution, yearly_distribution, BoxSummary, Distribution,
};
use dalab_analysis::report::plots::{
    plot_categorical_counts, plot_correlation_heat_map, plot_monthly_averages_bar,
    plot_page_view_boxes, plot_page_views_line, plot_sea_level,
};
use dalab_analysis::report::write_plot_html;
use dalab_analysis::sea_level::{analyze, LinearFit};

use crate::util::{ensure_output_dir, validate_csv_file};

pub fn run_mean_var_std(values: &[f64]) -> Result<MatrixStatistics> {
    Ok(calculate(values)?)
}

/// Text summary, or pretty JSON when `as_json` is set.
pub fn run_demographic(csv: &Path, config: &AnalysisConfig, as_json: bool) -> Result<String> {
    validate_csv_file(csv)?;
    let people = read_census(csv)?;
    let report = calculate_demographic_data(&people, &config.demographic)?;
    if as_json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.to_string())
    }
}

/// Writes `catplot.html` and `heatmap.html`; returns the written paths.
pub fn run_medical(csv: &Path, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    validate_csv_file(csv)?;
    let records = read_medical_examinations(csv)?;
    let exams = prepare(&records, &config.medical);

    let counts = categorical_counts(&exams);
    let correlations = heat_map(&exams, &config.medical)?;
    log::info!(
        "[dalab::medical] Correlations over {} of {} examinations",
        correlations.n_rows,
        exams.len()
    );

    ensure_output_dir(&config.output_dir)?;
    let catplot = config.output_dir.join("catplot.html");
    let heatmap = config.output_dir.join("heatmap.html");
    write_plot_html(&plot_categorical_counts(&counts), &catplot)?;
    write_plot_html(&plot_correlation_heat_map(&correlations), &heatmap)?;
    Ok(vec![catplot, heatmap])
}

/// Box statistics of one year or month, as printed by `dalab page-views`.
#[derive(Debug, Clone, Serialize)]
pub struct LabelledBox {
    pub label: String,
    #[serde(flatten)]
    pub summary: BoxSummary,
}

impl From<&Distribution> for LabelledBox {
    fn from(dist: &Distribution) -> Self {
        LabelledBox {
            label: dist.label.clone(),
            summary: dist.summary,
        }
    }
}

/// Cleaned series size and box statistics printed by `dalab page-views`.
#[derive(Debug, Clone, Serialize)]
pub struct PageViewSummary {
    pub total_days: usize,
    pub kept_days: usize,
    pub yearly: Vec<LabelledBox>,
    pub monthly: Vec<LabelledBox>,
    pub charts: Vec<PathBuf>,
}

/// Writes `line_plot.html`, `bar_plot.html` and `box_plot.html` and returns
/// the box statistics behind the box plots.
pub fn run_page_views(csv: &Path, config: &AnalysisConfig) -> Result<PageViewSummary> {
    validate_csv_file(csv)?;
    let raw = read_page_views(csv)?;
    let views = clean(&raw, &config.page_views)?;

    let averages = monthly_averages(&views);
    let yearly = yearly_distribution(&views)?;
    let monthly = monthly_distribution(&views)?;

    ensure_output_dir(&config.output_dir)?;
    let line = config.output_dir.join("line_plot.html");
    let bar = config.output_dir.join("bar_plot.html");
    let boxes = config.output_dir.join("box_plot.html");
    write_plot_html(&plot_page_views_line(&views), &line)?;
    write_plot_html(&plot_monthly_averages_bar(&averages), &bar)?;
    write_plot_html(&plot_page_view_boxes(&yearly, &monthly), &boxes)?;

    Ok(PageViewSummary {
        total_days: raw.len(),
        kept_days: views.len(),
        yearly: yearly.iter().map(LabelledBox::from).collect(),
        monthly: monthly.iter().map(LabelledBox::from).collect(),
        charts: vec![line, bar, boxes],
    })
}

/// Fitted lines printed by `dalab sea-level`.
#[derive(Debug, Clone, Serialize)]
pub struct SeaLevelSummary {
    pub all_data: LinearFit,
    pub recent: LinearFit,
    pub recent_start_year: i32,
    pub projection_end_year: i32,
    pub projected_all_data: f64,
    pub projected_recent: f64,
    pub plot: PathBuf,
}

/// Writes `sea_level_plot.html` and returns both fits with their projections.
pub fn run_sea_level(csv: &Path, config: &AnalysisConfig) -> Result<SeaLevelSummary> {
    validate_csv_file(csv)?;
    let observations = read_sea_levels(csv)?;
    let projection = analyze(&observations, &config.sea_level)?;

    ensure_output_dir(&config.output_dir)?;
    let plot = config.output_dir.join("sea_level_plot.html");
    write_plot_html(&plot_sea_level(&observations, &projection), &plot)?;

    let end = config.sea_level.projection_end_year;
    Ok(SeaLevelSummary {
        all_data: projection.all_data,
        recent: projection.recent,
        recent_start_year: projection.recent_start_year,
        projection_end_year: end,
        projected_all_data: projection.predict_all(end),
        projected_recent: projection.predict_recent(end),
        plot,
    })
}
