use plotly::common::{Line, Marker, Mode, Title};
use plotly::layout::{Annotation, Axis, BarMode, GridPattern, Layout, LayoutGrid, Legend};
use plotly::{Bar, BoxPlot, HeatMap, Plot, Scatter};

use crate::medical::{CategoryCount, CorrelationMatrix, Feature};
use crate::page_views::{Distribution, PageView, YearMonthlyAverages, MONTH_NAMES};
use crate::sea_level::{SeaLevelObservation, SeaLevelProjection};

fn side_by_side() -> LayoutGrid {
    LayoutGrid::new()
        .rows(1)
        .columns(2)
        .pattern(GridPattern::Independent)
}

/// Grouped bar chart of feature counts, one panel per cardio outcome.
pub fn plot_categorical_counts(counts: &[CategoryCount]) -> Plot {
    let mut plot = Plot::new();
    let variables: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();

    for (panel, cardio) in [0u8, 1].into_iter().enumerate() {
        let (x_axis, y_axis) = if panel == 0 { ("x", "y") } else { ("x2", "y2") };
        for value in [0u8, 1] {
            let totals: Vec<usize> = Feature::ALL
                .iter()
                .map(|&feature| {
                    counts
                        .iter()
                        .find(|c| c.cardio == cardio && c.variable == feature && c.value == value)
                        .map_or(0, |c| c.total)
                })
                .collect();
            let trace = Bar::new(variables.clone(), totals)
                .name(format!("value = {}", value))
                .legend_group(format!("value{}", value))
                .show_legend(panel == 0)
                .x_axis(x_axis)
                .y_axis(y_axis);
            plot.add_trace(trace);
        }
    }

    plot.set_layout(
        Layout::new()
            .title("Feature counts by cardio outcome (cardio = 0 | cardio = 1)")
            .grid(side_by_side())
            .bar_mode(BarMode::Group)
            .x_axis(Axis::new().title("variable"))
            .y_axis(Axis::new().title("total"))
            .x_axis2(Axis::new().title("variable"))
            .y_axis2(Axis::new().title("total")),
    );
    plot
}

/// One-decimal labels for the visible cells of a correlation matrix.
fn correlation_labels(corr: &CorrelationMatrix, visible: &[Vec<Option<f64>>]) -> Vec<Annotation> {
    let mut annotations = Vec::new();
    for (row, values) in visible.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            if let Some(r) = value {
                annotations.push(
                    Annotation::new()
                        .x(corr.labels[col].as_str())
                        .y(corr.labels[row].as_str())
                        .text(format!("{:.1}", r))
                        .show_arrow(false),
                );
            }
        }
    }
    annotations
}

/// Heat map of the lower triangle of a correlation matrix, each visible cell
/// labelled with its value.
pub fn plot_correlation_heat_map(corr: &CorrelationMatrix) -> Plot {
    let visible = corr.visible_values();
    let annotations = correlation_labels(corr, &visible);
    let trace = HeatMap::new(corr.labels.clone(), corr.labels.clone(), visible).zmid(0.0);

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(
        Layout::new()
            .title("Correlation matrix")
            .annotations(annotations),
    );
    plot
}

/// Line chart of the daily page views.
pub fn plot_page_views_line(views: &[PageView]) -> Plot {
    let dates: Vec<String> = views.iter().map(|v| v.date.to_string()).collect();
    let values: Vec<f64> = views.iter().map(|v| v.value).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(dates, values)
            .mode(Mode::Lines)
            .name("Page Views")
            .line(Line::new().color("red").width(1.0)),
    );
    plot.set_layout(
        Layout::new()
            .title("Daily freeCodeCamp Forum Page Views 5/2016-12/2019")
            .x_axis(Axis::new().title("Date"))
            .y_axis(Axis::new().title("Page Views")),
    );
    plot
}

/// Bar chart of average daily page views per month, grouped by year.
pub fn plot_monthly_averages_bar(averages: &[YearMonthlyAverages]) -> Plot {
    let years: Vec<String> = averages.iter().map(|a| a.year.to_string()).collect();

    let mut plot = Plot::new();
    for (month0, month_name) in MONTH_NAMES.iter().enumerate() {
        let values: Vec<Option<f64>> = averages.iter().map(|a| a.months[month0]).collect();
        plot.add_trace(Bar::new(years.clone(), values).name(*month_name));
    }
    plot.set_layout(
        Layout::new()
            .bar_mode(BarMode::Group)
            .legend(Legend::new().title(Title::from("Months")))
            .x_axis(Axis::new().title("Years"))
            .y_axis(Axis::new().title("Average Page Views")),
    );
    plot
}

/// Year-wise (trend) and month-wise (seasonality) box plots side by side.
pub fn plot_page_view_boxes(yearly: &[Distribution], monthly: &[Distribution]) -> Plot {
    let mut plot = Plot::new();
    for dist in yearly {
        plot.add_trace(
            BoxPlot::<f64, f64>::new(dist.values.clone())
                .name(dist.label.as_str())
                .x_axis("x")
                .y_axis("y"),
        );
    }
    for dist in monthly {
        plot.add_trace(
            BoxPlot::<f64, f64>::new(dist.values.clone())
                .name(dist.label.as_str())
                .x_axis("x2")
                .y_axis("y2"),
        );
    }
    plot.set_layout(
        Layout::new()
            .title("Year-wise Box Plot (Trend) | Month-wise Box Plot (Seasonality)")
            .grid(side_by_side())
            .show_legend(false)
            .x_axis(Axis::new().title("Year"))
            .y_axis(Axis::new().title("Page Views"))
            .x_axis2(Axis::new().title("Month"))
            .y_axis2(Axis::new().title("Page Views")),
    );
    plot
}

/// Scatter of the observed levels with both projected fit lines.
pub fn plot_sea_level(observations: &[SeaLevelObservation], projection: &SeaLevelProjection) -> Plot {
    let years: Vec<i32> = observations.iter().map(|o| o.year).collect();
    let levels: Vec<f64> = observations.iter().map(|o| o.level).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(years, levels)
            .mode(Mode::Markers)
            .name("Data")
            .marker(Marker::new().color("blue").size(5)),
    );
    plot.add_trace(
        Scatter::new(projection.years.clone(), projection.all_data_line.clone())
            .mode(Mode::Lines)
            .name("Fit: All Data")
            .line(Line::new().color("red")),
    );
    plot.add_trace(
        Scatter::new(projection.years.clone(), projection.recent_line.clone())
            .mode(Mode::Lines)
            .name(format!("Fit: Since {}", projection.recent_start_year))
            .line(Line::new().color("green")),
    );
    plot.set_layout(
        Layout::new()
            .title("Rise in Sea Level")
            .x_axis(Axis::new().title("Year"))
            .y_axis(Axis::new().title("Sea Level (inches)")),
    );
    plot
}
