//! Daily freeCodeCamp forum page views (`fcc-forum-pageviews.csv`).
//!
//! The series is cleaned of its extreme days, then summarised per month
//! (bar chart) and per year/month distribution (box plots).
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::PageViewConfig;
use crate::error::{StatsError, StatsResult};
use crate::stats::{quantile, quantile_bounds};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub date: NaiveDate,
    pub value: f64,
}

/// Drop the days whose page views fall outside the configured quantiles.
/// Bounds are inclusive.
pub fn clean(views: &[PageView], config: &PageViewConfig) -> StatsResult<Vec<PageView>> {
    if views.is_empty() {
        return Err(StatsError::empty("page view cleaning"));
    }
    let values: Vec<f64> = views.iter().map(|v| v.value).collect();
    let (lower, upper) = quantile_bounds(&values, config.lower_quantile, config.upper_quantile)?;
    let cleaned: Vec<PageView> = views
        .iter()
        .filter(|v| v.value >= lower && v.value <= upper)
        .copied()
        .collect();
    log::info!(
        "Page views kept {} of {} days (bounds {:.1}..={:.1})",
        cleaned.len(),
        views.len(),
        lower,
        upper
    );
    Ok(cleaned)
}

/// Average daily page views of each month of one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearMonthlyAverages {
    pub year: i32,
    /// Indexed by month - 1; `None` for months without data.
    pub months: [Option<f64>; 12],
}

/// Average page views per (year, month), years ascending.
pub fn monthly_averages(views: &[PageView]) -> Vec<YearMonthlyAverages> {
    let mut sums: BTreeMap<i32, [(f64, usize); 12]> = BTreeMap::new();
    for view in views {
        let months = sums.entry(view.date.year()).or_insert([(0.0, 0); 12]);
        let slot = &mut months[view.date.month0() as usize];
        slot.0 += view.value;
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(year, months)| YearMonthlyAverages {
            year,
            months: months.map(|(sum, n)| (n > 0).then(|| sum / n as f64)),
        })
        .collect()
}

/// Box plot statistics: quartiles (linear interpolation) and whiskers
/// at the most extreme values within 1.5 IQR of the box.
///
/// The box plot chart derives its own boxes from the raw values; this is the
/// numeric form of the same summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> StatsResult<Self> {
        let q1 = quantile(values, 0.25)?;
        let median = quantile(values, 0.5)?;
        let q3 = quantile(values, 0.75)?;
        let reach = 1.5 * (q3 - q1);
        let lower_whisker = values
            .iter()
            .copied()
            .filter(|&v| v >= q1 - reach)
            .fold(f64::INFINITY, f64::min);
        let upper_whisker = values
            .iter()
            .copied()
            .filter(|&v| v <= q3 + reach)
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(BoxSummary {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
        })
    }
}

/// Page views of one group (a year or a month) with their box summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub label: String,
    pub values: Vec<f64>,
    pub summary: BoxSummary,
}

fn distributions<K: Ord>(
    views: &[PageView],
    key: impl Fn(&PageView) -> K,
    label: impl Fn(&K) -> String,
) -> StatsResult<Vec<Distribution>> {
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for view in views {
        groups.entry(key(view)).or_default().push(view.value);
    }
    groups
        .into_iter()
        .map(|(k, values)| -> StatsResult<Distribution> {
            Ok(Distribution {
                label: label(&k),
                summary: BoxSummary::from_values(&values)?,
                values,
            })
        })
        .collect()
}

/// Page views grouped by year (trend), years ascending.
pub fn yearly_distribution(views: &[PageView]) -> StatsResult<Vec<Distribution>> {
    distributions(views, |v| v.date.year(), |year| year.to_string())
}

/// Page views grouped by calendar month (seasonality), January first.
pub fn monthly_distribution(views: &[PageView]) -> StatsResult<Vec<Distribution>> {
    distributions(
        views,
        |v| v.date.month0(),
        |month0| MONTH_ABBREVIATIONS[*month0 as usize].to_string(),
    )
}
