//! Sea level rise (`epa-sea-level.csv`): least-squares lines through the
//! CSIRO adjusted series, projected into the future.
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::config::SeaLevelConfig;
use crate::error::{StatsError, StatsResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeaLevelObservation {
    #[serde(rename = "Year")]
    pub year: i32,
    /// Inches above the 1880 reference level.
    #[serde(rename = "CSIRO Adjusted Sea Level")]
    pub level: f64,
}

/// Least-squares line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation between x and y.
    pub r_value: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fit an ordinary least-squares line through `(xs[i], ys[i])`.
///
/// # Errors
///
/// [`StatsError::InsufficientData`] with fewer than two points or when all
/// `xs` are equal; [`StatsError::LengthMismatch`] when the lengths differ.
pub fn linregress(xs: &[f64], ys: &[f64]) -> StatsResult<LinearFit> {
    if xs.len() != ys.len() {
        return Err(StatsError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            got: xs.len(),
            context: "linear regression".to_string(),
        });
    }
    let x_var = Statistics::population_variance(xs);
    if x_var == 0.0 {
        return Err(StatsError::InsufficientData {
            required: 2,
            got: 1,
            context: "linear regression (distinct x values)".to_string(),
        });
    }
    let cov = Statistics::population_covariance(xs, ys);
    let slope = cov / x_var;
    let intercept = Statistics::mean(ys) - slope * Statistics::mean(xs);
    let y_std = Statistics::population_std_dev(ys);
    let r_value = if y_std == 0.0 {
        0.0
    } else {
        cov / (x_var.sqrt() * y_std)
    };
    Ok(LinearFit {
        slope,
        intercept,
        r_value,
    })
}

/// Both fitted lines evaluated over the projection years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeaLevelProjection {
    pub all_data: LinearFit,
    pub recent: LinearFit,
    pub recent_start_year: i32,
    /// First observed year through the configured end year, inclusive.
    pub years: Vec<i32>,
    pub all_data_line: Vec<f64>,
    pub recent_line: Vec<f64>,
}

impl SeaLevelProjection {
    /// Level predicted by the all-data fit for `year`.
    pub fn predict_all(&self, year: i32) -> f64 {
        self.all_data.predict(year as f64)
    }

    /// Level predicted by the recent-data fit for `year`.
    pub fn predict_recent(&self, year: i32) -> f64 {
        self.recent.predict(year as f64)
    }
}

fn fit(observations: &[SeaLevelObservation]) -> StatsResult<LinearFit> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = observations
        .iter()
        .map(|o| (o.year as f64, o.level))
        .unzip();
    linregress(&xs, &ys)
}

/// Fit the whole series and the series since `recent_start_year`, and
/// project both lines to `projection_end_year`.
pub fn analyze(
    observations: &[SeaLevelObservation],
    config: &SeaLevelConfig,
) -> StatsResult<SeaLevelProjection> {
    let first_year = observations
        .iter()
        .map(|o| o.year)
        .min()
        .ok_or_else(|| StatsError::empty("sea level projection"))?;

    let all_data = fit(observations)?;
    let recent_obs: Vec<SeaLevelObservation> = observations
        .iter()
        .filter(|o| o.year >= config.recent_start_year)
        .copied()
        .collect();
    let recent = fit(&recent_obs)?;
    log::info!(
        "Sea level slope: {:.4} in/yr overall, {:.4} in/yr since {}",
        all_data.slope,
        recent.slope,
        config.recent_start_year
    );

    let years: Vec<i32> = (first_year..=config.projection_end_year).collect();
    let all_data_line = years.iter().map(|&y| all_data.predict(y as f64)).collect();
    let recent_line = years.iter().map(|&y| recent.predict(y as f64)).collect();

    Ok(SeaLevelProjection {
        all_data,
        recent,
        recent_start_year: config.recent_start_year,
        years,
        all_data_line,
        recent_line,
    })
}
