//! Medical examination data (`medical_examination.csv`): feature counts per
//! cardiovascular outcome and a correlation matrix of the cleaned table.
use std::collections::BTreeMap;

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::config::MedicalConfig;
use crate::error::{StatsError, StatsResult};
use crate::stats::{pearson, quantile_bounds};

/// One row of the examination table, as recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: u64,
    /// Age in days.
    pub age: u32,
    pub sex: u8,
    /// Height in centimetres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// Systolic blood pressure.
    pub ap_hi: i64,
    /// Diastolic blood pressure.
    pub ap_lo: i64,
    pub cholesterol: u8,
    pub gluc: u8,
    pub smoke: u8,
    pub alco: u8,
    pub active: u8,
    pub cardio: u8,
}

/// An examination with the derived `overweight` flag, where `cholesterol`
/// and `gluc` are normalised so 0 is always good and 1 always bad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Examination {
    pub id: u64,
    pub age: u32,
    pub sex: u8,
    pub height: f64,
    pub weight: f64,
    pub ap_hi: i64,
    pub ap_lo: i64,
    pub cholesterol: u8,
    pub gluc: u8,
    pub smoke: u8,
    pub alco: u8,
    pub active: u8,
    pub cardio: u8,
    pub overweight: u8,
}

/// Column order of [`Examination::as_row`] and of the correlation matrix.
pub const CORRELATION_COLUMNS: [&str; 14] = [
    "id",
    "age",
    "sex",
    "height",
    "weight",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
    "cardio",
    "overweight",
];

impl Examination {
    pub fn from_record(record: &MedicalRecord, config: &MedicalConfig) -> Self {
        let height_m = record.height / 100.0;
        let bmi = record.weight / (height_m * height_m);
        let normalise = |level: u8| if level == 1 { 0 } else { 1 };
        Examination {
            id: record.id,
            age: record.age,
            sex: record.sex,
            height: record.height,
            weight: record.weight,
            ap_hi: record.ap_hi,
            ap_lo: record.ap_lo,
            cholesterol: normalise(record.cholesterol),
            gluc: normalise(record.gluc),
            smoke: record.smoke,
            alco: record.alco,
            active: record.active,
            cardio: record.cardio,
            overweight: (bmi > config.bmi_threshold) as u8,
        }
    }

    /// All columns as numbers, in [`CORRELATION_COLUMNS`] order.
    pub fn as_row(&self) -> [f64; 14] {
        [
            self.id as f64,
            self.age as f64,
            self.sex as f64,
            self.height,
            self.weight,
            self.ap_hi as f64,
            self.ap_lo as f64,
            self.cholesterol as f64,
            self.gluc as f64,
            self.smoke as f64,
            self.alco as f64,
            self.active as f64,
            self.cardio as f64,
            self.overweight as f64,
        ]
    }
}

/// Derive examinations from raw records.
pub fn prepare(records: &[MedicalRecord], config: &MedicalConfig) -> Vec<Examination> {
    records
        .iter()
        .map(|r| Examination::from_record(r, config))
        .collect()
}

/// Binary lifestyle/health features compared across cardio outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Active,
    Alco,
    Cholesterol,
    Gluc,
    Overweight,
    Smoke,
}

impl Feature {
    /// Alphabetical, which is also the chart order.
    pub const ALL: [Feature; 6] = [
        Feature::Active,
        Feature::Alco,
        Feature::Cholesterol,
        Feature::Gluc,
        Feature::Overweight,
        Feature::Smoke,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Active => "active",
            Feature::Alco => "alco",
            Feature::Cholesterol => "cholesterol",
            Feature::Gluc => "gluc",
            Feature::Overweight => "overweight",
            Feature::Smoke => "smoke",
        }
    }

    pub fn value(self, exam: &Examination) -> u8 {
        match self {
            Feature::Active => exam.active,
            Feature::Alco => exam.alco,
            Feature::Cholesterol => exam.cholesterol,
            Feature::Gluc => exam.gluc,
            Feature::Overweight => exam.overweight,
            Feature::Smoke => exam.smoke,
        }
    }
}

/// Number of examinations with `variable == value` for one cardio outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub cardio: u8,
    pub variable: Feature,
    pub value: u8,
    pub total: usize,
}

/// Melt the features into (cardio, variable, value) triples and count them.
///
/// Ordered by cardio, then variable name, then value.
pub fn categorical_counts(exams: &[Examination]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<(u8, Feature, u8), usize> = BTreeMap::new();
    for exam in exams {
        for feature in Feature::ALL {
            *counts
                .entry((exam.cardio, feature, feature.value(exam)))
                .or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|((cardio, variable, value), total)| CategoryCount {
            cardio,
            variable,
            value,
            total,
        })
        .collect()
}

/// Pairwise Pearson correlations with the upper triangle (diagonal
/// included) masked out.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Array2<f64>,
    pub mask: Array2<bool>,
    /// Rows left after cleaning.
    pub n_rows: usize,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let r = self.labels.iter().position(|l| l == row)?;
        let c = self.labels.iter().position(|l| l == col)?;
        Some(self.values[(r, c)])
    }

    /// Values with masked and undefined cells set to `None`, row by row.
    pub fn visible_values(&self) -> Vec<Vec<Option<f64>>> {
        self.values
            .outer_iter()
            .zip(self.mask.outer_iter())
            .map(|(values, mask)| {
                values
                    .iter()
                    .zip(mask.iter())
                    .map(|(&v, &hidden)| if hidden || v.is_nan() { None } else { Some(v) })
                    .collect()
            })
            .collect()
    }
}

/// Clean the examinations and correlate every pair of columns.
///
/// Kept rows have `ap_lo <= ap_hi` and height and weight inside the
/// configured quantiles of the full table.
pub fn heat_map(exams: &[Examination], config: &MedicalConfig) -> StatsResult<CorrelationMatrix> {
    if exams.is_empty() {
        return Err(StatsError::empty("medical heat map"));
    }
    let heights: Vec<f64> = exams.iter().map(|e| e.height).collect();
    let weights: Vec<f64> = exams.iter().map(|e| e.weight).collect();
    let (h_lo, h_hi) = quantile_bounds(&heights, config.lower_quantile, config.upper_quantile)?;
    let (w_lo, w_hi) = quantile_bounds(&weights, config.lower_quantile, config.upper_quantile)?;

    let kept: Vec<[f64; 14]> = exams
        .iter()
        .filter(|e| e.ap_lo <= e.ap_hi)
        .filter(|e| e.height >= h_lo && e.height <= h_hi)
        .filter(|e| e.weight >= w_lo && e.weight <= w_hi)
        .map(Examination::as_row)
        .collect();
    if kept.is_empty() {
        return Err(StatsError::empty("cleaned medical heat map"));
    }
    log::info!(
        "Heat map keeps {} of {} examinations",
        kept.len(),
        exams.len()
    );

    let n_cols = CORRELATION_COLUMNS.len();
    let table = Array2::from_shape_fn((kept.len(), n_cols), |(r, c)| kept[r][c]);

    let mut values = Array2::<f64>::zeros((n_cols, n_cols));
    for i in 0..n_cols {
        for j in 0..=i {
            let r = pearson(
                table.index_axis(Axis(1), i),
                table.index_axis(Axis(1), j),
            )?;
            // self-correlation is exactly 1 unless the column is constant
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[(i, j)] = r;
            values[(j, i)] = r;
        }
    }
    let mask = Array2::from_shape_fn((n_cols, n_cols), |(i, j)| j >= i);

    Ok(CorrelationMatrix {
        labels: CORRELATION_COLUMNS.iter().map(|s| s.to_string()).collect(),
        values,
        mask,
        n_rows: kept.len(),
    })
}
