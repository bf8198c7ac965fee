use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

/// Central configuration for all analyses in the crate.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory charts and reports are written to.
    pub output_dir: PathBuf,
    pub demographic: DemographicConfig,
    pub medical: MedicalConfig,
    pub page_views: PageViewConfig,
    pub sea_level: SeaLevelConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            demographic: DemographicConfig::default(),
            medical: MedicalConfig::default(),
            page_views: PageViewConfig::default(),
            sea_level: SeaLevelConfig::default(),
        }
    }
}

/// Labels used to slice the census extract.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct DemographicConfig {
    /// Salary label marking the high earners.
    pub rich_label: String,
    pub bachelors_label: String,
    /// Education levels counted as advanced education.
    pub advanced_education: Vec<String>,
    pub male_label: String,
    /// Country whose top occupation among high earners is reported.
    pub country_of_interest: String,
}

impl Default for DemographicConfig {
    fn default() -> Self {
        Self {
            rich_label: ">50K".to_string(),
            bachelors_label: "Bachelors".to_string(),
            advanced_education: vec![
                "Bachelors".to_string(),
                "Masters".to_string(),
                "Doctorate".to_string(),
            ],
            male_label: "Male".to_string(),
            country_of_interest: "India".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct MedicalConfig {
    /// BMI above which a patient counts as overweight.
    pub bmi_threshold: f64,
    /// Quantiles bounding the height and weight kept for the heat map.
    pub lower_quantile: f64,
    pub upper_quantile: f64,
}

impl Default for MedicalConfig {
    fn default() -> Self {
        Self {
            bmi_threshold: 25.0,
            lower_quantile: 0.025,
            upper_quantile: 0.975,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct PageViewConfig {
    /// Quantiles bounding the daily page views kept after cleaning.
    pub lower_quantile: f64,
    pub upper_quantile: f64,
}

impl Default for PageViewConfig {
    fn default() -> Self {
        Self {
            lower_quantile: 0.025,
            upper_quantile: 0.975,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct SeaLevelConfig {
    /// First year of the second, recent-data fit.
    pub recent_start_year: i32,
    /// Last year (inclusive) the fitted lines are projected to.
    pub projection_end_year: i32,
}

impl Default for SeaLevelConfig {
    fn default() -> Self {
        Self {
            recent_start_year: 2000,
            projection_end_year: 2050,
        }
    }
}

/// The analyses provided by the crate.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisKind {
    MeanVarStd,
    Demographic,
    Medical,
    PageViews,
    SeaLevel,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::MeanVarStd => "mean-var-std",
            AnalysisKind::Demographic => "demographic",
            AnalysisKind::Medical => "medical",
            AnalysisKind::PageViews => "page-views",
            AnalysisKind::SeaLevel => "sea-level",
        }
    }
}

impl FromStr for AnalysisKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "mean-var-std" => Ok(AnalysisKind::MeanVarStd),
            "demographic" => Ok(AnalysisKind::Demographic),
            "medical" => Ok(AnalysisKind::Medical),
            "page-views" => Ok(AnalysisKind::PageViews),
            "sea-level" => Ok(AnalysisKind::SeaLevel),
            _ => Err(format!(
                "Unknown analysis: {}. Expected one of mean-var-std, demographic, medical, page-views, sea-level",
                s
            )),
        }
    }
}

/// Load an analysis configuration from a JSON file.
///
/// Missing fields fall back to their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AnalysisConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: AnalysisConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
