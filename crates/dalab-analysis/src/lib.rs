//! dalab-analysis: small statistical analyses over tabular datasets.
//!
//! The core is [`matrix_stats`], which reduces nine numbers arranged as a
//! 3x3 matrix along columns, rows and overall. The remaining modules answer
//! questions about individual CSV datasets (census extract, medical
//! examinations, forum page views, sea level) and turn the results into
//! plotly charts.
//!
//! Every analysis is a pure function of its input rows and configuration.
pub mod config;
pub mod demographic;
pub mod error;
pub mod io;
pub mod matrix_stats;
pub mod medical;
pub mod page_views;
pub mod report;
pub mod sea_level;
pub mod stats;

pub use error::{StatsError, StatsResult};
pub use matrix_stats::{calculate, AxisStatistics, MatrixStatistics, Statistic};
