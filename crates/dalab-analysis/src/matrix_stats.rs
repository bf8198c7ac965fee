//! Statistics over a 3x3 matrix built from nine values.
//!
//! Each statistic is reported three ways: one value per column (reducing
//! across rows), one value per row (reducing across columns), and one value
//! for the flattened matrix. Variance and standard deviation use the
//! population formulas (divisor = count).
//!
//! All results are `f64`, integer inputs included: a column of integers sums
//! to e.g. `9.0`, never to an integer.
use std::ops::Index;

use serde::ser::{SerializeMap, SerializeTuple};
use serde::{Serialize, Serializer};
use statrs::statistics::Statistics;

use crate::error::{StatsError, StatsResult};

/// Number of rows and columns of the grid.
pub const SIDE: usize = 3;
/// Number of values a grid is built from.
pub const CELLS: usize = SIDE * SIDE;

/// Statistics computed for every axis of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    Mean,
    Variance,
    StandardDeviation,
    Max,
    Min,
    Sum,
}

impl Statistic {
    /// All statistics, in reporting order.
    pub const ALL: [Statistic; 6] = [
        Statistic::Mean,
        Statistic::Variance,
        Statistic::StandardDeviation,
        Statistic::Max,
        Statistic::Min,
        Statistic::Sum,
    ];

    /// Key used when the statistics are reported as a mapping.
    pub fn name(self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Variance => "variance",
            Statistic::StandardDeviation => "standard deviation",
            Statistic::Max => "max",
            Statistic::Min => "min",
            Statistic::Sum => "sum",
        }
    }

    fn reduce<const N: usize>(self, values: [f64; N]) -> f64 {
        match self {
            Statistic::Mean => Statistics::mean(values),
            Statistic::Variance => Statistics::population_variance(values),
            Statistic::StandardDeviation => Statistics::population_std_dev(values),
            Statistic::Max => Statistics::max(values),
            Statistic::Min => Statistics::min(values),
            Statistic::Sum => values.iter().sum(),
        }
    }
}

/// Row-major 3x3 arrangement of nine values: index `i` sits at
/// row `i / 3`, column `i % 3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    cells: [f64; CELLS],
}

impl Grid {
    pub fn from_slice(values: &[f64]) -> StatsResult<Self> {
        let cells: [f64; CELLS] = values
            .try_into()
            .map_err(|_| StatsError::InvalidInput { got: values.len() })?;
        Ok(Grid { cells })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * SIDE + col]
    }

    pub fn row(&self, row: usize) -> [f64; SIDE] {
        std::array::from_fn(|col| self.get(row, col))
    }

    pub fn column(&self, col: usize) -> [f64; SIDE] {
        std::array::from_fn(|row| self.get(row, col))
    }

    pub fn cells(&self) -> [f64; CELLS] {
        self.cells
    }

    /// Reduce the grid along both axes and overall with one statistic.
    pub fn reduce(&self, statistic: Statistic) -> AxisStatistics {
        AxisStatistics {
            columns: std::array::from_fn(|col| statistic.reduce(self.column(col))),
            rows: std::array::from_fn(|row| statistic.reduce(self.row(row))),
            overall: statistic.reduce(self.cells),
        }
    }
}

/// One statistic reported per column, per row and over the flattened grid.
///
/// Serialises as `[[c0, c1, c2], [r0, r1, r2], overall]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStatistics {
    pub columns: [f64; SIDE],
    pub rows: [f64; SIDE],
    pub overall: f64,
}

impl Serialize for AxisStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.columns)?;
        tuple.serialize_element(&self.rows)?;
        tuple.serialize_element(&self.overall)?;
        tuple.end()
    }
}

/// The full set of statistics for one grid.
///
/// Serialises as a mapping keyed by [`Statistic::name`], in the order of
/// [`Statistic::ALL`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixStatistics {
    values: [AxisStatistics; 6],
}

impl MatrixStatistics {
    pub fn get(&self, statistic: Statistic) -> &AxisStatistics {
        &self.values[statistic as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Statistic, &AxisStatistics)> {
        Statistic::ALL.into_iter().zip(self.values.iter())
    }
}

impl Index<Statistic> for MatrixStatistics {
    type Output = AxisStatistics;

    fn index(&self, statistic: Statistic) -> &Self::Output {
        self.get(statistic)
    }
}

impl Serialize for MatrixStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (statistic, values) in self.iter() {
            map.serialize_entry(statistic.name(), values)?;
        }
        map.end()
    }
}

/// Compute mean, variance, standard deviation, max, min and sum of the
/// 3x3 matrix formed by `values` in row-major order.
///
/// # Errors
///
/// [`StatsError::InvalidInput`] unless `values` holds exactly nine numbers.
pub fn calculate(values: &[f64]) -> StatsResult<MatrixStatistics> {
    let grid = Grid::from_slice(values)?;
    log::debug!("Computing matrix statistics for {:?}", grid.cells());
    Ok(MatrixStatistics {
        values: Statistic::ALL.map(|statistic| grid.reduce(statistic)),
    })
}

/// Like [`calculate`] for any input losslessly convertible to `f64`
/// (`i32`, `u32`, `f32`, ...). Results are still reported as `f64`.
pub fn calculate_from<T>(values: &[T]) -> StatsResult<MatrixStatistics>
where
    T: Copy + Into<f64>,
{
    let values: Vec<f64> = values.iter().map(|&v| v.into()).collect();
    calculate(&values)
}
