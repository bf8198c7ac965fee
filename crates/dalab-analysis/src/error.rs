use std::error::Error;
use std::fmt;

/// Result alias for the analyses in this crate.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors raised by the statistical routines.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Matrix input did not hold exactly nine values.
    InvalidInput { got: usize },
    /// No rows where at least one is required.
    EmptyData { context: String },
    /// Not enough usable data points for the computation.
    InsufficientData {
        required: usize,
        got: usize,
        context: String,
    },
    /// Paired series of different lengths.
    LengthMismatch { left: usize, right: usize },
    /// Quantile estimation failed (empty lane or q outside [0, 1]).
    Quantile(String),
}

impl StatsError {
    pub fn empty(context: impl Into<String>) -> Self {
        StatsError::EmptyData {
            context: context.into(),
        }
    }
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatsError::InvalidInput { .. } => write!(f, "List must contain nine numbers."),
            StatsError::EmptyData { context } => write!(f, "No rows available for {}", context),
            StatsError::InsufficientData {
                required,
                got,
                context,
            } => write!(
                f,
                "Insufficient data for {}: need {} points, got {}",
                context, required, got
            ),
            StatsError::LengthMismatch { left, right } => {
                write!(f, "Paired series differ in length: {} vs {}", left, right)
            }
            StatsError::Quantile(msg) => write!(f, "Quantile estimation failed: {}", msg),
        }
    }
}

impl Error for StatsError {}
