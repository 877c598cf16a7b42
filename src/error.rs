use polars::prelude::PolarsError;
use serde_json::Error as SerdeJsonError;
use std::fmt;

#[derive(Debug)]
pub enum CapacityError {
    InvalidHorizon { months: i64 },
    DataFrame(PolarsError),
    Serialization(SerdeJsonError),
    InvalidData(String),
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityError::InvalidHorizon { months } => write!(
                f,
                "planning horizon must be at least one month (got {months})"
            ),
            CapacityError::DataFrame(err) => write!(f, "dataframe conversion error: {err}"),
            CapacityError::Serialization(err) => write!(f, "serialization error: {err}"),
            CapacityError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for CapacityError {}

impl From<PolarsError> for CapacityError {
    fn from(value: PolarsError) -> Self {
        Self::DataFrame(value)
    }
}

impl From<SerdeJsonError> for CapacityError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

pub type CapacityResult<T> = Result<T, CapacityError>;
