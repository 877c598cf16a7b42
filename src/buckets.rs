use crate::error::{CapacityError, CapacityResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single calendar month in the planning horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Canonical `YYYY-MM` key; sorts chronologically as a plain string.
    pub key: String,
    /// Short display label, e.g. `Apr 25`.
    pub label: String,
    /// First day of the month.
    pub start: NaiveDate,
}

/// Canonical map key for the month containing `date`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

pub(crate) fn next_month(start: NaiveDate) -> NaiveDate {
    if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1).unwrap()
    }
}

/// First day after the horizon covered by `buckets`.
pub(crate) fn horizon_end(buckets: &[MonthBucket]) -> Option<NaiveDate> {
    buckets.last().map(|bucket| next_month(bucket.start))
}

/// Generate the ordered sequence of month buckets starting at the month
/// containing `reference_date`.
///
/// The reference date is injected rather than read from the system clock so
/// identical inputs always produce identical buckets.
pub fn generate_buckets(
    reference_date: NaiveDate,
    horizon_months: i64,
) -> CapacityResult<Vec<MonthBucket>> {
    if horizon_months <= 0 {
        return Err(CapacityError::InvalidHorizon {
            months: horizon_months,
        });
    }

    let mut buckets = Vec::with_capacity(horizon_months as usize);
    let mut start = first_of_month(reference_date);
    for _ in 0..horizon_months {
        buckets.push(MonthBucket {
            key: month_key(start),
            label: start.format("%b %y").to_string(),
            start,
        });
        start = next_month(start);
    }
    Ok(buckets)
}
