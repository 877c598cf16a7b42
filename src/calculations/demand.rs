use crate::buckets::{self, MonthBucket, month_key};
use crate::calculations::capacity_index::CapacityIndex;
use crate::error::CapacityResult;
use crate::resource::Assignment;
use crate::task::Task;
use chrono::{Datelike, Duration, NaiveDate};
use polars::prelude::*;

/// Distributes scheduled task workload into month buckets, one calendar day
/// at a time.
///
/// Reads task rows straight from the portfolio's dataframe and accumulates
/// into the supplied [`CapacityIndex`]: the resource's month cell, the
/// role's demand total, and the bucket's portfolio-wide demand total all
/// move in the same pass. Nothing is rounded here; rounding happens at
/// output formatting only.
pub struct DemandPass<'a> {
    df: &'a DataFrame,
    buckets: &'a [MonthBucket],
}

impl<'a> DemandPass<'a> {
    pub fn new(df: &'a DataFrame, buckets: &'a [MonthBucket]) -> Self {
        Self { df, buckets }
    }

    pub fn execute(&self, index: &mut CapacityIndex) -> CapacityResult<()> {
        let (Some(horizon_start), Some(horizon_end)) = (
            self.buckets.first().map(|bucket| bucket.start),
            buckets::horizon_end(self.buckets),
        ) else {
            return Ok(());
        };

        if self.df.height() == 0 {
            return Ok(());
        }

        let starts = self.df.column("start_date")?.date()?;
        let ends = self.df.column("end_date")?.date()?;
        let assignments_col = self.df.column("assignments")?.str()?;

        for idx in 0..self.df.height() {
            // Tasks without both dates carry no demand.
            let (Some(start), Some(end)) = (
                Task::date_from_series(starts, idx),
                Task::date_from_series(ends, idx),
            ) else {
                continue;
            };

            // Entirely outside the horizon; skipping cannot change totals.
            if end < horizon_start || start >= horizon_end {
                continue;
            }

            let assignments = Self::assignments_from_row(assignments_col, idx)?;
            if assignments.is_empty() {
                continue;
            }

            for assignment in &assignments {
                // Inactive or unknown resources never reach the totals.
                if !index.contains_resource(&assignment.resource_id) {
                    continue;
                }
                Self::distribute(
                    index,
                    assignment,
                    start,
                    end,
                    horizon_start,
                    horizon_end,
                );
            }
        }

        Ok(())
    }

    /// Apportion one assignment's daily load across the in-horizon days of
    /// its task span. A day on a month boundary belongs to the month that
    /// contains it.
    fn distribute(
        index: &mut CapacityIndex,
        assignment: &Assignment,
        start: NaiveDate,
        end: NaiveDate,
        horizon_start: NaiveDate,
        horizon_end: NaiveDate,
    ) {
        let daily_load = assignment.daily_load();
        let role_name = index.resource_role.get(&assignment.resource_id).cloned();

        let Some(monthly) = index.resource_monthly_demand.get_mut(&assignment.resource_id) else {
            return;
        };

        let mut day = if start < horizon_start {
            horizon_start
        } else {
            start
        };
        let last = if end >= horizon_end {
            horizon_end - Duration::days(1)
        } else {
            end
        };

        // The key string is rebuilt only when the walk crosses a month edge.
        let mut key = month_key(day);
        let mut month = day.month();
        while day <= last {
            if day.month() != month {
                month = day.month();
                key = month_key(day);
            }

            if let Some(cell) = monthly.get_mut(&key) {
                *cell += daily_load;
            }
            if let Some(role) = role_name
                .as_deref()
                .and_then(|name| index.role_totals.get_mut(name))
            {
                role.demand_hours += daily_load;
            }
            if let Some(totals) = index.bucket_totals.get_mut(&key) {
                totals.demand_hours += daily_load;
            }

            day = day + Duration::days(1);
        }
    }

    fn assignments_from_row(
        col: &StringChunked,
        row_idx: usize,
    ) -> CapacityResult<Vec<Assignment>> {
        match col.get(row_idx) {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(raw)?),
            _ => Ok(Vec::new()),
        }
    }
}
