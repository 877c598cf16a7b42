use crate::buckets::MonthBucket;
use crate::calculations::conflicts::Conflict;
use crate::rollup::{PortfolioPeriod, RoleUtilization};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete output of one planning run: the portfolio series, the role
/// ranking, the resource-by-month demand matrix, and the conflict list.
///
/// Plain ordered data with no behavior beyond reshaping; formatting and
/// interaction belong to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityPlan {
    pub buckets: Vec<MonthBucket>,
    pub portfolio_series: Vec<PortfolioPeriod>,
    pub role_ranking: Vec<RoleUtilization>,
    /// resource id -> month key -> raw demand hours
    pub resource_demand: HashMap<String, HashMap<String, f64>>,
    /// resource id -> effective monthly capacity, so matrix consumers can
    /// derive per-cell utilization without a second engine call.
    pub resource_capacity: HashMap<String, f64>,
    pub conflicts: Vec<Conflict>,
}

impl CapacityPlan {
    /// Resource-by-month demand as a dataframe: one row per resource
    /// (sorted by id), one column per bucket.
    pub fn matrix_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut ids: Vec<&String> = self.resource_demand.keys().collect();
        ids.sort();

        let mut columns: Vec<Column> = Vec::with_capacity(self.buckets.len() + 1);
        let id_values: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        columns.push(Series::new(PlSmallStr::from_static("resource_id"), id_values).into_column());

        for bucket in &self.buckets {
            let values: Vec<f64> = ids
                .iter()
                .map(|id| {
                    self.resource_demand
                        .get(id.as_str())
                        .and_then(|monthly| monthly.get(&bucket.key))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect();
            columns.push(Series::new(bucket.key.as_str().into(), values).into_column());
        }

        DataFrame::new(columns)
    }

    pub fn summarize(&self) -> PlanSummary {
        let peak = self
            .portfolio_series
            .iter()
            .max_by_key(|period| period.utilization_pct);
        PlanSummary {
            bucket_count: self.buckets.len(),
            resource_count: self.resource_capacity.len(),
            conflict_count: self.conflicts.len(),
            peak_utilization_pct: peak.map(|period| period.utilization_pct).unwrap_or(0),
            peak_month: peak.map(|period| period.label.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub bucket_count: usize,
    pub resource_count: usize,
    pub conflict_count: usize,
    pub peak_utilization_pct: i64,
    pub peak_month: Option<String>,
}

impl PlanSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("months={}", self.bucket_count));
        parts.push(format!("resources={}", self.resource_count));
        if self.conflict_count > 0 {
            parts.push(format!("conflicts={}", self.conflict_count));
        }
        if let Some(month) = &self.peak_month {
            parts.push(format!("peak={}@{}%", month, self.peak_utilization_pct));
        }
        parts.join(", ")
    }
}
