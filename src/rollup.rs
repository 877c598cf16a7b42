use crate::buckets::MonthBucket;
use crate::calculations::capacity_index::CapacityIndex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One bucket of the portfolio-wide supply/demand series, rounded for chart
/// consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPeriod {
    pub month_key: String,
    pub label: String,
    pub capacity_hours: i64,
    pub demand_hours: i64,
    pub utilization_pct: i64,
}

/// One row of the role utilization ranking, most-loaded role first.
/// Utilization stays an unrounded float so close roles still rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleUtilization {
    pub role: String,
    pub capacity_hours: f64,
    pub demand_hours: i64,
    pub utilization_pct: f64,
}

/// One row per bucket, in horizon order. Utilization reports 0 when the
/// bucket has no capacity.
pub fn portfolio_series(index: &CapacityIndex, buckets: &[MonthBucket]) -> Vec<PortfolioPeriod> {
    buckets
        .iter()
        .map(|bucket| {
            let totals = index
                .bucket_totals
                .get(&bucket.key)
                .cloned()
                .unwrap_or_default();
            let utilization = if totals.capacity_hours > 0.0 {
                (totals.demand_hours / totals.capacity_hours * 100.0).round() as i64
            } else {
                0
            };
            PortfolioPeriod {
                month_key: bucket.key.clone(),
                label: bucket.label.clone(),
                capacity_hours: totals.capacity_hours.round() as i64,
                demand_hours: totals.demand_hours.round() as i64,
                utilization_pct: utilization,
            }
        })
        .collect()
}

/// One row per role, sorted descending by utilization with a role-name
/// tiebreak so identical inputs always rank identically.
pub fn role_ranking(index: &CapacityIndex) -> Vec<RoleUtilization> {
    let mut rows: Vec<RoleUtilization> = index
        .role_totals
        .iter()
        .map(|(role, totals)| {
            let utilization = if totals.capacity_hours > 0.0 {
                totals.demand_hours / totals.capacity_hours * 100.0
            } else {
                0.0
            };
            RoleUtilization {
                role: role.clone(),
                capacity_hours: totals.capacity_hours,
                demand_hours: totals.demand_hours.round() as i64,
                utilization_pct: utilization,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.utilization_pct
            .partial_cmp(&a.utilization_pct)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.role.cmp(&b.role))
    });
    rows
}

/// Raw resource-by-month demand hours, for heatmap-style views. Per-cell
/// utilization is left to the consumer (demand / resource capacity).
pub fn demand_matrix(index: &CapacityIndex) -> HashMap<String, HashMap<String, f64>> {
    index.resource_monthly_demand.clone()
}
