use crate::buckets::MonthBucket;
use crate::calculations::capacity_index::CapacityIndex;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};

/// A resource whose scheduled demand exceeds capacity in some month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub resource_id: String,
    pub resource_name: String,
    pub role: String,
    /// Canonical key of the first month where demand exceeds capacity.
    pub month_key: String,
    pub month_label: String,
    /// Rounded demand/capacity percentage for the offending month.
    pub utilization_pct: i64,
    /// Rounded hours above capacity.
    pub excess_hours: i64,
}

/// Report each over-allocated resource once, at the first bucket where its
/// demand exceeds capacity. Demand exactly at capacity is not a conflict.
/// Rows follow roster order; callers re-sort for presentation.
pub fn detect_conflicts(
    resources: &[Resource],
    index: &CapacityIndex,
    buckets: &[MonthBucket],
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for resource in resources {
        let Some(capacity) = index.resource_capacity.get(&resource.id).copied() else {
            continue;
        };
        let Some(monthly) = index.resource_monthly_demand.get(&resource.id) else {
            continue;
        };

        for bucket in buckets {
            let demand = monthly.get(&bucket.key).copied().unwrap_or(0.0);
            if demand > capacity {
                let utilization = if capacity > 0.0 {
                    (demand / capacity * 100.0).round() as i64
                } else {
                    0
                };
                conflicts.push(Conflict {
                    resource_id: resource.id.clone(),
                    resource_name: resource.name.clone(),
                    role: resource.role_name().to_string(),
                    month_key: bucket.key.clone(),
                    month_label: bucket.label.clone(),
                    utilization_pct: utilization,
                    excess_hours: (demand - capacity).round() as i64,
                });
                break;
            }
        }
    }

    conflicts
}
