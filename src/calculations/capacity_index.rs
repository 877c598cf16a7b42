use crate::buckets::MonthBucket;
use crate::resource::Resource;
use std::collections::HashMap;

/// Per-role capacity and demand totals across the whole horizon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleTotals {
    pub capacity_hours: f64,
    pub demand_hours: f64,
}

/// Portfolio-wide capacity and demand totals for one month bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketTotals {
    pub capacity_hours: f64,
    pub demand_hours: f64,
}

/// Supply-side index over the active roster, with every demand cell seeded
/// to zero so the demand pass can accumulate without missing-key checks.
///
/// Built fresh for every planning run; nothing is shared across invocations.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityIndex {
    /// resource id -> month key -> accumulated demand hours
    pub resource_monthly_demand: HashMap<String, HashMap<String, f64>>,
    /// resource id -> effective monthly capacity hours
    pub resource_capacity: HashMap<String, f64>,
    /// resource id -> resolved role name
    pub resource_role: HashMap<String, String>,
    /// role -> capacity/demand totals, capacity counted once per (resource, bucket)
    pub role_totals: HashMap<String, RoleTotals>,
    /// month key -> portfolio-wide capacity/demand totals
    pub bucket_totals: HashMap<String, BucketTotals>,
}

impl CapacityIndex {
    /// Index every active resource across `buckets`. Inactive resources are
    /// invisible to all maps.
    pub fn build(resources: &[Resource], buckets: &[MonthBucket]) -> Self {
        let mut index = Self {
            resource_monthly_demand: HashMap::new(),
            resource_capacity: HashMap::new(),
            resource_role: HashMap::new(),
            role_totals: HashMap::new(),
            bucket_totals: HashMap::new(),
        };

        for bucket in buckets {
            index.bucket_totals.entry(bucket.key.clone()).or_default();
        }

        for resource in resources {
            if !resource.status.is_active() {
                continue;
            }

            let capacity = resource.monthly_capacity();
            index
                .resource_capacity
                .insert(resource.id.clone(), capacity);
            index
                .resource_role
                .insert(resource.id.clone(), resource.role_name().to_string());

            let monthly = index
                .resource_monthly_demand
                .entry(resource.id.clone())
                .or_default();
            let role = index
                .role_totals
                .entry(resource.role_name().to_string())
                .or_default();

            for bucket in buckets {
                monthly.entry(bucket.key.clone()).or_insert(0.0);
                role.capacity_hours += capacity;
                if let Some(totals) = index.bucket_totals.get_mut(&bucket.key) {
                    totals.capacity_hours += capacity;
                }
            }
        }

        index
    }

    pub fn contains_resource(&self, resource_id: &str) -> bool {
        self.resource_capacity.contains_key(resource_id)
    }
}
