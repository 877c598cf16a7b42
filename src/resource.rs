use serde::{Deserialize, Serialize};

/// Nominal working hours per month assumed when a resource carries no
/// explicit capacity.
pub const DEFAULT_MONTHLY_CAPACITY_HOURS: f64 = 160.0;

/// Hours of workload one full-time assignment generates per calendar day.
pub const HOURS_PER_DAY: f64 = 8.0;

/// Role bucket used for resources without an assigned role.
pub const UNASSIGNED_ROLE: &str = "Unassigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    #[default]
    Active,
    Inactive,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Active => "active",
            ResourceStatus::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ResourceStatus::Active)
    }
}

/// A person on the roster that can take on project work. Only active
/// resources contribute capacity or appear in planning output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    /// Role or discipline used for grouped reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub status: ResourceStatus,
    /// Nominal monthly working capacity in hours. Falls back to
    /// [`DEFAULT_MONTHLY_CAPACITY_HOURS`] when unset or non-positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_hours: Option<f64>,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: None,
            status: ResourceStatus::Active,
            capacity_hours: None,
        }
    }

    /// Role used for grouped totals; resources without one share a bucket.
    pub fn role_name(&self) -> &str {
        self.role.as_deref().unwrap_or(UNASSIGNED_ROLE)
    }

    /// Effective monthly capacity in hours.
    pub fn monthly_capacity(&self) -> f64 {
        match self.capacity_hours {
            Some(hours) if hours > 0.0 => hours,
            _ => DEFAULT_MONTHLY_CAPACITY_HOURS,
        }
    }
}

/// Allocation of a resource to a task, expressed as a percentage of full
/// time (100 = full-time equivalent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub resource_id: String,
    pub units: f64,
}

impl Assignment {
    pub fn new(resource_id: impl Into<String>, units: f64) -> Self {
        Self {
            resource_id: resource_id.into(),
            units,
        }
    }

    /// Hours of workload this assignment generates per calendar day.
    /// Zero or negative units schedule no work.
    pub fn daily_load(&self) -> f64 {
        if self.units <= 0.0 {
            0.0
        } else {
            HOURS_PER_DAY * (self.units / 100.0)
        }
    }
}
