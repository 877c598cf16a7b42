pub mod buckets;
pub mod calculations;
pub mod error;
pub(crate) mod input_validation;
pub mod metadata;
pub mod plan;
pub mod portfolio;
pub mod resource;
pub mod rollup;
pub mod task;

pub use buckets::{MonthBucket, generate_buckets, month_key};
pub use calculations::capacity_index::{BucketTotals, CapacityIndex, RoleTotals};
pub use calculations::conflicts::Conflict;
pub use calculations::demand::DemandPass;
pub use error::{CapacityError, CapacityResult};
pub use metadata::PortfolioMetadata;
pub use plan::{CapacityPlan, PlanSummary};
pub use portfolio::{Portfolio, compute_capacity_plan};
pub use resource::{
    Assignment, DEFAULT_MONTHLY_CAPACITY_HOURS, HOURS_PER_DAY, Resource, ResourceStatus,
    UNASSIGNED_ROLE,
};
pub use rollup::{PortfolioPeriod, RoleUtilization};
pub use task::{Project, Task};
