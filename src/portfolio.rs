use crate::buckets;
use crate::calculations::capacity_index::CapacityIndex;
use crate::calculations::conflicts;
use crate::calculations::demand::DemandPass;
use crate::error::{CapacityError, CapacityResult};
use crate::input_validation::{self, InputValidationError};
use crate::metadata::PortfolioMetadata;
use crate::plan::CapacityPlan;
use crate::resource::Resource;
use crate::rollup;
use crate::task::{Project, Task};
use chrono::NaiveDate;
use polars::prelude::*;

/// Mutable record container for a planning portfolio: the task table (a
/// dataframe), the resource roster, and the project list.
///
/// The planning pipeline itself never reads this state directly; `plan`
/// hands immutable snapshots to the pure passes.
pub struct Portfolio {
    df: DataFrame,
    roster: Vec<Resource>,
    projects: Vec<Project>,
    metadata: PortfolioMetadata,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::new_with_metadata(PortfolioMetadata::default())
    }

    pub fn new_with_metadata(metadata: PortfolioMetadata) -> Self {
        let schema = Self::default_schema();
        Self {
            df: DataFrame::empty_with_schema(&schema),
            roster: Vec::new(),
            projects: Vec::new(),
            metadata,
        }
    }

    pub(crate) fn default_schema() -> Schema {
        Schema::from_iter(vec![
            Field::new("id".into(), DataType::Int32),
            Field::new("name".into(), DataType::String),
            Field::new("project_id".into(), DataType::Int32),
            Field::new("start_date".into(), DataType::Date),
            Field::new("end_date".into(), DataType::Date),
            Field::new("assignments".into(), DataType::String),
        ])
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn metadata(&self) -> &PortfolioMetadata {
        &self.metadata
    }

    pub fn set_portfolio_name(&mut self, name: impl Into<String>) {
        self.metadata.portfolio_name = name.into();
    }

    pub fn set_portfolio_description(&mut self, description: impl Into<String>) {
        self.metadata.portfolio_description = description.into();
    }

    pub fn roster(&self) -> &[Resource] {
        &self.roster
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    fn validation_error(err: InputValidationError) -> CapacityError {
        CapacityError::InvalidData(err.to_string())
    }

    /// Replace the whole roster. Rejects duplicate ids and malformed
    /// resources before anything is applied.
    pub fn set_roster(&mut self, roster: Vec<Resource>) -> CapacityResult<()> {
        input_validation::validate_roster(&roster).map_err(Self::validation_error)?;
        self.roster = roster;
        Ok(())
    }

    pub fn upsert_resource(&mut self, resource: Resource) -> CapacityResult<()> {
        input_validation::validate_resource(&resource).map_err(Self::validation_error)?;
        if let Some(existing) = self
            .roster
            .iter_mut()
            .find(|candidate| candidate.id == resource.id)
        {
            *existing = resource;
        } else {
            self.roster.push(resource);
        }
        Ok(())
    }

    pub fn remove_resource(&mut self, resource_id: &str) -> bool {
        let before = self.roster.len();
        self.roster.retain(|resource| resource.id != resource_id);
        self.roster.len() != before
    }

    pub fn upsert_project(&mut self, project: Project) {
        if let Some(existing) = self
            .projects
            .iter_mut()
            .find(|candidate| candidate.id == project.id)
        {
            *existing = project;
        } else {
            self.projects.push(project);
        }
    }

    pub fn tasks(&self) -> CapacityResult<Vec<Task>> {
        let df = self.dataframe();
        let mut tasks = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            tasks.push(Task::from_dataframe_row(df, idx)?);
        }
        Ok(tasks)
    }

    pub fn find_task(&self, task_id: i32) -> CapacityResult<Option<Task>> {
        if self.df.height() == 0 {
            return Ok(None);
        }
        let ids = self.df.column("id")?.i32()?;
        for (idx, id_opt) in ids.into_iter().enumerate() {
            if id_opt == Some(task_id) {
                let task = Task::from_dataframe_row(self.dataframe(), idx)?;
                return Ok(Some(task));
            }
        }
        Ok(None)
    }

    /// Insert a task or replace an existing row with the same id.
    pub fn upsert_task_record(&mut self, task: Task) -> CapacityResult<()> {
        input_validation::validate_task(&task).map_err(Self::validation_error)?;

        let id_exists = if self.df.height() == 0 {
            false
        } else {
            self.df
                .column("id")?
                .i32()?
                .into_iter()
                .any(|value| value == Some(task.id))
        };

        if id_exists {
            self.df = self
                .df
                .clone()
                .lazy()
                .filter(col("id").neq(lit(task.id)))
                .collect()?;
        }

        let new_row = task.to_dataframe_row()?;
        self.df = self.df.vstack(&new_row)?;
        Ok(())
    }

    /// Convenience upsert for the common fields; assignments are edited via
    /// `upsert_task_record`.
    pub fn upsert_task(
        &mut self,
        id: i32,
        name: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> CapacityResult<()> {
        let mut task = match self.find_task(id)? {
            Some(existing) => existing,
            None => Task::new(id, name),
        };
        task.name = name.to_string();
        task.start_date = start_date;
        task.end_date = end_date;
        self.upsert_task_record(task)
    }

    pub fn delete_task(&mut self, task_id: i32) -> CapacityResult<bool> {
        if self.df.height() == 0 {
            return Ok(false);
        }
        let found = self
            .df
            .column("id")?
            .i32()?
            .into_iter()
            .any(|value| value == Some(task_id));
        if !found {
            return Ok(false);
        }
        self.df = self
            .df
            .clone()
            .lazy()
            .filter(col("id").neq(lit(task_id)))
            .collect()?;
        Ok(true)
    }

    /// Run the full supply/demand reconciliation over this portfolio's
    /// current state.
    ///
    /// `reference_date` anchors the horizon at the month containing it;
    /// `horizon_months` must be positive. Each call builds its own
    /// accumulator, so concurrent callers never share state.
    pub fn plan(
        &self,
        reference_date: NaiveDate,
        horizon_months: i64,
    ) -> CapacityResult<CapacityPlan> {
        plan_from_parts(&self.roster, &self.df, reference_date, horizon_months)
    }
}

/// Pure function-call boundary for callers that keep records elsewhere:
/// validates the snapshots, builds the task frame, and runs the same
/// pipeline as [`Portfolio::plan`].
pub fn compute_capacity_plan(
    resources: &[Resource],
    tasks: &[Task],
    reference_date: NaiveDate,
    horizon_months: i64,
) -> CapacityResult<CapacityPlan> {
    input_validation::validate_roster(resources)
        .map_err(|err| CapacityError::InvalidData(err.to_string()))?;
    input_validation::validate_task_collection(tasks)
        .map_err(|err| CapacityError::InvalidData(err.to_string()))?;

    let mut df = DataFrame::empty_with_schema(&Portfolio::default_schema());
    for task in tasks {
        df = df.vstack(&task.to_dataframe_row()?)?;
    }

    plan_from_parts(resources, &df, reference_date, horizon_months)
}

fn plan_from_parts(
    roster: &[Resource],
    df: &DataFrame,
    reference_date: NaiveDate,
    horizon_months: i64,
) -> CapacityResult<CapacityPlan> {
    let month_buckets = buckets::generate_buckets(reference_date, horizon_months)?;

    let mut index = CapacityIndex::build(roster, &month_buckets);
    DemandPass::new(df, &month_buckets).execute(&mut index)?;

    let conflict_rows = conflicts::detect_conflicts(roster, &index, &month_buckets);
    let portfolio_series = rollup::portfolio_series(&index, &month_buckets);
    let role_ranking = rollup::role_ranking(&index);
    let resource_demand = rollup::demand_matrix(&index);

    Ok(CapacityPlan {
        buckets: month_buckets,
        portfolio_series,
        role_ranking,
        resource_demand,
        resource_capacity: index.resource_capacity,
        conflicts: conflict_rows,
    })
}
