use crate::resource::Assignment;
use chrono::{Duration, NaiveDate};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Grouping container for tasks. Planning flattens tasks across all
/// projects, so a project carries no behavior of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub name: String,
}

impl Project {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A scheduled piece of work with an inclusive calendar day span.
///
/// A task missing either date or carrying no assignments generates no
/// demand; it is kept in the table but skipped by the demand pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Task {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            project_id: None,
            start_date: None,
            end_date: None,
            assignments: Vec::new(),
        }
    }

    pub fn to_dataframe_row(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(6);

        let id_data: [i32; 1] = [self.id];
        columns.push(Series::new(PlSmallStr::from_static("id"), id_data).into_column());

        let name_data: [&str; 1] = [self.name.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("name"), name_data).into_column());

        let project_data: [Option<i32>; 1] = [self.project_id];
        columns.push(Series::new(PlSmallStr::from_static("project_id"), project_data).into_column());

        columns.push(Self::series_from_date("start_date", self.start_date)?.into_column());
        columns.push(Self::series_from_date("end_date", self.end_date)?.into_column());

        let assignments_json = serde_json::to_string(&self.assignments)
            .map_err(|err| PolarsError::ComputeError(err.to_string().into()))?;
        let assignments_data: [&str; 1] = [assignments_json.as_str()];
        columns.push(
            Series::new(PlSmallStr::from_static("assignments"), assignments_data).into_column(),
        );

        DataFrame::new(columns)
    }

    pub fn from_dataframe_row(df: &DataFrame, row_idx: usize) -> PolarsResult<Self> {
        let id = df
            .column("id")?
            .i32()?
            .get(row_idx)
            .ok_or_else(|| PolarsError::ComputeError("task row missing id".into()))?;

        let name = df
            .column("name")?
            .str()?
            .get(row_idx)
            .unwrap_or("")
            .to_string();

        let assignments = match df.column("assignments")?.str()?.get(row_idx) {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw)
                .map_err(|err| PolarsError::ComputeError(err.to_string().into()))?,
            _ => Vec::new(),
        };

        Ok(Self {
            id,
            name,
            project_id: df.column("project_id")?.i32()?.get(row_idx),
            start_date: Self::date_from_series(df.column("start_date")?.date()?, row_idx),
            end_date: Self::date_from_series(df.column("end_date")?.date()?, row_idx),
            assignments,
        })
    }

    fn series_from_date(name: &str, date: Option<NaiveDate>) -> PolarsResult<Series> {
        let data: [Option<i32>; 1] = [date.map(Self::date_to_i32)];
        Series::new(name.into(), data).cast(&DataType::Date)
    }

    pub(crate) fn date_from_series(chunked: &DateChunked, row_idx: usize) -> Option<NaiveDate> {
        chunked.get(row_idx).map(Self::date_from_i32)
    }

    pub(crate) fn date_to_i32(date: NaiveDate) -> i32 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        (date - epoch).num_days() as i32
    }

    pub(crate) fn date_from_i32(days: i32) -> NaiveDate {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        epoch + Duration::days(days as i64)
    }
}
