use crate::resource::Resource;
use crate::task::Task;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct InputValidationError {
    message: String,
}

impl InputValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for InputValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for InputValidationError {}

pub fn validate_resource(resource: &Resource) -> Result<(), InputValidationError> {
    if resource.id.trim().is_empty() {
        return Err(InputValidationError::new(
            "resource requires a non-empty id",
        ));
    }

    if let Some(hours) = resource.capacity_hours {
        if !hours.is_finite() {
            return Err(InputValidationError::new(format!(
                "resource '{}' has non-finite capacity_hours {}",
                resource.id, hours
            )));
        }
    }

    Ok(())
}

pub fn validate_roster(resources: &[Resource]) -> Result<(), InputValidationError> {
    let mut seen_ids = HashSet::with_capacity(resources.len());
    for resource in resources {
        if !seen_ids.insert(resource.id.clone()) {
            return Err(InputValidationError::new(format!(
                "duplicate resource id '{}'",
                resource.id
            )));
        }
        validate_resource(resource)?;
    }
    Ok(())
}

pub fn validate_task(task: &Task) -> Result<(), InputValidationError> {
    if let (Some(start), Some(end)) = (task.start_date, task.end_date) {
        if start > end {
            return Err(InputValidationError::new(format!(
                "task {} starts {} after it ends {}",
                task.id, start, end
            )));
        }
    }

    for (idx, assignment) in task.assignments.iter().enumerate() {
        if assignment.resource_id.trim().is_empty() {
            return Err(InputValidationError::new(format!(
                "task {} assignment #{} requires a non-empty resource_id",
                task.id, idx
            )));
        }
        if !assignment.units.is_finite() {
            return Err(InputValidationError::new(format!(
                "task {} assignment for '{}' has non-finite units {}",
                task.id, assignment.resource_id, assignment.units
            )));
        }
    }

    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> Result<(), InputValidationError> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id) {
            return Err(InputValidationError::new(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        validate_task(task)?;
    }
    Ok(())
}
