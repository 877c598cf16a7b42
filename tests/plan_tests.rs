use capacity_tool::{
    Assignment, Portfolio, Project, Resource, Task, compute_capacity_plan,
};
use chrono::NaiveDate;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn engineer(id: &str, name: &str) -> Resource {
    let mut resource = Resource::new(id, name);
    resource.role = Some("Eng".to_string());
    resource
}

fn scheduled_task(id: i32, start: NaiveDate, end: NaiveDate, assignments: Vec<Assignment>) -> Task {
    let mut task = Task::new(id, format!("T{id}"));
    task.start_date = Some(start);
    task.end_date = Some(end);
    task.assignments = assignments;
    task
}

fn quarter_portfolio() -> Portfolio {
    let mut portfolio = Portfolio::new();
    portfolio.set_portfolio_name("Q2 delivery");
    portfolio.upsert_project(Project::new(1, "Replatform"));
    portfolio.set_roster(vec![engineer("r1", "Ada")]).unwrap();
    let mut task = scheduled_task(
        1,
        d(2025, 4, 1),
        d(2025, 4, 10),
        vec![Assignment::new("r1", 50.0)],
    );
    task.project_id = Some(1);
    portfolio.upsert_task_record(task).unwrap();
    portfolio
}

#[test]
fn quarter_scenario_end_to_end() {
    let plan = quarter_portfolio().plan(d(2025, 4, 1), 3).unwrap();

    // 10 days x 8h x 50% = 40h in April.
    assert_eq!(
        plan.resource_demand
            .get("r1")
            .and_then(|monthly| monthly.get("2025-04"))
            .copied(),
        Some(40.0)
    );
    assert_eq!(plan.resource_capacity.get("r1").copied(), Some(160.0));

    assert_eq!(plan.portfolio_series.len(), 3);
    let april = &plan.portfolio_series[0];
    assert_eq!(april.month_key, "2025-04");
    assert_eq!(april.capacity_hours, 160);
    assert_eq!(april.demand_hours, 40);
    assert_eq!(april.utilization_pct, 25);

    for period in &plan.portfolio_series[1..] {
        assert_eq!(period.capacity_hours, 160);
        assert_eq!(period.demand_hours, 0);
        assert_eq!(period.utilization_pct, 0);
    }

    assert!(plan.conflicts.is_empty());

    let eng = &plan.role_ranking[0];
    assert_eq!(eng.role, "Eng");
    assert_eq!(eng.capacity_hours, 480.0);
    assert_eq!(eng.demand_hours, 40);
    let expected_utilization = 40.0 / 480.0 * 100.0;
    assert!((eng.utilization_pct - expected_utilization).abs() < 1e-9);
}

#[test]
fn planning_twice_yields_identical_plans() {
    let portfolio = quarter_portfolio();
    let first = portfolio.plan(d(2025, 4, 1), 3).unwrap();
    let second = portfolio.plan(d(2025, 4, 1), 3).unwrap();
    assert_eq!(first, second);
}

#[test]
fn free_function_matches_portfolio_plan() {
    let portfolio = quarter_portfolio();
    let from_portfolio = portfolio.plan(d(2025, 4, 1), 3).unwrap();
    let from_snapshots = compute_capacity_plan(
        portfolio.roster(),
        &portfolio.tasks().unwrap(),
        d(2025, 4, 1),
        3,
    )
    .unwrap();
    assert_eq!(from_portfolio, from_snapshots);
}

#[test]
fn role_ranking_sorts_most_loaded_first() {
    let mut designer = Resource::new("r2", "Grace");
    designer.role = Some("Design".to_string());

    let mut portfolio = Portfolio::new();
    portfolio
        .set_roster(vec![engineer("r1", "Ada"), designer])
        .unwrap();
    portfolio
        .upsert_task_record(scheduled_task(
            1,
            d(2025, 4, 1),
            d(2025, 4, 10),
            vec![Assignment::new("r1", 25.0), Assignment::new("r2", 100.0)],
        ))
        .unwrap();

    let plan = portfolio.plan(d(2025, 4, 1), 1).unwrap();

    let roles: Vec<&str> = plan
        .role_ranking
        .iter()
        .map(|row| row.role.as_str())
        .collect();
    assert_eq!(roles, vec!["Design", "Eng"]);
    assert!(plan.role_ranking[0].utilization_pct > plan.role_ranking[1].utilization_pct);
}

#[test]
fn empty_roster_reports_zero_utilization_not_nan() {
    let mut portfolio = Portfolio::new();
    portfolio
        .upsert_task_record(scheduled_task(
            1,
            d(2025, 4, 1),
            d(2025, 4, 10),
            vec![Assignment::new("ghost", 100.0)],
        ))
        .unwrap();

    let plan = portfolio.plan(d(2025, 4, 1), 3).unwrap();

    for period in &plan.portfolio_series {
        assert_eq!(period.capacity_hours, 0);
        assert_eq!(period.demand_hours, 0);
        assert_eq!(period.utilization_pct, 0);
    }
    assert!(plan.role_ranking.is_empty());
    assert!(plan.conflicts.is_empty());
}

#[test]
fn matrix_dataframe_has_one_row_per_resource_and_one_column_per_bucket() {
    let mut portfolio = quarter_portfolio();
    portfolio.upsert_resource(engineer("r2", "Grace")).unwrap();

    let plan = portfolio.plan(d(2025, 4, 1), 3).unwrap();
    let df = plan.matrix_dataframe().unwrap();

    assert_eq!(df.height(), 2);
    assert_eq!(df.width(), 4);

    let ids = df.column("resource_id").unwrap().str().unwrap();
    assert_eq!(ids.get(0), Some("r1"));
    assert_eq!(ids.get(1), Some("r2"));

    let april = df.column("2025-04").unwrap().f64().unwrap();
    assert_eq!(april.get(0), Some(40.0));
    assert_eq!(april.get(1), Some(0.0));
}

#[test]
fn summary_reports_counts_and_peak_month() {
    let plan = quarter_portfolio().plan(d(2025, 4, 1), 3).unwrap();
    let summary = plan.summarize();

    assert_eq!(summary.bucket_count, 3);
    assert_eq!(summary.resource_count, 1);
    assert_eq!(summary.conflict_count, 0);
    assert_eq!(summary.peak_utilization_pct, 25);
    assert_eq!(summary.peak_month.as_deref(), Some("Apr 25"));
    assert_eq!(
        summary.to_cli_summary(),
        "months=3, resources=1, peak=Apr 25@25%"
    );
}

#[test]
fn invalid_horizon_fails_before_any_computation() {
    let portfolio = quarter_portfolio();
    assert!(portfolio.plan(d(2025, 4, 1), 0).is_err());
    assert!(portfolio.plan(d(2025, 4, 1), -6).is_err());
}

#[test]
fn plans_serialize_to_json() {
    let plan = quarter_portfolio().plan(d(2025, 4, 1), 3).unwrap();
    let json = serde_json::to_string(&plan).unwrap();
    let restored: capacity_tool::CapacityPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, plan);
}
