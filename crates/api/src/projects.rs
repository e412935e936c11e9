//! Project listing with the dashboard's sort modes, deadline alerts, and the
//! Gantt span computation.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, NaiveDate, Utc};
use entity::project;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSort {
    #[default]
    Deadline,
    Progress,
    Budget,
    Team,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineAlert {
    Overdue,
    Urgent,
    Warning,
    Safe,
}

/// Alert tier for a deadline `days_left` days away. Due today counts as
/// overdue, matching how the cards used to render.
pub fn deadline_alert(days_left: i64) -> DeadlineAlert {
    if days_left <= 0 {
        DeadlineAlert::Overdue
    } else if days_left <= 3 {
        DeadlineAlert::Urgent
    } else if days_left <= 7 {
        DeadlineAlert::Warning
    } else {
        DeadlineAlert::Safe
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectRow {
    pub id: i32,
    pub name: String,
    pub budget: i64,
    pub duration_weeks: i32,
    pub progress: i16,
    pub deadline: NaiveDate,
    pub team_members: Vec<String>,
    pub days_left: i64,
    pub alert: DeadlineAlert,
}

impl ProjectRow {
    fn new(model: project::Model, today: NaiveDate) -> Self {
        let days_left = (model.deadline - today).num_days();
        Self {
            id: model.id,
            name: model.name,
            budget: model.budget,
            duration_weeks: model.duration_weeks,
            progress: model.progress,
            deadline: model.deadline,
            team_members: model.team_members.0,
            days_left,
            alert: deadline_alert(days_left),
        }
    }
}

/// Applies the dashboard sort menu: deadline soonest-first, everything else
/// largest-first.
pub fn sort_projects(mut rows: Vec<project::Model>, sort: ProjectSort) -> Vec<project::Model> {
    match sort {
        ProjectSort::Deadline => rows.sort_by_key(|p| p.deadline),
        ProjectSort::Progress => rows.sort_by(|a, b| b.progress.cmp(&a.progress)),
        ProjectSort::Budget => rows.sort_by(|a, b| b.budget.cmp(&a.budget)),
        ProjectSort::Team => rows.sort_by(|a, b| b.team_members.len().cmp(&a.team_members.len())),
    }
    rows
}

#[derive(Debug, Serialize, PartialEq)]
pub struct GanttSpan {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_weeks: i32,
    pub progress: i16,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct GanttChart {
    pub spans: Vec<GanttSpan>,
    pub window_start: Option<NaiveDate>,
    pub window_end: Option<NaiveDate>,
    pub total_days: i64,
}

/// Builds the Gantt bars: each project spans from `deadline - duration` back
/// to its deadline, and the window covers the earliest start to the latest
/// end. No projects means an empty window, not a panic.
pub fn gantt_chart(projects: &[project::Model]) -> GanttChart {
    let spans: Vec<GanttSpan> = projects
        .iter()
        .map(|p| {
            let start = p.deadline - Duration::weeks(p.duration_weeks as i64);
            GanttSpan {
                name: p.name.clone(),
                start,
                end: p.deadline,
                duration_weeks: p.duration_weeks,
                progress: p.progress,
            }
        })
        .collect();
    let window_start = spans.iter().map(|s| s.start).min();
    let window_end = spans.iter().map(|s| s.end).max();
    let total_days = match (window_start, window_end) {
        (Some(start), Some(end)) => (end - start).num_days(),
        _ => 0,
    };
    GanttChart {
        spans,
        window_start,
        window_end,
        total_days,
    }
}

pub async fn all_projects(db: &DatabaseConnection) -> Result<Vec<project::Model>, DbErr> {
    project::Entity::find()
        .order_by_asc(project::Column::Id)
        .all(db)
        .await
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectListQuery {
    #[serde(default)]
    pub sort: ProjectSort,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> ApiResult<Json<Vec<ProjectRow>>> {
    let rows = all_projects(state.db.as_ref()).await?;
    let sorted = sort_projects(rows, query.sort);
    let today = Utc::now().date_naive();
    Ok(Json(
        sorted
            .into_iter()
            .map(|model| ProjectRow::new(model, today))
            .collect(),
    ))
}

pub async fn gantt(State(state): State<AppState>) -> ApiResult<Json<GanttChart>> {
    let rows = all_projects(state.db.as_ref()).await?;
    let sorted = sort_projects(rows, ProjectSort::Deadline);
    Ok(Json(gantt_chart(&sorted)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::StringList;

    fn project(
        id: i32,
        budget: i64,
        duration_weeks: i32,
        progress: i16,
        deadline: NaiveDate,
        members: usize,
    ) -> project::Model {
        project::Model {
            id,
            name: format!("Project {}", id),
            budget,
            duration_weeks,
            progress,
            deadline,
            team_members: StringList(
                (0..members).map(|i| format!("member-{}", i)).collect(),
            ),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn alert_tiers_match_the_card_thresholds() {
        assert_eq!(deadline_alert(-2), DeadlineAlert::Overdue);
        assert_eq!(deadline_alert(0), DeadlineAlert::Overdue);
        assert_eq!(deadline_alert(3), DeadlineAlert::Urgent);
        assert_eq!(deadline_alert(7), DeadlineAlert::Warning);
        assert_eq!(deadline_alert(8), DeadlineAlert::Safe);
    }

    #[test]
    fn sorting_modes() {
        let rows = vec![
            project(1, 100, 4, 20, date(2026, 9, 1), 2),
            project(2, 300, 4, 80, date(2026, 8, 20), 5),
            project(3, 200, 4, 50, date(2026, 10, 1), 3),
        ];
        let by_deadline = sort_projects(rows.clone(), ProjectSort::Deadline);
        assert_eq!(by_deadline[0].id, 2);
        let by_progress = sort_projects(rows.clone(), ProjectSort::Progress);
        assert_eq!(by_progress[0].id, 2);
        let by_budget = sort_projects(rows.clone(), ProjectSort::Budget);
        assert_eq!(by_budget[0].id, 2);
        let by_team = sort_projects(rows, ProjectSort::Team);
        assert_eq!(by_team[0].id, 2);
    }

    #[test]
    fn gantt_spans_run_duration_weeks_back_from_deadline() {
        let rows = vec![project(1, 100, 2, 50, date(2026, 8, 29), 1)];
        let chart = gantt_chart(&rows);
        assert_eq!(chart.spans[0].start, date(2026, 8, 15));
        assert_eq!(chart.spans[0].end, date(2026, 8, 29));
        assert_eq!(chart.total_days, 14);
    }

    #[test]
    fn gantt_window_covers_all_projects() {
        let rows = vec![
            project(1, 100, 2, 50, date(2026, 8, 29), 1),
            project(2, 100, 6, 10, date(2026, 9, 12), 1),
        ];
        let chart = gantt_chart(&rows);
        assert_eq!(chart.window_start, Some(date(2026, 8, 1)));
        assert_eq!(chart.window_end, Some(date(2026, 9, 12)));
        assert_eq!(chart.total_days, 42);
    }

    #[test]
    fn gantt_of_no_projects_is_empty() {
        let chart = gantt_chart(&[]);
        assert!(chart.spans.is_empty());
        assert_eq!(chart.window_start, None);
        assert_eq!(chart.total_days, 0);
    }
}
