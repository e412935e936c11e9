//! AI search endpoints: roster recommendations and generated-SQL search for
//! the employees and demands tables.

use axum::extract::{Query, State};
use axum::Json;
use entity::demand;
use sea_orm::{
    ColumnTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JsonValue, QueryFilter, QuerySelect, Statement,
};
use serde::{Deserialize, Serialize};
use tracing::info_span;

use crate::agent::{AgentFailure, DEMAND_COLUMNS, EMPLOYEE_COLUMNS};
use crate::employees::{roster, EmployeeRow};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    pub task_description: String,
}

#[derive(Debug, Serialize)]
pub struct SqlSearchResponse {
    pub generated_sql: String,
    pub rows: Vec<JsonValue>,
}

fn require_task(query: &TaskQuery) -> ApiResult<&str> {
    let trimmed = query.task_description.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Task description cannot be empty"));
    }
    Ok(trimmed)
}

fn map_agent_failure(failure: AgentFailure) -> ApiError {
    match failure {
        AgentFailure::Rejected(err) => ApiError::SqlRejected(err.to_string()),
        other => ApiError::AgentUnavailable(other.to_string()),
    }
}

/// POST /employees/ai-search: rank the roster for a free-text task.
pub async fn ai_search_employees(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> ApiResult<Json<Vec<EmployeeRow>>> {
    let task = require_task(&query)?;
    let span = info_span!("search.ai", model = state.agent.is_configured());
    let _guard = span.enter();
    let workforce = roster(state.db.as_ref()).await?;
    let recommended = state.agent.recommend_employees(task, workforce).await;
    Ok(Json(
        recommended.into_iter().map(EmployeeRow::from).collect(),
    ))
}

/// POST /employees/ai-sql-search: generate a SELECT over employees, run it,
/// and map the rows back into employees, skipping ones that do not fit.
pub async fn ai_sql_search_employees(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> ApiResult<Json<Vec<EmployeeRow>>> {
    let task = require_task(&query)?;
    let sql = state
        .agent
        .generate_table_select(task, "employees", &[], EMPLOYEE_COLUMNS)
        .await
        .map_err(map_agent_failure)?;
    let rows = run_generated_select(state.db.as_ref(), &sql).await?;
    let employees = rows.iter().filter_map(employee_from_row).collect();
    Ok(Json(employees))
}

/// POST /demands/ai-sql-search: generate a SELECT over demands and return
/// both the SQL and the raw rows so the caller can chart or audit them.
pub async fn ai_sql_search_demands(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> ApiResult<Json<SqlSearchResponse>> {
    let task = require_task(&query)?;
    let roles = distinct_roles(state.db.as_ref()).await?;
    let sql = state
        .agent
        .generate_table_select(task, "demands", &roles, DEMAND_COLUMNS)
        .await
        .map_err(map_agent_failure)?;
    let rows = run_generated_select(state.db.as_ref(), &sql).await?;
    Ok(Json(SqlSearchResponse {
        generated_sql: sql,
        rows,
    }))
}

/// Existing role names, fed to the SQL prompt so the model maps skills onto
/// roles that actually occur in the data.
pub async fn distinct_roles(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    demand::Entity::find()
        .select_only()
        .column(demand::Column::Role)
        .filter(demand::Column::Role.is_not_null())
        .distinct()
        .into_tuple::<String>()
        .all(db)
        .await
}

/// Executes a guarded SELECT and returns rows as JSON objects. The guard
/// only ever emits read statements, so this runs them directly.
async fn run_generated_select(
    db: &DatabaseConnection,
    sql: &str,
) -> Result<Vec<JsonValue>, DbErr> {
    let statement = Statement::from_string(DatabaseBackend::Postgres, sql.to_string());
    JsonValue::find_by_statement(statement).all(db).await
}

/// Best-effort mapping from an arbitrary result row to an employee. Rows
/// without a usable id are dropped; everything else falls back to benign
/// defaults, the way the dashboard treated partial rows.
pub fn employee_from_row(row: &JsonValue) -> Option<EmployeeRow> {
    let object = row.as_object()?;
    let id = object.get("id").and_then(json_i64)? as i32;
    let name = object
        .get("name")
        .or_else(|| object.get("full_name"))
        .and_then(JsonValue::as_str)
        .unwrap_or("Unknown")
        .to_string();
    let strength = object
        .get("strength")
        .and_then(json_i64)
        .unwrap_or(0)
        .clamp(0, 100) as i16;
    let availability = object
        .get("availability")
        .and_then(JsonValue::as_str)
        .unwrap_or("Unknown")
        .to_string();
    let team = object
        .get("team")
        .and_then(JsonValue::as_str)
        .unwrap_or("Unknown")
        .to_string();
    Some(EmployeeRow {
        id,
        name,
        skills: string_list(object.get("skills")),
        qualifications: string_list(object.get("qualifications")),
        strength,
        availability,
        team,
    })
}

fn json_i64(value: &JsonValue) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

/// Accepts a JSON array of strings or a JSON-encoded string of one.
fn string_list(value: Option<&JsonValue>) -> Vec<String> {
    match value {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(JsonValue::String(text)) => serde_json::from_str::<Vec<String>>(text)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_complete_rows() {
        let row = json!({
            "id": 3,
            "name": "Carol Davis",
            "skills": ["React", "Node.js"],
            "qualifications": ["B.Tech IT"],
            "strength": 92,
            "availability": "Available",
            "team": "Full Stack",
        });
        let emp = employee_from_row(&row).expect("row maps");
        assert_eq!(emp.id, 3);
        assert_eq!(emp.skills, vec!["React", "Node.js"]);
        assert_eq!(emp.availability, "Available");
    }

    #[test]
    fn fills_gaps_with_defaults() {
        let row = json!({ "id": "7", "full_name": "Someone" });
        let emp = employee_from_row(&row).expect("row maps");
        assert_eq!(emp.id, 7);
        assert_eq!(emp.name, "Someone");
        assert_eq!(emp.strength, 0);
        assert_eq!(emp.availability, "Unknown");
        assert!(emp.skills.is_empty());
    }

    #[test]
    fn drops_rows_without_an_id() {
        let row = json!({ "name": "No Id" });
        assert!(employee_from_row(&row).is_none());
    }

    #[test]
    fn parses_json_encoded_skill_strings() {
        let row = json!({ "id": 1, "skills": "[\"React\", \"CSS\"]" });
        let emp = employee_from_row(&row).expect("row maps");
        assert_eq!(emp.skills, vec!["React", "CSS"]);
    }
}
