//! Employee listing and the skill/availability/team filter.

use axum::extract::{Path, Query, State};
use axum::Json;
use entity::employee;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Employee as it appears on the wire. Availability stays a plain string so
/// rows coming back from generated SQL can round-trip without inventing
/// values.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmployeeRow {
    pub id: i32,
    pub name: String,
    pub skills: Vec<String>,
    pub qualifications: Vec<String>,
    pub strength: i16,
    pub availability: String,
    pub team: String,
}

impl From<employee::Model> for EmployeeRow {
    fn from(model: employee::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            skills: model.skills.0,
            qualifications: model.qualifications.0,
            strength: model.strength,
            availability: model.availability.as_str().to_string(),
            team: model.team,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmployeeFilter {
    pub skill: Option<String>,
    pub availability: Option<String>,
    pub team: Option<String>,
}

pub async fn roster(db: &DatabaseConnection) -> Result<Vec<employee::Model>, sea_orm::DbErr> {
    employee::Entity::find()
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await
}

/// Applies the dashboard filter bar: skill is a case-insensitive substring
/// match against any skill entry, availability and team are case-insensitive
/// equality. Empty fields pass everything through.
pub fn filter_roster(
    roster: Vec<employee::Model>,
    filter: &EmployeeFilter,
) -> Vec<employee::Model> {
    let skill = normalized(&filter.skill);
    let availability = normalized(&filter.availability);
    let team = normalized(&filter.team);

    roster
        .into_iter()
        .filter(|emp| {
            if let Some(skill) = &skill {
                if !emp.skills.iter().any(|s| s.to_lowercase().contains(skill)) {
                    return false;
                }
            }
            if let Some(availability) = &availability {
                if emp.availability.as_str().to_lowercase() != *availability {
                    return false;
                }
            }
            if let Some(team) = &team {
                if emp.team.to_lowercase() != *team {
                    return false;
                }
            }
            true
        })
        .collect()
}

fn normalized(value: &Option<String>) -> Option<String> {
    value.as_ref().and_then(|v| {
        let trimmed = v.trim().to_lowercase();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<EmployeeRow>>> {
    let rows = roster(state.db.as_ref()).await?;
    Ok(Json(rows.into_iter().map(EmployeeRow::from).collect()))
}

pub async fn filtered(
    State(state): State<AppState>,
    Query(filter): Query<EmployeeFilter>,
) -> ApiResult<Json<Vec<EmployeeRow>>> {
    let rows = roster(state.db.as_ref()).await?;
    let matched = filter_roster(rows, &filter);
    Ok(Json(matched.into_iter().map(EmployeeRow::from).collect()))
}

pub async fn by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<EmployeeRow>> {
    let found = employee::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;
    Ok(Json(found.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::employee::Availability;
    use entity::StringList;

    fn emp(id: i32, team: &str, availability: Availability, skills: &[&str]) -> employee::Model {
        employee::Model {
            id,
            name: format!("Person {}", id),
            team: team.into(),
            availability,
            strength: 90,
            skills: StringList::from(skills),
            qualifications: StringList::default(),
        }
    }

    #[test]
    fn filter_matches_skill_substring_case_insensitively() {
        let roster = vec![
            emp(1, "Frontend", Availability::Available, &["React", "CSS"]),
            emp(2, "Backend", Availability::Available, &["Python"]),
        ];
        let filter = EmployeeFilter {
            skill: Some("react".into()),
            ..Default::default()
        };
        let matched = filter_roster(roster, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 1);
    }

    #[test]
    fn filter_combines_all_fields() {
        let roster = vec![
            emp(1, "Frontend", Availability::Available, &["React"]),
            emp(2, "Frontend", Availability::NotAvailable, &["React"]),
            emp(3, "Backend", Availability::Available, &["React"]),
        ];
        let filter = EmployeeFilter {
            skill: Some("React".into()),
            availability: Some("available".into()),
            team: Some("frontend".into()),
        };
        let matched = filter_roster(roster, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 1);
    }

    #[test]
    fn blank_filter_passes_everyone() {
        let roster = vec![emp(1, "Frontend", Availability::Available, &["React"])];
        let filter = EmployeeFilter {
            skill: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(filter_roster(roster, &filter).len(), 1);
    }
}
