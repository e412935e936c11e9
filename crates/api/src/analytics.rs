//! Chart-feeding aggregations. Each function is the server-side counterpart
//! of one dashboard panel: availability stat cards, team pie, skill pies,
//! and the configurable demand pie/bar charts. All of them are O(n) folds
//! over the fetched rows.

use axum::extract::{Path, Query, State};
use axum::Json;
use entity::{demand, employee};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};

use crate::employees::roster;
use crate::error::ApiResult;
use crate::state::AppState;

pub const TOP_SKILLS: usize = 8;

#[derive(Debug, Serialize, PartialEq)]
pub struct WorkforceSummary {
    pub total: usize,
    pub available: usize,
    pub partially_available: usize,
    pub not_available: usize,
    pub available_pct: u32,
    pub partially_available_pct: u32,
    pub not_available_pct: u32,
    pub avg_strength: u32,
}

/// Availability breakdown with whole-number percentages. An empty roster
/// yields all zeros rather than dividing by zero.
pub fn workforce_summary(roster: &[employee::Model]) -> WorkforceSummary {
    let total = roster.len();
    let count = |availability: employee::Availability| {
        roster
            .iter()
            .filter(|emp| emp.availability == availability)
            .count()
    };
    let available = count(employee::Availability::Available);
    let partially_available = count(employee::Availability::PartiallyAvailable);
    let not_available = count(employee::Availability::NotAvailable);
    let pct = |part: usize| {
        if total == 0 {
            0
        } else {
            (part as f64 / total as f64 * 100.0).round() as u32
        }
    };
    let avg_strength = if total == 0 {
        0
    } else {
        let sum: i64 = roster.iter().map(|emp| emp.strength as i64).sum();
        (sum as f64 / total as f64).round() as u32
    };
    WorkforceSummary {
        total,
        available,
        partially_available,
        not_available,
        available_pct: pct(available),
        partially_available_pct: pct(partially_available),
        not_available_pct: pct(not_available),
        avg_strength,
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TeamStat {
    pub team: String,
    pub count: usize,
    pub avg_strength: u32,
}

/// Member count and average strength per team, first-seen order preserved
/// (it matches the pie slice order the roster produces).
pub fn team_distribution(roster: &[employee::Model]) -> Vec<TeamStat> {
    let mut sums: Vec<(String, usize, i64)> = Vec::new();
    for emp in roster {
        match sums.iter_mut().find(|(team, _, _)| *team == emp.team) {
            Some((_, count, sum)) => {
                *count += 1;
                *sum += emp.strength as i64;
            }
            None => sums.push((emp.team.clone(), 1, emp.strength as i64)),
        }
    }
    sums.into_iter()
        .map(|(team, count, sum)| TeamStat {
            team,
            count,
            avg_strength: (sum as f64 / count as f64).round() as u32,
        })
        .collect()
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SkillCount {
    pub name: String,
    pub count: usize,
}

/// Top-k skill frequencies across the given employees, count descending,
/// name ascending on ties so the result is stable.
pub fn top_skills(roster: &[employee::Model], k: usize) -> Vec<SkillCount> {
    let mut counts: Vec<SkillCount> = Vec::new();
    for emp in roster {
        for skill in emp.skills.iter() {
            match counts.iter_mut().find(|entry| entry.name == *skill) {
                Some(entry) => entry.count += 1,
                None => counts.push(SkillCount {
                    name: skill.clone(),
                    count: 1,
                }),
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    counts.truncate(k);
    counts
}

/// Skill frequencies within one team (case-insensitive team match).
pub fn team_skills(roster: &[employee::Model], team: &str, k: usize) -> Vec<SkillCount> {
    let team_lower = team.to_lowercase();
    let members: Vec<employee::Model> = roster
        .iter()
        .filter(|emp| emp.team.to_lowercase() == team_lower)
        .cloned()
        .collect();
    top_skills(&members, k)
}

/// Demand columns the pie/bar charts may group by. Doubles as the whitelist:
/// anything else fails query deserialization before touching the data.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DemandColumn {
    Status,
    Location,
    Role,
    RoleCode,
    Probability,
    AccountId,
    ProjectId,
    AllocationPercentage,
    ResourceMapped,
    Revised,
    OriginalStartDate,
    AllocationEndDate,
    FulfillmentDate,
    Comment,
    AddedBy,
    StartMonth,
    BillingRate,
    UpdatedOn,
}

/// Bucket label for one demand under the chosen column; blanks and nulls
/// collapse into "Unknown".
pub fn demand_bucket(row: &demand::Model, column: DemandColumn) -> String {
    let value = match column {
        DemandColumn::Status => row.status.clone(),
        DemandColumn::Location => row.location.clone(),
        DemandColumn::Role => row.role.clone(),
        DemandColumn::RoleCode => row.role_code.clone(),
        DemandColumn::Probability => row.probability.map(|v| v.to_string()),
        DemandColumn::AccountId => row.account_id.map(|v| v.to_string()),
        DemandColumn::ProjectId => row.project_id.map(|v| v.to_string()),
        DemandColumn::AllocationPercentage => row.allocation_percentage.map(|v| v.to_string()),
        DemandColumn::ResourceMapped => row.resource_mapped.clone(),
        DemandColumn::Revised => row.revised.clone(),
        DemandColumn::OriginalStartDate => {
            row.original_start_date.map(|d| d.format("%Y-%m-%d").to_string())
        }
        DemandColumn::AllocationEndDate => {
            row.allocation_end_date.map(|d| d.format("%Y-%m-%d").to_string())
        }
        DemandColumn::FulfillmentDate => {
            row.fulfillment_date.map(|d| d.format("%Y-%m-%d").to_string())
        }
        DemandColumn::Comment => row.comment.clone(),
        DemandColumn::AddedBy => row.added_by.clone(),
        DemandColumn::StartMonth => row.start_month.clone(),
        DemandColumn::BillingRate => row.billing_rate.map(|v| v.to_string()),
        DemandColumn::UpdatedOn => row.updated_on.map(|t| t.date_naive().to_string()),
    };
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "Unknown".to_string(),
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SliceCount {
    pub name: String,
    pub value: u64,
}

/// Pie slices: value counts in first-seen order.
pub fn pie_counts(rows: &[demand::Model], column: DemandColumn) -> Vec<SliceCount> {
    let mut slices: Vec<SliceCount> = Vec::new();
    for row in rows {
        let bucket = demand_bucket(row, column);
        match slices.iter_mut().find(|slice| slice.name == bucket) {
            Some(slice) => slice.value += 1,
            None => slices.push(SliceCount {
                name: bucket,
                value: 1,
            }),
        }
    }
    slices
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub counts: Vec<SliceCount>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BarChart {
    pub bars: Vec<BarSeries>,
    pub groups: Vec<String>,
}

/// Grouped bars: one bar per x bucket, segmented by the group column.
pub fn grouped_bars(rows: &[demand::Model], x: DemandColumn, group: DemandColumn) -> BarChart {
    let mut bars: Vec<BarSeries> = Vec::new();
    let mut groups: Vec<String> = Vec::new();
    for row in rows {
        let x_bucket = demand_bucket(row, x);
        let group_bucket = demand_bucket(row, group);
        if !groups.contains(&group_bucket) {
            groups.push(group_bucket.clone());
        }
        let bar = match bars.iter_mut().find(|bar| bar.name == x_bucket) {
            Some(bar) => bar,
            None => {
                bars.push(BarSeries {
                    name: x_bucket,
                    counts: Vec::new(),
                });
                bars.last_mut().expect("just pushed")
            }
        };
        match bar.counts.iter_mut().find(|c| c.name == group_bucket) {
            Some(count) => count.value += 1,
            None => bar.counts.push(SliceCount {
                name: group_bucket,
                value: 1,
            }),
        }
    }
    BarChart { bars, groups }
}

// ---- handlers ----

pub async fn workforce(State(state): State<AppState>) -> ApiResult<Json<WorkforceSummary>> {
    let rows = roster(state.db.as_ref()).await?;
    Ok(Json(workforce_summary(&rows)))
}

pub async fn teams(State(state): State<AppState>) -> ApiResult<Json<Vec<TeamStat>>> {
    let rows = roster(state.db.as_ref()).await?;
    Ok(Json(team_distribution(&rows)))
}

pub async fn skills(State(state): State<AppState>) -> ApiResult<Json<Vec<SkillCount>>> {
    let rows = roster(state.db.as_ref()).await?;
    Ok(Json(top_skills(&rows, TOP_SKILLS)))
}

pub async fn skills_for_team(
    State(state): State<AppState>,
    Path(team): Path<String>,
) -> ApiResult<Json<Vec<SkillCount>>> {
    let rows = roster(state.db.as_ref()).await?;
    Ok(Json(team_skills(&rows, &team, TOP_SKILLS)))
}

#[derive(Debug, Deserialize)]
pub struct PieQuery {
    pub column: DemandColumn,
}

pub async fn demands_pie(
    State(state): State<AppState>,
    Query(query): Query<PieQuery>,
) -> ApiResult<Json<Vec<SliceCount>>> {
    let rows = all_demands(&state).await?;
    Ok(Json(pie_counts(&rows, query.column)))
}

#[derive(Debug, Deserialize)]
pub struct BarQuery {
    pub x: DemandColumn,
    pub group: DemandColumn,
}

pub async fn demands_bars(
    State(state): State<AppState>,
    Query(query): Query<BarQuery>,
) -> ApiResult<Json<BarChart>> {
    let rows = all_demands(&state).await?;
    Ok(Json(grouped_bars(&rows, query.x, query.group)))
}

async fn all_demands(state: &AppState) -> Result<Vec<demand::Model>, sea_orm::DbErr> {
    use sea_orm::QueryOrder;
    demand::Entity::find()
        .order_by_asc(demand::Column::Id)
        .all(state.db.as_ref())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::employee::Availability;
    use entity::StringList;

    fn emp(
        id: i32,
        team: &str,
        availability: Availability,
        strength: i16,
        skills: &[&str],
    ) -> employee::Model {
        employee::Model {
            id,
            name: format!("Person {}", id),
            team: team.into(),
            availability,
            strength,
            skills: StringList::from(skills),
            qualifications: StringList::default(),
        }
    }

    fn demand_with(status: Option<&str>, location: Option<&str>) -> demand::Model {
        demand::Model {
            id: 0,
            sno: None,
            project_id: None,
            account_id: None,
            role: None,
            role_code: None,
            location: location.map(Into::into),
            status: status.map(Into::into),
            revised: None,
            probability: None,
            allocation_percentage: None,
            billing_rate: None,
            original_start_date: None,
            allocation_end_date: None,
            fulfillment_date: None,
            start_month: None,
            resource_mapped: None,
            comment: None,
            added_by: None,
            added_on: None,
            last_updated_by: None,
            updated_on: None,
        }
    }

    #[test]
    fn workforce_summary_counts_and_percentages() {
        let roster = vec![
            emp(1, "Frontend", Availability::Available, 90, &["React"]),
            emp(2, "Backend", Availability::Available, 80, &["Python"]),
            emp(3, "Backend", Availability::PartiallyAvailable, 70, &["Python"]),
            emp(4, "Infra", Availability::NotAvailable, 60, &["AWS"]),
        ];
        let summary = workforce_summary(&roster);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.available, 2);
        assert_eq!(summary.partially_available, 1);
        assert_eq!(summary.not_available, 1);
        assert_eq!(summary.available_pct, 50);
        assert_eq!(summary.avg_strength, 75);
    }

    #[test]
    fn workforce_summary_of_empty_roster_is_all_zero() {
        let summary = workforce_summary(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.avg_strength, 0);
        assert_eq!(summary.available_pct, 0);
    }

    #[test]
    fn team_distribution_keeps_first_seen_order() {
        let roster = vec![
            emp(1, "Frontend", Availability::Available, 90, &["React"]),
            emp(2, "Backend", Availability::Available, 70, &["Python"]),
            emp(3, "Frontend", Availability::Available, 80, &["CSS"]),
        ];
        let stats = team_distribution(&roster);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].team, "Frontend");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].avg_strength, 85);
        assert_eq!(stats[1].team, "Backend");
    }

    #[test]
    fn top_skills_ranks_and_truncates() {
        let roster = vec![
            emp(1, "A", Availability::Available, 90, &["React", "CSS"]),
            emp(2, "A", Availability::Available, 90, &["React", "Python"]),
            emp(3, "B", Availability::Available, 90, &["React", "Python"]),
        ];
        let skills = top_skills(&roster, 2);
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].name, "React");
        assert_eq!(skills[0].count, 3);
        assert_eq!(skills[1].name, "Python");
        assert_eq!(skills[1].count, 2);
    }

    #[test]
    fn team_skills_only_counts_the_team() {
        let roster = vec![
            emp(1, "Frontend", Availability::Available, 90, &["React"]),
            emp(2, "Backend", Availability::Available, 90, &["Python"]),
        ];
        let skills = team_skills(&roster, "frontend", TOP_SKILLS);
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].name, "React");
    }

    #[test]
    fn pie_counts_buckets_missing_values_as_unknown() {
        let rows = vec![
            demand_with(Some("Open"), None),
            demand_with(Some("Open"), None),
            demand_with(None, None),
        ];
        let slices = pie_counts(&rows, DemandColumn::Status);
        assert_eq!(
            slices,
            vec![
                SliceCount {
                    name: "Open".into(),
                    value: 2
                },
                SliceCount {
                    name: "Unknown".into(),
                    value: 1
                },
            ]
        );
    }

    #[test]
    fn grouped_bars_segment_by_both_columns() {
        let rows = vec![
            demand_with(Some("Open"), Some("Pune")),
            demand_with(Some("Open"), Some("Remote")),
            demand_with(Some("Closed"), Some("Pune")),
            demand_with(Some("Open"), Some("Pune")),
        ];
        let chart = grouped_bars(&rows, DemandColumn::Status, DemandColumn::Location);
        assert_eq!(chart.groups, vec!["Pune".to_string(), "Remote".to_string()]);
        assert_eq!(chart.bars.len(), 2);
        let open = &chart.bars[0];
        assert_eq!(open.name, "Open");
        assert_eq!(
            open.counts,
            vec![
                SliceCount {
                    name: "Pune".into(),
                    value: 2
                },
                SliceCount {
                    name: "Remote".into(),
                    value: 1
                },
            ]
        );
    }
}
