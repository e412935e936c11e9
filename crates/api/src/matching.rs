//! Demand matching for the hiring view: score the workforce against an open
//! position and report the hiring pipeline numbers.

use axum::extract::{Path, State};
use axum::Json;
use entity::employee;
use serde::Serialize;

use crate::employees::{roster, EmployeeRow};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const MIN_MATCH_SCORE: u8 = 40;
const GOOD_MATCH_SCORE: u8 = 70;
const TOP_CANDIDATES: usize = 5;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Position {
    pub id: i32,
    pub title: &'static str,
    pub requirements: &'static [&'static str],
    pub priority: Priority,
    pub salary_band: &'static str,
}

pub const OPEN_POSITIONS: [Position; 4] = [
    Position {
        id: 1,
        title: "Senior React Developer",
        requirements: &["React", "TypeScript", "Tailwind CSS"],
        priority: Priority::High,
        salary_band: "120-150K",
    },
    Position {
        id: 2,
        title: "Backend Engineer",
        requirements: &["Python", "FastAPI", "PostgreSQL"],
        priority: Priority::High,
        salary_band: "130-160K",
    },
    Position {
        id: 3,
        title: "DevOps Specialist",
        requirements: &["Docker", "Kubernetes", "AWS"],
        priority: Priority::Medium,
        salary_band: "110-140K",
    },
    Position {
        id: 4,
        title: "ML Engineer",
        requirements: &["Python", "TensorFlow", "Machine Learning"],
        priority: Priority::Medium,
        salary_band: "140-180K",
    },
];

/// Match score: skill overlap percentage, plus an availability bonus of
/// 15/5/0, plus up to 30 points of strength, floored and capped at 100.
/// A skill counts as matched when it contains a required skill or a required
/// skill contains it, case-insensitively.
pub fn match_score(emp: &employee::Model, required: &[&str]) -> u8 {
    if required.is_empty() {
        return 0;
    }
    let matched = emp
        .skills
        .iter()
        .filter(|skill| {
            let skill = skill.to_lowercase();
            required.iter().any(|req| {
                let req = req.to_lowercase();
                req.contains(&skill) || skill.contains(&req)
            })
        })
        .count();
    let base = matched as f64 / required.len() as f64 * 100.0;
    let availability = match emp.availability {
        employee::Availability::Available => 15.0,
        employee::Availability::PartiallyAvailable => 5.0,
        employee::Availability::NotAvailable => 0.0,
    };
    let strength = emp.strength as f64 / 100.0 * 30.0;
    (base + availability + strength).min(100.0).floor() as u8
}

#[derive(Debug, Serialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub employee: EmployeeRow,
    pub match_score: u8,
}

/// Scores the whole roster and keeps the top five at or above the cutoff.
pub fn top_candidates(roster: Vec<employee::Model>, required: &[&str]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = roster
        .into_iter()
        .map(|emp| {
            let match_score = match_score(&emp, required);
            Candidate {
                employee: emp.into(),
                match_score,
            }
        })
        .filter(|candidate| candidate.match_score >= MIN_MATCH_SCORE)
        .collect();
    candidates.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    candidates.truncate(TOP_CANDIDATES);
    candidates
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PipelineStats {
    pub open_positions: usize,
    pub good_matches: usize,
    pub fill_rate_pct: u32,
    pub avg_match_pct: u32,
}

/// Hiring pipeline card numbers. Both rates collapse to zero on empty input
/// instead of dividing by zero.
pub fn pipeline_stats(candidates: &[Candidate], workforce_size: usize) -> PipelineStats {
    let good_matches = candidates
        .iter()
        .filter(|c| c.match_score >= GOOD_MATCH_SCORE)
        .count();
    let fill_rate_pct = if workforce_size == 0 {
        0
    } else {
        (candidates.len() as f64 / workforce_size as f64 * 100.0).round() as u32
    };
    let avg_match_pct = if candidates.is_empty() {
        0
    } else {
        let sum: u64 = candidates.iter().map(|c| c.match_score as u64).sum();
        (sum as f64 / candidates.len() as f64).round() as u32
    };
    PipelineStats {
        open_positions: OPEN_POSITIONS.len(),
        good_matches,
        fill_rate_pct,
        avg_match_pct,
    }
}

#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub position: Position,
    pub candidates: Vec<Candidate>,
    pub pipeline: PipelineStats,
}

pub async fn positions() -> Json<Vec<Position>> {
    Json(OPEN_POSITIONS.to_vec())
}

pub async fn report(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<MatchReport>> {
    let position = OPEN_POSITIONS
        .iter()
        .find(|p| p.id == id)
        .copied()
        .ok_or(ApiError::NotFound("Position"))?;
    let workforce = roster(state.db.as_ref()).await?;
    let workforce_size = workforce.len();
    let candidates = top_candidates(workforce, position.requirements);
    let pipeline = pipeline_stats(&candidates, workforce_size);
    Ok(Json(MatchReport {
        position,
        candidates,
        pipeline,
    }))
}
