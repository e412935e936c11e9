//! AI search boundary. The model is an external collaborator reached over
//! HTTP; this module owns the client, the prompts, the keyword fallback used
//! when no model is configured (or when it misbehaves), and the guard that
//! validates generated SQL before execution.

pub mod client;
pub mod prompts;
pub mod sql;

use entity::employee;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

pub use client::{GeminiClient, GeminiError, DEFAULT_MODEL};
pub use sql::{sanitize_select, SqlGuardError, DEMAND_COLUMNS, EMPLOYEE_COLUMNS};

#[derive(Debug, Error)]
pub enum AgentFailure {
    #[error("no model configured; set GEMINI_API_KEY")]
    NotConfigured,
    #[error(transparent)]
    Model(#[from] GeminiError),
    #[error(transparent)]
    Rejected(#[from] SqlGuardError),
}

/// Shape the recommendation prompt asks the model to answer with.
#[derive(Debug, Deserialize)]
struct Recommendation {
    #[allow(dead_code)]
    #[serde(default)]
    task_analysis: String,
    #[serde(default)]
    suitable_employee_ids: Vec<i32>,
    #[allow(dead_code)]
    #[serde(default)]
    reasoning: String,
}

#[derive(Clone, Default)]
pub struct TaskAgent {
    client: Option<GeminiClient>,
}

impl TaskAgent {
    pub fn new(client: Option<GeminiClient>) -> Self {
        Self { client }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Ranks the roster for a task. Falls back to keyword scoring when no
    /// model is configured or the model call fails, as the dashboard would
    /// rather degrade than error on its main search box.
    pub async fn recommend_employees(
        &self,
        task_description: &str,
        roster: Vec<employee::Model>,
    ) -> Vec<employee::Model> {
        let Some(client) = &self.client else {
            return keyword_match(task_description, roster);
        };

        let payload: Vec<_> = roster.iter().map(roster_entry).collect();
        let prompt = prompts::recommendation_prompt(task_description, &json!(payload));
        match client.generate_json::<Recommendation>(&prompt).await {
            Ok(recommendation) => order_by_ids(recommendation.suitable_employee_ids, roster),
            Err(err) => {
                warn!(error = %err, "model recommendation failed, using keyword fallback");
                keyword_match(task_description, roster)
            }
        }
    }

    /// Asks the model for a SELECT against `table` and runs it through the
    /// guard. Unlike recommendations there is no fallback: a request for SQL
    /// search without a usable model is an error.
    pub async fn generate_table_select(
        &self,
        task_description: &str,
        table: &str,
        known_roles: &[String],
        allowed_columns: &[&str],
    ) -> Result<String, AgentFailure> {
        let client = self.client.as_ref().ok_or(AgentFailure::NotConfigured)?;
        let prompt = prompts::sql_prompt(task_description, table, known_roles, allowed_columns);
        let raw = client.generate(&prompt).await?;
        let sql = sanitize_select(&raw, table, allowed_columns)?;
        Ok(sql)
    }
}

fn roster_entry(emp: &employee::Model) -> serde_json::Value {
    json!({
        "id": emp.id,
        "name": emp.name,
        "skills": emp.skills.0,
        "qualifications": emp.qualifications.0,
        "strength": emp.strength,
        "availability": emp.availability.as_str(),
        "team": emp.team,
    })
}

/// Returns the roster rows whose ids the model picked, in the model's order.
/// Unknown ids are ignored.
fn order_by_ids(ids: Vec<i32>, roster: Vec<employee::Model>) -> Vec<employee::Model> {
    let mut by_id: std::collections::HashMap<i32, employee::Model> =
        roster.into_iter().map(|emp| (emp.id, emp)).collect();
    ids.into_iter().filter_map(|id| by_id.remove(&id)).collect()
}

/// Keyword fallback: +2 per skill named in the task, +1 per qualification,
/// plus a small availability bonus. Only positive scores survive.
pub fn keyword_match(
    task_description: &str,
    roster: Vec<employee::Model>,
) -> Vec<employee::Model> {
    let task_lower = task_description.to_lowercase();
    let mut scored: Vec<(employee::Model, f64)> = roster
        .into_iter()
        .filter_map(|emp| {
            let mut score = 0.0;
            for skill in emp.skills.iter() {
                if task_lower.contains(&skill.to_lowercase()) {
                    score += 2.0;
                }
            }
            for qualification in emp.qualifications.iter() {
                if task_lower.contains(&qualification.to_lowercase()) {
                    score += 1.0;
                }
            }
            score += match emp.availability {
                employee::Availability::Available => 1.0,
                employee::Availability::PartiallyAvailable => 0.5,
                employee::Availability::NotAvailable => 0.0,
            };
            if score > 0.0 {
                Some((emp, score))
            } else {
                None
            }
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(emp, _)| emp).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::employee::Availability;
    use entity::StringList;

    fn emp(id: i32, skills: &[&str], availability: Availability) -> employee::Model {
        employee::Model {
            id,
            name: format!("Employee {}", id),
            team: "Engineering".into(),
            availability,
            strength: 80,
            skills: StringList::from(skills),
            qualifications: StringList::from(&["B.Tech CS"][..]),
        }
    }

    #[test]
    fn keyword_match_ranks_by_skill_hits() {
        let roster = vec![
            emp(1, &["React", "CSS"], Availability::NotAvailable),
            emp(2, &["React", "TypeScript"], Availability::Available),
            emp(3, &["Go"], Availability::Available),
        ];
        let matched = keyword_match("Need a React and TypeScript frontend", roster);
        let ids: Vec<i32> = matched.iter().map(|e| e.id).collect();
        // 2 scores 2+2+1, 1 scores 2, 3 only carries the availability bonus.
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn keyword_match_counts_qualifications() {
        let roster = vec![emp(1, &["Go"], Availability::NotAvailable)];
        let matched = keyword_match("someone with a B.Tech CS degree", roster);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn keyword_match_drops_zero_scores() {
        let roster = vec![emp(1, &["Go"], Availability::NotAvailable)];
        let matched = keyword_match("need a kubernetes operator", roster);
        assert!(matched.is_empty());
    }

    #[test]
    fn order_by_ids_keeps_model_order_and_skips_unknown() {
        let roster = vec![
            emp(1, &["React"], Availability::Available),
            emp(2, &["Python"], Availability::Available),
        ];
        let ordered = order_by_ids(vec![2, 99, 1], roster);
        let ids: Vec<i32> = ordered.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
