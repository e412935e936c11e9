mod common;

use api::analytics::{team_distribution, top_skills, workforce_summary, TOP_SKILLS};
use api::employees::roster;
use api::matching::{pipeline_stats, top_candidates, OPEN_POSITIONS};
use api::projects::{all_projects, gantt_chart, sort_projects, ProjectSort};
use api::search::distinct_roles;

#[tokio::test]
async fn workforce_summary_over_seeded_roster() {
    let ctx = common::setup_seeded().await;
    let rows = roster(ctx.db.as_ref()).await.unwrap();
    let summary = workforce_summary(&rows);
    assert_eq!(summary.total, 5);
    assert_eq!(summary.available, 3);
    assert_eq!(summary.partially_available, 1);
    assert_eq!(summary.not_available, 1);
    assert_eq!(summary.available_pct, 60);
    // (95 + 88 + 92 + 85 + 90) / 5 = 90
    assert_eq!(summary.avg_strength, 90);
}

#[tokio::test]
async fn team_and_skill_breakdowns_over_seeded_roster() {
    let ctx = common::setup_seeded().await;
    let rows = roster(ctx.db.as_ref()).await.unwrap();

    let teams = team_distribution(&rows);
    assert_eq!(teams.len(), 5);
    assert!(teams.iter().all(|t| t.count == 1));

    let skills = top_skills(&rows, TOP_SKILLS);
    assert_eq!(skills.len(), TOP_SKILLS);
    // Python (Bob + Emma) and React (Alice + Carol) lead the board.
    assert_eq!(skills[0].count, 2);
    assert!(skills.iter().take(2).any(|s| s.name == "Python"));
    assert!(skills.iter().take(2).any(|s| s.name == "React"));
}

#[tokio::test]
async fn matching_report_for_the_react_position() {
    let ctx = common::setup_seeded().await;
    let workforce = roster(ctx.db.as_ref()).await.unwrap();
    let workforce_size = workforce.len();

    let position = &OPEN_POSITIONS[0];
    let candidates = top_candidates(workforce, position.requirements);
    assert!(!candidates.is_empty());
    assert!(candidates.len() <= 5);
    // Alice (React, Available, 95 strength) tops the board.
    assert_eq!(candidates[0].employee.name, "Alice Johnson");
    assert!(candidates
        .windows(2)
        .all(|pair| pair[0].match_score >= pair[1].match_score));
    assert!(candidates.iter().all(|c| c.match_score >= 40));

    let stats = pipeline_stats(&candidates, workforce_size);
    assert_eq!(stats.open_positions, 4);
    assert!(stats.fill_rate_pct <= 100);
}

#[tokio::test]
async fn project_sorting_and_gantt_window() {
    let ctx = common::setup_seeded().await;
    let projects = all_projects(ctx.db.as_ref()).await.unwrap();
    assert_eq!(projects.len(), 4);

    let by_deadline = sort_projects(projects.clone(), ProjectSort::Deadline);
    assert_eq!(by_deadline[0].name, "Churn Model");
    let by_budget = sort_projects(projects.clone(), ProjectSort::Budget);
    assert_eq!(by_budget[0].name, "Billing Platform");
    let by_team = sort_projects(projects.clone(), ProjectSort::Team);
    assert_eq!(by_team[0].name, "Billing Platform");

    let chart = gantt_chart(&by_deadline);
    assert_eq!(chart.spans.len(), 4);
    let start = chart.window_start.unwrap();
    let end = chart.window_end.unwrap();
    assert!(start < end);
    assert_eq!(chart.total_days, (end - start).num_days());
    for span in &chart.spans {
        assert!(span.start < span.end);
    }
}

#[tokio::test]
async fn distinct_roles_deduplicate_for_the_sql_prompt() {
    let ctx = common::setup_seeded().await;
    let mut roles = distinct_roles(ctx.db.as_ref()).await.unwrap();
    roles.sort();
    assert_eq!(
        roles,
        vec![
            "Backend Engineer".to_string(),
            "DevOps Specialist".to_string(),
            "ML Engineer".to_string(),
            "React Developer".to_string(),
            "Sr. Frontend Developer".to_string(),
        ]
    );
}
