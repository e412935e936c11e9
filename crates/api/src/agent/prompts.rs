//! Prompt builders for the two model tasks: staffing recommendations and
//! SQL generation. Both instruct the model to answer in a strict format;
//! the callers still treat the reply as untrusted.

use serde_json::Value;

pub fn recommendation_prompt(task_description: &str, roster: &Value) -> String {
    format!(
        r#"You are an expert at matching employees to tasks based on their skills and qualifications.

Given the following task description and list of employees with their details,
determine which employees are most suitable to complete this task.

TASK DESCRIPTION:
{task}

AVAILABLE EMPLOYEES:
{roster}

Analyze the task and the employee profiles, then respond with JSON of this shape:
{{
    "task_analysis": "brief analysis of what skills/experience the task requires",
    "suitable_employee_ids": [id1, id2, id3],
    "reasoning": "brief explanation of why these employees match the task"
}}

Rank suitable_employee_ids by suitability, most suitable first.
Important: return ONLY valid JSON, no additional text."#,
        task = task_description,
        roster = serde_json::to_string_pretty(roster).unwrap_or_else(|_| "[]".to_string()),
    )
}

pub fn sql_prompt(
    task_description: &str,
    table: &str,
    known_roles: &[String],
    allowed_columns: &[&str],
) -> String {
    let roles_context = known_roles
        .iter()
        .map(|role| format!("- {}", role))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"You are a PostgreSQL expert. Convert the user's requirement into ONE SAFE SELECT query.

### CONTEXT (existing roles):
{roles}

### INSTRUCTIONS:
1. Semantic matching: map skills to roles (e.g. "React" -> "Sr. Frontend Developer").
2. Filtering: use `ILIKE` with wildcards for flexibility, e.g. `WHERE role ILIKE '%Frontend%'`.
3. Constraints:
   - Table: {table}
   - Columns: {columns} OR `*`.
   - NO semicolon at the end.
   - NO `INSERT`, `UPDATE`, `DELETE`.

### USER REQUEST:
"{task}""#,
        roles = roles_context,
        table = table,
        columns = allowed_columns.join(", "),
        task = task_description,
    )
}
