//! Guard rails for model-generated SQL.
//!
//! Nothing the model produces reaches the database without passing through
//! [`sanitize_select`]: a single flattened `SELECT` against the requested
//! table, no semicolons, no write keywords, and only whitelisted columns.

use thiserror::Error;

/// Queryable columns of the demands table.
pub const DEMAND_COLUMNS: &[&str] = &[
    "id",
    "sno",
    "project_id",
    "account_id",
    "role",
    "role_code",
    "location",
    "status",
    "revised",
    "probability",
    "allocation_percentage",
    "billing_rate",
    "original_start_date",
    "allocation_end_date",
    "fulfillment_date",
    "start_month",
    "resource_mapped",
    "comment",
    "added_by",
    "added_on",
    "last_updated_by",
    "updated_on",
];

/// Queryable columns of the employees table.
pub const EMPLOYEE_COLUMNS: &[&str] = &[
    "id",
    "name",
    "skills",
    "qualifications",
    "strength",
    "availability",
    "team",
];

const FORBIDDEN: &[&str] = &[
    "insert ",
    "update ",
    "delete ",
    "drop ",
    "alter ",
    "create ",
    "truncate ",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SqlGuardError {
    #[error("statement is not a SELECT")]
    NotSelect,
    #[error("statement contains a semicolon")]
    EmbeddedSemicolon,
    #[error("forbidden keyword `{0}`")]
    ForbiddenKeyword(&'static str),
    #[error("column `{0}` is not queryable")]
    UnknownColumn(String),
    #[error("could not parse the statement")]
    Unparseable,
}

/// Cleans up raw model output and validates it into a single safe `SELECT`
/// against `table`. Returns the statement ready for execution.
pub fn sanitize_select(raw: &str, table: &str, allowed: &[&str]) -> Result<String, SqlGuardError> {
    let block = extract_sql_block(raw);
    let mut sql = block.trim().to_string();

    // Models sometimes prefix the bare language tag.
    if sql.get(..3).is_some_and(|tag| tag.eq_ignore_ascii_case("sql")) {
        sql = sql[3..].trim().to_string();
    }

    // Flatten to one line.
    sql = sql.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(stripped) = sql.strip_suffix(';') {
        sql = stripped.trim_end().to_string();
    }

    if sql.is_empty() {
        return Err(SqlGuardError::Unparseable);
    }

    sql = rewrite_from_target(&sql, table)?;

    let lowered = sql.to_lowercase();
    if !lowered.starts_with("select") {
        return Err(SqlGuardError::NotSelect);
    }
    if sql.contains(';') {
        return Err(SqlGuardError::EmbeddedSemicolon);
    }
    for keyword in FORBIDDEN {
        if lowered.contains(keyword) {
            return Err(SqlGuardError::ForbiddenKeyword(keyword.trim_end()));
        }
    }

    validate_select_columns(&lowered, allowed)?;

    Ok(sql)
}

/// Picks the fenced segment that carries the SELECT, if fences are present.
fn extract_sql_block(raw: &str) -> &str {
    if !raw.contains("```") {
        return raw;
    }
    raw.split("```")
        .find(|part| part.to_lowercase().contains("select"))
        .unwrap_or(raw)
}

/// Replaces the token after the first `FROM` with the requested table name.
fn rewrite_from_target(sql: &str, table: &str) -> Result<String, SqlGuardError> {
    let mut tokens: Vec<String> = sql.split(' ').map(|t| t.to_string()).collect();
    let from_idx = tokens
        .iter()
        .position(|t| t.eq_ignore_ascii_case("from"))
        .ok_or(SqlGuardError::Unparseable)?;
    if from_idx + 1 >= tokens.len() {
        return Err(SqlGuardError::Unparseable);
    }
    tokens[from_idx + 1] = table.to_string();
    Ok(tokens.join(" "))
}

/// Checks every selected column against the whitelist; `*` is always allowed.
fn validate_select_columns(lowered: &str, allowed: &[&str]) -> Result<(), SqlGuardError> {
    let rest = lowered
        .strip_prefix("select")
        .ok_or(SqlGuardError::NotSelect)?;
    let from_idx = rest.find(" from ").ok_or(SqlGuardError::Unparseable)?;
    let clause = rest[..from_idx].trim();
    if clause == "*" {
        return Ok(());
    }
    for item in clause.split(',') {
        let first = item
            .trim()
            .split(' ')
            .next()
            .ok_or(SqlGuardError::Unparseable)?;
        // Aggregates and expressions stay out of the whitelist on purpose.
        let column = first.rsplit('.').next().unwrap_or(first);
        if !allowed.contains(&column) {
            return Err(SqlGuardError::UnknownColumn(column.to_string()));
        }
    }
    Ok(())
}
