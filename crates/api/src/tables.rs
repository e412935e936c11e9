//! Table-management surface: the list of public tables the upload modal and
//! the SQL search target picker read.

use axum::extract::State;
use axum::Json;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, Statement};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

pub async fn public_tables(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    let statement = Statement::from_string(
        DatabaseBackend::Postgres,
        "SELECT table_name FROM information_schema.tables \
         WHERE table_schema = 'public' ORDER BY table_name"
            .to_string(),
    );
    let rows = db.query_all(statement).await?;
    let mut tables = Vec::with_capacity(rows.len());
    for row in rows {
        tables.push(row.try_get::<String>("", "table_name")?);
    }
    Ok(tables)
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<TablesResponse>> {
    let tables = public_tables(state.db.as_ref()).await?;
    Ok(Json(TablesResponse { tables }))
}
