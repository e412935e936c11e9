use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::agent::TaskAgent;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub agent: TaskAgent,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, agent: TaskAgent) -> Self {
        Self { db, agent }
    }
}
