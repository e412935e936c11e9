use std::sync::Arc;

use api::seed::{seed_demo, SeededRecords};
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

pub struct TestContext {
    pub db: Arc<DatabaseConnection>,
    pub seeded: SeededRecords,
}

pub async fn setup_seeded() -> TestContext {
    let conn = Database::connect("sqlite::memory:")
        .await
        .expect("sqlite in-memory connection");
    bootstrap_sqlite(&conn).await;
    let seeded = seed_demo(&conn).await.expect("seed demo data");
    TestContext {
        db: Arc::new(conn),
        seeded,
    }
}

async fn bootstrap_sqlite(db: &DatabaseConnection) {
    for ddl in [
        r#"
        CREATE TABLE employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            team TEXT NOT NULL,
            availability TEXT NOT NULL,
            strength INTEGER NOT NULL DEFAULT 0,
            skills TEXT NOT NULL DEFAULT '[]',
            qualifications TEXT NOT NULL DEFAULT '[]'
        );
        "#,
        r#"
        CREATE TABLE demands (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sno INTEGER,
            project_id INTEGER,
            account_id INTEGER,
            role TEXT,
            role_code TEXT,
            location TEXT,
            status TEXT,
            revised TEXT,
            probability INTEGER,
            allocation_percentage INTEGER,
            billing_rate REAL,
            original_start_date TEXT,
            allocation_end_date TEXT,
            fulfillment_date TEXT,
            start_month TEXT,
            resource_mapped TEXT,
            comment TEXT,
            added_by TEXT,
            added_on TEXT,
            last_updated_by TEXT,
            updated_on TEXT
        );
        "#,
        r#"
        CREATE TABLE projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            budget INTEGER NOT NULL DEFAULT 0,
            duration_weeks INTEGER NOT NULL DEFAULT 0,
            progress INTEGER NOT NULL DEFAULT 0,
            deadline TEXT NOT NULL,
            team_members TEXT NOT NULL DEFAULT '[]'
        );
        "#,
    ] {
        db.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await
        .expect("bootstrap DDL");
    }
}
