mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use api::{routes, AppState};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use obs::{init_tracing, ObsConfig};
use sea_orm::Database;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "demand-server", version, about = "Demand dashboard API")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Run the HTTP server
    Serve {
        #[arg(long, env = "BIND", default_value = "127.0.0.1:8000")]
        bind: String,
    },
    /// Run migrations (up|down|reset)
    Migrate {
        #[arg(long, default_value = "up")]
        action: String,
    },
    /// Seed demo data
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing(ObsConfig::default())?;

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let db = Arc::new(Database::connect(&config.database_url).await?);

    match cli.cmd {
        Cmd::Migrate { action } => {
            match action.as_str() {
                "up" => Migrator::up(db.as_ref(), None).await?,
                "down" => Migrator::down(db.as_ref(), None).await?,
                "reset" => Migrator::reset(db.as_ref()).await?,
                _ => eprintln!("Unknown action: {} (use up|down|reset)", action),
            }
            Ok(())
        }
        Cmd::Seed => {
            Migrator::up(db.as_ref(), None).await?;
            let seeded = api::seed::seed_demo(db.as_ref()).await?;
            info!(
                employees = seeded.employees.len(),
                demands = seeded.demands.len(),
                projects = seeded.projects.len(),
                "demo data seeded"
            );
            Ok(())
        }
        Cmd::Serve { bind } => {
            Migrator::up(db.as_ref(), None).await?;
            let state = AppState::new(db.clone(), config.agent());
            let app = routes::build_router(state, &config.cors_allowed_origins);

            let addr: SocketAddr = bind.parse()?;
            let listener = TcpListener::bind(addr).await?;
            info!("listening on http://{}", addr);
            axum::serve(listener, app.into_make_service())
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    use tokio::signal;
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler")
    };
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! { _ = ctrl_c => {}, _ = terminate => {}, }
}
