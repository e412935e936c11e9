//! Router assembly: every dashboard endpoint plus the middleware stack
//! (request ids, HTTP tracing, CORS).

use axum::http::{self, HeaderName, HeaderValue, Method};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{extract::State, Json, Router};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use serde::Serialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{analytics, demands, employees, matching, projects, search, tables};

pub fn build_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/employees", get(employees::list))
        .route("/employees/filter", get(employees::filtered))
        .route("/employees/{id}", get(employees::by_id))
        .route("/employees/ai-search", post(search::ai_search_employees))
        .route(
            "/employees/ai-sql-search",
            post(search::ai_sql_search_employees),
        )
        .route("/demands", get(demands::list))
        .route("/demands/{id}", get(demands::by_id))
        .route("/demands/ai-sql-search", post(search::ai_sql_search_demands))
        .route("/projects", get(projects::list))
        .route("/projects/gantt", get(projects::gantt))
        .route("/analytics/workforce", get(analytics::workforce))
        .route("/analytics/teams", get(analytics::teams))
        .route("/analytics/teams/{team}/skills", get(analytics::skills_for_team))
        .route("/analytics/skills", get(analytics::skills))
        .route("/analytics/demands/pie", get(analytics::demands_pie))
        .route("/analytics/demands/bars", get(analytics::demands_bars))
        .route("/matching/positions", get(matching::positions))
        .route("/matching/positions/{id}", get(matching::report))
        .route("/tables", get(tables::list))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_allowed_origins)),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(allow_origin)
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "Demand Dashboard API running" }))
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = state
        .db
        .execute(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT 1".to_string(),
        ))
        .await
        .is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}
