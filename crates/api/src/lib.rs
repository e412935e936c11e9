//! HTTP API for the demand dashboard: employee and demand listings, chart
//! aggregations, match scoring, and the AI search boundary.

pub mod agent;
pub mod analytics;
pub mod demands;
pub mod employees;
pub mod error;
pub mod matching;
pub mod projects;
pub mod routes;
pub mod search;
pub mod seed;
pub mod state;
pub mod tables;

pub use error::{ApiError, ApiResult};
pub use state::AppState;
