//! Admin Activity Dashboard Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod chart;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod summary;
pub mod templates;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};
pub use templates::Templates;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    pub templates: Templates,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    pub fn new(db: Db, config: Config) -> std::result::Result<Self, minijinja::Error> {
        Ok(Self {
            db,
            config,
            templates: Templates::new()?,
        })
    }
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    use routes::*;

    Router::new()
        .route("/", get(index))
        .route("/add_upload", post(add_upload))
        .route("/add_interaction", post(add_interaction))
        .route("/add_behavior", post(add_behavior))
        .route("/summary", get(summary))
        .route("/health", get(health_check))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
