use axum::{extract::State, response::Redirect, Form};
use chrono::Local;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::{BehaviorForm, InteractionForm, UploadForm};
use crate::AppState;

/// Where every ingestion handler sends the browser afterwards
const INDEX_PATH: &str = "/";

/// Decide how a rejected submission is answered
///
/// Missing fields are dropped silently (a plain redirect) unless strict
/// validation is enabled; every other error is returned to the client.
fn reject(state: &AppState, route: &str, err: AppError) -> Result<Redirect> {
    match err {
        AppError::MissingField(field) if !state.config.strict_validation => {
            tracing::warn!("Skipping {} submission: missing {}", route, field);
            Ok(Redirect::to(INDEX_PATH))
        }
        err => {
            tracing::warn!("Rejecting {} submission: {}", route, err);
            Err(err)
        }
    }
}

/// Record an upload event and its derived behavior entry
///
/// POST /add_upload
pub async fn add_upload(
    State(state): State<AppState>,
    Form(form): Form<UploadForm>,
) -> Result<Redirect> {
    let upload = match form.validate() {
        Ok(upload) => upload,
        Err(e) => return reject(&state, "upload", e),
    };

    let id = db::record_upload(&state.db, &upload, Local::now().naive_local()).await?;

    tracing::info!(
        "Upload {} recorded for admin {}: {} images",
        id,
        upload.admin_id,
        upload.num_images
    );

    Ok(Redirect::to(INDEX_PATH))
}

/// Record an interaction event and its derived behavior entry
///
/// POST /add_interaction
pub async fn add_interaction(
    State(state): State<AppState>,
    Form(form): Form<InteractionForm>,
) -> Result<Redirect> {
    let interaction = match form.validate() {
        Ok(interaction) => interaction,
        Err(e) => return reject(&state, "interaction", e),
    };

    let id = db::record_interaction(&state.db, &interaction, Local::now().naive_local()).await?;

    tracing::info!(
        "Interaction {} recorded for admin {}: {} comments, {} reactions",
        id,
        interaction.admin_id,
        interaction.num_comments,
        interaction.num_reactions
    );

    Ok(Redirect::to(INDEX_PATH))
}

/// Record a free-form behavior entry
///
/// POST /add_behavior
pub async fn add_behavior(
    State(state): State<AppState>,
    Form(form): Form<BehaviorForm>,
) -> Result<Redirect> {
    let behavior = match form.validate() {
        Ok(behavior) => behavior,
        Err(e) => return reject(&state, "behavior", e),
    };

    let id = db::record_behavior(&state.db, &behavior, Local::now().naive_local()).await?;

    tracing::info!(
        "Behavior {} recorded for admin {}: {}",
        id,
        behavior.admin_id,
        behavior.activity_type
    );

    Ok(Redirect::to(INDEX_PATH))
}
