use axum::{extract::State, response::Html};

use crate::error::Result;
use crate::AppState;

/// Input form page
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    Ok(Html(state.templates.render_index()?))
}
