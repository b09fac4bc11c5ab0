use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::Local;

use crate::chart::{render_bar_chart, to_data_uri};
use crate::error::Result;
use crate::summary::{build_summary, SummaryOptions, SummaryQuery};
use crate::AppState;

/// Aggregated report page with chart and behavior feed
///
/// GET /summary?window=<today|N>&group_by=<admin|admin_and_date>
///
/// Both query parameters are optional and default to the configured window
/// and grouping.
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Html<String>> {
    let defaults = SummaryOptions {
        window: state.config.summary_window,
        group_by: state.config.summary_group_by,
    };
    let options = query.resolve(defaults)?;
    let today = Local::now().date_naive();

    let summary = build_summary(&state.db, &options, today).await?;

    // Rendering is CPU bound; keep it off the async workers
    let series = summary.chart_series();
    let png = tokio::task::spawn_blocking(move || render_bar_chart(&series)).await??;

    tracing::info!(
        "Summary rendered for {} ({} to {}): {} upload groups, {} behaviors",
        summary.window_label,
        summary.start,
        summary.end,
        summary.uploads.len(),
        summary.behaviors.len()
    );

    Ok(Html(state.templates.render_summary(&summary, &to_data_uri(&png))?))
}
