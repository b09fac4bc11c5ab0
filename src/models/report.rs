use chrono::NaiveDate;
use serde::Serialize;

/// Aggregated uploads for one admin (and one day, when grouped by date)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    pub admin_id: String,
    /// Number of upload events
    pub total_uploads: i64,
    /// Sum of `num_images` across those events
    pub total_images: i64,
    pub date: Option<NaiveDate>,
}

/// Aggregated interactions for one admin (and one day, when grouped by date)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionReport {
    pub admin_id: String,
    pub events: i64,
    pub total_comments: i64,
    pub total_reactions: i64,
    pub date: Option<NaiveDate>,
}

impl UploadReport {
    /// Category label used on the chart's x axis
    pub fn label(&self) -> String {
        match self.date {
            Some(date) => format!("{} {}", self.admin_id, date.format("%m-%d")),
            None => self.admin_id.clone(),
        }
    }
}
