use chrono::NaiveDateTime;
use serde::Serialize;

/// Validated upload submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUpload {
    pub admin_id: String,
    pub num_images: i64,
}

impl NewUpload {
    /// Details text of the behavior row derived from this upload
    pub fn behavior_details(&self) -> String {
        format!("Uploaded {} images", self.num_images)
    }
}

/// Validated interaction submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInteraction {
    pub admin_id: String,
    pub num_comments: i64,
    pub num_reactions: i64,
}

impl NewInteraction {
    /// Details text of the behavior row derived from this interaction
    pub fn behavior_details(&self) -> String {
        format!(
            "{} comments and {} reactions",
            self.num_comments, self.num_reactions
        )
    }
}

/// Validated free-form behavior submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBehavior {
    pub admin_id: String,
    pub activity_type: String,
    pub details: String,
}

/// Row of the `uploads` table
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UploadEvent {
    pub id: i64,
    pub admin_id: String,
    pub timestamp: NaiveDateTime,
    pub num_images: i64,
}

/// Row of the `interactions` table
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InteractionEvent {
    pub id: i64,
    pub admin_id: String,
    pub timestamp: NaiveDateTime,
    pub num_comments: i64,
    pub num_reactions: i64,
}

/// Row of the `behaviors` table
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BehaviorEvent {
    pub id: i64,
    pub admin_id: String,
    pub timestamp: NaiveDateTime,
    pub activity_type: String,
    pub details: String,
}
