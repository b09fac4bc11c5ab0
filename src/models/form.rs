use serde::Deserialize;

use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{NewBehavior, NewInteraction, NewUpload};

/// Form body posted to `/add_upload`
#[derive(Debug, Default, Deserialize)]
pub struct UploadForm {
    pub admin_id: Option<String>,
    pub num_images: Option<String>,
}

/// Form body posted to `/add_interaction`
#[derive(Debug, Default, Deserialize)]
pub struct InteractionForm {
    pub admin_id: Option<String>,
    pub num_comments: Option<String>,
    pub num_reactions: Option<String>,
}

/// Form body posted to `/add_behavior`
#[derive(Debug, Default, Deserialize)]
pub struct BehaviorForm {
    pub admin_id: Option<String>,
    pub activity_type: Option<String>,
    pub details: Option<String>,
}

/// Return the field value, treating an absent field the same as an empty one
fn required<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::MissingField(field)),
    }
}

/// Parse a count field as an integer in `0..=MAX_COUNT`
fn parse_count(field: &'static str, value: &str) -> Result<i64> {
    match value.trim().parse::<i64>() {
        Ok(n) if (0..=MAX_COUNT).contains(&n) => Ok(n),
        _ => Err(AppError::InvalidNumeric {
            field,
            value: value.to_string(),
        }),
    }
}

impl UploadForm {
    pub fn validate(&self) -> Result<NewUpload> {
        let admin_id = required(FIELD_ADMIN_ID, &self.admin_id)?;
        let num_images = required(FIELD_NUM_IMAGES, &self.num_images)?;

        Ok(NewUpload {
            admin_id: admin_id.to_string(),
            num_images: parse_count(FIELD_NUM_IMAGES, num_images)?,
        })
    }
}

impl InteractionForm {
    pub fn validate(&self) -> Result<NewInteraction> {
        let admin_id = required(FIELD_ADMIN_ID, &self.admin_id)?;
        let num_comments = required(FIELD_NUM_COMMENTS, &self.num_comments)?;
        let num_reactions = required(FIELD_NUM_REACTIONS, &self.num_reactions)?;

        Ok(NewInteraction {
            admin_id: admin_id.to_string(),
            num_comments: parse_count(FIELD_NUM_COMMENTS, num_comments)?,
            num_reactions: parse_count(FIELD_NUM_REACTIONS, num_reactions)?,
        })
    }
}

impl BehaviorForm {
    pub fn validate(&self) -> Result<NewBehavior> {
        Ok(NewBehavior {
            admin_id: required(FIELD_ADMIN_ID, &self.admin_id)?.to_string(),
            activity_type: required(FIELD_ACTIVITY_TYPE, &self.activity_type)?.to_string(),
            details: required(FIELD_DETAILS, &self.details)?.to_string(),
        })
    }
}
