use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

use crate::constants::{ACTIVITY_INTERACTION, ACTIVITY_UPLOAD};
use crate::db::Db;
use crate::models::{
    BehaviorEvent, InteractionEvent, NewBehavior, NewInteraction, NewUpload, UploadEvent,
};

async fn insert_behavior(
    conn: &mut SqliteConnection,
    admin_id: &str,
    at: NaiveDateTime,
    activity_type: &str,
    details: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO behaviors (admin_id, timestamp, activity_type, details) VALUES (?, ?, ?, ?)",
    )
    .bind(admin_id)
    .bind(at)
    .bind(activity_type)
    .bind(details)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Insert an upload event together with its derived behavior row
///
/// Both rows are written in one transaction. Returns the upload id.
pub async fn record_upload(
    db: &Db,
    upload: &NewUpload,
    at: NaiveDateTime,
) -> Result<i64, sqlx::Error> {
    let mut tx = db.begin().await?;

    let id = sqlx::query("INSERT INTO uploads (admin_id, timestamp, num_images) VALUES (?, ?, ?)")
        .bind(&upload.admin_id)
        .bind(at)
        .bind(upload.num_images)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    insert_behavior(
        &mut tx,
        &upload.admin_id,
        at,
        ACTIVITY_UPLOAD,
        &upload.behavior_details(),
    )
    .await?;

    tx.commit().await?;

    Ok(id)
}

/// Insert an interaction event together with its derived behavior row
///
/// Both rows are written in one transaction. Returns the interaction id.
pub async fn record_interaction(
    db: &Db,
    interaction: &NewInteraction,
    at: NaiveDateTime,
) -> Result<i64, sqlx::Error> {
    let mut tx = db.begin().await?;

    let id = sqlx::query(
        "INSERT INTO interactions (admin_id, timestamp, num_comments, num_reactions) VALUES (?, ?, ?, ?)",
    )
    .bind(&interaction.admin_id)
    .bind(at)
    .bind(interaction.num_comments)
    .bind(interaction.num_reactions)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    insert_behavior(
        &mut tx,
        &interaction.admin_id,
        at,
        ACTIVITY_INTERACTION,
        &interaction.behavior_details(),
    )
    .await?;

    tx.commit().await?;

    Ok(id)
}

/// Append a free-form behavior entry. Returns the behavior id.
pub async fn record_behavior(
    db: &Db,
    behavior: &NewBehavior,
    at: NaiveDateTime,
) -> Result<i64, sqlx::Error> {
    let mut conn = db.acquire().await?;

    insert_behavior(
        &mut conn,
        &behavior.admin_id,
        at,
        &behavior.activity_type,
        &behavior.details,
    )
    .await
}

// Row listings below are the read side of the event log for tooling and tests;
// the pages only ever read aggregates through `summary`.

/// All upload rows in insertion order
pub async fn fetch_uploads(db: &Db) -> Result<Vec<UploadEvent>, sqlx::Error> {
    sqlx::query_as("SELECT id, admin_id, timestamp, num_images FROM uploads ORDER BY id")
        .fetch_all(db)
        .await
}

/// All interaction rows in insertion order
pub async fn fetch_interactions(db: &Db) -> Result<Vec<InteractionEvent>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, admin_id, timestamp, num_comments, num_reactions FROM interactions ORDER BY id",
    )
    .fetch_all(db)
    .await
}

/// All behavior rows in insertion order
pub async fn fetch_behaviors(db: &Db) -> Result<Vec<BehaviorEvent>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, admin_id, timestamp, activity_type, details FROM behaviors ORDER BY id",
    )
    .fetch_all(db)
    .await
}
