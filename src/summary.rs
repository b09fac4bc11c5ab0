//! Summary aggregation over a configurable reporting window
//!
//! One code path serves both the single-day report and the rolling report:
//! the window decides the date range, the grouping decides the SQL group key.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::chart::ChartSeries;
use crate::constants::DEFAULT_ROLLING_DAYS;
use crate::db::Db;
use crate::error::{AppError, Result};
use crate::models::{InteractionReport, UploadReport};

/// Trailing range of calendar days the summary covers, ending today inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWindow {
    Today,
    LastNDays(u32),
}

impl ReportWindow {
    /// Number of calendar days covered
    pub fn days(&self) -> u32 {
        match self {
            ReportWindow::Today => 1,
            ReportWindow::LastNDays(n) => *n,
        }
    }

    /// Inclusive (start, end) dates of the window
    pub fn date_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let back = u64::from(self.days().saturating_sub(1));
        let start = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
        (start, today)
    }

    pub fn is_single_day(&self) -> bool {
        self.days() == 1
    }
}

impl FromStr for ReportWindow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(ReportWindow::Today),
            "rolling" | "week" => Ok(ReportWindow::LastNDays(DEFAULT_ROLLING_DAYS)),
            other => match other.parse::<u32>() {
                Ok(1) => Ok(ReportWindow::Today),
                Ok(n) if n > 1 => Ok(ReportWindow::LastNDays(n)),
                _ => Err(format!(
                    "window must be \"today\" or a positive day count, got {:?}",
                    s
                )),
            },
        }
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWindow::Today => write!(f, "today"),
            ReportWindow::LastNDays(n) => write!(f, "last {} days", n),
        }
    }
}

/// Grouping key of the aggregated reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Admin,
    AdminAndDate,
}

impl GroupBy {
    fn group_columns(&self) -> &'static str {
        match self {
            GroupBy::Admin => "admin_id",
            GroupBy::AdminAndDate => "admin_id, DATE(timestamp)",
        }
    }

    fn day_column(&self) -> &'static str {
        match self {
            GroupBy::Admin => "NULL",
            GroupBy::AdminAndDate => "DATE(timestamp)",
        }
    }

    fn order_columns(&self) -> &'static str {
        match self {
            GroupBy::Admin => "admin_id ASC",
            GroupBy::AdminAndDate => "day ASC, admin_id ASC",
        }
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(GroupBy::Admin),
            "admin_and_date" | "date" => Ok(GroupBy::AdminAndDate),
            _ => Err(format!(
                "group_by must be \"admin\" or \"admin_and_date\", got {:?}",
                s
            )),
        }
    }
}

/// Window and grouping of one summary request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub window: ReportWindow,
    pub group_by: GroupBy,
}

/// Query string accepted by `/summary`; absent values fall back to the configuration
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub window: Option<String>,
    pub group_by: Option<String>,
}

impl SummaryQuery {
    pub fn resolve(&self, defaults: SummaryOptions) -> Result<SummaryOptions> {
        let window = match self.window.as_deref() {
            Some(w) if !w.is_empty() => w.parse().map_err(AppError::InvalidInput)?,
            _ => defaults.window,
        };
        let group_by = match self.group_by.as_deref() {
            Some(g) if !g.is_empty() => g.parse().map_err(AppError::InvalidInput)?,
            _ => defaults.group_by,
        };

        Ok(SummaryOptions { window, group_by })
    }
}

/// Behavior feed entry, oldest first
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BehaviorEntry {
    pub admin_id: String,
    pub activity_type: String,
    pub details: String,
    pub timestamp: chrono::NaiveDateTime,
}

/// Everything the summary page shows
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub window_label: String,
    pub grouped_by_date: bool,
    pub uploads: Vec<UploadReport>,
    pub interactions: Vec<InteractionReport>,
    pub behaviors: Vec<BehaviorEntry>,
    #[serde(skip)]
    pub options: SummaryOptions,
}

impl Summary {
    /// Total images and upload counts per report row, in report order
    pub fn chart_series(&self) -> ChartSeries {
        let window = self.options.window;
        let title = if window.is_single_day() {
            "Daily Upload Summary".to_string()
        } else {
            format!("Upload Summary (last {} days)", window.days())
        };
        let x_desc = if self.grouped_by_date {
            "Admin ID / Date"
        } else {
            "Admin ID"
        };

        ChartSeries {
            title,
            x_desc: x_desc.to_string(),
            y_desc: "Count".to_string(),
            labels: self.uploads.iter().map(UploadReport::label).collect(),
            images: self.uploads.iter().map(|r| r.total_images).collect(),
            uploads: self.uploads.iter().map(|r| r.total_uploads).collect(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct UploadRow {
    admin_id: String,
    total_uploads: i64,
    total_images: i64,
    day: Option<String>,
}

#[derive(sqlx::FromRow)]
struct InteractionRow {
    admin_id: String,
    events: i64,
    total_comments: i64,
    total_reactions: i64,
    day: Option<String>,
}

fn parse_day(day: Option<String>) -> Result<Option<NaiveDate>> {
    day.map(|d| {
        NaiveDate::parse_from_str(&d, "%Y-%m-%d").map_err(|e| {
            AppError::Database(sqlx::Error::Decode(
                format!("invalid stored date {:?}: {}", d, e).into(),
            ))
        })
    })
    .transpose()
}

// Totals use TOTAL() (floating point) cast back to INTEGER: the cast saturates
// instead of raising "integer overflow" on rows written outside the forms.

/// Aggregate uploads per group within the inclusive date range
pub async fn upload_reports(
    db: &Db,
    group_by: GroupBy,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<UploadReport>> {
    let sql = format!(
        "SELECT admin_id, COUNT(*) AS total_uploads, CAST(TOTAL(num_images) AS INTEGER) AS total_images, {day} AS day \
         FROM uploads WHERE DATE(timestamp) BETWEEN ? AND ? \
         GROUP BY {group} ORDER BY {order}",
        day = group_by.day_column(),
        group = group_by.group_columns(),
        order = group_by.order_columns(),
    );

    let rows: Vec<UploadRow> = sqlx::query_as(&sql)
        .bind(start.format("%Y-%m-%d").to_string())
        .bind(end.format("%Y-%m-%d").to_string())
        .fetch_all(db)
        .await?;

    rows.into_iter()
        .map(|row| {
            Ok(UploadReport {
                admin_id: row.admin_id,
                total_uploads: row.total_uploads,
                total_images: row.total_images,
                date: parse_day(row.day)?,
            })
        })
        .collect()
}

/// Aggregate interactions per group within the inclusive date range
pub async fn interaction_reports(
    db: &Db,
    group_by: GroupBy,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<InteractionReport>> {
    let sql = format!(
        "SELECT admin_id, COUNT(*) AS events, CAST(TOTAL(num_comments) AS INTEGER) AS total_comments, \
         CAST(TOTAL(num_reactions) AS INTEGER) AS total_reactions, {day} AS day \
         FROM interactions WHERE DATE(timestamp) BETWEEN ? AND ? \
         GROUP BY {group} ORDER BY {order}",
        day = group_by.day_column(),
        group = group_by.group_columns(),
        order = group_by.order_columns(),
    );

    let rows: Vec<InteractionRow> = sqlx::query_as(&sql)
        .bind(start.format("%Y-%m-%d").to_string())
        .bind(end.format("%Y-%m-%d").to_string())
        .fetch_all(db)
        .await?;

    rows.into_iter()
        .map(|row| {
            Ok(InteractionReport {
                admin_id: row.admin_id,
                events: row.events,
                total_comments: row.total_comments,
                total_reactions: row.total_reactions,
                date: parse_day(row.day)?,
            })
        })
        .collect()
}

/// Behavior entries within the inclusive date range, oldest first
pub async fn behavior_feed(db: &Db, start: NaiveDate, end: NaiveDate) -> Result<Vec<BehaviorEntry>> {
    let entries = sqlx::query_as(
        "SELECT admin_id, activity_type, details, timestamp FROM behaviors \
         WHERE DATE(timestamp) BETWEEN ? AND ? ORDER BY timestamp ASC, id ASC",
    )
    .bind(start.format("%Y-%m-%d").to_string())
    .bind(end.format("%Y-%m-%d").to_string())
    .fetch_all(db)
    .await?;

    Ok(entries)
}

/// Build the full summary for the window ending on `today`
pub async fn build_summary(db: &Db, options: &SummaryOptions, today: NaiveDate) -> Result<Summary> {
    let (start, end) = options.window.date_range(today);

    let uploads = upload_reports(db, options.group_by, start, end).await?;
    let interactions = interaction_reports(db, options.group_by, start, end).await?;
    let behaviors = behavior_feed(db, start, end).await?;

    tracing::debug!(
        "Summary {} to {}: {} upload groups, {} interaction groups, {} behaviors",
        start,
        end,
        uploads.len(),
        interactions.len(),
        behaviors.len()
    );

    Ok(Summary {
        start,
        end,
        window_label: options.window.to_string(),
        grouped_by_date: options.group_by == GroupBy::AdminAndDate,
        uploads,
        interactions,
        behaviors,
        options: *options,
    })
}
