use std::env;

use crate::summary::{GroupBy, ReportWindow};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    /// Reporting window used by `/summary` when the query string names none
    pub summary_window: ReportWindow,
    /// Grouping used by `/summary` when the query string names none
    pub summary_group_by: GroupBy,
    /// Reject submissions with missing fields instead of silently redirecting
    pub strict_validation: bool,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/uploads.db".to_string());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or("Invalid DATABASE_MAX_CONNECTIONS")?;

        let summary_window = env::var("SUMMARY_WINDOW")
            .unwrap_or_else(|_| "today".to_string())
            .parse()
            .map_err(|e| format!("Invalid SUMMARY_WINDOW: {}", e))?;

        let summary_group_by = env::var("SUMMARY_GROUP_BY")
            .unwrap_or_else(|_| "admin".to_string())
            .parse()
            .map_err(|e| format!("Invalid SUMMARY_GROUP_BY: {}", e))?;

        let strict_validation = parse_bool(
            &env::var("STRICT_VALIDATION").unwrap_or_else(|_| "false".to_string()),
        )
        .ok_or("Invalid STRICT_VALIDATION")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            server_host,
            server_port,
            database_path,
            database_max_connections,
            summary_window,
            summary_group_by,
            strict_validation,
            environment,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
