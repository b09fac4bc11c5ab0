/// Upload events: one row per `/add_upload` submission
pub const UPLOADS: &str = "uploads";

/// Interaction events: one row per `/add_interaction` submission
pub const INTERACTIONS: &str = "interactions";

/// Append-only behavior log, written directly or derived from the tables above
pub const BEHAVIORS: &str = "behaviors";

/// Create-if-absent statements, executed in order on startup
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS uploads (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        admin_id TEXT,
        timestamp DATETIME,
        num_images INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS interactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        admin_id TEXT,
        timestamp DATETIME,
        num_comments INTEGER,
        num_reactions INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS behaviors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        admin_id TEXT,
        timestamp DATETIME,
        activity_type TEXT,
        details TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_uploads_timestamp ON uploads(timestamp)",
    "CREATE INDEX IF NOT EXISTS idx_interactions_timestamp ON interactions(timestamp)",
    "CREATE INDEX IF NOT EXISTS idx_behaviors_timestamp ON behaviors(timestamp)",
];

/// Every table the application owns
pub const ALL: [&str; 3] = [UPLOADS, INTERACTIONS, BEHAVIORS];
