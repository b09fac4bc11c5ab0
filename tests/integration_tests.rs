//! Integration tests for the Admin Activity Dashboard
//!
//! These tests verify the complete request/response cycle for all endpoints.

use activity_dashboard::constants::MAX_COUNT;
use activity_dashboard::summary::{GroupBy, ReportWindow};
use activity_dashboard::{create_router, db, AppState, Config, Db};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Helpers
// =============================================================================

/// Create a test configuration for the database at `database_path`
fn test_config(database_path: String) -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0, // Random port
        database_path,
        database_max_connections: 1,
        summary_window: ReportWindow::Today,
        summary_group_by: GroupBy::Admin,
        strict_validation: false,
        environment: "test".to_string(),
    }
}

/// Create a test database in a temporary directory
async fn create_test_db(temp_dir: &TempDir) -> (Db, Config) {
    let db_path = temp_dir.path().join("uploads.db");
    let config = test_config(db_path.to_string_lossy().into_owned());
    let db = activity_dashboard::open_database(&config)
        .await
        .expect("Failed to create test database");
    (db, config)
}

/// Create a test app router
fn create_test_app(db: Db, config: Config) -> Router {
    let state = AppState::new(db, config).expect("Failed to compile templates");
    create_router(state)
}

/// Create a POST request with a form-encoded body
fn make_form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Create a GET request
fn make_get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Read the response body as text
async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Parse response body as JSON
async fn body_to_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_redirects_to_index(response: &axum::response::Response) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

async fn row_counts(db: &Db) -> (usize, usize, usize) {
    (
        db::fetch_uploads(db).await.unwrap().len(),
        db::fetch_interactions(db).await.unwrap().len(),
        db::fetch_behaviors(db).await.unwrap().len(),
    )
}

// =============================================================================
// Page Tests
// =============================================================================

#[tokio::test]
async fn test_index_renders_forms() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;
    let app = create_test_app(db, config);

    let response = app.oneshot(make_get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("/add_upload"));
    assert!(html.contains("/add_interaction"));
    assert!(html.contains("/add_behavior"));
}

#[tokio::test]
async fn test_health_check() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;
    let app = create_test_app(db, config);

    let response = app.oneshot(make_get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");
}

// =============================================================================
// Ingestion Tests
// =============================================================================

#[tokio::test]
async fn test_add_upload_records_event_and_behavior() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;
    let app = create_test_app(db.clone(), config);

    let response = app
        .oneshot(make_form_request("/add_upload", "admin_id=alice&num_images=5"))
        .await
        .unwrap();

    assert_redirects_to_index(&response);

    let uploads = db::fetch_uploads(&db).await.unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].admin_id, "alice");
    assert_eq!(uploads[0].num_images, 5);

    let behaviors = db::fetch_behaviors(&db).await.unwrap();
    assert_eq!(behaviors.len(), 1);
    assert_eq!(behaviors[0].admin_id, "alice");
    assert_eq!(behaviors[0].activity_type, "upload");
    assert_eq!(behaviors[0].details, "Uploaded 5 images");
}

#[tokio::test]
async fn test_add_interaction_records_event_and_behavior() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;
    let app = create_test_app(db.clone(), config);

    let response = app
        .oneshot(make_form_request(
            "/add_interaction",
            "admin_id=bob&num_comments=3&num_reactions=10",
        ))
        .await
        .unwrap();

    assert_redirects_to_index(&response);

    let interactions = db::fetch_interactions(&db).await.unwrap();
    assert_eq!(interactions.len(), 1);
    assert_eq!(interactions[0].num_comments, 3);
    assert_eq!(interactions[0].num_reactions, 10);

    let behaviors = db::fetch_behaviors(&db).await.unwrap();
    assert_eq!(behaviors.len(), 1);
    assert_eq!(behaviors[0].activity_type, "interaction");
    assert_eq!(behaviors[0].details, "3 comments and 10 reactions");
}

#[tokio::test]
async fn test_add_behavior_records_single_row() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;
    let app = create_test_app(db.clone(), config);

    let response = app
        .oneshot(make_form_request(
            "/add_behavior",
            "admin_id=carol&activity_type=moderation&details=Pinned+the+rules+post",
        ))
        .await
        .unwrap();

    assert_redirects_to_index(&response);
    assert_eq!(row_counts(&db).await, (0, 0, 1));

    let behaviors = db::fetch_behaviors(&db).await.unwrap();
    assert_eq!(behaviors[0].activity_type, "moderation");
    assert_eq!(behaviors[0].details, "Pinned the rules post");
}

#[tokio::test]
async fn test_missing_fields_redirect_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;

    let cases = [
        ("/add_upload", "admin_id=&num_images=5"),
        ("/add_upload", "admin_id=alice"),
        ("/add_interaction", "admin_id=bob&num_comments=1&num_reactions="),
        ("/add_interaction", "num_comments=1&num_reactions=2"),
        ("/add_behavior", "admin_id=carol&activity_type=note"),
        ("/add_behavior", "admin_id=carol&activity_type=&details=text"),
    ];

    for (uri, body) in cases {
        let app = create_test_app(db.clone(), config.clone());
        let response = app.oneshot(make_form_request(uri, body)).await.unwrap();
        assert_redirects_to_index(&response);
    }

    assert_eq!(row_counts(&db).await, (0, 0, 0));
}

#[tokio::test]
async fn test_missing_fields_rejected_in_strict_mode() {
    let temp_dir = TempDir::new().unwrap();
    let (db, mut config) = create_test_db(&temp_dir).await;
    config.strict_validation = true;
    let app = create_test_app(db.clone(), config);

    let response = app
        .oneshot(make_form_request("/add_upload", "admin_id=&num_images=5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("admin_id"));
    assert_eq!(row_counts(&db).await, (0, 0, 0));
}

#[tokio::test]
async fn test_invalid_numeric_returns_bad_request() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;

    let cases = [
        ("/add_upload", "admin_id=alice&num_images=lots"),
        ("/add_upload", "admin_id=alice&num_images=-2"),
        ("/add_interaction", "admin_id=bob&num_comments=1&num_reactions=2.5"),
    ];

    for (uri, body) in cases {
        let app = create_test_app(db.clone(), config.clone());
        let response = app.oneshot(make_form_request(uri, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", uri, body);
    }

    assert_eq!(row_counts(&db).await, (0, 0, 0));
}

#[tokio::test]
async fn test_counts_beyond_limit_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;

    let cases = [
        ("/add_upload", "admin_id=alice&num_images=5000000000000000000"),
        ("/add_upload", "admin_id=alice&num_images=1000001"),
        ("/add_interaction", "admin_id=bob&num_comments=9223372036854775807&num_reactions=1"),
    ];

    for (uri, body) in cases {
        let app = create_test_app(db.clone(), config.clone());
        let response = app.oneshot(make_form_request(uri, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", uri, body);
    }

    assert_eq!(row_counts(&db).await, (0, 0, 0));
}

// =============================================================================
// Summary Tests
// =============================================================================

#[tokio::test]
async fn test_summary_with_largest_accepted_counts() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;

    let upload = format!("admin_id=alice&num_images={}", MAX_COUNT);
    let interaction = format!(
        "admin_id=alice&num_comments={}&num_reactions={}",
        MAX_COUNT, MAX_COUNT
    );
    for _ in 0..2 {
        for (uri, body) in [("/add_upload", &upload), ("/add_interaction", &interaction)] {
            let app = create_test_app(db.clone(), config.clone());
            let response = app.oneshot(make_form_request(uri, body)).await.unwrap();
            assert_redirects_to_index(&response);
        }
    }

    let app = create_test_app(db, config);
    let response = app.oneshot(make_get_request("/summary")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_string(response.into_body()).await;
    let doubled = 2 * MAX_COUNT;
    assert!(body.contains(&format!("<td>alice</td><td>2</td><td>{}</td>", doubled)));
    assert!(body.contains(&format!("<td>{}</td><td>{}</td></tr>", doubled, doubled)));
    assert!(body.contains("data:image/png;base64,"));
}

#[tokio::test]
async fn test_summary_reports_todays_uploads() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;

    for body in ["admin_id=alice&num_images=5", "admin_id=bob&num_images=2"] {
        let app = create_test_app(db.clone(), config.clone());
        let response = app
            .oneshot(make_form_request("/add_upload", body))
            .await
            .unwrap();
        assert_redirects_to_index(&response);
    }

    let app = create_test_app(db, config);
    let response = app.oneshot(make_get_request("/summary")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("<td>alice</td><td>1</td><td>5</td>"));
    assert!(html.contains("<td>bob</td><td>1</td><td>2</td>"));
    assert!(html.contains("data:image/png;base64,"));
    assert!(html.contains("Uploaded 5 images"));
}

#[tokio::test]
async fn test_summary_on_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;
    let app = create_test_app(db, config);

    let response = app.oneshot(make_get_request("/summary")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("No uploads recorded"));
    // Empty chart is still a real PNG, not an empty data URI
    assert!(html.contains("data:image/png;base64,iVBOR"));
}

#[tokio::test]
async fn test_summary_rolling_window_query() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;

    let app = create_test_app(db.clone(), config.clone());
    let response = app
        .oneshot(make_form_request("/add_upload", "admin_id=alice&num_images=4"))
        .await
        .unwrap();
    assert_redirects_to_index(&response);

    let app = create_test_app(db, config);
    let response = app
        .oneshot(make_get_request("/summary?window=7&group_by=admin_and_date"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("last 7 days"));
    assert!(html.contains("<th>Date</th>"));
}

#[tokio::test]
async fn test_summary_rejects_bad_query() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;

    for uri in ["/summary?window=0", "/summary?group_by=month"] {
        let app = create_test_app(db.clone(), config.clone());
        let response = app.oneshot(make_get_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

// =============================================================================
// Store Tests
// =============================================================================

#[tokio::test]
async fn test_reopening_database_keeps_data() {
    let temp_dir = TempDir::new().unwrap();
    let (db, config) = create_test_db(&temp_dir).await;

    let app = create_test_app(db.clone(), config.clone());
    let response = app
        .oneshot(make_form_request("/add_upload", "admin_id=alice&num_images=1"))
        .await
        .unwrap();
    assert_redirects_to_index(&response);
    db.close().await;

    // Schema creation runs again on open and must not drop rows
    let reopened = activity_dashboard::open_database(&config).await.unwrap();
    assert_eq!(row_counts(&reopened).await, (1, 0, 1));
}
