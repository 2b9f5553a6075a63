use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use channel_origins::{
    config::{Config, DatabaseConfig},
    context::AppContext,
    database::Database,
    web::{AppState, WebServer},
};

// Helper function to send requests to the app
async fn send_request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request_builder = Request::builder().method(method).uri(uri);

    let request = if let Some(body) = body {
        request_builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    } else {
        request_builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!({}))
    };

    (status, json)
}

async fn create_app() -> Router {
    let mut config = Config::default();
    config.database = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
    };

    let database = Database::new(&config.database).await.unwrap();
    database.migrate().await.unwrap();

    WebServer::create_router(AppState {
        context: AppContext::new(config, database),
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_app().await;

    let (status, response) = send_request(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], true);
    assert_eq!(response["data"]["status"], "healthy");
    assert!(response.get("timestamp").is_some());
}

#[tokio::test]
async fn test_origin_server_lifecycle_routes() {
    let app = create_app().await;

    let (status, response) = send_request(
        &app,
        Method::PUT,
        "/api/origin-servers",
        Some(json!({
            "name": "studio",
            "address": "http://old:32400/",
            "credential": "tok1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["data"]["name"], "studio");
    assert_eq!(response["data"]["address"], "http://old:32400");
    assert_eq!(response["data"]["displayIndex"], 0);

    let (status, _) = send_request(
        &app,
        Method::PUT,
        "/api/channels",
        Some(json!({
            "number": 1,
            "name": "News",
            "offline": { "mode": "pic" },
            "programs": [
                {
                    "duration": 10,
                    "icon": "http://old:32400/library/metadata/5/thumb/9?X-Plex-Token=tok1",
                    "originKey": "studio"
                },
                { "duration": 20, "originKey": "other" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, response) = send_request(
        &app,
        Method::POST,
        "/api/origin-servers",
        Some(json!({
            "name": "studio",
            "address": "http://new:32400",
            "credential": "tok2"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["rows"][0]["entityLabel"], "News");
    assert_eq!(response["data"]["rows"][0]["modifiedCount"], 1);
    assert_eq!(response["data"]["summary"]["modified"], 1);

    let (status, response) = send_request(&app, Method::GET, "/api/channels/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response["data"]["programs"][0]["icon"],
        "http://new:32400/library/metadata/5/thumb/9?credential=tok2"
    );

    let (status, response) = send_request(
        &app,
        Method::DELETE,
        "/api/origin-servers",
        Some(json!({ "name": "studio" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"]["rows"][0]["destroyedCount"], 1);

    let (status, response) = send_request(&app, Method::GET, "/api/origin-servers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"], json!([]));
}

#[tokio::test]
async fn test_error_status_codes() {
    let app = create_app().await;

    let (status, response) = send_request(
        &app,
        Method::POST,
        "/api/origin-servers",
        Some(json!({ "address": "http://new:32400", "credential": "tok2" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "Missing server name from request");

    let (status, _) = send_request(
        &app,
        Method::POST,
        "/api/origin-servers",
        Some(json!({ "name": "ghost", "address": "http://new:32400", "credential": "tok2" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_request(&app, Method::GET, "/api/channels/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_library_routes() {
    let app = create_app().await;

    let (status, _) = send_request(
        &app,
        Method::PUT,
        "/api/fillers",
        Some(json!({ "id": "f1", "name": "Bumpers", "content": [{ "duration": 5 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, response) = send_request(&app, Method::GET, "/api/fillers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["data"][0]["name"], "Bumpers");

    let (status, _) = send_request(
        &app,
        Method::PUT,
        "/api/custom-shows",
        Some(json!({ "id": "", "name": "Marathon" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
