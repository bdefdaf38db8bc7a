// End-to-end tests for the recipe routes
// Author: kelexine (https://github.com/kelexine)

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use recipebox::config::AppConfig;
use recipebox::server::{create_router, ALLOW_HEADERS, ALLOW_METHODS};
use recipebox::store::{self, OfflineStore, SharedStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(config: AppConfig, store: SharedStore) -> Router {
    create_router(config, store).unwrap()
}

async fn memory_store() -> SharedStore {
    store::connect("memory://").await.unwrap()
}

async fn app() -> Router {
    app_with(AppConfig::default(), memory_store().await)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    send_request(app, builder.body(body).unwrap()).await
}

async fn send_form(app: &Router, method: Method, uri: &str, form: impl Into<Body>) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(form.into())
        .unwrap();

    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, value)
}

fn toast() -> Value {
    json!({
        "title": "Toast",
        "ingredients": ["bread"],
        "instructions": "Toast it",
        "difficulty": 1,
        "time": 2
    })
}

async fn create(app: &Router, body: Value) -> String {
    let (status, _, value) = send(app, Method::POST, "/api/recipes", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    value["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_toast_lifecycle() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::POST, "/api/recipes", Some(toast())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Post saved successfully!");
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _, recipe) = send(&app, Method::GET, &format!("/api/recipes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recipe["id"], id.as_str());
    assert_eq!(recipe["title"], "Toast");
    assert_eq!(recipe["ingredients"], json!(["bread"]));
    assert_eq!(recipe["instructions"], "Toast it");
    assert_eq!(recipe["difficulty"], 1);
    assert_eq!(recipe["time"], 2);

    let (status, _, body) = send(&app, Method::DELETE, &format!("/api/recipes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Deleted!" }));

    let (status, _, body) = send(&app, Method::GET, &format!("/api/recipes/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn test_list_contains_every_created_recipe() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::GET, "/api/recipes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let mut ids = Vec::new();
    for title in ["Toast", "Soup", "Salad"] {
        ids.push(create(&app, json!({ "title": title })).await);
    }

    let (status, _, body) = send(&app, Method::GET, "/api/recipes", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(listed, ids.iter().map(String::as_str).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let app = app().await;
    let id = create(&app, toast()).await;

    let update = json!({
        "title": "French toast",
        "ingredients": ["bread", "egg", "milk"],
        "instructions": "Soak, then fry",
        "difficulty": 2,
        "time": 15
    });
    let (status, _, body) = send(&app, Method::PUT, &format!("/api/recipes/{}", id), Some(update.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Thing updated successfully!" }));

    let (_, _, recipe) = send(&app, Method::GET, &format!("/api/recipes/{}", id), None).await;
    let mut expected = update;
    expected["id"] = json!(id);
    assert_eq!(recipe, expected);
}

#[tokio::test]
async fn test_writes_to_unknown_id_still_succeed() {
    let app = app().await;
    let missing = uuid::Uuid::new_v4().to_string();

    let (status, _, body) = send(&app, Method::PUT, &format!("/api/recipes/{}", missing), Some(toast())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Thing updated successfully!");

    let (status, _, body) = send(&app, Method::DELETE, &format!("/api/recipes/{}", missing), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Deleted!");

    // The update did not create anything
    let (_, _, body) = send(&app, Method::GET, "/api/recipes", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_strict_writes_report_unknown_id() {
    let mut config = AppConfig::default();
    config.api.strict_writes = true;
    let app = app_with(config, memory_store().await);
    let missing = uuid::Uuid::new_v4().to_string();

    let (status, _, body) = send(&app, Method::PUT, &format!("/api/recipes/{}", missing), Some(toast())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _, _) = send(&app, Method::DELETE, &format!("/api/recipes/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Matching writes are unaffected
    let id = create(&app, toast()).await;
    let (status, _, _) = send(&app, Method::DELETE, &format!("/api/recipes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::GET, "/api/recipes/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not-an-id"));

    let (status, _, _) = send(&app, Method::PUT, "/api/recipes/not-an-id", Some(toast())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(&app, Method::DELETE, "/api/recipes/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mistyped_body_is_bad_request() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::POST, "/api/recipes", Some(json!({ "ingredients": "flour" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, _, body) = send(&app, Method::GET, "/api/recipes", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_empty_object_is_accepted() {
    let app = app().await;
    let id = create(&app, json!({})).await;

    let (status, _, recipe) = send(&app, Method::GET, &format!("/api/recipes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(recipe["title"].is_null());
}

#[tokio::test]
async fn test_cors_headers_on_every_response() {
    let app = app().await;
    let id = create(&app, toast()).await;

    let cases = vec![
        (Method::GET, "/api/recipes".to_string()),
        (Method::GET, format!("/api/recipes/{}", id)),
        (Method::GET, "/api/recipes/not-an-id".to_string()),
        (Method::GET, "/nowhere".to_string()),
        (Method::OPTIONS, "/api/recipes".to_string()),
        (Method::PATCH, "/api/recipes".to_string()),
    ];

    for (method, uri) in cases {
        let (status, headers, _) = send(&app, method.clone(), &uri, None).await;
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*", "{} {} ({})", method, uri, status);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
        assert!(headers.contains_key("x-request-id"));
    }
}

#[tokio::test]
async fn test_preflight_and_fallback() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::OPTIONS, "/api/recipes/anything", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _, body) = send(&app, Method::GET, "/api/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_offline_store_keeps_serving() {
    let app = app_with(AppConfig::default(), Arc::new(OfflineStore::new("connection refused")));
    let id = uuid::Uuid::new_v4().to_string();

    let (status, _, body) = send(&app, Method::POST, "/api/recipes", Some(toast())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));

    let (status, _, _) = send(&app, Method::GET, "/api/recipes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(&app, Method::GET, &format!("/api/recipes/{}", id), None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _, _) = send(&app, Method::PUT, &format!("/api/recipes/{}", id), Some(toast())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(&app, Method::DELETE, &format!("/api/recipes/{}", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["document_store"]["status"], "error");
}

#[tokio::test]
async fn test_health_reports_reachable_store() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["document_store"]["status"], "ok");
}

#[tokio::test]
async fn test_database_file_behind_router() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("file://{}", dir.path().join("recipes.db").display());

    let store = recipebox::store::connect(&url).await.unwrap();
    let app = app_with(AppConfig::default(), store.clone());
    let id = create(&app, toast()).await;
    store.close().await.unwrap();

    let reopened = recipebox::store::connect(&url).await.unwrap();
    let app = app_with(AppConfig::default(), reopened);
    let (status, _, recipe) = send(&app, Method::GET, &format!("/api/recipes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recipe["title"], "Toast");
}

#[tokio::test]
async fn test_fractional_numbers_round_trip() {
    let app = app().await;
    let id = create(&app, json!({ "title": "Tea", "difficulty": 0.5, "time": 2.5 })).await;

    let (status, _, recipe) = send(&app, Method::GET, &format!("/api/recipes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recipe["difficulty"], json!(0.5));
    assert_eq!(recipe["time"], json!(2.5));

    let (status, _, _) = send(&app, Method::PUT, &format!("/api/recipes/{}", id), Some(json!({ "time": 3.75 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, _, recipe) = send(&app, Method::GET, &format!("/api/recipes/{}", id), None).await;
    assert_eq!(recipe["time"], json!(3.75));
    assert!(recipe["difficulty"].is_null());
}

#[tokio::test]
async fn test_form_encoded_create_and_update() {
    let app = app().await;

    let (status, _, body) = send_form(
        &app,
        Method::POST,
        "/api/recipes",
        "title=Toast&ingredients=bread&ingredients=butter&instructions=Toast+it&difficulty=1&time=2",
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Post saved successfully!");
    let id = body["id"].as_str().unwrap().to_string();

    let (_, _, recipe) = send(&app, Method::GET, &format!("/api/recipes/{}", id), None).await;
    assert_eq!(recipe["title"], "Toast");
    assert_eq!(recipe["ingredients"], json!(["bread", "butter"]));
    assert_eq!(recipe["instructions"], "Toast it");
    assert_eq!(recipe["difficulty"], 1);
    assert_eq!(recipe["time"], 2);

    let uri = format!("/api/recipes/{}", id);
    let request = Request::builder()
        .method(Method::PUT)
        .uri(&uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded; charset=UTF-8")
        .body(Body::from("title=French+toast&time=2.5"))
        .unwrap();
    let (status, _, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Thing updated successfully!");

    let (_, _, recipe) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(recipe["title"], "French toast");
    assert_eq!(recipe["time"], json!(2.5));
    assert!(recipe["ingredients"].is_null());
}

#[tokio::test]
async fn test_form_encoded_bad_number_is_bad_request() {
    let app = app().await;

    let (status, _, body) = send_form(&app, Method::POST, "/api/recipes", "title=Toast&time=soon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("soon"));

    let (_, _, body) = send(&app, Method::GET, "/api/recipes", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_collection_accepts_trailing_slash() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::POST, "/api/recipes/", Some(toast())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _, body) = send(&app, Method::GET, "/api/recipes/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], id.as_str());
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let mut config = AppConfig::default();
    config.server.body_limit_bytes = 256;
    let app = app_with(config, memory_store().await);

    // No Content-Length header: the limit trips while the body is read.
    let oversized = json!({ "title": "Toast", "instructions": "x".repeat(1024) });
    let (status, headers, body) = send(&app, Method::POST, "/api/recipes", Some(oversized)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let (status, _, _) = send_form(&app, Method::POST, "/api/recipes", format!("title={}", "x".repeat(1024))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    // Bodies under the limit still go through
    let (status, _, _) = send(&app, Method::POST, "/api/recipes", Some(toast())).await;
    assert_eq!(status, StatusCode::CREATED);
}
