use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use logiclab_core::Database;
use logiclab_server::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(Database::open_in_memory().unwrap()), "/api")
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

#[tokio::test]
async fn create_get_delete_scenario() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({ "firstName": "Ana", "lastName": "Lee", "email": "ana@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({ "id": 1, "firstName": "Ana", "lastName": "Lee", "email": "ana@x.com" })
    );

    let (status, fetched) = send(&app, Method::GET, "/api/employees/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = send(&app, Method::DELETE, "/api/employees/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, "/api/employees/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let (status, body) = send(&app, Method::DELETE, "/api/employees/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "employee not found: 1");
}

#[tokio::test]
async fn post_ignores_client_supplied_id() {
    let app = app();

    send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({ "firstName": "Ana" })),
    )
    .await;
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({ "id": 1, "firstName": "Ben" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 2);

    let (_, list) = send(&app, Method::GET, "/api/employees", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn put_updates_existing_record() {
    let app = app();

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({ "firstName": "Ana", "lastName": "Lee", "email": "ana@x.com" })),
    )
    .await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/employees",
        Some(json!({ "id": created["id"], "firstName": "Anna", "lastName": "Lee", "email": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);

    let (_, list) = send(&app, Method::GET, "/api/employees", None).await;
    assert_eq!(
        list,
        json!([{ "id": 1, "firstName": "Anna", "lastName": "Lee", "email": null }])
    );
}

#[tokio::test]
async fn put_without_id_creates_record() {
    let app = app();

    let (status, saved) = send(
        &app,
        Method::PUT,
        "/api/employees",
        Some(json!({ "firstName": "Cleo" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["id"], 1);
    assert_eq!(saved["email"], Value::Null);
}

#[tokio::test]
async fn put_with_null_id_creates_record() {
    let app = app();

    let (status, saved) = send(
        &app,
        Method::PUT,
        "/api/employees",
        Some(json!({ "id": null, "firstName": "Ana" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["id"], 1);
    assert_eq!(saved["firstName"], "Ana");
}

#[tokio::test]
async fn list_starts_empty() {
    let app = app();

    let (status, list) = send(&app, Method::GET, "/api/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_requests_are_rejected_by_extractors() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/api/employees/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/employees")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn routes_live_under_base_path_only() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/employees", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let root = router(AppState::new(Database::open_in_memory().unwrap()), "");
    let (status, list) = send(&root, Method::GET, "/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}
