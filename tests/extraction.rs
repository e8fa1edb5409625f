//! In-process tests of the request adapter through the full router.

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use loko_extensions::components::reference_components;
use loko_extensions::config::ServiceConfig;
use loko_extensions::http::build_router;
use loko_extensions::{ServiceError, ValueArgs};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{body_json, json_request, multipart_request};

fn app() -> Router {
    build_router(&ServiceConfig::default(), reference_components())
}

#[tokio::test]
async fn test_json_value_and_args() {
    let res = app()
        .oneshot(json_request("/echo", r#"{"value": {"x": 1}, "args": {"n": "3"}}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({"value": {"x": 1}, "args": {"n": "3"}}));
}

#[tokio::test]
async fn test_json_args_as_encoded_string() {
    let res = app()
        .oneshot(json_request("/echo", r#"{"value": 7, "args": "{\"n\": \"3\"}"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["args"], json!({"n": "3"}));
}

#[tokio::test]
async fn test_missing_args_resolve_to_empty_mapping() {
    let res = app()
        .oneshot(json_request("/echo", r#"{"value": "hi"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!({"value": "hi", "args": {}}));
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let res = app()
        .oneshot(json_request("/echo", r#"{"value": "#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(res).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    assert!(body.get("value").is_none());
}

#[tokio::test]
async fn test_file_and_args() {
    let req = multipart_request(
        "/files",
        &[("file", Some("a.txt"), "hello world"), ("args", None, r#"{"n": "2"}"#)],
    );
    let res = app().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["filename"], "a.txt");
    assert_eq!(body["size"], 11);
    assert_eq!(body["args"], json!({"n": "2"}));
}

#[tokio::test]
async fn test_missing_file_part() {
    let req = multipart_request("/files", &[("args", None, r#"{"n": "2"}"#)]);
    let res = app().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(res).await["error"], "Missing file part `file`");
}

#[tokio::test]
async fn test_file_endpoint_rejects_json() {
    let res = app()
        .oneshot(json_request("/files", r#"{"value": 1}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_identical_requests_give_identical_results() {
    let body = r#"{"value": {"x": [1, 2]}, "args": {"n": "3", "mode": "fast"}}"#;
    let first = body_json(app().oneshot(json_request("/echo", body)).await.unwrap()).await;
    let second = body_json(app().oneshot(json_request("/echo", body)).await.unwrap()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_custom_field_names() {
    let mut config = ServiceConfig::default();
    config.extract.value_field = "data".into();
    config.extract.args_field = "config".into();
    let app = build_router(&config, reference_components());

    let res = app
        .oneshot(json_request("/echo", r#"{"data": 1, "config": {"k": "v"}}"#))
        .await
        .unwrap();
    assert_eq!(body_json(res).await, json!({"value": 1, "args": {"k": "v"}}));
}

#[tokio::test]
async fn test_body_limit() {
    let mut config = ServiceConfig::default();
    config.limits.max_body_size = 16;
    let app = build_router(&config, reference_components());

    let res = app
        .oneshot(json_request("/echo", r#"{"value": "this body is far too long"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_handler_errors_and_panics() {
    async fn divide(ValueArgs(value, args): ValueArgs<f64>) -> Result<Json<Value>, ServiceError> {
        let by = args.get_as::<f64>("by").unwrap_or(1.0);
        if by == 0.0 {
            return Err(ServiceError::handler("division by zero"));
        }
        Ok(Json(json!({ "result": value / by })))
    }

    async fn boom() -> &'static str {
        panic!("boom")
    }

    let components = Router::new()
        .route("/divide", post(divide))
        .route("/boom", get(boom));
    let app = build_router(&ServiceConfig::default(), components);

    let res = app
        .clone()
        .oneshot(json_request("/divide", r#"{"value": 9, "args": {"by": "3"}}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["result"], 3.0);

    let res = app
        .clone()
        .oneshot(json_request("/divide", r#"{"value": 9, "args": {"by": "0"}}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(res).await["error"], "division by zero");

    let req = axum::http::Request::builder()
        .uri("/boom")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(res).await["error"], "boom");
}

#[tokio::test]
async fn test_unknown_route_and_request_id() {
    let res = app()
        .oneshot(json_request("/missing", "{}"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(body_json(res).await["error"], "No route for /missing");
}
