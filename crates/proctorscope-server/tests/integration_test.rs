//! Integration tests for the ProctorScope HTTP surface
//!
//! Drives the real router with in-memory requests; the detector is the
//! scripted stub, so no model or network is involved.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tower::ServiceExt;

use proctorscope_analysis::{Detector, StubDetector};
use proctorscope_core::{Detection, Error, Taxonomy};
use proctorscope_server::{create_router, AppState, ServerConfig};

const BOUNDARY: &str = "proctorscope-test-boundary";

fn test_config() -> ServerConfig {
    ServerConfig {
        confidence_threshold: 0.4,
        device: "cpu".to_string(),
        listen: "127.0.0.1".to_string(),
        port: 0,
        permissive_cors: false,
    }
}

fn app_with(detector: Option<Arc<dyn Detector>>) -> axum::Router {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    create_router(AppState::new(
        test_config(),
        detector,
        Taxonomy::default(),
        handle,
    ))
}

/// Build a multipart/form-data body with one part per (name, filename, bytes)
fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, parts: &[(&str, &str, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn det(class_id: u32, name: &str, confidence: f32) -> Detection {
    Detection::new(class_id, name, confidence, [0.0, 0.0, 10.0, 10.0])
}

#[tokio::test]
async fn test_health_reports_detector_state() {
    let stub: Arc<dyn Detector> = Arc::new(StubDetector::new(0.4));
    let response = app_with(Some(stub))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model_loaded"], true);
    assert_eq!(json["device"], "cpu");

    let response = app_with(None)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["model_loaded"], false);
}

#[tokio::test]
async fn test_analyze_returns_assessment() {
    let stub = Arc::new(StubDetector::new(0.4));
    stub.script_detections(vec![det(0, "person", 0.9), det(67, "cell phone", 0.8)]);

    let response = app_with(Some(stub))
        .oneshot(multipart_request(
            "/analyze",
            &[("image", "snap.jpg", b"frame")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["person_count"], 1);
    assert_eq!(json["risk_score"], 32);
    assert_eq!(json["message"], "Objek terlarang: cell phone");
    assert_eq!(json["all_detections"].as_array().unwrap().len(), 2);
    assert_eq!(json["prohibited_objects"][0]["class_name"], "cell phone");
}

#[tokio::test]
async fn test_analyze_without_image_field_is_rejected() {
    let stub: Arc<dyn Detector> = Arc::new(StubDetector::new(0.4));
    let response = app_with(Some(stub))
        .oneshot(multipart_request("/analyze", &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Missing image field");
}

#[tokio::test]
async fn test_endpoints_answer_503_without_detector() {
    let response = app_with(None)
        .oneshot(multipart_request(
            "/analyze",
            &[("image", "snap.jpg", b"frame")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Model not loaded");

    let response = app_with(None)
        .oneshot(multipart_request(
            "/analyze-batch",
            &[("images", "snap.jpg", b"frame")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_detector_failure_surfaces_as_500() {
    let stub = Arc::new(StubDetector::new(0.4));
    stub.script_failure(Error::detector("inference exploded"));

    let response = app_with(Some(stub))
        .oneshot(multipart_request(
            "/analyze",
            &[("image", "snap.jpg", b"frame")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().contains("inference exploded"));
}

#[tokio::test]
async fn test_batch_preserves_order_and_isolates_failures() {
    let stub = Arc::new(StubDetector::new(0.4));
    stub.script_detections(vec![det(0, "person", 0.9)]);
    stub.script_failure(Error::decode("truncated jpeg"));
    stub.script_detections(vec![det(67, "cell phone", 0.8)]);

    let response = app_with(Some(stub))
        .oneshot(multipart_request(
            "/analyze-batch",
            &[
                ("images", "a.jpg", b"frame"),
                ("images", "b.jpg", b"frame"),
                ("images", "c.jpg", b"frame"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["filename"], "a.jpg");
    assert_eq!(results[0]["person_count"], 1);
    assert_eq!(results[0]["has_issues"], false);
    assert_eq!(results[1]["filename"], "b.jpg");
    assert!(results[1]["error"].as_str().unwrap().contains("truncated"));
    assert_eq!(results[2]["filename"], "c.jpg");
    assert_eq!(results[2]["has_issues"], true);
    assert_eq!(results[2]["prohibited_objects"][0], "cell phone");
}

#[tokio::test]
async fn test_oversize_batch_rejected_whole() {
    let stub: Arc<dyn Detector> = Arc::new(StubDetector::new(0.4));
    let parts: Vec<(String, &[u8])> = (0..11)
        .map(|i| (format!("snap{i}.jpg"), b"frame".as_slice()))
        .collect();
    let parts: Vec<(&str, &str, &[u8])> = parts
        .iter()
        .map(|(name, bytes)| ("images", name.as_str(), *bytes))
        .collect();

    let response = app_with(Some(stub))
        .oneshot(multipart_request("/analyze-batch", &parts))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Max 10 images per batch");
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let stub: Arc<dyn Detector> = Arc::new(StubDetector::new(0.4));
    let response = app_with(Some(stub))
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let stub: Arc<dyn Detector> = Arc::new(StubDetector::new(0.4));
    let response = app_with(Some(stub))
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
