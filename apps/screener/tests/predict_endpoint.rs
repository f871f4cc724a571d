use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::Request, http::StatusCode, Router};
use serde_json::Value;
use tower::ServiceExt;

use screener::config::Config;
use screener::feedback::{FeedbackError, FeedbackProvider, FeedbackRequest, UNAVAILABLE_PREFIX};
use screener::model::corpus::builtin_corpus;
use screener::model::ModelArtifacts;
use screener::routes::build_router;
use screener::screening::InferenceContext;
use screener::state::AppState;
use screener::storage::UploadStore;

const BOUNDARY: &str = "screener-test-boundary";

struct EchoFeedback;

#[async_trait]
impl FeedbackProvider for EchoFeedback {
    async fn feedback(&self, request: &FeedbackRequest<'_>) -> Result<String, FeedbackError> {
        Ok(format!("advice for {}", request.role))
    }
}

struct BrokenFeedback;

#[async_trait]
impl FeedbackProvider for BrokenFeedback {
    async fn feedback(&self, _request: &FeedbackRequest<'_>) -> Result<String, FeedbackError> {
        Err(FeedbackError::Other("401 Unauthorized".to_string()))
    }
}

async fn app(feedback: Arc<dyn FeedbackProvider>, uploads: &tempfile::TempDir) -> Router {
    app_with_config(Config::from_lookup(|_| None).unwrap(), feedback, uploads).await
}

async fn app_with_config(
    config: Config,
    feedback: Arc<dyn FeedbackProvider>,
    uploads: &tempfile::TempDir,
) -> Router {
    let model = ModelArtifacts::train(&builtin_corpus()).unwrap();
    let state = AppState {
        inference: Arc::new(InferenceContext::new(model, config.confidence)),
        feedback,
        uploads: UploadStore::open(uploads.path(), false).await.unwrap(),
        config,
    };
    build_router(state)
}

fn multipart_body(field: &str, filename: Option<&str>, contents: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    match filename {
        Some(name) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
        ),
    }
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn predict_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn python_resume_is_classified_with_feedback() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(Arc::new(EchoFeedback), &uploads).await;

    let body = multipart_body(
        "resume",
        Some("resume.txt"),
        b"Experienced in Python, Django, REST API, and backend scripting",
    );
    let response = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["role"], "Python Developer");
    assert_eq!(json["filename"], "resume.txt");
    assert_eq!(json["ai_feedback"], "advice for Python Developer");
    let pct = json["match_percentage"].as_f64().unwrap();
    assert!((10.0..=100.0).contains(&pct), "{pct} out of range");

    // Uploads are not retained by default.
    assert_eq!(std::fs::read_dir(uploads.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn missing_file_field_is_a_client_error() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(Arc::new(EchoFeedback), &uploads).await;

    let body = multipart_body("notes", None, b"hello");
    let response = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"]["message"], "No file uploaded");
    assert!(json.get("role").is_none());
    assert!(json.get("match_percentage").is_none());
}

#[tokio::test]
async fn empty_filename_is_a_client_error() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(Arc::new(EchoFeedback), &uploads).await;

    let body = multipart_body("resume", Some(""), b"Python");
    let response = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["message"], "No file selected");
}

#[tokio::test]
async fn failing_feedback_still_returns_classification() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(Arc::new(BrokenFeedback), &uploads).await;

    let body = multipart_body(
        "resume",
        Some("cv.txt"),
        b"Recruitment, payroll, employee relations and talent management",
    );
    let response = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["role"], "HR");
    assert!(json["match_percentage"].as_f64().unwrap() >= 10.0);
    assert_eq!(
        json["ai_feedback"],
        format!("{UNAVAILABLE_PREFIX}401 Unauthorized")
    );
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(Arc::new(EchoFeedback), &uploads).await;

    let body = multipart_body("resume", Some("cv.rtf"), b"{\\rtf1 Python Django}");
    let response = app.oneshot(predict_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "UNSUPPORTED_DOCUMENT");
    assert!(json.get("role").is_none());
}

#[tokio::test]
async fn health_reports_artifact_set() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(Arc::new(EchoFeedback), &uploads).await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["artifact_set"].is_string());
}

#[tokio::test]
async fn upload_over_the_size_limit_is_rejected() {
    let uploads = tempfile::tempdir().unwrap();
    let config =
        Config::from_lookup(|key| (key == "MAX_UPLOAD_BYTES").then(|| "200".to_string())).unwrap();
    assert_eq!(config.max_upload_bytes, 200);
    let app = app_with_config(config, Arc::new(EchoFeedback), &uploads).await;

    let resume = "Python Django developer ".repeat(100);
    let body = multipart_body("resume", Some("resume.txt"), resume.as_bytes());
    let response = app.oneshot(predict_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(std::fs::read_dir(uploads.path()).unwrap().count(), 0);
}
