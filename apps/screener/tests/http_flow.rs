//! End-to-end submission flow against an in-process analysis service.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use screener::errors::TRANSPORT_FAILURE_MESSAGE;
use screener::models::FitLevel;
use screener::render::{render, SectionKind};
use screener::validation::CandidateFile;
use screener::{Config, HttpTransport, Orchestrator, RequestState};

#[derive(Debug, Clone, PartialEq, Eq)]
struct RecordedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

#[derive(Clone)]
struct MockService {
    requests: Arc<Mutex<Vec<Vec<RecordedPart>>>>,
    status: u16,
    body: String,
}

impl MockService {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            status,
            body: body.into(),
        }
    }

    fn requests(&self) -> Vec<Vec<RecordedPart>> {
        self.requests.lock().unwrap().clone()
    }
}

async fn analyze(State(mock): State<MockService>, mut multipart: Multipart) -> (StatusCode, String) {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap().to_vec();
        parts.push(RecordedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }
    mock.requests.lock().unwrap().push(parts);

    (StatusCode::from_u16(mock.status).unwrap(), mock.body.clone())
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "model": "gpt-5-mini" }))
}

/// Serves the mock on an ephemeral port and returns its origin.
async fn spawn(mock: MockService) -> String {
    let app = Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn result_body() -> Value {
    json!({
        "fit_level": "Medium",
        "suitable": true,
        "confidence": "Medium",
        "summary": "Solid manual QA background, lighter on automation.",
        "matched_required_skills": ["Test planning", "Jira"],
        "missing_required_skills": ["Selenium"],
        "matched_nice_to_have": [],
        "missing_nice_to_have": ["Performance testing"],
        "risk_flags": [],
        "evidence": [
            {"claim": "Owns test plans", "snippet": "Authored test plans for 12 releases"}
        ],
        "screening_recommendation": "Recruiter screen only",
        "interview_focus_areas": ["Automation exposure", "API testing"],
        "final_verdict": "Worth a recruiter screen to probe automation depth.",
        "final_why": ["Core QA practice is strong", "Automation gap is trainable"],
        "model": "gpt-5-mini"
    })
}

fn ready(title: &str, description: &str) -> Orchestrator {
    let mut o = Orchestrator::new();
    o.form_mut().set_title(title);
    o.form_mut().set_description(description);
    o.form_mut()
        .select_file(Some(CandidateFile::new(
            "Jane_Doe.PDF",
            Some("application/octet-stream".to_string()),
            b"%PDF-1.7 resume bytes".to_vec(),
        )))
        .unwrap();
    o
}

fn transport(base: &str) -> HttpTransport {
    HttpTransport::new(&Config::new(base)).unwrap()
}

#[tokio::test]
async fn test_successful_submission_sends_three_parts_and_decodes() {
    let mock = MockService::new(200, result_body().to_string());
    let base = spawn(mock.clone()).await;

    let mut o = ready("  QA Engineer  ", "");
    o.submit(&transport(&base)).await;

    let result = o.result().expect("expected Succeeded");
    assert_eq!(result.fit_level, FitLevel::Medium);

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let parts = &requests[0];
    let names: Vec<&str> = parts.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["position_title", "position_description", "cv_pdf"]);

    assert_eq!(parts[0].data, b"QA Engineer");
    assert_eq!(parts[1].data, b"");
    assert_eq!(parts[2].file_name.as_deref(), Some("Jane_Doe.PDF"));
    assert_eq!(parts[2].content_type.as_deref(), Some("application/pdf"));
    assert_eq!(parts[2].data, b"%PDF-1.7 resume bytes");
}

#[tokio::test]
async fn test_description_is_sent_raw() {
    let mock = MockService::new(200, result_body().to_string());
    let base = spawn(mock.clone()).await;

    let mut o = ready("QA Engineer", "  Selenium\nPython  ");
    o.submit(&transport(&base)).await;

    assert_eq!(mock.requests()[0][1].data, b"  Selenium\nPython  ");
}

#[tokio::test]
async fn test_rendered_report_keeps_required_and_drops_empty_optional_sections() {
    let base = spawn(MockService::new(200, result_body().to_string())).await;

    let mut o = ready("QA Engineer", "");
    o.submit(&transport(&base)).await;

    let report = render(o.result().unwrap());
    assert!(report.section(SectionKind::MissingNiceToHave).is_some());
    assert!(report.section(SectionKind::MatchedNiceToHave).is_none());
    assert!(report.section(SectionKind::RiskFlags).is_none());
    assert!(report.section(SectionKind::InterviewFocusAreas).is_some());
}

#[tokio::test]
async fn test_unprocessable_response_surfaces_body() {
    let base = spawn(MockService::new(422, "Unsupported file")).await;

    let mut o = ready("QA Engineer", "");
    let state = o.submit(&transport(&base)).await;

    assert_eq!(state, &RequestState::Failed("Unsupported file".to_string()));
}

#[tokio::test]
async fn test_empty_error_body_falls_back_to_status() {
    let base = spawn(MockService::new(500, "")).await;

    let mut o = ready("QA Engineer", "");
    o.submit(&transport(&base)).await;

    assert_eq!(o.error(), Some("Request failed with status 500"));
}

#[tokio::test]
async fn test_ok_with_non_json_body_is_a_failure() {
    let base = spawn(MockService::new(200, "Internal Server Error")).await;

    let mut o = ready("QA Engineer", "");
    o.submit(&transport(&base)).await;

    assert!(matches!(o.state(), RequestState::Failed(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_a_generic_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut o = ready("QA Engineer", "");
    o.submit(&transport(&format!("http://{addr}"))).await;

    assert_eq!(o.error(), Some(TRANSPORT_FAILURE_MESSAGE));
}

#[tokio::test]
async fn test_identical_inputs_produce_identical_requests() {
    let mock = MockService::new(200, result_body().to_string());
    let base = spawn(mock.clone()).await;
    let transport = transport(&base);

    let mut o = ready("QA Engineer", "Manual and automated testing");
    o.submit(&transport).await;
    o.submit(&transport).await;

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
}

#[tokio::test]
async fn test_blank_title_never_reaches_the_service() {
    let mock = MockService::new(200, result_body().to_string());
    let base = spawn(mock.clone()).await;

    let mut o = ready("   ", "");
    assert_eq!(o.submit(&transport(&base)).await, &RequestState::Idle);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_health_probe() {
    let base = spawn(MockService::new(200, "")).await;

    let status = transport(&base).health().await.unwrap();
    assert!(status.ok);
    assert_eq!(status.model.as_deref(), Some("gpt-5-mini"));
}
