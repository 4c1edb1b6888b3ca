//! Axum route handlers for the Extraction API.

use std::time::Duration;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::engine::SkillEngine;
use crate::models::skills::{JobSkills, PairSkills, ResumeSkills};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PairRequest {
    pub resume_text: String,
    pub job_text: String,
}

/// Envelope shared by every extraction response; the result's fields sit beside these.
#[derive(Debug, Serialize)]
pub struct Extracted<T> {
    pub request_id: Uuid,
    pub extracted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: T,
}

impl<T> Extracted<T> {
    fn new(request_id: Uuid, result: T) -> Self {
        Self {
            request_id,
            extracted_at: Utc::now(),
            result,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Worker dispatch
// ────────────────────────────────────────────────────────────────────────────

fn check_size(state: &AppState, field: &str, text: &str) -> Result<(), AppError> {
    let max = state.config.max_request_bytes;
    if text.len() > max {
        return Err(AppError::Validation(format!(
            "{field} is {} bytes; the limit is {max}",
            text.len()
        )));
    }
    Ok(())
}

/// Runs `job` on the blocking pool under the configured request timeout.
async fn run_extraction<T, F>(state: &AppState, request_id: Uuid, job: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&SkillEngine) -> T + Send + 'static,
{
    let engine = state.engine.clone();
    let secs = state.config.request_timeout_secs;
    let task = tokio::task::spawn_blocking(move || job(engine.as_ref()));

    match tokio::time::timeout(Duration::from_secs(secs), task).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(join_error)) => {
            tracing::error!(%request_id, "Extraction task failed: {join_error}");
            Err(AppError::Worker(join_error.to_string()))
        }
        Err(_) => Err(AppError::Timeout(secs)),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/extract/resume
///
/// Classified skills, ranked skills and profile extras for one résumé.
pub async fn handle_extract_resume(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<Extracted<ResumeSkills>>, AppError> {
    check_size(&state, "text", &request.text)?;
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, bytes = request.text.len(), "Extracting resume");

    let result = run_extraction(&state, request_id, move |engine| engine.parse_resume(&request.text)).await?;

    Ok(Json(Extracted::new(request_id, result)))
}

/// POST /api/v1/extract/job
///
/// Classified keywords, nice-to-have and responsibility subsets, role and requirements for
/// one job description.
pub async fn handle_extract_job(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<Extracted<JobSkills>>, AppError> {
    check_size(&state, "text", &request.text)?;
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, bytes = request.text.len(), "Extracting job description");

    let result = run_extraction(&state, request_id, move |engine| {
        engine.parse_job_description(&request.text)
    })
    .await?;

    Ok(Json(Extracted::new(request_id, result)))
}

/// POST /api/v1/extract/pair
///
/// Résumé and job description weighed together.
pub async fn handle_extract_pair(
    State(state): State<AppState>,
    Json(request): Json<PairRequest>,
) -> Result<Json<Extracted<PairSkills>>, AppError> {
    check_size(&state, "resume_text", &request.resume_text)?;
    check_size(&state, "job_text", &request.job_text)?;
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "Extracting resume/job pair");

    let result = run_extraction(&state, request_id, move |engine| {
        engine.analyze_pair(&request.resume_text, &request.job_text)
    })
    .await?;

    Ok(Json(Extracted::new(request_id, result)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::extraction::ontology::Ontology;
    use crate::extraction::settings::ExtractionConfig;
    use crate::extraction::tagger::TaggerBackend;
    use crate::routes::build_router;

    use super::*;

    fn test_state(max_request_bytes: usize) -> AppState {
        let config = Config {
            max_request_bytes,
            ..Config::default()
        };
        let engine = SkillEngine::new(
            Arc::new(Ontology::builtin().unwrap()),
            TaggerBackend::Lexicon.build(),
            ExtractionConfig::default(),
        )
        .unwrap();
        AppState {
            engine: Arc::new(engine),
            config,
        }
    }

    async fn post(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_resume_endpoint_returns_contract_shape() {
        let (status, body) = post(
            test_state(2_000_000),
            "/api/v1/extract/resume",
            json!({ "text": "SKILLS\nPython, Django, PostgreSQL, Docker\njane@example.com" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        for key in [
            "request_id",
            "extracted_at",
            "technical_skills",
            "programming_languages",
            "frameworks",
            "tools",
            "databases",
            "ranked_skills",
            "project_technologies",
            "soft_skills",
            "candidate_name",
            "email",
            "phone",
            "location",
            "education_degrees",
            "education_fields",
            "education_institutions",
            "experience_roles",
            "experience_companies",
            "experience_date_ranges",
            "experience_years_estimated",
            "project_titles",
            "certifications",
            "education_entries",
            "experience_entries",
        ] {
            assert!(body.get(key).is_some(), "missing {key}");
        }
        assert_eq!(body["programming_languages"], json!(["python"]));
        assert_eq!(body["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_job_endpoint_returns_contract_shape() {
        let (status, body) = post(
            test_state(2_000_000),
            "/api/v1/extract/job",
            json!({ "text": "Role: Data Engineer\n\nREQUIREMENTS\n3+ years of Python and Spark" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        for key in [
            "ranked_keywords",
            "nice_to_have_skills",
            "responsibility_tech_terms",
            "job_role",
            "required_experience_years",
            "required_education",
        ] {
            assert!(body.get(key).is_some(), "missing {key}");
        }
        assert_eq!(body["job_role"], "Data Engineer");
        assert_eq!(body["required_experience_years"], "3");
    }

    #[tokio::test]
    async fn test_pair_endpoint_nests_both_documents() {
        let (status, body) = post(
            test_state(2_000_000),
            "/api/v1/extract/pair",
            json!({ "resume_text": "SKILLS\nRust, Redis", "job_text": "REQUIREMENTS\nRust and Kafka" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["resume"]["programming_languages"].is_array());
        assert!(body["job"]["ranked_keywords"].is_array());
    }

    #[tokio::test]
    async fn test_oversized_text_is_rejected() {
        let (status, body) = post(
            test_state(10),
            "/api/v1/extract/resume",
            json!({ "text": "Python and Rust and Go" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_empty_text_yields_sentinel() {
        let (status, body) = post(test_state(2_000_000), "/api/v1/extract/resume", json!({ "text": "" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["technical_skills"], json!(["general"]));
    }
}
