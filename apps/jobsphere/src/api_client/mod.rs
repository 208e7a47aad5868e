//! API client for the JobSphere service.
//!
//! Every request goes through one reqwest client with a cookie store, so the
//! session cookie set by `/api/auth/login` rides along on later calls.
//! Nothing here retries: each failure is final for that attempt.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{AnalysisError, AuthError};
use crate::models::analysis::{AnalysisRequest, AnalysisResult, ProcessedResume};
use crate::models::auth::{Credentials, MeResponse};
use crate::models::dashboard::{DashboardInput, ResumeFile};
use crate::models::feature::Feature;
use crate::validation::form::RESUME_TYPE_INVALID;
use crate::validation::{Field, ValidationErrors};

pub mod service;

pub use service::ResumeService;

const LOGIN_PATH: &str = "/api/auth/login";
const SIGNUP_PATH: &str = "/api/auth/signup";
const LOGOUT_PATH: &str = "/api/auth/logout";
const ME_PATH: &str = "/api/auth/me";
const PROCESS_RESUME_PATH: &str = "/api/process-resume";
const ANALYZE_PATH: &str = "/api/analyze";

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Signup failed";
const SESSION_CHECK_FAILED: &str = "Session check failed";
const PROCESS_FAILED: &str = "Failed to process resume.";

/// Keys searched for an error message in auth failure bodies.
const AUTH_ERROR_KEYS: &[&str] = &["detail"];
/// The analysis endpoints document `error`; the service's framework emits `detail`.
const ANALYSIS_ERROR_KEYS: &[&str] = &["error", "detail"];

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_credentials(
        &self,
        path: &str,
        credentials: &Credentials,
        fallback: &str,
    ) -> Result<(), AuthError> {
        let url = self.url(path);
        info!("POST {}", url);

        let response = self.client.post(&url).json(credentials).send().await?;

        let status = response.status();
        debug!("{} returned {}", path, status);
        if !status.is_success() {
            return Err(AuthError::Remote {
                status: status.as_u16(),
                message: failure_message(response, AUTH_ERROR_KEYS, fallback).await,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ResumeService for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        self.post_credentials(LOGIN_PATH, credentials, LOGIN_FAILED)
            .await
    }

    async fn signup(&self, credentials: &Credentials) -> Result<(), AuthError> {
        self.post_credentials(SIGNUP_PATH, credentials, SIGNUP_FAILED)
            .await
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let url = self.url(LOGOUT_PATH);
        info!("POST {}", url);

        let response = self.client.post(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Remote {
                status: status.as_u16(),
                message: format!("Logout returned {status}"),
            });
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<String, AuthError> {
        let url = self.url(ME_PATH);
        info!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Remote {
                status: status.as_u16(),
                message: failure_message(response, AUTH_ERROR_KEYS, SESSION_CHECK_FAILED).await,
            });
        }

        let me: MeResponse = response.json().await?;
        Ok(me.user_id)
    }

    async fn process_resume(
        &self,
        input: &DashboardInput,
        resume: &ResumeFile,
    ) -> Result<ProcessedResume, AnalysisError> {
        let url = self.url(PROCESS_RESUME_PATH);

        let resume_part = Part::bytes(resume.bytes.to_vec())
            .file_name(resume.file_name.clone())
            .mime_str(&resume.content_type)
            .map_err(|_| {
                let mut errors = ValidationErrors::new();
                errors.insert(Field::Resume, RESUME_TYPE_INVALID);
                AnalysisError::Validation(errors)
            })?;

        let form = Form::new()
            .text(Field::JobRole.key(), input.job_role.clone())
            .text(Field::Location.key(), input.location.clone())
            .text(
                Field::Experience.key(),
                input
                    .experience
                    .map(|band| band.as_str())
                    .unwrap_or_default(),
            )
            .part(Field::Resume.key(), resume_part)
            .text(Field::JobDescription.key(), input.job_description.clone());

        info!(
            "POST {} ({}, {} bytes)",
            url,
            resume.file_name,
            resume.bytes.len()
        );

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        debug!("process-resume returned {}", status);
        if !status.is_success() {
            return Err(AnalysisError::Processing {
                status: status.as_u16(),
                message: failure_message(response, ANALYSIS_ERROR_KEYS, PROCESS_FAILED).await,
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<ProcessedResume>(&body).map_err(|e| {
            AnalysisError::MalformedResponse(format!("process-resume response: {e}"))
        })
    }

    async fn analyze(
        &self,
        feature: Feature,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let url = format!("{}/{}", self.url(ANALYZE_PATH), feature.id());
        info!("POST {}", url);

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        debug!("analyze/{} returned {}", feature, status);
        if !status.is_success() {
            let fallback = format!("Failed to get analysis for {}.", feature.id());
            return Err(AnalysisError::Analysis {
                feature,
                status: status.as_u16(),
                message: failure_message(response, ANALYSIS_ERROR_KEYS, &fallback).await,
            });
        }

        let body = response.text().await?;
        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Object(fields)) => Ok(AnalysisResult::from_map(fields)),
            Ok(other) => Err(AnalysisError::MalformedResponse(format!(
                "analyze/{} returned a JSON {} instead of an object",
                feature,
                json_kind(&other)
            ))),
            Err(e) => Err(AnalysisError::MalformedResponse(format!(
                "analyze/{feature} response: {e}"
            ))),
        }
    }
}

/// Reads a failed response's body and pulls a message out of it, falling back
/// to `fallback` when the body is not JSON or has no usable message.
async fn failure_message(response: Response, keys: &[&str], fallback: &str) -> String {
    let body = response.text().await.unwrap_or_default();
    extract_message(&body, keys).unwrap_or_else(|| fallback.to_string())
}

/// First non-empty string under one of `keys` in a JSON object body.
fn extract_message(body: &str, keys: &[&str]) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    keys.iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Multipart, Path, State};
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response as AxumResponse};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;
    use crate::models::dashboard::{Experience, PDF_MIME};

    const SESSION_COOKIE: &str = "access_token=tok-123";

    /// Form parts seen by the mock process endpoint: (name, file name, content type, text).
    type SeenParts = Arc<Mutex<Vec<(String, Option<String>, Option<String>, String)>>>;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(base_url, None).unwrap()
    }

    fn creds() -> Credentials {
        Credentials::new("asha@gmail.com", "hunter2")
    }

    fn sample_input() -> DashboardInput {
        DashboardInput {
            job_role: "Backend Engineer".to_string(),
            location: "Bangalore".to_string(),
            experience: Some(Experience::ThreeToFive),
            resume: Some(sample_resume()),
            job_description: "Build APIs in Rust".to_string(),
        }
    }

    fn sample_resume() -> ResumeFile {
        ResumeFile::new("asha.pdf", PDF_MIME, "Education Experience Skills")
    }

    fn sample_request() -> AnalysisRequest {
        AnalysisRequest {
            resume_text: "Education Experience Skills".to_string(),
            job_role: "Backend Engineer".to_string(),
            job_description: "Build APIs in Rust".to_string(),
            location: "Bangalore".to_string(),
        }
    }

    async fn login_ok() -> AxumResponse {
        (
            [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/; HttpOnly"))],
            Json(json!({ "message": "Login successful" })),
        )
            .into_response()
    }

    async fn process_resume(
        State(seen): State<SeenParts>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> AxumResponse {
        let has_session = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|cookies| cookies.contains(SESSION_COOKIE));
        if !has_session {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Not Logged In" })),
            )
                .into_response();
        }

        let mut job_role = String::new();
        let mut resume_text = String::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let text = String::from_utf8_lossy(&field.bytes().await.unwrap()).into_owned();
            match name.as_str() {
                "jobRole" => job_role = text.clone(),
                "resume" => resume_text = text.clone(),
                _ => {}
            }
            seen.lock()
                .unwrap()
                .push((name, file_name, content_type, text));
        }

        Json(json!({
            "message": "Resume processed successfully",
            "resume_text": resume_text,
            "job_role": job_role,
            "experience": "3-5"
        }))
        .into_response()
    }

    #[tokio::test]
    async fn test_login_cookie_is_sent_with_process_phase() {
        let seen = SeenParts::default();
        let router = Router::new()
            .route("/api/auth/login", post(login_ok))
            .route("/api/process-resume", post(process_resume))
            .with_state(seen.clone());
        let api = client(&serve(router).await);

        api.login(&creds()).await.unwrap();
        let processed = api
            .process_resume(&sample_input(), &sample_resume())
            .await
            .unwrap();

        assert_eq!(
            processed,
            ProcessedResume {
                resume_text: "Education Experience Skills".to_string(),
                job_role: "Backend Engineer".to_string(),
            }
        );

        let parts = seen.lock().unwrap().clone();
        let names: Vec<&str> = parts.iter().map(|p| p.0.as_str()).collect();
        assert_eq!(
            names,
            vec!["jobRole", "location", "experience", "resume", "jobDescription"]
        );
        let resume = &parts[3];
        assert_eq!(resume.1.as_deref(), Some("asha.pdf"));
        assert_eq!(resume.2.as_deref(), Some(PDF_MIME));
        assert_eq!(parts[2].3, "3-5");
        assert_eq!(parts[4].3, "Build APIs in Rust");
    }

    #[tokio::test]
    async fn test_process_without_session_reports_detail() {
        let router = Router::new()
            .route("/api/process-resume", post(process_resume))
            .with_state(SeenParts::default());
        let api = client(&serve(router).await);

        let err = api
            .process_resume(&sample_input(), &sample_resume())
            .await
            .unwrap_err();

        match err {
            AnalysisError::Processing { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Not Logged In");
            }
            other => panic!("expected processing error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_failure_uses_detail() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "detail": "Invalid credentials" })),
                )
            }),
        );
        let api = client(&serve(router).await);

        let err = api.login(&creds()).await.unwrap_err();
        match err {
            AuthError::Remote { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_signup_failure_with_non_json_body_is_generic() {
        let router = Router::new().route(
            "/api/auth/signup",
            post(|| async { (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>") }),
        );
        let api = client(&serve(router).await);

        let err = api.signup(&creds()).await.unwrap_err();
        assert_eq!(err.user_message(), "Signup failed");
    }

    #[tokio::test]
    async fn test_analyze_passes_body_through() {
        let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::default();
        let router = Router::new()
            .route(
                "/api/analyze/:feature",
                post(
                    |State(seen): State<Arc<Mutex<Option<(String, Value)>>>>,
                     Path(feature): Path<String>,
                     Json(body): Json<Value>| async move {
                        *seen.lock().unwrap() = Some((feature, body));
                        Json(json!({
                            "title": "Interview Preparation",
                            "questions": ["Explain ownership in Rust."],
                            "model": "llama3"
                        }))
                    },
                ),
            )
            .with_state(seen.clone());
        let api = client(&serve(router).await);

        let result = api
            .analyze(Feature::InterviewPrep, &sample_request())
            .await
            .unwrap();

        assert_eq!(
            result.into_value(),
            json!({
                "title": "Interview Preparation",
                "questions": ["Explain ownership in Rust."],
                "model": "llama3"
            })
        );

        let (feature, body) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(feature, "interview-prep");
        assert_eq!(
            body,
            json!({
                "resume_text": "Education Experience Skills",
                "job_role": "Backend Engineer",
                "job_description": "Build APIs in Rust",
                "location": "Bangalore"
            })
        );
    }

    #[tokio::test]
    async fn test_analyze_error_prefers_error_key() {
        let router = Router::new().route(
            "/api/analyze/:feature",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "LLM unavailable", "detail": "ignored" })),
                )
            }),
        );
        let api = client(&serve(router).await);

        let err = api
            .analyze(Feature::MissingSkills, &sample_request())
            .await
            .unwrap_err();
        match err {
            AnalysisError::Analysis {
                feature,
                status,
                message,
            } => {
                assert_eq!(feature, Feature::MissingSkills);
                assert_eq!(status, 500);
                assert_eq!(message, "LLM unavailable");
            }
            other => panic!("expected analysis error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_analyze_error_without_message_is_feature_specific() {
        let router = Router::new().route(
            "/api/analyze/:feature",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "" }))) }),
        );
        let api = client(&serve(router).await);

        let err = api
            .analyze(Feature::JobMatches, &sample_request())
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Failed to get analysis for job-matches."
        );
    }

    #[tokio::test]
    async fn test_analyze_non_object_is_malformed() {
        let router = Router::new().route(
            "/api/analyze/:feature",
            post(|| async { Json(json!(["not", "an", "object"])) }),
        );
        let api = client(&serve(router).await);

        let err = api
            .analyze(Feature::ProjectIdeas, &sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_current_user_after_login() {
        let router = Router::new()
            .route("/api/auth/login", post(login_ok))
            .route(
                "/api/auth/me",
                get(|headers: HeaderMap| async move {
                    let has_session = headers
                        .get(header::COOKIE)
                        .and_then(|v| v.to_str().ok())
                        .is_some_and(|cookies| cookies.contains(SESSION_COOKIE));
                    if has_session {
                        (StatusCode::OK, Json(json!({ "user_id": "665f1c" })))
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "detail": "Not Logged In" })),
                        )
                    }
                }),
            );
        let api = client(&serve(router).await);

        let err = api.current_user().await.unwrap_err();
        assert_eq!(err.user_message(), "Not Logged In");

        api.login(&creds()).await.unwrap();
        assert_eq!(api.current_user().await.unwrap(), "665f1c");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = client(&format!("http://{addr}"));

        assert!(matches!(api.logout().await, Err(AuthError::Network(_))));
        assert!(matches!(
            api.process_resume(&sample_input(), &sample_resume()).await,
            Err(AnalysisError::Network(_))
        ));
    }

    #[test]
    fn test_extract_message() {
        assert_eq!(
            extract_message(r#"{"detail":"User already exists"}"#, AUTH_ERROR_KEYS),
            Some("User already exists".to_string())
        );
        assert_eq!(
            extract_message(r#"{"detail":"from detail"}"#, ANALYSIS_ERROR_KEYS),
            Some("from detail".to_string())
        );
        // FastAPI validation errors carry a list under `detail`.
        assert_eq!(
            extract_message(r#"{"detail":[{"msg":"field required"}]}"#, AUTH_ERROR_KEYS),
            None
        );
        assert_eq!(extract_message("Internal Server Error", AUTH_ERROR_KEYS), None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let api = client("http://localhost:8000/");
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.url(LOGIN_PATH), "http://localhost:8000/api/auth/login");
    }
}
