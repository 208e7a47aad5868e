use async_trait::async_trait;

use crate::errors::{AnalysisError, AuthError};
use crate::models::analysis::{AnalysisRequest, AnalysisResult, ProcessedResume};
use crate::models::auth::Credentials;
use crate::models::dashboard::{DashboardInput, ResumeFile};
use crate::models::feature::Feature;

/// The remote operations the session and the orchestrator depend on.
/// Implement this to swap the transport without touching callers.
///
/// Carried by `Session` as `Arc<dyn ResumeService>`.
#[async_trait]
pub trait ResumeService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<(), AuthError>;

    async fn signup(&self, credentials: &Credentials) -> Result<(), AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;

    /// Server-side user id of the current cookie session.
    async fn current_user(&self) -> Result<String, AuthError>;

    /// Process phase: uploads the resume and form fields, gets plain text back.
    async fn process_resume(
        &self,
        input: &DashboardInput,
        resume: &ResumeFile,
    ) -> Result<ProcessedResume, AnalysisError>;

    /// Analyze phase for one feature.
    async fn analyze(
        &self,
        feature: Feature,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError>;
}
