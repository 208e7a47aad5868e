//! Two-phase resume analysis.
//!
//! 1. Process phase: upload the resume and form fields, receive plain text.
//! 2. Analyze phase: send that text to the feature's endpoint.
//!
//! The analyze-phase JSON is returned as-is; no shape validation happens here.

use tracing::info;

use crate::api_client::ResumeService;
use crate::errors::AnalysisError;
use crate::models::analysis::{AnalysisRequest, AnalysisResult};
use crate::models::dashboard::DashboardInput;
use crate::models::feature::Feature;
use crate::validation::{self, Field, ValidationErrors};

/// Runs both phases for `feature`. Invalid input fails before any request.
pub async fn run_analysis(
    service: &dyn ResumeService,
    input: &DashboardInput,
    feature: Feature,
) -> Result<AnalysisResult, AnalysisError> {
    let errors = validation::validate(input, feature);
    if !errors.is_empty() {
        return Err(AnalysisError::Validation(errors));
    }
    let resume = input.resume.as_ref().ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::Resume, validation::form::RESUME_REQUIRED);
        AnalysisError::Validation(errors)
    })?;

    info!(%feature, job_role = %input.job_role, "processing resume");
    let processed = service.process_resume(input, resume).await?;

    let request = AnalysisRequest {
        resume_text: processed.resume_text,
        job_role: processed.job_role,
        job_description: input.job_description.clone(),
        location: input.location.clone(),
    };

    info!(
        %feature,
        resume_chars = request.resume_text.len(),
        "requesting analysis"
    );
    let result = service.analyze(feature, &request).await?;

    info!(%feature, fields = result.as_map().len(), "analysis complete");
    Ok(result)
}
