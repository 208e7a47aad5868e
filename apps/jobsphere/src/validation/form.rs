use crate::models::dashboard::{DashboardInput, ResumeFile};
use crate::models::feature::Feature;

use super::{Field, ValidationErrors};

pub const JOB_ROLE_REQUIRED: &str = "Please enter the job role.";
pub const LOCATION_REQUIRED: &str = "Please enter the location.";
pub const EXPERIENCE_REQUIRED: &str = "Please select your experience.";
pub const RESUME_REQUIRED: &str = "Please upload your resume.";
pub const RESUME_TYPE_INVALID: &str = "Only PDF and DOCX files are allowed.";
pub const JOB_DESCRIPTION_REQUIRED: &str = "Job Description is required for Job Match Analysis.";

/// Checks the dashboard input for `feature`. Pure; callers re-run it on every
/// submission attempt.
pub fn validate(input: &DashboardInput, feature: Feature) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if input.job_role.trim().is_empty() {
        errors.insert(Field::JobRole, JOB_ROLE_REQUIRED);
    }
    if input.location.trim().is_empty() {
        errors.insert(Field::Location, LOCATION_REQUIRED);
    }
    if input.experience.is_none() {
        errors.insert(Field::Experience, EXPERIENCE_REQUIRED);
    }
    if input.resume.is_none() {
        errors.insert(Field::Resume, RESUME_REQUIRED);
    }
    if feature.requires_job_description() && input.job_description.trim().is_empty() {
        errors.insert(Field::JobDescription, JOB_DESCRIPTION_REQUIRED);
    }

    errors
}

/// Stores a picked resume if its declared type is accepted.
///
/// An unsupported type clears any previously stored file and records a type
/// error; an accepted one clears the resume error. Returns whether the file
/// was kept.
pub fn select_resume(
    input: &mut DashboardInput,
    errors: &mut ValidationErrors,
    file: ResumeFile,
) -> bool {
    if file.is_accepted_type() {
        input.resume = Some(file);
        errors.remove(Field::Resume);
        true
    } else {
        tracing::debug!(content_type = %file.content_type, "rejected resume upload");
        input.resume = None;
        errors.insert(Field::Resume, RESUME_TYPE_INVALID);
        false
    }
}
