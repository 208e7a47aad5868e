use thiserror::Error;

use crate::models::feature::Feature;
use crate::validation::ValidationErrors;

/// Failure of a login, signup or session probe.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Rejected locally before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Remote error (status {status}): {message}")]
    Remote { status: u16, message: String },
}

impl AuthError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Validation(msg) => msg.clone(),
            AuthError::Network(e) => format!("Could not reach the server: {e}"),
            AuthError::Remote { message, .. } => message.clone(),
        }
    }
}

/// Failure of the two-phase resume analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("An analysis is already in progress")]
    Busy,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Processing error (status {status}): {message}")]
    Processing { status: u16, message: String },

    #[error("Analysis error for {feature} (status {status}): {message}")]
    Analysis {
        feature: Feature,
        status: u16,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Busy => "Please wait for the current analysis to finish.".to_string(),
            AnalysisError::NotAuthenticated => "Please login first.".to_string(),
            AnalysisError::Validation(errors) => errors.to_string(),
            AnalysisError::Network(e) => format!("Could not reach the server: {e}"),
            AnalysisError::Processing { message, .. } => message.clone(),
            AnalysisError::Analysis { message, .. } => message.clone(),
            AnalysisError::MalformedResponse(msg) => {
                format!("The server sent an unexpected response: {msg}")
            }
        }
    }
}
