#![cfg(test)]
//! In-memory `ResumeService` that records every call.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::api_client::ResumeService;
use crate::errors::{AnalysisError, AuthError};
use crate::models::analysis::{AnalysisRequest, AnalysisResult, ProcessedResume};
use crate::models::auth::Credentials;
use crate::models::dashboard::{DashboardInput, ResumeFile};
use crate::models::feature::Feature;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login { email: String },
    Signup { email: String },
    Logout,
    CurrentUser,
    ProcessResume { job_role: String, file_name: String },
    Analyze {
        feature: Feature,
        request: AnalysisRequest,
    },
}

#[derive(Default)]
pub struct FakeService {
    calls: Mutex<Vec<Call>>,
    login_failure: Option<(u16, String)>,
    signup_failure: Option<(u16, String)>,
    logout_fails: bool,
    processing_failure: Option<(u16, String)>,
    analysis_failure: Option<(u16, String)>,
    processed: Option<ProcessedResume>,
    result: Option<Value>,
    user_id: Option<String>,
}

impl FakeService {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_login(mut self, status: u16, message: &str) -> Self {
        self.login_failure = Some((status, message.to_string()));
        self
    }

    pub fn fail_signup(mut self, status: u16, message: &str) -> Self {
        self.signup_failure = Some((status, message.to_string()));
        self
    }

    pub fn fail_logout(mut self) -> Self {
        self.logout_fails = true;
        self
    }

    pub fn fail_processing(mut self, status: u16, message: &str) -> Self {
        self.processing_failure = Some((status, message.to_string()));
        self
    }

    pub fn fail_analysis(mut self, status: u16, message: &str) -> Self {
        self.analysis_failure = Some((status, message.to_string()));
        self
    }

    pub fn with_processed(mut self, resume_text: &str, job_role: &str) -> Self {
        self.processed = Some(ProcessedResume {
            resume_text: resume_text.to_string(),
            job_role: job_role.to_string(),
        });
        self
    }

    pub fn with_result(mut self, body: Value) -> Self {
        self.result = Some(body);
        self
    }

    pub fn with_user_id(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn remote((status, message): &(u16, String)) -> AuthError {
    AuthError::Remote {
        status: *status,
        message: message.clone(),
    }
}

#[async_trait]
impl ResumeService for FakeService {
    async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        self.record(Call::Login {
            email: credentials.email.clone(),
        });
        match &self.login_failure {
            Some(failure) => Err(remote(failure)),
            None => Ok(()),
        }
    }

    async fn signup(&self, credentials: &Credentials) -> Result<(), AuthError> {
        self.record(Call::Signup {
            email: credentials.email.clone(),
        });
        match &self.signup_failure {
            Some(failure) => Err(remote(failure)),
            None => Ok(()),
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.record(Call::Logout);
        if self.logout_fails {
            return Err(AuthError::Remote {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<String, AuthError> {
        self.record(Call::CurrentUser);
        self.user_id.clone().ok_or_else(|| AuthError::Remote {
            status: 401,
            message: "Not Logged In".to_string(),
        })
    }

    async fn process_resume(
        &self,
        input: &DashboardInput,
        resume: &ResumeFile,
    ) -> Result<ProcessedResume, AnalysisError> {
        self.record(Call::ProcessResume {
            job_role: input.job_role.clone(),
            file_name: resume.file_name.clone(),
        });
        if let Some((status, message)) = &self.processing_failure {
            return Err(AnalysisError::Processing {
                status: *status,
                message: message.clone(),
            });
        }
        Ok(self.processed.clone().unwrap_or_else(|| ProcessedResume {
            resume_text: "Education Experience Skills".to_string(),
            job_role: input.job_role.clone(),
        }))
    }

    async fn analyze(
        &self,
        feature: Feature,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.record(Call::Analyze {
            feature,
            request: request.clone(),
        });
        if let Some((status, message)) = &self.analysis_failure {
            return Err(AnalysisError::Analysis {
                feature,
                status: *status,
                message: message.clone(),
            });
        }
        let body = self
            .result
            .clone()
            .unwrap_or_else(|| serde_json::json!({ "title": feature.title() }));
        serde_json::from_value(body)
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
    }
}
