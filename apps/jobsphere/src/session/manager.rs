use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api_client::ResumeService;
use crate::errors::{AnalysisError, AuthError};
use crate::models::analysis::AnalysisResult;
use crate::models::auth::{Credentials, Identity};
use crate::models::dashboard::ResumeFile;
use crate::models::feature::Feature;
use crate::orchestrator;
use crate::session::state::{reduce, Action, AppState, AuthMode};
use crate::validation::{self, is_allowed_email, Field};

pub const MISSING_CREDENTIALS: &str = "Please enter email and password.";
pub const MISSING_SIGNUP_FIELDS: &str = "Please fill in all fields.";
pub const EMAIL_NOT_ALLOWED: &str = "Please use a @gmail.com or .edu.in email address.";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const LOGIN_REQUIRED: &str = "Please login first.";

/// One user's session: the state container plus the service it talks to.
///
/// Methods take `&mut self`, so a session never has two remote operations in
/// flight at once.
pub struct Session {
    state: AppState,
    service: Arc<dyn ResumeService>,
}

impl Session {
    pub fn new(service: Arc<dyn ResumeService>) -> Self {
        Self {
            state: AppState::default(),
            service,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    pub fn switch_auth_mode(&mut self, mode: AuthMode) {
        self.dispatch(Action::SwitchAuthMode(mode));
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.dispatch(Action::SetEmail(email.to_string()));
        self.dispatch(Action::SetPassword(password.to_string()));

        if email.is_empty() || password.is_empty() {
            return Err(self.reject(MISSING_CREDENTIALS));
        }
        if !is_allowed_email(email) {
            return Err(self.reject(EMAIL_NOT_ALLOWED));
        }

        let credentials = Credentials::new(email, password);
        if let Err(e) = self.service.login(&credentials).await {
            warn!("Login failed for {}: {}", email, e);
            self.dispatch(Action::AuthFailed(e.user_message()));
            return Err(e);
        }

        info!("Logged in as {}", email);
        let identity = Identity::new(email);
        self.dispatch(Action::LoggedIn(identity.clone()));
        Ok(identity)
    }

    /// Creates an account. Does not log in: the session returns to the login
    /// tab with a success notice.
    pub async fn signup(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        self.dispatch(Action::SetEmail(email.to_string()));
        self.dispatch(Action::SetPassword(password.to_string()));
        self.dispatch(Action::SetConfirmPassword(confirm_password.to_string()));

        if email.is_empty() || password.is_empty() || confirm_password.is_empty() {
            return Err(self.reject(MISSING_SIGNUP_FIELDS));
        }
        if !is_allowed_email(email) {
            return Err(self.reject(EMAIL_NOT_ALLOWED));
        }
        if password != confirm_password {
            return Err(self.reject(PASSWORD_MISMATCH));
        }

        let credentials = Credentials::new(email, password);
        if let Err(e) = self.service.signup(&credentials).await {
            warn!("Signup failed for {}: {}", email, e);
            self.dispatch(Action::AuthFailed(e.user_message()));
            return Err(e);
        }

        info!("Account created for {}", email);
        self.dispatch(Action::SignedUp);
        Ok(())
    }

    /// Resets the session and fires a best-effort remote logout.
    ///
    /// The local reset has already happened when this returns. The returned
    /// handle only tells a short-lived process when the request has gone out;
    /// its outcome is logged, never reported.
    pub fn logout(&mut self) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let handle = tokio::spawn(async move {
            match service.logout().await {
                Ok(()) => info!("Remote logout complete"),
                Err(e) => warn!("Logout failed: {}", e),
            }
        });

        self.dispatch(Action::LoggedOut);
        handle
    }

    /// Asks the service who the cookie session belongs to.
    pub async fn current_user(&mut self) -> Result<Identity, AuthError> {
        if !self.state.is_authenticated() {
            return Err(AuthError::Validation(LOGIN_REQUIRED.to_string()));
        }

        let user_id = self.service.current_user().await?;
        self.dispatch(Action::UserIdResolved(user_id));

        self.state
            .identity
            .clone()
            .ok_or_else(|| AuthError::Validation(LOGIN_REQUIRED.to_string()))
    }

    /// Applies the type check; returns whether the file was kept.
    pub fn select_resume(&mut self, file: ResumeFile) -> bool {
        self.dispatch(Action::ResumeSelected(file));
        !self.state.dashboard_errors.contains(Field::Resume)
    }

    /// Validates the dashboard and runs the analysis for `feature`.
    ///
    /// `Idle → Loading → Ready | Failed`. Refused while another analysis is
    /// loading; validation failures are stored and never reach the network.
    pub async fn submit(&mut self, feature: Feature) -> Result<AnalysisResult, AnalysisError> {
        if self.state.analysis.is_loading() {
            return Err(AnalysisError::Busy);
        }
        if !self.state.is_authenticated() {
            return Err(AnalysisError::NotAuthenticated);
        }

        let errors = validation::validate(&self.state.dashboard, feature);
        if !errors.is_empty() {
            self.dispatch(Action::ValidationFailed(errors.clone()));
            return Err(AnalysisError::Validation(errors));
        }

        self.dispatch(Action::AnalysisStarted(feature));
        let outcome =
            orchestrator::run_analysis(self.service.as_ref(), &self.state.dashboard, feature).await;

        match outcome {
            Ok(result) => {
                self.dispatch(Action::AnalysisSucceeded(result.clone()));
                Ok(result)
            }
            Err(e) => {
                warn!("Analysis {} failed: {}", feature, e);
                self.dispatch(Action::AnalysisFailed(e.user_message()));
                Err(e)
            }
        }
    }

    /// Leaves the results screen, discarding the result.
    pub fn back_to_dashboard(&mut self) {
        self.dispatch(Action::BackToDashboard);
    }

    fn reject(&mut self, message: &str) -> AuthError {
        self.dispatch(Action::AuthFailed(message.to_string()));
        AuthError::Validation(message.to_string())
    }
}
