//! Session state container and its reducer.
//!
//! All UI-facing state lives in one `AppState`; every change goes through
//! `reduce`, which is pure and synchronous.

use crate::cities;
use crate::models::analysis::AnalysisResult;
use crate::models::auth::Identity;
use crate::models::dashboard::{DashboardInput, Experience, ResumeFile};
use crate::models::feature::Feature;
use crate::validation::{self, ValidationErrors};

pub const SIGNUP_SUCCESS: &str = "Account created! Please login.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Auth,
    Dashboard,
    Analysis,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

/// Message shown on the auth screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Loading,
    Ready(AnalysisResult),
    Failed(String),
}

impl AnalysisStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, AnalysisStatus::Loading)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub screen: Screen,
    pub auth_mode: AuthMode,
    pub identity: Option<Identity>,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub notice: Option<Notice>,
    pub dashboard: DashboardInput,
    pub dashboard_errors: ValidationErrors,
    pub location_suggestions: Vec<&'static str>,
    pub selected_feature: Option<Feature>,
    pub analysis: AnalysisStatus,
}

impl AppState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    SwitchAuthMode(AuthMode),
    SetEmail(String),
    SetPassword(String),
    SetConfirmPassword(String),
    AuthFailed(String),
    LoggedIn(Identity),
    SignedUp,
    UserIdResolved(String),
    LoggedOut,

    SetJobRole(String),
    SetLocation(String),
    SetExperience(Option<Experience>),
    SetJobDescription(String),
    ResumeSelected(ResumeFile),
    ValidationFailed(ValidationErrors),

    AnalysisStarted(Feature),
    AnalysisSucceeded(AnalysisResult),
    AnalysisFailed(String),
    BackToDashboard,
}

pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SwitchAuthMode(mode) => {
            state.auth_mode = mode;
            state.email.clear();
            state.password.clear();
            state.confirm_password.clear();
            state.notice = None;
        }
        Action::SetEmail(email) => state.email = email,
        Action::SetPassword(password) => state.password = password,
        Action::SetConfirmPassword(password) => state.confirm_password = password,
        Action::AuthFailed(message) => state.notice = Some(Notice::Error(message)),
        Action::LoggedIn(identity) => {
            state.identity = Some(identity);
            state.screen = Screen::Dashboard;
            state.email.clear();
            state.password.clear();
            state.notice = None;
        }
        Action::SignedUp => {
            state.auth_mode = AuthMode::Login;
            state.notice = Some(Notice::Success(SIGNUP_SUCCESS.to_string()));
            state.password.clear();
            state.confirm_password.clear();
        }
        Action::UserIdResolved(user_id) => {
            if let Some(identity) = state.identity.as_mut() {
                identity.user_id = Some(user_id);
            }
        }
        Action::LoggedOut => return AppState::default(),

        Action::SetJobRole(role) => state.dashboard.job_role = role,
        Action::SetLocation(location) => {
            state.location_suggestions = cities::suggest(&location);
            state.dashboard.location = location;
        }
        Action::SetExperience(band) => state.dashboard.experience = band,
        Action::SetJobDescription(text) => state.dashboard.job_description = text,
        Action::ResumeSelected(file) => {
            validation::select_resume(&mut state.dashboard, &mut state.dashboard_errors, file);
        }
        Action::ValidationFailed(errors) => state.dashboard_errors = errors,

        Action::AnalysisStarted(feature) => {
            state.dashboard_errors = ValidationErrors::new();
            state.selected_feature = Some(feature);
            state.analysis = AnalysisStatus::Loading;
        }
        Action::AnalysisSucceeded(result) => {
            state.analysis = AnalysisStatus::Ready(result);
            state.screen = Screen::Analysis;
        }
        Action::AnalysisFailed(message) => state.analysis = AnalysisStatus::Failed(message),
        Action::BackToDashboard => {
            state.analysis = AnalysisStatus::Idle;
            state.screen = Screen::Dashboard;
        }
    }
    state
}
