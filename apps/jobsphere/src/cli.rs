use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::api_client::{ApiClient, ResumeService};
use crate::cities;
use crate::config::Config;
use crate::models::analysis::AnalysisResult;
use crate::models::dashboard::{Experience, ResumeFile};
use crate::models::feature::Feature;
use crate::report;
use crate::session::{Action, AuthMode, Session};
use crate::validation::Field;

#[derive(Parser)]
#[command(name = "jobsphere", version, about = "Resume analysis client for the JobSphere service")]
pub struct Cli {
    /// Service base URL. Falls back to JOBSPHERE_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long, env = "JOBSPHERE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to the password
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Check that credentials work and show the account id
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "JOBSPHERE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in, run one analysis on a resume, log out
    Analyze(AnalyzeArgs),
    /// Suggest Indian cities for a typed prefix
    Cities { prefix: String },
    /// List the analyses the service offers
    Features,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "JOBSPHERE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// ats-score, missing-skills, project-ideas, interview-prep or job-matches
    #[arg(long)]
    pub feature: Feature,

    /// Path to a PDF or DOCX resume
    #[arg(long)]
    pub resume: PathBuf,
    /// Overrides the content type guessed from the file extension
    #[arg(long)]
    pub content_type: Option<String>,

    #[arg(long, default_value = "")]
    pub job_role: String,
    #[arg(long, default_value = "")]
    pub location: String,
    /// 0-1, 1-3, 3-5, 5-10 or 10+
    #[arg(long)]
    pub experience: Option<Experience>,

    #[arg(long, conflicts_with = "job_description_file")]
    pub job_description: Option<String>,
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,

    /// Print the raw result instead of the text report
    #[arg(long)]
    pub json: bool,
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Cities { prefix } => {
            for city in cities::suggest(&prefix) {
                println!("{city}");
            }
            Ok(())
        }
        Command::Features => {
            for feature in Feature::ALL {
                let note = if feature.requires_job_description() {
                    " (needs --job-description)"
                } else {
                    ""
                };
                println!("{:<15} {}{}", feature.id(), feature.title(), note);
                println!("{:<15} {}", "", feature.description());
            }
            Ok(())
        }
        Command::Signup {
            email,
            password,
            confirm_password,
        } => {
            let mut session = connect(cli.api_url)?;
            let confirm = confirm_password.unwrap_or_else(|| password.clone());
            create_account(&mut session, &email, &password, &confirm).await?;
            println!("Account created for {email}. You can now log in.");
            Ok(())
        }
        Command::Login { email, password } => {
            let mut session = connect(cli.api_url)?;
            let outcome = check_login(&mut session, &email, &password).await;
            finish(session).await;
            outcome
        }
        Command::Analyze(args) => {
            let mut session = connect(cli.api_url)?;
            let outcome = analyze(&mut session, args).await;
            finish(session).await;
            outcome
        }
    }
}

fn connect(api_url: Option<String>) -> Result<Session> {
    let config = Config::from_env(api_url)?;
    let api = ApiClient::from_config(&config).context("Failed to build HTTP client")?;
    info!("Using JobSphere service at {}", api.base_url());
    let service: Arc<dyn ResumeService> = Arc::new(api);
    Ok(Session::new(service))
}

/// Logs out if the session is authenticated and waits for the request to go out.
async fn finish(mut session: Session) {
    if !session.state().is_authenticated() {
        return;
    }
    if let Err(e) = session.logout().await {
        warn!("Logout task did not complete: {}", e);
    }
}

async fn create_account(
    session: &mut Session,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<()> {
    session.switch_auth_mode(AuthMode::Signup);
    session
        .signup(email, password, confirm_password)
        .await
        .map_err(|e| anyhow!(e.user_message()))
}

async fn check_login(session: &mut Session, email: &str, password: &str) -> Result<()> {
    session
        .login(email, password)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    match session.current_user().await {
        Ok(identity) => match identity.user_id {
            Some(id) => println!("Logged in as {} (user id {id})", identity.email),
            None => println!("Logged in as {}", identity.email),
        },
        Err(e) => {
            warn!("Could not resolve user id: {}", e);
            println!("Logged in as {email}");
        }
    }
    Ok(())
}

async fn analyze(session: &mut Session, args: AnalyzeArgs) -> Result<()> {
    let job_description = match (&args.job_description, &args.job_description_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description from {}", path.display()))?,
        (None, None) => String::new(),
    };

    let resume = ResumeFile::from_path(&args.resume, args.content_type.as_deref())
        .await
        .with_context(|| format!("Failed to read resume from {}", args.resume.display()))?;

    session
        .login(&args.email, &args.password)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    session.dispatch(Action::SetJobRole(args.job_role));
    session.dispatch(Action::SetLocation(args.location));
    session.dispatch(Action::SetExperience(args.experience));
    session.dispatch(Action::SetJobDescription(job_description));
    if !session.select_resume(resume) {
        let message = session
            .state()
            .dashboard_errors
            .get(Field::Resume)
            .unwrap_or_default()
            .to_string();
        bail!(message);
    }

    let result = session
        .submit(args.feature)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    print!("{}", format_result(args.feature, result, args.json)?);
    Ok(())
}

fn format_result(feature: Feature, result: AnalysisResult, json: bool) -> Result<String> {
    if json {
        let mut text = serde_json::to_string_pretty(&result.into_value())?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(report::render(feature, &result))
    }
}
