use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the JobSphere service, without a trailing slash.
    pub api_url: String,
    /// Unset by default: requests wait for the server indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Reads `JOBSPHERE_API_URL` unless `api_url` overrides it.
    pub fn from_env(api_url: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = match api_url {
            Some(url) => url,
            None => require_env("JOBSPHERE_API_URL")?,
        };

        let request_timeout = match std::env::var("JOBSPHERE_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        Ok(Config {
            api_url: normalize_base_url(&api_url)?,
            request_timeout,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed)
        .with_context(|| format!("JOBSPHERE_API_URL is not a valid URL: '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("JOBSPHERE_API_URL must use http or https, got '{}'", url.scheme());
    }
    Ok(trimmed.to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("JOBSPHERE_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;
    if secs == 0 {
        bail!("JOBSPHERE_REQUEST_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_trims_trailing_slashes() {
        assert_eq!(
            normalize_base_url("http://localhost:8000//").unwrap(),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url(" https://jobsphere.example.com ").unwrap(),
            "https://jobsphere.example.com"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
        assert!(normalize_base_url("ftp://files.example.com").is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("30").unwrap(), Duration::from_secs(30));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }
}
