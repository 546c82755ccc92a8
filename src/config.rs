//! Desk configuration.
//!
//! Reads config from env vars (after loading `.env` if present):
//!   GRIEVANCE_API_URL            complaint service base url (default: http://localhost:8080)
//!   GRIEVANCE_SESSION_FILE       cached login session (default: .grievance/session.json)
//!   GRIEVANCE_HTTP_TIMEOUT_SECS  per-request timeout (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_FILE: &str = ".grievance/session.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: Url,
    pub session_file: PathBuf,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("GRIEVANCE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let api_url = Url::parse(&raw_url)
            .with_context(|| format!("GRIEVANCE_API_URL is not a valid url: {raw_url}"))?;

        let session_file = lookup("GRIEVANCE_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));

        let http_timeout = match lookup("GRIEVANCE_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("GRIEVANCE_HTTP_TIMEOUT_SECS must be a number: {raw}"))?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            session_file,
            http_timeout,
        })
    }
}
