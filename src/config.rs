use std::{path::PathBuf, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SESSION_DIR: &str = ".storefront";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub session_dir: PathBuf,
    /// `None` leaves hang behaviour to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());
        let session_dir = std::env::var("SESSION_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_DIR));
        let request_timeout = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);

        if api_base_url.trim().is_empty() {
            anyhow::bail!("API_BASE_URL must not be empty");
        }

        Ok(Self {
            api_base_url,
            session_dir,
            request_timeout,
        })
    }
}
