use anyhow::{Context, Result};

/// Fallback origin for local development, where the analysis service runs on
/// its default port.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the analysis service, without a trailing slash.
    pub api_base: String,
    pub rust_log: String,
}

impl Config {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: normalize_base(&api_base.into()),
            rust_log: "info".to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Loads configuration, letting `api_base_override` (typically the
    /// `--api-base` flag) replace `API_BASE`. The environment value is only
    /// validated when no override is given.
    pub fn load(api_base_override: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base: resolve_api_base(api_base_override, std::env::var("API_BASE").ok())?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn resolve_api_base(flag: Option<String>, env: Option<String>) -> Result<String> {
    match flag {
        Some(base) => parse_base(&base).context("--api-base must be an absolute http(s) URL"),
        None => {
            let base = env.unwrap_or_else(|| DEFAULT_API_BASE.to_string());
            parse_base(&base).context("API_BASE must be an absolute http(s) URL")
        }
    }
}

fn parse_base(raw: &str) -> Result<String> {
    let url = reqwest::Url::parse(raw.trim())
        .with_context(|| format!("'{raw}' is not a valid URL"))?;
    anyhow::ensure!(
        matches!(url.scheme(), "http" | "https"),
        "unsupported scheme '{}'",
        url.scheme()
    );
    Ok(normalize_base(raw))
}

fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
