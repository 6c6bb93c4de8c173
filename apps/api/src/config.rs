use anyhow::{Context, Result};

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_FLASH_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_PRO_MODEL: &str = "gemini-1.5-pro";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_api_base: String,
    pub flash_model: String,
    pub pro_model: String,
    pub llm_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub port: u16,
    /// Level for this crate's target when `RUST_LOG` is not set.
    pub log_level: String,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            google_api_key: lookup("GOOGLE_API_KEY")
                .filter(|v| !v.trim().is_empty())
                .context("Required environment variable 'GOOGLE_API_KEY' is not set")?,
            gemini_api_base: var("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            flash_model: var("GEMINI_FLASH_MODEL", DEFAULT_FLASH_MODEL),
            pro_model: var("GEMINI_PRO_MODEL", DEFAULT_PRO_MODEL),
            llm_timeout_secs: var("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            max_upload_bytes: var("MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            log_level: var("LOG_LEVEL", "info"),
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|v| !v.trim().is_empty()),
        })
    }
}

#[cfg(test)]
impl Config {
    /// Configuration used by router tests; never reaches the network.
    pub fn for_tests() -> Self {
        Config {
            google_api_key: "test-key".to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            flash_model: DEFAULT_FLASH_MODEL.to_string(),
            pro_model: DEFAULT_PRO_MODEL.to_string(),
            llm_timeout_secs: 5,
            max_upload_bytes: 1024 * 1024,
            port: 0,
            log_level: "debug".to_string(),
            cors_allowed_origin: None,
        }
    }
}
