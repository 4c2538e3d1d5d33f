use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// HTTP timeout of a single model call.
    pub llm_timeout_secs: u64,
    /// Upper bound on one gap-analysis stage (one model round trip).
    pub stage_timeout_secs: u64,
    pub ocr_dpi: u32,
    pub ocr_language: String,
    /// Upper bound on one rasterizer or tesseract subprocess.
    pub ocr_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub drop_blank_suggestions: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: env_or("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: env_or("LLM_TIMEOUT_SECS", 120)?,
            stage_timeout_secs: env_or("STAGE_TIMEOUT_SECS", 180)?,
            ocr_dpi: env_or("OCR_DPI", 300)?,
            ocr_language: std::env::var("OCR_LANGUAGE").unwrap_or_else(|_| "eng".to_string()),
            ocr_timeout_secs: env_or("OCR_TIMEOUT_SECS", 120)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
            drop_blank_suggestions: env_or("DROP_BLANK_SUGGESTIONS", false)?,
        })
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.stage_timeout_secs)
    }

    pub fn ocr_timeout(&self) -> Duration {
        Duration::from_secs(self.ocr_timeout_secs)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_to_default_when_unset() {
        let value: u32 = env_or("SKILLGAP_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_env_or_parses_set_value() {
        std::env::set_var("SKILLGAP_TEST_OCR_DPI", " 150 ");
        let value: u32 = env_or("SKILLGAP_TEST_OCR_DPI", 300).unwrap();
        assert_eq!(value, 150);
    }

    #[test]
    fn test_env_or_rejects_garbage() {
        std::env::set_var("SKILLGAP_TEST_BAD_BOOL", "maybe");
        let result: Result<bool> = env_or("SKILLGAP_TEST_BAD_BOOL", false);
        assert!(result.is_err());
    }

    #[test]
    fn test_require_env_reports_missing_key() {
        let err = require_env("SKILLGAP_TEST_DEFINITELY_MISSING").unwrap_err();
        assert!(err.to_string().contains("SKILLGAP_TEST_DEFINITELY_MISSING"));
    }
}
