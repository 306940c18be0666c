use std::env;
use url::Url;
// Domain model lives in the interfaces crate
pub use interfaces::defs::{
    Action, Article, ClientId, ClientRoster, ContentId, ContentItem, ContentKind, NewsCategory,
    Post, Role, Sentiment, SentimentLabel, SocialPlatform,
};
pub use interfaces::state::{ContentStore, StoreError};

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Settings for the sentiment classification backend.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Absent keys are only reported when a classification is attempted.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model_name: String,
    pub temperature: f32,
    pub user_agent: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            model_name: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            user_agent: "Clipping-App/1.0".to_string(),
        }
    }
}

impl ClassifierConfig {
    /// Read `API_KEY` (or `GEMINI_API_KEY`), `CLIPPING_MODEL` and
    /// `CLIPPING_API_BASE_URL`, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let api_key = env::var("API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model_name = env::var("CLIPPING_MODEL").unwrap_or(defaults.model_name);
        let base_url = env::var("CLIPPING_API_BASE_URL").unwrap_or(defaults.base_url);

        Self {
            api_key,
            base_url,
            model_name,
            ..Self::default()
        }
        .validated()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validated(self) -> Result<Self> {
        let parsed = Url::parse(&self.base_url)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClippingError::Config(format!(
                "unsupported API scheme: {}",
                parsed.scheme()
            )));
        }
        Ok(self)
    }
}

/// Page geometry for compiled reports, in millimetres (A4 portrait).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    /// Space a block must have left on the page before it is emitted.
    pub block_threshold: f32,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 10.0,
            block_threshold: 30.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClippingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    BackendStatus { status: u16, body: String },

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Role {role:?} may not perform {action:?}")]
    PermissionDenied { role: Role, action: Action },

    #[error("{kind} {id} has no text to analyse")]
    NotEligible { kind: ContentKind, id: ContentId },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, ClippingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_base_urls() {
        let config = ClassifierConfig::default().with_base_url("ftp://example.com");
        assert!(matches!(config.validated(), Err(ClippingError::Config(_))));

        let config = ClassifierConfig::default().with_base_url("not a url");
        assert!(matches!(config.validated(), Err(ClippingError::InvalidUrl(_))));
    }

    #[test]
    fn default_config_has_no_key_and_low_temperature() {
        let config = ClassifierConfig::default();
        assert!(config.api_key.is_none());
        assert!(config.temperature <= 0.2);
        assert!(config.validated().is_ok());
    }
}
