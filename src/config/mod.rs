//! Configuration module for the newsdesk backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default public image-generation endpoint.
pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://image.pollinations.ai/prompt/";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared admin passphrase (unset means the admin surface is open)
    pub admin_passphrase: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// API key for the generative-AI service
    pub gemini_api_key: Option<String>,
    /// Base URL of the generative-AI service
    pub gemini_base_url: String,
    /// Model name used for every gateway call
    pub gemini_model: String,
    /// Per-request timeout for gateway calls
    pub gateway_timeout: Duration,
    /// Social feed handle imported by default
    pub feed_handle: String,
    /// Source label stamped on manually added articles
    pub source_label: String,
    /// chrono format string for article display dates
    pub date_format: String,
    /// Load the demo articles at startup
    pub seed_demo: bool,
    /// Image-generation endpoint prefix
    pub image_endpoint: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_passphrase = env::var("NEWSDESK_ADMIN_PASSPHRASE")
            .ok()
            .filter(|s| !s.is_empty());

        let bind_addr = env::var("NEWSDESK_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid NEWSDESK_BIND_ADDR format");

        let log_level = env::var("NEWSDESK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let gemini_api_key = env::var("NEWSDESK_GEMINI_API_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        let gemini_base_url = env::var("NEWSDESK_GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());

        let gemini_model =
            env::var("NEWSDESK_GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());

        let gateway_timeout = env::var("NEWSDESK_GATEWAY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(60));

        let feed_handle =
            env::var("NEWSDESK_FEED_HANDLE").unwrap_or_else(|_| "games_statlon".to_string());

        let source_label =
            env::var("NEWSDESK_SOURCE_LABEL").unwrap_or_else(|_| "GAMES STATLON".to_string());

        let date_format =
            env::var("NEWSDESK_DATE_FORMAT").unwrap_or_else(|_| "%Y-%m-%d".to_string());

        let seed_demo = env::var("NEWSDESK_SEED_DEMO")
            .map(|s| !matches!(s.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        let image_endpoint = env::var("NEWSDESK_IMAGE_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_IMAGE_ENDPOINT.to_string());

        Self {
            admin_passphrase,
            bind_addr,
            log_level,
            gemini_api_key,
            gemini_base_url,
            gemini_model,
            gateway_timeout,
            feed_handle,
            source_label,
            date_format,
            seed_demo,
            image_endpoint,
        }
    }
}
