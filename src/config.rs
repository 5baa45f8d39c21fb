//! Build-time configuration with runtime resolution against the page origin.

/// Contacts per list page. The backend accepts any size; the UI always asks for 10.
pub const PAGE_SIZE: u32 = 10;

/// Largest resume the client will send.
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;

/// Durable storage keys for the persisted session.
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Absolute base URL of the backend, without a trailing slash.
    pub api_base: String,
    pub page_size: u32,
    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration baked in at compile time and resolve a relative API
    /// base against the current page origin.
    pub fn load() -> Self {
        let base = option_env!("TALENTCONNECT_API_BASE").unwrap_or(DEFAULT_API_BASE);
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        Self {
            api_base: resolve_base(base, origin.as_deref()),
            page_size: PAGE_SIZE,
            log_filter: option_env!("TALENTCONNECT_LOG")
                .unwrap_or(DEFAULT_LOG_FILTER)
                .to_string(),
        }
    }

    /// Join an endpoint path (leading slash expected) onto the base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

/// The fetch-backed HTTP client only accepts absolute URLs, so "/api" becomes
/// "https://host/api" when an origin is known.
fn resolve_base(base: &str, origin: Option<&str>) -> String {
    let base = base.trim_end_matches('/');
    match origin {
        Some(origin) if base.starts_with('/') => {
            format!("{}{}", origin.trim_end_matches('/'), base)
        }
        _ => base.to_string(),
    }
}
