//! Client configuration

use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "http://localhost:5011";
const DEFAULT_SESSION_FILE: &str = ".booking-session";

/// Client configuration for connecting to the booking server
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | BOOKING_API_URL | http://localhost:5011 | 服务器地址 |
/// | BOOKING_TIMEOUT_SECS | 30 | 请求超时(秒) |
/// | BOOKING_SESSION_FILE | .booking-session | 会话令牌文件 |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5011")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// File holding the session token
    pub session_file: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config =
            Self::new(std::env::var("BOOKING_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()));
        if let Some(timeout) = std::env::var("BOOKING_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Ok(path) = std::env::var("BOOKING_SESSION_FILE") {
            config.session_file = PathBuf::from(path);
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the session token file
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("http://127.0.0.1:9000")
            .with_timeout(5)
            .with_session_file("/tmp/token");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.session_file, PathBuf::from("/tmp/token"));
    }

    #[test]
    fn test_default_points_at_local_server() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5011");
        assert_eq!(config.timeout, 30);
    }
}
