//! Transport configuration for the gateway client.

use std::collections::HashMap;
use std::time::Duration;

/// A secret string type for sensitive data like API keys.
/// Prevents accidental logging or display of secrets.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret string.
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the underlying secret value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// HTTP transport configuration for reaching the gateway.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    /// Publishable API key sent as a bearer token.
    pub api_key: Option<SecretString>,

    /// Base URL of the gateway, without a trailing path.
    pub base_url: Option<String>,

    /// HTTP proxy URL
    pub proxy: Option<String>,

    /// Additional HTTP headers to include in requests
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpTransport {
    /// Create new HTTP transport options with an API key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: None,
            proxy: None,
            extra_headers: None,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the proxy URL.
    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set extra headers.
    pub fn with_extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Add a single extra header.
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
        self
    }
}

/// Transport options: generic request settings plus the HTTP transport.
///
/// # Example
/// ```rust
/// use helios_muse::options::{HttpTransport, TransportOptions};
/// use std::time::Duration;
///
/// let options = TransportOptions::new(
///     HttpTransport::new("publishable-key")
///         .with_base_url("https://helios.example.com".to_string()),
/// )
/// .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Request timeout (applies to the whole streaming request)
    pub timeout: Option<Duration>,

    /// HTTP transport configuration
    pub transport: HttpTransport,
}

impl TransportOptions {
    /// Create new transport options around an HTTP transport.
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            timeout: None,
            transport,
        }
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_redacts_debug() {
        let secret = SecretString::new("sb-publishable-123".to_string());
        assert_eq!(format!("{:?}", secret), "SecretString([REDACTED])");
        assert_eq!(secret.expose_secret(), "sb-publishable-123");
    }

    #[test]
    fn test_builder_chain() {
        let options = TransportOptions::new(
            HttpTransport::new("key")
                .with_base_url("https://helios.example.com".to_string())
                .with_header("x-client-info".to_string(), "helios-muse".to_string()),
        )
        .with_timeout(Duration::from_secs(30));

        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
        assert_eq!(
            options.transport.base_url.as_deref(),
            Some("https://helios.example.com")
        );
        let headers = options.transport.extra_headers.unwrap();
        assert_eq!(headers.get("x-client-info").unwrap(), "helios-muse");
    }
}
