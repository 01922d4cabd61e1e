//! Tracing setup and redaction helpers
//!
//! Logs go to stderr so the terminal dashboard on stdout stays readable.
//! API keys must only ever reach a log line through [`SensitiveApiKey`].

use crate::config::LoggingConfig;
use reqwest::Url;
use std::fmt;
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` overrides the configured level. Can only be called once per
/// process; later calls are ignored.
pub fn init_tracing(cfg: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let result = if cfg.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Warning: tracing already initialized: {}", e);
    }
}

/// Redacted API key representation
///
/// Shows the first 8 characters followed by `***`; keys of 8 characters
/// or fewer are hidden entirely.
#[derive(Clone, Debug)]
pub struct SensitiveApiKey<'a> {
    inner: &'a str,
}

impl<'a> SensitiveApiKey<'a> {
    /// # Example
    /// ```
    /// use pricepoint::logging::SensitiveApiKey;
    ///
    /// let sanitized = SensitiveApiKey::new("AIzaSyD-abcdef123456");
    /// assert_eq!(format!("{}", sanitized), "AIzaSyD-***");
    /// ```
    pub fn new(key: &'a str) -> Self {
        Self { inner: key }
    }
}

impl fmt::Display for SensitiveApiKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible_len = 8.min(self.inner.len());
        if self.inner.len() <= visible_len || !self.inner.is_char_boundary(visible_len) {
            write!(f, "***")
        } else {
            write!(f, "{}***", &self.inner[..visible_len])
        }
    }
}

/// Display form of an optional key: redacted, or `(not set)`
pub fn describe_api_key(key: Option<&str>) -> String {
    match key {
        Some(k) if !k.is_empty() => SensitiveApiKey::new(k).to_string(),
        _ => "(not set)".to_string(),
    }
}

/// Mask the `key` query parameter of a URL before it is logged
pub fn redact_url(url: &Url) -> String {
    if !url.query_pairs().any(|(name, _)| name == "key") {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "key" {
                SensitiveApiKey::new(&value).to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_api_key_display() {
        let sanitized = SensitiveApiKey::new("AIzaSyD-abcdef123456");
        assert_eq!(format!("{}", sanitized), "AIzaSyD-***");
    }

    #[test]
    fn test_sensitive_api_key_short() {
        assert_eq!(SensitiveApiKey::new("abc123").to_string(), "***");
        assert_eq!(SensitiveApiKey::new("12345678").to_string(), "***");
    }

    #[test]
    fn test_describe_api_key() {
        assert_eq!(describe_api_key(None), "(not set)");
        assert_eq!(describe_api_key(Some("")), "(not set)");
        assert_eq!(describe_api_key(Some("secret-key-value")), "secret-k***");
    }

    fn url(text: &str) -> Url {
        Url::parse(text).unwrap()
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url(&url(
                "http://host/models/m:generateContent?key=secret-key-value&alt=json"
            )),
            "http://host/models/m:generateContent?key=secret-k***&alt=json"
        );
        assert_eq!(redact_url(&url("http://host/models")), "http://host/models");
        assert_eq!(
            redact_url(&url("http://host/models?alt=json")),
            "http://host/models?alt=json"
        );
    }

    #[test]
    fn test_redact_url_masks_empty_and_encoded_keys() {
        assert_eq!(
            redact_url(&url("http://host/m?key=")),
            "http://host/m?key=***"
        );
        let redacted = redact_url(&url("http://host/m?key=abc%2Fdef%2Bghi%3Djkl"));
        assert_eq!(redacted, "http://host/m?key=abc%2Fdef%2B***");
        assert!(!redacted.contains("jkl"));
    }
}
