//! Webhook delivery configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the webhook subsystem.
///
/// Deserializable from the host application's config file; every field has
/// a default so an absent `[webhook]` section yields a working setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebhookConfig {
    /// Master switch. When false, [`Dispatcher::notify`] is a no-op.
    ///
    /// [`Dispatcher::notify`]: crate::dispatcher::Dispatcher::notify
    pub enabled: bool,

    /// Attempt budget per subscriber per dispatch.
    pub max_tries: u32,

    /// Base backoff duration between attempts.
    #[serde(with = "humantime_serde")]
    pub backoff: Duration,

    /// Multiplier applied to the base backoff.
    pub backoff_factor: f64,

    /// Upper bound on any single backoff sleep.
    #[serde(with = "humantime_serde")]
    pub max_backoff: Duration,

    /// Bound on the subscriber-lookup step of a dispatch.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Per-attempt deadline for one outbound delivery request.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_tries: 3,
            backoff: Duration::from_secs(1),
            backoff_factor: 2.0,
            max_backoff: Duration::from_secs(5 * 60),
            timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WebhookConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_tries, 3);
        assert_eq!(config.backoff, Duration::from_secs(1));
        assert_eq!(config.max_backoff, Duration::from_secs(300));
    }

    #[test]
    fn test_deserialize_with_humantime_durations() {
        let config: WebhookConfig = serde_json::from_str(
            r#"{
                "enabled": false,
                "max_tries": 5,
                "backoff": "100ms",
                "backoff_factor": 2.0,
                "max_backoff": "300ms",
                "timeout": "2s",
                "request_timeout": "1s"
            }"#,
        )
        .unwrap();

        assert!(!config.enabled);
        assert_eq!(config.max_tries, 5);
        assert_eq!(config.backoff, Duration::from_millis(100));
        assert_eq!(config.max_backoff, Duration::from_millis(300));
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: WebhookConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_tries, WebhookConfig::default().max_tries);
    }
}
