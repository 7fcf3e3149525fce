//! Delivery transport: single-attempt HTTP POST plus the bounded retry
//! loop around it.
//!
//! Backoff is linear-with-multiplier and capped, not exponential:
//! `delay(i) = min(max_backoff, backoff_factor * backoff * i)`, so the
//! first attempt always runs immediately.

use std::time::Duration;

use reqwest::header;
use reqwest::Client;

use crate::config::WebhookConfig;
use crate::error::WebhookApiError;
use crate::models::WebhookPayload;

/// User agent sent on every delivery request.
const USER_AGENT: &str = concat!("docbin/", env!("CARGO_PKG_VERSION"));

/// Outcome of one subscriber's retry loop within one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryResult {
    /// A 2xx response terminated the loop. `attempts` counts requests sent.
    Delivered { attempts: u32 },
    /// The attempt budget ran out. Terminal: never retried later.
    Exhausted { attempts: u32 },
}

impl DeliveryResult {
    /// Whether the delivery reached the subscriber.
    #[must_use]
    pub fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Backoff before attempt `attempt` (0-based). Zero for the first attempt.
#[must_use]
pub fn backoff_delay(attempt: u32, config: &WebhookConfig) -> Duration {
    let delay = config
        .backoff
        .mul_f64(config.backoff_factor * f64::from(attempt));
    delay.min(config.max_backoff)
}

/// HTTP client for webhook deliveries, shared across all dispatches.
#[derive(Clone)]
pub struct DeliveryClient {
    client: Client,
    config: WebhookConfig,
}

impl DeliveryClient {
    /// Build a delivery client with the per-attempt deadline and service
    /// user agent applied.
    ///
    /// # Errors
    ///
    /// Returns `WebhookApiError::Internal` if the HTTP client cannot be
    /// built.
    pub fn new(config: WebhookConfig) -> Result<Self, WebhookApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| WebhookApiError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Run the bounded retry loop for one subscriber.
    ///
    /// A transport error (connection failure, timeout) and a non-2xx status
    /// are both attempt failures; the loop continues after backoff. The
    /// first 2xx terminates the loop as success. Exhaustion is terminal and
    /// logged only.
    pub async fn deliver(&self, url: &str, secret: &str, payload: &WebhookPayload) -> DeliveryResult {
        let mut attempts = 0;

        for attempt in 0..self.config.max_tries {
            let backoff = backoff_delay(attempt, &self.config);
            if backoff > Duration::from_nanos(1) {
                tracing::debug!(
                    target: "webhook_delivery",
                    webhook_id = %payload.webhook_id,
                    backoff_ms = backoff.as_millis(),
                    "sleeping backoff"
                );
                tokio::time::sleep(backoff).await;
            }

            attempts += 1;
            match self.attempt(url, secret, payload).await {
                Ok(status) if status.is_success() => {
                    tracing::debug!(
                        target: "webhook_delivery",
                        webhook_id = %payload.webhook_id,
                        event = %payload.event,
                        document_id = %payload.document.key,
                        status = status.as_u16(),
                        attempts,
                        "successfully delivered webhook"
                    );
                    return DeliveryResult::Delivered { attempts };
                }
                Ok(status) => {
                    tracing::debug!(
                        target: "webhook_delivery",
                        webhook_id = %payload.webhook_id,
                        status = status.as_u16(),
                        "invalid status code"
                    );
                }
                Err(e) => {
                    tracing::debug!(
                        target: "webhook_delivery",
                        webhook_id = %payload.webhook_id,
                        error = %e,
                        "failed to execute request"
                    );
                }
            }
        }

        tracing::error!(
            target: "webhook_delivery",
            webhook_id = %payload.webhook_id,
            event = %payload.event,
            document_id = %payload.document.key,
            attempts,
            "failed to deliver webhook: max tries reached"
        );
        DeliveryResult::Exhausted { attempts }
    }

    /// One delivery attempt: POST the payload with the subscriber's secret
    /// as the authorization credential.
    async fn attempt(
        &self,
        url: &str,
        secret: &str,
        payload: &WebhookPayload,
    ) -> Result<reqwest::StatusCode, reqwest::Error> {
        let response = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, format!("Secret {secret}"))
            .json(payload)
            .send()
            .await?;

        Ok(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retry_config() -> WebhookConfig {
        WebhookConfig {
            max_tries: 3,
            backoff: Duration::from_millis(100),
            backoff_factor: 2.0,
            max_backoff: Duration::from_millis(300),
            ..WebhookConfig::default()
        }
    }

    #[test]
    fn test_first_attempt_has_no_backoff() {
        assert_eq!(backoff_delay(0, &retry_config()), Duration::ZERO);
    }

    #[test]
    fn test_backoff_is_linear_with_multiplier() {
        let config = retry_config();
        // factor * base * i = 2 * 100ms * 1 = 200ms
        assert_eq!(backoff_delay(1, &config), Duration::from_millis(200));
    }

    #[test]
    fn test_backoff_caps_at_max() {
        let config = retry_config();
        // 2 * 100ms * 2 = 400ms, capped at 300ms
        assert_eq!(backoff_delay(2, &config), Duration::from_millis(300));
        assert_eq!(backoff_delay(10, &config), Duration::from_millis(300));
    }

    #[test]
    fn test_backoff_not_exponential() {
        let config = WebhookConfig {
            backoff: Duration::from_millis(10),
            backoff_factor: 2.0,
            max_backoff: Duration::from_secs(60),
            ..WebhookConfig::default()
        };
        // Linear: 20ms * i, not 10ms * 2^i
        assert_eq!(backoff_delay(3, &config), Duration::from_millis(60));
        assert_eq!(backoff_delay(4, &config), Duration::from_millis(80));
    }

    #[test]
    fn test_user_agent_names_service_and_version() {
        assert!(USER_AGENT.starts_with("docbin/"));
        assert!(USER_AGENT.len() > "docbin/".len());
    }
}
