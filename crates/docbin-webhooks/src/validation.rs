//! Pure validation helpers for webhook requests.
//!
//! Validation runs before any persistence call: an invalid request never
//! reaches the database.

use crate::error::WebhookApiError;
use crate::models::{CreateWebhookRequest, UpdateWebhookRequest, WebhookEvent};

/// Validate a create request: url, secret, and events must all be
/// non-empty, and every event name must be known.
pub fn validate_create(request: &CreateWebhookRequest) -> Result<(), WebhookApiError> {
    if request.url.is_empty() {
        return Err(WebhookApiError::MissingUrl);
    }
    if request.secret.is_empty() {
        return Err(WebhookApiError::MissingSecret);
    }
    if request.events.is_empty() {
        return Err(WebhookApiError::MissingEvents);
    }
    validate_event_names(&request.events)
}

/// Validate an update request: at least one of url/secret/events must be
/// present and non-empty. Returns the normalized request with empty
/// strings and empty lists treated as absent.
pub fn validate_update(
    request: UpdateWebhookRequest,
) -> Result<UpdateWebhookRequest, WebhookApiError> {
    let normalized = UpdateWebhookRequest {
        url: request.url.filter(|url| !url.is_empty()),
        secret: request.secret.filter(|secret| !secret.is_empty()),
        events: request.events.filter(|events| !events.is_empty()),
    };

    if normalized.url.is_none() && normalized.secret.is_none() && normalized.events.is_none() {
        return Err(WebhookApiError::MissingUpdateFields);
    }
    if let Some(ref events) = normalized.events {
        validate_event_names(events)?;
    }
    Ok(normalized)
}

/// Every name must be a known [`WebhookEvent`].
pub fn validate_event_names(events: &[String]) -> Result<(), WebhookApiError> {
    for name in events {
        if WebhookEvent::from_name(name).is_none() {
            return Err(WebhookApiError::UnknownEventType(name.clone()));
        }
    }
    Ok(())
}
