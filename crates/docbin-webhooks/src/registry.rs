//! Webhook subscription registry.
//!
//! CRUD business logic over webhook subscriptions. Creation is gated by the
//! share token's `webhook` permission; every later operation authenticates
//! by possession of the per-subscription secret instead. The two credential
//! types never share a validation path.

use docbin_core::{Claims, Permission};
use docbin_db::{CreateWebhook, UpdateWebhook, Webhook};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::WebhookApiError;
use crate::models::{CreateWebhookRequest, UpdateWebhookRequest, WebhookResponse};
use crate::validation;

/// Service for webhook subscription operations.
#[derive(Clone)]
pub struct RegistryService {
    pool: PgPool,
}

impl RegistryService {
    /// Create a new registry service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a webhook subscription for a document.
    ///
    /// Requires the presenting claims to hold [`Permission::WEBHOOK`].
    /// Field validation runs before the permission check and both run
    /// before any persistence call.
    pub async fn create(
        &self,
        claims: &Claims,
        document_id: &str,
        request: CreateWebhookRequest,
    ) -> Result<WebhookResponse, WebhookApiError> {
        validation::validate_create(&request)?;

        if claims.permissions.misses(Permission::WEBHOOK) {
            return Err(WebhookApiError::PermissionDenied("webhook"));
        }

        let webhook = Webhook::create(
            &self.pool,
            CreateWebhook {
                document_id: document_id.to_string(),
                url: request.url,
                secret: request.secret,
                events: request.events,
            },
        )
        .await?;

        tracing::debug!(
            webhook_id = %webhook.id,
            document_id = %webhook.document_id,
            "created webhook subscription"
        );

        Ok(webhook_to_response(webhook))
    }

    /// Fetch a webhook by presenting its exact secret.
    ///
    /// A wrong secret yields the same `NotFound` as a nonexistent id.
    pub async fn get(
        &self,
        document_id: &str,
        webhook_id: Uuid,
        secret: &str,
    ) -> Result<WebhookResponse, WebhookApiError> {
        let webhook = Webhook::find(&self.pool, document_id, webhook_id, secret)
            .await?
            .ok_or(WebhookApiError::NotFound)?;

        Ok(webhook_to_response(webhook))
    }

    /// Partially update a webhook by presenting its exact secret.
    pub async fn update(
        &self,
        document_id: &str,
        webhook_id: Uuid,
        secret: &str,
        request: UpdateWebhookRequest,
    ) -> Result<WebhookResponse, WebhookApiError> {
        let request = validation::validate_update(request)?;

        let webhook = Webhook::update(
            &self.pool,
            document_id,
            webhook_id,
            secret,
            UpdateWebhook {
                url: request.url,
                secret: request.secret,
                events: request.events,
            },
        )
        .await?
        .ok_or(WebhookApiError::NotFound)?;

        Ok(webhook_to_response(webhook))
    }

    /// Delete a webhook by presenting its exact secret. Deleting an
    /// already-deleted webhook reports `NotFound` as well.
    pub async fn delete(
        &self,
        document_id: &str,
        webhook_id: Uuid,
        secret: &str,
    ) -> Result<(), WebhookApiError> {
        let deleted = Webhook::delete(&self.pool, document_id, webhook_id, secret).await?;
        if !deleted {
            return Err(WebhookApiError::NotFound);
        }

        tracing::debug!(%webhook_id, %document_id, "deleted webhook subscription");
        Ok(())
    }
}

/// Convert a DB model to an API response.
fn webhook_to_response(webhook: Webhook) -> WebhookResponse {
    WebhookResponse {
        id: webhook.id,
        document_key: webhook.document_id,
        url: webhook.url,
        secret: webhook.secret,
        events: webhook.events,
    }
}
