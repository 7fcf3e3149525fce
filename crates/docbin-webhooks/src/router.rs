//! Axum router setup for the webhook endpoints.
//!
//! The router is mounted by the host application, which is also responsible
//! for verifying share tokens and attaching [`docbin_core::Claims`] to
//! requests before they reach these routes.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;

use crate::config::WebhookConfig;
use crate::dispatcher::Dispatcher;
use crate::error::WebhookApiError;
use crate::handlers;
use crate::registry::RegistryService;

/// Shared state for webhook handlers.
#[derive(Clone)]
pub struct WebhooksState {
    pub registry: Arc<RegistryService>,
    pub dispatcher: Dispatcher,
}

impl WebhooksState {
    /// Create the webhook state: registry plus dispatcher over one pool.
    ///
    /// # Errors
    ///
    /// Returns `WebhookApiError::Internal` if the delivery HTTP client
    /// cannot be built.
    pub fn new(pool: PgPool, config: WebhookConfig) -> Result<Self, WebhookApiError> {
        Ok(Self {
            registry: Arc::new(RegistryService::new(pool.clone())),
            dispatcher: Dispatcher::new(pool, config)?,
        })
    }
}

/// Creates the webhook router with all routes.
pub fn webhooks_router(state: WebhooksState) -> Router {
    Router::new()
        .route(
            "/documents/:document_id/webhook",
            post(handlers::create_webhook_handler),
        )
        .route(
            "/documents/:document_id/webhook/:webhook_id",
            get(handlers::get_webhook_handler)
                .patch(handlers::update_webhook_handler)
                .delete(handlers::delete_webhook_handler),
        )
        .with_state(state)
}
