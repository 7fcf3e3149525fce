//! Asynchronous fan-out of document events to webhook subscribers.
//!
//! [`Dispatcher::notify`] is fire-and-forget: it enqueues the dispatch and
//! returns without waiting for any delivery. Spawning detaches the dispatch
//! from the triggering request's cancellation; only the subscriber-lookup
//! step is bounded by a timeout. The process-wide [`TaskTracker`] counts
//! in-flight dispatches so graceful shutdown can drain them.

use chrono::Utc;
use docbin_db::Webhook;
use sqlx::PgPool;
use tokio::task::JoinSet;
use tokio_util::task::TaskTracker;

use crate::config::WebhookConfig;
use crate::delivery::DeliveryClient;
use crate::error::WebhookApiError;
use crate::models::{WebhookDocument, WebhookEvent, WebhookPayload};

/// Dispatches document events to matching webhook subscriptions.
#[derive(Clone)]
pub struct Dispatcher {
    pool: PgPool,
    config: WebhookConfig,
    client: DeliveryClient,
    tracker: TaskTracker,
}

impl Dispatcher {
    /// Create a dispatcher sharing one HTTP client across all dispatches.
    ///
    /// # Errors
    ///
    /// Returns `WebhookApiError::Internal` if the HTTP client cannot be
    /// built.
    pub fn new(pool: PgPool, config: WebhookConfig) -> Result<Self, WebhookApiError> {
        let client = DeliveryClient::new(config.clone())?;
        Ok(Self {
            pool,
            config,
            client,
            tracker: TaskTracker::new(),
        })
    }

    /// Notify subscribers of a document event. Fire-and-forget: returns
    /// immediately, never blocking the caller on lookup or delivery.
    ///
    /// No-op when webhook delivery is disabled by configuration. For a
    /// [`WebhookEvent::Delete`] the document's webhooks are atomically
    /// consumed as part of the lookup, so each fires at most once and none
    /// outlives the document.
    pub fn notify(&self, event: WebhookEvent, document: WebhookDocument) {
        if !self.config.enabled {
            return;
        }

        let dispatcher = self.clone();
        self.tracker.spawn(async move {
            dispatcher.dispatch(event, document).await;
        });
    }

    /// One end-to-end dispatch: resolve subscribers, filter, fan out, and
    /// wait for all deliveries. Completion is observability-only.
    async fn dispatch(&self, event: WebhookEvent, document: WebhookDocument) {
        let lookup = async {
            match event {
                WebhookEvent::Delete => {
                    Webhook::delete_by_document(&self.pool, &document.key).await
                }
                WebhookEvent::Update => Webhook::find_by_document(&self.pool, &document.key).await,
            }
        };

        let webhooks = match tokio::time::timeout(self.config.timeout, lookup).await {
            Ok(Ok(webhooks)) => webhooks,
            Ok(Err(e)) => {
                tracing::error!(
                    target: "webhook_delivery",
                    event = %event,
                    document_id = %document.key,
                    error = %e,
                    "failed to get webhooks by document id"
                );
                return;
            }
            Err(_) => {
                tracing::error!(
                    target: "webhook_delivery",
                    event = %event,
                    document_id = %document.key,
                    "webhook lookup timed out"
                );
                return;
            }
        };

        if webhooks.is_empty() {
            return;
        }

        self.fan_out(webhooks, event, document).await;
    }

    /// Deliver an event to an already-resolved subscriber list.
    ///
    /// Subscribers not subscribed to the firing event are skipped with no
    /// attempt. Each matching subscriber gets an independent concurrent
    /// task; one subscriber's backoff never delays another's. Returns once
    /// every task finished (success or exhausted retries).
    pub async fn fan_out(
        &self,
        webhooks: Vec<Webhook>,
        event: WebhookEvent,
        document: WebhookDocument,
    ) {
        let created_at = Utc::now();
        let mut tasks = JoinSet::new();

        for webhook in webhooks {
            if !webhook.subscribes_to(event.as_str()) {
                continue;
            }

            let client = self.client.clone();
            let payload = WebhookPayload {
                webhook_id: webhook.id,
                event,
                created_at,
                document: document.clone(),
            };
            tasks.spawn(async move { client.deliver(&webhook.url, &webhook.secret, &payload).await });
        }

        let mut delivered = 0u32;
        let mut exhausted = 0u32;
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(outcome) if outcome.is_delivered() => delivered += 1,
                Ok(_) => exhausted += 1,
                Err(e) => {
                    tracing::error!(
                        target: "webhook_delivery",
                        error = %e,
                        "webhook delivery task panicked"
                    );
                    exhausted += 1;
                }
            }
        }

        tracing::debug!(
            target: "webhook_delivery",
            event = %event,
            document_id = %document.key,
            delivered,
            exhausted,
            "finished emitting webhooks"
        );
    }

    /// Wait for all in-flight dispatches to finish. Called on graceful
    /// shutdown; new dispatches spawned after this still run but are no
    /// longer awaited.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}
