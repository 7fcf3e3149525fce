//! Webhook subscription and delivery system for docbin documents.
//!
//! Provides per-document webhook subscription management (authenticated by
//! a per-subscription secret), and asynchronous fan-out delivery of
//! document events with bounded concurrency, per-attempt timeouts, and
//! linear capped backoff. Delivery is at-least-one-attempt, best-effort:
//! there is no durable retry queue.

pub mod config;
pub mod delivery;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod router;
pub mod validation;

pub use config::WebhookConfig;
pub use dispatcher::Dispatcher;
pub use error::WebhookApiError;
pub use models::{WebhookDocument, WebhookEvent};
pub use registry::RegistryService;
pub use router::{webhooks_router, WebhooksState};
