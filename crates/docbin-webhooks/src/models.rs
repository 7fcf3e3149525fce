//! API request/response bodies and the outbound wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Document events that can trigger webhook deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WebhookEvent {
    /// Document content was updated.
    Update,
    /// Document was deleted. Dispatching this event also consumes all
    /// webhooks of the document.
    Delete,
}

impl WebhookEvent {
    /// The lowercase wire name of the event.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// All known events, for subscription validation.
    #[must_use]
    pub fn all() -> [Self; 2] {
        [Self::Update, Self::Delete]
    }

    /// Parse a lowercase wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl std::fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// API bodies
// ---------------------------------------------------------------------------

/// Body of `POST /documents/{document_id}/webhook`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateWebhookRequest {
    /// Endpoint to deliver events to.
    pub url: String,
    /// Per-subscription secret the subscriber will use to verify deliveries.
    pub secret: String,
    /// Event names to subscribe to.
    pub events: Vec<String>,
}

/// Body of `PATCH /documents/{document_id}/webhook/{webhook_id}`.
///
/// Absent (or empty) fields are left unchanged; at least one must be
/// provided.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateWebhookRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub events: Option<Vec<String>>,
}

/// A webhook subscription as returned to its authenticated caller.
///
/// The secret is included: the caller either just chose it (create/update)
/// or proved possession of it (get).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WebhookResponse {
    pub id: Uuid,
    pub document_key: String,
    pub url: String,
    pub secret: String,
    pub events: Vec<String>,
}

// ---------------------------------------------------------------------------
// Outbound wire format
// ---------------------------------------------------------------------------

/// Snapshot of a document at dispatch time. Ephemeral: built per dispatch
/// and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookDocument {
    /// Document key.
    pub key: String,
    /// Document version the event refers to.
    pub version: i64,
    /// Files of that version.
    pub files: Vec<WebhookDocumentFile>,
}

/// One file of a document snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookDocumentFile {
    pub name: String,
    pub content: String,
    pub language: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// JSON body POSTed to a subscriber.
///
/// `created_at` is fixed once at dispatch start and is identical across
/// all attempts and all subscribers of one dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub webhook_id: Uuid,
    pub event: WebhookEvent,
    pub created_at: DateTime<Utc>,
    pub document: WebhookDocument,
}
