//! Webhook subscription entity model.
//!
//! A webhook belongs to exactly one document and is authenticated by its
//! own per-subscription secret, not by the document's share tokens. All
//! read/update/delete queries match on the full (document, id, secret)
//! triple in the WHERE clause, so a wrong secret is indistinguishable from
//! a missing row.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE webhooks (
//!     id          UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     document_id TEXT NOT NULL,
//!     url         TEXT NOT NULL,
//!     secret      TEXT NOT NULL,
//!     events      TEXT[] NOT NULL,
//!     created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! CREATE INDEX webhooks_document_id_idx ON webhooks (document_id);
//! ```

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

/// A webhook subscription record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Webhook {
    /// Server-generated opaque identifier. Immutable.
    pub id: Uuid,

    /// Key of the owning document. Immutable.
    pub document_id: String,

    /// Endpoint to deliver events to.
    pub url: String,

    /// Per-subscription bearer credential. Sent back to the subscriber on
    /// delivery (`Authorization: Secret <secret>`) so it can verify
    /// authenticity; returned over the API only to the authenticated caller.
    pub secret: String,

    /// Event names this subscription wants ("update", "delete").
    pub events: Vec<String>,

    /// When the subscription was created.
    pub created_at: DateTime<Utc>,

    /// When the subscription was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new webhook subscription.
#[derive(Debug, Clone)]
pub struct CreateWebhook {
    pub document_id: String,
    pub url: String,
    pub secret: String,
    pub events: Vec<String>,
}

/// Partial update for a webhook subscription. `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateWebhook {
    pub url: Option<String>,
    pub secret: Option<String>,
    pub events: Option<Vec<String>>,
}

impl Webhook {
    /// Whether this subscription wants the given event name.
    #[must_use]
    pub fn subscribes_to(&self, event: &str) -> bool {
        self.events.iter().any(|e| e == event)
    }

    /// Insert a new webhook subscription.
    pub async fn create<'e, E>(executor: E, input: CreateWebhook) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            "INSERT INTO webhooks (document_id, url, secret, events)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(input.document_id)
        .bind(input.url)
        .bind(input.secret)
        .bind(input.events)
        .fetch_one(executor)
        .await
    }

    /// Find a webhook by the (document, id, secret) triple.
    ///
    /// The secret is an authentication credential, not a lookup key: it is
    /// bound into the WHERE clause so matching happens inside the database
    /// and a mismatch returns the same `None` as a nonexistent id.
    pub async fn find<'e, E>(
        executor: E,
        document_id: &str,
        webhook_id: Uuid,
        secret: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            "SELECT * FROM webhooks
             WHERE document_id = $1 AND id = $2 AND secret = $3",
        )
        .bind(document_id)
        .bind(webhook_id)
        .bind(secret)
        .fetch_optional(executor)
        .await
    }

    /// Partially update a webhook matched by the (document, id, secret)
    /// triple. Returns `None` when the triple matches nothing.
    pub async fn update<'e, E>(
        executor: E,
        document_id: &str,
        webhook_id: Uuid,
        secret: &str,
        input: UpdateWebhook,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as(
            "UPDATE webhooks
             SET url        = COALESCE($4, url),
                 secret     = COALESCE($5, secret),
                 events     = COALESCE($6, events),
                 updated_at = now()
             WHERE document_id = $1 AND id = $2 AND secret = $3
             RETURNING *",
        )
        .bind(document_id)
        .bind(webhook_id)
        .bind(secret)
        .bind(input.url)
        .bind(input.secret)
        .bind(input.events)
        .fetch_optional(executor)
        .await
    }

    /// Delete a webhook matched by the (document, id, secret) triple.
    /// Returns whether a row was removed; a repeated delete reports `false`.
    pub async fn delete<'e, E>(
        executor: E,
        document_id: &str,
        webhook_id: Uuid,
        secret: &str,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "DELETE FROM webhooks
             WHERE document_id = $1 AND id = $2 AND secret = $3",
        )
        .bind(document_id)
        .bind(webhook_id)
        .bind(secret)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All webhooks for a document. Used by the dispatcher for update
    /// events.
    pub async fn find_by_document<'e, E>(
        executor: E,
        document_id: &str,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM webhooks WHERE document_id = $1")
            .bind(document_id)
            .fetch_all(executor)
            .await
    }

    /// Atomically return and remove all webhooks for a document.
    ///
    /// Used by the dispatcher for delete events: the single
    /// `DELETE ... RETURNING` statement guarantees no subscription outlives
    /// its document and that a subscription removed concurrently through
    /// the same path is returned to exactly one caller.
    pub async fn delete_by_document<'e, E>(
        executor: E,
        document_id: &str,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as("DELETE FROM webhooks WHERE document_id = $1 RETURNING *")
            .bind(document_id)
            .fetch_all(executor)
            .await
    }
}


// Queries against a live Postgres are exercised by the `integration`
// feature suites in docbin-webhooks.
