//! Decoded share-token claims.
//!
//! The routing layer verifies the inbound share token and attaches the
//! decoded [`Claims`] to the request (as an axum `Extension`). Handlers in
//! this workspace only ever see verified claims; token minting and
//! verification live outside this core.

use serde::{Deserialize, Serialize};

use crate::permissions::Permission;

/// Verified claims of a document share token.
///
/// A share token is scoped to a single document: `sub` is that document's
/// key. The permission set is immutable once issued; only the document's
/// owner may mint claims carrying [`Permission::SHARE`] or
/// [`Permission::WEBHOOK`].
///
/// Webhook subscriptions are *not* authenticated by these claims beyond
/// creation: read/update/delete of a subscription present the per-webhook
/// secret instead, a disjoint credential type that must never share a
/// validation path with share tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Key of the document this token grants access to.
    pub sub: String,

    /// Capability grants for the document.
    pub permissions: Permission,
}

impl Claims {
    /// Create claims for a document key with the given permission set.
    #[must_use]
    pub fn new(document_key: impl Into<String>, permissions: Permission) -> Self {
        Self {
            sub: document_key.into(),
            permissions,
        }
    }

    /// Owner claims: all permissions for the document.
    #[must_use]
    pub fn owner(document_key: impl Into<String>) -> Self {
        Self::new(document_key, Permission::ALL)
    }
}
