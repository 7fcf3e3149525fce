//! Error Types
//!
//! Standardized error taxonomy shared across docbin services.
//!
//! # Example
//!
//! ```
//! use docbin_core::{DocbinError, Result};
//!
//! fn find_document(key: &str) -> Result<String> {
//!     if key.is_empty() {
//!         return Err(DocbinError::NotFound {
//!             resource: "Document".to_string(),
//!             id: None,
//!         });
//!     }
//!     Ok(format!("Document {}", key))
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// Standardized error type for docbin.
///
/// Each variant maps to a common failure scenario and converts cleanly to
/// an HTTP status code at the routing layer:
///
/// - `BadRequest` - malformed or missing caller input (HTTP 400)
/// - `Forbidden` - permission check failed (HTTP 403)
/// - `NotFound` - no matching resource (HTTP 404)
/// - `Internal` - persistence or encoding failure (HTTP 500)
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocbinError {
    /// Malformed or missing caller input.
    #[error("Bad request: {message}")]
    BadRequest {
        /// Description of the invalid input.
        message: String,
    },

    /// The presented token lacks the required permission.
    #[error("Forbidden: missing {permission} permission")]
    Forbidden {
        /// Name of the missing permission.
        permission: String,
    },

    /// Requested resource was not found.
    #[error("{resource} not found{}", .id.as_ref().map(|i| format!(": {i}")).unwrap_or_default())]
    NotFound {
        /// The type of resource that was not found (e.g., "Webhook").
        resource: String,
        /// Optional identifier of the resource.
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// Persistence or encoding failure.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

/// Type alias for Results using `DocbinError`.
pub type Result<T> = std::result::Result<T, DocbinError>;
