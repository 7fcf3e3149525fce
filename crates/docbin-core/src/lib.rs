//! docbin Core Library
//!
//! Shared value types for docbin.
//!
//! # Modules
//!
//! - [`permissions`] - Capability flag set attached to share tokens
//! - [`claims`] - Decoded share-token claims
//! - [`error`] - Standardized error taxonomy (`DocbinError`)
//!
//! # Example
//!
//! ```
//! use docbin_core::{Claims, Permission};
//!
//! let claims = Claims::new("hocwr6i6", Permission::WRITE | Permission::WEBHOOK);
//! assert!(claims.permissions.has(Permission::WEBHOOK));
//! assert!(claims.permissions.misses(Permission::DELETE));
//! ```

pub mod claims;
pub mod error;
pub mod permissions;

// Re-export main types for convenient access
pub use claims::Claims;
pub use error::{DocbinError, Result};
pub use permissions::Permission;
