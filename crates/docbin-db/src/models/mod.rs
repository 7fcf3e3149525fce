//! Entity models.

pub mod webhook;
