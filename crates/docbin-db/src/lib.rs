//! docbin Database Library
//!
//! Postgres persistence models for docbin. Model structs derive
//! `sqlx::FromRow` and expose `PgExecutor`-generic query methods so they
//! run against a pool, a connection, or a transaction alike.
//!
//! # Modules
//!
//! - [`models`] - Entity models and their queries

pub mod models;

pub use models::webhook::{CreateWebhook, UpdateWebhook, Webhook};
