//! Axum handlers for the webhook subscription endpoints.
//!
//! Create is authenticated by the share token's claims (injected by the
//! routing layer as an `Extension`); get/update/delete are authenticated by
//! the per-subscription secret carried in an `Authorization: Secret <secret>`
//! header.

use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use docbin_core::Claims;
use uuid::Uuid;

use crate::error::{ApiResult, WebhookApiError};
use crate::models::{CreateWebhookRequest, UpdateWebhookRequest, WebhookResponse};
use crate::router::WebhooksState;

/// Extract the webhook secret from the `Authorization: Secret <secret>`
/// header. The scheme is matched case-insensitively.
fn extract_webhook_secret(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, secret) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("secret") && !secret.is_empty() {
        Some(secret.to_string())
    } else {
        None
    }
}

/// Create a new webhook subscription for a document.
#[utoipa::path(
    post,
    path = "/documents/{document_id}/webhook",
    tag = "Webhooks",
    params(
        ("document_id" = String, Path, description = "Document key")
    ),
    request_body = CreateWebhookRequest,
    responses(
        (status = 201, description = "Webhook created", body = WebhookResponse),
        (status = 400, description = "Missing url, secret or events"),
        (status = 403, description = "Token lacks the webhook permission"),
    )
)]
pub async fn create_webhook_handler(
    State(state): State<WebhooksState>,
    Extension(claims): Extension<Claims>,
    Path(document_id): Path<String>,
    Json(request): Json<CreateWebhookRequest>,
) -> ApiResult<(StatusCode, Json<WebhookResponse>)> {
    let response = state
        .registry
        .create(&claims, &document_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Get a webhook subscription by presenting its secret.
#[utoipa::path(
    get,
    path = "/documents/{document_id}/webhook/{webhook_id}",
    tag = "Webhooks",
    params(
        ("document_id" = String, Path, description = "Document key"),
        ("webhook_id" = Uuid, Path, description = "Webhook ID")
    ),
    responses(
        (status = 200, description = "Webhook details", body = WebhookResponse),
        (status = 400, description = "Missing webhook secret"),
        (status = 404, description = "No webhook matches document, id and secret"),
    )
)]
pub async fn get_webhook_handler(
    State(state): State<WebhooksState>,
    Path((document_id, webhook_id)): Path<(String, Uuid)>,
    headers: HeaderMap,
) -> ApiResult<Json<WebhookResponse>> {
    let secret = extract_webhook_secret(&headers).ok_or(WebhookApiError::MissingSecret)?;

    let response = state.registry.get(&document_id, webhook_id, &secret).await?;

    Ok(Json(response))
}

/// Partially update a webhook subscription by presenting its secret.
#[utoipa::path(
    patch,
    path = "/documents/{document_id}/webhook/{webhook_id}",
    tag = "Webhooks",
    params(
        ("document_id" = String, Path, description = "Document key"),
        ("webhook_id" = Uuid, Path, description = "Webhook ID")
    ),
    request_body = UpdateWebhookRequest,
    responses(
        (status = 200, description = "Webhook updated", body = WebhookResponse),
        (status = 400, description = "Missing secret, or no field to update"),
        (status = 404, description = "No webhook matches document, id and secret"),
    )
)]
pub async fn update_webhook_handler(
    State(state): State<WebhooksState>,
    Path((document_id, webhook_id)): Path<(String, Uuid)>,
    headers: HeaderMap,
    Json(request): Json<UpdateWebhookRequest>,
) -> ApiResult<Json<WebhookResponse>> {
    let secret = extract_webhook_secret(&headers).ok_or(WebhookApiError::MissingSecret)?;

    let response = state
        .registry
        .update(&document_id, webhook_id, &secret, request)
        .await?;

    Ok(Json(response))
}

/// Delete a webhook subscription by presenting its secret.
#[utoipa::path(
    delete,
    path = "/documents/{document_id}/webhook/{webhook_id}",
    tag = "Webhooks",
    params(
        ("document_id" = String, Path, description = "Document key"),
        ("webhook_id" = Uuid, Path, description = "Webhook ID")
    ),
    responses(
        (status = 200, description = "Webhook deleted"),
        (status = 400, description = "Missing webhook secret"),
        (status = 404, description = "No webhook matches document, id and secret"),
    )
)]
pub async fn delete_webhook_handler(
    State(state): State<WebhooksState>,
    Path((document_id, webhook_id)): Path<(String, Uuid)>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let secret = extract_webhook_secret(&headers).ok_or(WebhookApiError::MissingSecret)?;

    state
        .registry
        .delete(&document_id, webhook_id, &secret)
        .await?;

    Ok(StatusCode::OK)
}
