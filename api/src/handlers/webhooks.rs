//! Webhook handlers
//!
//! Handlers for GitHub webhooks. Push and pull_request deliveries are
//! normalized into stored events; everything else is acknowledged and
//! dropped.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::Sha256;

use crate::domain::entities::NewEvent;
use crate::error::AppError;
use crate::AppState;

/// GitHub webhook payload (the fields shared by push and pull_request events)
#[derive(Debug, Deserialize)]
pub struct GithubWebhookPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(rename = "ref")]
    #[serde(default)]
    pub ref_field: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub pusher: Option<Pusher>,
    #[serde(default)]
    pub pull_request: Option<PullRequest>,
    #[serde(default)]
    pub repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
pub struct Pusher {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Repository {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub id: i64,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub user: Option<PullRequestUser>,
    #[serde(default)]
    pub head: Option<BranchRef>,
    #[serde(default)]
    pub base: Option<BranchRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
}

/// Verify HMAC-SHA256 signature
fn verify_signature(payload: &[u8], signature: Option<&str>, secret: &Option<String>) -> bool {
    let Some(secret) = secret else {
        // No secret configured, skip verification (development mode)
        tracing::warn!("Webhook secret not configured, skipping signature verification");
        return true;
    };

    let Some(sig_header) = signature else {
        tracing::warn!("No signature provided in webhook request");
        return false;
    };

    // GitHub sends the signature as "sha256=<hex>"
    let expected_hex = sig_header.strip_prefix("sha256=").unwrap_or(sig_header);

    type HmacSha256 = Hmac<Sha256>;
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => {
            tracing::error!("Invalid webhook secret key");
            return false;
        }
    };

    mac.update(payload);

    let expected_bytes = match hex::decode(expected_hex) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Invalid signature format");
            return false;
        }
    };

    mac.verify_slice(&expected_bytes).is_ok()
}

/// Branch name from a git ref like "refs/heads/main"
fn branch_name(git_ref: &str) -> &str {
    git_ref.rsplit('/').next().unwrap_or(git_ref)
}

/// Map a webhook delivery to a stored event, if it is one we keep
///
/// Pushes are timestamped on arrival; pull request events carry their
/// own instants and are dropped when GitHub omits them.
fn normalize_event(event_type: &str, payload: &GithubWebhookPayload) -> Option<NewEvent> {
    match event_type {
        "push" => {
            let request_id = payload.after.clone().unwrap_or_default();
            let author = payload
                .pusher
                .as_ref()
                .and_then(|p| p.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            let to_branch = payload
                .ref_field
                .as_deref()
                .map(|r| branch_name(r).to_string())
                .unwrap_or_default();

            Some(NewEvent::push(request_id, author, to_branch, Utc::now()))
        }
        "pull_request" => {
            let pr = payload.pull_request.as_ref()?;
            let action = payload.action.as_deref()?;
            let author = pr
                .user
                .as_ref()
                .map(|u| u.login.clone())
                .unwrap_or_else(|| "unknown".to_string());
            let from_branch = pr.head.as_ref()?.ref_name.clone();
            let to_branch = pr.base.as_ref()?.ref_name.clone();

            match action {
                "opened" => Some(NewEvent::pull_request(
                    pr.id.to_string(),
                    author,
                    from_branch,
                    to_branch,
                    pr.created_at?,
                )),
                "closed" if pr.merged => Some(NewEvent::merge(
                    pr.id.to_string(),
                    author,
                    from_branch,
                    to_branch,
                    pr.merged_at?,
                )),
                _ => None,
            }
        }
        _ => None,
    }
}

/// POST /webhooks/github
///
/// Handle GitHub webhook deliveries.
pub async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    // Verify signature
    let signature = headers
        .get("X-Hub-Signature-256")
        .and_then(|h| h.to_str().ok());

    if !verify_signature(&body, signature, &state.config.webhook_secret) {
        tracing::warn!("Webhook signature verification failed");
        return Err(AppError::Unauthorized);
    }

    // Parse JSON payload
    let payload: GithubWebhookPayload = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse webhook payload");
        AppError::BadRequest(format!("Invalid JSON: {}", e))
    })?;

    // Get event type from header
    let event_type = headers
        .get("X-GitHub-Event")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown");

    tracing::info!(
        event_type = event_type,
        repo = ?payload.repository.as_ref().map(|r| &r.full_name),
        action = ?payload.action,
        "Received GitHub webhook"
    );

    match normalize_event(event_type, &payload) {
        Some(event) => {
            state.event_service.record(event).await?;
            Ok(Json(json!({ "status": "success" })))
        }
        None => {
            tracing::debug!(event_type = event_type, "Ignoring webhook delivery");
            Ok(Json(json!({ "status": "ignored" })))
        }
    }
}
