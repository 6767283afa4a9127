//! Broadcast orchestration.
//!
//! Builds one FCM message per target token, launches every send
//! concurrently, and joins them with settle-all semantics: each outcome is
//! independent, a hung or failed send never aborts or delays its siblings.
//! Tokens the API reports as permanently invalid are removed from the
//! registry as a side effect (the self-healing prune step).

use chrono::Utc;
use futures::future::join_all;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::client::{FcmMessage, Message, Notification, WebpushConfig, WebpushNotification};
use crate::registry::TokenRegistry;
use crate::service::PushSender;

/// Click-through target when the caller's data payload has no `url`.
pub const DEFAULT_CLICK_URL: &str = "/";

/// Icon and badge shown by the browser notification.
pub const NOTIFICATION_ICON: &str = "/icons/icon-192.png";

/// Endpoint-level failures of a broadcast request.
///
/// These are states the caller is expected to branch on: a gateway without
/// credentials and an empty registry are normal conditions with their own
/// responses, not internal errors.
#[derive(Error, Debug)]
pub enum BroadcastError {
    /// Required request fields are missing or empty
    #[error("missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<String> },

    /// The push gateway has no resolved credential
    #[error("push gateway is not configured")]
    GatewayUnavailable,

    /// No tokens to send to (expected idle state)
    #[error("no devices registered")]
    NoRecipients,

    /// Anything unexpected; surfaced as a 5xx at the endpoint boundary
    #[error("internal error: {0}")]
    Internal(String),
}

/// The notification content of one broadcast request.
#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

/// One failed delivery attempt.
#[derive(Debug, Clone)]
pub struct DeliveryFailure {
    /// The target token
    pub token: String,
    /// Classified failure code (e.g. `UNREGISTERED`, `TIMEOUT`)
    pub code: String,
    /// Whether the failure pruned the token
    pub invalid: bool,
}

/// Tally of one broadcast.
#[derive(Debug, Default)]
pub struct BroadcastSummary {
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
    pub invalid_removed: usize,
    pub failures: Vec<DeliveryFailure>,
}

/// Merge the caller's data payload with the default click URL and a
/// millisecond send timestamp.
pub fn prepare_data(data: &HashMap<String, String>) -> HashMap<String, String> {
    let mut merged = data.clone();
    merged
        .entry("url".to_string())
        .or_insert_with(|| DEFAULT_CLICK_URL.to_string());
    merged.insert(
        "timestamp".to_string(),
        Utc::now().timestamp_millis().to_string(),
    );
    merged
}

/// Build the per-token FCM message for a broadcast.
pub fn build_message(
    token: &str,
    message: &BroadcastMessage,
    data: &HashMap<String, String>,
) -> FcmMessage {
    FcmMessage {
        message: Message {
            token: token.to_string(),
            notification: Some(Notification {
                title: message.title.clone(),
                body: message.body.clone(),
            }),
            data: Some(data.clone()),
            webpush: Some(WebpushConfig {
                notification: Some(WebpushNotification {
                    icon: Some(NOTIFICATION_ICON.to_string()),
                    badge: Some(NOTIFICATION_ICON.to_string()),
                    require_interaction: Some(false),
                }),
            }),
        },
    }
}

/// Deliver `message` to every token in `tokens`.
///
/// All sends run concurrently and every outcome is collected; a failure on
/// one token never aborts the others. Tokens whose failure is classified as
/// invalid are removed from `registry`; all other failures leave the token
/// in place.
///
/// # Errors
///
/// Returns [`BroadcastError::NoRecipients`] when `tokens` is empty, without
/// invoking the sender.
pub async fn broadcast(
    sender: &dyn PushSender,
    registry: &TokenRegistry,
    message: &BroadcastMessage,
    tokens: Vec<String>,
) -> Result<BroadcastSummary, BroadcastError> {
    if tokens.is_empty() {
        return Err(BroadcastError::NoRecipients);
    }

    info!("Sending notification to {} device(s)", tokens.len());

    let data = prepare_data(&message.data);
    let sends = tokens
        .iter()
        .map(|token| sender.send(build_message(token, message, &data)));
    let results = join_all(sends).await;

    let mut summary = BroadcastSummary {
        total: tokens.len(),
        ..Default::default()
    };

    for (token, result) in tokens.iter().zip(results) {
        match result {
            Ok(delivery_id) => {
                summary.sent += 1;
                debug!("Delivered to {}: {}", token_preview(token), delivery_id);
            }
            Err(err) => {
                summary.failed += 1;
                let invalid = err.is_invalid_token();
                error!("Failed to send to {}: {}", token_preview(token), err);
                if invalid {
                    registry.remove(token);
                    summary.invalid_removed += 1;
                }
                summary.failures.push(DeliveryFailure {
                    token: token.clone(),
                    code: err.code(),
                    invalid,
                });
            }
        }
    }

    if summary.invalid_removed > 0 {
        info!("Removed {} invalid token(s)", summary.invalid_removed);
    }
    info!(
        "Notifications sent: {} succeeded, {} failed",
        summary.sent, summary.failed
    );

    Ok(summary)
}

/// Tokens are long and sensitive enough to keep out of logs in full.
fn token_preview(token: &str) -> String {
    match token.get(..20) {
        Some(prefix) => format!("{}...", prefix),
        None => token.to_string(),
    }
}
