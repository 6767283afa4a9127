//! HTTP handlers for the push-notification API
//!
//! This module provides the Axum handlers for registering device tokens and
//! broadcasting notifications, together with the request and response types
//! they serialize. Wire field names are camelCase to match the client
//! (`tokenCount`, `registeredDevices`, `invalidTokensRemoved`).
//!
//! Error responses distinguish caller mistakes (400 with the offending
//! fields), a gateway that simply has no credentials configured (503 with
//! remediation guidance), and genuine internal failures (500, no stack
//! traces on the wire).

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use beacon_common::{internal_error, IntoHttpResponse};

use crate::logic::{self, BroadcastError, BroadcastMessage, BroadcastSummary};
use crate::registry::TokenRegistry;
use crate::service::PushSender;

/// Shared state for the notification handlers
///
/// Holds the token registry and, when credentials resolved at startup, the
/// push gateway. A `None` gateway is a normal configuration state: send
/// endpoints answer 503 with remediation guidance instead of failing.
#[derive(Clone)]
pub struct NotificationState {
    /// Registry of device tokens, shared across requests
    pub registry: Arc<TokenRegistry>,

    /// The push gateway, absent when no credential source resolved
    pub sender: Option<Arc<dyn PushSender>>,
}

/// Request body for registering a device token
///
/// `token` is declared as a raw JSON value so a non-string token can be
/// rejected with the documented 400 body rather than a generic
/// deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterTokenRequest {
    /// The FCM registration token (must be a string)
    pub token: Option<Value>,

    /// Optional user ID to associate with the token
    pub user_id: Option<String>,

    /// Optional free-text device description
    pub device_info: Option<String>,
}

/// Response body for the register endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterTokenResponse {
    /// Whether the token was registered
    pub success: bool,

    /// Human-readable confirmation
    pub message: String,

    /// Number of registered tokens after this call
    pub token_count: usize,
}

/// Request body for broadcasting a notification to every device
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendNotificationRequest {
    /// The title of the notification
    pub title: Option<String>,

    /// The body text of the notification
    pub body: Option<String>,

    /// Custom key-value data to be sent with the message
    pub data: Option<HashMap<String, String>>,
}

/// Request body for sending a notification to one user's devices
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendToUserRequest {
    /// The user whose registered devices are targeted
    pub user_id: Option<String>,

    /// The title of the notification
    pub title: Option<String>,

    /// The body text of the notification
    pub body: Option<String>,

    /// Custom key-value data to be sent with the message
    pub data: Option<HashMap<String, String>>,
}

/// Per-broadcast counters returned to the caller
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendSummaryData {
    /// Deliveries accepted by FCM
    pub sent: usize,

    /// Deliveries that failed (any class)
    pub failed: usize,

    /// Tokens targeted by this broadcast
    pub total: usize,

    /// Tokens pruned because FCM reported them invalid
    pub invalid_tokens_removed: usize,

    /// When the broadcast completed (RFC 3339)
    pub timestamp: String,
}

/// Response body for the send endpoints
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendNotificationResponse {
    /// Whether the broadcast ran (individual sends may still have failed)
    pub success: bool,

    /// Human-readable summary
    pub message: String,

    /// The per-broadcast counters
    pub data: SendSummaryData,

    /// Present when some sends failed but the broadcast itself ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

/// Response body for the status endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NotificationStatusResponse {
    /// Always "ready"; the endpoint is a liveness probe
    pub status: String,

    /// Number of currently registered tokens
    pub registered_devices: usize,

    /// Human-readable hint
    pub message: String,
}

/// Handler for registering an FCM device token
///
/// # Request
///
/// The request must include a string `token`; `userId` and `deviceInfo` are
/// optional. Re-registering a token silently overwrites its record.
///
/// # Responses
///
/// - 200 OK: Token registered, body carries the updated token count
/// - 400 Bad Request: `token` missing or not a string (the registry is not touched)
#[axum::debug_handler]
pub async fn register_token_handler(
    State(state): State<Arc<NotificationState>>,
    Json(payload): Json<RegisterTokenRequest>,
) -> Response {
    let token = match payload.token.as_ref().and_then(Value::as_str) {
        Some(token) if !token.is_empty() => token,
        _ => {
            warn!("Rejected registration with missing or non-string token");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Token is required and must be a string" })),
            )
                .into_response();
        }
    };

    debug!(
        "Registering token for user: {}",
        payload.user_id.as_deref().unwrap_or("<anonymous>")
    );
    state
        .registry
        .store(token, payload.user_id.clone(), payload.device_info.clone());

    Json(RegisterTokenResponse {
        success: true,
        message: "Token registered successfully".to_string(),
        token_count: state.registry.count(),
    })
    .into_response()
}

/// Handler for broadcasting a notification to every registered device
///
/// # Responses
///
/// - 200 OK: Broadcast ran; body carries counters and optional warnings
/// - 400 Bad Request: Missing title/body, or no devices registered
/// - 503 Service Unavailable: Gateway credentials not configured
/// - 500 Internal Server Error: Unexpected failure
#[axum::debug_handler]
pub async fn send_notification_handler(
    State(state): State<Arc<NotificationState>>,
    Json(payload): Json<SendNotificationRequest>,
) -> Response {
    let sender = match state.sender.as_deref() {
        Some(sender) => sender,
        None => {
            error!("Push gateway not initialized");
            return broadcast_error_response(&BroadcastError::GatewayUnavailable);
        }
    };

    let (title, body) = match require_fields(payload.title, payload.body) {
        Ok(fields) => fields,
        Err(missing) => {
            error!("Validation error: missing {}", missing.join(", "));
            return broadcast_error_response(&BroadcastError::Validation { missing });
        }
    };

    let message = BroadcastMessage {
        title,
        body,
        data: payload.data.unwrap_or_default(),
    };

    let tokens = state.registry.all();
    match logic::broadcast(sender, &state.registry, &message, tokens).await {
        Ok(summary) => send_response(summary),
        Err(err) => broadcast_error_response(&err),
    }
}

/// Handler for sending a notification to all devices registered for a user
///
/// Same semantics as the broadcast endpoint, fanned out over the tokens
/// registered with the given `userId` only.
#[axum::debug_handler]
pub async fn send_to_user_handler(
    State(state): State<Arc<NotificationState>>,
    Json(payload): Json<SendToUserRequest>,
) -> Response {
    let sender = match state.sender.as_deref() {
        Some(sender) => sender,
        None => {
            error!("Push gateway not initialized");
            return broadcast_error_response(&BroadcastError::GatewayUnavailable);
        }
    };

    let user_id = match payload.user_id.as_deref().filter(|id| !id.is_empty()) {
        Some(user_id) => user_id.to_string(),
        None => {
            return broadcast_error_response(&BroadcastError::Validation {
                missing: vec!["userId".to_string()],
            });
        }
    };

    let (title, body) = match require_fields(payload.title, payload.body) {
        Ok(fields) => fields,
        Err(missing) => {
            error!("Validation error: missing {}", missing.join(", "));
            return broadcast_error_response(&BroadcastError::Validation { missing });
        }
    };

    let message = BroadcastMessage {
        title,
        body,
        data: payload.data.unwrap_or_default(),
    };

    debug!("Sending notification to all devices for user: {}", user_id);
    let tokens = state.registry.tokens_for_user(&user_id);
    match logic::broadcast(sender, &state.registry, &message, tokens).await {
        Ok(summary) => {
            info!(
                "Sent notifications to {} device(s) for user: {}",
                summary.sent, user_id
            );
            send_response(summary)
        }
        Err(err) => broadcast_error_response(&err),
    }
}

/// Handler for the status endpoint
///
/// Read-only liveness query: reports the registered-device count without
/// touching the gateway.
#[axum::debug_handler]
pub async fn notification_status_handler(
    State(state): State<Arc<NotificationState>>,
) -> Json<NotificationStatusResponse> {
    let count = state.registry.count();

    Json(NotificationStatusResponse {
        status: "ready".to_string(),
        registered_devices: count,
        message: if count > 0 {
            format!(
                "{} device(s) registered and ready to receive notifications",
                count
            )
        } else {
            "No devices registered yet. Users need to enable notifications first.".to_string()
        },
    })
}

/// Validate that title and body are present and non-empty.
///
/// Returns the owned field values, or the list of missing field names for
/// the 400 response.
fn require_fields(
    title: Option<String>,
    body: Option<String>,
) -> Result<(String, String), Vec<String>> {
    let title = title.filter(|value| !value.is_empty());
    let body = body.filter(|value| !value.is_empty());

    match (title, body) {
        (Some(title), Some(body)) => Ok((title, body)),
        (title, body) => {
            let mut missing = Vec::new();
            if title.is_none() {
                missing.push("title".to_string());
            }
            if body.is_none() {
                missing.push("body".to_string());
            }
            Err(missing)
        }
    }
}

/// 200 response for a completed broadcast.
fn send_response(summary: BroadcastSummary) -> Response {
    let warnings = (summary.failed > 0)
        .then(|| vec![format!("{} notification(s) failed to send", summary.failed)]);

    Json(SendNotificationResponse {
        success: true,
        message: if summary.sent > 0 {
            format!("Successfully sent {} notification(s)", summary.sent)
        } else {
            "No notifications were sent successfully".to_string()
        },
        data: SendSummaryData {
            sent: summary.sent,
            failed: summary.failed,
            total: summary.total,
            invalid_tokens_removed: summary.invalid_removed,
            timestamp: Utc::now().to_rfc3339(),
        },
        warnings,
    })
    .into_response()
}

/// Map a [`BroadcastError`] to its documented wire shape.
fn broadcast_error_response(err: &BroadcastError) -> Response {
    match err {
        BroadcastError::GatewayUnavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "Push gateway not initialized",
                "message": "Backend push notifications require Firebase service account configuration.",
                "details": "Browser notifications still work locally. To enable backend push notifications, configure a Firebase service account.",
                "documentation": "Set FCM_SERVICE_ACCOUNT_JSON, configure fcm.key_path, or place serviceAccountKey.json in the working directory.",
            })),
        )
            .into_response(),
        BroadcastError::Validation { missing } => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Validation error",
                "message": format!("Missing required field(s): {}", missing.join(", ")),
                "missingFields": missing,
            })),
        )
            .into_response(),
        BroadcastError::NoRecipients => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "No devices registered",
                "message": "No FCM tokens found. Make sure users have enabled notifications.",
                "data": { "tokenCount": 0 },
            })),
        )
            .into_response(),
        BroadcastError::Internal(message) => {
            error!("Error sending notifications: {}", message);
            internal_error("Failed to send notifications").into_http_response()
        }
    }
}
