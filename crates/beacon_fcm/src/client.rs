//! Firebase Cloud Messaging client module
//!
//! This module provides a client for the Firebase Cloud Messaging (FCM)
//! HTTP v1 API. It includes the data structures for FCM messages and the
//! error classification the broadcast logic relies on: failures the API
//! reports for a dead registration token are distinguished from every other
//! failure class, because only the former removes the token from the
//! registry.

use crate::auth::{get_fcm_auth_token, resolve_service_account};
use beacon_common::http::client::{create_client, DEFAULT_TIMEOUT_SECS};
use beacon_config::FcmConfig;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use yup_oauth2::ServiceAccountKey;

/// FCM v1 error codes that mark a registration token as permanently invalid.
///
/// `UNREGISTERED` is the API's report for an expired or unsubscribed token,
/// `NOT_FOUND` for a deleted app instance, and `INVALID_ARGUMENT` for a
/// malformed token. All three correspond to the legacy
/// `messaging/invalid-registration-token` /
/// `messaging/registration-token-not-registered` pair.
const INVALID_TOKEN_CODES: &[&str] = &["UNREGISTERED", "NOT_FOUND", "INVALID_ARGUMENT"];

/// Errors that can occur when interacting with the Firebase Cloud Messaging API
#[derive(Error, Debug)]
pub enum FcmError {
    /// Error during authentication with Firebase
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to Firebase API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error returned by the Firebase API
    #[error("Firebase API error ({code}): {message}")]
    ApiError { code: String, message: String },
}

impl FcmError {
    /// Whether this failure marks the target token as permanently invalid.
    ///
    /// Only failures in this class may prune the token from the registry;
    /// everything else (auth, quota, transport, unknown) may be transient
    /// and leaves the token registered.
    pub fn is_invalid_token(&self) -> bool {
        match self {
            FcmError::ApiError { code, .. } => INVALID_TOKEN_CODES.contains(&code.as_str()),
            _ => false,
        }
    }

    /// Short machine-readable code for reporting per-token failures.
    pub fn code(&self) -> String {
        match self {
            FcmError::AuthError(_) => "AUTH".to_string(),
            FcmError::RequestError(err) if err.is_timeout() => "TIMEOUT".to_string(),
            FcmError::RequestError(_) => "TRANSPORT".to_string(),
            FcmError::ConfigError(_) => "CONFIG".to_string(),
            FcmError::ApiError { code, .. } => code.clone(),
        }
    }
}

/// A message to be sent via Firebase Cloud Messaging
///
/// This is the top-level structure that wraps a Message object
/// according to the FCM HTTP v1 API format.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FcmMessage {
    /// The message payload
    pub message: Message,
}

/// The message payload for Firebase Cloud Messaging
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Message {
    /// Registration token of the target device
    pub token: String,

    /// The notification to be displayed on the user's device
    pub notification: Option<Notification>,

    /// Custom key-value data to be sent with the message
    ///
    /// This data will be available to the client app that receives the message.
    pub data: Option<std::collections::HashMap<String, String>>,

    /// Web-push display hints for browser targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webpush: Option<WebpushConfig>,
}

/// The notification to be displayed on the user's device
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Notification {
    /// The title of the notification
    pub title: String,

    /// The body text of the notification
    pub body: String,
}

/// Web-push specific options carried in the FCM message
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WebpushConfig {
    /// Display hints passed through to the browser Notification API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<WebpushNotification>,
}

/// Browser Notification API fields (serialized camelCase per the Web API)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WebpushNotification {
    /// Icon shown in the notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Badge shown on platforms that support it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,

    /// Whether the notification stays until the user interacts with it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_interaction: Option<bool>,
}

/// Response from the Firebase Cloud Messaging API
///
/// This structure contains the response from the FCM API
/// after a successful message send.
#[derive(Debug, Deserialize)]
pub struct FcmResponse {
    /// The unique ID of the message
    ///
    /// This is a string in the format "projects/{project_id}/messages/{message_id}"
    pub name: String,
}

/// Error envelope returned by the FCM v1 API
#[derive(Debug, Deserialize)]
struct FcmErrorResponse {
    error: FcmErrorBody,
}

#[derive(Debug, Deserialize)]
struct FcmErrorBody {
    message: Option<String>,
    status: Option<String>,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

/// Client for interacting with the Firebase Cloud Messaging API
///
/// Holds the service account credential resolved once at construction and a
/// reqwest client with a per-request timeout, so a hung send cannot block a
/// broadcast indefinitely.
pub struct FcmClient {
    /// HTTP client for making requests to the FCM API
    client: Client,

    /// Service account credential, resolved once per process
    sa_key: ServiceAccountKey,

    /// The Firebase project the messages are sent through
    project_id: String,
}

impl FcmClient {
    /// Resolves credentials and creates a Firebase client.
    ///
    /// # Arguments
    ///
    /// * `config` - The FCM configuration (project id and optional key path)
    ///
    /// # Returns
    ///
    /// * `Result<FcmClient, FcmError>` - The connected client, or
    ///   `FcmError::ConfigError` when no credential source resolves. The
    ///   caller decides what "unavailable" means; this constructor never
    ///   panics on a missing credential.
    pub async fn connect(config: &FcmConfig) -> Result<Self, FcmError> {
        let sa_key = resolve_service_account(config).await?;

        let project_id = config
            .project_id
            .clone()
            .or_else(|| sa_key.project_id.clone())
            .ok_or_else(|| {
                FcmError::ConfigError(
                    "missing project_id in FcmConfig and service account key".to_string(),
                )
            })?;

        let client = create_client(DEFAULT_TIMEOUT_SECS, true)?;

        Ok(Self {
            client,
            sa_key,
            project_id,
        })
    }

    /// The Firebase project this client sends through.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Sends a single push notification message via Firebase Cloud Messaging
    ///
    /// # Arguments
    ///
    /// * `message` - The message to send, including target token, notification content, and data
    ///
    /// # Returns
    ///
    /// * `Result<String, FcmError>` - On success, returns the message ID as a String.
    ///   On failure, returns a FcmError classified per the FCM v1 error code.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// * Authentication fails
    /// * The HTTP request fails or times out
    /// * The FCM API returns an error response
    pub async fn send_message(&self, message: FcmMessage) -> Result<String, FcmError> {
        let url = format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            self.project_id
        );

        let token = get_fcm_auth_token(self.sa_key.clone())
            .await
            .map_err(|e| FcmError::AuthError(e.to_string()))?;

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(classify_api_error(status, &error_text));
        }

        let fcm_response: FcmResponse = response.json().await?;
        Ok(fcm_response.name)
    }
}

/// Turns a non-success FCM response into a classified `FcmError::ApiError`.
///
/// The v1 API carries the interesting code in
/// `error.details[].errorCode` (e.g. `UNREGISTERED`); `error.status` is the
/// generic google.rpc code used as a fallback.
fn classify_api_error(status: StatusCode, body: &str) -> FcmError {
    let parsed: Option<FcmErrorResponse> = serde_json::from_str(body).ok();

    let (code, message) = match parsed {
        Some(FcmErrorResponse { error }) => {
            let detail_code = error
                .details
                .iter()
                .filter_map(|detail| detail.get("errorCode").and_then(|code| code.as_str()))
                .next()
                .map(str::to_string);
            let code = detail_code
                .or(error.status)
                .unwrap_or_else(|| status.as_u16().to_string());
            let message = error
                .message
                .unwrap_or_else(|| "unknown FCM error".to_string());
            (code, message)
        }
        None => (status.as_u16().to_string(), body.to_string()),
    };

    FcmError::ApiError { code, message }
}
