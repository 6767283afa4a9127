//! Authentication module for Firebase Cloud Messaging
//!
//! This module resolves the Firebase service account credential and produces
//! OAuth2 access tokens for the Firebase Cloud Messaging HTTP v1 API.
//!
//! The credential is resolved once per process, from (in priority order):
//! an inline JSON blob in the `FCM_SERVICE_ACCOUNT_JSON` environment
//! variable, the `fcm.key_path` configuration value, then a default
//! `serviceAccountKey.json` in the working directory. A missing credential
//! is a normal configuration state, reported as an error value the caller
//! can branch on, never a panic.

use beacon_config::FcmConfig;
use std::{env, error::Error, path::Path};
use yup_oauth2::{
    parse_service_account_key, read_service_account_key, ServiceAccountAuthenticator,
    ServiceAccountKey,
};

use crate::client::FcmError;

/// Environment variable holding the service account JSON inline
pub const SERVICE_ACCOUNT_ENV: &str = "FCM_SERVICE_ACCOUNT_JSON";

/// Fallback key file, relative to the working directory
pub const DEFAULT_KEY_PATH: &str = "serviceAccountKey.json";

/// Resolves the Firebase service account key.
///
/// # Arguments
///
/// * `config` - The FCM configuration, which may carry a key file path
///
/// # Returns
///
/// * `Result<ServiceAccountKey, FcmError>` - The parsed service account key,
///   or `FcmError::ConfigError` when no credential source resolves. Callers
///   must treat that error as "gateway unavailable", not as a crash.
pub async fn resolve_service_account(config: &FcmConfig) -> Result<ServiceAccountKey, FcmError> {
    if let Ok(inline) = env::var(SERVICE_ACCOUNT_ENV) {
        if !inline.trim().is_empty() {
            return parse_service_account_key(inline.as_bytes()).map_err(|err| {
                FcmError::ConfigError(format!("invalid {}: {}", SERVICE_ACCOUNT_ENV, err))
            });
        }
    }

    if let Some(key_path) = config.key_path.as_deref() {
        return read_service_account_key(Path::new(key_path))
            .await
            .map_err(|err| {
                FcmError::ConfigError(format!("failed to read key file {}: {}", key_path, err))
            });
    }

    if Path::new(DEFAULT_KEY_PATH).exists() {
        return read_service_account_key(Path::new(DEFAULT_KEY_PATH))
            .await
            .map_err(|err| {
                FcmError::ConfigError(format!(
                    "failed to read key file {}: {}",
                    DEFAULT_KEY_PATH, err
                ))
            });
    }

    Err(FcmError::ConfigError(format!(
        "service account not found: set {}, configure fcm.key_path, or place {} in the working directory",
        SERVICE_ACCOUNT_ENV, DEFAULT_KEY_PATH
    )))
}

/// Obtains an OAuth2 access token for Firebase Cloud Messaging
///
/// # Arguments
///
/// * `sa_key` - The resolved service account key
///
/// # Returns
///
/// * `Result<String, Box<dyn Error + Send + Sync>>` - On success, returns the access token as a String.
///   On failure, returns a boxed error.
///
/// # Errors
///
/// This function will return an error if:
/// * Authentication with Google's OAuth2 service fails
/// * No token is returned from the authentication service
pub async fn get_fcm_auth_token(
    sa_key: ServiceAccountKey,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    // FCM requires the "https://www.googleapis.com/auth/firebase.messaging" scope
    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let auth_token = auth
        .token(&["https://www.googleapis.com/auth/firebase.messaging"])
        .await?;
    let fcm_result_token = match auth_token.token() {
        Some(token) => token,
        None => {
            return Err("No token available".into());
        }
    };

    Ok(fcm_result_token.to_string())
}
