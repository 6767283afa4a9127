use axum::{
    routing::{get, post},
    Router,
};
use beacon_config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

use crate::client::FcmClient;
use crate::handlers::{
    notification_status_handler, register_token_handler, send_notification_handler,
    send_to_user_handler, NotificationState,
};
use crate::registry::TokenRegistry;
use crate::service::PushSender;

/// Create the notification routes for the API
///
/// Constructs the token registry and resolves the FCM gateway credentials
/// exactly once. When no credential source resolves, the routes still come
/// up: registration and status work, and the send endpoints answer 503
/// with remediation guidance.
///
/// # Arguments
///
/// * `config` - A reference to the application configuration, which includes FCM settings
///
/// # Returns
///
/// An Axum router with the notification API endpoints
pub async fn routes(config: Arc<AppConfig>) -> Router {
    let registry = Arc::new(TokenRegistry::new());

    let fcm_config = config.fcm.clone().unwrap_or_default();
    let sender: Option<Arc<dyn PushSender>> = match FcmClient::connect(&fcm_config).await {
        Ok(client) => {
            info!(
                "FCM gateway initialized for project: {}",
                client.project_id()
            );
            Some(Arc::new(client))
        }
        Err(err) => {
            warn!("FCM gateway unavailable: {}", err);
            None
        }
    };

    let state = Arc::new(NotificationState { registry, sender });

    Router::new()
        .route("/notifications/register", post(register_token_handler))
        .route(
            "/notifications/send",
            post(send_notification_handler).get(notification_status_handler),
        )
        .route("/notifications/send-to-user", post(send_to_user_handler))
        .with_state(state)
}
