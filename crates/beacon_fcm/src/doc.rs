#![allow(dead_code)]
use utoipa::OpenApi;

use crate::client::{FcmMessage, Message, Notification, WebpushConfig, WebpushNotification};
use crate::handlers::{
    NotificationStatusResponse, RegisterTokenRequest, RegisterTokenResponse,
    SendNotificationRequest, SendNotificationResponse, SendSummaryData, SendToUserRequest,
};

#[utoipa::path(
    post,
    path = "/notifications/register",
    request_body(content = RegisterTokenRequest, example = json!({
        "token": "fcm-registration-token-example",
        "userId": "user123",
        "deviceInfo": "Mozilla/5.0 (Linux; Android 14)"
    })),
    responses(
        (status = 200, description = "Token registered successfully", body = RegisterTokenResponse,
         example = json!({
             "success": true,
             "message": "Token registered successfully",
             "tokenCount": 1
         })
        ),
        (status = 400, description = "Token missing or not a string",
         example = json!({
             "error": "Token is required and must be a string"
         })
        )
    ),
    tag = "Notifications"
)]
fn doc_register_token_handler() {}

#[utoipa::path(
    post,
    path = "/notifications/send",
    request_body(content = SendNotificationRequest, example = json!({
        "title": "New Match",
        "body": "Someone liked your profile",
        "data": {
            "url": "/matches"
        }
    })),
    responses(
        (status = 200, description = "Broadcast completed", body = SendNotificationResponse,
         example = json!({
             "success": true,
             "message": "Successfully sent 3 notification(s)",
             "data": {
                 "sent": 3,
                 "failed": 1,
                 "total": 4,
                 "invalidTokensRemoved": 1,
                 "timestamp": "2025-01-01T12:00:00Z"
             },
             "warnings": ["1 notification(s) failed to send"]
         })
        ),
        (status = 400, description = "Validation error or no devices registered",
         example = json!({
             "success": false,
             "error": "Validation error",
             "message": "Missing required field(s): title",
             "missingFields": ["title"]
         })
        ),
        (status = 503, description = "Push gateway credentials not configured",
         example = json!({
             "success": false,
             "error": "Push gateway not initialized",
             "message": "Backend push notifications require Firebase service account configuration."
         })
        ),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Notifications"
)]
fn doc_send_notification_handler() {}

#[utoipa::path(
    post,
    path = "/notifications/send-to-user",
    request_body(content = SendToUserRequest, example = json!({
        "userId": "user123",
        "title": "New Message",
        "body": "You have received a new message"
    })),
    responses(
        (status = 200, description = "Notifications sent to the user's devices", body = SendNotificationResponse),
        (status = 400, description = "Validation error or no devices registered for the user"),
        (status = 503, description = "Push gateway credentials not configured"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Notifications"
)]
fn doc_send_to_user_handler() {}

#[utoipa::path(
    get,
    path = "/notifications/send",
    responses(
        (status = 200, description = "Gateway status", body = NotificationStatusResponse,
         example = json!({
             "status": "ready",
             "registeredDevices": 2,
             "message": "2 device(s) registered and ready to receive notifications"
         })
        )
    ),
    tag = "Notifications"
)]
fn doc_notification_status_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_register_token_handler,
        doc_send_notification_handler,
        doc_send_to_user_handler,
        doc_notification_status_handler,
    ),
    components(
        schemas(
            RegisterTokenRequest,
            RegisterTokenResponse,
            SendNotificationRequest,
            SendToUserRequest,
            SendNotificationResponse,
            SendSummaryData,
            NotificationStatusResponse,
            FcmMessage,
            Message,
            Notification,
            WebpushConfig,
            WebpushNotification,
        )
    ),
    tags(
        (name = "Notifications", description = "Push notification API")
    ),
    servers(
        (url = "/api", description = "Push notification API server")
    )
)]
pub struct FcmApiDoc;
