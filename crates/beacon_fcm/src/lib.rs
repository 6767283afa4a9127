//! Firebase Cloud Messaging integration for Beacon
//!
//! This crate provides the push-notification backend for the Beacon PWA:
//! registering FCM device tokens in an in-memory registry, broadcasting a
//! notification to every registered device over the FCM HTTP v1 API, and
//! pruning tokens the API reports as permanently invalid.
//!
//! # Features
//!
//! - Service-account authentication against Firebase (inline env blob,
//!   configured key path, or a default on-disk key file)
//! - Concurrent per-token fan-out where one failed send never aborts the rest
//! - Self-healing registry: unregistered tokens are removed on delivery failure
//! - Integration with Axum for HTTP API endpoints
//! - OpenAPI/Swagger documentation (with the `openapi` feature)
//!
//! # API Endpoints
//!
//! - `POST /notifications/register` - Register a device token
//! - `POST /notifications/send` - Broadcast a notification to all devices
//! - `POST /notifications/send-to-user` - Send to one user's devices
//! - `GET /notifications/send` - Gateway status and registered-device count

pub mod auth;
pub mod client;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod models;
pub mod registry;
#[cfg(test)]
mod registry_test;
pub mod routes;
pub mod service;

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::FcmApiDoc;
}
