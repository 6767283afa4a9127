// --- File: crates/beacon_common/src/routes.rs ---

// This file contains route definitions that are common across the application.

use axum::{routing::get, Json, Router};
use serde_json::json;

/// Creates a router containing common routes that can be used across the application.
///
/// # Returns
/// A router configured with common routes.
pub fn routes() -> Router {
    Router::new().route(
        "/health",
        get(|| async { Json(json!({ "status": "ok" })) }),
    )
}
