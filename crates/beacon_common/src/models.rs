// --- File: crates/beacon_common/src/models.rs ---

// This file contains data structures and models that are common across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a registered push-notification device token
///
/// Each record is keyed by the platform-issued FCM token. The optional user
/// id is used only for filtered lookups, and the device info string is
/// diagnostic free text (user agent + platform).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    /// The FCM registration token, unique key for the record
    pub token: String,

    /// The user ID associated with this registration, if any
    pub user_id: Option<String>,

    /// Free-text device description, if any
    pub device_info: Option<String>,

    /// When this token was first registered (reset on re-registration)
    pub registered_at: DateTime<Utc>,

    /// Set at registration time; not refreshed by sends
    pub last_used: DateTime<Utc>,
}

impl TokenRecord {
    /// Create a new token record stamped with the current time
    ///
    /// # Arguments
    ///
    /// * `token` - The FCM registration token
    /// * `user_id` - The user ID to associate with the registration
    /// * `device_info` - Free-text device description
    pub fn new(token: String, user_id: Option<String>, device_info: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            device_info,
            registered_at: now,
            last_used: now,
        }
    }
}
