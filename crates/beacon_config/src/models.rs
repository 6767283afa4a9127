// --- File: crates/beacon_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Firebase Cloud Messaging Config ---
// Holds non-secret FCM config. The service account itself is resolved at
// startup from (in order): the FCM_SERVICE_ACCOUNT_JSON env var, `key_path`
// below, then ./serviceAccountKey.json.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FcmConfig {
    pub project_id: Option<String>, // Loaded via APP_FCM__PROJECT_ID or config file
    pub key_path: Option<String>,
    // Secret loaded directly from env var: FCM_SERVICE_ACCOUNT_JSON
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_fcm: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub fcm: Option<FcmConfig>,
}
