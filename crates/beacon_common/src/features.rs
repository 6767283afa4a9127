//! Feature flag handling for the Beacon application.
//!
//! This module provides utilities for working with feature flags in a more
//! maintainable way.
//!
//! ## Available Features
//!
//! - `openapi`: Enables OpenAPI documentation generation
//! - `fcm`: Enables the Firebase Cloud Messaging push integration
//!
//! ## Usage
//!
//! Feature flags are used in two ways in the Beacon application:
//!
//! 1. Compile-time feature flags using `#[cfg(feature = "...")]`
//! 2. Runtime feature flags using configuration values
//!
//! This module provides helper functions for checking if features are enabled
//! at runtime based on configuration values.

use beacon_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
///
/// # Returns
///
/// `true` if the feature is enabled, `false` otherwise
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Firebase Cloud Messaging feature is enabled at runtime.
///
/// # Arguments
///
/// * `config` - The application configuration
///
/// # Returns
///
/// `true` if the FCM feature is enabled, `false` otherwise
#[cfg(feature = "fcm")]
pub fn is_fcm_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_fcm, config.fcm.as_ref())
}
