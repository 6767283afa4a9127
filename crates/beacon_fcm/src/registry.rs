//! In-memory registry of FCM device tokens
//!
//! The registry is the process-wide mapping from device token to its
//! [`TokenRecord`]. It is explicitly constructed and injected into the HTTP
//! handlers (no hidden global), and it is volatile: a restart empties it.
//!
//! The token is the unique identity. Re-registering a token overwrites its
//! record, and removing an absent token is a no-op, so the broadcast path's
//! "read all, then remove some of what was read" never races a concurrent
//! registration into an error.

use crate::models::TokenRecord;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Process-wide token registry, safe for concurrent use from axum handlers.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    records: RwLock<HashMap<String, TokenRecord>>,
}

impl TokenRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a token record (last-write-wins). Never fails.
    pub fn store(&self, token: &str, user_id: Option<String>, device_info: Option<String>) {
        let mut records = self.records.write();
        records.insert(
            token.to_string(),
            TokenRecord::new(token.to_string(), user_id, device_info),
        );
        debug!("Token stored (total: {})", records.len());
    }

    /// Remove a token. Removing an absent token is a no-op.
    pub fn remove(&self, token: &str) {
        let mut records = self.records.write();
        if records.remove(token).is_some() {
            debug!("Token removed (total: {})", records.len());
        }
    }

    /// Snapshot of all registered tokens at call time.
    ///
    /// Mutations after this call are not visible in the returned list.
    pub fn all(&self) -> Vec<String> {
        self.records.read().keys().cloned().collect()
    }

    /// Snapshot of the tokens registered for a specific user.
    pub fn tokens_for_user(&self, user_id: &str) -> Vec<String> {
        self.records
            .read()
            .values()
            .filter(|record| record.user_id.as_deref() == Some(user_id))
            .map(|record| record.token.clone())
            .collect()
    }

    /// Number of registered tokens.
    pub fn count(&self) -> usize {
        self.records.read().len()
    }

    /// Snapshot of all token records, for diagnostics.
    pub fn records(&self) -> Vec<TokenRecord> {
        self.records.read().values().cloned().collect()
    }

    /// Drop every record.
    pub fn clear(&self) {
        self.records.write().clear();
        debug!("All tokens cleared");
    }
}
