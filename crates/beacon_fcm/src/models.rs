//! Model re-exports for the FCM crate
//!
//! The token record itself lives in beacon_common so other crates can refer
//! to it without depending on the FCM integration.

pub use beacon_common::models::TokenRecord;
