// --- File: crates/beacon_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! This module provides the plumbing for trait definitions of external
//! services used by the application. The traits themselves live with their
//! integration crates; the shared future alias lives here so every seam
//! spells its signatures the same way.

use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;
