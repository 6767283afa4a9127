//! Push delivery seam.
//!
//! The broadcast logic talks to the delivery service through the
//! [`PushSender`] trait rather than the concrete [`FcmClient`], so tests can
//! script per-token outcomes without network access. This mirrors how the
//! other integration crates expose their external services behind traits.

use beacon_common::services::BoxFuture;

use crate::client::{FcmClient, FcmError, FcmMessage};

/// A service that can deliver one push message to one device token.
pub trait PushSender: Send + Sync {
    /// Deliver `message`, returning the delivery id on success.
    fn send(&self, message: FcmMessage) -> BoxFuture<'_, String, FcmError>;
}

impl PushSender for FcmClient {
    fn send(&self, message: FcmMessage) -> BoxFuture<'_, String, FcmError> {
        Box::pin(async move { self.send_message(message).await })
    }
}

#[cfg(test)]
pub mod mock {
    //! Scripted push sender for tests.

    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Outcome a [`MockPushSender`] produces for a given token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MockOutcome {
        /// Delivery succeeds.
        Success,
        /// The API reports the token as unregistered (prunes the token).
        InvalidToken,
        /// A transient failure (token must stay registered).
        Transient,
    }

    /// Push sender with per-token scripted outcomes.
    ///
    /// Tokens without a scripted outcome succeed. `calls` counts every
    /// delivery attempt, so tests can assert the sender was never invoked.
    #[derive(Default)]
    pub struct MockPushSender {
        outcomes: HashMap<String, MockOutcome>,
        calls: AtomicUsize,
    }

    impl MockPushSender {
        pub fn new() -> Self {
            Self::default()
        }

        /// Script the outcome for one token.
        pub fn with_outcome(mut self, token: &str, outcome: MockOutcome) -> Self {
            self.outcomes.insert(token.to_string(), outcome);
            self
        }

        /// Number of delivery attempts made through this sender.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PushSender for MockPushSender {
        fn send(&self, message: FcmMessage) -> BoxFuture<'_, String, FcmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let token = message.message.token;
            let outcome = self
                .outcomes
                .get(&token)
                .copied()
                .unwrap_or(MockOutcome::Success);

            Box::pin(async move {
                match outcome {
                    MockOutcome::Success => Ok(format!("projects/mock/messages/{}", token)),
                    MockOutcome::InvalidToken => Err(FcmError::ApiError {
                        code: "UNREGISTERED".to_string(),
                        message: "Requested entity was not found.".to_string(),
                    }),
                    MockOutcome::Transient => Err(FcmError::ApiError {
                        code: "UNAVAILABLE".to_string(),
                        message: "The server is overloaded.".to_string(),
                    }),
                }
            })
        }
    }
}
