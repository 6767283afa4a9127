#[cfg(test)]
mod tests {
    use crate::logic::{broadcast, prepare_data, BroadcastError, BroadcastMessage};
    use crate::registry::TokenRegistry;
    use crate::service::mock::{MockOutcome, MockPushSender};
    use std::collections::HashMap;

    fn message() -> BroadcastMessage {
        BroadcastMessage {
            title: "Hi".to_string(),
            body: "There".to_string(),
            data: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn empty_token_list_is_no_recipients_and_never_sends() {
        let registry = TokenRegistry::new();
        let sender = MockPushSender::new();

        let result = broadcast(&sender, &registry, &message(), Vec::new()).await;

        assert!(matches!(result, Err(BroadcastError::NoRecipients)));
        assert_eq!(sender.calls(), 0);
    }

    #[tokio::test]
    async fn single_successful_send_is_tallied() {
        let registry = TokenRegistry::new();
        registry.store("abc123", None, None);
        let sender = MockPushSender::new();

        let summary = broadcast(&sender, &registry, &message(), registry.all())
            .await
            .expect("broadcast should run");

        assert_eq!(summary.sent, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.invalid_removed, 0);
        assert_eq!(registry.count(), 1);
    }

    #[tokio::test]
    async fn invalid_tokens_are_pruned_and_counted() {
        let registry = TokenRegistry::new();
        for token in ["live1", "dead1", "live2", "dead2", "live3"] {
            registry.store(token, None, None);
        }
        let sender = MockPushSender::new()
            .with_outcome("dead1", MockOutcome::InvalidToken)
            .with_outcome("dead2", MockOutcome::InvalidToken);

        let summary = broadcast(&sender, &registry, &message(), registry.all())
            .await
            .expect("broadcast should run");

        assert_eq!(summary.total, 5);
        assert_eq!(summary.sent, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.invalid_removed, 2);
        // N tokens with K invalid leave N - K registered
        assert_eq!(registry.count(), 3);

        let mut remaining = registry.all();
        remaining.sort();
        assert_eq!(remaining, vec!["live1", "live2", "live3"]);
    }

    #[tokio::test]
    async fn transient_failure_keeps_token_and_does_not_block_others() {
        let registry = TokenRegistry::new();
        for token in ["flaky", "ok1", "ok2"] {
            registry.store(token, None, None);
        }
        let sender = MockPushSender::new().with_outcome("flaky", MockOutcome::Transient);

        let summary = broadcast(&sender, &registry, &message(), registry.all())
            .await
            .expect("broadcast should run");

        assert_eq!(summary.sent, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.invalid_removed, 0);
        // The transient failure leaves the token registered
        assert_eq!(registry.count(), 3);

        let failure = &summary.failures[0];
        assert_eq!(failure.token, "flaky");
        assert_eq!(failure.code, "UNAVAILABLE");
        assert!(!failure.invalid);
    }

    #[tokio::test]
    async fn mixed_failures_are_classified_independently() {
        let registry = TokenRegistry::new();
        for token in ["dead", "flaky", "ok"] {
            registry.store(token, None, None);
        }
        let sender = MockPushSender::new()
            .with_outcome("dead", MockOutcome::InvalidToken)
            .with_outcome("flaky", MockOutcome::Transient);

        let summary = broadcast(&sender, &registry, &message(), registry.all())
            .await
            .expect("broadcast should run");

        assert_eq!(summary.sent, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.invalid_removed, 1);
        assert_eq!(registry.count(), 2);
        assert_eq!(sender.calls(), 3);
    }

    #[tokio::test]
    async fn registered_then_dead_token_scenario() {
        // register "deadtoken" -> delivery reports it unregistered ->
        // registry is empty afterwards
        let registry = TokenRegistry::new();
        registry.store("deadtoken", None, None);
        let sender = MockPushSender::new().with_outcome("deadtoken", MockOutcome::InvalidToken);

        let summary = broadcast(&sender, &registry, &message(), registry.all())
            .await
            .expect("broadcast should run");

        assert_eq!(summary.invalid_removed, 1);
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn prepare_data_merges_defaults_without_clobbering() {
        let mut data = HashMap::new();
        data.insert("url".to_string(), "/matches".to_string());
        data.insert("matchId".to_string(), "42".to_string());

        let merged = prepare_data(&data);
        assert_eq!(merged.get("url").map(String::as_str), Some("/matches"));
        assert_eq!(merged.get("matchId").map(String::as_str), Some("42"));
        assert!(merged.contains_key("timestamp"));

        // The default url only fills in when the caller did not set one
        let merged = prepare_data(&HashMap::new());
        assert_eq!(merged.get("url").map(String::as_str), Some("/"));
    }
}
