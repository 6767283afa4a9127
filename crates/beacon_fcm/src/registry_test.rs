#[cfg(test)]
mod tests {
    use crate::registry::TokenRegistry;

    #[test]
    fn store_increments_count_once_per_token() {
        let registry = TokenRegistry::new();
        assert_eq!(registry.count(), 0);

        registry.store("abc123", None, None);
        assert_eq!(registry.count(), 1);

        // Re-registering the same token is an upsert, not a duplicate
        registry.store("abc123", Some("user1".to_string()), None);
        assert_eq!(registry.count(), 1);

        registry.store("def456", None, None);
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn reregistration_overwrites_the_record() {
        let registry = TokenRegistry::new();
        registry.store("abc123", Some("user1".to_string()), None);
        registry.store(
            "abc123",
            Some("user2".to_string()),
            Some("Android".to_string()),
        );

        let records = registry.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id.as_deref(), Some("user2"));
        assert_eq!(records[0].device_info.as_deref(), Some("Android"));
    }

    #[test]
    fn remove_absent_token_is_a_noop() {
        let registry = TokenRegistry::new();
        registry.store("abc123", None, None);

        registry.remove("never-registered");
        assert_eq!(registry.count(), 1);

        registry.remove("abc123");
        assert_eq!(registry.count(), 0);

        // Removing again must not error either
        registry.remove("abc123");
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn all_returns_a_snapshot() {
        let registry = TokenRegistry::new();
        registry.store("abc123", None, None);
        registry.store("def456", None, None);

        let snapshot = registry.all();
        assert_eq!(snapshot.len(), 2);

        // Mutations after the call do not show up in the snapshot
        registry.store("ghi789", None, None);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(registry.count(), 3);
    }

    #[test]
    fn tokens_for_user_filters_exactly() {
        let registry = TokenRegistry::new();
        registry.store("t1", Some("alice".to_string()), None);
        registry.store("t2", Some("bob".to_string()), None);
        registry.store("t3", Some("alice".to_string()), None);
        registry.store("t4", None, None);

        let mut tokens = registry.tokens_for_user("alice");
        tokens.sort();
        assert_eq!(tokens, vec!["t1".to_string(), "t3".to_string()]);

        assert!(registry.tokens_for_user("carol").is_empty());
    }

    #[test]
    fn clear_empties_the_registry() {
        let registry = TokenRegistry::new();
        registry.store("t1", None, None);
        registry.store("t2", None, None);

        registry.clear();
        assert_eq!(registry.count(), 0);
        assert!(registry.all().is_empty());
    }

    #[test]
    fn concurrent_store_and_remove_stay_consistent() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(TokenRegistry::new());
        let writers: Vec<_> = (0..4)
            .map(|writer| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..100 {
                        let token = format!("w{}-t{}", writer, i);
                        registry.store(&token, None, None);
                        if i % 2 == 0 {
                            registry.remove(&token);
                        }
                    }
                })
            })
            .collect();

        for handle in writers {
            handle.join().expect("writer thread panicked");
        }

        // Each writer keeps the 50 odd-numbered tokens
        assert_eq!(registry.count(), 200);
    }
}
