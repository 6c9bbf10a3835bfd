#[cfg(test)]
mod tests {
    use crate::{
        command::{
            dispatcher::Outcome,
            parser::USAGE_ADD_VOCAB,
            Dispatcher,
        },
        core::{
            VocabEntry,
            VocabotError,
        },
        store::{
            MemoryStore,
            VocabStore,
        },
    };

    const USER: &str = "user-1";

    async fn store_with_category(category: &str) -> MemoryStore {
        let store = MemoryStore::new();
        store.create_category(category).await.unwrap();
        store
    }

    // Every store call rejects, standing in for an unreachable backend.
    #[derive(Clone)]
    struct FailingStore;

    fn down() -> VocabotError {
        VocabotError::StoreUnavailable("backend down".to_string())
    }

    impl VocabStore for FailingStore {
        async fn category_exists(&self, _: &str) -> Result<bool, VocabotError> {
            Err(down())
        }
        async fn create_category(&self, _: &str) -> Result<(), VocabotError> {
            Err(down())
        }
        async fn add_entry(&self, _: &str, _: &str, _: &str) -> Result<(), VocabotError> {
            Err(down())
        }
        async fn delete_entries_by_word(&self, _: &str, _: &str) -> Result<usize, VocabotError> {
            Err(down())
        }
        async fn delete_category(&self, _: &str) -> Result<(), VocabotError> {
            Err(down())
        }
        async fn list_categories(&self) -> Result<Vec<String>, VocabotError> {
            Err(down())
        }
        async fn list_entries(&self, _: &str) -> Result<Vec<VocabEntry>, VocabotError> {
            Err(down())
        }
        async fn update_meaning(&self, _: &str, _: &str, _: &str) -> Result<usize, VocabotError> {
            Err(down())
        }
        async fn probe(&self) -> Result<(), VocabotError> {
            Err(down())
        }
    }

    #[tokio::test]
    async fn add_to_missing_category_prompts_and_writes_nothing() {
        let store = MemoryStore::new();
        let dispatcher = Dispatcher::new(store.clone());

        let outcome = dispatcher.handle(USER, "!add vocab animals dog:hund").await;
        assert_eq!(outcome, Outcome::ConfirmPrompt { category: "animals".to_string() });

        let pending = dispatcher.pending_for(USER).unwrap();
        assert_eq!(pending.category, "animals");
        assert_eq!(pending.pairs, vec!["dog:hund".to_string()]);

        // Nothing hit the store yet
        assert!(!store.category_exists("animals").await.unwrap());
        assert_eq!(store.entry_count("animals"), 0);
    }

    #[tokio::test]
    async fn yes_is_case_insensitive_and_commits_once() {
        let store = MemoryStore::new();
        let dispatcher = Dispatcher::new(store.clone());

        dispatcher.handle(USER, "!add vocab animals dog:hund cat:katze").await;
        let outcome = dispatcher.handle(USER, "YES").await;

        assert_eq!(
            outcome,
            Outcome::AddReport {
                category: "animals".to_string(),
                added: 2,
                failed: 0,
                created: true,
            }
        );
        assert!(dispatcher.pending_for(USER).is_none());
        assert!(store.category_exists("animals").await.unwrap());
        assert_eq!(store.entry_count("animals"), 2);
    }

    #[tokio::test]
    async fn no_discards_without_writing() {
        let store = MemoryStore::new();
        let dispatcher = Dispatcher::new(store.clone());

        dispatcher.handle(USER, "!add vocab animals dog:hund").await;
        let outcome = dispatcher.handle(USER, "No").await;

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(dispatcher.pending_for(USER).is_none());
        assert!(!store.category_exists("animals").await.unwrap());
        assert_eq!(store.entry_count("animals"), 0);
    }

    #[tokio::test]
    async fn other_messages_are_swallowed_and_pending_survives() {
        let store = MemoryStore::new();
        let dispatcher = Dispatcher::new(store.clone());

        dispatcher.handle(USER, "!add vocab animals dog:hund").await;

        // Confirmation takes priority over every other command
        assert_eq!(dispatcher.handle(USER, "!help").await, Outcome::Swallowed);
        assert_eq!(dispatcher.handle(USER, "maybe").await, Outcome::Swallowed);
        assert!(dispatcher.pending_for(USER).is_some());

        // A different user is unaffected
        assert_eq!(dispatcher.handle("user-2", "!help").await, Outcome::Help);
    }

    #[tokio::test]
    async fn newer_add_overwrites_pending_silently() {
        let store = MemoryStore::new();
        let dispatcher = Dispatcher::new(store.clone());

        dispatcher.handle(USER, "!add vocab animals dog:hund").await;
        // "no" resolves the first pending; a fresh add re-enters the state
        dispatcher.handle(USER, "no").await;
        dispatcher.handle(USER, "!add vocab food rice:reis").await;

        let pending = dispatcher.pending_for(USER).unwrap();
        assert_eq!(pending.category, "food");
        assert_eq!(pending.pairs, vec!["rice:reis".to_string()]);
    }

    #[tokio::test]
    async fn bulk_add_reports_per_pair_outcomes() {
        let store = store_with_category("x").await;
        let dispatcher = Dispatcher::new(store.clone());

        let outcome = dispatcher.handle(USER, "!add vocab x a:b bad c:d").await;
        assert_eq!(
            outcome,
            Outcome::AddReport { category: "x".to_string(), added: 2, failed: 1, created: false }
        );
        assert_eq!(store.entry_count("x"), 2);
    }

    #[tokio::test]
    async fn pair_splits_on_first_colon_only() {
        let store = store_with_category("x").await;
        let dispatcher = Dispatcher::new(store.clone());

        dispatcher.handle(USER, "!add vocab x a:b:c :b a:").await;

        let entries = store.list_entries("x").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "a");
        assert_eq!(entries[0].meaning, "b:c");
    }

    #[tokio::test]
    async fn duplicate_words_accumulate_and_delete_touches_all() {
        let store = store_with_category("x").await;
        let dispatcher = Dispatcher::new(store.clone());

        dispatcher.handle(USER, "!add vocab x dog:hund dog:perro other:thing").await;
        assert_eq!(store.entry_count("x"), 3);

        let outcome = dispatcher.handle(USER, "!delete vocab x dog").await;
        assert_eq!(
            outcome,
            Outcome::VocabDeleted {
                category: "x".to_string(),
                word: "dog".to_string(),
                count: 2,
            }
        );
        assert_eq!(store.entry_count("x"), 1);
    }

    #[tokio::test]
    async fn delete_vocab_is_case_sensitive() {
        let store = store_with_category("x").await;
        let dispatcher = Dispatcher::new(store.clone());

        dispatcher.handle(USER, "!add vocab x Dog:hund").await;
        let outcome = dispatcher.handle(USER, "!delete vocab x dog").await;
        assert_eq!(
            outcome,
            Outcome::VocabNotFound { category: "x".to_string(), word: "dog".to_string() }
        );
        assert_eq!(store.entry_count("x"), 1);
    }

    #[tokio::test]
    async fn delete_category_cascades_to_entries() {
        let store = store_with_category("x").await;
        let dispatcher = Dispatcher::new(store.clone());
        dispatcher.handle(USER, "!add vocab x a:1 b:2 c:3").await;

        let outcome = dispatcher.handle(USER, "!delete category x").await;
        assert_eq!(outcome, Outcome::CategoryDeleted { category: "x".to_string() });

        assert!(!store.category_exists("x").await.unwrap());
        assert_eq!(
            dispatcher.handle(USER, "!list vocab x").await,
            Outcome::NoEntries { category: "x".to_string() }
        );
    }

    #[tokio::test]
    async fn delete_missing_category_is_not_found() {
        let dispatcher = Dispatcher::new(MemoryStore::new());
        assert_eq!(
            dispatcher.handle(USER, "!delete category ghosts").await,
            Outcome::CategoryNotFound { category: "ghosts".to_string() }
        );
    }

    #[tokio::test]
    async fn list_categories_reports_empty_and_contents() {
        let store = MemoryStore::new();
        let dispatcher = Dispatcher::new(store.clone());

        assert_eq!(dispatcher.handle(USER, "!list categories").await, Outcome::NoCategories);

        store.create_category("a").await.unwrap();
        store.create_category("b").await.unwrap();
        let Outcome::Categories(mut names) = dispatcher.handle(USER, "!list categories").await
        else {
            panic!("expected categories");
        };
        names.sort();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn edit_updates_every_match_with_rejoined_meaning() {
        let store = store_with_category("x").await;
        let dispatcher = Dispatcher::new(store.clone());
        dispatcher.handle(USER, "!add vocab x dog:hund dog:perro").await;

        let outcome = dispatcher.handle(USER, "!edit vocab x dog a loyal pet").await;
        assert_eq!(
            outcome,
            Outcome::MeaningUpdated {
                category: "x".to_string(),
                word: "dog".to_string(),
                new_meaning: "a loyal pet".to_string(),
                count: 2,
            }
        );

        let entries = store.list_entries("x").await.unwrap();
        assert!(entries.iter().all(|e| e.meaning == "a loyal pet"));
    }

    #[tokio::test]
    async fn edit_with_no_match_is_not_found() {
        let store = store_with_category("x").await;
        let dispatcher = Dispatcher::new(store);

        assert_eq!(
            dispatcher.handle(USER, "!edit vocab x ghost new meaning").await,
            Outcome::VocabNotFound { category: "x".to_string(), word: "ghost".to_string() }
        );
    }

    #[tokio::test]
    async fn play_bubbles_up_to_the_game_engine() {
        let dispatcher = Dispatcher::new(MemoryStore::new());
        assert_eq!(
            dispatcher.handle(USER, "!play animals").await,
            Outcome::StartGame { category: "animals".to_string() }
        );
    }

    #[tokio::test]
    async fn usage_underflow_and_unrecognized_text() {
        let dispatcher = Dispatcher::new(MemoryStore::new());
        assert_eq!(
            dispatcher.handle(USER, "!add vocab").await,
            Outcome::Usage(USAGE_ADD_VOCAB)
        );
        assert_eq!(dispatcher.handle(USER, "hello").await, Outcome::NoReply);
    }

    #[tokio::test]
    async fn probe_reports_store_ok() {
        let dispatcher = Dispatcher::new(MemoryStore::new());
        assert_eq!(dispatcher.handle(USER, "!testfirebase").await, Outcome::StoreOk);
    }

    #[tokio::test]
    async fn store_errors_become_a_failure_outcome_not_a_crash() {
        let dispatcher = Dispatcher::new(FailingStore);

        assert_eq!(
            dispatcher.handle(USER, "!add vocab x a:b").await,
            Outcome::StoreFailure
        );
        assert_eq!(dispatcher.handle(USER, "!list categories").await, Outcome::StoreFailure);
        assert_eq!(dispatcher.handle(USER, "!testfirebase").await, Outcome::StoreFailure);

        // Commands without store calls still work
        assert_eq!(dispatcher.handle(USER, "!help").await, Outcome::Help);
    }
}
