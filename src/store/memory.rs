use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
    },
};

use uuid::Uuid;

use super::VocabStore;
use crate::core::{
    Category,
    VocabEntry,
    VocabotError,
};

#[derive(Default)]
struct MemoryInner {
    categories: HashMap<String, Category>,
    // Entry documents per category, keyed order = insertion order
    entries: HashMap<String, Vec<(String, VocabEntry)>>,
}

/// In-memory stand-in for the document store, used by the test suites and
/// for running the bot without Firestore credentials. Mirrors the adapter
/// contract exactly, including the append-only, match-all-words semantics.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries in a category, for test assertions.
    pub fn entry_count(&self, category: &str) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.entries.get(category).map(Vec::len).unwrap_or(0)
    }
}

impl VocabStore for MemoryStore {
    async fn category_exists(&self, category: &str) -> Result<bool, VocabotError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.categories.contains_key(category))
    }

    async fn create_category(&self, category: &str) -> Result<(), VocabotError> {
        let mut inner = self.inner.lock().unwrap();
        inner.categories.insert(
            category.to_string(),
            Category {
                name: category.to_string(),
                created_at: chrono::Utc::now().timestamp_millis(),
                total_vocab: 0,
            },
        );
        Ok(())
    }

    async fn add_entry(
        &self,
        category: &str,
        word: &str,
        meaning: &str,
    ) -> Result<(), VocabotError> {
        let mut inner = self.inner.lock().unwrap();
        let doc_id = Uuid::new_v4().to_string();
        inner
            .entries
            .entry(category.to_string())
            .or_default()
            .push((doc_id, VocabEntry::new(category, word, meaning)));
        Ok(())
    }

    async fn delete_entries_by_word(
        &self,
        category: &str,
        word: &str,
    ) -> Result<usize, VocabotError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(entries) = inner.entries.get_mut(category) else {
            return Ok(0);
        };
        let before = entries.len();
        entries.retain(|(_, entry)| entry.word != word);
        Ok(before - entries.len())
    }

    async fn delete_category(&self, category: &str) -> Result<(), VocabotError> {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.remove(category);
        inner.categories.remove(category);
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<String>, VocabotError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.categories.keys().cloned().collect())
    }

    async fn list_entries(&self, category: &str) -> Result<Vec<VocabEntry>, VocabotError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .entries
            .get(category)
            .map(|entries| entries.iter().map(|(_, e)| e.clone()).collect())
            .unwrap_or_default())
    }

    async fn update_meaning(
        &self,
        category: &str,
        word: &str,
        new_meaning: &str,
    ) -> Result<usize, VocabotError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(entries) = inner.entries.get_mut(category) else {
            return Ok(0);
        };
        let mut updated = 0;
        for (_, entry) in entries.iter_mut() {
            if entry.word == word {
                entry.meaning = new_meaning.to_string();
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn probe(&self) -> Result<(), VocabotError> {
        Ok(())
    }
}
