pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::core::{
    VocabEntry,
    VocabotError,
};

/// Semantic wrapper over the document store: category documents in the
/// `vocab` collection, entry documents in each category's `vocab`
/// sub-collection. Word matching is exact and case-sensitive, and the
/// word-addressed operations touch every entry sharing that word.
#[allow(async_fn_in_trait)]
pub trait VocabStore {
    async fn category_exists(&self, category: &str) -> Result<bool, VocabotError>;

    /// Overwrite semantics: re-creating an existing category resets its
    /// creation timestamp and advisory count.
    async fn create_category(&self, category: &str) -> Result<(), VocabotError>;

    /// Pure append. No uniqueness check on the word.
    async fn add_entry(
        &self,
        category: &str,
        word: &str,
        meaning: &str,
    ) -> Result<(), VocabotError>;

    /// Deletes ALL entries whose word equals `word`. Returns how many.
    async fn delete_entries_by_word(
        &self,
        category: &str,
        word: &str,
    ) -> Result<usize, VocabotError>;

    /// Deletes the entries first, then the category document. The two
    /// steps are not atomic; a failure in between leaves a partial state.
    async fn delete_category(&self, category: &str) -> Result<(), VocabotError>;

    /// Keys in the store's native enumeration order, which is not
    /// guaranteed stable.
    async fn list_categories(&self) -> Result<Vec<String>, VocabotError>;

    async fn list_entries(&self, category: &str) -> Result<Vec<VocabEntry>, VocabotError>;

    /// Updates ALL entries whose word equals `word`. Returns how many.
    async fn update_meaning(
        &self,
        category: &str,
        word: &str,
        new_meaning: &str,
    ) -> Result<usize, VocabotError>;

    /// Connectivity check: writes a ping document to the `test` collection.
    async fn probe(&self) -> Result<(), VocabotError>;
}
