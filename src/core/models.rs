use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,        // Document key in the `vocab` collection
    pub created_at: i64,     // Epoch milliseconds
    pub total_vocab: u32,    // Advisory count, not kept authoritative
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: String,        // Stored under the `vocab` field
    pub meaning: String,
    pub timestamp: i64,      // Epoch milliseconds at insert time
    pub category: String,    // Denormalized parent category key
}

impl VocabEntry {
    pub fn new(category: &str, word: &str, meaning: &str) -> Self {
        VocabEntry {
            word: word.to_string(),
            meaning: meaning.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            category: category.to_string(),
        }
    }
}
