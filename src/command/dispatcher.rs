use std::{
    collections::HashMap,
    sync::Mutex,
};

use super::parser::{
    parse,
    Command,
    Parsed,
};
use crate::{
    core::{
        VocabEntry,
        VocabotError,
    },
    store::VocabStore,
};

/// A category-creation request waiting on the user's yes/no. At most one
/// per user; a newer `!add vocab` for a missing category overwrites it
/// silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCreate {
    pub category: String,
    pub pairs: Vec<String>,
}

/// Per-pair result of a bulk insert. A pair fails when it does not split
/// on its first colon into a non-empty word and non-empty meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairOutcome {
    pub token: String,
    pub ok: bool,
}

/// Structured result of one inbound message, handed to the presentation
/// layer. Store data is carried as-is; no display text lives here.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Help,
    Link,
    StoreOk,
    Usage(&'static str),
    /// The target category does not exist; the user was moved into
    /// AwaitingConfirmation.
    ConfirmPrompt { category: String },
    Cancelled,
    AddReport { category: String, added: usize, failed: usize, created: bool },
    VocabDeleted { category: String, word: String, count: usize },
    VocabNotFound { category: String, word: String },
    CategoryDeleted { category: String },
    CategoryNotFound { category: String },
    Categories(Vec<String>),
    NoCategories,
    Entries { category: String, entries: Vec<VocabEntry> },
    NoEntries { category: String },
    MeaningUpdated { category: String, word: String, new_meaning: String, count: usize },
    /// `!play` is routed to the game engine by the caller.
    StartGame { category: String },
    /// A pending confirmation consumed the message without resolving.
    Swallowed,
    /// Unrecognized text. Produces no reply.
    NoReply,
    /// A store call failed; the command is abandoned and must be reissued.
    StoreFailure,
}

// What the pending state machine decided to do with an inbound message,
// resolved under the lock before any store I/O happens.
enum PendingStep {
    NotPending,
    Commit(PendingCreate),
    Cancel,
    Swallow,
}

/// Interprets text commands against the vocabulary store and owns the
/// per-user pending-creation state machine. Confirmation handling runs
/// before any other command matching, for every inbound message.
pub struct Dispatcher<S> {
    store: S,
    pending: Mutex<HashMap<String, PendingCreate>>,
}

impl<S: VocabStore> Dispatcher<S> {
    pub fn new(store: S) -> Self {
        Dispatcher { store, pending: Mutex::new(HashMap::new()) }
    }

    pub async fn handle(&self, user: &str, text: &str) -> Outcome {
        match self.handle_inner(user, text).await {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("[BOT] Store call failed for user {}: {}", user, e);
                Outcome::StoreFailure
            }
        }
    }

    /// The user's pending category, if any. Used by the tests to assert
    /// state-machine transitions.
    pub fn pending_for(&self, user: &str) -> Option<PendingCreate> {
        self.pending.lock().unwrap().get(user).cloned()
    }

    async fn handle_inner(&self, user: &str, text: &str) -> Result<Outcome, VocabotError> {
        match self.pending_step(user, text) {
            PendingStep::Cancel => return Ok(Outcome::Cancelled),
            PendingStep::Swallow => return Ok(Outcome::Swallowed),
            PendingStep::Commit(pending) => {
                self.store.create_category(&pending.category).await?;
                let results = self.add_pairs(&pending.category, &pending.pairs).await?;
                let added = results.iter().filter(|r| r.ok).count();
                return Ok(Outcome::AddReport {
                    category: pending.category,
                    added,
                    failed: results.len() - added,
                    created: true,
                });
            }
            PendingStep::NotPending => {}
        }

        let command = match parse(text) {
            Parsed::Command(command) => command,
            Parsed::Usage(usage) => return Ok(Outcome::Usage(usage)),
            Parsed::Unrecognized => return Ok(Outcome::NoReply),
        };

        self.execute(user, command).await
    }

    /// Runs the AwaitingConfirmation transition under the lock, before any
    /// store I/O. "yes"/"no" are case-insensitive; anything else leaves the
    /// pending state untouched and eats the message.
    fn pending_step(&self, user: &str, text: &str) -> PendingStep {
        let mut pending = self.pending.lock().unwrap();
        if !pending.contains_key(user) {
            return PendingStep::NotPending;
        }

        match text.trim().to_lowercase().as_str() {
            "no" => {
                pending.remove(user);
                PendingStep::Cancel
            }
            "yes" => match pending.remove(user) {
                Some(entry) => PendingStep::Commit(entry),
                None => PendingStep::NotPending,
            },
            _ => PendingStep::Swallow,
        }
    }

    async fn execute(&self, user: &str, command: Command) -> Result<Outcome, VocabotError> {
        match command {
            Command::Help => Ok(Outcome::Help),
            Command::Link => Ok(Outcome::Link),
            Command::TestStore => {
                self.store.probe().await?;
                Ok(Outcome::StoreOk)
            }
            Command::AddVocab { category, pairs } => {
                if !self.store.category_exists(&category).await? {
                    let mut pending = self.pending.lock().unwrap();
                    pending.insert(
                        user.to_string(),
                        PendingCreate { category: category.clone(), pairs },
                    );
                    return Ok(Outcome::ConfirmPrompt { category });
                }

                let results = self.add_pairs(&category, &pairs).await?;
                let added = results.iter().filter(|r| r.ok).count();
                Ok(Outcome::AddReport {
                    category,
                    added,
                    failed: results.len() - added,
                    created: false,
                })
            }
            Command::DeleteVocab { category, word } => {
                let count = self.store.delete_entries_by_word(&category, &word).await?;
                if count == 0 {
                    return Ok(Outcome::VocabNotFound { category, word });
                }
                Ok(Outcome::VocabDeleted { category, word, count })
            }
            Command::DeleteCategory { category } => {
                if !self.store.category_exists(&category).await? {
                    return Ok(Outcome::CategoryNotFound { category });
                }
                self.store.delete_category(&category).await?;
                Ok(Outcome::CategoryDeleted { category })
            }
            Command::ListCategories => {
                let categories = self.store.list_categories().await?;
                if categories.is_empty() {
                    return Ok(Outcome::NoCategories);
                }
                Ok(Outcome::Categories(categories))
            }
            Command::ListVocab { category } => {
                let entries = self.store.list_entries(&category).await?;
                if entries.is_empty() {
                    return Ok(Outcome::NoEntries { category });
                }
                Ok(Outcome::Entries { category, entries })
            }
            Command::EditVocab { category, word, new_meaning } => {
                let count = self.store.update_meaning(&category, &word, &new_meaning).await?;
                if count == 0 {
                    return Ok(Outcome::VocabNotFound { category, word });
                }
                Ok(Outcome::MeaningUpdated { category, word, new_meaning, count })
            }
            Command::Play { category } => Ok(Outcome::StartGame { category }),
        }
    }

    /// Sequential bulk insert with a per-pair outcome list. Not
    /// transactional: a store failure partway through propagates and leaves
    /// the already-inserted entries committed.
    async fn add_pairs(
        &self,
        category: &str,
        pairs: &[String],
    ) -> Result<Vec<PairOutcome>, VocabotError> {
        let mut outcomes = Vec::with_capacity(pairs.len());

        for token in pairs {
            match split_pair(token) {
                Some((word, meaning)) => {
                    self.store.add_entry(category, word, meaning).await?;
                    outcomes.push(PairOutcome { token: token.clone(), ok: true });
                }
                None => outcomes.push(PairOutcome { token: token.clone(), ok: false }),
            }
        }

        Ok(outcomes)
    }
}

/// Split on the FIRST colon: `a:b:c` becomes ("a", "b:c"). Both halves
/// must be non-empty.
fn split_pair(token: &str) -> Option<(&str, &str)> {
    let (word, meaning) = token.split_once(':')?;
    if word.is_empty() || meaning.is_empty() {
        return None;
    }
    Some((word, meaning))
}
