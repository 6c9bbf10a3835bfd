use std::{
    collections::HashMap,
    sync::Mutex,
};

use rand::Rng;

use crate::{
    core::{
        VocabEntry,
        VocabotError,
    },
    store::VocabStore,
};

/// The three interactive responses. Record-only: the chosen kind bumps its
/// tally counter and nothing else — advancement is identical for all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    StillLearning,
    Remember,
    ShowMeaning,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub still_learning: u32,
    pub remembered: u32,
    pub meaning_shown: u32,
}

impl Tally {
    fn record(&mut self, kind: ResponseKind) {
        match kind {
            ResponseKind::StillLearning => self.still_learning += 1,
            ResponseKind::Remember => self.remembered += 1,
            ResponseKind::ShowMeaning => self.meaning_shown += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.still_learning + self.remembered + self.meaning_shown
    }
}

/// Player-facing card. Carries the word only; the meaning is withheld from
/// the card payload at all times, including after a ShowMeaning response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentCard {
    pub word: String,
    pub position: usize, // 1-based
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    Card(CurrentCard),
    /// No entries in the category. No session is created and any existing
    /// session for the player survives.
    EmptyCategory { category: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RespondOutcome {
    Card(CurrentCard),
    GameOver { category: String, tally: Tally, total: usize },
    NoSession,
}

/// One quiz run over a shuffled snapshot of a category. The snapshot is
/// captured at start and never re-read from the store.
struct GameSession {
    category: String,
    cards: Vec<VocabEntry>,
    index: usize,
    tally: Tally,
}

impl GameSession {
    fn current_card(&self) -> CurrentCard {
        CurrentCard {
            word: self.cards[self.index].word.clone(),
            position: self.index + 1,
            total: self.cards.len(),
        }
    }
}

/// Fisher–Yates: walk i from the last index down to 1, swapping element i
/// with a uniformly chosen element in 0..=i.
pub fn shuffle(cards: &mut [VocabEntry], rng: &mut impl Rng) {
    for i in (1..cards.len()).rev() {
        let j = rng.random_range(0..=i);
        cards.swap(i, j);
    }
}

/// Owns the per-player session map. Exactly one active session per player;
/// a fresh `start` over a non-empty category replaces it outright.
pub struct GameEngine<S> {
    store: S,
    sessions: Mutex<HashMap<String, GameSession>>,
}

impl<S: VocabStore> GameEngine<S> {
    pub fn new(store: S) -> Self {
        GameEngine { store, sessions: Mutex::new(HashMap::new()) }
    }

    pub async fn start(
        &self,
        player: &str,
        category: &str,
    ) -> Result<StartOutcome, VocabotError> {
        let mut cards = self.store.list_entries(category).await?;
        if cards.is_empty() {
            return Ok(StartOutcome::EmptyCategory { category: category.to_string() });
        }

        shuffle(&mut cards, &mut rand::rng());

        let session = GameSession {
            category: category.to_string(),
            cards,
            index: 0,
            tally: Tally::default(),
        };
        let card = session.current_card();

        self.sessions.lock().unwrap().insert(player.to_string(), session);
        Ok(StartOutcome::Card(card))
    }

    /// Tally the response and advance by exactly one card. Destroys the
    /// session and reports the final tally when the cursor runs off the end.
    pub fn respond(&self, player: &str, kind: ResponseKind) -> RespondOutcome {
        let mut sessions = self.sessions.lock().unwrap();
        let Some(mut session) = sessions.remove(player) else {
            return RespondOutcome::NoSession;
        };

        session.tally.record(kind);
        session.index += 1;

        if session.index >= session.cards.len() {
            return RespondOutcome::GameOver {
                category: session.category,
                total: session.cards.len(),
                tally: session.tally,
            };
        }

        let card = session.current_card();
        sessions.insert(player.to_string(), session);
        RespondOutcome::Card(card)
    }

    /// Whether the player currently has a session. For tests.
    pub fn has_session(&self, player: &str) -> bool {
        self.sessions.lock().unwrap().contains_key(player)
    }
}
