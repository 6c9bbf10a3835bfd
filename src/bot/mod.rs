pub mod render;

use crate::{
    command::{
        Dispatcher,
        Outcome,
    },
    game::{
        GameEngine,
        ResponseKind,
        RespondOutcome,
        StartOutcome,
    },
    gateway::{
        EventPayload,
        InboundEvent,
        Reply,
    },
    store::VocabStore,
};

/// Ties the dispatcher and the game engine together: pending confirmation
/// first, then command dispatch, with `!play` and button clicks routed to
/// the engine. One instance serves all users.
pub struct Bot<S> {
    dispatcher: Dispatcher<S>,
    engine: GameEngine<S>,
    web_link: String,
}

impl<S: VocabStore + Clone> Bot<S> {
    pub fn new(store: S, web_link: &str) -> Self {
        Bot {
            dispatcher: Dispatcher::new(store.clone()),
            engine: GameEngine::new(store),
            web_link: web_link.to_string(),
        }
    }

    /// `None` means no reply is sent for this event.
    pub async fn handle_event(&self, event: InboundEvent) -> Option<Reply> {
        match event.payload {
            EventPayload::Message(text) => self.handle_message(&event.user, &text).await,
            EventPayload::Button(kind) => Some(self.handle_button(&event.user, kind)),
        }
    }

    async fn handle_message(&self, user: &str, text: &str) -> Option<Reply> {
        let outcome = self.dispatcher.handle(user, text).await;

        if let Outcome::StartGame { category } = &outcome {
            let reply = match self.engine.start(user, category).await {
                Ok(StartOutcome::Card(card)) => render::card_reply(&card, false),
                Ok(StartOutcome::EmptyCategory { category }) => {
                    render::empty_category_reply(&category)
                }
                Err(e) => {
                    eprintln!("[BOT] Failed to start game for user {}: {}", user, e);
                    render::store_failure_reply()
                }
            };
            return Some(reply);
        }

        render::render_outcome(&outcome, &self.web_link)
    }

    fn handle_button(&self, user: &str, kind: ResponseKind) -> Reply {
        match self.engine.respond(user, kind) {
            RespondOutcome::Card(card) => render::card_reply(&card, true),
            RespondOutcome::GameOver { category, tally, total } => {
                render::game_over_reply(&category, &tally, total)
            }
            RespondOutcome::NoSession => render::no_game_reply(),
        }
    }
}
