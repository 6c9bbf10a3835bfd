use std::env;

use crate::core::VocabotError;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8766";
const DEFAULT_WEB_LINK: &str = "https://vocab-cards-eight.vercel.app/";

/// Runtime configuration, read from the environment (a `.env` file is
/// loaded first when present). Only the Firestore project id is required;
/// everything else has a default. Token acquisition is outside the bot:
/// `FIRESTORE_TOKEN` holds a pre-acquired bearer token, and
/// `FIRESTORE_BASE_URL` points at the emulator when set.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bind_addr: String,
    pub project_id: String,
    pub firestore_token: Option<String>,
    pub firestore_base_url: Option<String>,
    pub web_link: String,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, VocabotError> {
        let project_id = env::var("FIREBASE_PROJECT_ID")
            .map_err(|_| VocabotError::MissingEnv("FIREBASE_PROJECT_ID"))?;

        Ok(BotConfig {
            bind_addr: env::var("GATEWAY_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            project_id,
            firestore_token: env::var("FIRESTORE_TOKEN").ok(),
            firestore_base_url: env::var("FIRESTORE_BASE_URL").ok(),
            web_link: env::var("WEB_LINK").unwrap_or_else(|_| DEFAULT_WEB_LINK.to_string()),
        })
    }
}
