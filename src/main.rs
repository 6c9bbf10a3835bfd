use std::sync::Arc;

use tokio::sync::mpsc;
use vocabot::{
    gateway::{
        GatewayServer,
        InboundEvent,
    },
    store::FirestoreStore,
    Bot,
    BotConfig,
    VocabotError,
};

#[tokio::main]
async fn main() -> Result<(), VocabotError> {
    // .env is optional; real deployments set the variables directly
    let _ = dotenvy::dotenv();

    let config = BotConfig::from_env()?;
    println!("[BOT] Starting vocabot for project {}", config.project_id);

    let store = FirestoreStore::new(
        &config.project_id,
        config.firestore_token.clone(),
        config.firestore_base_url.clone(),
    );
    let bot = Arc::new(Bot::new(store, &config.web_link));

    let (event_tx, mut event_rx) =
        mpsc::channel::<(InboundEvent, mpsc::Sender<String>)>(100);

    let gateway = GatewayServer::new(&config.bind_addr);
    tokio::spawn(async move {
        if let Err(e) = gateway.run(event_tx).await {
            eprintln!("[WS] Gateway stopped: {}", e);
        }
    });

    // One task per inbound event: a user's store I/O must never hold up
    // other users. Per-user ordering is the transport's responsibility.
    while let Some((event, reply_tx)) = event_rx.recv().await {
        let bot = bot.clone();
        tokio::spawn(async move {
            if let Some(reply) = bot.handle_event(event).await {
                match serde_json::to_string(&reply) {
                    Ok(json) => {
                        if let Err(e) = reply_tx.send(json).await {
                            eprintln!("[BOT] Failed to queue reply: {}", e);
                        }
                    }
                    Err(e) => eprintln!("[BOT] Failed to encode reply: {}", e),
                }
            }
        });
    }

    Ok(())
}
