use std::net::SocketAddr;

use tokio::net::TcpListener;

use super::{
    connection::handle_connection,
    types::EventSender,
};
use crate::core::VocabotError;

/// WebSocket front door for chat clients. Accepts connections and forwards
/// decoded inbound events to the bot loop; replies travel back through each
/// connection's own channel.
pub struct GatewayServer {
    bind_addr: String,
}

impl GatewayServer {
    pub fn new(bind_addr: &str) -> Self {
        GatewayServer { bind_addr: bind_addr.to_string() }
    }

    pub async fn run(&self, events: EventSender) -> Result<(), VocabotError> {
        let addr = self
            .bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| VocabotError::Custom(format!("Invalid bind address: {}", e)))?;

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| VocabotError::Custom(format!("Failed to bind to address: {}", e)))?;

        println!("[WS] Gateway listening on {}", addr);

        while let Ok((stream, peer)) = listener.accept().await {
            println!("[WS] New connection from: {}", peer);

            let events = events.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, peer, events).await {
                    eprintln!("[WS] Error handling connection from {}: {:?}", peer, e);
                }
            });
        }

        Ok(())
    }
}
