use std::net::SocketAddr;

use futures_util::{
    SinkExt,
    StreamExt,
};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::Message;

use super::types::{
    ClientFrame,
    EventSender,
};
use crate::core::VocabotError;

pub async fn handle_connection(
    stream: tokio::net::TcpStream,
    addr: SocketAddr,
    events: EventSender,
) -> Result<(), VocabotError> {
    let ws_stream = tokio_tungstenite::accept_async(stream)
        .await
        .map_err(|e| VocabotError::Custom(format!("Error during WebSocket handshake: {}", e)))?;

    println!("[WS] WebSocket connection established with: {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Replies for this client are funneled through its own channel so the
    // bot loop never touches the socket directly.
    let (tx, mut rx) = mpsc::channel::<String>(32);

    let forward_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(Message::text(msg)).await.is_err() {
                break;
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(message)) => {
                if message.as_str() == "PING" {
                    if let Err(e) = tx.send("PONG".to_string()).await {
                        eprintln!("[WS] Failed to send PONG: {}", e);
                    }
                    continue;
                }

                match serde_json::from_str::<ClientFrame>(message.as_str()) {
                    Ok(frame) => match frame.into_event() {
                        Some(event) => {
                            if let Err(e) = events.send((event, tx.clone())).await {
                                eprintln!("[WS] Failed to forward event: {}", e);
                            }
                        }
                        None => {
                            println!("[WS] Dropped frame with unknown action from {}", addr);
                        }
                    },
                    Err(e) => {
                        println!("[WS] Received message that's not a valid frame: {}", e);
                    }
                }
            }
            Ok(Message::Close(_)) => {
                println!("[WS] Client {} disconnected", addr);
                break;
            }
            Err(e) => {
                eprintln!("[WS] Error from client {}: {}", addr, e);
                break;
            }
            _ => {}
        }
    }

    forward_task.abort();
    drop(tx);

    Ok(())
}
