//! Manages the WebSocket connection lifecycle for a game session.

use super::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use anyhow::Result;
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use magic_shop_core::{
    Command,
    driver::GameDriver,
    game::{GameController, UiAction},
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Axum handler to upgrade an HTTP connection to a WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Main handler for an individual WebSocket connection.
///
/// Every connection owns one game. The game is dropped, together with any
/// reply or timer still pending, when the connection closes.
#[instrument(name = "ws_session", skip_all, fields(session_id))]
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = Uuid::new_v4();
    tracing::Span::current().record("session_id", tracing::field::display(session_id));
    info!("New WebSocket connection.");

    if let Err(e) = run_game_session(socket, state, session_id).await {
        error!(error = ?e, "Game session terminated with error.");
    }
    info!("Game session finished.");
}

/// The main event loop for an active WebSocket session.
///
/// Listens for UI actions from the client and for finished background work
/// (model replies, the celebration timer) and pushes the resulting side
/// effects and a fresh state snapshot back to the client.
async fn run_game_session(
    socket: WebSocket,
    state: Arc<AppState>,
    session_id: Uuid,
) -> Result<()> {
    let (mut socket_tx, mut socket_rx) = socket.split();

    let controller = GameController::new(&state.system_template)
        .with_celebration_delay(state.config.celebration_delay);
    let (mut driver, mut events_rx) = GameDriver::new(controller, state.shopkeeper.clone());

    send_msg(&mut socket_tx, ServerMessage::Connected { session_id }).await?;
    send_state(&mut socket_tx, &driver).await?;

    loop {
        tokio::select! {
            // Handle messages from the client WebSocket.
            msg = socket_rx.next() => {
                let Some(msg_result) = msg else {
                    info!("Client disconnected.");
                    break;
                };
                match msg_result {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(msg) => {
                                let action = UiAction::from(msg);
                                match driver.handle(action) {
                                    Ok(commands) => send_commands(&mut socket_tx, commands).await?,
                                    Err(e) => {
                                        warn!(error = %e, "Rejected client action");
                                        send_msg(&mut socket_tx, ServerMessage::Error { message: e.to_string() }).await?;
                                    }
                                }
                                send_state(&mut socket_tx, &driver).await?;
                            }
                            Err(e) => {
                                warn!(error = %e, "Ignoring malformed client message");
                                send_msg(&mut socket_tx, ServerMessage::Error { message: format!("Malformed message: {}", e) }).await?;
                            }
                        }
                    }
                    Ok(Message::Binary(_)) => warn!("Ignoring binary frame."),
                    Ok(Message::Close(_)) => {
                        info!("Client sent close frame. Shutting down session.");
                        break;
                    }
                    Ok(Message::Ping(_) | Message::Pong(_)) => {}
                    Err(e) => {
                        error!("Error receiving from client WebSocket: {:?}", e);
                        break;
                    }
                }
            },
            // Handle finished replies and timers.
            Some(event) = events_rx.recv() => {
                let commands = driver.apply(event);
                send_commands(&mut socket_tx, commands).await?;
                send_state(&mut socket_tx, &driver).await?;
            },
        }
    }

    info!("WebSocket connection closed.");
    Ok(())
}

async fn send_commands(
    socket_tx: &mut SplitSink<WebSocket, Message>,
    commands: Vec<Command>,
) -> Result<()> {
    for msg in commands.into_iter().filter_map(ServerMessage::from_command) {
        send_msg(socket_tx, msg).await?;
    }
    Ok(())
}

async fn send_state(
    socket_tx: &mut SplitSink<WebSocket, Message>,
    driver: &GameDriver,
) -> Result<()> {
    let state = driver.controller().snapshot();
    send_msg(socket_tx, ServerMessage::State { state }).await
}

/// A helper function to serialize and send a `ServerMessage` to the client.
pub(crate) async fn send_msg(
    socket_tx: &mut SplitSink<WebSocket, Message>,
    msg: ServerMessage,
) -> Result<()> {
    let serialized = serde_json::to_string(&msg)?;
    socket_tx.send(Message::Text(serialized.into())).await?;
    Ok(())
}
