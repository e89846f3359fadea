//! WebSocket message dispatch
//!
//! Maps each inbound [`ClientMessage`] onto a game operation. Replies never
//! come back from here: the game pushes everything it has to say through the
//! player's [`Connection`].

use crate::connection::Connection;
use crate::protocol::ClientMessage;
use crate::state::GameState;

pub async fn handle_message(msg: ClientMessage, conn: &Connection, state: &GameState) {
    match msg {
        ClientMessage::Join { name } => {
            tracing::info!("Join request: {}", name);
            state.add_player(conn.clone(), &name).await;
        }

        ClientMessage::Submit { answer } => {
            if answer.trim().is_empty() {
                return;
            }
            state.submit_answer(conn, &answer).await;
        }

        ClientMessage::Pass => state.pass_turn(conn).await,

        ClientMessage::Typing { text } => state.broadcast_typing(conn, &text).await,

        ClientMessage::VoteStart => state.vote_start(conn).await,
    }
}
