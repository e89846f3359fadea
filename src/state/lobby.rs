use super::{voter_names, GameState, Inner};
use crate::connection::Connection;
use crate::protocol::ServerMessage;
use crate::types::*;

const MAX_NAME_CHARS: usize = 32;

/// Trimmed, length-capped display name. Blank names get a generated one.
fn display_name(raw: &str) -> String {
    let name: String = raw.trim().chars().take(MAX_NAME_CHARS).collect();
    if !name.is_empty() {
        return name;
    }
    petname::petname(2, " ").unwrap_or_else(|| "Anonymous".to_string())
}

impl GameState {
    /// Seat a new player at the end of the rotation with full lives
    pub async fn add_player(&self, conn: Connection, name: &str) {
        let mut inner = self.inner.lock().await;

        if inner.roster.contains(conn.id()) {
            tracing::debug!("Ignoring repeated join from {}", conn.id());
            return;
        }

        let player = Player {
            name: display_name(name),
            lives: self.config.lives_per_player,
        };
        tracing::info!("Player joined: {}", player.name);
        inner.roster.push(conn, player);

        self.broadcast_lobby(&mut inner);

        if inner.phase == GamePhase::Lobby
            && self.config.start_mode == StartMode::Auto
            && inner.roster.len() >= self.config.min_players_to_start
        {
            self.start_game(&mut inner);
        }
    }

    /// Record a start vote. The game starts once everybody seated has voted.
    pub async fn vote_start(&self, conn: &Connection) {
        let mut inner = self.inner.lock().await;

        if inner.phase != GamePhase::Lobby
            || self.config.start_mode != StartMode::Vote
            || !inner.roster.contains(conn.id())
            || inner.roster.len() < self.config.min_players_to_start
        {
            return;
        }

        inner.start_votes.insert(conn.id().clone());
        tracing::info!(
            "Start vote {}/{}",
            inner.start_votes.len(),
            inner.roster.len()
        );
        self.broadcast_lobby(&mut inner);

        if !inner.roster.is_empty() && inner.start_votes.len() == inner.roster.len() {
            self.start_game(&mut inner);
        }
    }

    pub(super) fn broadcast_lobby(&self, inner: &mut Inner) {
        let msg = ServerMessage::Lobby {
            count: inner.roster.len(),
            players: inner.roster.names(),
            start_votes: voter_names(inner),
        };
        self.broadcast(inner, msg);
    }

    pub(super) fn start_game(&self, inner: &mut Inner) {
        tracing::info!("Starting game with {} players", inner.roster.len());
        inner.phase = GamePhase::Active;
        inner.start_votes.clear();
        inner.roster.reset_turn();
        self.start_turn(inner);
    }
}
