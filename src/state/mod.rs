//! Authoritative game state
//!
//! Every public operation and every timer callback takes the single game
//! lock for its whole critical section, broadcasts included, so all players
//! observe state changes in exactly the order they happened.

mod lobby;
mod roster;
mod timer;
mod turn;

pub use roster::Roster;

use crate::broadcast::deliver;
use crate::config::GameConfig;
use crate::connection::Connection;
use crate::dictionary::ClueDictionary;
use crate::protocol::ServerMessage;
use crate::types::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use timer::Timer;
use tokio::sync::Mutex;

/// Shared handle to one game. Cloning is cheap and every clone drives the
/// same game.
#[derive(Clone)]
pub struct GameState {
    inner: Arc<Mutex<Inner>>,
    dictionary: Arc<ClueDictionary>,
    config: Arc<GameConfig>,
}

struct Inner {
    phase: GamePhase,
    roster: Roster,
    start_votes: HashSet<ConnectionId>,
    round: Round,
    /// The bomb. At most one is live.
    countdown: Option<Timer>,
    /// Pause between an explosion and the next turn
    transition: Option<Timer>,
    generation: u64,
}

impl Inner {
    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

#[derive(Debug, Default)]
struct Round {
    question: String,
    answers: Vec<String>,
    previous_question: String,
    previous_answers: Vec<String>,
}

impl Round {
    /// Install a new clue, keeping the current one as "previous"
    fn rotate(&mut self, question: String, answers: Vec<String>) {
        if !self.question.is_empty() {
            self.previous_question = std::mem::take(&mut self.question);
            self.previous_answers = std::mem::take(&mut self.answers);
        }
        self.question = question;
        self.answers = answers;
    }
}

/// Point-in-time copy of the game, for diagnostics and tests
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub current_turn: usize,
    pub active_player: Option<String>,
    pub players: Vec<PlayerSnapshot>,
    pub start_votes: Vec<String>,
    pub question: String,
    pub answers: Vec<String>,
    pub previous_question: String,
    /// Time left on the bomb, `None` when unarmed
    pub countdown: Option<Duration>,
    pub transition_pending: bool,
}

/// What `detach_player` took out of the roster
struct Detached {
    name: String,
    was_active: bool,
}

impl GameState {
    pub fn new(dictionary: ClueDictionary, config: GameConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                phase: GamePhase::Lobby,
                roster: Roster::new(),
                start_votes: HashSet::new(),
                round: Round::default(),
                countdown: None,
                transition: None,
                generation: 0,
            })),
            dictionary: Arc::new(dictionary),
            config: Arc::new(config.clamped()),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        let inner = self.inner.lock().await;
        let active_player = inner
            .roster
            .active()
            .and_then(|c| inner.roster.get(c.id()))
            .map(|p| p.name.clone());

        GameSnapshot {
            phase: inner.phase,
            current_turn: inner.roster.current(),
            active_player,
            players: inner.roster.iter().map(|(_, p)| PlayerSnapshot::from(p)).collect(),
            start_votes: voter_names(&inner),
            question: inner.round.question.clone(),
            answers: inner.round.answers.clone(),
            previous_question: inner.round.previous_question.clone(),
            countdown: inner.countdown.as_ref().map(Timer::remaining),
            transition_pending: inner.transition.is_some(),
        }
    }

    /// Disconnect. Hands the turn on if the leaving player held the bomb.
    pub async fn remove_player(&self, conn: &Connection) {
        let mut inner = self.inner.lock().await;

        let Some(removed) = self.detach_player(&mut inner, conn.id()) else {
            return;
        };
        tracing::info!("Player left: {}", removed.name);

        if removed.was_active && inner.phase == GamePhase::Active {
            self.start_turn(&mut inner);
        }

        if !inner.roster.is_empty() {
            self.broadcast_lobby(&mut inner);
        }
    }

    /// Take a player out of the roster with the lock already held. Ends the
    /// game when nobody (or, with `end_on_last_player`, one player) is left.
    fn detach_player(&self, inner: &mut Inner, id: &ConnectionId) -> Option<Detached> {
        let was_active = inner.phase == GamePhase::Active && inner.roster.is_active(id);
        let (_, _, player) = inner.roster.remove(id)?;
        inner.start_votes.remove(id);

        if inner.phase == GamePhase::Active {
            let remaining = inner.roster.len();
            if remaining == 0 || (self.config.end_on_last_player && remaining == 1) {
                self.end_game(inner);
            }
        }

        Some(Detached {
            name: player.name,
            was_active,
        })
    }

    /// Send to every player. Unreachable players are dropped from the game
    /// before the lock is released.
    fn broadcast(&self, inner: &mut Inner, msg: ServerMessage) {
        let failed = deliver(&msg, inner.roster.connections());
        self.drop_unreachable(inner, failed);
    }

    fn drop_unreachable(&self, inner: &mut Inner, failed: Vec<ConnectionId>) {
        for id in failed {
            if let Some(removed) = self.detach_player(inner, &id) {
                tracing::info!("Removed disconnected player: {}", removed.name);
            }
        }
    }
}

fn voter_names(inner: &Inner) -> Vec<String> {
    inner
        .roster
        .iter()
        .filter(|(c, _)| inner.start_votes.contains(c.id()))
        .map(|(_, p)| p.name.clone())
        .collect()
}
