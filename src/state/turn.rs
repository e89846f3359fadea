use super::timer::{self, Timer};
use super::{GameState, Inner};
use crate::broadcast::deliver;
use crate::connection::Connection;
use crate::normalize::normalize_answer;
use crate::protocol::ServerMessage;
use crate::types::*;
use rand::Rng;
use std::time::Duration;

impl GameState {
    /// Check an answer from the player holding the bomb.
    ///
    /// A hit passes the turn on without touching the bomb; a miss shortens
    /// it and tells only the submitter.
    pub async fn submit_answer(&self, conn: &Connection, text: &str) {
        let mut inner = self.inner.lock().await;

        if inner.phase != GamePhase::Active || !inner.roster.is_active(conn.id()) {
            return;
        }

        let fold = self.config.normalize_spellings;
        let answer = normalize_answer(text, fold);
        let accepted = inner
            .round
            .answers
            .iter()
            .any(|a| normalize_answer(a, fold) == answer);

        if accepted {
            tracing::info!("Valid answer for {}: {}", inner.round.question, answer);
            self.broadcast(&mut inner, ServerMessage::Valid { answer });
            inner.roster.advance();
            self.start_turn(&mut inner);
        } else {
            self.reduce_countdown(&mut inner);
            if let Err(e) = conn.send(ServerMessage::Invalid) {
                tracing::debug!("Could not send Invalid: {}", e);
            }
        }
    }

    /// Relay what the active player is typing to everybody else
    pub async fn broadcast_typing(&self, conn: &Connection, text: &str) {
        let mut inner = self.inner.lock().await;

        if inner.phase != GamePhase::Active || !inner.roster.is_active(conn.id()) {
            return;
        }
        let Some(player) = inner.roster.get(conn.id()) else {
            return;
        };

        let msg = ServerMessage::Typing {
            player: player.name.clone(),
            text: text.to_string(),
        };
        let failed = deliver(&msg, inner.roster.connections().filter(|c| *c != conn));
        self.drop_unreachable(&mut inner, failed);
    }

    /// Passing is not part of the rules; the message is accepted and ignored
    pub async fn pass_turn(&self, conn: &Connection) {
        tracing::debug!("Ignoring pass from {}", conn.id());
    }

    /// Draw a new clue for the active player and arm the bomb if it isn't
    /// already ticking.
    pub(super) fn start_turn(&self, inner: &mut Inner) {
        if inner.phase != GamePhase::Active || inner.roster.is_empty() {
            return;
        }
        if let Some(pending) = inner.transition.take() {
            pending.cancel();
        }

        let question = self.dictionary.random_clue(&mut rand::rng()).to_string();
        let answers = self.dictionary.answers(&question).to_vec();
        inner.round.rotate(question, answers);

        let Some(active_player) = inner
            .roster
            .active()
            .and_then(|c| inner.roster.get(c.id()))
            .map(|p| p.name.clone())
        else {
            return;
        };

        if inner.countdown.is_none() {
            let seconds = rand::rng()
                .random_range(self.config.timer_min_seconds..=self.config.timer_max_seconds);
            tracing::debug!("Bomb armed for {}s", seconds);
            self.arm_countdown(inner, Duration::from_secs(seconds));
        }

        let previous_answers = if self.config.reveal_answers_with_clue {
            inner.round.answers.clone()
        } else {
            Vec::new()
        };
        let msg = ServerMessage::NewTurn {
            question: inner.round.question.clone(),
            active_player,
            players: inner.roster.iter().map(|(_, p)| PlayerSnapshot::from(p)).collect(),
            previous_answers,
            previous_question: inner.round.previous_question.clone(),
            previous_question_answers: inner.round.previous_answers.clone(),
        };
        self.broadcast(inner, msg);
    }

    pub(super) fn end_game(&self, inner: &mut Inner) {
        if let Some(countdown) = inner.countdown.take() {
            countdown.cancel();
        }
        if let Some(pending) = inner.transition.take() {
            pending.cancel();
        }
        inner.phase = GamePhase::Lobby;
        inner.round = Default::default();

        let lives = self.config.lives_per_player;
        let ids: Vec<ConnectionId> = inner.roster.connections().map(|c| c.id().clone()).collect();
        for id in &ids {
            if let Some(player) = inner.roster.get_mut(id) {
                player.lives = lives;
            }
        }

        // First seat in the roster wins, whoever is left
        let winner = inner.roster.iter().next().map(|(_, p)| p.name.clone());
        match winner {
            Some(winner) => {
                tracing::info!("Game over, winner: {}", winner);
                self.broadcast(inner, ServerMessage::GameOver { winner });
            }
            None => tracing::info!("Game over, no players left"),
        }
    }

    /// Knock the penalty off the live bomb, never below the minimum
    fn reduce_countdown(&self, inner: &mut Inner) {
        let Some(countdown) = inner.countdown.take() else {
            return;
        };
        let remaining = timer::reduced(countdown.remaining());
        countdown.cancel();
        tracing::debug!("Bomb reduced to {:?}", remaining);
        self.arm_countdown(inner, remaining);
    }

    fn arm_countdown(&self, inner: &mut Inner, duration: Duration) {
        debug_assert!(inner.countdown.is_none(), "only one bomb may be live");
        let generation = inner.next_generation();
        let game = self.clone();
        inner.countdown = Some(Timer::schedule(
            generation,
            duration,
            move |generation| async move { game.handle_timeout(generation).await },
        ));
    }

    /// The bomb went off in the active player's hands
    async fn handle_timeout(&self, generation: u64) {
        let mut inner = self.inner.lock().await;

        match &inner.countdown {
            Some(countdown) if countdown.generation() == generation => {}
            _ => {
                tracing::debug!("Ignoring stale countdown {}", generation);
                return;
            }
        }
        // Our own task: drop the handle, don't abort it
        inner.countdown = None;

        if inner.phase != GamePhase::Active {
            return;
        }
        let Some(id) = inner.roster.active().map(|c| c.id().clone()) else {
            return;
        };
        let Some(player) = inner.roster.get_mut(&id) else {
            return;
        };
        player.lives = player.lives.saturating_sub(1);
        let name = player.name.clone();
        let eliminated = player.lives == 0;

        if eliminated {
            tracing::info!("{} exploded and is out", name);
            self.broadcast(
                &mut inner,
                ServerMessage::Explode {
                    player: name,
                    eliminated: true,
                },
            );
            self.detach_player(&mut inner, &id);
        } else {
            tracing::info!("{} exploded", name);
            self.broadcast(
                &mut inner,
                ServerMessage::Explode {
                    player: name,
                    eliminated: false,
                },
            );
            inner.roster.advance();
        }

        if inner.phase == GamePhase::Active {
            self.schedule_transition(&mut inner);
        }
    }

    fn schedule_transition(&self, inner: &mut Inner) {
        if let Some(pending) = inner.transition.take() {
            pending.cancel();
        }
        let generation = inner.next_generation();
        let delay = Duration::from_secs_f64(self.config.turn_transition_delay_seconds);
        let game = self.clone();
        inner.transition = Some(Timer::schedule(
            generation,
            delay,
            move |generation| async move { game.run_transition(generation).await },
        ));
    }

    async fn run_transition(&self, generation: u64) {
        let mut inner = self.inner.lock().await;

        match inner.transition.take() {
            Some(pending) if pending.generation() == generation => {}
            other => {
                inner.transition = other;
                return;
            }
        }

        if inner.phase == GamePhase::Active {
            self.start_turn(&mut inner);
        }
    }
}
