//! Game and server configuration
//!
//! Everything is read from `BOMBPARTY_*` environment variables (a `.env`
//! file is loaded by `main` first). Values that fail to parse fall back to
//! their default, values out of range are clamped, so the game itself never
//! has to validate its configuration.

use crate::types::StartMode;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

/// Longest bomb fuse accepted from configuration
const MAX_TIMER_SECONDS: u64 = 86_400;

/// Longest pause between turns accepted from configuration
const MAX_TRANSITION_DELAY_SECONDS: f64 = 3_600.0;

/// Rules of the game, consumed by [`crate::state::GameState`]
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub lives_per_player: u32,
    pub timer_min_seconds: u64,
    pub timer_max_seconds: u64,
    /// Pause between an explosion and the next turn
    pub turn_transition_delay_seconds: f64,
    pub start_mode: StartMode,
    pub min_players_to_start: usize,
    /// Fold accents when comparing answers (é == e)
    pub normalize_spellings: bool,
    /// Send the accepted answers alongside every new clue
    pub reveal_answers_with_clue: bool,
    /// End the game as soon as a single player is left standing
    pub end_on_last_player: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lives_per_player: 3,
            timer_min_seconds: 20,
            timer_max_seconds: 30,
            turn_transition_delay_seconds: 2.5,
            start_mode: StartMode::Vote,
            min_players_to_start: 1,
            normalize_spellings: true,
            reveal_answers_with_clue: true,
            end_on_last_player: false,
        }
    }
}

impl GameConfig {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            lives_per_player: env_parse("BOMBPARTY_LIVES_PER_PLAYER", defaults.lives_per_player),
            timer_min_seconds: env_parse("BOMBPARTY_TIMER_MIN_SECONDS", defaults.timer_min_seconds),
            timer_max_seconds: env_parse("BOMBPARTY_TIMER_MAX_SECONDS", defaults.timer_max_seconds),
            turn_transition_delay_seconds: env_parse(
                "BOMBPARTY_TURN_TRANSITION_DELAY_SECONDS",
                defaults.turn_transition_delay_seconds,
            ),
            start_mode: std::env::var("BOMBPARTY_START_MODE")
                .ok()
                .and_then(|v| StartMode::parse(&v))
                .unwrap_or(defaults.start_mode),
            min_players_to_start: env_parse(
                "BOMBPARTY_MIN_PLAYERS_TO_START",
                defaults.min_players_to_start,
            ),
            normalize_spellings: env_bool(
                "BOMBPARTY_NORMALIZE_SPELLINGS",
                defaults.normalize_spellings,
            ),
            reveal_answers_with_clue: env_bool(
                "BOMBPARTY_REVEAL_ANSWERS",
                defaults.reveal_answers_with_clue,
            ),
            end_on_last_player: env_bool(
                "BOMBPARTY_END_ON_LAST_PLAYER",
                defaults.end_on_last_player,
            ),
        }
        .clamped()
    }

    /// Pull every value back into its valid range
    pub fn clamped(mut self) -> Self {
        self.lives_per_player = self.lives_per_player.max(1);
        self.timer_min_seconds = self.timer_min_seconds.clamp(1, MAX_TIMER_SECONDS);
        self.timer_max_seconds = self
            .timer_max_seconds
            .clamp(self.timer_min_seconds, MAX_TIMER_SECONDS);
        self.turn_transition_delay_seconds = if self.turn_transition_delay_seconds.is_finite() {
            self.turn_transition_delay_seconds
                .clamp(0.0, MAX_TRANSITION_DELAY_SECONDS)
        } else {
            0.0
        };
        self.min_players_to_start = self.min_players_to_start.max(1);
        self
    }
}

/// Process-level settings for the HTTP/WebSocket server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub dictionary_file: PathBuf,
    pub static_dir: PathBuf,
    pub game: GameConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = env_parse("BOMBPARTY_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = env_parse("BOMBPARTY_PORT", 8765u16);

        Self {
            bind: SocketAddr::new(host, port),
            dictionary_file: std::env::var("BOMBPARTY_DICTIONARY")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/spelling_dict.json")),
            static_dir: std::env::var("BOMBPARTY_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            game: GameConfig::from_env(),
        }
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
