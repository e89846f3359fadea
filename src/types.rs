use serde::{Deserialize, Serialize};

/// Opaque identity of a live player connection
pub type ConnectionId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Lobby,
    Active,
}

/// How a lobby turns into a running game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    /// Every player in the lobby has to vote
    Vote,
    /// Starts as soon as enough players have joined
    Auto,
}

impl StartMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "vote" => Some(StartMode::Vote),
            "auto" => Some(StartMode::Auto),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub lives: u32,
}

/// Name and remaining lives, as shown to every client on a new turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub name: String,
    pub lives: u32,
}

impl From<&Player> for PlayerSnapshot {
    fn from(p: &Player) -> Self {
        Self {
            name: p.name.clone(),
            lives: p.lives,
        }
    }
}
