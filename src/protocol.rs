use crate::types::PlayerSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    Join {
        #[serde(default)]
        name: String,
    },
    Submit {
        #[serde(default)]
        answer: String,
    },
    /// Accepted on the wire, has no effect on the game
    Pass,
    Typing {
        #[serde(default)]
        text: String,
    },
    VoteStart,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "LOBBY", rename_all = "camelCase")]
    Lobby {
        count: usize,
        players: Vec<String>,
        /// Names of the players who voted to start, in roster order
        start_votes: Vec<String>,
    },
    #[serde(rename = "NEW_TURN", rename_all = "camelCase")]
    NewTurn {
        question: String,
        active_player: String,
        players: Vec<PlayerSnapshot>,
        /// Accepted answers for `question` (the name is kept for client compatibility)
        previous_answers: Vec<String>,
        previous_question: String,
        previous_question_answers: Vec<String>,
    },
    Valid {
        answer: String,
    },
    /// Sent only to the player whose answer was rejected
    Invalid,
    #[serde(rename = "TYPING")]
    Typing {
        player: String,
        text: String,
    },
    #[serde(rename = "EXPLODE")]
    Explode {
        player: String,
        eliminated: bool,
    },
    #[serde(rename = "GAME_OVER")]
    GameOver {
        winner: String,
    },
}
