// Public API for integration tests and potential library usage

pub mod broadcast;
pub mod config;
pub mod connection;
pub mod dictionary;
pub mod normalize;
pub mod protocol;
pub mod state;
pub mod types;
pub mod ws;
