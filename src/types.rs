//! Common types used throughout the nearby-bot.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of a chat, as supplied by Telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A latitude/longitude pair. Ranges are not validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A place returned by the places provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Place {
    pub name: String,
}

/// Commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Command {
    #[strum(serialize = "/start")]
    Start,
}

/// An inbound message after it has been classified at the transport boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Command(Command),
    Location(Coordinates),
    Text(String),
}

/// Role of a message in a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the human user
    User,
    /// Role on completion responses
    Assistant,
    /// System prompt or instructions
    System,
}

/// What a non-location question does while no query is pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum FallbackMode {
    /// Ask the language model and relay its answer.
    #[default]
    Answer,
    /// Reply with a fixed hint about what the bot can do.
    Hint,
}
