//! Error types for the movement core and its file surfaces.

use std::fmt;

use crate::collision::ColliderHandle;
use crate::position::Position;

/// Errors raised by the crate. Gameplay outcomes (blocked moves, missing
/// hits) are not errors and never show up here.
#[derive(Debug)]
pub enum GameError {
    /// A move was requested while the actor was still sliding.
    SlideInProgress {
        /// Collider of the actor that was asked to move.
        collider: ColliderHandle,
        /// Where the in-flight slide is heading.
        dest: Position,
    },
    /// A level layout could not be parsed.
    Layout(String),
    /// Reading or writing a file failed.
    Io(std::io::Error),
    /// The configuration file is not valid TOML for `Config`.
    Config(toml::de::Error),
    /// A configuration value parsed but is out of range.
    Setting(String),
    /// A turn log could not be encoded or decoded.
    Json(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::SlideInProgress { collider, dest } => write!(
                f,
                "collider {} is still sliding to ({:.2}, {:.2})",
                collider.0, dest.x, dest.y
            ),
            GameError::Layout(msg) => write!(f, "invalid level layout: {msg}"),
            GameError::Io(e) => write!(f, "i/o error: {e}"),
            GameError::Config(e) => write!(f, "config error: {e}"),
            GameError::Setting(msg) => write!(f, "invalid setting: {msg}"),
            GameError::Json(e) => write!(f, "turn log error: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Config(e) => Some(e),
            GameError::Json(e) => Some(e),
            GameError::SlideInProgress { .. } | GameError::Layout(_) | GameError::Setting(_) => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<toml::de::Error> for GameError {
    fn from(e: toml::de::Error) -> Self {
        GameError::Config(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Json(e)
    }
}

/// Result alias used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;
