use thiserror::Error;

use crate::registry::EntityKind;

/// Failures raised while assembling or driving a game session.
#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error("entity `{0}` is already registered")]
    DuplicateEntity(String),
    #[error("world has no {0} entity")]
    MissingEntity(EntityKind),
    #[error("unknown entity kind `{0}`")]
    UnknownKind(String),
    #[error("setting `{name}` must be a finite, non-negative number (got {value})")]
    InvalidSetting { name: &'static str, value: f32 },
    #[error("invalid session step `{step}`: {reason}")]
    InvalidStep { step: String, reason: String },
}
