//! Error types for turn events and their configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::field::FieldType;

/// Failures a turn event can run into. None of these abort a turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnEventError {
    /// The host returned the invalid-object sentinel from `create_field`.
    #[error("turn {turn}: host refused to create {field_type} field")]
    FieldCreationFailed { turn: u32, field_type: FieldType },
}

/// Errors raised while loading or validating a [`SpawnConfig`](crate::config::SpawnConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read spawn config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse spawn config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid spawn config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
