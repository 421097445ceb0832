//! Turn events for the space strategy simulation host.
//!
//! The host calls [`FieldSpawner::run`] once per turn. The spawner may ask
//! the host, through the [`UniverseHost`] trait, to create a molecular cloud
//! or ion storm just outside the edge of the universe.

pub mod config;
pub mod error;
pub mod field;
pub mod session;
pub mod spawner;
pub mod universe;

pub use config::SpawnConfig;
pub use error::{ConfigError, TurnEventError};
pub use field::{FieldSpec, FieldType, UnknownFieldType};
pub use session::{
    run_session, run_session_with, tally_session, SessionReport, SpawnTally, TurnSummary,
};
pub use spawner::{FieldSpawner, TurnOutcome};
pub use universe::{ObjectId, Position, TurnDriver, UniverseHost};

/// Re-export so hosts and callers can name the random source type.
pub use rand::RngCore;
