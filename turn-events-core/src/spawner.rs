//! The per-turn field spawner.
//!
//! Once per turn the spawner rolls against a width-derived probability and,
//! on success, asks the host to drop a molecular cloud or an ion storm on a
//! ring just outside the universe's square extent.

use std::f64::consts::TAU;

use rand::{Rng, RngCore};
use tracing::{debug, error, info};

use crate::config::SpawnConfig;
use crate::error::{ConfigError, TurnEventError};
use crate::field::{FieldSpec, FieldType};
use crate::universe::{ObjectId, Position, UniverseHost};

/// What happened during one invocation of the spawner.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The spawn roll failed; the host was not contacted.
    Quiet,
    /// The host created the requested field.
    Spawned {
        object: ObjectId,
        spec: FieldSpec,
        position: Position,
    },
    /// A spawn was attempted but the host returned the invalid sentinel.
    Failed {
        error: TurnEventError,
        spec: FieldSpec,
        position: Position,
    },
}

impl TurnOutcome {
    pub fn is_quiet(&self) -> bool {
        matches!(self, TurnOutcome::Quiet)
    }

    /// The field that was requested, if a spawn was attempted.
    pub fn spec(&self) -> Option<&FieldSpec> {
        match self {
            TurnOutcome::Quiet => None,
            TurnOutcome::Spawned { spec, .. } | TurnOutcome::Failed { spec, .. } => Some(spec),
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            TurnOutcome::Quiet => None,
            TurnOutcome::Spawned { position, .. } | TurnOutcome::Failed { position, .. } => {
                Some(*position)
            }
        }
    }
}

/// Stateless turn event that spawns fields near the universe center.
#[derive(Debug, Clone, Default)]
pub struct FieldSpawner {
    config: SpawnConfig,
}

impl FieldSpawner {
    pub fn new(config: SpawnConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Chance of spawning a field this turn for a universe of `width`.
    ///
    /// Grows linearly with width and never drops below the configured floor.
    pub fn spawn_probability(&self, width: f64) -> f64 {
        (self.config.rate_per_thousand_width * width / 1000.0).max(self.config.min_probability)
    }

    /// Pick the field type and size for a uniform draw in [0, 1).
    pub fn choose_field(&self, draw: f64) -> FieldSpec {
        if draw < self.config.molecular_cloud_chance {
            FieldSpec {
                field_type: FieldType::MolecularCloud,
                size: self.config.molecular_cloud_size,
            }
        } else {
            FieldSpec {
                field_type: FieldType::IonStorm,
                size: self.config.ion_storm_size,
            }
        }
    }

    /// Point on the spawn ring around the center of a square universe.
    ///
    /// The ring radius is `width / 2 + ring_offset + jitter`; `angle` is
    /// measured with `sin` on the x axis and `cos` on the y axis.
    pub fn ring_position(&self, width: f64, angle: f64, jitter: f64) -> Position {
        let center = width / 2.0;
        let radius = center + self.config.ring_offset + jitter;
        Position::new(center + radius * angle.sin(), center + radius * angle.cos())
    }

    /// Run the turn event and report what happened.
    ///
    /// Draws from `rng` in a fixed order: spawn roll, field roll, angle,
    /// jitter. A quiet turn consumes only the spawn roll.
    pub fn execute<H>(&self, universe: &mut H, rng: &mut dyn RngCore) -> TurnOutcome
    where
        H: UniverseHost + ?Sized,
    {
        let turn = universe.current_turn();
        info!("Executing turn events for turn {}", turn);

        let width = universe.universe_width();
        let probability = self.spawn_probability(width);
        let roll: f64 = rng.gen();
        debug!(turn, width, probability, roll, "field spawn roll");
        if roll >= probability {
            return TurnOutcome::Quiet;
        }

        let spec = self.choose_field(rng.gen());
        let angle = rng.gen::<f64>() * TAU;
        let jitter = rng.gen::<f64>() * self.config.ring_jitter;
        let position = self.ring_position(width, angle, jitter);

        info!(
            "...creating new {} field at: {} / {}",
            spec.field_type, position.x, position.y
        );
        let object = universe.create_field(spec.field_type, position.x, position.y, spec.size);
        if object == universe.invalid_object() {
            let error = TurnEventError::FieldCreationFailed {
                turn,
                field_type: spec.field_type,
            };
            error!(%error, "Turn events: couldn't create new field");
            return TurnOutcome::Failed {
                error,
                spec,
                position,
            };
        }

        debug!(%object, size = spec.size, "field created");
        TurnOutcome::Spawned {
            object,
            spec,
            position,
        }
    }

    /// Host-facing entry point. Always reports completion, whether or not a
    /// field was created.
    pub fn run<H>(&self, universe: &mut H, rng: &mut dyn RngCore) -> bool
    where
        H: UniverseHost + ?Sized,
    {
        self.execute(universe, rng);
        true
    }
}
