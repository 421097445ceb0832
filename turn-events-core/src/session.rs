//! Multi-turn driver for running the spawner against a host.

use rand::RngCore;
use serde::Serialize;

use crate::field::FieldType;
use crate::spawner::{FieldSpawner, TurnOutcome};
use crate::universe::TurnDriver;

/// Counts of what the spawner did across one or more turns.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpawnTally {
    /// Turns where the spawn roll failed.
    pub quiet: u32,
    /// Molecular clouds the host created.
    pub molecular_clouds: u32,
    /// Ion storms the host created.
    pub ion_storms: u32,
    /// Spawns the host refused.
    pub failures: u32,
}

impl SpawnTally {
    pub fn record(&mut self, outcome: &TurnOutcome) {
        match outcome {
            TurnOutcome::Quiet => self.quiet += 1,
            TurnOutcome::Spawned { spec, .. } => match spec.field_type {
                FieldType::MolecularCloud => self.molecular_clouds += 1,
                FieldType::IonStorm => self.ion_storms += 1,
            },
            TurnOutcome::Failed { .. } => self.failures += 1,
        }
    }

    pub fn merge(&mut self, other: &SpawnTally) {
        self.quiet += other.quiet;
        self.molecular_clouds += other.molecular_clouds;
        self.ion_storms += other.ion_storms;
        self.failures += other.failures;
    }

    /// Fields the host actually created.
    pub fn spawned(&self) -> u32 {
        self.molecular_clouds + self.ion_storms
    }

    pub fn turns(&self) -> u32 {
        self.quiet + self.spawned() + self.failures
    }

    pub fn describe(&self) -> String {
        format!(
            "quiet: {}, molecular clouds: {}, ion storms: {}, failed: {}",
            self.quiet, self.molecular_clouds, self.ion_storms, self.failures
        )
    }
}

/// One turn's result, tagged with the turn it ran on.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnSummary {
    /// Turn the spawner ran on.
    pub turn: u32,
    /// What the spawner did that turn.
    pub outcome: TurnOutcome,
}

/// Everything that happened over a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    /// Every turn in the order it ran.
    pub turns: Vec<TurnSummary>,
    /// Totals across all turns.
    pub tally: SpawnTally,
}

/// Run the spawner once per turn for `turns` turns, advancing the host after
/// each one, and keep every turn's outcome.
pub fn run_session<H>(
    host: &mut H,
    spawner: &FieldSpawner,
    turns: u32,
    rng: &mut dyn RngCore,
) -> SessionReport
where
    H: TurnDriver + ?Sized,
{
    let mut summaries = Vec::new();
    let tally = run_session_with(host, spawner, turns, rng, |summary| summaries.push(summary));

    SessionReport {
        turns: summaries,
        tally,
    }
}

/// Like [`run_session`], but hands each turn to `on_turn` instead of
/// storing it. Only the tally is kept.
pub fn run_session_with<H, F>(
    host: &mut H,
    spawner: &FieldSpawner,
    turns: u32,
    rng: &mut dyn RngCore,
    mut on_turn: F,
) -> SpawnTally
where
    H: TurnDriver + ?Sized,
    F: FnMut(TurnSummary),
{
    let mut tally = SpawnTally::default();

    for _ in 0..turns {
        let turn = host.current_turn();
        let outcome = spawner.execute(host, rng);
        tally.record(&outcome);
        on_turn(TurnSummary { turn, outcome });
        host.advance_turn();
    }

    tally
}

/// Run a session and keep nothing but the tally.
pub fn tally_session<H>(
    host: &mut H,
    spawner: &FieldSpawner,
    turns: u32,
    rng: &mut dyn RngCore,
) -> SpawnTally
where
    H: TurnDriver + ?Sized,
{
    run_session_with(host, spawner, turns, rng, |_| {})
}
