//! In-memory universe host for driving turn events outside the game.
//!
//! [`SandboxUniverse`] implements [`UniverseHost`] and [`TurnDriver`] with the
//! same field-creation rules as the game host, and records every field it
//! creates so callers can inspect or serialize the result.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{error, warn};
use turn_events_core::{FieldType, ObjectId, Position, TurnDriver, UniverseHost};

/// Smallest field size the sandbox accepts before clamping.
pub const MIN_FIELD_SIZE: f64 = 1.0;
/// Largest field size the sandbox accepts before clamping.
pub const MAX_FIELD_SIZE: f64 = 10_000.0;

/// A field living in the sandbox universe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Identifier handed back from `create_field`.
    pub id: ObjectId,
    pub field_type: FieldType,
    /// Player-facing name, taken from the field type.
    pub name: String,
    pub position: Position,
    /// Size after clamping into [`MIN_FIELD_SIZE`, `MAX_FIELD_SIZE`].
    pub size: f64,
    /// Turn on which the field was created.
    pub created_turn: u32,
}

/// Serializable view of the sandbox at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SandboxSnapshot {
    /// Current turn.
    pub turn: u32,
    /// Universe width.
    pub width: f64,
    /// Every field created so far, oldest first.
    pub fields: Vec<Field>,
    /// Number of creation requests that returned the invalid sentinel.
    pub rejected_requests: u32,
}

/// In-memory universe that stands in for the real simulation host.
///
/// It keeps the host's field-creation rules (known field types only, sizes
/// clamped into range) and otherwise just records what was asked of it.
#[derive(Debug, Clone)]
pub struct SandboxUniverse {
    width: f64,
    turn: u32,
    next_id: i32,
    field_types: HashSet<FieldType>,
    capacity: Option<usize>,
    reject_all: bool,
    fields: Vec<Field>,
    rejected_requests: u32,
}

impl SandboxUniverse {
    /// A fresh universe of the given width, on turn 1, that knows every field type.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            turn: 1,
            next_id: 0,
            field_types: FieldType::ALL.into_iter().collect(),
            capacity: None,
            reject_all: false,
            fields: Vec::new(),
            rejected_requests: 0,
        }
    }

    /// Start the sandbox on `turn` instead of turn 1.
    pub fn with_turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    /// Restrict the field types the sandbox can create.
    pub fn with_field_types(mut self, field_types: impl IntoIterator<Item = FieldType>) -> Self {
        self.field_types = field_types.into_iter().collect();
        self
    }

    /// Cap the number of fields; requests beyond the cap are rejected.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Refuse every creation request.
    pub fn rejecting_all(mut self) -> Self {
        self.reject_all = true;
        self
    }

    /// Fields created so far, oldest first.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look a field up by the id `create_field` returned.
    pub fn field(&self, id: ObjectId) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Number of fields created so far.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of creation requests that were refused.
    pub fn rejected_requests(&self) -> u32 {
        self.rejected_requests
    }

    /// Copy of the current state, ready for serialization.
    pub fn snapshot(&self) -> SandboxSnapshot {
        SandboxSnapshot {
            turn: self.turn,
            width: self.width,
            fields: self.fields.clone(),
            rejected_requests: self.rejected_requests,
        }
    }

    fn reject(&mut self) -> ObjectId {
        self.rejected_requests += 1;
        ObjectId::INVALID
    }
}

impl UniverseHost for SandboxUniverse {
    fn current_turn(&self) -> u32 {
        self.turn
    }

    fn universe_width(&self) -> f64 {
        self.width
    }

    fn create_field(&mut self, field_type: FieldType, x: f64, y: f64, size: f64) -> ObjectId {
        if self.reject_all {
            error!(%field_type, "sandbox is rejecting all field creation");
            return self.reject();
        }
        if !self.field_types.contains(&field_type) {
            error!(%field_type, "couldn't get field type");
            return self.reject();
        }
        if self
            .capacity
            .is_some_and(|capacity| self.fields.len() >= capacity)
        {
            error!(%field_type, fields = self.fields.len(), "sandbox field capacity reached");
            return self.reject();
        }

        let size = if size.is_nan() {
            warn!(size, "field size is not a number, resetting to {MIN_FIELD_SIZE}");
            MIN_FIELD_SIZE
        } else if size < MIN_FIELD_SIZE {
            warn!(size, "very small / negative field size, resetting to {MIN_FIELD_SIZE}");
            MIN_FIELD_SIZE
        } else if size > MAX_FIELD_SIZE {
            warn!(size, "very large field size, resetting to {MAX_FIELD_SIZE}");
            MAX_FIELD_SIZE
        } else {
            size
        };

        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.fields.push(Field {
            id,
            field_type,
            name: field_type.display_name().to_string(),
            position: Position::new(x, y),
            size,
            created_turn: self.turn,
        });
        id
    }
}

impl TurnDriver for SandboxUniverse {
    fn advance_turn(&mut self) {
        self.turn += 1;
    }
}
