//! The host side of a turn: what the simulation exposes to turn events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::FieldType;

/// Identifier of an object owned by the host simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub i32);

impl ObjectId {
    /// Sentinel the host hands back when it could not create an object.
    pub const INVALID: ObjectId = ObjectId(-1);

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point in the universe's 2-D coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// View into the host simulation that turn events query and command.
///
/// The host owns all universe state. Implementors only need to answer the
/// two queries and accept field-creation requests; failures are signalled
/// by returning the [`invalid_object`](UniverseHost::invalid_object)
/// sentinel rather than an error.
pub trait UniverseHost {
    /// Turn currently being processed.
    fn current_turn(&self) -> u32;

    /// Linear extent of the (square) universe, in game distance units.
    fn universe_width(&self) -> f64;

    /// Ask the host to create a field. Returns the sentinel on failure.
    fn create_field(&mut self, field_type: FieldType, x: f64, y: f64, size: f64) -> ObjectId;

    /// Value `create_field` returns when it fails.
    fn invalid_object(&self) -> ObjectId {
        ObjectId::INVALID
    }
}

/// A host that can also move the simulation on to the next turn.
pub trait TurnDriver: UniverseHost {
    fn advance_turn(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_sentinel_is_not_valid() {
        assert!(!ObjectId::INVALID.is_valid());
        assert!(ObjectId(0).is_valid());
        assert_eq!(ObjectId(7).to_string(), "#7");
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
    }
}
