//! Field types that turn events can spawn into the universe.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kinds of transient map fields the turn events know how to spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "FLD_MOLECULAR_CLOUD")]
    MolecularCloud,
    #[serde(rename = "FLD_ION_STORM")]
    IonStorm,
}

impl FieldType {
    /// Every field type, in declaration order.
    pub const ALL: [FieldType; 2] = [FieldType::MolecularCloud, FieldType::IonStorm];

    /// Content name the host uses to look the field type up.
    pub fn content_name(&self) -> &'static str {
        match self {
            FieldType::MolecularCloud => "FLD_MOLECULAR_CLOUD",
            FieldType::IonStorm => "FLD_ION_STORM",
        }
    }

    /// Player-facing name given to freshly created fields.
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::MolecularCloud => "Molecular Cloud",
            FieldType::IonStorm => "Ion Storm",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content_name())
    }
}

/// Returned when a content name does not match any known field type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|field_type| field_type.content_name() == s)
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

/// The field chosen for a single turn: what to spawn and how large.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field_type: FieldType,
    pub size: f64,
}
