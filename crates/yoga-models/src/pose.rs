//! Supported yoga poses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a pose in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PoseId {
    /// Tadasana
    Mountain,
    /// Vrikshasana
    Tree,
    /// Easy pose
    Sukasana,
    /// Balasana
    ChildsPose,
    /// Virabhadrasana I
    Warrior1,
    /// Virabhadrasana II
    Warrior2,
    /// Adho Mukha Svanasana
    DownwardDog,
}

impl PoseId {
    /// All poses known to the catalog.
    pub const ALL: &'static [PoseId] = &[
        PoseId::Mountain,
        PoseId::Tree,
        PoseId::Sukasana,
        PoseId::ChildsPose,
        PoseId::Warrior1,
        PoseId::Warrior2,
        PoseId::DownwardDog,
    ];

    /// Returns the pose identifier as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PoseId::Mountain => "mountain",
            PoseId::Tree => "tree",
            PoseId::Sukasana => "sukasana",
            PoseId::ChildsPose => "childs_pose",
            PoseId::Warrior1 => "warrior1",
            PoseId::Warrior2 => "warrior2",
            PoseId::DownwardDog => "downward_dog",
        }
    }
}

impl fmt::Display for PoseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PoseId {
    type Err = PoseIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mountain" => Ok(PoseId::Mountain),
            "tree" => Ok(PoseId::Tree),
            "sukasana" => Ok(PoseId::Sukasana),
            "childs_pose" | "child" => Ok(PoseId::ChildsPose),
            "warrior1" => Ok(PoseId::Warrior1),
            "warrior2" => Ok(PoseId::Warrior2),
            "downward_dog" => Ok(PoseId::DownwardDog),
            _ => Err(PoseIdParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown pose: {0}")]
pub struct PoseIdParseError(pub String);
