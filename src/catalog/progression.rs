//! Careers and per-career level progression tables.
//! Tables are cumulative: each entry carries the full ability-slot count,
//! bonus slot list and level threat at that level, not per-level deltas.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ship::SlotType;

/// The eight pilot archetypes. Chosen at creation and immutable afterwards;
/// each has its own level progression table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Career {
    Organizer,
    Professional,
    Gambler,
    Slicer,
    Gearhead,
    Demolitions,
    Cyborg,
    Miner,
}

impl Career {
    pub const ALL: [Career; 8] = [
        Career::Organizer,
        Career::Professional,
        Career::Gambler,
        Career::Slicer,
        Career::Gearhead,
        Career::Demolitions,
        Career::Cyborg,
        Career::Miner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organizer => "Organizer",
            Self::Professional => "Professional",
            Self::Gambler => "Gambler",
            Self::Slicer => "Slicer",
            Self::Gearhead => "Gearhead",
            Self::Demolitions => "Demolitions",
            Self::Cyborg => "Cyborg",
            Self::Miner => "Miner",
        }
    }
}

impl fmt::Display for Career {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of a career's level table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelProgression {
    pub level: u32,
    /// Cumulative XP needed to reach this level. XP is a high-water mark, not
    /// spent on leveling.
    pub xp_required: i64,
    /// Total ability slots at this level.
    pub ability_slots: usize,
    /// Bonus equipment slot types granted at this level (full list, not a
    /// delta), appended after a ship's base slots when resolving.
    #[serde(default)]
    pub bonus_upgrade_slots: Vec<SlotType>,
    /// Cumulative threat contributed by pilot level.
    pub threat_value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative: Option<u32>,
}

/// A career's full level table, as stored in the catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProgression {
    pub career: Career,
    pub levels: Vec<LevelProgression>,
}
