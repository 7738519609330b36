//! Mutable campaign state: pilots, their owned ships and installed upgrades.
//! All mutation goes through the progression engine so invariants hold.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Career;

/// Credits a freshly created pilot starts with.
pub const STARTING_CREDITS: i64 = 2000;

/// Hard cap on owned ships per pilot.
pub const SHIP_CAPACITY: usize = 2;

/// An upgrade installed on a specific owned ship, pinned to the exact slot
/// indices it occupies. `slot_indices.len()` equals the catalog upgrade's
/// `slots_required`, and no index is shared with another installed upgrade
/// on the same ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledUpgrade {
    pub upgrade_id: String,
    pub slot_indices: Vec<usize>,
}

/// An owned instance of a catalog ship, with its own id and display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotShip {
    /// Instance id, distinct from the catalog ship id.
    pub id: String,
    /// Catalog ship this instance references.
    pub ship_id: String,
    /// Custom display name; defaults to the catalog name on purchase.
    pub name: String,
    #[serde(default)]
    pub upgrades: Vec<InstalledUpgrade>,
}

impl PilotShip {
    pub fn new(ship_id: impl Into<String>, name: impl Into<String>) -> Self {
        PilotShip {
            id: Uuid::new_v4().to_string(),
            ship_id: ship_id.into(),
            name: name.into(),
            upgrades: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pilot {
    pub id: String,
    pub name: String,
    pub career: Career,
    pub level: u32,
    pub xp: i64,
    pub credits: i64,
    #[serde(default)]
    pub ships: Vec<PilotShip>,
    /// Unlocked ability ids in unlock order.
    #[serde(default)]
    pub unlocked_abilities: Vec<String>,
}

impl Pilot {
    /// Fresh level-1 pilot with starting credits and nothing owned.
    pub fn new(name: impl Into<String>, career: Career) -> Self {
        Pilot {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            career,
            level: 1,
            xp: 0,
            credits: STARTING_CREDITS,
            ships: Vec::new(),
            unlocked_abilities: Vec::new(),
        }
    }

    pub fn ship(&self, pilot_ship_id: &str) -> Option<&PilotShip> {
        self.ships.iter().find(|s| s.id == pilot_ship_id)
    }

    pub fn ship_mut(&mut self, pilot_ship_id: &str) -> Option<&mut PilotShip> {
        self.ships.iter_mut().find(|s| s.id == pilot_ship_id)
    }

    pub fn has_ability(&self, ability_id: &str) -> bool {
        self.unlocked_abilities.iter().any(|id| id == ability_id)
    }
}

/// The whole campaign roster plus the selected pilot. This is the unit of
/// persistence: serialized as one JSON document after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub pilots: Vec<Pilot>,
    /// Invariant: when set, references a pilot in `pilots`.
    #[serde(default)]
    pub selected_pilot_id: Option<String>,
}

impl GameState {
    pub fn pilot(&self, pilot_id: &str) -> Option<&Pilot> {
        self.pilots.iter().find(|p| p.id == pilot_id)
    }

    pub fn pilot_mut(&mut self, pilot_id: &str) -> Option<&mut Pilot> {
        self.pilots.iter_mut().find(|p| p.id == pilot_id)
    }

    pub fn selected_pilot(&self) -> Option<&Pilot> {
        self.selected_pilot_id
            .as_deref()
            .and_then(|id| self.pilot(id))
    }
}
