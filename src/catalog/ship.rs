//! Ship catalog entries: hull identity, base equipment slots, threat and price.
//! Base slots are fixed per hull; bonus slots come from the pilot's career table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Equipment slot categories. Every slot on a ship carries exactly one of
/// these, and an upgrade can only be installed into slots of its own type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    Astromech,
    Cannon,
    Configuration,
    Crew,
    Gunner,
    Illicit,
    Missile,
    Modification,
    Payload,
    Sensor,
    Tech,
    Title,
    Torpedo,
    Turret,
}

impl SlotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Astromech => "astromech",
            Self::Cannon => "cannon",
            Self::Configuration => "configuration",
            Self::Crew => "crew",
            Self::Gunner => "gunner",
            Self::Illicit => "illicit",
            Self::Missile => "missile",
            Self::Modification => "modification",
            Self::Payload => "payload",
            Self::Sensor => "sensor",
            Self::Tech => "tech",
            Self::Title => "title",
            Self::Torpedo => "torpedo",
            Self::Turret => "turret",
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog ship record. Instances owned by a pilot reference this by id and
/// carry their own custom name and installed upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: String,
    pub name: String,
    pub manufacturer: String,
    /// Slot types in hull order. Resolved slot indices start from this list.
    #[serde(default)]
    pub base_slots: Vec<SlotType>,
    pub threat_value: i64,
    pub cost: i64,
    #[serde(default)]
    pub description: String,
}
