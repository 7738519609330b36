//! Campaign state and the rules that mutate and derive from it.

pub mod ops;
pub mod pilot;
pub mod slots;
pub mod threat;
pub mod views;

pub use ops::{AbilitySlotRule, ProgressionEngine};
pub use pilot::{
    GameState, InstalledUpgrade, Pilot, PilotShip, SHIP_CAPACITY, STARTING_CREDITS,
};
pub use slots::{available_slots, resolve_slots, ResolvedSlot};
pub use threat::{threat_breakdown, threat_level, ThreatBreakdown, THREAT_DIVISOR};
pub use views::{ability_overview, AbilityOverview, AbilitySlotUsage};
