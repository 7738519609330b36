//! Campaign ledger engine for a tabletop starfighter miniatures game.
//!
//! Pilots progress through career level tables on XP and credits, own up to
//! two ships, customize them with slot-based upgrades, and carry a derived
//! threat level per ship. The crate is the rules engine only: reference data
//! comes in through [`catalog`], state mutation goes through
//! [`store::GameStore`] (which persists a JSON snapshot after every
//! successful change), and the dice tables for dealer pricing live in
//! [`pricing`] so the engine itself never rolls anything.

pub mod catalog;
pub mod engine;
pub mod pricing;
pub mod store;

pub use catalog::{load_catalog, validate_catalog, Career, Catalog, SlotType};
pub use engine::{
    AbilitySlotRule, GameState, InstalledUpgrade, Pilot, PilotShip, ProgressionEngine,
    ResolvedSlot, ThreatBreakdown, SHIP_CAPACITY, STARTING_CREDITS, THREAT_DIVISOR,
};
pub use pricing::{DiceOfferStrategy, OfferStrategy, SalvageRoll};
pub use store::{FileStore, GameStore, MemoryStore, StateStore, STATE_KEY};
