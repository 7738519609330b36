//! Campaign store: owns the game state, exposes every engine operation and
//! the read-side derivations, and commits a snapshot after each successful
//! mutation.

pub mod persistence;

use std::sync::Arc;

use crate::catalog::{Career, Catalog};
use crate::engine::ops::{AbilitySlotRule, ProgressionEngine};
use crate::engine::pilot::{GameState, Pilot};
use crate::engine::slots::{available_slots, ResolvedSlot};
use crate::engine::threat::{threat_breakdown, threat_level, ThreatBreakdown};
use crate::engine::views::{ability_overview, AbilityOverview};

pub use persistence::{FileStore, MemoryStore, StateStore};

/// Fixed key the whole serialized campaign lives under.
pub const STATE_KEY: &str = "campaign-state";

/// The process-wide campaign container. External callers go through this;
/// every mutating call that reports success has already been persisted.
pub struct GameStore {
    state: GameState,
    engine: ProgressionEngine,
    backend: Box<dyn StateStore>,
}

impl GameStore {
    /// Restore the previous campaign from the backend, falling back to an
    /// empty roster when the snapshot is absent or unreadable.
    pub fn new(catalog: Arc<Catalog>, backend: Box<dyn StateStore>) -> Self {
        let state = match backend.load(STATE_KEY) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(state) => state,
                Err(err) => {
                    log::warn!("discarding unreadable campaign snapshot: {err}");
                    GameState::default()
                }
            },
            None => GameState::default(),
        };
        GameStore {
            state,
            engine: ProgressionEngine::new(catalog),
            backend,
        }
    }

    pub fn with_ability_slot_rule(mut self, rule: AbilitySlotRule) -> Self {
        self.engine = self.engine.with_ability_slot_rule(rule);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.engine.catalog()
    }

    pub fn selected_pilot(&self) -> Option<&Pilot> {
        self.state.selected_pilot()
    }

    fn commit(&mut self) {
        match serde_json::to_string(&self.state) {
            Ok(snapshot) => self.backend.save(STATE_KEY, &snapshot),
            Err(err) => log::warn!("unable to serialize campaign snapshot: {err}"),
        }
    }

    fn commit_if(&mut self, mutated: bool) -> bool {
        if mutated {
            self.commit();
        }
        mutated
    }

    pub fn create_pilot(&mut self, name: &str, career: Career) -> String {
        let id = self.engine.create_pilot(&mut self.state, name, career);
        self.commit();
        id
    }

    pub fn delete_pilot(&mut self, pilot_id: &str) {
        let mutated = self.engine.delete_pilot(&mut self.state, pilot_id);
        self.commit_if(mutated);
    }

    pub fn select_pilot(&mut self, pilot_id: Option<&str>) -> bool {
        let mutated = self.engine.select_pilot(&mut self.state, pilot_id);
        self.commit_if(mutated)
    }

    pub fn add_xp(&mut self, pilot_id: &str, amount: i64) {
        let mutated = self.engine.add_xp(&mut self.state, pilot_id, amount);
        self.commit_if(mutated);
    }

    pub fn add_credits(&mut self, pilot_id: &str, amount: i64) {
        let mutated = self.engine.add_credits(&mut self.state, pilot_id, amount);
        self.commit_if(mutated);
    }

    pub fn spend_credits(&mut self, pilot_id: &str, amount: i64) -> bool {
        let mutated = self.engine.spend_credits(&mut self.state, pilot_id, amount);
        self.commit_if(mutated)
    }

    pub fn level_up_pilot(&mut self, pilot_id: &str) -> bool {
        let mutated = self.engine.level_up_pilot(&mut self.state, pilot_id);
        self.commit_if(mutated)
    }

    pub fn unlock_ability(&mut self, pilot_id: &str, ability_id: &str) -> bool {
        let mutated = self
            .engine
            .unlock_ability(&mut self.state, pilot_id, ability_id);
        self.commit_if(mutated)
    }

    /// Returns the new ship instance id on success.
    pub fn purchase_ship(
        &mut self,
        pilot_id: &str,
        ship_id: &str,
        custom_name: &str,
    ) -> Option<String> {
        let purchased = self
            .engine
            .purchase_ship(&mut self.state, pilot_id, ship_id, custom_name);
        if purchased.is_some() {
            self.commit();
        }
        purchased
    }

    pub fn sell_ship(&mut self, pilot_id: &str, pilot_ship_id: &str, offer_amount: i64) -> bool {
        let mutated = self
            .engine
            .sell_ship(&mut self.state, pilot_id, pilot_ship_id, offer_amount);
        self.commit_if(mutated)
    }

    pub fn install_upgrade(
        &mut self,
        pilot_id: &str,
        pilot_ship_id: &str,
        upgrade_id: &str,
        slot_indices: &[usize],
    ) -> bool {
        let mutated = self.engine.install_upgrade(
            &mut self.state,
            pilot_id,
            pilot_ship_id,
            upgrade_id,
            slot_indices,
        );
        self.commit_if(mutated)
    }

    pub fn remove_upgrade(&mut self, pilot_id: &str, pilot_ship_id: &str, upgrade_id: &str) {
        let mutated =
            self.engine
                .remove_upgrade(&mut self.state, pilot_id, pilot_ship_id, upgrade_id);
        self.commit_if(mutated);
    }

    /// Resolved slot list for an owned ship; empty when ids do not resolve.
    pub fn available_slots(&self, pilot_id: &str, pilot_ship_id: &str) -> Vec<ResolvedSlot> {
        available_slots(self.catalog(), &self.state, pilot_id, pilot_ship_id)
    }

    /// Normalized threat level; zero when the pilot or ship is unknown.
    pub fn calculate_threat_level(&self, pilot_id: &str, pilot_ship_id: Option<&str>) -> i64 {
        let Some(pilot) = self.state.pilot(pilot_id) else {
            return 0;
        };
        threat_level(self.catalog(), pilot, pilot_ship_id)
    }

    /// Per-component threat totals for one owned ship.
    pub fn threat_breakdown(&self, pilot_id: &str, pilot_ship_id: &str) -> Option<ThreatBreakdown> {
        let pilot = self.state.pilot(pilot_id)?;
        let pilot_ship = pilot.ship(pilot_ship_id)?;
        Some(threat_breakdown(self.catalog(), pilot, pilot_ship))
    }

    /// Career-filtered ability partition and slot usage for a pilot.
    pub fn ability_overview(&self, pilot_id: &str) -> Option<AbilityOverview<'_>> {
        let pilot = self.state.pilot(pilot_id)?;
        Some(ability_overview(self.catalog(), pilot))
    }
}
