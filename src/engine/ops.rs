//! Progression engine: every rule that mutates campaign state. Each
//! operation validates against the catalog and a snapshot of current state,
//! then applies the full transition or leaves the state untouched.

use std::collections::HashSet;
use std::sync::Arc;

use crate::catalog::{Career, Catalog};
use crate::engine::pilot::{GameState, InstalledUpgrade, Pilot, PilotShip, SHIP_CAPACITY};
use crate::engine::slots::resolve_slots;

/// Where ability-slot capacity is enforced. Capacity can live in the view
/// layer (greying out the unlock control) or in the engine itself; the
/// choice is an explicit configuration, not an implicit behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbilitySlotRule {
    /// Capacity is a display concern; `unlock_ability` ignores it.
    #[default]
    Presentation,
    /// `unlock_ability` also fails once the career table's ability-slot
    /// count at the pilot's current level is reached.
    Engine,
}

/// All pilot-state mutation rules. Holds the catalog and the configured
/// ability-slot rule; the state itself is passed in by the owning store.
#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    catalog: Arc<Catalog>,
    ability_slot_rule: AbilitySlotRule,
}

impl ProgressionEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        ProgressionEngine {
            catalog,
            ability_slot_rule: AbilitySlotRule::default(),
        }
    }

    pub fn with_ability_slot_rule(mut self, rule: AbilitySlotRule) -> Self {
        self.ability_slot_rule = rule;
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Append a fresh level-1 pilot and select it. Returns the new pilot id.
    /// Name emptiness is the caller's concern; creation itself cannot fail.
    pub fn create_pilot(&self, state: &mut GameState, name: &str, career: Career) -> String {
        let pilot = Pilot::new(name, career);
        let id = pilot.id.clone();
        state.pilots.push(pilot);
        state.selected_pilot_id = Some(id.clone());
        id
    }

    /// Remove a pilot. When the deleted pilot was selected, selection falls
    /// back to the first remaining pilot, or none. Returns false if the id
    /// did not resolve (no mutation).
    pub fn delete_pilot(&self, state: &mut GameState, pilot_id: &str) -> bool {
        let before = state.pilots.len();
        state.pilots.retain(|p| p.id != pilot_id);
        if state.pilots.len() == before {
            return false;
        }
        if state.selected_pilot_id.as_deref() == Some(pilot_id) {
            state.selected_pilot_id = state.pilots.first().map(|p| p.id.clone());
        }
        true
    }

    /// Change selection. `None` always clears; a pilot id must resolve
    /// against the roster so the selection invariant holds.
    pub fn select_pilot(&self, state: &mut GameState, pilot_id: Option<&str>) -> bool {
        match pilot_id {
            None => {
                state.selected_pilot_id = None;
                true
            }
            Some(id) => {
                if state.pilot(id).is_none() {
                    return false;
                }
                state.selected_pilot_id = Some(id.to_string());
                true
            }
        }
    }

    /// Grant XP. XP only ever decreases when spent on abilities, so the
    /// amount here is normally positive; no floor or cap is applied.
    pub fn add_xp(&self, state: &mut GameState, pilot_id: &str, amount: i64) -> bool {
        let Some(pilot) = state.pilot_mut(pilot_id) else {
            return false;
        };
        pilot.xp += amount;
        true
    }

    pub fn add_credits(&self, state: &mut GameState, pilot_id: &str, amount: i64) -> bool {
        let Some(pilot) = state.pilot_mut(pilot_id) else {
            return false;
        };
        pilot.credits += amount;
        true
    }

    /// Deduct credits; fails without mutation when the pilot is unknown or
    /// the balance is insufficient.
    pub fn spend_credits(&self, state: &mut GameState, pilot_id: &str, amount: i64) -> bool {
        let Some(pilot) = state.pilot_mut(pilot_id) else {
            return false;
        };
        if pilot.credits < amount {
            return false;
        }
        pilot.credits -= amount;
        true
    }

    /// Advance one level when the career table defines the next level and
    /// the pilot's cumulative XP meets its requirement. XP is not deducted.
    pub fn level_up_pilot(&self, state: &mut GameState, pilot_id: &str) -> bool {
        let Some(pilot) = state.pilot(pilot_id) else {
            return false;
        };
        let Some(next) = self.catalog.level_entry(pilot.career, pilot.level + 1) else {
            return false;
        };
        if pilot.xp < next.xp_required {
            return false;
        }
        let Some(pilot) = state.pilot_mut(pilot_id) else {
            return false;
        };
        pilot.level += 1;
        true
    }

    /// Spend XP to unlock an ability. Fails when the ability is unknown,
    /// already unlocked, or the pilot cannot afford it. Under
    /// [`AbilitySlotRule::Engine`] the career table's ability-slot count at
    /// the current level also caps unlocks.
    pub fn unlock_ability(&self, state: &mut GameState, pilot_id: &str, ability_id: &str) -> bool {
        let Some(ability) = self.catalog.ability(ability_id) else {
            return false;
        };
        let Some(pilot) = state.pilot(pilot_id) else {
            return false;
        };
        if pilot.xp < ability.xp_cost || pilot.has_ability(ability_id) {
            return false;
        }
        if self.ability_slot_rule == AbilitySlotRule::Engine {
            let max_slots = self
                .catalog
                .level_entry(pilot.career, pilot.level)
                .map(|entry| entry.ability_slots)
                .unwrap_or(0);
            if pilot.unlocked_abilities.len() >= max_slots {
                return false;
            }
        }
        let xp_cost = ability.xp_cost;
        let Some(pilot) = state.pilot_mut(pilot_id) else {
            return false;
        };
        pilot.xp -= xp_cost;
        pilot.unlocked_abilities.push(ability_id.to_string());
        true
    }

    /// Buy a catalog ship. Fails when the hull is unknown, credits are
    /// short, or the pilot already owns [`SHIP_CAPACITY`] ships. An empty
    /// custom name falls back to the catalog name. Returns the new instance
    /// id on success.
    pub fn purchase_ship(
        &self,
        state: &mut GameState,
        pilot_id: &str,
        ship_id: &str,
        custom_name: &str,
    ) -> Option<String> {
        let ship = self.catalog.ship(ship_id)?;
        let pilot = state.pilot(pilot_id)?;
        if pilot.credits < ship.cost || pilot.ships.len() >= SHIP_CAPACITY {
            return None;
        }
        let name = if custom_name.is_empty() {
            ship.name.clone()
        } else {
            custom_name.to_string()
        };
        let cost = ship.cost;
        let instance = PilotShip::new(ship_id, name);
        let instance_id = instance.id.clone();
        let pilot = state.pilot_mut(pilot_id)?;
        pilot.credits -= cost;
        pilot.ships.push(instance);
        Some(instance_id)
    }

    /// Sell an owned ship for an externally agreed offer. The ship and its
    /// installed upgrades are discarded; the offer is credited as-is. The
    /// engine never prices the sale itself (see [`crate::pricing`]).
    pub fn sell_ship(
        &self,
        state: &mut GameState,
        pilot_id: &str,
        pilot_ship_id: &str,
        offer_amount: i64,
    ) -> bool {
        let Some(pilot) = state.pilot_mut(pilot_id) else {
            return false;
        };
        let before = pilot.ships.len();
        pilot.ships.retain(|s| s.id != pilot_ship_id);
        if pilot.ships.len() == before {
            return false;
        }
        pilot.credits += offer_amount;
        true
    }

    /// Install an upgrade into specific resolved slots. Every requested
    /// index must resolve to a distinct unfilled slot of the upgrade's type,
    /// the index count must equal the upgrade's slot requirement, and the
    /// pilot must afford the cost. Nothing changes on failure.
    pub fn install_upgrade(
        &self,
        state: &mut GameState,
        pilot_id: &str,
        pilot_ship_id: &str,
        upgrade_id: &str,
        slot_indices: &[usize],
    ) -> bool {
        let Some(upgrade) = self.catalog.upgrade(upgrade_id) else {
            return false;
        };
        let Some(pilot) = state.pilot(pilot_id) else {
            return false;
        };
        if pilot.credits < upgrade.cost {
            return false;
        }
        if slot_indices.len() != upgrade.slots_required {
            return false;
        }
        let distinct: HashSet<usize> = slot_indices.iter().copied().collect();
        if distinct.len() != slot_indices.len() {
            return false;
        }
        let Some(pilot_ship) = pilot.ship(pilot_ship_id) else {
            return false;
        };
        let slots = resolve_slots(&self.catalog, pilot, pilot_ship);
        for &index in slot_indices {
            match slots.get(index) {
                Some(slot) if !slot.filled && slot.slot_type == upgrade.slot_type => {}
                _ => return false,
            }
        }
        let cost = upgrade.cost;
        let installed = InstalledUpgrade {
            upgrade_id: upgrade_id.to_string(),
            slot_indices: slot_indices.to_vec(),
        };
        let Some(pilot) = state.pilot_mut(pilot_id) else {
            return false;
        };
        let Some(position) = pilot.ships.iter().position(|s| s.id == pilot_ship_id) else {
            return false;
        };
        pilot.credits -= cost;
        pilot.ships[position].upgrades.push(installed);
        true
    }

    /// Remove the first installed upgrade matching the id, freeing its
    /// slots. No credit refund. Silently does nothing when not found.
    pub fn remove_upgrade(
        &self,
        state: &mut GameState,
        pilot_id: &str,
        pilot_ship_id: &str,
        upgrade_id: &str,
    ) -> bool {
        let Some(pilot) = state.pilot_mut(pilot_id) else {
            return false;
        };
        let Some(pilot_ship) = pilot.ship_mut(pilot_ship_id) else {
            return false;
        };
        let Some(position) = pilot_ship
            .upgrades
            .iter()
            .position(|u| u.upgrade_id == upgrade_id)
        else {
            return false;
        };
        pilot_ship.upgrades.remove(position);
        true
    }
}
