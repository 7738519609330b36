//! Slot resolution: the full ordered slot list for an owned ship at the
//! pilot's current level, with occupancy flags from installed upgrades.

use std::collections::HashSet;

use crate::catalog::{Catalog, SlotType};
use crate::engine::pilot::{GameState, Pilot, PilotShip};

/// One slot in a ship's resolved loadout. Indices are 0-based positions in
/// the concatenated base + bonus list and stay stable at a given level:
/// leveling up only appends, it never reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSlot {
    pub index: usize,
    pub slot_type: SlotType,
    pub filled: bool,
}

/// Resolve the slot list for an owned ship: the catalog hull's base slots in
/// hull order, then the bonus slots from the pilot's current level entry.
/// Returns an empty list when the catalog hull cannot be resolved.
pub fn resolve_slots(catalog: &Catalog, pilot: &Pilot, pilot_ship: &PilotShip) -> Vec<ResolvedSlot> {
    let Some(ship) = catalog.ship(&pilot_ship.ship_id) else {
        return Vec::new();
    };

    let mut slot_types: Vec<SlotType> = ship.base_slots.clone();
    if let Some(entry) = catalog.level_entry(pilot.career, pilot.level) {
        slot_types.extend(entry.bonus_upgrade_slots.iter().copied());
    }

    let occupied: HashSet<usize> = pilot_ship
        .upgrades
        .iter()
        .flat_map(|upgrade| upgrade.slot_indices.iter().copied())
        .collect();

    slot_types
        .into_iter()
        .enumerate()
        .map(|(index, slot_type)| ResolvedSlot {
            index,
            slot_type,
            filled: occupied.contains(&index),
        })
        .collect()
}

/// Resolve by ids against the whole state. Unknown pilot or ship ids yield an
/// empty list, which callers treat as "no slots available".
pub fn available_slots(
    catalog: &Catalog,
    state: &GameState,
    pilot_id: &str,
    pilot_ship_id: &str,
) -> Vec<ResolvedSlot> {
    let Some(pilot) = state.pilot(pilot_id) else {
        return Vec::new();
    };
    let Some(pilot_ship) = pilot.ship(pilot_ship_id) else {
        return Vec::new();
    };
    resolve_slots(catalog, pilot, pilot_ship)
}
