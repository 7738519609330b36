//! Read-side roster views: ability partitions and slot usage for a pilot.
//! Pure derivations over catalog + state, recomputed per call.

use crate::catalog::{Ability, Catalog};
use crate::engine::pilot::Pilot;

/// Ability-slot usage at the pilot's current level, from the career table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilitySlotUsage {
    pub used: usize,
    pub max: usize,
}

impl AbilitySlotUsage {
    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.used)
    }
}

/// Career-eligible abilities partitioned the way a roster view presents
/// them: already unlocked, unlockable now, and gated behind a higher level.
#[derive(Debug, Clone)]
pub struct AbilityOverview<'a> {
    pub unlocked: Vec<&'a Ability>,
    pub available: Vec<&'a Ability>,
    pub locked: Vec<&'a Ability>,
    pub slots: AbilitySlotUsage,
}

/// Partition the catalog's abilities for one pilot. Only abilities eligible
/// for the pilot's career appear at all.
pub fn ability_overview<'a>(catalog: &'a Catalog, pilot: &Pilot) -> AbilityOverview<'a> {
    let eligible = catalog
        .abilities()
        .iter()
        .filter(|a| a.eligible_for(pilot.career));

    let mut unlocked = Vec::new();
    let mut available = Vec::new();
    let mut locked = Vec::new();
    for ability in eligible {
        if pilot.has_ability(&ability.id) {
            unlocked.push(ability);
        } else if ability.required_level <= pilot.level {
            available.push(ability);
        }
        if ability.required_level > pilot.level {
            locked.push(ability);
        }
    }

    let max = catalog
        .level_entry(pilot.career, pilot.level)
        .map(|entry| entry.ability_slots)
        .unwrap_or(0);

    AbilityOverview {
        slots: AbilitySlotUsage {
            used: pilot.unlocked_abilities.len(),
            max,
        },
        unlocked,
        available,
        locked,
    }
}
