//! Threat derivation: pilot level + unlocked abilities + hull + installed
//! upgrades, normalized by a fixed divisor. Pure reads, recomputed on demand.

use crate::catalog::Catalog;
use crate::engine::pilot::{Pilot, PilotShip};

/// Normalization divisor for the threat level. Design constant of the game's
/// threat scale, not configurable.
pub const THREAT_DIVISOR: i64 = 25;

/// Per-component threat totals for one owned ship. Pilot level and ability
/// contributions are shared across a pilot's ships; hull and upgrade
/// contributions belong to this ship alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThreatBreakdown {
    pub pilot_threat: i64,
    pub abilities_threat: i64,
    pub ship_threat: i64,
    pub upgrades_threat: i64,
}

impl ThreatBreakdown {
    pub fn total(&self) -> i64 {
        self.pilot_threat + self.abilities_threat + self.ship_threat + self.upgrades_threat
    }

    /// `floor(total / THREAT_DIVISOR)`. Totals are non-negative for any
    /// catalog with non-negative threat values.
    pub fn threat_level(&self) -> i64 {
        self.total().div_euclid(THREAT_DIVISOR)
    }
}

/// Break a ship's threat into its four additive components. Unresolvable
/// catalog references contribute zero rather than failing.
pub fn threat_breakdown(catalog: &Catalog, pilot: &Pilot, pilot_ship: &PilotShip) -> ThreatBreakdown {
    let pilot_threat = catalog
        .level_entry(pilot.career, pilot.level)
        .map(|entry| entry.threat_value)
        .unwrap_or(0);

    let abilities_threat = pilot
        .unlocked_abilities
        .iter()
        .filter_map(|id| catalog.ability(id))
        .map(|ability| ability.threat_value)
        .sum();

    let ship_threat = catalog
        .ship(&pilot_ship.ship_id)
        .map(|ship| ship.threat_value)
        .unwrap_or(0);

    let upgrades_threat = pilot_ship
        .upgrades
        .iter()
        .filter_map(|installed| catalog.upgrade(&installed.upgrade_id))
        .map(|upgrade| upgrade.threat_value)
        .sum();

    ThreatBreakdown {
        pilot_threat,
        abilities_threat,
        ship_threat,
        upgrades_threat,
    }
}

/// Normalized threat level for one of a pilot's ships. Zero when no ship id
/// is given or the pilot does not own a ship with that id.
pub fn threat_level(catalog: &Catalog, pilot: &Pilot, pilot_ship_id: Option<&str>) -> i64 {
    let Some(pilot_ship_id) = pilot_ship_id else {
        return 0;
    };
    let Some(pilot_ship) = pilot.ship(pilot_ship_id) else {
        return 0;
    };
    threat_breakdown(catalog, pilot, pilot_ship).threat_level()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        Ability, Career, CareerProgression, Catalog, LevelProgression, Ship, SlotType, Upgrade,
    };
    use crate::engine::pilot::InstalledUpgrade;

    fn fixture_catalog() -> Catalog {
        let ship = Ship {
            id: "z-95".to_string(),
            name: "Z-95 Headhunter".to_string(),
            manufacturer: "Incom".to_string(),
            base_slots: vec![SlotType::Missile],
            threat_value: 8,
            cost: 1000,
            description: String::new(),
        };
        let upgrade = Upgrade {
            id: "concussion".to_string(),
            name: "Concussion Missiles".to_string(),
            slot_type: SlotType::Missile,
            slots_required: 1,
            threat_value: 4,
            cost: 300,
            description: String::new(),
        };
        let ability = Ability {
            id: "deadeye".to_string(),
            name: "Deadeye".to_string(),
            xp_cost: 50,
            threat_value: 5,
            description: String::new(),
            required_level: 1,
            careers: vec![Career::Professional],
        };
        let table = CareerProgression {
            career: Career::Professional,
            levels: vec![LevelProgression {
                level: 1,
                xp_required: 0,
                ability_slots: 1,
                bonus_upgrade_slots: Vec::new(),
                threat_value: 10,
                initiative: Some(2),
            }],
        };
        Catalog::new(vec![ship], vec![upgrade], vec![ability], Vec::new(), vec![table])
    }

    #[test]
    fn formula_matches_component_sum_divided_by_25() {
        // 10 (level) + 5 (ability) + 8 (hull) + 4 (upgrade) = 27 -> level 1.
        let catalog = fixture_catalog();
        let mut pilot = Pilot::new("Wedge", Career::Professional);
        pilot.unlocked_abilities.push("deadeye".to_string());
        let mut ship = PilotShip::new("z-95", "Red Two");
        ship.upgrades.push(InstalledUpgrade {
            upgrade_id: "concussion".to_string(),
            slot_indices: vec![0],
        });
        let ship_id = ship.id.clone();
        pilot.ships.push(ship);

        let breakdown = threat_breakdown(&catalog, &pilot, &pilot.ships[0]);
        assert_eq!(breakdown.pilot_threat, 10);
        assert_eq!(breakdown.abilities_threat, 5);
        assert_eq!(breakdown.ship_threat, 8);
        assert_eq!(breakdown.upgrades_threat, 4);
        assert_eq!(breakdown.total(), 27);
        assert_eq!(breakdown.threat_level(), 1);
        assert_eq!(threat_level(&catalog, &pilot, Some(&ship_id)), 1);
    }

    #[test]
    fn no_ship_selected_is_zero() {
        let catalog = fixture_catalog();
        let pilot = Pilot::new("Wedge", Career::Professional);
        assert_eq!(threat_level(&catalog, &pilot, None), 0);
        assert_eq!(threat_level(&catalog, &pilot, Some("not-owned")), 0);
    }

    #[test]
    fn dangling_references_contribute_zero() {
        let catalog = fixture_catalog();
        let mut pilot = Pilot::new("Wedge", Career::Professional);
        pilot.unlocked_abilities.push("forgotten".to_string());
        let mut ship = PilotShip::new("scrapped", "Ghost");
        ship.upgrades.push(InstalledUpgrade {
            upgrade_id: "gone".to_string(),
            slot_indices: vec![0],
        });
        let breakdown = threat_breakdown(&catalog, &pilot, &ship);
        assert_eq!(breakdown.abilities_threat, 0);
        assert_eq!(breakdown.ship_threat, 0);
        assert_eq!(breakdown.upgrades_threat, 0);
        assert_eq!(breakdown.pilot_threat, 10);
    }
}
