//! Dice-driven pricing for dealer interactions. Sell offers and salvage
//! draws live outside the progression engine: they produce already-resolved
//! amounts/ship picks that callers pass into `sell_ship` / `purchase_ship`,
//! keeping the engine's validation fully deterministic.

pub mod rng;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::catalog::Catalog;
use crate::engine::pilot::PilotShip;
pub use rng::Rng;

/// Catalog ships with this id prefix are scrapyard hulls with their own
/// flat sell table.
pub const SALVAGE_ID_PREFIX: &str = "salvage";

/// Produces a buyer's offer for an owned ship. Swappable so tests and other
/// campaign variants can price sales without dice.
pub trait OfferStrategy {
    fn sell_offer(&mut self, catalog: &Catalog, pilot_ship: &PilotShip) -> i64;
}

/// Result of a junkyard salvage draw: which hull came up and the companion
/// upgrades die, both reported to the player before they commit to buy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalvageRoll {
    pub ship_id: String,
    pub upgrades_roll: u32,
}

/// The campaign's standard dice tables.
///
/// Sell offers: salvage hulls pay a flat 1000, or 2000 on a 6. Anything else
/// rolls 1d6 for a fraction of hull cost (1-2: a third, 3-5: half, 6: three
/// quarters), rounded up to the next thousand, plus half the summed cost of
/// installed upgrades.
#[derive(Debug, Clone)]
pub struct DiceOfferStrategy {
    rng: Rng,
}

impl DiceOfferStrategy {
    /// Seed from the wall clock. Use [`DiceOfferStrategy::with_seed`] when
    /// rolls must reproduce.
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        DiceOfferStrategy {
            rng: Rng::new(seed),
        }
    }

    /// Junkyard draw: 1d8 picks the hull (1-2, 3-4, 5-7, 8 bands), 1d6 is
    /// reported alongside for the salvage's upgrade condition.
    pub fn salvage_roll(&mut self) -> SalvageRoll {
        let ship_roll = self.rng.roll_die(8);
        let ship_id = match ship_roll {
            1..=2 => "salvage1",
            3..=4 => "salvage2",
            5..=7 => "salvage3",
            _ => "salvage4",
        };
        SalvageRoll {
            ship_id: ship_id.to_string(),
            upgrades_roll: self.rng.roll_die(6),
        }
    }
}

impl Default for DiceOfferStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl OfferStrategy for DiceOfferStrategy {
    fn sell_offer(&mut self, catalog: &Catalog, pilot_ship: &PilotShip) -> i64 {
        let Some(ship) = catalog.ship(&pilot_ship.ship_id) else {
            return 0;
        };

        if ship.id.starts_with(SALVAGE_ID_PREFIX) {
            return if self.rng.roll_die(6) == 6 { 2000 } else { 1000 };
        }

        let roll = self.rng.roll_die(6);
        // Fraction of hull cost, rounded up to the next thousand.
        let base = match roll {
            1..=2 => ceil_to_thousand(ship.cost, 3),
            3..=5 => ceil_to_thousand(ship.cost, 2),
            _ => ceil_to_thousand(ship.cost * 3, 4),
        };

        let upgrades_value: i64 = pilot_ship
            .upgrades
            .iter()
            .filter_map(|installed| catalog.upgrade(&installed.upgrade_id))
            .map(|upgrade| upgrade.cost)
            .sum();

        base + upgrades_value / 2
    }
}

/// `ceil(numerator / divisor / 1000) * 1000` without going through floats.
fn ceil_to_thousand(numerator: i64, divisor: i64) -> i64 {
    let unit = divisor * 1000;
    (numerator + unit - 1).div_euclid(unit) * 1000
}
