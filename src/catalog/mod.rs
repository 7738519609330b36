//! Static reference data: ships, upgrades, abilities, dealers and career
//! level tables. Loaded once, read-only for the lifetime of the process.

pub mod ability;
pub mod dealer;
pub mod loader;
pub mod progression;
pub mod ship;
pub mod upgrade;
pub mod validate;

use std::collections::HashMap;

pub use ability::Ability;
pub use dealer::ShipDealer;
pub use loader::{load_catalog, CatalogFile, DEFAULT_CATALOG_PATH};
pub use progression::{Career, CareerProgression, LevelProgression};
pub use ship::{Ship, SlotType};
pub use upgrade::Upgrade;
pub use validate::{validate_catalog, ValidationDiagnostic, ValidationReport, ValidationSeverity};

/// All reference tables with id indexes for lookup. The engine only ever
/// reads through this; table contents never change while the process runs.
#[derive(Debug, Default)]
pub struct Catalog {
    ships: Vec<Ship>,
    ships_by_id: HashMap<String, usize>,
    upgrades: Vec<Upgrade>,
    upgrades_by_id: HashMap<String, usize>,
    abilities: Vec<Ability>,
    abilities_by_id: HashMap<String, usize>,
    dealers: Vec<ShipDealer>,
    dealers_by_id: HashMap<String, usize>,
    progressions: HashMap<Career, Vec<LevelProgression>>,
}

fn index_by_id<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        // First entry wins on duplicate ids; validation reports them.
        index.entry(id.to_string()).or_insert(position);
    }
    index
}

impl Catalog {
    pub fn new(
        ships: Vec<Ship>,
        upgrades: Vec<Upgrade>,
        abilities: Vec<Ability>,
        dealers: Vec<ShipDealer>,
        progressions: Vec<CareerProgression>,
    ) -> Self {
        let ships_by_id = index_by_id(ships.iter().map(|s| s.id.as_str()));
        let upgrades_by_id = index_by_id(upgrades.iter().map(|u| u.id.as_str()));
        let abilities_by_id = index_by_id(abilities.iter().map(|a| a.id.as_str()));
        let dealers_by_id = index_by_id(dealers.iter().map(|d| d.id.as_str()));
        let progressions = progressions
            .into_iter()
            .map(|table| (table.career, table.levels))
            .collect();
        Catalog {
            ships,
            ships_by_id,
            upgrades,
            upgrades_by_id,
            abilities,
            abilities_by_id,
            dealers,
            dealers_by_id,
            progressions,
        }
    }

    /// Ship list in catalog order, for dealer stock and listings.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn upgrades(&self) -> &[Upgrade] {
        &self.upgrades
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn dealers(&self) -> &[ShipDealer] {
        &self.dealers
    }

    pub fn ship(&self, id: &str) -> Option<&Ship> {
        self.ships_by_id.get(id).map(|&i| &self.ships[i])
    }

    pub fn upgrade(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades_by_id.get(id).map(|&i| &self.upgrades[i])
    }

    pub fn ability(&self, id: &str) -> Option<&Ability> {
        self.abilities_by_id.get(id).map(|&i| &self.abilities[i])
    }

    pub fn dealer(&self, id: &str) -> Option<&ShipDealer> {
        self.dealers_by_id.get(id).map(|&i| &self.dealers[i])
    }

    /// Full level table for a career. Empty when the catalog carries no table
    /// for it, which read paths treat as "no progression data".
    pub fn career_levels(&self, career: Career) -> &[LevelProgression] {
        self.progressions
            .get(&career)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Table row for an exact level, if defined.
    pub fn level_entry(&self, career: Career, level: u32) -> Option<&LevelProgression> {
        self.career_levels(career)
            .iter()
            .find(|entry| entry.level == level)
    }

    /// Ships a dealer offers, in the dealer's listed order. Dangling ship ids
    /// are skipped (validation flags them).
    pub fn dealer_stock(&self, dealer_id: &str) -> Vec<&Ship> {
        let Some(dealer) = self.dealer(dealer_id) else {
            return Vec::new();
        };
        dealer
            .ship_ids
            .iter()
            .filter_map(|id| self.ship(id))
            .collect()
    }
}
