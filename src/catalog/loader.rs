//! Catalog loading from a single JSON aggregate file.
//! Graceful fallback: missing or unparsable files yield `None`, callers
//! decide whether an empty catalog is acceptable.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::ability::Ability;
use crate::catalog::dealer::ShipDealer;
use crate::catalog::progression::CareerProgression;
use crate::catalog::ship::Ship;
use crate::catalog::upgrade::Upgrade;
use crate::catalog::Catalog;

pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";

/// On-disk shape of the catalog aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub ships: Vec<Ship>,
    #[serde(default)]
    pub upgrades: Vec<Upgrade>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub dealers: Vec<ShipDealer>,
    #[serde(default)]
    pub progressions: Vec<CareerProgression>,
}

impl CatalogFile {
    pub fn into_catalog(self) -> Catalog {
        Catalog::new(
            self.ships,
            self.upgrades,
            self.abilities,
            self.dealers,
            self.progressions,
        )
    }
}

/// Load the catalog from a JSON file. Returns None if the file is missing or
/// does not parse.
pub fn load_catalog(path: impl AsRef<Path>) -> Option<Catalog> {
    let raw = fs::read_to_string(path).ok()?;
    let file: CatalogFile = serde_json::from_str(&raw).ok()?;
    Some(file.into_catalog())
}
