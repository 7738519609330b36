//! Ship dealer catalog entries. Each dealer offers a fixed subset of hulls.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipDealer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Catalog ship ids this dealer sells.
    #[serde(default)]
    pub ship_ids: Vec<String>,
}
