//! Upgrade catalog entries. An upgrade occupies one or more slots of a single
//! type on an owned ship and contributes threat while installed.

use serde::{Deserialize, Serialize};

use crate::catalog::ship::SlotType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    /// Slot type every occupied slot must match.
    pub slot_type: SlotType,
    /// How many slots an install claims. Large ordnance and titles take more
    /// than one.
    #[serde(default = "default_slots_required")]
    pub slots_required: usize,
    pub threat_value: i64,
    pub cost: i64,
    #[serde(default)]
    pub description: String,
}

fn default_slots_required() -> usize {
    1
}
