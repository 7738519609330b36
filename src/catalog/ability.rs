//! Ability catalog entries: career-gated perks bought with XP.

use serde::{Deserialize, Serialize};

use crate::catalog::progression::Career;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: String,
    pub name: String,
    /// XP deducted from the pilot on unlock.
    pub xp_cost: i64,
    pub threat_value: i64,
    #[serde(default)]
    pub description: String,
    /// Minimum pilot level before the ability shows up as unlockable.
    pub required_level: u32,
    /// Careers that may take this ability.
    #[serde(default)]
    pub careers: Vec<Career>,
}

impl Ability {
    pub fn eligible_for(&self, career: Career) -> bool {
        self.careers.contains(&career)
    }
}
