//! Catalog dataset validation. Run after loading authored data to surface
//! broken references and malformed tables before a campaign trips over them.

use std::collections::HashSet;
use std::fmt;

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Validate catalog tables: duplicate ids, dangling dealer stock, degenerate
/// upgrades and abilities, and malformed career level tables.
pub fn validate_catalog(catalog: &Catalog) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_duplicate_ids(&mut report, "ships", catalog.ships().iter().map(|s| s.id.as_str()));
    check_duplicate_ids(
        &mut report,
        "upgrades",
        catalog.upgrades().iter().map(|u| u.id.as_str()),
    );
    check_duplicate_ids(
        &mut report,
        "abilities",
        catalog.abilities().iter().map(|a| a.id.as_str()),
    );
    check_duplicate_ids(
        &mut report,
        "dealers",
        catalog.dealers().iter().map(|d| d.id.as_str()),
    );

    for ship in catalog.ships() {
        if ship.cost < 0 {
            report.push(
                ValidationSeverity::Error,
                format!("ships.{}", ship.id),
                format!("negative cost {}", ship.cost),
            );
        }
    }

    for upgrade in catalog.upgrades() {
        if upgrade.slots_required < 1 {
            report.push(
                ValidationSeverity::Error,
                format!("upgrades.{}", upgrade.id),
                "slots_required must be at least 1",
            );
        }
        if upgrade.cost < 0 {
            report.push(
                ValidationSeverity::Error,
                format!("upgrades.{}", upgrade.id),
                format!("negative cost {}", upgrade.cost),
            );
        }
    }

    for ability in catalog.abilities() {
        if ability.careers.is_empty() {
            report.push(
                ValidationSeverity::Warning,
                format!("abilities.{}", ability.id),
                "no eligible careers; ability can never be unlocked from a roster view",
            );
        }
        if ability.xp_cost < 0 {
            report.push(
                ValidationSeverity::Error,
                format!("abilities.{}", ability.id),
                format!("negative xp_cost {}", ability.xp_cost),
            );
        }
    }

    for dealer in catalog.dealers() {
        for ship_id in &dealer.ship_ids {
            if catalog.ship(ship_id).is_none() {
                report.push(
                    ValidationSeverity::Error,
                    format!("dealers.{}", dealer.id),
                    format!("stock references unknown ship '{ship_id}'"),
                );
            }
        }
    }

    for career in crate::catalog::Career::ALL {
        check_career_table(&mut report, catalog, career);
    }

    report
}

fn check_duplicate_ids<'a>(
    report: &mut ValidationReport,
    table: &str,
    ids: impl Iterator<Item = &'a str>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            report.push(ValidationSeverity::Error, table, "empty id");
        } else if !seen.insert(id) {
            report.push(
                ValidationSeverity::Error,
                table,
                format!("duplicate id '{id}'"),
            );
        }
    }
}

/// Level tables must start at 1, step by 1 and require monotonically
/// non-decreasing XP; a missing table is only a warning since the engine
/// treats it as "no progression defined".
fn check_career_table(report: &mut ValidationReport, catalog: &Catalog, career: crate::catalog::Career) {
    let levels = catalog.career_levels(career);
    let context = format!("progressions.{career}");
    if levels.is_empty() {
        report.push(
            ValidationSeverity::Warning,
            context,
            "no level table; pilots of this career can never level up",
        );
        return;
    }

    if levels[0].level != 1 {
        report.push(
            ValidationSeverity::Error,
            context.clone(),
            format!("table starts at level {}, expected 1", levels[0].level),
        );
    }
    for pair in levels.windows(2) {
        if pair[1].level != pair[0].level + 1 {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!(
                    "non-contiguous levels {} -> {}",
                    pair[0].level, pair[1].level
                ),
            );
        }
        if pair[1].xp_required < pair[0].xp_required {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!(
                    "xp_required decreases at level {} ({} -> {})",
                    pair[1].level, pair[0].xp_required, pair[1].xp_required
                ),
            );
        }
        if pair[1].bonus_upgrade_slots.len() < pair[0].bonus_upgrade_slots.len() {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!(
                    "bonus slot list shrinks at level {}; tables are cumulative",
                    pair[1].level
                ),
            );
        }
    }
}
