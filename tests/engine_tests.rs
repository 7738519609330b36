//! Progression engine invariants: purchase/capacity, credit and XP gating,
//! slot exclusivity, level-up monotonicity, and failure atomicity.

use std::sync::Arc;

use outrider::catalog::{
    Ability, Career, CareerProgression, Catalog, LevelProgression, Ship, ShipDealer, SlotType,
    Upgrade,
};
use outrider::engine::{AbilitySlotRule, GameState, ProgressionEngine, SHIP_CAPACITY};

fn fixture_catalog() -> Arc<Catalog> {
    let ships = vec![
        Ship {
            id: "freighter".to_string(),
            name: "Wayfarer Freighter".to_string(),
            manufacturer: "Kuat Systems".to_string(),
            base_slots: vec![SlotType::Crew, SlotType::Modification],
            threat_value: 8,
            cost: 1800,
            description: String::new(),
        },
        Ship {
            id: "scout".to_string(),
            name: "Scurrg Scout".to_string(),
            manufacturer: "Karthakk Works".to_string(),
            base_slots: vec![SlotType::Missile],
            threat_value: 8,
            cost: 300,
            description: String::new(),
        },
        Ship {
            id: "gunship".to_string(),
            name: "Auzituck Gunship".to_string(),
            manufacturer: "Appazanna Engineering".to_string(),
            base_slots: vec![SlotType::Turret, SlotType::Turret],
            threat_value: 12,
            cost: 1000,
            description: String::new(),
        },
    ];
    let upgrades = vec![
        Upgrade {
            id: "smuggling-hold".to_string(),
            name: "Smuggling Hold".to_string(),
            slot_type: SlotType::Modification,
            slots_required: 1,
            threat_value: 4,
            cost: 200,
            description: String::new(),
        },
        Upgrade {
            id: "recon-droid".to_string(),
            name: "Recon Droid".to_string(),
            slot_type: SlotType::Crew,
            slots_required: 1,
            threat_value: 2,
            cost: 150,
            description: String::new(),
        },
        Upgrade {
            id: "twin-laser".to_string(),
            name: "Twin Laser Battery".to_string(),
            slot_type: SlotType::Turret,
            slots_required: 2,
            threat_value: 6,
            cost: 400,
            description: String::new(),
        },
    ];
    let abilities = vec![
        Ability {
            id: "silver-tongue".to_string(),
            name: "Silver Tongue".to_string(),
            xp_cost: 50,
            threat_value: 5,
            description: String::new(),
            required_level: 1,
            careers: vec![Career::Gambler],
        },
        Ability {
            id: "cold-read".to_string(),
            name: "Cold Read".to_string(),
            xp_cost: 40,
            threat_value: 3,
            description: String::new(),
            required_level: 1,
            careers: vec![Career::Gambler],
        },
    ];
    let dealers = vec![ShipDealer {
        id: "docks".to_string(),
        name: "Nar Shaddaa Docks".to_string(),
        description: String::new(),
        ship_ids: vec!["freighter".to_string(), "scout".to_string()],
    }];
    let progression = CareerProgression {
        career: Career::Gambler,
        levels: vec![
            LevelProgression {
                level: 1,
                xp_required: 0,
                ability_slots: 1,
                bonus_upgrade_slots: Vec::new(),
                threat_value: 10,
                initiative: Some(1),
            },
            LevelProgression {
                level: 2,
                xp_required: 100,
                ability_slots: 2,
                bonus_upgrade_slots: vec![SlotType::Modification],
                threat_value: 20,
                initiative: Some(2),
            },
            LevelProgression {
                level: 3,
                xp_required: 250,
                ability_slots: 2,
                bonus_upgrade_slots: vec![SlotType::Modification, SlotType::Crew],
                threat_value: 35,
                initiative: Some(2),
            },
        ],
    };
    Arc::new(Catalog::new(
        ships,
        upgrades,
        abilities,
        dealers,
        vec![progression],
    ))
}

fn engine() -> ProgressionEngine {
    ProgressionEngine::new(fixture_catalog())
}

fn snapshot(state: &GameState) -> String {
    serde_json::to_string(state).expect("state should serialize")
}

#[test]
fn purchase_scenario_matches_the_campaign_walkthrough() {
    let engine = engine();
    let mut state = GameState::default();

    let han = engine.create_pilot(&mut state, "Han", Career::Gambler);
    {
        let pilot = state.pilot(&han).expect("pilot exists");
        assert_eq!(pilot.level, 1);
        assert_eq!(pilot.xp, 0);
        assert_eq!(pilot.credits, 2000);
        assert!(pilot.ships.is_empty());
    }

    // 1800-credit freighter leaves 200.
    assert!(engine.purchase_ship(&mut state, &han, "freighter", "").is_some());
    assert_eq!(state.pilot(&han).unwrap().credits, 200);
    assert_eq!(state.pilot(&han).unwrap().ships.len(), 1);

    // 300-credit scout is unaffordable; state must be untouched.
    let before = snapshot(&state);
    assert!(engine.purchase_ship(&mut state, &han, "scout", "").is_none());
    assert_eq!(snapshot(&state), before, "failed purchase must not mutate");

    engine.add_credits(&mut state, &han, 500);
    assert_eq!(state.pilot(&han).unwrap().credits, 700);
    assert!(engine.purchase_ship(&mut state, &han, "scout", "").is_some());
    assert_eq!(state.pilot(&han).unwrap().ships.len(), 2);

    // Third ship hits the capacity cap regardless of credits.
    engine.add_credits(&mut state, &han, 5000);
    let before = snapshot(&state);
    assert!(engine.purchase_ship(&mut state, &han, "scout", "").is_none());
    assert_eq!(snapshot(&state), before);
    assert!(state.pilot(&han).unwrap().ships.len() <= SHIP_CAPACITY);
}

#[test]
fn purchase_ship_uses_catalog_name_when_custom_name_empty() {
    let engine = engine();
    let mut state = GameState::default();
    let id = engine.create_pilot(&mut state, "Han", Career::Gambler);

    let default_named = engine
        .purchase_ship(&mut state, &id, "scout", "")
        .expect("purchase should succeed");
    engine.add_credits(&mut state, &id, 1000);
    let custom_named = engine
        .purchase_ship(&mut state, &id, "scout", "Mist Hunter")
        .expect("purchase should succeed");

    let pilot = state.pilot(&id).unwrap();
    assert_eq!(pilot.ship(&default_named).unwrap().name, "Scurrg Scout");
    assert_eq!(pilot.ship(&custom_named).unwrap().name, "Mist Hunter");
}

#[test]
fn spend_credits_never_overdraws() {
    let engine = engine();
    let mut state = GameState::default();
    let id = engine.create_pilot(&mut state, "Lando", Career::Gambler);

    assert!(!engine.spend_credits(&mut state, &id, 2001));
    assert_eq!(state.pilot(&id).unwrap().credits, 2000);
    assert!(engine.spend_credits(&mut state, &id, 2000));
    assert_eq!(state.pilot(&id).unwrap().credits, 0);
    assert!(!engine.spend_credits(&mut state, &id, 1));
    assert!(!engine.spend_credits(&mut state, "nobody", 1));
}

#[test]
fn level_up_requires_xp_and_advances_one_level_at_a_time() {
    let engine = engine();
    let mut state = GameState::default();
    let id = engine.create_pilot(&mut state, "Sabacc", Career::Gambler);

    assert!(!engine.level_up_pilot(&mut state, &id), "no xp yet");

    // Enough xp for level 3 outright, but levels advance one at a time.
    engine.add_xp(&mut state, &id, 300);
    assert!(engine.level_up_pilot(&mut state, &id));
    assert_eq!(state.pilot(&id).unwrap().level, 2);
    assert_eq!(state.pilot(&id).unwrap().xp, 300, "xp is not deducted");

    assert!(engine.level_up_pilot(&mut state, &id));
    assert_eq!(state.pilot(&id).unwrap().level, 3);

    // Table ends at level 3.
    let before = serde_json::to_string(&state).unwrap();
    assert!(!engine.level_up_pilot(&mut state, &id));
    assert_eq!(serde_json::to_string(&state).unwrap(), before);
}

#[test]
fn level_up_fails_without_career_table() {
    let engine = engine();
    let mut state = GameState::default();
    // Miner has no table in the fixture catalog.
    let id = engine.create_pilot(&mut state, "Dig", Career::Miner);
    engine.add_xp(&mut state, &id, 10_000);
    assert!(!engine.level_up_pilot(&mut state, &id));
    assert_eq!(state.pilot(&id).unwrap().level, 1);
}

#[test]
fn unlock_ability_spends_xp_and_rejects_duplicates() {
    let engine = engine();
    let mut state = GameState::default();
    let id = engine.create_pilot(&mut state, "Han", Career::Gambler);

    assert!(!engine.unlock_ability(&mut state, &id, "silver-tongue"), "xp short");
    engine.add_xp(&mut state, &id, 60);
    assert!(engine.unlock_ability(&mut state, &id, "silver-tongue"));
    {
        let pilot = state.pilot(&id).unwrap();
        assert_eq!(pilot.xp, 10);
        assert_eq!(pilot.unlocked_abilities, vec!["silver-tongue".to_string()]);
    }

    let before = snapshot(&state);
    assert!(!engine.unlock_ability(&mut state, &id, "silver-tongue"), "already unlocked");
    assert!(!engine.unlock_ability(&mut state, &id, "mind-trick"), "unknown ability");
    assert_eq!(snapshot(&state), before);
}

#[test]
fn ability_slot_rule_engine_caps_unlocks_by_career_table() {
    let strict = ProgressionEngine::new(fixture_catalog())
        .with_ability_slot_rule(AbilitySlotRule::Engine);
    let mut state = GameState::default();
    let id = strict.create_pilot(&mut state, "Han", Career::Gambler);
    strict.add_xp(&mut state, &id, 200);

    // Level 1 grants a single ability slot.
    assert!(strict.unlock_ability(&mut state, &id, "silver-tongue"));
    assert!(!strict.unlock_ability(&mut state, &id, "cold-read"), "slots full");

    // Level 2 raises the cap to two.
    assert!(strict.level_up_pilot(&mut state, &id));
    assert!(strict.unlock_ability(&mut state, &id, "cold-read"));
}

#[test]
fn ability_slot_rule_presentation_ignores_capacity() {
    let engine = engine();
    let mut state = GameState::default();
    let id = engine.create_pilot(&mut state, "Han", Career::Gambler);
    engine.add_xp(&mut state, &id, 200);

    assert!(engine.unlock_ability(&mut state, &id, "silver-tongue"));
    assert!(
        engine.unlock_ability(&mut state, &id, "cold-read"),
        "default rule leaves capacity to the presentation layer"
    );
}

#[test]
fn install_upgrade_validates_type_count_and_occupancy() {
    let engine = engine();
    let mut state = GameState::default();
    let id = engine.create_pilot(&mut state, "Han", Career::Gambler);
    let ship = engine
        .purchase_ship(&mut state, &id, "freighter", "Falcon")
        .expect("purchase should succeed");
    engine.add_credits(&mut state, &id, 2000);

    // Slot 0 is crew, slot 1 is modification.
    assert!(
        !engine.install_upgrade(&mut state, &id, &ship, "smuggling-hold", &[0]),
        "type mismatch"
    );
    assert!(
        !engine.install_upgrade(&mut state, &id, &ship, "smuggling-hold", &[0, 1]),
        "wrong index count"
    );
    assert!(
        !engine.install_upgrade(&mut state, &id, &ship, "smuggling-hold", &[7]),
        "index out of range"
    );
    assert!(engine.install_upgrade(&mut state, &id, &ship, "smuggling-hold", &[1]));

    let before = snapshot(&state);
    assert!(
        !engine.install_upgrade(&mut state, &id, &ship, "smuggling-hold", &[1]),
        "slot already occupied"
    );
    assert_eq!(snapshot(&state), before);
}

#[test]
fn multi_slot_upgrade_claims_distinct_unfilled_slots() {
    let engine = engine();
    let mut state = GameState::default();
    let id = engine.create_pilot(&mut state, "Lowhhrick", Career::Gambler);
    let ship = engine
        .purchase_ship(&mut state, &id, "gunship", "")
        .expect("purchase should succeed");
    engine.add_credits(&mut state, &id, 2000);

    assert!(
        !engine.install_upgrade(&mut state, &id, &ship, "twin-laser", &[0, 0]),
        "duplicate indices inside one install"
    );
    assert!(engine.install_upgrade(&mut state, &id, &ship, "twin-laser", &[0, 1]));

    // Both turret slots are now taken; nothing else fits.
    let slots = outrider::engine::available_slots(engine.catalog(), &state, &id, &ship);
    assert!(slots.iter().all(|s| s.filled));
    assert!(!engine.install_upgrade(&mut state, &id, &ship, "twin-laser", &[0, 1]));
}

#[test]
fn installed_upgrades_never_share_a_slot_index() {
    let engine = engine();
    let mut state = GameState::default();
    let id = engine.create_pilot(&mut state, "Han", Career::Gambler);
    let ship = engine
        .purchase_ship(&mut state, &id, "freighter", "")
        .expect("purchase should succeed");
    engine.add_credits(&mut state, &id, 2000);

    assert!(engine.install_upgrade(&mut state, &id, &ship, "recon-droid", &[0]));
    assert!(engine.install_upgrade(&mut state, &id, &ship, "smuggling-hold", &[1]));

    let pilot = state.pilot(&id).unwrap();
    let mut seen = std::collections::HashSet::new();
    for installed in &pilot.ship(&ship).unwrap().upgrades {
        for &index in &installed.slot_indices {
            assert!(seen.insert(index), "slot {index} claimed twice");
        }
    }
}

#[test]
fn bonus_slot_from_leveling_becomes_installable() {
    let engine = engine();
    let mut state = GameState::default();
    let id = engine.create_pilot(&mut state, "Han", Career::Gambler);
    let ship = engine
        .purchase_ship(&mut state, &id, "freighter", "")
        .expect("purchase should succeed");
    engine.add_credits(&mut state, &id, 2000);

    // Index 2 does not exist at level 1.
    assert!(!engine.install_upgrade(&mut state, &id, &ship, "smuggling-hold", &[2]));

    engine.add_xp(&mut state, &id, 100);
    assert!(engine.level_up_pilot(&mut state, &id));

    // Level 2 appends a bonus modification slot at index 2.
    let slots = outrider::engine::available_slots(engine.catalog(), &state, &id, &ship);
    assert_eq!(slots.len(), 3);
    assert!(engine.install_upgrade(&mut state, &id, &ship, "smuggling-hold", &[2]));
}

#[test]
fn remove_upgrade_frees_slots_without_refund() {
    let engine = engine();
    let mut state = GameState::default();
    let id = engine.create_pilot(&mut state, "Han", Career::Gambler);
    let ship = engine
        .purchase_ship(&mut state, &id, "freighter", "")
        .expect("purchase should succeed");
    engine.add_credits(&mut state, &id, 2000);

    assert!(engine.install_upgrade(&mut state, &id, &ship, "smuggling-hold", &[1]));
    let credits_after_install = state.pilot(&id).unwrap().credits;

    engine.remove_upgrade(&mut state, &id, &ship, "smuggling-hold");
    let pilot = state.pilot(&id).unwrap();
    assert!(pilot.ship(&ship).unwrap().upgrades.is_empty());
    assert_eq!(pilot.credits, credits_after_install, "no refund on removal");

    // Freed slot accepts a new install.
    assert!(engine.install_upgrade(&mut state, &id, &ship, "smuggling-hold", &[1]));

    // Removing something that is not installed is a silent no-op.
    let before = snapshot(&state);
    engine.remove_upgrade(&mut state, &id, &ship, "twin-laser");
    assert_eq!(snapshot(&state), before);
}

#[test]
fn sell_ship_credits_the_agreed_offer_and_discards_upgrades() {
    let engine = engine();
    let mut state = GameState::default();
    let id = engine.create_pilot(&mut state, "Han", Career::Gambler);
    let ship = engine
        .purchase_ship(&mut state, &id, "freighter", "")
        .expect("purchase should succeed");
    engine.add_credits(&mut state, &id, 500);
    assert!(engine.install_upgrade(&mut state, &id, &ship, "smuggling-hold", &[1]));
    let credits_before_sale = state.pilot(&id).unwrap().credits;

    assert!(engine.sell_ship(&mut state, &id, &ship, 1000));
    let pilot = state.pilot(&id).unwrap();
    assert_eq!(pilot.credits, credits_before_sale + 1000);
    assert!(pilot.ships.is_empty());

    let before = snapshot(&state);
    assert!(!engine.sell_ship(&mut state, &id, &ship, 1000), "ship already gone");
    assert_eq!(snapshot(&state), before);
}

#[test]
fn operations_on_unknown_pilots_leave_state_untouched() {
    let engine = engine();
    let mut state = GameState::default();
    engine.create_pilot(&mut state, "Han", Career::Gambler);
    let before = snapshot(&state);

    engine.add_xp(&mut state, "ghost", 100);
    engine.add_credits(&mut state, "ghost", 100);
    assert!(!engine.spend_credits(&mut state, "ghost", 10));
    assert!(!engine.level_up_pilot(&mut state, "ghost"));
    assert!(!engine.unlock_ability(&mut state, "ghost", "silver-tongue"));
    assert!(engine.purchase_ship(&mut state, "ghost", "scout", "").is_none());
    assert!(!engine.sell_ship(&mut state, "ghost", "x", 100));
    assert!(!engine.install_upgrade(&mut state, "ghost", "x", "smuggling-hold", &[0]));
    engine.remove_upgrade(&mut state, "ghost", "x", "smuggling-hold");
    assert!(!engine.delete_pilot(&mut state, "ghost"));

    assert_eq!(snapshot(&state), before);
}
