//! Replay-engine property tests: determinism, partial replay, occupancy,
//! modifier round-trips, and snapshot fast-forward.

use battle_core::{
    Attack, BaseStats, Battle, BattleConfig, BattleSnapshot, Card, Delta, DeploymentZone,
    HeroState, HeroType, Impact, Modifier, ModifierChange, ModifierHandle, ModifierId,
    ModifierKind, Player, PlayerId, Position, Rune, RuneId, RuneOutcome, RuneType, Shop, ShopId,
    Source, SpellId, StatField, Tree, TreeId, Unit, UnitId, UnitKind,
};

fn player(id: u8, zone_min: Position, zone_max: Position) -> Player {
    Player::new(
        PlayerId(id),
        format!("player-{id}"),
        DeploymentZone::new(zone_min, zone_max),
    )
}

fn hero(id: u32, owner: u8, position: Position) -> Unit {
    Unit::spawned(
        UnitId(id),
        UnitKind::Hero(HeroState {
            kind: HeroType::Warrior,
            owner: PlayerId(owner),
            level: 1,
            experience: 0,
            items: Vec::new(),
        }),
        position,
        BaseStats {
            max_health: 20,
            max_move_points: 5,
        },
        Some(Attack { damage: 4, range: 1 }),
        Vec::new(),
    )
}

/// A delta log touching every delta category: spawns, cards, movement,
/// combat, economy, modifiers, props, and turn flow.
fn scenario_log() -> Vec<Delta> {
    let strike = Source::Unit {
        unit: UnitId(0),
        ability: None,
    };
    vec![
        Delta::PlayerJoined {
            player: player(0, Position::new(0, 0), Position::new(1, 11)),
        },
        Delta::PlayerJoined {
            player: player(1, Position::new(10, 0), Position::new(11, 11)),
        },
        Delta::BattleStarted,
        Delta::HeroSpawned {
            unit: hero(0, 0, Position::new(0, 0)),
        },
        Delta::HeroSpawned {
            unit: hero(1, 1, Position::new(11, 11)),
        },
        Delta::ShopSpawned {
            shop: Shop {
                id: ShopId(0),
                position: Position::new(6, 0),
                stock: vec![],
            },
        },
        Delta::TreeSpawned {
            tree: Tree {
                id: TreeId(0),
                position: Position::new(6, 6),
                destroyed: false,
            },
        },
        Delta::RuneSpawned {
            rune: Rune {
                id: RuneId(0),
                kind: RuneType::Gold,
                position: Position::new(2, 0),
                consumed: false,
            },
        },
        Delta::TurnStarted {
            player: PlayerId(0),
        },
        Delta::CardDrawn {
            player: PlayerId(0),
            card: Card::Spell(SpellId::Fireball),
        },
        Delta::UnitMoved {
            unit: UnitId(0),
            from: Position::new(0, 0),
            to: Position::new(2, 0),
            move_cost: 2,
        },
        Delta::RunePickedUp {
            hero: UnitId(0),
            rune: RuneId(0),
            outcome: RuneOutcome {
                gold: 50,
                ..RuneOutcome::default()
            },
        },
        Delta::ModifierApplied {
            unit: UnitId(1),
            modifier: Modifier {
                id: ModifierId(1),
                handle: ModifierHandle(0),
                source: strike,
                kind: ModifierKind::Expiring { turns_remaining: 2 },
                changes: vec![ModifierChange::FieldChange {
                    field: StatField::MaxHealth,
                    delta: -5,
                }],
            },
        },
        Delta::HealthChanged {
            unit: UnitId(1),
            amount: -9,
            source: strike,
        },
        Delta::TurnEnded {
            player: PlayerId(0),
        },
        Delta::TurnStarted {
            player: PlayerId(1),
        },
        Delta::GoldChanged {
            player: PlayerId(1),
            amount: 30,
            source: Source::None,
        },
        Delta::TreeDestroyed {
            tree: TreeId(0),
            source: Source::None,
        },
        Delta::UnitDied {
            unit: UnitId(1),
            source: strike,
        },
        Delta::GameOver {
            winner: Some(PlayerId(0)),
        },
    ]
}

fn replay_all(deltas: &[Delta]) -> Battle {
    let mut battle = Battle::new(&BattleConfig::default(), 7);
    battle.append_deltas(deltas.to_vec());
    battle.catch_up();
    battle
}

#[test]
fn replaying_the_same_log_twice_is_byte_identical() {
    let log = scenario_log();
    let first = replay_all(&log);
    let second = replay_all(&log);
    assert_eq!(first, second);
    assert_eq!(hex::encode(first.digest()), hex::encode(second.digest()));
}

#[test]
fn partial_replay_matches_full_replay_at_every_split() {
    let log = scenario_log();
    let full = replay_all(&log);
    for split in 0..=log.len() {
        let mut staged = Battle::new(&BattleConfig::default(), 7);
        staged.append_deltas(log[..split].to_vec());
        staged.catch_up();
        staged.append_deltas(log[split..].to_vec());
        staged.catch_up();
        assert_eq!(staged, full, "divergence when splitting at {split}");
    }
}

#[test]
fn catch_up_at_head_is_a_no_op() {
    let mut battle = replay_all(&scenario_log());
    let digest = battle.digest();
    battle.catch_up();
    battle.catch_up();
    assert_eq!(battle.digest(), digest);
}

#[test]
fn occupancy_tracks_living_entities_exactly() {
    let battle = replay_all(&scenario_log());

    let mut expected: Vec<Position> = Vec::new();
    for unit in &battle.units {
        if !unit.dead {
            expected.push(unit.position);
        }
    }
    for rune in &battle.runes {
        if !rune.consumed && battle.units.iter().all(|u| u.dead || u.position != rune.position) {
            expected.push(rune.position);
        }
    }
    for shop in &battle.shops {
        expected.push(shop.position);
    }
    for tree in &battle.trees {
        if !tree.destroyed {
            expected.push(tree.position);
        }
    }
    expected.sort();
    expected.dedup();

    let mut occupied: Vec<Position> = battle
        .grid
        .cells()
        .filter(|c| c.occupied)
        .map(|c| c.position)
        .collect();
    occupied.sort();
    assert_eq!(occupied, expected);
}

#[test]
fn modifier_apply_then_remove_restores_bonus_totals() {
    let base = vec![
        Delta::PlayerJoined {
            player: player(0, Position::new(0, 0), Position::new(1, 11)),
        },
        Delta::BattleStarted,
        Delta::HeroSpawned {
            unit: hero(0, 0, Position::new(3, 3)),
        },
    ];
    let mut battle = replay_all(&base);
    let before = battle.unit(UnitId(0)).unwrap().bonus;

    battle.append_deltas([
        Delta::ModifierApplied {
            unit: UnitId(0),
            modifier: Modifier {
                id: ModifierId(2),
                handle: ModifierHandle(0),
                source: Source::None,
                kind: ModifierKind::Permanent,
                changes: vec![
                    ModifierChange::FieldChange {
                        field: StatField::AttackDamage,
                        delta: 3,
                    },
                    ModifierChange::FieldChange {
                        field: StatField::MaxMovePoints,
                        delta: 1,
                    },
                ],
            },
        },
        Delta::ModifierRemoved {
            handle: ModifierHandle(0),
        },
    ]);
    battle.catch_up();

    let unit = battle.unit(UnitId(0)).unwrap();
    assert_eq!(unit.bonus, before);
    assert!(unit.modifiers.is_empty());
    assert_eq!(battle.skipped_deltas, 0);
}

#[test]
fn expiring_modifiers_tick_on_the_owners_turn_end() {
    let mut battle = replay_all(&scenario_log()[..9]); // through the first TurnStarted
    battle.append_deltas([
        Delta::ModifierApplied {
            unit: UnitId(0),
            modifier: Modifier {
                id: ModifierId(3),
                handle: ModifierHandle(0),
                source: Source::None,
                kind: ModifierKind::Expiring { turns_remaining: 1 },
                changes: vec![ModifierChange::FieldChange {
                    field: StatField::MaxMovePoints,
                    delta: 2,
                }],
            },
        },
        // Enemy turn ends: unit 0 belongs to player 0, so nothing ticks.
        Delta::TurnEnded {
            player: PlayerId(1),
        },
    ]);
    battle.catch_up();
    assert_eq!(battle.unit(UnitId(0)).unwrap().modifiers.len(), 1);

    battle.append_deltas([Delta::TurnEnded {
        player: PlayerId(0),
    }]);
    battle.catch_up();
    assert!(battle.unit(UnitId(0)).unwrap().modifiers.is_empty());
    assert_eq!(battle.unit(UnitId(0)).unwrap().bonus.max_move_points, 0);
}

#[test]
fn missing_references_are_skipped_but_counted() {
    let mut battle = replay_all(&scenario_log());
    let before = battle.clone();
    battle.append_deltas([
        Delta::HealthChanged {
            unit: UnitId(42),
            amount: -5,
            source: Source::None,
        },
        Delta::ModifierRemoved {
            handle: ModifierHandle(99),
        },
    ]);
    battle.catch_up();
    assert_eq!(battle.skipped_deltas, 2);
    // Skips must not corrupt the rest of the state.
    assert_eq!(battle.units, before.units);
    assert_eq!(battle.players, before.players);
    assert_eq!(battle.grid, before.grid);
}

#[test]
fn snapshot_fast_forward_equals_full_replay() {
    let log = scenario_log();
    let full = replay_all(&log);

    // Authority replays a prefix and ships a snapshot.
    let prefix = replay_all(&log[..12]);
    let snapshot = BattleSnapshot::capture(&prefix);

    // A fresh mirror restores the snapshot, then replays only the suffix.
    let mut mirror = Battle::new(&BattleConfig::default(), 7);
    mirror.restore(snapshot);
    assert_eq!(mirror.delta_head(), 12);
    mirror.append_deltas(log.to_vec());
    // Deltas below the snapshot head must never be replayed again.
    mirror.catch_up();

    assert_eq!(hex::encode(mirror.digest()), hex::encode(full.digest()));
}

#[test]
fn cast_deltas_apply_embedded_impacts_verbatim() {
    let mut battle = replay_all(&scenario_log()[..9]);
    battle.append_deltas([Delta::SpellCast {
        player: PlayerId(0),
        spell: SpellId::Fireball,
        target: Position::new(11, 11),
        impacts: vec![Impact {
            unit: UnitId(1),
            health_change: -7,
            modifier: None,
            push_to: None,
        }],
    }]);
    battle.catch_up();
    assert_eq!(battle.unit(UnitId(1)).unwrap().health, 13);
}
