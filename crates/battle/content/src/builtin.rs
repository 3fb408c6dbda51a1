//! The built-in definition catalog.
//!
//! Constructed in code so the core crates work without any data files.
//! External catalogs loaded through the `loaders` feature replace or
//! extend these tables wholesale.

use battle_core::defs::{
    AbilityDefinition, AbilityDefinitionKind, CreepDefinition, CreepType, EffectDefinition,
    HeroDefinition, HeroType, ItemDefinition, ItemId, MinionDefinition, MinionType,
    ModifierTemplate, SpellDefinition, SpellId,
};
use battle_core::state::{
    AbilityId, Attack, BaseStats, ModifierChange, ModifierId, SpecialState, StatField, Status,
};
use battle_core::targeting::{Selector, Targeting};

use crate::Catalog;

// Ability identities. Unique across the whole catalog.
pub const STRIKE: AbilityId = AbilityId(1);
pub const SHOCKWAVE: AbilityId = AbilityId(2);
pub const LONGSHOT: AbilityId = AbilityId(3);
pub const VOLLEY: AbilityId = AbilityId(4);
pub const FIRE_CONE: AbilityId = AbilityId(5);
pub const FROST_NOVA: AbilityId = AbilityId(6);
pub const LIFE_DRAIN: AbilityId = AbilityId(7);
pub const CURSE: AbilityId = AbilityId(8);
pub const RAISE_DEAD: AbilityId = AbilityId(9);
pub const GOLEM_SLAM: AbilityId = AbilityId(20);

// Modifier identities stamped onto produced modifier instances.
const FROST_ROOT: ModifierId = ModifierId(101);
const CURSE_WEAKNESS: ModifierId = ModifierId(102);
const BOOTS_SPEED: ModifierId = ModifierId(110);
const BLADE_FURY: ModifierId = ModifierId(111);
const AXE_DOUBLING: ModifierId = ModifierId(112);
const ENTANGLE_ROOT: ModifierId = ModifierId(120);

/// Builds the built-in catalog.
pub fn builtin() -> Catalog {
    Catalog {
        heroes: heroes(),
        creeps: creeps(),
        minions: minions(),
        items: items(),
        spells: spells(),
    }
}

fn active(charges: u8, targeting: Targeting) -> AbilityDefinitionKind {
    AbilityDefinitionKind::Active { charges, targeting }
}

fn heroes() -> Vec<HeroDefinition> {
    vec![
        HeroDefinition {
            kind: HeroType::Warrior,
            name: "Warrior".into(),
            base: BaseStats {
                max_health: 22,
                max_move_points: 4,
            },
            attack: Some(Attack { damage: 5, range: 1 }),
            abilities: vec![
                AbilityDefinition {
                    id: STRIKE,
                    name: "Strike".into(),
                    kind: active(
                        8,
                        Targeting::ManhattanRadius {
                            radius: 1,
                            include_caster: false,
                            selector: Selector::Single,
                        },
                    ),
                    effect: EffectDefinition {
                        add_attack_damage: true,
                        ..EffectDefinition::default()
                    },
                },
                AbilityDefinition {
                    id: SHOCKWAVE,
                    name: "Shockwave".into(),
                    kind: active(
                        2,
                        Targeting::Line {
                            length: 3,
                            selector: Selector::Line { length: 3 },
                        },
                    ),
                    effect: EffectDefinition {
                        damage: 4,
                        damage_variance: 2,
                        ..EffectDefinition::default()
                    },
                },
            ],
        },
        HeroDefinition {
            kind: HeroType::Ranger,
            name: "Ranger".into(),
            base: BaseStats {
                max_health: 16,
                max_move_points: 5,
            },
            attack: Some(Attack { damage: 4, range: 3 }),
            abilities: vec![
                AbilityDefinition {
                    id: LONGSHOT,
                    name: "Longshot".into(),
                    kind: active(
                        4,
                        Targeting::FirstInLine {
                            length: 4,
                            selector: Selector::Single,
                        },
                    ),
                    effect: EffectDefinition {
                        damage_variance: 2,
                        add_attack_damage: true,
                        ..EffectDefinition::default()
                    },
                },
                AbilityDefinition {
                    id: VOLLEY,
                    name: "Volley".into(),
                    kind: active(
                        2,
                        Targeting::ManhattanRadius {
                            radius: 3,
                            include_caster: false,
                            selector: Selector::Rect { radius: 1 },
                        },
                    ),
                    effect: EffectDefinition {
                        damage: 3,
                        damage_variance: 1,
                        ..EffectDefinition::default()
                    },
                },
            ],
        },
        HeroDefinition {
            kind: HeroType::Sorceress,
            name: "Sorceress".into(),
            base: BaseStats {
                max_health: 14,
                max_move_points: 4,
            },
            attack: Some(Attack { damage: 2, range: 2 }),
            abilities: vec![
                AbilityDefinition {
                    id: FIRE_CONE,
                    name: "Fire Cone".into(),
                    kind: active(
                        3,
                        Targeting::Line {
                            length: 2,
                            selector: Selector::TShape {
                                stem_length: 2,
                                arm_length: 1,
                            },
                        },
                    ),
                    effect: EffectDefinition {
                        damage: 5,
                        damage_variance: 3,
                        ..EffectDefinition::default()
                    },
                },
                AbilityDefinition {
                    id: FROST_NOVA,
                    name: "Frost Nova".into(),
                    kind: active(
                        2,
                        Targeting::RectAroundCaster {
                            radius: 1,
                            selector: Selector::Single,
                        },
                    ),
                    effect: EffectDefinition {
                        damage: 2,
                        modifier: Some(ModifierTemplate {
                            id: FROST_ROOT,
                            duration: Some(2),
                            changes: vec![ModifierChange::ApplyStatus(Status::ROOTED)],
                        }),
                        ..EffectDefinition::default()
                    },
                },
            ],
        },
        HeroDefinition {
            kind: HeroType::Warlock,
            name: "Warlock".into(),
            base: BaseStats {
                max_health: 18,
                max_move_points: 4,
            },
            attack: Some(Attack { damage: 3, range: 2 }),
            abilities: vec![
                AbilityDefinition {
                    id: LIFE_DRAIN,
                    name: "Life Drain".into(),
                    kind: active(
                        4,
                        Targeting::ManhattanRadius {
                            radius: 2,
                            include_caster: false,
                            selector: Selector::Single,
                        },
                    ),
                    effect: EffectDefinition {
                        damage: 4,
                        damage_variance: 1,
                        ..EffectDefinition::default()
                    },
                },
                AbilityDefinition {
                    id: CURSE,
                    name: "Curse".into(),
                    kind: active(
                        3,
                        Targeting::ManhattanRadius {
                            radius: 3,
                            include_caster: false,
                            selector: Selector::Single,
                        },
                    ),
                    effect: EffectDefinition {
                        modifier: Some(ModifierTemplate {
                            id: CURSE_WEAKNESS,
                            duration: Some(3),
                            changes: vec![ModifierChange::FieldChange {
                                field: StatField::AttackDamage,
                                delta: -2,
                            }],
                        }),
                        ..EffectDefinition::default()
                    },
                },
                AbilityDefinition {
                    id: RAISE_DEAD,
                    name: "Raise Dead".into(),
                    kind: active(
                        1,
                        Targeting::AnyFreeCell {
                            selector: Selector::Single,
                        },
                    ),
                    effect: EffectDefinition {
                        summon: Some(MinionType::SkeletalWarrior),
                        ..EffectDefinition::default()
                    },
                },
            ],
        },
    ]
}

fn creeps() -> Vec<CreepDefinition> {
    vec![
        CreepDefinition {
            kind: CreepType::Wolf,
            name: "Wolf".into(),
            base: BaseStats {
                max_health: 8,
                max_move_points: 3,
            },
            attack: Some(Attack { damage: 2, range: 1 }),
            abilities: Vec::new(),
            bounty: 20,
        },
        CreepDefinition {
            kind: CreepType::Boar,
            name: "Boar".into(),
            base: BaseStats {
                max_health: 12,
                max_move_points: 2,
            },
            attack: Some(Attack { damage: 3, range: 1 }),
            abilities: Vec::new(),
            bounty: 30,
        },
        CreepDefinition {
            kind: CreepType::StoneGolem,
            name: "Stone Golem".into(),
            base: BaseStats {
                max_health: 24,
                max_move_points: 1,
            },
            attack: Some(Attack { damage: 4, range: 1 }),
            abilities: vec![AbilityDefinition {
                id: GOLEM_SLAM,
                name: "Slam".into(),
                kind: active(
                    1,
                    Targeting::RectAroundCaster {
                        radius: 1,
                        selector: Selector::Rect { radius: 1 },
                    },
                ),
                effect: EffectDefinition {
                    damage: 3,
                    push: 1,
                    ..EffectDefinition::default()
                },
            }],
            bounty: 60,
        },
    ]
}

fn minions() -> Vec<MinionDefinition> {
    vec![
        MinionDefinition {
            kind: MinionType::SkeletalWarrior,
            name: "Skeletal Warrior".into(),
            base: BaseStats {
                max_health: 6,
                max_move_points: 3,
            },
            attack: Some(Attack { damage: 2, range: 1 }),
        },
        MinionDefinition {
            kind: MinionType::Treant,
            name: "Treant".into(),
            base: BaseStats {
                max_health: 10,
                max_move_points: 2,
            },
            attack: Some(Attack { damage: 1, range: 1 }),
        },
    ]
}

fn items() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition {
            id: ItemId::HealingSalve,
            name: "Healing Salve".into(),
            price: 20,
            passive: None,
            on_use: Some(EffectDefinition {
                heal: 8,
                ..EffectDefinition::default()
            }),
        },
        ItemDefinition {
            id: ItemId::BootsOfSpeed,
            name: "Boots of Speed".into(),
            price: 40,
            passive: Some(ModifierTemplate {
                id: BOOTS_SPEED,
                duration: None,
                changes: vec![ModifierChange::FieldChange {
                    field: StatField::MaxMovePoints,
                    delta: 2,
                }],
            }),
            on_use: None,
        },
        ItemDefinition {
            id: ItemId::BladeOfFury,
            name: "Blade of Fury".into(),
            price: 60,
            passive: Some(ModifierTemplate {
                id: BLADE_FURY,
                duration: None,
                changes: vec![ModifierChange::FieldChange {
                    field: StatField::AttackDamage,
                    delta: 3,
                }],
            }),
            on_use: None,
        },
        ItemDefinition {
            id: ItemId::DoublingAxe,
            name: "Doubling Axe".into(),
            price: 120,
            passive: Some(ModifierTemplate {
                id: AXE_DOUBLING,
                duration: None,
                changes: vec![ModifierChange::ApplySpecialState(
                    SpecialState::DAMAGE_DOUBLED,
                )],
            }),
            on_use: None,
        },
    ]
}

fn spells() -> Vec<SpellDefinition> {
    vec![
        SpellDefinition {
            id: SpellId::Fireball,
            name: "Fireball".into(),
            selector: Selector::Rect { radius: 1 },
            effect: EffectDefinition {
                damage: 7,
                damage_variance: 3,
                ..EffectDefinition::default()
            },
        },
        SpellDefinition {
            id: SpellId::HealingWave,
            name: "Healing Wave".into(),
            selector: Selector::Rect { radius: 1 },
            effect: EffectDefinition {
                heal: 6,
                ..EffectDefinition::default()
            },
        },
        SpellDefinition {
            id: SpellId::Entangle,
            name: "Entangle".into(),
            selector: Selector::Single,
            effect: EffectDefinition {
                modifier: Some(ModifierTemplate {
                    id: ENTANGLE_ROOT,
                    duration: Some(2),
                    changes: vec![ModifierChange::ApplyStatus(Status::ROOTED)],
                }),
                ..EffectDefinition::default()
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use battle_core::defs::Definitions;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_identity_has_a_definition() {
        let catalog = builtin();
        for kind in HeroType::iter() {
            assert!(catalog.hero(kind).is_some(), "missing hero {kind}");
        }
        for kind in CreepType::iter() {
            assert!(catalog.creep(kind).is_some(), "missing creep {kind}");
        }
        for kind in MinionType::iter() {
            assert!(catalog.minion(kind).is_some(), "missing minion {kind}");
        }
        for id in ItemId::iter() {
            assert!(catalog.item(id).is_some(), "missing item {id}");
        }
        for id in SpellId::iter() {
            assert!(catalog.spell(id).is_some(), "missing spell {id}");
        }
    }

    #[test]
    fn ability_ids_are_unique() {
        let catalog = builtin();
        let mut seen = std::collections::BTreeSet::new();
        let hero_abilities = catalog.heroes.iter().flat_map(|h| &h.abilities);
        let creep_abilities = catalog.creeps.iter().flat_map(|c| &c.abilities);
        for ability in hero_abilities.chain(creep_abilities) {
            assert!(seen.insert(ability.id), "duplicate ability {:?}", ability.id);
        }
    }

    #[test]
    fn summons_reference_defined_minions() {
        let catalog = builtin();
        let hero_abilities = catalog.heroes.iter().flat_map(|h| &h.abilities);
        let creep_abilities = catalog.creeps.iter().flat_map(|c| &c.abilities);
        let mut summons = 0;
        for ability in hero_abilities.chain(creep_abilities) {
            if let Some(kind) = ability.effect.summon {
                summons += 1;
                assert!(catalog.minion(kind).is_some(), "undefined minion {kind}");
            }
        }
        assert!(summons > 0);
    }

    #[test]
    fn every_item_does_something() {
        for item in builtin().items {
            assert!(
                item.passive.is_some() || item.on_use.is_some(),
                "inert item {}",
                item.id
            );
        }
    }
}
