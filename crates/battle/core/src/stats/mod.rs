//! The modifier stack: recomputing a unit's effective stats from its
//! active modifiers.
//!
//! [`recalculate`] folds every modifier's changes in list order into a
//! zeroed bonus struct, sets status/special flags idempotently, applies
//! the `damage_doubled` post-hoc transform, adjusts current health and
//! move points by max-delta headroom, and swaps ability overrides out and
//! back in from scratch. Recomputation happens only on modifier add and
//! remove, never per tick, so the naive override reversal is acceptable.

use crate::state::{
    BenchedAbility, BonusStats, ModifierChange, SpecialState, StatField, Status, Unit,
};

/// Recomputes `unit`'s bonus stats, status flags, and ability overrides
/// from its modifier list.
pub fn recalculate(unit: &mut Unit) {
    let old_max_health = unit.max_health();
    let old_max_move_points = unit.max_move_points();

    unapply_overrides(unit);
    unit.bonus = BonusStats::default();
    unit.status = Status::empty();
    unit.special = SpecialState::empty();

    // Fold changes in list order. Overrides are collected and applied
    // after the numeric pass so a doubling modifier earlier in the list
    // still sees every later field change.
    let mut overrides = Vec::new();
    for modifier in &unit.modifiers {
        for change in &modifier.changes {
            match change {
                ModifierChange::FieldChange { field, delta } => {
                    add_field(&mut unit.bonus, *field, *delta);
                }
                ModifierChange::ApplyStatus(status) => {
                    unit.status |= *status;
                }
                ModifierChange::ApplySpecialState(state) => {
                    unit.special |= *state;
                }
                ModifierChange::AbilityOverride {
                    original,
                    replacement,
                } => {
                    overrides.push((*original, replacement.clone()));
                }
            }
        }
    }

    // damage_doubled must see the final bonus-inclusive damage, not the
    // bonus alone: effective = (base + bonus) * 2, so the bonus becomes
    // (base + bonus) * 2 - base.
    if unit.special.contains(SpecialState::DAMAGE_DOUBLED)
        && let Some(attack) = unit.attack
    {
        unit.bonus.attack_damage = attack.damage + 2 * unit.bonus.attack_damage;
    }

    settle_current(
        &mut unit.health,
        old_max_health,
        unit.base.max_health + unit.bonus.max_health,
    );
    settle_current(
        &mut unit.move_points,
        old_max_move_points,
        unit.base.max_move_points + unit.bonus.max_move_points,
    );

    for (original, replacement) in overrides {
        apply_override(unit, original, replacement);
    }
}

/// Adds a single field delta to `unit`'s bonus stats and settles current
/// health/move points against the new maximum. Used by delta replay to
/// invert a removed modifier's field changes without a full recompute.
pub fn apply_field_delta(unit: &mut Unit, field: StatField, delta: i32) {
    match field {
        StatField::MaxHealth => {
            let old_max = unit.max_health();
            unit.bonus.max_health += delta;
            let new_max = unit.max_health();
            settle_current(&mut unit.health, old_max, new_max);
        }
        StatField::MaxMovePoints => {
            let old_max = unit.max_move_points();
            unit.bonus.max_move_points += delta;
            let new_max = unit.max_move_points();
            settle_current(&mut unit.move_points, old_max, new_max);
        }
        StatField::AttackDamage => unit.bonus.attack_damage += delta,
        StatField::AttackRange => unit.bonus.attack_range += delta,
    }
}

fn add_field(bonus: &mut BonusStats, field: StatField, delta: i32) {
    match field {
        StatField::MaxHealth => bonus.max_health += delta,
        StatField::MaxMovePoints => bonus.max_move_points += delta,
        StatField::AttackDamage => bonus.attack_damage += delta,
        StatField::AttackRange => bonus.attack_range += delta,
    }
}

/// Headroom rule for current values when the maximum moves: a gained
/// maximum is gained as current headroom; a lost maximum clamps but never
/// raises.
fn settle_current(current: &mut i32, old_max: i32, new_max: i32) {
    let diff = new_max - old_max;
    if diff > 0 {
        *current += diff;
    } else {
        *current = (*current).min(new_max);
    }
    if *current < 0 {
        *current = 0;
    }
}

/// Restores every benched ability into its slot, newest first.
fn unapply_overrides(unit: &mut Unit) {
    while let Some(benched) = unit.ability_bench.pop() {
        if let Some(slot) = unit
            .abilities
            .iter_mut()
            .find(|a| a.id == benched.replaced_by)
        {
            *slot = benched.original;
        }
    }
}

fn apply_override(unit: &mut Unit, original: crate::state::AbilityId, replacement: crate::state::Ability) {
    let Some(slot) = unit.abilities.iter_mut().find(|a| a.id == original) else {
        return;
    };
    let benched = BenchedAbility {
        original: slot.clone(),
        replaced_by: replacement.id,
    };
    *slot = replacement;
    unit.ability_bench.push(benched);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        Ability, AbilityId, AbilityKind, Attack, BaseStats, Modifier, ModifierHandle, ModifierId,
        ModifierKind, Position, Source, UnitId, UnitKind,
    };
    use crate::defs::CreepType;

    fn test_unit() -> Unit {
        Unit::spawned(
            UnitId(1),
            UnitKind::Creep {
                kind: CreepType::Wolf,
            },
            Position::ORIGIN,
            BaseStats {
                max_health: 10,
                max_move_points: 3,
            },
            Some(Attack {
                damage: 4,
                range: 1,
            }),
            vec![Ability {
                id: AbilityId(1),
                kind: AbilityKind::Passive,
            }],
        )
    }

    fn field_modifier(handle: u32, field: StatField, delta: i32) -> Modifier {
        Modifier {
            id: ModifierId(1),
            handle: ModifierHandle(handle),
            source: Source::None,
            kind: ModifierKind::Permanent,
            changes: vec![ModifierChange::FieldChange { field, delta }],
        }
    }

    #[test]
    fn field_changes_accumulate_additively() {
        let mut unit = test_unit();
        unit.modifiers
            .push(field_modifier(1, StatField::AttackDamage, 2));
        unit.modifiers
            .push(field_modifier(2, StatField::AttackDamage, 3));
        recalculate(&mut unit);
        assert_eq!(unit.bonus.attack_damage, 5);
        assert_eq!(unit.attack_damage(), Some(9));
    }

    #[test]
    fn max_health_gain_raises_current_by_the_same_amount() {
        let mut unit = test_unit();
        unit.health = 6;
        unit.modifiers
            .push(field_modifier(1, StatField::MaxHealth, 4));
        recalculate(&mut unit);
        assert_eq!(unit.max_health(), 14);
        assert_eq!(unit.health, 10);
    }

    #[test]
    fn max_health_loss_clamps_but_never_raises() {
        // +2 then -5 on a 10/10 unit: bonus -3, current clamped to 7.
        let mut unit = test_unit();
        unit.modifiers
            .push(field_modifier(1, StatField::MaxHealth, 2));
        recalculate(&mut unit);
        unit.modifiers
            .push(field_modifier(2, StatField::MaxHealth, -5));
        recalculate(&mut unit);
        assert_eq!(unit.bonus.max_health, -3);
        assert_eq!(unit.max_health(), 7);
        assert_eq!(unit.health, 7);

        // healing back up is the caller's business; a further recompute
        // must not raise current.
        recalculate(&mut unit);
        assert_eq!(unit.health, 7);
    }

    #[test]
    fn statuses_are_idempotent() {
        let mut unit = test_unit();
        let stun = Modifier {
            id: ModifierId(2),
            handle: ModifierHandle(1),
            source: Source::None,
            kind: ModifierKind::Expiring { turns_remaining: 2 },
            changes: vec![
                ModifierChange::ApplyStatus(Status::STUNNED),
                ModifierChange::ApplyStatus(Status::STUNNED),
            ],
        };
        unit.modifiers.push(stun.clone());
        unit.modifiers.push(Modifier {
            handle: ModifierHandle(2),
            ..stun
        });
        recalculate(&mut unit);
        assert!(unit.status.contains(Status::STUNNED));

        unit.modifiers.clear();
        recalculate(&mut unit);
        assert!(unit.status.is_empty());
    }

    #[test]
    fn damage_doubled_sees_bonus_inclusive_damage() {
        let mut unit = test_unit();
        unit.modifiers
            .push(field_modifier(1, StatField::AttackDamage, 3));
        unit.modifiers.push(Modifier {
            id: ModifierId(3),
            handle: ModifierHandle(2),
            source: Source::None,
            kind: ModifierKind::Permanent,
            changes: vec![ModifierChange::ApplySpecialState(
                SpecialState::DAMAGE_DOUBLED,
            )],
        });
        recalculate(&mut unit);
        // (4 + 3) * 2 = 14 total; bonus carries 14 - 4 = 10.
        assert_eq!(unit.bonus.attack_damage, 10);
        assert_eq!(unit.attack_damage(), Some(14));
    }

    #[test]
    fn doubling_order_is_irrelevant_in_the_fold() {
        let mut doubled_first = test_unit();
        doubled_first.modifiers.push(Modifier {
            id: ModifierId(3),
            handle: ModifierHandle(1),
            source: Source::None,
            kind: ModifierKind::Permanent,
            changes: vec![ModifierChange::ApplySpecialState(
                SpecialState::DAMAGE_DOUBLED,
            )],
        });
        doubled_first
            .modifiers
            .push(field_modifier(2, StatField::AttackDamage, 3));
        recalculate(&mut doubled_first);
        assert_eq!(doubled_first.attack_damage(), Some(14));
    }

    #[test]
    fn apply_then_remove_restores_bonus_totals() {
        let mut unit = test_unit();
        unit.modifiers
            .push(field_modifier(1, StatField::AttackDamage, 2));
        recalculate(&mut unit);
        let before = unit.bonus;

        unit.modifiers
            .push(field_modifier(2, StatField::MaxMovePoints, 2));
        recalculate(&mut unit);
        unit.modifiers.retain(|m| m.handle != ModifierHandle(2));
        recalculate(&mut unit);

        assert_eq!(unit.bonus, before);
    }

    #[test]
    fn ability_override_swaps_and_swaps_back() {
        let replacement = Ability {
            id: AbilityId(99),
            kind: AbilityKind::Passive,
        };
        let mut unit = test_unit();
        unit.modifiers.push(Modifier {
            id: ModifierId(4),
            handle: ModifierHandle(1),
            source: Source::None,
            kind: ModifierKind::Expiring { turns_remaining: 1 },
            changes: vec![ModifierChange::AbilityOverride {
                original: AbilityId(1),
                replacement: replacement.clone(),
            }],
        });
        recalculate(&mut unit);
        assert!(unit.ability(AbilityId(99)).is_some());
        assert!(unit.ability(AbilityId(1)).is_none());
        assert_eq!(unit.ability_bench.len(), 1);

        unit.modifiers.clear();
        recalculate(&mut unit);
        assert!(unit.ability(AbilityId(1)).is_some());
        assert!(unit.ability(AbilityId(99)).is_none());
        assert!(unit.ability_bench.is_empty());
    }

    #[test]
    fn field_delta_inversion_round_trips() {
        let mut unit = test_unit();
        unit.health = 10;
        apply_field_delta(&mut unit, StatField::MaxHealth, 5);
        assert_eq!(unit.health, 15);
        apply_field_delta(&mut unit, StatField::MaxHealth, -5);
        assert_eq!(unit.max_health(), 10);
        assert_eq!(unit.health, 10);

        apply_field_delta(&mut unit, StatField::MaxMovePoints, 2);
        assert_eq!(unit.move_points, 5);
        apply_field_delta(&mut unit, StatField::MaxMovePoints, -2);
        assert_eq!(unit.max_move_points(), 3);
        assert_eq!(unit.move_points, 3);
    }
}
