//! Collapse handlers for movement and action-point deltas.

use crate::state::{AbilityId, Battle, Position, UnitId};

use super::primitives;

/// Relocation plus move-point spend. The cost is never validated against
/// remaining points at replay time: validation is the producer's job, and
/// the replay engine trusts the log.
pub fn unit_moved(battle: &mut Battle, unit: UnitId, to: Position, move_cost: i32) -> bool {
    if !primitives::move_unit(battle, unit, to) {
        return false;
    }
    if let Some(unit) = battle.unit_mut(unit) {
        unit.move_points -= move_cost;
    }
    true
}

/// Forced relocation. Costs nothing.
pub fn unit_relocated(battle: &mut Battle, unit: UnitId, to: Position) -> bool {
    primitives::move_unit(battle, unit, to)
}

pub fn move_points_changed(battle: &mut Battle, unit_id: UnitId, amount: i32) -> bool {
    let Some(unit) = battle.unit_mut(unit_id) else {
        return false;
    };
    unit.move_points += amount;
    true
}

pub fn move_points_restored(battle: &mut Battle, unit_id: UnitId) -> bool {
    let Some(unit) = battle.unit_mut(unit_id) else {
        return false;
    };
    unit.move_points = unit.max_move_points();
    true
}

pub fn ability_charges_changed(
    battle: &mut Battle,
    unit_id: UnitId,
    ability: AbilityId,
    amount: i8,
) -> bool {
    let Some(unit) = battle.unit_mut(unit_id) else {
        return false;
    };
    let Some(ability) = unit.ability_mut(ability) else {
        return false;
    };
    ability.change_charges(amount);
    true
}
