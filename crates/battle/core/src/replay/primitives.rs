//! Shared mutation primitives used by the collapse handlers.
//!
//! Every primitive is a total function of (state, arguments): it either
//! applies its effect and reports `true`, or reports `false` when the
//! referenced entity is missing. Skip accounting happens in the caller;
//! see [`super::collapse_delta`]. Nothing here rolls dice or reads
//! clocks.

use crate::event::{BattleEvent, EventSink};
use crate::state::{Battle, Modifier, PlayerId, Position, Source, UnitId};
use crate::stats;

/// Clamped health adjustment. Never kills; death is its own delta.
pub fn change_health(
    battle: &mut Battle,
    unit_id: UnitId,
    amount: i32,
    source: Source,
    sink: &mut dyn EventSink,
) -> bool {
    let Some(unit) = battle.unit_mut(unit_id) else {
        return false;
    };
    let max = unit.max_health();
    unit.health = (unit.health + amount).clamp(0, max);
    sink.receive_event(BattleEvent::HealthChanged {
        unit: unit_id,
        amount,
        source,
    });
    true
}

pub fn change_gold(
    battle: &mut Battle,
    player_id: PlayerId,
    amount: i32,
    sink: &mut dyn EventSink,
) -> bool {
    let Some(player) = battle.player_mut(player_id) else {
        return false;
    };
    player.gold += amount;
    sink.receive_event(BattleEvent::GoldChanged {
        player: player_id,
        amount,
    });
    true
}

/// Relocates a unit, toggling source and destination occupancy.
pub fn move_unit(battle: &mut Battle, unit_id: UnitId, to: Position) -> bool {
    let (from, dead) = match battle.unit_mut(unit_id) {
        Some(unit) => {
            let from = unit.position;
            unit.position = to;
            (from, unit.dead)
        }
        None => return false,
    };
    battle.grid.release(from);
    if !dead {
        battle.grid.occupy(to);
    }
    true
}

/// Attaches a modifier and runs the full stat recompute.
pub fn apply_modifier(
    battle: &mut Battle,
    unit_id: UnitId,
    modifier: Modifier,
    sink: &mut dyn EventSink,
) -> bool {
    let Some(unit) = battle.unit_mut(unit_id) else {
        return false;
    };
    unit.modifiers.push(modifier.clone());
    stats::recalculate(unit);
    sink.receive_event(BattleEvent::ModifierApplied {
        unit: unit_id,
        modifier,
    });
    true
}
