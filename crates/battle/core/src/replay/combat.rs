//! Collapse handlers for health, death, and resolved casts.
//!
//! Cast deltas embed their fully resolved outcome; these handlers apply
//! the embedded numeric and structural results through the shared
//! primitives and never re-derive targeting or randomness.

use crate::defs::{ItemId, SpellId};
use crate::delta::Impact;
use crate::event::{BattleEvent, EventSink};
use crate::state::{AbilityId, Battle, PlayerId, Source, UnitId};

use super::primitives;

pub fn health_changed(
    battle: &mut Battle,
    unit: UnitId,
    amount: i32,
    source: Source,
    sink: &mut dyn EventSink,
) -> bool {
    primitives::change_health(battle, unit, amount, source, sink)
}

/// Death is a flag plus cell release; the unit stays addressable by id.
pub fn unit_died(battle: &mut Battle, unit_id: UnitId, sink: &mut dyn EventSink) -> bool {
    let position = match battle.unit_mut(unit_id) {
        Some(unit) => {
            if unit.dead {
                return true;
            }
            unit.dead = true;
            unit.position
        }
        None => return false,
    };
    battle.grid.release(position);
    sink.receive_event(BattleEvent::UnitDied { unit: unit_id });
    true
}

pub fn ability_cast(
    battle: &mut Battle,
    caster: UnitId,
    ability: AbilityId,
    impacts: &[Impact],
    sink: &mut dyn EventSink,
) -> bool {
    {
        let Some(unit) = battle.unit_mut(caster) else {
            return false;
        };
        if let Some(slot) = unit.ability_mut(ability) {
            slot.change_charges(-1);
        }
    }
    let source = Source::Unit {
        unit: caster,
        ability: Some(ability),
    };
    apply_impacts(battle, impacts, source, sink);
    true
}

pub fn spell_cast(
    battle: &mut Battle,
    player: PlayerId,
    _spell: SpellId,
    impacts: &[Impact],
    sink: &mut dyn EventSink,
) -> bool {
    if battle.player(player).is_none() {
        return false;
    }
    apply_impacts(battle, impacts, Source::Player(player), sink);
    true
}

/// Using an item consumes it.
pub fn item_used(
    battle: &mut Battle,
    hero_id: UnitId,
    item: ItemId,
    impacts: &[Impact],
    sink: &mut dyn EventSink,
) -> bool {
    let Some(hero) = battle.unit_mut(hero_id).and_then(|u| u.hero_mut()) else {
        return false;
    };
    if let Some(index) = hero.items.iter().position(|&held| held == item) {
        hero.items.remove(index);
    }
    apply_impacts(battle, impacts, Source::Item(item), sink);
    true
}

/// Applies each embedded impact through the shared primitives. A missing
/// impact target is noted and skipped without aborting the rest.
fn apply_impacts(battle: &mut Battle, impacts: &[Impact], source: Source, sink: &mut dyn EventSink) {
    for impact in impacts {
        if impact.health_change != 0
            && !primitives::change_health(battle, impact.unit, impact.health_change, source, sink)
        {
            battle.note_skip("impact: missing unit");
            continue;
        }
        if let Some(to) = impact.push_to
            && !primitives::move_unit(battle, impact.unit, to)
        {
            battle.note_skip("impact push: missing unit");
        }
        if let Some(modifier) = &impact.modifier
            && !primitives::apply_modifier(battle, impact.unit, modifier.clone(), sink)
        {
            battle.note_skip("impact modifier: missing unit");
        }
    }
}
