//! Move and rune-pickup actions.

use crate::config::BattleConfig;
use crate::delta::{Delta, RuneOutcome};
use crate::state::{
    Battle, ModifierChange, ModifierId, ModifierKind, PlayerId, Position, Rune, RuneId, RuneType,
    Source, StatField, Status, UnitId,
};

use super::ActionError;

/// Modifier identity reserved for the haste rune's move-point buff.
const HASTE_RUNE_MODIFIER: ModifierId = ModifierId(900);

/// Validates a move along the BFS-cheapest route and emits `UnitMoved`.
/// Heroes traverse rune cells and automatically pick up a rune they land
/// on.
pub(super) fn move_unit(
    battle: &Battle,
    player: PlayerId,
    unit_id: UnitId,
    to: Position,
) -> Result<Vec<Delta>, ActionError> {
    let unit = super::controlled_unit(battle, player, unit_id)?;
    if unit.status.contains(Status::ROOTED) {
        return Err(ActionError::Rooted(unit_id));
    }
    let from = unit.position;
    let is_hero = unit.hero().is_some();

    let map = battle
        .path_costs(from, Some(to), is_hero)
        .ok_or(ActionError::NoPath { from, to })?;
    let cost = map.cost(to).ok_or(ActionError::NoPath { from, to })? as i32;
    if cost > unit.move_points {
        return Err(ActionError::NotEnoughMovePoints {
            needed: cost,
            available: unit.move_points,
        });
    }

    let mut deltas = vec![Delta::UnitMoved {
        unit: unit_id,
        from,
        to,
        move_cost: cost,
    }];
    if is_hero && let Some(rune) = battle.rune_at(to) {
        deltas.push(Delta::RunePickedUp {
            hero: unit_id,
            rune: rune.id,
            outcome: resolve_rune_outcome(battle, rune),
        });
    }
    Ok(deltas)
}

/// Picks up an adjacent (or underfoot) rune without moving.
pub(super) fn pick_up_rune(
    battle: &Battle,
    player: PlayerId,
    hero_id: UnitId,
    rune_id: RuneId,
) -> Result<Vec<Delta>, ActionError> {
    let hero = super::controlled_unit(battle, player, hero_id)?;
    if hero.hero().is_none() {
        return Err(ActionError::NotAHero(hero_id));
    }
    let rune = battle.rune(rune_id).ok_or(ActionError::UnknownRune(rune_id))?;
    if rune.consumed {
        return Err(ActionError::RuneConsumed(rune_id));
    }
    if hero.position.manhattan(rune.position) > 1 {
        return Err(ActionError::NotAdjacent {
            actor: hero.position,
            target: rune.position,
        });
    }
    Ok(vec![Delta::RunePickedUp {
        hero: hero_id,
        rune: rune_id,
        outcome: resolve_rune_outcome(battle, rune),
    }])
}

/// Resolves a rune's payload at production time, so the pickup delta
/// replays without consulting rune rules.
fn resolve_rune_outcome(battle: &Battle, rune: &Rune) -> RuneOutcome {
    match rune.kind {
        RuneType::Gold => RuneOutcome {
            gold: BattleConfig::GOLD_RUNE_VALUE,
            ..RuneOutcome::default()
        },
        RuneType::Regeneration => RuneOutcome {
            heal: BattleConfig::REGENERATION_RUNE_HEAL,
            ..RuneOutcome::default()
        },
        RuneType::Haste => RuneOutcome {
            modifier: Some(crate::state::Modifier {
                id: HASTE_RUNE_MODIFIER,
                handle: battle.next_modifier_handle(),
                source: Source::None,
                kind: ModifierKind::Expiring {
                    turns_remaining: BattleConfig::HASTE_RUNE_DURATION,
                },
                changes: vec![ModifierChange::FieldChange {
                    field: StatField::MaxMovePoints,
                    delta: BattleConfig::HASTE_RUNE_MOVE_BONUS,
                }],
            }),
            ..RuneOutcome::default()
        },
    }
}
