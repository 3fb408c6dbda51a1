//! The turn-action authority: validated actions in, resolved deltas out.
//!
//! [`produce_deltas`] is the single entry point. All validation (turn
//! ownership, move-point budgets, targeting fits, gold, charges, status
//! gates) happens here and only here; the emitted deltas carry fully
//! resolved outcomes (dice already rolled through the deterministic RNG),
//! so replay never validates and never rolls. A rejected action emits
//! nothing and leaves the battle untouched.

mod cast;
mod error;
mod movement;
mod shop;

pub use error::ActionError;

use crate::defs::{Definitions, ItemId, ModifierTemplate};
use crate::delta::Delta;
use crate::state::{
    AbilityId, Battle, Modifier, ModifierHandle, ModifierKind, PlayerId, Position, RuneId, ShopId,
    Source, Unit, UnitId,
};

/// One action a player may take during their turn slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnAction {
    Move { unit: UnitId, to: Position },
    EndTurn,
    CastAbility {
        caster: UnitId,
        ability: AbilityId,
        target: Position,
    },
    UseCard {
        hand_index: usize,
        target: Option<Position>,
    },
    UseItem { hero: UnitId, item: ItemId },
    PickUpRune { hero: UnitId, rune: RuneId },
    PurchaseItem {
        hero: UnitId,
        shop: ShopId,
        item: ItemId,
    },
}

/// Validates `action` for `player` against the current state and produces
/// the delta batch that realizes it. The deltas are the action's only
/// effect; the caller appends them and runs catch-up.
pub fn produce_deltas(
    battle: &Battle,
    defs: &dyn Definitions,
    player: PlayerId,
    action: &TurnAction,
) -> Result<Vec<Delta>, ActionError> {
    if !battle.has_started {
        return Err(ActionError::BattleNotStarted);
    }
    if battle.game_over {
        return Err(ActionError::BattleOver);
    }
    if battle.player(player).is_none() {
        return Err(ActionError::UnknownPlayer(player));
    }
    if battle.turning_player != Some(player) {
        return Err(ActionError::NotYourTurn(player));
    }

    match action {
        TurnAction::Move { unit, to } => movement::move_unit(battle, player, *unit, *to),
        TurnAction::EndTurn => Ok(end_turn(battle, player)),
        TurnAction::CastAbility {
            caster,
            ability,
            target,
        } => cast::cast_ability(battle, defs, player, *caster, *ability, *target),
        TurnAction::UseCard { hand_index, target } => {
            cast::use_card(battle, defs, player, *hand_index, *target)
        }
        TurnAction::UseItem { hero, item } => cast::use_item(battle, defs, player, *hero, *item),
        TurnAction::PickUpRune { hero, rune } => {
            movement::pick_up_rune(battle, player, *hero, *rune)
        }
        TurnAction::PurchaseItem { hero, shop, item } => {
            shop::purchase_item(battle, defs, player, *hero, *shop, *item)
        }
    }
}

/// Turn handoff: the ending player's `TurnEnded`, the next player's
/// `TurnStarted`, and a move-point refill for each of their living units.
fn end_turn(battle: &Battle, player: PlayerId) -> Vec<Delta> {
    let mut deltas = vec![Delta::TurnEnded { player }];
    if let Some(next) = next_player(battle, player) {
        deltas.push(Delta::TurnStarted { player: next });
        for unit in &battle.units {
            if !unit.dead && unit.owner() == Some(next) {
                deltas.push(Delta::MovePointsRestored { unit: unit.id });
            }
        }
    }
    deltas
}

/// The player after `current` in join order, wrapping around.
fn next_player(battle: &Battle, current: PlayerId) -> Option<PlayerId> {
    let index = battle.players.iter().position(|p| p.id == current)?;
    let next = (index + 1) % battle.players.len();
    Some(battle.players[next].id)
}

/// Looks up a unit the acting player controls and that can currently act.
fn controlled_unit(
    battle: &Battle,
    player: PlayerId,
    id: UnitId,
) -> Result<&Unit, ActionError> {
    let unit = battle.unit(id).ok_or(ActionError::UnknownUnit(id))?;
    if unit.owner() != Some(player) {
        return Err(ActionError::NotYourUnit(id));
    }
    if !unit.can_act() {
        return Err(ActionError::CannotAct(id));
    }
    Ok(unit)
}

/// Instantiates a modifier template, stamping a fresh handle and the
/// attribution source. `offset` keeps handles unique when one action
/// stamps several modifiers.
fn stamp_modifier(
    battle: &Battle,
    template: &ModifierTemplate,
    source: Source,
    offset: u32,
) -> Modifier {
    let base = battle.next_modifier_handle();
    Modifier {
        id: template.id,
        handle: ModifierHandle(base.0 + offset),
        source,
        kind: match template.duration {
            None => ModifierKind::Permanent,
            Some(turns) => ModifierKind::Expiring {
                turns_remaining: turns,
            },
        },
        changes: template.changes.clone(),
    }
}
