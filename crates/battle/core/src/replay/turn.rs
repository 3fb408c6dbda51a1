//! Collapse handlers for battle lifecycle and turn flow.

use crate::state::{Battle, ModifierHandle, ModifierKind, PlayerId};

use super::modifier;

pub fn battle_started(battle: &mut Battle) -> bool {
    battle.has_started = true;
    true
}

pub fn turn_started(battle: &mut Battle, player: PlayerId) -> bool {
    if battle.player(player).is_none() {
        return false;
    }
    battle.turning_player = Some(player);
    true
}

/// End of turn: expiring modifiers on the ending player's units tick down
/// (unowned creeps and minions always tick), expired ones are removed,
/// per-turn flags reset, and the turn passes to the next player in join
/// order.
pub fn turn_ended(battle: &mut Battle, player: PlayerId) -> bool {
    if battle.player(player).is_none() {
        return false;
    }

    let mut expired: Vec<ModifierHandle> = Vec::new();
    for unit in &mut battle.units {
        let ticks = match unit.owner() {
            Some(owner) => owner == player,
            None => true,
        };
        if !ticks {
            continue;
        }
        for m in &mut unit.modifiers {
            if matches!(m.kind, ModifierKind::Expiring { .. }) && m.tick() {
                expired.push(m.handle);
            }
        }
    }
    for handle in expired {
        if !modifier::modifier_removed(battle, handle) {
            battle.note_skip("expired modifier vanished before removal");
        }
    }

    if let Some(ending) = battle.player_mut(player) {
        ending.has_used_a_card_this_turn = false;
    }
    battle.turning_player = next_player(battle, player);
    true
}

pub fn game_over(battle: &mut Battle, winner: Option<PlayerId>) -> bool {
    battle.turning_player = None;
    battle.winner = winner;
    battle.game_over = true;
    true
}

/// The player after `current` in join order, wrapping around.
fn next_player(battle: &Battle, current: PlayerId) -> Option<PlayerId> {
    let index = battle.players.iter().position(|p| p.id == current)?;
    let next = (index + 1) % battle.players.len();
    Some(battle.players[next].id)
}
