//! Collapse handlers for spawn deltas.
//!
//! Spawn deltas embed the fully constructed entity, so handlers only
//! append it, mark its cell occupied, and surface the observable event.

use crate::event::{BattleEvent, EventSink};
use crate::state::{Battle, Player, Rune, Shop, Tree, Unit};

pub fn unit_spawned(battle: &mut Battle, unit: &Unit, sink: &mut dyn EventSink) -> bool {
    if battle.unit(unit.id).is_some() {
        // Duplicate id: most likely a re-delivered delta during catch-up.
        return false;
    }
    battle.grid.occupy(unit.position);
    sink.receive_event(BattleEvent::UnitSpawned {
        unit: unit.id,
        position: unit.position,
    });
    battle.units.push(unit.clone());
    true
}

pub fn player_joined(battle: &mut Battle, player: &Player) -> bool {
    if battle.player(player.id).is_some() {
        return false;
    }
    battle.players.push(player.clone());
    true
}

pub fn rune_spawned(battle: &mut Battle, rune: &Rune) -> bool {
    if battle.rune(rune.id).is_some() {
        return false;
    }
    battle.grid.occupy(rune.position);
    battle.runes.push(*rune);
    true
}

pub fn shop_spawned(battle: &mut Battle, shop: &Shop) -> bool {
    if battle.shop(shop.id).is_some() {
        return false;
    }
    battle.grid.occupy(shop.position);
    battle.shops.push(shop.clone());
    true
}

pub fn tree_spawned(battle: &mut Battle, tree: &Tree) -> bool {
    if battle.tree(tree.id).is_some() {
        return false;
    }
    battle.grid.occupy(tree.position);
    battle.trees.push(*tree);
    true
}
