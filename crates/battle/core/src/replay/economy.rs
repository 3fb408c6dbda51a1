//! Collapse handlers for gold, items, cards, and props.

use crate::config::BattleConfig;
use crate::defs::ItemId;
use crate::delta::RuneOutcome;
use crate::event::{BattleEvent, EventSink};
use crate::state::{Battle, Card, PlayerId, RuneId, ShopId, Source, TreeId, UnitId};

use super::primitives;

pub fn gold_changed(
    battle: &mut Battle,
    player: PlayerId,
    amount: i32,
    sink: &mut dyn EventSink,
) -> bool {
    primitives::change_gold(battle, player, amount, sink)
}

/// Purchase: gold leaves the owning player, the item leaves the shop's
/// stock and enters the hero's inventory. Item modifiers arrive as their
/// own `ModifierApplied` deltas.
pub fn item_purchased(
    battle: &mut Battle,
    hero_id: UnitId,
    shop_id: ShopId,
    item: ItemId,
    price: i32,
    sink: &mut dyn EventSink,
) -> bool {
    let Some(owner) = battle.unit(hero_id).and_then(|u| u.owner()) else {
        return false;
    };
    if battle.shop(shop_id).is_none() {
        return false;
    }
    if !primitives::change_gold(battle, owner, -price, sink) {
        battle.note_skip("purchase gold: missing player");
    }
    if let Some(shop) = battle.shop_mut(shop_id)
        && let Some(index) = shop.stock.iter().position(|&stocked| stocked == item)
    {
        shop.stock.remove(index);
    }
    if let Some(hero) = battle.unit_mut(hero_id).and_then(|u| u.hero_mut()) {
        hero.items.push(item);
    }
    true
}

pub fn item_gained(battle: &mut Battle, hero_id: UnitId, item: ItemId) -> bool {
    let Some(hero) = battle.unit_mut(hero_id).and_then(|u| u.hero_mut()) else {
        return false;
    };
    hero.items.push(item);
    true
}

/// Draws past the hand limit drop the card; the producer is expected to
/// emit a `CardDiscarded` instead, so a full hand here means divergence.
pub fn card_drawn(
    battle: &mut Battle,
    player_id: PlayerId,
    card: Card,
    sink: &mut dyn EventSink,
) -> bool {
    let Some(player) = battle.player_mut(player_id) else {
        return false;
    };
    if player.hand.try_push(card).is_err() {
        return false;
    }
    sink.receive_event(BattleEvent::CardDrawn {
        player: player_id,
        card,
    });
    true
}

pub fn card_used(battle: &mut Battle, player_id: PlayerId, hand_index: usize) -> bool {
    let Some(player) = battle.player_mut(player_id) else {
        return false;
    };
    if hand_index >= player.hand.len() {
        return false;
    }
    player.hand.remove(hand_index);
    player.has_used_a_card_this_turn = true;
    true
}

pub fn card_discarded(battle: &mut Battle, player_id: PlayerId, hand_index: usize) -> bool {
    let Some(player) = battle.player_mut(player_id) else {
        return false;
    };
    if hand_index >= player.hand.len() {
        return false;
    }
    player.hand.remove(hand_index);
    true
}

/// Consumes the rune, frees its cell (unless the picking hero already
/// stands there), and applies the embedded outcome.
pub fn rune_picked_up(
    battle: &mut Battle,
    hero_id: UnitId,
    rune_id: RuneId,
    outcome: &RuneOutcome,
    sink: &mut dyn EventSink,
) -> bool {
    if battle.unit(hero_id).is_none() {
        return false;
    }
    let position = match battle.rune_mut(rune_id) {
        Some(rune) if !rune.consumed => {
            rune.consumed = true;
            rune.position
        }
        _ => return false,
    };
    if battle.living_unit_at(position).is_none() {
        battle.grid.release(position);
    }

    let source = Source::Unit {
        unit: hero_id,
        ability: None,
    };
    if outcome.gold != 0
        && let Some(owner) = battle.unit(hero_id).and_then(|u| u.owner())
    {
        primitives::change_gold(battle, owner, outcome.gold, sink);
    }
    if outcome.heal != 0 {
        primitives::change_health(battle, hero_id, outcome.heal, source, sink);
    }
    if let Some(modifier) = &outcome.modifier {
        primitives::apply_modifier(battle, hero_id, modifier.clone(), sink);
    }
    true
}

pub fn tree_destroyed(battle: &mut Battle, tree_id: TreeId) -> bool {
    let position = match battle.tree_mut(tree_id) {
        Some(tree) if !tree.destroyed => {
            tree.destroyed = true;
            tree.position
        }
        _ => return false,
    };
    battle.grid.release(position);
    true
}

pub fn experience_gained(battle: &mut Battle, hero_id: UnitId, amount: u32) -> bool {
    let Some(hero) = battle.unit_mut(hero_id).and_then(|u| u.hero_mut()) else {
        return false;
    };
    hero.experience += amount;
    true
}

/// The level value is embedded rather than derived so replay stays a pure
/// application of the log even if the level curve changes.
pub fn hero_leveled_up(battle: &mut Battle, hero_id: UnitId, level: u8) -> bool {
    let Some(hero) = battle.unit_mut(hero_id).and_then(|u| u.hero_mut()) else {
        return false;
    };
    hero.level = level.min(BattleConfig::MAX_HERO_LEVEL);
    true
}
