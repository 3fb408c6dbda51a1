//! Item purchase actions.

use crate::defs::{Definitions, ItemId};
use crate::delta::Delta;
use crate::state::{Battle, PlayerId, ShopId, Source, UnitId};

use super::ActionError;

/// A hero standing next to a shop buys a stocked item. The purchase delta
/// carries the resolved price; a passive item also emits its modifier.
pub(super) fn purchase_item(
    battle: &Battle,
    defs: &dyn Definitions,
    player: PlayerId,
    hero_id: UnitId,
    shop_id: ShopId,
    item: ItemId,
) -> Result<Vec<Delta>, ActionError> {
    let hero = super::controlled_unit(battle, player, hero_id)?;
    if hero.hero().is_none() {
        return Err(ActionError::NotAHero(hero_id));
    }
    let shop = battle.shop(shop_id).ok_or(ActionError::UnknownShop(shop_id))?;
    if hero.position.manhattan(shop.position) > 1 {
        return Err(ActionError::NotAdjacent {
            actor: hero.position,
            target: shop.position,
        });
    }
    if !shop.stock.contains(&item) {
        return Err(ActionError::ItemNotStocked(item));
    }
    let def = defs.item(item).ok_or(ActionError::MissingDefinition("item"))?;
    let gold = battle
        .player(player)
        .ok_or(ActionError::UnknownPlayer(player))?
        .gold;
    if gold < def.price {
        return Err(ActionError::NotEnoughGold {
            item,
            price: def.price,
            gold,
        });
    }

    let mut deltas = vec![Delta::ItemPurchased {
        hero: hero_id,
        shop: shop_id,
        item,
        price: def.price,
    }];
    if let Some(passive) = &def.passive {
        deltas.push(Delta::ModifierApplied {
            unit: hero_id,
            modifier: super::stamp_modifier(battle, passive, Source::Item(item), 0),
        });
    }
    Ok(deltas)
}
