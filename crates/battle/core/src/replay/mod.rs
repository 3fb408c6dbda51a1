//! The replay engine: collapsing the delta log into live state.
//!
//! [`catch_up_to_head`] applies every delta between the battle's replay
//! head and the end of the log, in order, exactly once. It is idempotent:
//! calling it again without new deltas is a no-op. Handlers are grouped by
//! concern in the submodules; each returns `false` when a referenced
//! entity is missing, which [`collapse_delta`] records through the
//! battle's skip counter instead of aborting the catch-up.

mod combat;
mod economy;
mod modifier;
mod movement;
mod primitives;
mod spawn;
mod turn;

use crate::delta::Delta;
use crate::event::EventSink;
use crate::state::Battle;

/// Applies all deltas from the current replay head up to the end of the
/// log. Already-applied deltas are never revisited.
pub fn catch_up_to_head(battle: &mut Battle, sink: &mut dyn EventSink) {
    while battle.delta_head() < battle.deltas.len() {
        let delta = battle.deltas[battle.delta_head()].clone();
        battle.delta_head += 1;
        collapse_delta(battle, &delta, sink);
    }
}

/// Applies one delta to the battle. Missing references make the delta a
/// recorded no-op; the match is exhaustive so new variants cannot be
/// silently dropped.
pub fn collapse_delta(battle: &mut Battle, delta: &Delta, sink: &mut dyn EventSink) {
    let applied = match delta {
        Delta::BattleStarted => turn::battle_started(battle),
        Delta::TurnStarted { player } => turn::turn_started(battle, *player),
        Delta::TurnEnded { player } => turn::turn_ended(battle, *player),
        Delta::GameOver { winner } => turn::game_over(battle, *winner),

        Delta::PlayerJoined { player } => spawn::player_joined(battle, player),
        Delta::HeroSpawned { unit }
        | Delta::CreepSpawned { unit }
        | Delta::MinionSpawned { unit, .. } => spawn::unit_spawned(battle, unit, sink),
        Delta::RuneSpawned { rune } => spawn::rune_spawned(battle, rune),
        Delta::ShopSpawned { shop } => spawn::shop_spawned(battle, shop),
        Delta::TreeSpawned { tree } => spawn::tree_spawned(battle, tree),

        Delta::UnitMoved {
            unit, to, move_cost, ..
        } => movement::unit_moved(battle, *unit, *to, *move_cost),
        Delta::UnitPushed { unit, to, .. } | Delta::UnitTeleported { unit, to, .. } => {
            movement::unit_relocated(battle, *unit, *to)
        }
        Delta::MovePointsChanged { unit, amount } => {
            movement::move_points_changed(battle, *unit, *amount)
        }
        Delta::MovePointsRestored { unit } => movement::move_points_restored(battle, *unit),
        Delta::AbilityChargesChanged {
            unit,
            ability,
            amount,
        } => movement::ability_charges_changed(battle, *unit, *ability, *amount),

        Delta::HealthChanged {
            unit,
            amount,
            source,
        } => combat::health_changed(battle, *unit, *amount, *source, sink),
        Delta::UnitDied { unit, .. } => combat::unit_died(battle, *unit, sink),
        Delta::AbilityCast {
            caster,
            ability,
            impacts,
            ..
        } => combat::ability_cast(battle, *caster, *ability, impacts, sink),
        Delta::SpellCast {
            player,
            spell,
            impacts,
            ..
        } => combat::spell_cast(battle, *player, *spell, impacts, sink),
        Delta::ItemUsed {
            hero,
            item,
            impacts,
        } => combat::item_used(battle, *hero, *item, impacts, sink),

        Delta::GoldChanged { player, amount, .. } => {
            economy::gold_changed(battle, *player, *amount, sink)
        }
        Delta::ItemPurchased {
            hero,
            shop,
            item,
            price,
        } => economy::item_purchased(battle, *hero, *shop, *item, *price, sink),
        Delta::ItemGained { hero, item, .. } => economy::item_gained(battle, *hero, *item),

        Delta::CardDrawn { player, card } => economy::card_drawn(battle, *player, *card, sink),
        Delta::CardUsed {
            player, hand_index, ..
        } => economy::card_used(battle, *player, *hand_index),
        Delta::CardDiscarded { player, hand_index } => {
            economy::card_discarded(battle, *player, *hand_index)
        }

        Delta::ModifierApplied { unit, modifier } => {
            modifier::modifier_applied(battle, *unit, modifier, sink)
        }
        Delta::ModifierRemoved { handle } => modifier::modifier_removed(battle, *handle),

        Delta::RunePickedUp {
            hero,
            rune,
            outcome,
        } => economy::rune_picked_up(battle, *hero, *rune, outcome, sink),
        Delta::TreeDestroyed { tree, .. } => economy::tree_destroyed(battle, *tree),

        Delta::ExperienceGained { hero, amount } => {
            economy::experience_gained(battle, *hero, *amount)
        }
        Delta::HeroLeveledUp { hero, level } => economy::hero_leveled_up(battle, *hero, *level),
    };

    if !applied {
        battle.note_skip(delta_name(delta));
    }
}

fn delta_name(delta: &Delta) -> &'static str {
    match delta {
        Delta::BattleStarted => "BattleStarted",
        Delta::TurnStarted { .. } => "TurnStarted",
        Delta::TurnEnded { .. } => "TurnEnded",
        Delta::GameOver { .. } => "GameOver",
        Delta::PlayerJoined { .. } => "PlayerJoined",
        Delta::HeroSpawned { .. } => "HeroSpawned",
        Delta::CreepSpawned { .. } => "CreepSpawned",
        Delta::MinionSpawned { .. } => "MinionSpawned",
        Delta::RuneSpawned { .. } => "RuneSpawned",
        Delta::ShopSpawned { .. } => "ShopSpawned",
        Delta::TreeSpawned { .. } => "TreeSpawned",
        Delta::UnitMoved { .. } => "UnitMoved",
        Delta::UnitPushed { .. } => "UnitPushed",
        Delta::UnitTeleported { .. } => "UnitTeleported",
        Delta::MovePointsChanged { .. } => "MovePointsChanged",
        Delta::MovePointsRestored { .. } => "MovePointsRestored",
        Delta::AbilityChargesChanged { .. } => "AbilityChargesChanged",
        Delta::HealthChanged { .. } => "HealthChanged",
        Delta::UnitDied { .. } => "UnitDied",
        Delta::AbilityCast { .. } => "AbilityCast",
        Delta::SpellCast { .. } => "SpellCast",
        Delta::ItemUsed { .. } => "ItemUsed",
        Delta::GoldChanged { .. } => "GoldChanged",
        Delta::ItemPurchased { .. } => "ItemPurchased",
        Delta::ItemGained { .. } => "ItemGained",
        Delta::CardDrawn { .. } => "CardDrawn",
        Delta::CardUsed { .. } => "CardUsed",
        Delta::CardDiscarded { .. } => "CardDiscarded",
        Delta::ModifierApplied { .. } => "ModifierApplied",
        Delta::ModifierRemoved { .. } => "ModifierRemoved",
        Delta::RunePickedUp { .. } => "RunePickedUp",
        Delta::TreeDestroyed { .. } => "TreeDestroyed",
        Delta::ExperienceGained { .. } => "ExperienceGained",
        Delta::HeroLeveledUp { .. } => "HeroLeveledUp",
    }
}

impl Battle {
    /// Convenience wrapper over [`catch_up_to_head`] without event
    /// observation.
    pub fn catch_up(&mut self) {
        let mut sink = crate::event::NullSink;
        catch_up_to_head(self, &mut sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::defs::{HeroType, ItemId, MinionType};
    use crate::delta::Impact;
    use crate::event::{NullSink, RecordingSink};
    use crate::state::{
        Ability, AbilityId, AbilityKind, Attack, BaseStats, Card, DeploymentZone, HeroState,
        Player, PlayerId, Position, Shop, ShopId, Source, Unit, UnitId, UnitKind,
    };
    use crate::targeting::{Selector, Targeting};

    fn test_battle() -> Battle {
        Battle::new(&BattleConfig::default(), 7)
    }

    fn test_player(id: u8) -> Player {
        Player::new(
            PlayerId(id),
            format!("player-{id}"),
            DeploymentZone::new(Position::new(0, 0), Position::new(1, 11)),
        )
    }

    fn test_hero(id: u32, owner: PlayerId, position: Position) -> Unit {
        Unit::spawned(
            UnitId(id),
            UnitKind::Hero(HeroState {
                kind: HeroType::Warrior,
                owner,
                level: 1,
                experience: 0,
                items: Vec::new(),
            }),
            position,
            BaseStats {
                max_health: 20,
                max_move_points: 5,
            },
            Some(Attack {
                damage: 4,
                range: 1,
            }),
            Vec::new(),
        )
    }

    #[test]
    fn catch_up_applies_pending_deltas_once() {
        let mut battle = test_battle();
        battle.append_deltas([
            Delta::PlayerJoined {
                player: test_player(0),
            },
            Delta::BattleStarted,
            Delta::HeroSpawned {
                unit: test_hero(0, PlayerId(0), Position { x: 2, y: 3 }),
            },
        ]);
        battle.catch_up();

        assert!(battle.has_started);
        assert_eq!(battle.delta_head(), 3);
        assert!(battle.grid.is_occupied(Position { x: 2, y: 3 }));

        // Re-running without new deltas changes nothing.
        let before = battle.clone();
        battle.catch_up();
        assert_eq!(battle, before);
    }

    #[test]
    fn catch_up_resumes_from_head_after_partial_delivery() {
        let mut full = test_battle();
        let mut staged = test_battle();
        let deltas = vec![
            Delta::PlayerJoined {
                player: test_player(0),
            },
            Delta::HeroSpawned {
                unit: test_hero(0, PlayerId(0), Position { x: 1, y: 1 }),
            },
            Delta::HealthChanged {
                unit: UnitId(0),
                amount: -6,
                source: Source::None,
            },
        ];

        full.append_deltas(deltas.clone());
        full.catch_up();

        staged.append_deltas(deltas[..2].to_vec());
        staged.catch_up();
        staged.append_deltas(deltas[2..].to_vec());
        staged.catch_up();

        assert_eq!(full, staged);
    }

    #[test]
    fn missing_reference_is_skipped_and_counted() {
        let mut battle = test_battle();
        battle.append_deltas([Delta::HealthChanged {
            unit: UnitId(99),
            amount: -3,
            source: Source::None,
        }]);
        battle.catch_up();

        assert_eq!(battle.skipped_deltas, 1);
        assert_eq!(battle.delta_head(), 1);
    }

    #[test]
    fn duplicate_spawn_does_not_double_insert() {
        let mut battle = test_battle();
        let hero = test_hero(0, PlayerId(0), Position { x: 0, y: 0 });
        battle.append_deltas([
            Delta::PlayerJoined {
                player: test_player(0),
            },
            Delta::HeroSpawned { unit: hero.clone() },
            Delta::HeroSpawned { unit: hero },
        ]);
        battle.catch_up();

        assert_eq!(battle.units.len(), 1);
        assert_eq!(battle.skipped_deltas, 1);
    }

    #[test]
    fn events_surface_through_the_sink() {
        let mut battle = test_battle();
        battle.append_deltas([
            Delta::PlayerJoined {
                player: test_player(0),
            },
            Delta::HeroSpawned {
                unit: test_hero(0, PlayerId(0), Position { x: 4, y: 4 }),
            },
            Delta::HealthChanged {
                unit: UnitId(0),
                amount: -5,
                source: Source::None,
            },
            Delta::UnitDied {
                unit: UnitId(0),
                source: Source::None,
            },
        ]);
        let mut sink = RecordingSink::new();
        catch_up_to_head(&mut battle, &mut sink);

        let events = sink.drain();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn turn_end_passes_to_next_player_in_join_order() {
        let mut battle = test_battle();
        battle.append_deltas([
            Delta::PlayerJoined {
                player: test_player(0),
            },
            Delta::PlayerJoined {
                player: test_player(1),
            },
            Delta::BattleStarted,
            Delta::TurnStarted {
                player: PlayerId(0),
            },
            Delta::TurnEnded {
                player: PlayerId(0),
            },
        ]);
        battle.catch_up();
        assert_eq!(battle.turning_player, Some(PlayerId(1)));

        battle.append_deltas([Delta::TurnEnded {
            player: PlayerId(1),
        }]);
        battle.catch_up();
        assert_eq!(battle.turning_player, Some(PlayerId(0)));
    }

    #[test]
    fn forced_relocation_moves_occupancy_without_spending_points() {
        let mut battle = test_battle();
        battle.append_deltas([
            Delta::PlayerJoined {
                player: test_player(0),
            },
            Delta::HeroSpawned {
                unit: test_hero(0, PlayerId(0), Position::new(2, 2)),
            },
            Delta::UnitPushed {
                unit: UnitId(0),
                to: Position::new(4, 2),
                source: Source::None,
            },
        ]);
        battle.catch_up();

        let unit = battle.unit(UnitId(0)).unwrap();
        assert_eq!(unit.position, Position::new(4, 2));
        assert_eq!(unit.move_points, 5);
        assert!(!battle.grid.is_occupied(Position::new(2, 2)));
        assert!(battle.grid.is_occupied(Position::new(4, 2)));

        battle.append_deltas([Delta::UnitTeleported {
            unit: UnitId(0),
            to: Position::new(0, 7),
            source: Source::None,
        }]);
        battle.catch_up();
        assert_eq!(battle.unit(UnitId(0)).unwrap().position, Position::new(0, 7));
        assert!(!battle.grid.is_occupied(Position::new(4, 2)));
        assert!(battle.grid.is_occupied(Position::new(0, 7)));
    }

    #[test]
    fn move_point_and_charge_adjustments_apply_to_the_unit() {
        let blink = AbilityId(7);
        let mut hero = test_hero(0, PlayerId(0), Position::new(1, 1));
        hero.abilities.push(Ability {
            id: blink,
            kind: AbilityKind::Active {
                charges_remaining: 2,
                targeting: Targeting::AnyFreeCell {
                    selector: Selector::Single,
                },
            },
        });

        let mut battle = test_battle();
        battle.append_deltas([
            Delta::PlayerJoined {
                player: test_player(0),
            },
            Delta::HeroSpawned { unit: hero },
            Delta::MovePointsChanged {
                unit: UnitId(0),
                amount: -3,
            },
            Delta::AbilityChargesChanged {
                unit: UnitId(0),
                ability: blink,
                amount: -1,
            },
        ]);
        battle.catch_up();

        let unit = battle.unit(UnitId(0)).unwrap();
        assert_eq!(unit.move_points, 2);
        assert_eq!(unit.ability(blink).unwrap().charges_remaining(), 1);
        assert_eq!(battle.skipped_deltas, 0);
    }

    #[test]
    fn minion_spawn_occupies_its_cell_with_its_owner() {
        let minion = Unit::spawned(
            UnitId(3),
            UnitKind::Minion {
                kind: MinionType::SkeletalWarrior,
                owner: Some(PlayerId(0)),
            },
            Position::new(5, 5),
            BaseStats {
                max_health: 6,
                max_move_points: 3,
            },
            None,
            Vec::new(),
        );
        let mut battle = test_battle();
        battle.append_deltas([
            Delta::PlayerJoined {
                player: test_player(0),
            },
            Delta::MinionSpawned {
                unit: minion,
                source: Source::None,
            },
        ]);
        battle.catch_up();

        let unit = battle.unit(UnitId(3)).unwrap();
        assert_eq!(unit.owner(), Some(PlayerId(0)));
        assert_eq!(unit.health, 6);
        assert!(battle.grid.is_occupied(Position::new(5, 5)));
    }

    #[test]
    fn discarded_card_leaves_the_hand_without_using_it() {
        let mut battle = test_battle();
        battle.append_deltas([
            Delta::PlayerJoined {
                player: test_player(0),
            },
            Delta::CardDrawn {
                player: PlayerId(0),
                card: Card::Hero(HeroType::Warrior),
            },
            Delta::CardDrawn {
                player: PlayerId(0),
                card: Card::Hero(HeroType::Ranger),
            },
            Delta::CardDiscarded {
                player: PlayerId(0),
                hand_index: 0,
            },
        ]);
        battle.catch_up();

        let player = battle.player(PlayerId(0)).unwrap();
        assert_eq!(player.hand.len(), 1);
        assert_eq!(player.hand[0], Card::Hero(HeroType::Ranger));
        assert!(!player.has_used_a_card_this_turn);
    }

    #[test]
    fn embedded_push_in_a_cast_relocates_the_target() {
        let mut battle = test_battle();
        battle.append_deltas([
            Delta::PlayerJoined {
                player: test_player(0),
            },
            Delta::HeroSpawned {
                unit: test_hero(0, PlayerId(0), Position::new(0, 0)),
            },
            Delta::HeroSpawned {
                unit: test_hero(1, PlayerId(0), Position::new(1, 0)),
            },
            Delta::AbilityCast {
                caster: UnitId(0),
                ability: AbilityId(3),
                target: Position::new(1, 0),
                impacts: vec![Impact {
                    unit: UnitId(1),
                    health_change: -2,
                    modifier: None,
                    push_to: Some(Position::new(3, 0)),
                }],
            },
        ]);
        battle.catch_up();

        let target = battle.unit(UnitId(1)).unwrap();
        assert_eq!(target.health, 18);
        assert_eq!(target.position, Position::new(3, 0));
        assert!(!battle.grid.is_occupied(Position::new(1, 0)));
        assert!(battle.grid.is_occupied(Position::new(3, 0)));
    }

    #[test]
    fn purchase_with_unknown_owner_grants_the_item_and_counts_the_skip() {
        // The hero's owner never joined, so the gold deduction has no
        // account to hit; the purchase still lands in the inventory.
        let mut battle = test_battle();
        battle.append_deltas([
            Delta::HeroSpawned {
                unit: test_hero(0, PlayerId(5), Position::new(1, 1)),
            },
            Delta::ShopSpawned {
                shop: Shop {
                    id: ShopId(0),
                    position: Position::new(2, 1),
                    stock: vec![ItemId::HealingSalve],
                },
            },
            Delta::ItemPurchased {
                hero: UnitId(0),
                shop: ShopId(0),
                item: ItemId::HealingSalve,
                price: 20,
            },
        ]);
        battle.catch_up();

        let hero = battle.unit(UnitId(0)).unwrap().hero().unwrap();
        assert_eq!(hero.items, vec![ItemId::HealingSalve]);
        assert!(battle.shop(ShopId(0)).unwrap().stock.is_empty());
        assert_eq!(battle.skipped_deltas, 1);
    }

    #[test]
    fn game_over_clears_turning_player_and_records_winner() {
        let mut battle = test_battle();
        battle.append_deltas([
            Delta::PlayerJoined {
                player: test_player(0),
            },
            Delta::BattleStarted,
            Delta::TurnStarted {
                player: PlayerId(0),
            },
            Delta::GameOver {
                winner: Some(PlayerId(0)),
            },
        ]);
        let mut sink = NullSink;
        catch_up_to_head(&mut battle, &mut sink);

        assert!(battle.game_over);
        assert_eq!(battle.winner, Some(PlayerId(0)));
        assert_eq!(battle.turning_player, None);
    }
}
