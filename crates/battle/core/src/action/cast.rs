//! Ability, spell card, and item-use resolution.
//!
//! Everything random or rule-derived is resolved here, at production time:
//! variance dice, area-of-effect membership, lethality, kill rewards, and
//! the win check. The emitted deltas embed those outcomes so replay only
//! applies numbers.

use std::collections::BTreeSet;

use crate::config::BattleConfig;
use crate::defs::{
    AbilityDefinition, AbilityDefinitionKind, Definitions, EffectDefinition, ItemId, PcgRng,
    compute_seed,
};
use crate::delta::{Delta, Impact};
use crate::state::{
    Ability, AbilityId, AbilityKind, Battle, Card, HeroState, PlayerId, Position, SpecialState,
    Source, Status, Unit, UnitId, UnitKind,
};
use crate::targeting::{self, Selector, Targeting};

use super::ActionError;

pub(super) fn cast_ability(
    battle: &Battle,
    defs: &dyn Definitions,
    player: PlayerId,
    caster_id: UnitId,
    ability_id: AbilityId,
    target: Position,
) -> Result<Vec<Delta>, ActionError> {
    let caster = super::controlled_unit(battle, player, caster_id)?;
    if caster.status.contains(Status::SILENCED) {
        return Err(ActionError::Silenced(caster_id));
    }
    let ability = caster
        .ability(ability_id)
        .ok_or(ActionError::UnknownAbility(ability_id))?;
    let targeting = ability
        .targeting()
        .ok_or(ActionError::AbilityNotActive(ability_id))?;
    if ability.charges_remaining() == 0 {
        return Err(ActionError::NoChargesRemaining(ability_id));
    }

    let resolved = resolve_target(battle, targeting, caster.position, target);
    if !battle.ability_targeting_fits(targeting, caster.position, resolved) {
        return Err(ActionError::TargetingDoesNotFit(target));
    }
    if let Some(primary) = battle.living_unit_at(resolved)
        && primary.special.contains(SpecialState::UNTARGETABLE)
    {
        return Err(ActionError::TargetingDoesNotFit(target));
    }

    let effect = ability_effect(defs, caster, ability_id)?;
    if effect.add_attack_damage && caster.status.contains(Status::DISARMED) {
        return Err(ActionError::Disarmed(caster_id));
    }
    let summon = match effect.summon {
        Some(kind) => {
            if battle.grid.is_occupied(resolved) {
                return Err(ActionError::CellOccupied(resolved));
            }
            let def = defs
                .minion(kind)
                .ok_or(ActionError::MissingDefinition("minion"))?;
            Some((kind, def))
        }
        None => None,
    };
    let attack_bonus = if effect.add_attack_damage {
        caster.attack_damage().unwrap_or(0)
    } else {
        0
    };

    let source = Source::Unit {
        unit: caster_id,
        ability: Some(ability_id),
    };
    let impacts = collect_impacts(
        battle,
        effect,
        targeting.selector(),
        caster.position,
        resolved,
        caster_id.0,
        attack_bonus,
        source,
    );

    let mut deltas = vec![Delta::AbilityCast {
        caster: caster_id,
        ability: ability_id,
        target: resolved,
        impacts: impacts.clone(),
    }];
    if let Some((kind, def)) = summon {
        deltas.push(Delta::MinionSpawned {
            unit: Unit::spawned(
                battle.next_unit_id(),
                UnitKind::Minion {
                    kind,
                    owner: caster.owner(),
                },
                resolved,
                def.base,
                def.attack,
                Vec::new(),
            ),
            source,
        });
    }
    deltas.extend(deaths_and_rewards(battle, defs, Some(caster_id), source, &impacts));
    Ok(deltas)
}

pub(super) fn use_card(
    battle: &Battle,
    defs: &dyn Definitions,
    player: PlayerId,
    hand_index: usize,
    target: Option<Position>,
) -> Result<Vec<Delta>, ActionError> {
    let acting = battle
        .player(player)
        .ok_or(ActionError::UnknownPlayer(player))?;
    if acting.has_used_a_card_this_turn {
        return Err(ActionError::CardAlreadyUsedThisTurn);
    }
    let card = *acting
        .hand
        .get(hand_index)
        .ok_or(ActionError::InvalidHandIndex(hand_index))?;

    match card {
        Card::Hero(kind) => {
            let target = target.ok_or(ActionError::MissingTarget)?;
            if !battle.grid.contains(target) || !acting.deployment_zone.contains(target) {
                return Err(ActionError::OutsideDeploymentZone(target));
            }
            if battle.grid.is_occupied(target) {
                return Err(ActionError::CellOccupied(target));
            }
            let def = defs.hero(kind).ok_or(ActionError::MissingDefinition("hero"))?;
            let unit = Unit::spawned(
                battle.next_unit_id(),
                UnitKind::Hero(HeroState {
                    kind,
                    owner: player,
                    level: 1,
                    experience: 0,
                    items: Vec::new(),
                }),
                target,
                def.base,
                def.attack,
                def.abilities.iter().map(ability_instance).collect(),
            );
            Ok(vec![
                Delta::CardUsed {
                    player,
                    hand_index,
                    target: Some(target),
                },
                Delta::HeroSpawned { unit },
            ])
        }
        Card::Spell(spell) => {
            let target = target.ok_or(ActionError::MissingTarget)?;
            if !battle.grid.contains(target) {
                return Err(ActionError::TargetingDoesNotFit(target));
            }
            let def = defs
                .spell(spell)
                .ok_or(ActionError::MissingDefinition("spell"))?;
            let source = Source::Player(player);
            // Spells have no caster on the grid; the selector anchors at
            // the chosen cell.
            let impacts = collect_impacts(
                battle,
                &def.effect,
                &def.selector,
                target,
                target,
                u32::from(player.0),
                0,
                source,
            );
            let mut deltas = vec![
                Delta::CardUsed {
                    player,
                    hand_index,
                    target: Some(target),
                },
                Delta::SpellCast {
                    player,
                    spell,
                    target,
                    impacts: impacts.clone(),
                },
            ];
            deltas.extend(deaths_and_rewards(battle, defs, None, source, &impacts));
            Ok(deltas)
        }
    }
}

pub(super) fn use_item(
    battle: &Battle,
    defs: &dyn Definitions,
    player: PlayerId,
    hero_id: UnitId,
    item: ItemId,
) -> Result<Vec<Delta>, ActionError> {
    let hero = super::controlled_unit(battle, player, hero_id)?;
    let state = hero.hero().ok_or(ActionError::NotAHero(hero_id))?;
    if !state.items.contains(&item) {
        return Err(ActionError::ItemNotOwned(item));
    }
    let def = defs.item(item).ok_or(ActionError::MissingDefinition("item"))?;
    let effect = def.on_use.as_ref().ok_or(ActionError::ItemNotUsable(item))?;

    let source = Source::Item(item);
    let impacts = collect_impacts(
        battle,
        effect,
        &Selector::Single,
        hero.position,
        hero.position,
        hero_id.0,
        0,
        source,
    );
    let mut deltas = vec![Delta::ItemUsed {
        hero: hero_id,
        item,
        impacts: impacts.clone(),
    }];
    deltas.extend(deaths_and_rewards(battle, defs, None, source, &impacts));
    Ok(deltas)
}

/// For first-in-line shapes the requested cell is only a direction: the
/// resolved target is the first occupied cell along the walk from the
/// caster. Other shapes target the requested cell directly.
fn resolve_target(
    battle: &Battle,
    targeting: &Targeting,
    from: Position,
    requested: Position,
) -> Position {
    if let Targeting::FirstInLine { length, .. } = targeting
        && requested != from
        && from.collinear(requested)
    {
        let step = ((requested.x - from.x).signum(), (requested.y - from.y).signum());
        let limit = from.manhattan(requested).min(*length);
        let mut cursor = from;
        for _ in 0..limit {
            cursor = Position::new(cursor.x + step.0, cursor.y + step.1);
            if battle.grid.is_occupied(cursor) {
                return cursor;
            }
        }
    }
    requested
}

/// The effect payload of one of `unit`'s abilities, from the definition
/// tables. Override replacements are looked up in the same definition's
/// ability list.
fn ability_effect<'a>(
    defs: &'a dyn Definitions,
    unit: &Unit,
    ability: AbilityId,
) -> Result<&'a EffectDefinition, ActionError> {
    let found = match &unit.kind {
        UnitKind::Hero(hero) => defs
            .hero(hero.kind)
            .and_then(|d| d.abilities.iter().find(|a| a.id == ability)),
        UnitKind::Creep { kind } => defs
            .creep(*kind)
            .and_then(|d| d.abilities.iter().find(|a| a.id == ability)),
        UnitKind::Minion { .. } => None,
    };
    found
        .map(|a| &a.effect)
        .ok_or(ActionError::MissingDefinition("ability"))
}

/// Instantiates a definition ability as a unit ability slot.
pub(super) fn ability_instance(def: &AbilityDefinition) -> Ability {
    Ability {
        id: def.id,
        kind: match &def.kind {
            AbilityDefinitionKind::Passive => AbilityKind::Passive,
            AbilityDefinitionKind::Active { charges, targeting } => AbilityKind::Active {
                charges_remaining: *charges,
                targeting: targeting.clone(),
            },
        },
    }
}

/// Resolves the effect against every living unit the selector covers.
/// One variance die per impact, seeded by (battle seed, head, actor,
/// impact ordinal) so re-producing the same action yields the same rolls.
#[allow(clippy::too_many_arguments)]
fn collect_impacts(
    battle: &Battle,
    effect: &EffectDefinition,
    selector: &Selector,
    from: Position,
    to: Position,
    actor: u32,
    attack_bonus: i32,
    source: Source,
) -> Vec<Impact> {
    let head = battle.deltas.len() as u64;
    let mut impacts = Vec::new();
    for unit in &battle.units {
        if unit.dead || !targeting::selector_fits(selector, from, to, unit.position) {
            continue;
        }
        let context = impacts.len() as u32;
        let roll = PcgRng::bounded(
            compute_seed(battle.seed, head, actor, context),
            effect.damage_variance + 1,
        ) as i32;
        let damage = effect.damage + roll + attack_bonus;
        let health_change = effect.heal - damage;
        let modifier = effect
            .modifier
            .as_ref()
            .map(|template| super::stamp_modifier(battle, template, source, context));
        let push_to = resolve_push(battle, effect.push, from, unit.position);
        if health_change == 0 && modifier.is_none() && push_to.is_none() {
            continue;
        }
        impacts.push(Impact {
            unit: unit.id,
            health_change,
            modifier,
            push_to,
        });
    }
    impacts
}

/// Destination of a knockback of `distance` cells directly away from the
/// caster, or `None` when the unit does not move: zero distance, the unit
/// shares the caster's cell, or the first step is already blocked. The
/// walk stops early at the grid edge or the first occupied cell.
fn resolve_push(
    battle: &Battle,
    distance: u32,
    from: Position,
    target: Position,
) -> Option<Position> {
    if distance == 0 || target == from {
        return None;
    }
    let step = ((target.x - from.x).signum(), (target.y - from.y).signum());
    let mut cursor = target;
    for _ in 0..distance {
        let next = Position::new(cursor.x + step.0, cursor.y + step.1);
        if !battle.grid.contains(next) || battle.grid.is_occupied(next) {
            break;
        }
        cursor = next;
    }
    (cursor != target).then_some(cursor)
}

/// Deltas that follow lethal impacts: deaths, kill rewards for a hero
/// killer (experience, level-ups, bounty gold), and the win check when a
/// player loses their last hero.
fn deaths_and_rewards(
    battle: &Battle,
    defs: &dyn Definitions,
    killer: Option<UnitId>,
    source: Source,
    impacts: &[Impact],
) -> Vec<Delta> {
    let mut deltas = Vec::new();
    let mut killed: Vec<&Unit> = Vec::new();
    for impact in impacts {
        if let Some(unit) = battle.unit(impact.unit)
            && !unit.dead
            && unit.health + impact.health_change <= 0
        {
            killed.push(unit);
            deltas.push(Delta::UnitDied {
                unit: unit.id,
                source,
            });
        }
    }
    if killed.is_empty() {
        return deltas;
    }

    if let Some(killer_id) = killer
        && let Some(killer_unit) = battle.unit(killer_id)
        && killed.iter().all(|victim| victim.id != killer_id)
        && let Some(hero) = killer_unit.hero()
    {
        let experience = BattleConfig::XP_PER_KILL * killed.len() as u32;
        deltas.push(Delta::ExperienceGained {
            hero: killer_id,
            amount: experience,
        });
        let level = level_for(hero.experience + experience);
        if level > hero.level {
            deltas.push(Delta::HeroLeveledUp {
                hero: killer_id,
                level,
            });
        }
        let bounty: i32 = killed
            .iter()
            .map(|victim| match &victim.kind {
                UnitKind::Hero(_) => BattleConfig::HERO_KILL_BOUNTY,
                UnitKind::Creep { kind } => {
                    defs.creep(*kind).map(|d| d.bounty).unwrap_or(0)
                }
                UnitKind::Minion { .. } => 0,
            })
            .sum();
        if bounty > 0 {
            deltas.push(Delta::GoldChanged {
                player: hero.owner,
                amount: bounty,
                source,
            });
        }
    }

    let killed_ids: BTreeSet<UnitId> = killed.iter().map(|v| v.id).collect();
    let hero_owners: BTreeSet<PlayerId> = battle
        .units
        .iter()
        .filter_map(|u| u.hero().map(|h| h.owner))
        .collect();
    let survivors: Vec<PlayerId> = hero_owners
        .iter()
        .copied()
        .filter(|&owner| {
            battle.units.iter().any(|u| {
                !u.dead
                    && !killed_ids.contains(&u.id)
                    && u.hero().is_some_and(|h| h.owner == owner)
            })
        })
        .collect();
    if hero_owners.len() >= 2 && survivors.len() <= 1 {
        deltas.push(Delta::GameOver {
            winner: survivors.first().copied(),
        });
    }
    deltas
}

/// Level implied by an experience total, capped at the maximum.
fn level_for(experience: u32) -> u8 {
    let level = 1 + experience / BattleConfig::XP_PER_LEVEL;
    (level.min(u32::from(BattleConfig::MAX_HERO_LEVEL))) as u8
}
