//! Unit state: heroes, creeps, and minions over a shared base.
//!
//! Units are created by spawn deltas and mutated only through collapse
//! functions. Death is `dead = true` plus cell release, never removal, so
//! units stay addressable by id for history and log rendering.

use bitflags::bitflags;

use crate::defs::{CreepType, HeroType, ItemId, MinionType};

use super::ability::{Ability, BenchedAbility};
use super::common::{PlayerId, Position, UnitId};
use super::modifier::Modifier;

/// Innate stats fixed by the unit's definition at spawn time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_health: i32,
    pub max_move_points: i32,
}

/// Accumulated modifier contributions, recomputed by the modifier stack.
/// Zeroed and refolded on every recompute; see [`crate::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStats {
    pub max_health: i32,
    pub max_move_points: i32,
    pub attack_damage: i32,
    pub attack_range: i32,
}

/// Stat fields addressable by modifier field changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatField {
    MaxHealth,
    MaxMovePoints,
    AttackDamage,
    AttackRange,
}

/// Basic attack profile. Units without one (e.g. support minions) cannot
/// attack at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attack {
    pub damage: i32,
    pub range: u32,
}

bitflags! {
    /// Status flags set by modifiers. Idempotent booleans, no counting.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Status: u8 {
        const STUNNED  = 1 << 0;
        const ROOTED   = 1 << 1;
        const SILENCED = 1 << 2;
        const DISARMED = 1 << 3;
        const TAUNTED  = 1 << 4;
    }

    /// Special states consulted by the stat recompute and combat math.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SpecialState: u8 {
        /// Total attack damage is doubled as a final post-hoc transform.
        const DAMAGE_DOUBLED = 1 << 0;
        /// Cannot be chosen as a primary target.
        const UNTARGETABLE   = 1 << 1;
    }
}

/// Tag and variant-specific data of a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    Hero(HeroState),
    Creep { kind: CreepType },
    Minion { kind: MinionType, owner: Option<PlayerId> },
}

/// Hero-only state on top of the shared unit base.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroState {
    pub kind: HeroType,
    /// Back-reference to the owning player (relation, not ownership).
    pub owner: PlayerId,
    pub level: u8,
    pub experience: u32,
    pub items: Vec<ItemId>,
}

/// A unit on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub position: Position,
    pub health: i32,
    pub move_points: i32,
    pub dead: bool,
    pub base: BaseStats,
    pub bonus: BonusStats,
    pub status: Status,
    pub special: SpecialState,
    pub attack: Option<Attack>,
    pub modifiers: Vec<Modifier>,
    pub abilities: Vec<Ability>,
    pub ability_bench: Vec<BenchedAbility>,
}

impl Unit {
    /// Builds a freshly spawned unit at full health and move points.
    pub fn spawned(
        id: UnitId,
        kind: UnitKind,
        position: Position,
        base: BaseStats,
        attack: Option<Attack>,
        abilities: Vec<Ability>,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            health: base.max_health,
            move_points: base.max_move_points,
            dead: false,
            base,
            bonus: BonusStats::default(),
            status: Status::empty(),
            special: SpecialState::empty(),
            attack,
            modifiers: Vec::new(),
            abilities: Vec::new(),
            ability_bench: Vec::new(),
        }
        .with_abilities(abilities)
    }

    fn with_abilities(mut self, abilities: Vec<Ability>) -> Self {
        self.abilities = abilities;
        self
    }

    /// Effective maximum health including bonuses.
    pub fn max_health(&self) -> i32 {
        self.base.max_health + self.bonus.max_health
    }

    /// Effective maximum move points including bonuses.
    pub fn max_move_points(&self) -> i32 {
        self.base.max_move_points + self.bonus.max_move_points
    }

    /// Effective attack damage including bonuses (doubling is already
    /// folded into the bonus by the stat recompute). `None` when the unit
    /// cannot attack.
    pub fn attack_damage(&self) -> Option<i32> {
        self.attack.map(|a| a.damage + self.bonus.attack_damage)
    }

    /// Effective attack range including bonuses, clamped at zero.
    pub fn attack_range(&self) -> Option<u32> {
        self.attack
            .map(|a| (a.range as i32 + self.bonus.attack_range).max(0) as u32)
    }

    /// A unit can act while alive and not stunned.
    pub fn can_act(&self) -> bool {
        !self.dead && !self.status.contains(Status::STUNNED)
    }

    pub fn hero(&self) -> Option<&HeroState> {
        match &self.kind {
            UnitKind::Hero(hero) => Some(hero),
            _ => None,
        }
    }

    pub fn hero_mut(&mut self) -> Option<&mut HeroState> {
        match &mut self.kind {
            UnitKind::Hero(hero) => Some(hero),
            _ => None,
        }
    }

    /// Owning player, where one exists (heroes always, minions sometimes).
    pub fn owner(&self) -> Option<PlayerId> {
        match &self.kind {
            UnitKind::Hero(hero) => Some(hero.owner),
            UnitKind::Minion { owner, .. } => *owner,
            UnitKind::Creep { .. } => None,
        }
    }

    pub fn ability(&self, id: super::common::AbilityId) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.id == id)
    }

    pub fn ability_mut(&mut self, id: super::common::AbilityId) -> Option<&mut Ability> {
        self.abilities.iter_mut().find(|a| a.id == id)
    }
}

#[cfg(feature = "serde")]
mod status_serde {
    //! bitflags 2.x keeps generated types opaque to serde by default when
    //! the flag type is local; serialize through the raw bits instead.

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{SpecialState, Status};

    impl Serialize for Status {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.bits().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Status {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(Status::from_bits_retain(u8::deserialize(deserializer)?))
        }
    }

    impl Serialize for SpecialState {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.bits().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for SpecialState {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(SpecialState::from_bits_retain(u8::deserialize(
                deserializer,
            )?))
        }
    }
}
