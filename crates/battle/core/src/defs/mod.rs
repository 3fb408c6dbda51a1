//! Traits and data types describing immutable battle content.
//!
//! Definition tables map hero/creep/minion/item/spell identities to their
//! stat blocks, abilities, and effect payloads. The tables are external data
//! supplied by an embedder (see the `battle-content` crate); the core only
//! reads them through the [`Definitions`] oracle while producing deltas.
//! Replay never consults definitions: spawn deltas embed the constructed
//! entity and cast deltas embed their resolved outcome.

mod rng;

pub use rng::{PcgRng, compute_seed};

use crate::state::{AbilityId, Attack, BaseStats, ModifierChange, ModifierId};
use crate::targeting::Targeting;

/// Read-only oracle over the definition tables.
///
/// Lookups return `None` for identities missing from the table; the
/// turn-action authority surfaces that as a validation error.
pub trait Definitions: Send + Sync {
    fn hero(&self, kind: HeroType) -> Option<&HeroDefinition>;
    fn creep(&self, kind: CreepType) -> Option<&CreepDefinition>;
    fn minion(&self, kind: MinionType) -> Option<&MinionDefinition>;
    fn item(&self, id: ItemId) -> Option<&ItemDefinition>;
    fn spell(&self, id: SpellId) -> Option<&SpellDefinition>;
}

/// Closed set of hero identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeroType {
    Warrior,
    Ranger,
    Sorceress,
    Warlock,
}

/// Closed set of neutral creep identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreepType {
    Wolf,
    Boar,
    StoneGolem,
}

/// Closed set of summonable minion identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MinionType {
    SkeletalWarrior,
    Treant,
}

/// Closed set of purchasable item identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemId {
    HealingSalve,
    BootsOfSpeed,
    BladeOfFury,
    DoublingAxe,
}

/// Closed set of castable spell identities (played from cards).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellId {
    Fireball,
    HealingWave,
    Entangle,
}

/// Stat block and ability loadout for a hero type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroDefinition {
    pub kind: HeroType,
    pub name: String,
    pub base: BaseStats,
    pub attack: Option<Attack>,
    pub abilities: Vec<AbilityDefinition>,
}

/// Stat block and ability loadout for a creep type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreepDefinition {
    pub kind: CreepType,
    pub name: String,
    pub base: BaseStats,
    pub attack: Option<Attack>,
    pub abilities: Vec<AbilityDefinition>,
    /// Gold paid to the killing hero's owner.
    pub bounty: i32,
}

/// Stat block for a summoned minion type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinionDefinition {
    pub kind: MinionType,
    pub name: String,
    pub base: BaseStats,
    pub attack: Option<Attack>,
}

/// An ability as defined by content: identity, activation shape, and the
/// outcome payload the authority resolves when it is cast.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    pub kind: AbilityDefinitionKind,
    pub effect: EffectDefinition,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityDefinitionKind {
    Passive,
    Active { charges: u8, targeting: Targeting },
}

/// Resolved-at-production payload shared by abilities, spells, and items.
///
/// `damage` and `heal` are mutually exclusive by convention, not by type;
/// content that sets both deals damage and heals the same cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDefinition {
    pub damage: i32,
    /// Upper bound of the uniform damage roll added on top of `damage`.
    pub damage_variance: u32,
    /// Adds the caster's current (bonus-inclusive) attack damage to the
    /// total. Gated by the disarmed status.
    pub add_attack_damage: bool,
    pub heal: i32,
    /// Knockback distance, in cells, directly away from the caster. The
    /// push stops early at the grid edge or the first occupied cell.
    pub push: u32,
    /// Minion spawned at the resolved target cell.
    pub summon: Option<MinionType>,
    pub modifier: Option<ModifierTemplate>,
}

/// Blueprint for a modifier instance.
///
/// The authority stamps a fresh [`crate::state::ModifierHandle`] and a
/// `Source` onto the template when it emits a `ModifierApplied` delta.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierTemplate {
    pub id: ModifierId,
    /// `None` means permanent; `Some(n)` expires after `n` turn ends.
    pub duration: Option<u8>,
    pub changes: Vec<ModifierChange>,
}

/// Definition of a purchasable item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub price: i32,
    /// Modifier applied to the holder for as long as the item matters.
    pub passive: Option<ModifierTemplate>,
    /// Effect resolved when the item is actively used, if any.
    pub on_use: Option<EffectDefinition>,
}

/// Definition of a spell played from a card.
///
/// Spells have no caster on the grid; their selector is anchored at the
/// chosen target cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: SpellId,
    pub name: String,
    pub selector: crate::targeting::Selector,
    pub effect: EffectDefinition,
}
