//! The delta log: immutable, ordered records of atomic state changes.
//!
//! A delta is identified purely by its index in the log. Every variant
//! embeds enough data to be replayed without lookups beyond the battle
//! itself: spawn deltas carry the fully constructed entity, cast deltas
//! carry their resolved impact lists, and nothing here ever re-rolls a
//! die: payloads already contain resolved outcomes.
//!
//! The enum is closed on purpose. `collapse_delta` matches it
//! exhaustively, so an unhandled variant is a compile error, not a
//! runtime assertion.

use crate::defs::{ItemId, SpellId};
use crate::state::{
    AbilityId, Card, Modifier, ModifierHandle, Player, PlayerId, Position, Rune, RuneId, Shop,
    ShopId, Source, Tree, TreeId, Unit, UnitId,
};

/// One resolved effect on one unit, embedded in cast deltas.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Impact {
    pub unit: UnitId,
    /// Signed health change (negative for damage).
    pub health_change: i32,
    /// Modifier to attach, already stamped with handle and source.
    pub modifier: Option<Modifier>,
    /// Forced relocation (knockback, pull), if any.
    pub push_to: Option<Position>,
}

/// Resolved payload of a rune pickup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuneOutcome {
    /// Gold granted to the picking hero's owner.
    pub gold: i32,
    /// Health restored to the picking hero.
    pub heal: i32,
    pub modifier: Option<Modifier>,
}

/// An atomic battle-state change. The unit of replay.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Delta {
    // ------------------------------------------------------------------
    // Battle lifecycle
    // ------------------------------------------------------------------
    BattleStarted,
    TurnStarted { player: PlayerId },
    TurnEnded { player: PlayerId },
    GameOver { winner: Option<PlayerId> },

    // ------------------------------------------------------------------
    // Participants and spawns (entities embedded in full)
    // ------------------------------------------------------------------
    PlayerJoined { player: Player },
    HeroSpawned { unit: Unit },
    CreepSpawned { unit: Unit },
    MinionSpawned { unit: Unit, source: Source },
    RuneSpawned { rune: Rune },
    ShopSpawned { shop: Shop },
    TreeSpawned { tree: Tree },

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
        move_cost: i32,
    },
    UnitPushed {
        unit: UnitId,
        to: Position,
        source: Source,
    },
    UnitTeleported {
        unit: UnitId,
        to: Position,
        source: Source,
    },
    MovePointsChanged { unit: UnitId, amount: i32 },
    MovePointsRestored { unit: UnitId },
    AbilityChargesChanged {
        unit: UnitId,
        ability: AbilityId,
        amount: i8,
    },

    // ------------------------------------------------------------------
    // Health and death
    // ------------------------------------------------------------------
    HealthChanged {
        unit: UnitId,
        amount: i32,
        source: Source,
    },
    UnitDied { unit: UnitId, source: Source },

    // ------------------------------------------------------------------
    // Resolved casts (outcomes embedded, never re-derived)
    // ------------------------------------------------------------------
    AbilityCast {
        caster: UnitId,
        ability: AbilityId,
        target: Position,
        impacts: Vec<Impact>,
    },
    SpellCast {
        player: PlayerId,
        spell: SpellId,
        target: Position,
        impacts: Vec<Impact>,
    },
    ItemUsed {
        hero: UnitId,
        item: ItemId,
        impacts: Vec<Impact>,
    },

    // ------------------------------------------------------------------
    // Economy
    // ------------------------------------------------------------------
    GoldChanged {
        player: PlayerId,
        amount: i32,
        source: Source,
    },
    ItemPurchased {
        hero: UnitId,
        shop: ShopId,
        item: ItemId,
        price: i32,
    },
    ItemGained {
        hero: UnitId,
        item: ItemId,
        source: Source,
    },

    // ------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------
    CardDrawn { player: PlayerId, card: Card },
    CardUsed {
        player: PlayerId,
        hand_index: usize,
        target: Option<Position>,
    },
    CardDiscarded { player: PlayerId, hand_index: usize },

    // ------------------------------------------------------------------
    // Modifiers
    // ------------------------------------------------------------------
    ModifierApplied { unit: UnitId, modifier: Modifier },
    ModifierRemoved { handle: ModifierHandle },

    // ------------------------------------------------------------------
    // Props
    // ------------------------------------------------------------------
    RunePickedUp {
        hero: UnitId,
        rune: RuneId,
        outcome: RuneOutcome,
    },
    TreeDestroyed { tree: TreeId, source: Source },

    // ------------------------------------------------------------------
    // Hero progression
    // ------------------------------------------------------------------
    ExperienceGained { hero: UnitId, amount: u32 },
    HeroLeveledUp { hero: UnitId, level: u8 },
}

impl Delta {
    /// Attribution of this delta, where one is carried.
    pub fn source(&self) -> Source {
        match self {
            Delta::MinionSpawned { source, .. }
            | Delta::UnitPushed { source, .. }
            | Delta::UnitTeleported { source, .. }
            | Delta::HealthChanged { source, .. }
            | Delta::UnitDied { source, .. }
            | Delta::GoldChanged { source, .. }
            | Delta::ItemGained { source, .. }
            | Delta::TreeDestroyed { source, .. } => *source,
            _ => Source::None,
        }
    }
}
