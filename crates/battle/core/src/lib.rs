//! Deterministic battle simulation core shared by authority and clients.
//!
//! `battle-core` defines the canonical rules of a turn-based, grid-based
//! tactical battle. State changes exclusively by collapsing an ordered log
//! of immutable deltas ([`replay::catch_up_to_head`]); the turn-action
//! authority ([`action::produce_deltas`]) validates player actions and
//! resolves their outcomes, dice included, into new deltas. Because
//! resolved outcomes are embedded in the log, every holder of the same
//! delta prefix reconstructs byte-identical state.
pub mod action;
pub mod config;
pub mod defs;
pub mod delta;
pub mod event;
pub mod grid;
pub mod replay;
pub mod state;
pub mod stats;
pub mod targeting;

pub use action::{ActionError, TurnAction, produce_deltas};
pub use config::BattleConfig;
pub use defs::{
    AbilityDefinition, AbilityDefinitionKind, CreepDefinition, CreepType, Definitions,
    EffectDefinition, HeroDefinition, HeroType, ItemDefinition, ItemId, MinionDefinition,
    MinionType, ModifierTemplate, PcgRng, SpellDefinition, SpellId, compute_seed,
};
pub use delta::{Delta, Impact, RuneOutcome};
pub use event::{BattleEvent, EventSink, NullSink, RecordingSink};
pub use grid::{Cell, Grid, PathMap, populate_path_costs};
pub use replay::{catch_up_to_head, collapse_delta};
pub use state::{
    Ability, AbilityId, AbilityKind, Attack, BaseStats, Battle, BenchedAbility, BonusStats, Card,
    DeploymentZone, HeroState, Modifier, ModifierChange, ModifierHandle, ModifierId, ModifierKind,
    Player, PlayerId, Position, Rune, RuneId, RuneType, Shop, ShopId, Source, SpecialState,
    StatField, Status, Tree, TreeId, Unit, UnitId, UnitKind,
};
#[cfg(feature = "serde")]
pub use state::snapshot::BattleSnapshot;
pub use targeting::{Selector, Targeting, selector_fits, targeting_fits};
