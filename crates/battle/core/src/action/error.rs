//! Validation failures surfaced by the turn-action authority.
//!
//! Every rejection happens before any delta is emitted, so a failed action
//! leaves the battle untouched.

use crate::defs::ItemId;
use crate::state::{AbilityId, PlayerId, Position, RuneId, ShopId, UnitId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("battle has not started")]
    BattleNotStarted,

    #[error("battle is already over")]
    BattleOver,

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    #[error("unit {0} is not controlled by the acting player")]
    NotYourUnit(UnitId),

    #[error("unit {0} is not a hero")]
    NotAHero(UnitId),

    #[error("unit {0} cannot act (dead or stunned)")]
    CannotAct(UnitId),

    #[error("unit {0} is rooted and cannot move")]
    Rooted(UnitId),

    #[error("unit {0} is silenced and cannot cast")]
    Silenced(UnitId),

    #[error("unit {0} is disarmed and cannot attack")]
    Disarmed(UnitId),

    #[error("no path from {from} to {to}")]
    NoPath { from: Position, to: Position },

    #[error("move costs {needed} but only {available} move points remain")]
    NotEnoughMovePoints { needed: i32, available: i32 },

    #[error("unit has no ability {0:?}")]
    UnknownAbility(AbilityId),

    #[error("ability {0:?} is passive and cannot be cast")]
    AbilityNotActive(AbilityId),

    #[error("ability {0:?} has no charges remaining")]
    NoChargesRemaining(AbilityId),

    #[error("{0} is not a legal target for this ability")]
    TargetingDoesNotFit(Position),

    #[error("action requires a target cell")]
    MissingTarget,

    #[error("a card was already used this turn")]
    CardAlreadyUsedThisTurn,

    #[error("hand index {0} is out of range")]
    InvalidHandIndex(usize),

    #[error("{0} is outside the player's deployment zone")]
    OutsideDeploymentZone(Position),

    #[error("cell {0} is occupied")]
    CellOccupied(Position),

    #[error("unknown rune {0:?}")]
    UnknownRune(RuneId),

    #[error("rune {0:?} was already picked up")]
    RuneConsumed(RuneId),

    #[error("unknown shop {0:?}")]
    UnknownShop(ShopId),

    #[error("{actor} is not adjacent to {target}")]
    NotAdjacent { actor: Position, target: Position },

    #[error("item {0} is not in stock")]
    ItemNotStocked(ItemId),

    #[error("item {item} costs {price} but the player has {gold} gold")]
    NotEnoughGold { item: ItemId, price: i32, gold: i32 },

    #[error("hero does not hold item {0}")]
    ItemNotOwned(ItemId),

    #[error("item {0} has no use effect")]
    ItemNotUsable(ItemId),

    /// A closed-enum identity had no entry in the definition tables.
    #[error("missing definition for {0}")]
    MissingDefinition(&'static str),
}
