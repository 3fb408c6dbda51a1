//! Non-unit occupants of the grid: runes, shops, trees.

use crate::defs::ItemId;

use super::common::{Position, RuneId, ShopId, TreeId};

/// Kinds of rune that can spawn on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuneType {
    /// Grants gold to the picking hero's owner.
    Gold,
    /// Heals the picking hero.
    Regeneration,
    /// Grants a temporary move-point bonus.
    Haste,
}

/// A rune lying on a cell until a hero picks it up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rune {
    pub id: RuneId,
    pub kind: RuneType,
    pub position: Position,
    /// Set when picked up; the rune stays addressable for log rendering.
    pub consumed: bool,
}

/// A shop heroes can buy items from while standing adjacent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shop {
    pub id: ShopId,
    pub position: Position,
    pub stock: Vec<ItemId>,
}

/// A tree obstacle. Occupies its cell until destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree {
    pub id: TreeId,
    pub position: Position,
    pub destroyed: bool,
}
