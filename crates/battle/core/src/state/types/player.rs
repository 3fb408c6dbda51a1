//! Player state: hand, gold, and per-turn bookkeeping.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::defs::{HeroType, SpellId};

use super::common::{PlayerId, Position};

/// A card in a player's hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Card {
    /// Deploys a hero of the given type into the deployment zone.
    Hero(HeroType),
    /// Casts a spell at a chosen cell.
    Spell(SpellId),
}

/// Inclusive rectangle of cells a player may deploy heroes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeploymentZone {
    pub min: Position,
    pub max: Position,
}

impl DeploymentZone {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
    }
}

/// One battle participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: ArrayVec<Card, { BattleConfig::MAX_HAND_SIZE }>,
    pub gold: i32,
    pub has_used_a_card_this_turn: bool,
    pub deployment_zone: DeploymentZone,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, deployment_zone: DeploymentZone) -> Self {
        Self {
            id,
            name: name.into(),
            hand: ArrayVec::new(),
            gold: BattleConfig::STARTING_GOLD,
            has_used_a_card_this_turn: false,
            deployment_zone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_zone_is_inclusive() {
        let zone = DeploymentZone::new(Position::new(0, 0), Position::new(1, 4));
        assert!(zone.contains(Position::new(0, 0)));
        assert!(zone.contains(Position::new(1, 4)));
        assert!(!zone.contains(Position::new(2, 0)));
        assert!(!zone.contains(Position::new(0, 5)));
    }
}
