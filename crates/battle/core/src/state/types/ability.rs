//! Ability instances as they live on a unit.
//!
//! An ability instance is definition identity plus mutable activation
//! state (remaining charges). The targeting shape is copied out of the
//! definition at spawn time so that replay never needs a definitions
//! lookup.

use crate::targeting::Targeting;

use super::common::AbilityId;

/// One ability slot on a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: AbilityId,
    pub kind: AbilityKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    Passive,
    Active {
        charges_remaining: u8,
        targeting: Targeting,
    },
}

impl Ability {
    pub fn is_active(&self) -> bool {
        matches!(self.kind, AbilityKind::Active { .. })
    }

    pub fn charges_remaining(&self) -> u8 {
        match self.kind {
            AbilityKind::Passive => 0,
            AbilityKind::Active {
                charges_remaining, ..
            } => charges_remaining,
        }
    }

    pub fn targeting(&self) -> Option<&Targeting> {
        match &self.kind {
            AbilityKind::Passive => None,
            AbilityKind::Active { targeting, .. } => Some(targeting),
        }
    }

    /// Adjusts remaining charges, saturating at the u8 bounds.
    /// No-op on passives.
    pub fn change_charges(&mut self, amount: i8) {
        if let AbilityKind::Active {
            charges_remaining, ..
        } = &mut self.kind
        {
            *charges_remaining = charges_remaining.saturating_add_signed(amount);
        }
    }
}

/// An ability displaced by an override modifier, parked until the next
/// modifier-stack recompute swaps it back.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchedAbility {
    pub original: Ability,
    /// Id of the replacement currently sitting in the original's slot.
    pub replaced_by: AbilityId,
}
