//! Modifier instances and their atomic changes.
//!
//! A modifier is pure data: the stack in [`crate::stats`] folds its
//! `changes` into effective stats; nothing here mutates a unit.

use super::ability::Ability;
use super::common::{ModifierHandle, ModifierId, Source};
use super::unit::{SpecialState, StatField, Status};

/// A timed or permanent effect attached to a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    /// Semantic identity; with the changes it determines the effect.
    pub id: ModifierId,
    /// Stable external identity used by removal deltas.
    pub handle: ModifierHandle,
    pub source: Source,
    pub kind: ModifierKind,
    pub changes: Vec<ModifierChange>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKind {
    Permanent,
    Expiring { turns_remaining: u8 },
}

impl Modifier {
    /// Ticks an expiring modifier down one turn. Returns true when the
    /// modifier has run out and should be removed.
    pub fn tick(&mut self) -> bool {
        match &mut self.kind {
            ModifierKind::Permanent => false,
            ModifierKind::Expiring { turns_remaining } => {
                *turns_remaining = turns_remaining.saturating_sub(1);
                *turns_remaining == 0
            }
        }
    }
}

/// One atomic change contributed by a modifier. Never mutated once
/// produced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierChange {
    /// Additive contribution to one stat field.
    FieldChange { field: StatField, delta: i32 },
    /// Swap `original` out of the unit's ability list for `replacement`.
    AbilityOverride {
        original: super::common::AbilityId,
        replacement: Ability,
    },
    /// Set a status flag. Idempotent; reapplication is a no-op.
    ApplyStatus(Status),
    /// Set a special state flag. Idempotent.
    ApplySpecialState(SpecialState),
}
