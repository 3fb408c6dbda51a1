//! Collapse handlers for modifier application and removal.

use crate::event::EventSink;
use crate::state::{Battle, Modifier, ModifierChange, ModifierHandle, UnitId};
use crate::stats;

use super::primitives;

pub fn modifier_applied(
    battle: &mut Battle,
    unit: UnitId,
    modifier: &Modifier,
    sink: &mut dyn EventSink,
) -> bool {
    primitives::apply_modifier(battle, unit, modifier.clone(), sink)
}

/// Locates the modifier by its stable handle across all units and removes
/// it. Plain field contributions are inverted by negation; changes that
/// touch statuses, special states, or ability overrides force a full
/// recompute instead (override reversal cannot be expressed as a
/// negation).
pub fn modifier_removed(battle: &mut Battle, handle: ModifierHandle) -> bool {
    let Some(unit) = battle
        .units
        .iter_mut()
        .find(|u| u.modifiers.iter().any(|m| m.handle == handle))
    else {
        return false;
    };
    let index = unit
        .modifiers
        .iter()
        .position(|m| m.handle == handle)
        .expect("handle located above");
    let removed = unit.modifiers.remove(index);

    let field_changes_only = removed
        .changes
        .iter()
        .all(|change| matches!(change, ModifierChange::FieldChange { .. }));

    if field_changes_only {
        for change in &removed.changes {
            if let ModifierChange::FieldChange { field, delta } = change {
                stats::apply_field_delta(unit, *field, -delta);
            }
        }
    } else {
        stats::recalculate(unit);
    }
    true
}
