//! Targeting geometry for abilities and spells.
//!
//! Two independent pure predicates:
//! - [`targeting_fits`]: is `candidate` a legal primary target/point for a
//!   targeting shape anchored at the caster?
//! - [`selector_fits`]: given a resolved target, does `candidate` fall in
//!   the area of effect?
//!
//! Everything here is a function of position data plus grid occupancy; no
//! hidden state.

use crate::grid::Grid;
use crate::state::Position;

/// Shape rule determining legal primary targets for an ability, anchored
/// at the caster's cell. Each shape nests the [`Selector`] applied around
/// the resolved target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Targeting {
    /// Any collinear cell within `length`.
    Line { length: u32, selector: Selector },
    /// Collinear within `length`, but the walk from the caster stops at
    /// the first occupied cell: only that cell is a legal target.
    FirstInLine { length: u32, selector: Selector },
    /// Taxicab distance at most `radius`; `include_caster` toggles whether
    /// distance 0 is legal.
    ManhattanRadius {
        radius: u32,
        include_caster: bool,
        selector: Selector,
    },
    /// Chebyshev distance at most `radius` around the caster.
    RectAroundCaster { radius: u32, selector: Selector },
    /// Any unoccupied in-bounds cell (summons, teleport destinations).
    AnyFreeCell { selector: Selector },
}

impl Targeting {
    pub fn selector(&self) -> &Selector {
        match self {
            Targeting::Line { selector, .. }
            | Targeting::FirstInLine { selector, .. }
            | Targeting::ManhattanRadius { selector, .. }
            | Targeting::RectAroundCaster { selector, .. }
            | Targeting::AnyFreeCell { selector } => selector,
        }
    }
}

/// Area-of-effect rule applied around a resolved target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selector {
    /// Exactly the resolved target cell.
    Single,
    /// Chebyshev distance at most `radius` around the target.
    Rect { radius: u32 },
    /// Cells collinear with the caster→target axis, on the target's side
    /// of the caster, within `length` measured from the caster. The
    /// caster's own cell is excluded.
    Line { length: u32 },
    /// A stem of `stem_length` along the caster→target direction, with a
    /// perpendicular arm of `arm_length` on each side at the stem's far
    /// end.
    TShape { stem_length: u32, arm_length: u32 },
}

/// Tests whether `candidate` is a legal primary target for `targeting`
/// anchored at `from`. Occupancy is consulted only by the first-in-line
/// walk and the free-cell check.
pub fn targeting_fits(
    targeting: &Targeting,
    from: Position,
    candidate: Position,
    grid: &Grid,
) -> bool {
    if !grid.contains(candidate) {
        return false;
    }
    match *targeting {
        Targeting::Line { length, .. } => {
            candidate != from && from.collinear(candidate) && from.manhattan(candidate) <= length
        }
        Targeting::FirstInLine { length, .. } => {
            if candidate == from || !from.collinear(candidate) || from.manhattan(candidate) > length
            {
                return false;
            }
            // Walk cell by cell toward the candidate; anything occupied
            // before it blocks the shot.
            let step = direction(from, candidate);
            let mut cursor = from;
            loop {
                cursor = Position::new(cursor.x + step.0, cursor.y + step.1);
                if cursor == candidate {
                    return true;
                }
                if !grid.contains(cursor) || grid.is_occupied(cursor) {
                    return false;
                }
            }
        }
        Targeting::ManhattanRadius {
            radius,
            include_caster,
            ..
        } => {
            let distance = from.manhattan(candidate);
            distance <= radius && (include_caster || distance > 0)
        }
        Targeting::RectAroundCaster { radius, .. } => from.chebyshev(candidate) <= radius,
        Targeting::AnyFreeCell { .. } => !grid.is_occupied(candidate),
    }
}

/// Tests whether `candidate` falls in the area of effect of `selector`
/// for an ability cast from `from` that resolved to `to`.
pub fn selector_fits(selector: &Selector, from: Position, to: Position, candidate: Position) -> bool {
    match *selector {
        Selector::Single => candidate == to,
        Selector::Rect { radius } => to.chebyshev(candidate) <= radius,
        Selector::Line { length } => {
            if from == to {
                return candidate == to;
            }
            candidate != from
                && on_axis(from, to, candidate)
                && in_front(from, direction(from, to), candidate)
                && from.manhattan(candidate) <= length
        }
        Selector::TShape {
            stem_length,
            arm_length,
        } => {
            if from == to {
                return candidate == to;
            }
            let step = direction(from, to);
            // Stem: collinear with the cast axis, within stem_length. The
            // caster's own cell is never part of the shape.
            if on_axis(from, to, candidate) && from.manhattan(candidate) <= stem_length {
                return candidate != from && in_front(from, step, candidate);
            }
            // Arm: perpendicular axis through the stem's far end.
            let stem_end = Position::new(
                from.x + step.0 * stem_length as i32,
                from.y + step.1 * stem_length as i32,
            );
            let on_arm_axis = if step.0 != 0 {
                candidate.x == stem_end.x
            } else {
                candidate.y == stem_end.y
            };
            on_arm_axis && stem_end.manhattan(candidate) <= arm_length
        }
    }
}

/// Unit step from `from` toward the collinear `to`.
fn direction(from: Position, to: Position) -> (i32, i32) {
    ((to.x - from.x).signum(), (to.y - from.y).signum())
}

/// True when `candidate` lies on the row/column axis through `from` and `to`.
fn on_axis(from: Position, to: Position, candidate: Position) -> bool {
    if from.x == to.x {
        candidate.x == from.x
    } else {
        candidate.y == from.y
    }
}

/// True when an on-axis `candidate` is on the `step` side of `from`
/// (or is `from` itself).
fn in_front(from: Position, step: (i32, i32), candidate: Position) -> bool {
    (candidate.x - from.x) * step.0 + (candidate.y - from.y) * step.1 >= 0
}
