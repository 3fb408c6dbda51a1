//! Authoritative battle state representation.
//!
//! [`Battle`] is the aggregate root: grid, units, players, runes, shops,
//! trees, and the delta log with its replay head. Besides construction
//! and snapshot restore, state changes exclusively by collapsing deltas:
//! callers append to the log and run [`crate::replay::catch_up_to_head`].

pub mod types;

#[cfg(feature = "serde")]
pub mod snapshot;

#[cfg(feature = "serde")]
pub use snapshot::BattleSnapshot;

use std::collections::BTreeSet;

use crate::config::BattleConfig;
use crate::delta::Delta;
use crate::grid::{Grid, PathMap, populate_path_costs};
use crate::targeting::{self, Selector, Targeting};

pub use types::{
    Ability, AbilityId, AbilityKind, Attack, BaseStats, BenchedAbility, BonusStats, Card,
    DeploymentZone, HeroState, Modifier, ModifierChange, ModifierHandle, ModifierId, ModifierKind,
    Player, PlayerId, Position, Rune, RuneId, RuneType, Shop, ShopId, Source, SpecialState,
    StatField, Status, Tree, TreeId, Unit, UnitId, UnitKind,
};

/// Canonical state of one battle.
///
/// Invariant: `delta_head <= deltas.len()`, and the live state always
/// equals the fold of `collapse_delta` over `deltas[0..delta_head)`
/// applied to an empty battle (or to the most recently restored
/// snapshot).
#[derive(Clone, Debug, PartialEq)]
pub struct Battle {
    pub has_started: bool,
    /// RNG seed fixed at creation; consumed only by the turn-action
    /// authority when resolving dice.
    pub seed: u64,
    pub(crate) delta_head: usize,
    /// Count of deltas whose handler was skipped because a referenced
    /// entity was missing. Lenient catch-up tolerance, but observable.
    pub skipped_deltas: u32,
    pub grid: Grid,
    pub units: Vec<Unit>,
    pub players: Vec<Player>,
    pub runes: Vec<Rune>,
    pub shops: Vec<Shop>,
    pub trees: Vec<Tree>,
    pub deltas: Vec<Delta>,
    pub turning_player: Option<PlayerId>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

impl Battle {
    /// Creates an empty battle over a fresh grid.
    pub fn new(config: &BattleConfig, seed: u64) -> Self {
        Self {
            has_started: false,
            seed,
            delta_head: 0,
            skipped_deltas: 0,
            grid: Grid::new(config.grid_width, config.grid_height),
            units: Vec::new(),
            players: Vec::new(),
            runes: Vec::new(),
            shops: Vec::new(),
            trees: Vec::new(),
            deltas: Vec::new(),
            turning_player: None,
            game_over: false,
            winner: None,
        }
    }

    /// Increments the skip counter for a delta whose referenced entity is
    /// missing. Lenient by design for client catch-up; the counter and
    /// log line keep it observable.
    pub(crate) fn note_skip(&mut self, context: &str) {
        self.skipped_deltas += 1;
        tracing::warn!(context, skipped = self.skipped_deltas, "delta skipped");
    }

    /// Index up to which deltas have been applied.
    pub fn delta_head(&self) -> usize {
        self.delta_head
    }

    /// Appends deltas to the log without applying them. Callers follow up
    /// with [`crate::replay::catch_up_to_head`].
    pub fn append_deltas(&mut self, deltas: impl IntoIterator<Item = Delta>) {
        self.deltas.extend(deltas);
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn rune(&self, id: RuneId) -> Option<&Rune> {
        self.runes.iter().find(|r| r.id == id)
    }

    pub fn rune_mut(&mut self, id: RuneId) -> Option<&mut Rune> {
        self.runes.iter_mut().find(|r| r.id == id)
    }

    pub fn shop(&self, id: ShopId) -> Option<&Shop> {
        self.shops.iter().find(|s| s.id == id)
    }

    pub fn shop_mut(&mut self, id: ShopId) -> Option<&mut Shop> {
        self.shops.iter_mut().find(|s| s.id == id)
    }

    pub fn tree(&self, id: TreeId) -> Option<&Tree> {
        self.trees.iter().find(|t| t.id == id)
    }

    pub fn tree_mut(&mut self, id: TreeId) -> Option<&mut Tree> {
        self.trees.iter_mut().find(|t| t.id == id)
    }

    /// The living unit standing on `position`, if any.
    pub fn living_unit_at(&self, position: Position) -> Option<&Unit> {
        self.units
            .iter()
            .find(|u| !u.dead && u.position == position)
    }

    /// The unconsumed rune lying on `position`, if any.
    pub fn rune_at(&self, position: Position) -> Option<&Rune> {
        self.runes
            .iter()
            .find(|r| !r.consumed && r.position == position)
    }

    /// Cells occupied solely by an unconsumed rune; these stay
    /// traversable for pathfinding that ignores runes.
    pub fn rune_cells(&self) -> BTreeSet<Position> {
        self.runes
            .iter()
            .filter(|r| !r.consumed)
            .map(|r| r.position)
            .collect()
    }

    // ------------------------------------------------------------------
    // Id allocation (authority-side; peeks at current state only)
    // ------------------------------------------------------------------

    /// Next free unit id. Dead units still reserve theirs.
    pub fn next_unit_id(&self) -> UnitId {
        UnitId(self.units.iter().map(|u| u.id.0 + 1).max().unwrap_or(0))
    }

    /// Next free modifier handle across every unit's modifier list.
    pub fn next_modifier_handle(&self) -> ModifierHandle {
        ModifierHandle(
            self.units
                .iter()
                .flat_map(|u| u.modifiers.iter())
                .map(|m| m.handle.0 + 1)
                .max()
                .unwrap_or(0),
        )
    }

    // ------------------------------------------------------------------
    // Queries exposed to external callers
    // ------------------------------------------------------------------

    /// Minimum-hop cost map from `from`, optionally stopping early at
    /// `to`. See [`populate_path_costs`] for the traversability rules.
    pub fn path_costs(
        &self,
        from: Position,
        to: Option<Position>,
        ignore_runes: bool,
    ) -> Option<PathMap> {
        let rune_cells = ignore_runes.then(|| self.rune_cells());
        populate_path_costs(&self.grid, from, to, rune_cells.as_ref())
    }

    /// Whether any route exists from `from` to `to`. Unreachability is a
    /// normal answer, not an error.
    pub fn can_find_path(&self, from: Position, to: Position, ignore_runes: bool) -> bool {
        self.path_costs(from, Some(to), ignore_runes).is_some()
    }

    /// Whether `candidate` is a legal primary target for `targeting`
    /// anchored at `from`.
    pub fn ability_targeting_fits(
        &self,
        targeting: &Targeting,
        from: Position,
        candidate: Position,
    ) -> bool {
        targeting::targeting_fits(targeting, from, candidate, &self.grid)
    }

    /// Whether `candidate` falls in the area of effect around the
    /// resolved target `to`.
    pub fn ability_selector_fits(
        &self,
        selector: &Selector,
        from: Position,
        to: Position,
        candidate: Position,
    ) -> bool {
        targeting::selector_fits(selector, from, to, candidate)
    }
}
