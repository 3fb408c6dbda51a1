//! Snapshot / fast-forward support.
//!
//! A snapshot fully determines battle state at a given replay head without
//! replaying the preceding log. Accepting one replaces local state
//! wholesale; local deltas with index below the snapshot head are assumed
//! already represented and are never replayed again.

use sha2::{Digest, Sha256};

use super::{Battle, Player, Rune, Shop, Tree, Unit};
use crate::state::PlayerId;

/// Complete state capture at a given replay head.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BattleSnapshot {
    pub has_started: bool,
    pub seed: u64,
    pub grid_width: u32,
    pub grid_height: u32,
    pub units: Vec<Unit>,
    pub players: Vec<Player>,
    pub runes: Vec<Rune>,
    pub shops: Vec<Shop>,
    pub trees: Vec<Tree>,
    pub turning_player: Option<PlayerId>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    pub delta_head: usize,
}

impl BattleSnapshot {
    /// Captures the battle's current state.
    pub fn capture(battle: &Battle) -> Self {
        Self {
            has_started: battle.has_started,
            seed: battle.seed,
            grid_width: battle.grid.width(),
            grid_height: battle.grid.height(),
            units: battle.units.clone(),
            players: battle.players.clone(),
            runes: battle.runes.clone(),
            shops: battle.shops.clone(),
            trees: battle.trees.clone(),
            turning_player: battle.turning_player,
            game_over: battle.game_over,
            winner: battle.winner,
            delta_head: battle.delta_head,
        }
    }
}

impl Battle {
    /// Replaces local state with the snapshot's and rebuilds cell
    /// occupancy from the living entities it carries. The delta log is
    /// kept as-is; replay resumes at the snapshot's head.
    pub fn restore(&mut self, snapshot: BattleSnapshot) {
        self.has_started = snapshot.has_started;
        self.seed = snapshot.seed;
        self.grid = crate::grid::Grid::new(snapshot.grid_width, snapshot.grid_height);
        self.units = snapshot.units;
        self.players = snapshot.players;
        self.runes = snapshot.runes;
        self.shops = snapshot.shops;
        self.trees = snapshot.trees;
        self.turning_player = snapshot.turning_player;
        self.game_over = snapshot.game_over;
        self.winner = snapshot.winner;
        self.delta_head = snapshot.delta_head;

        for unit in &self.units {
            if !unit.dead {
                self.grid.occupy(unit.position);
            }
        }
        for rune in &self.runes {
            if !rune.consumed {
                self.grid.occupy(rune.position);
            }
        }
        for shop in &self.shops {
            self.grid.occupy(shop.position);
        }
        for tree in &self.trees {
            if !tree.destroyed {
                self.grid.occupy(tree.position);
            }
        }
    }

    /// SHA-256 digest over the canonical bincode encoding of the current
    /// state. Two replays of an identical delta prefix from an identical
    /// initial state produce identical digests.
    pub fn digest(&self) -> [u8; 32] {
        let snapshot = BattleSnapshot::capture(self);
        let bytes = bincode::serialize(&snapshot).expect("snapshot serialization is infallible");
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        hasher.finalize().into()
    }
}
