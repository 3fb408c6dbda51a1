//! Breadth-first cost/reachability search over the grid.
//!
//! Deliberately the simplest-correct BFS rather than A*: grids are small
//! and every action recomputes from scratch, so per-call O(cells) is cheap.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::state::Position;

use super::Grid;

/// Cost and parent maps produced by [`populate_path_costs`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathMap {
    /// Minimum hop count from the search origin, per reached cell.
    pub costs: BTreeMap<Position, u32>,
    /// BFS tree parent, per reached cell other than the origin.
    pub parents: BTreeMap<Position, Position>,
}

impl PathMap {
    pub fn cost(&self, position: Position) -> Option<u32> {
        self.costs.get(&position).copied()
    }

    /// Walks parents back from `to`, returning the path origin→`to`.
    /// `None` when `to` was never reached.
    pub fn path_to(&self, to: Position) -> Option<Vec<Position>> {
        self.costs.get(&to)?;
        let mut path = vec![to];
        let mut cursor = to;
        while let Some(&parent) = self.parents.get(&cursor) {
            path.push(parent);
            cursor = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// Uniform-cost BFS from `from`.
///
/// A cell is traversable iff it is unoccupied, except that cells listed in
/// `rune_cells` (cells occupied solely by a rune) stay traversable. The
/// origin is expanded regardless of its own occupancy, since the moving
/// unit stands there.
///
/// With `to` set, the search stops as soon as the target is dequeued and
/// returns the partial maps; `None` means the whole reachable region was
/// exhausted without touching `to`. Without `to`, the full reachable
/// region is flooded and always returned.
pub fn populate_path_costs(
    grid: &Grid,
    from: Position,
    to: Option<Position>,
    rune_cells: Option<&BTreeSet<Position>>,
) -> Option<PathMap> {
    if !grid.contains(from) {
        return None;
    }
    if let Some(target) = to
        && !grid.contains(target)
    {
        return None;
    }

    let traversable = |position: Position| -> bool {
        if !grid.is_occupied(position) {
            return true;
        }
        rune_cells.is_some_and(|runes| runes.contains(&position))
    };

    let mut map = PathMap::default();
    let mut frontier = VecDeque::new();
    map.costs.insert(from, 0);
    frontier.push_back(from);

    while let Some(current) = frontier.pop_front() {
        if to == Some(current) {
            return Some(map);
        }
        let next_cost = map.costs[&current] + 1;
        for neighbor in grid.neighbors(current).into_iter().flatten() {
            if map.costs.contains_key(&neighbor) || !traversable(neighbor) {
                continue;
            }
            map.costs.insert(neighbor, next_cost);
            map.parents.insert(neighbor, current);
            frontier.push_back(neighbor);
        }
    }

    match to {
        Some(_) => None,
        None => Some(map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_costs_hops() {
        let grid = Grid::new(5, 5);
        let map = populate_path_costs(&grid, Position::ORIGIN, Some(Position::new(3, 0)), None)
            .expect("open grid must be reachable");
        assert_eq!(map.cost(Position::new(3, 0)), Some(3));
    }

    #[test]
    fn detour_around_occupied_cells() {
        let mut grid = Grid::new(5, 5);
        grid.occupy(Position::new(1, 0));
        grid.occupy(Position::new(2, 0));
        let map = populate_path_costs(&grid, Position::ORIGIN, Some(Position::new(3, 0)), None)
            .expect("detour exists through row 1");
        // (0,0)→(0,1)→(1,1)→(2,1)→(3,1)→(3,0)
        assert_eq!(map.cost(Position::new(3, 0)), Some(5));
    }

    #[test]
    fn fully_blocked_target_is_none() {
        let mut grid = Grid::new(5, 5);
        // wall across column 1
        for y in 0..5 {
            grid.occupy(Position::new(1, y));
        }
        let result = populate_path_costs(&grid, Position::ORIGIN, Some(Position::new(3, 0)), None);
        assert!(result.is_none());
    }

    #[test]
    fn rune_cells_stay_traversable_when_requested() {
        let mut grid = Grid::new(5, 1);
        grid.occupy(Position::new(2, 0));
        let runes = BTreeSet::from([Position::new(2, 0)]);

        assert!(populate_path_costs(&grid, Position::ORIGIN, Some(Position::new(4, 0)), None).is_none());

        let map =
            populate_path_costs(&grid, Position::ORIGIN, Some(Position::new(4, 0)), Some(&runes))
                .expect("rune cell is traversable");
        assert_eq!(map.cost(Position::new(4, 0)), Some(4));
    }

    #[test]
    fn flood_without_target_covers_reachable_region() {
        let mut grid = Grid::new(3, 3);
        grid.occupy(Position::new(1, 0));
        grid.occupy(Position::new(1, 1));
        grid.occupy(Position::new(1, 2));
        let map = populate_path_costs(&grid, Position::ORIGIN, None, None)
            .expect("flood always succeeds from an in-bounds origin");
        // only column 0 is reachable
        assert_eq!(map.costs.len(), 3);
        assert!(map.cost(Position::new(2, 0)).is_none());
    }

    #[test]
    fn costs_are_monotone_along_parents() {
        let mut grid = Grid::new(6, 6);
        grid.occupy(Position::new(2, 2));
        grid.occupy(Position::new(3, 1));
        let map = populate_path_costs(&grid, Position::new(1, 1), None, None).unwrap();
        for (&cell, &parent) in &map.parents {
            assert_eq!(map.costs[&cell], map.costs[&parent] + 1);
        }
    }

    #[test]
    fn path_reconstruction_matches_cost() {
        let grid = Grid::new(5, 5);
        let map = populate_path_costs(&grid, Position::ORIGIN, Some(Position::new(2, 2)), None).unwrap();
        let path = map.path_to(Position::new(2, 2)).unwrap();
        assert_eq!(path.first(), Some(&Position::ORIGIN));
        assert_eq!(path.last(), Some(&Position::new(2, 2)));
        assert_eq!(path.len() as u32 - 1, map.cost(Position::new(2, 2)).unwrap());
    }
}
