//! Obstacle-aware distance queries.
//!
//! A* over the 8-connected grid with uniform step cost 1 and the Chebyshev
//! heuristic, which is admissible and consistent for this cost model, so the
//! first time the goal is popped its path is optimal. Ties on f-cost are
//! broken by insertion order to keep results reproducible.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, VecDeque};

use super::GridMap;
use crate::state::Position;

/// Result of a distance query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathLength {
    /// Number of steps on the shortest path (0 when start equals goal).
    Reachable(u32),
    Unreachable,
}

impl PathLength {
    pub fn is_reachable(self) -> bool {
        matches!(self, PathLength::Reachable(_))
    }

    pub fn steps(self) -> Option<u32> {
        match self {
            PathLength::Reachable(steps) => Some(steps),
            PathLength::Unreachable => None,
        }
    }

    /// Legacy integer encoding: the step count, or `-1` when unreachable.
    pub fn as_sentinel(self) -> i64 {
        match self {
            PathLength::Reachable(steps) => i64::from(steps),
            PathLength::Unreachable => -1,
        }
    }

    /// True when reachable in at most `limit` steps.
    pub fn within(self, limit: u32) -> bool {
        self.steps().is_some_and(|steps| steps <= limit)
    }
}

impl From<Option<u32>> for PathLength {
    fn from(value: Option<u32>) -> Self {
        value.map_or(PathLength::Unreachable, PathLength::Reachable)
    }
}

/// A* node. Lives in the search arena and is discarded with it.
struct SearchNode {
    position: Position,
    g: u32,
    parent: Option<usize>,
}

impl GridMap {
    /// Shortest 8-directional route from `start` to `goal`, both ends included.
    ///
    /// Returns `None` when either end is out of bounds, the goal is an
    /// obstacle, or the open set empties without reaching the goal. Occupied
    /// cells are passable; only terrain blocks the search.
    pub fn find_path(&self, start: Position, goal: Position) -> Option<Vec<Position>> {
        let start_index = self.index(start)?;
        let goal_index = self.index(goal)?;
        if start == goal {
            return Some(vec![start]);
        }
        if !self.is_walkable(goal) {
            return None;
        }

        let mut arena: Vec<SearchNode> = Vec::new();
        let mut best_g = vec![u32::MAX; self.cells.len()];
        let mut closed = vec![false; self.cells.len()];
        // (f-cost, insertion sequence, arena index)
        let mut open: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
        let mut sequence = 0u64;

        arena.push(SearchNode {
            position: start,
            g: 0,
            parent: None,
        });
        best_g[start_index] = 0;
        open.push(Reverse((start.chebyshev_distance(goal), sequence, 0)));

        while let Some(Reverse((_, _, node_index))) = open.pop() {
            let current = arena[node_index].position;
            let current_g = arena[node_index].g;
            let Some(cell_index) = self.index(current) else {
                continue;
            };
            if closed[cell_index] {
                continue;
            }
            closed[cell_index] = true;

            if cell_index == goal_index {
                return Some(reconstruct(&arena, node_index));
            }

            for next in self.walkable_neighbors(current) {
                let Some(next_index) = self.index(next) else {
                    continue;
                };
                if closed[next_index] {
                    continue;
                }
                let g = current_g + 1;
                if g >= best_g[next_index] {
                    continue;
                }
                best_g[next_index] = g;
                sequence += 1;
                arena.push(SearchNode {
                    position: next,
                    g,
                    parent: Some(node_index),
                });
                let h = next.chebyshev_distance(goal);
                open.push(Reverse((g + h, sequence, arena.len() - 1)));
            }
        }

        tracing::trace!(%start, %goal, expanded = arena.len(), "no path");
        None
    }

    /// Obstacle-aware distance: path node count minus one.
    pub fn shortest_path_length(&self, start: Position, goal: Position) -> PathLength {
        self.find_path(start, goal)
            .map(|path| (path.len() - 1) as u32)
            .into()
    }

    /// All cells whose path distance from `origin` is in `1..=range`.
    ///
    /// Equivalent to running [`shortest_path_length`](Self::shortest_path_length)
    /// against every cell in the surrounding square, computed with one
    /// bounded breadth-first sweep since every step costs the same.
    pub fn reachable_positions(&self, origin: Position, range: u32) -> BTreeSet<Position> {
        let mut reachable = BTreeSet::new();
        let Some(origin_index) = self.index(origin) else {
            return reachable;
        };

        let mut distance = vec![u32::MAX; self.cells.len()];
        distance[origin_index] = 0;
        let mut frontier = VecDeque::from([origin]);

        while let Some(current) = frontier.pop_front() {
            let Some(current_index) = self.index(current) else {
                continue;
            };
            let steps = distance[current_index];
            if steps >= range {
                continue;
            }
            for next in self.walkable_neighbors(current) {
                let Some(next_index) = self.index(next) else {
                    continue;
                };
                if distance[next_index] != u32::MAX {
                    continue;
                }
                distance[next_index] = steps + 1;
                reachable.insert(next);
                frontier.push_back(next);
            }
        }

        reachable
    }
}

fn reconstruct(arena: &[SearchNode], mut index: usize) -> Vec<Position> {
    let mut path = vec![arena[index].position];
    while let Some(parent) = arena[index].parent {
        path.push(arena[parent].position);
        index = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MapDimensions;

    fn walled_5x5() -> GridMap {
        GridMap::with_obstacles(
            MapDimensions::new(5, 5),
            (1..=3).map(|y| Position::new(1, y)),
        )
    }

    #[test]
    fn open_grid_distance_is_chebyshev() {
        let map = GridMap::new(MapDimensions::new(8, 6));
        for (sx, sy) in [(0, 0), (3, 2), (7, 5)] {
            for gx in 0..8 {
                for gy in 0..6 {
                    let start = Position::new(sx, sy);
                    let goal = Position::new(gx, gy);
                    assert_eq!(
                        map.shortest_path_length(start, goal),
                        PathLength::Reachable(start.chebyshev_distance(goal)),
                        "{start} -> {goal}"
                    );
                }
            }
        }
    }

    #[test]
    fn identical_endpoints_have_zero_length() {
        let map = walled_5x5();
        let p = Position::new(3, 3);
        assert_eq!(map.shortest_path_length(p, p), PathLength::Reachable(0));
    }

    #[test]
    fn routes_around_partial_wall() {
        let map = walled_5x5();
        let start = Position::new(0, 1);
        let goal = Position::new(2, 2);

        assert_eq!(map.shortest_path_length(start, goal), PathLength::Reachable(3));
        let path = map.find_path(start, goal).unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert!(path.iter().all(|p| !map.is_obstacle(*p)));
    }

    #[test]
    fn solid_wall_is_unreachable() {
        let map = GridMap::with_obstacles(
            MapDimensions::new(5, 5),
            (0..5).map(|y| Position::new(2, y)),
        );
        let length = map.shortest_path_length(Position::new(0, 0), Position::new(4, 4));
        assert_eq!(length, PathLength::Unreachable);
        assert_eq!(length.as_sentinel(), -1);
    }

    #[test]
    fn invalid_or_blocked_goal_is_unreachable() {
        let map = walled_5x5();
        assert_eq!(
            map.shortest_path_length(Position::new(0, 0), Position::new(5, 0)),
            PathLength::Unreachable
        );
        assert_eq!(
            map.shortest_path_length(Position::new(0, 0), Position::new(1, 2)),
            PathLength::Unreachable
        );
    }

    #[test]
    fn search_is_deterministic() {
        let map = walled_5x5();
        let first = map.find_path(Position::new(0, 4), Position::new(4, 0));
        let second = map.find_path(Position::new(0, 4), Position::new(4, 0));
        assert_eq!(first, second);
    }

    #[test]
    fn reachable_positions_respect_range_and_exclude_origin() {
        let map = walled_5x5();
        let origin = Position::new(0, 2);
        let reachable = map.reachable_positions(origin, 1);

        assert!(!reachable.contains(&origin));
        assert_eq!(
            reachable.into_iter().collect::<Vec<_>>(),
            vec![Position::new(0, 1), Position::new(0, 3)]
        );
    }

    #[test]
    fn reachable_positions_match_path_lengths() {
        let map = walled_5x5();
        let origin = Position::new(0, 2);
        let reachable = map.reachable_positions(origin, 3);

        for (position, _) in map.cells() {
            let expected = map
                .shortest_path_length(origin, position)
                .steps()
                .is_some_and(|steps| steps > 0 && steps <= 3);
            assert_eq!(reachable.contains(&position), expected, "{position}");
        }
    }
}
