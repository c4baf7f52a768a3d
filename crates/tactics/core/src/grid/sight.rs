//! Line of sight via Bresenham rasterization.

use super::GridMap;
use crate::state::Position;

/// Cells traversed by the Bresenham line from `from` to `to`, both included.
pub fn line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let step_x = if from.x < to.x { 1 } else { -1 };
    let step_y = if from.y < to.y { 1 } else { -1 };

    let mut cells = Vec::with_capacity(dx.max(-dy) as usize + 1);
    let mut error = dx + dy;
    let mut current = from;

    loop {
        cells.push(current);
        if current == to {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            current.x += step_x;
        }
        if doubled <= dx {
            error += dx;
            current.y += step_y;
        }
    }

    cells
}

impl GridMap {
    /// Sight is blocked when any traced cell after the start is an obstacle,
    /// the end cell included. Units never block sight.
    pub fn has_line_of_sight(&self, from: Position, to: Position) -> bool {
        if !self.is_valid_position(from) || !self.is_valid_position(to) {
            return false;
        }
        if from == to {
            return true;
        }
        line(from, to)
            .into_iter()
            .skip(1)
            .all(|cell| !self.is_obstacle(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MapDimensions;

    #[test]
    fn line_includes_both_ends() {
        let cells = line(Position::new(0, 0), Position::new(3, 1));
        assert_eq!(cells.first(), Some(&Position::new(0, 0)));
        assert_eq!(cells.last(), Some(&Position::new(3, 1)));
        assert_eq!(cells.len(), 4);
    }

    #[test]
    fn line_handles_steep_and_reverse_directions() {
        let cells = line(Position::new(2, 4), Position::new(1, 0));
        assert_eq!(cells.len(), 5);
        assert_eq!(cells.last(), Some(&Position::new(1, 0)));
        for pair in cells.windows(2) {
            assert_eq!(pair[0].chebyshev_distance(pair[1]), 1);
        }
    }

    #[test]
    fn point_always_sees_itself() {
        let map = GridMap::with_obstacles(MapDimensions::new(3, 3), [Position::new(1, 1)]);
        for (position, _) in map.cells() {
            assert!(map.has_line_of_sight(position, position));
        }
    }

    #[test]
    fn wall_blocks_sight() {
        let map = GridMap::with_obstacles(
            MapDimensions::new(5, 5),
            (1..=3).map(|y| Position::new(1, y)),
        );
        assert!(!map.has_line_of_sight(Position::new(0, 1), Position::new(2, 2)));
        assert!(map.has_line_of_sight(Position::new(0, 0), Position::new(4, 0)));
    }

    #[test]
    fn obstacle_at_destination_blocks_sight() {
        let map = GridMap::with_obstacles(MapDimensions::new(3, 1), [Position::new(2, 0)]);
        assert!(!map.has_line_of_sight(Position::new(0, 0), Position::new(2, 0)));
    }

    #[test]
    fn invalid_endpoint_has_no_sight() {
        let map = GridMap::new(MapDimensions::new(3, 3));
        assert!(!map.has_line_of_sight(Position::new(0, 0), Position::new(-1, 0)));
    }
}
