// Core board types shared by the engine, the debug log and the replay tool

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D cell coordinate on the board. x grows rightward, y grows downward.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Manhattan distance to another cell. Admissible heuristic on a
    /// 4-connected unit-cost grid.
    pub fn manhattan(&self, other: Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four movement directions.
///
/// Declaration order matters: the arbiter breaks ties between
/// equal-length plans by picking the direction that appears first here.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all directions in tie-break order
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for logs and the replay format
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }

    /// The opposite direction (an immediate reversal)
    pub fn reversed(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The direction that moves `from` onto the 4-adjacent cell `to`,
    /// or `None` if the cells are not 4-adjacent.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// An inclusive sequence of 4-adjacent cells from start to goal.
/// A path of length 1 means start == goal.
pub type Path = Vec<Coord>;

/// Serializable copy of a full game state, the unit of debug logging
/// and replay reconstruction.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    pub snake: Vec<Coord>,
    pub direction: Direction,
    pub food: Option<Coord>,
    pub score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_vectors() {
        let c = Coord::new(5, 5);
        assert_eq!(Direction::Up.apply(&c), Coord::new(5, 4));
        assert_eq!(Direction::Down.apply(&c), Coord::new(5, 6));
        assert_eq!(Direction::Left.apply(&c), Coord::new(4, 5));
        assert_eq!(Direction::Right.apply(&c), Coord::new(6, 5));
    }

    #[test]
    fn test_direction_order_is_fixed() {
        assert_eq!(
            Direction::all(),
            [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn test_between_inverts_apply() {
        let c = Coord::new(3, 3);
        for d in Direction::all().iter() {
            assert_eq!(Direction::between(c, d.apply(&c)), Some(*d));
        }
        assert_eq!(Direction::between(c, Coord::new(4, 4)), None);
        assert_eq!(Direction::between(c, c), None);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Coord::new(0, 0).manhattan(Coord::new(3, 4)), 7);
        assert_eq!(Coord::new(2, 2).manhattan(Coord::new(2, 2)), 0);
    }
}
