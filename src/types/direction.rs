//! Face directions and their quarter-turn rotations.

/// The six cardinal directions / face directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    /// All six directions in order.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Get the unit normal for this direction.
    pub fn normal(&self) -> [f32; 3] {
        match self {
            Direction::Down => [0.0, -1.0, 0.0],
            Direction::Up => [0.0, 1.0, 0.0],
            Direction::North => [0.0, 0.0, -1.0],
            Direction::South => [0.0, 0.0, 1.0],
            Direction::West => [-1.0, 0.0, 0.0],
            Direction::East => [1.0, 0.0, 0.0],
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "down" => Some(Direction::Down),
            "up" => Some(Direction::Up),
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "west" => Some(Direction::West),
            "east" => Some(Direction::East),
            _ => None,
        }
    }

    /// Rotate around the X axis in quarter turns.
    /// Looking from +X towards origin, one step goes Up -> North -> Down -> South.
    pub fn rotate_x(self, steps: i32) -> Direction {
        let mut dir = self;
        for _ in 0..steps.rem_euclid(4) {
            dir = match dir {
                Direction::Up => Direction::North,
                Direction::North => Direction::Down,
                Direction::Down => Direction::South,
                Direction::South => Direction::Up,
                Direction::East | Direction::West => dir,
            };
        }
        dir
    }

    /// Rotate around the Y axis in quarter turns.
    /// Looking from +Y (above), one step goes North -> East -> South -> West.
    pub fn rotate_y(self, steps: i32) -> Direction {
        let mut dir = self;
        for _ in 0..steps.rem_euclid(4) {
            dir = match dir {
                Direction::North => Direction::East,
                Direction::East => Direction::South,
                Direction::South => Direction::West,
                Direction::West => Direction::North,
                Direction::Up | Direction::Down => dir,
            };
        }
        dir
    }

    /// Rotate by X quarter turns, then Y quarter turns.
    pub fn rotate(self, x_steps: i32, y_steps: i32) -> Direction {
        self.rotate_x(x_steps).rotate_y(y_steps)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Down => write!(f, "down"),
            Direction::Up => write!(f, "up"),
            Direction::North => write!(f, "north"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
            Direction::East => write!(f, "east"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_turn_is_identity() {
        for dir in Direction::ALL {
            assert_eq!(dir.rotate_x(4), dir);
            assert_eq!(dir.rotate_y(4), dir);
            assert_eq!(dir.rotate_y(-1), dir.rotate_y(3));
        }
    }

    #[test]
    fn test_rotation_keeps_axis_of_rotation() {
        assert_eq!(Direction::East.rotate_x(1), Direction::East);
        assert_eq!(Direction::Up.rotate_y(3), Direction::Up);
        assert_eq!(Direction::North.rotate_y(1), Direction::East);
    }

    #[test]
    fn test_rotate_x_then_y() {
        // Up -> North (x) -> East (y)
        assert_eq!(Direction::Up.rotate(1, 1), Direction::East);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Direction::from_str("NORTH"), Some(Direction::North));
        assert_eq!(Direction::from_str("sideways"), None);
    }
}
