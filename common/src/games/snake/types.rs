use std::fmt;

/// Grid coordinate. `x` runs left to right, `z` runs bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub z: usize,
}

impl Point {
    pub fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }

    /// The neighbouring point one step along `direction`, or `None` when
    /// the step would leave the non-negative quadrant.
    pub fn offset(self, direction: Direction) -> Option<Point> {
        let (dx, dz) = direction.delta();
        Some(Point::new(
            self.x.checked_add_signed(dx)?,
            self.z.checked_add_signed(dz)?,
        ))
    }

    pub fn manhattan_distance(self, other: Point) -> usize {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector `(dx, dz)`.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn from_delta(dx: isize, dz: isize) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.delta() == (dx, dz))
    }

    /// Quarter turn: right maps `(dx, dz)` to `(dz, -dx)`, left to `(-dz, dx)`.
    pub fn rotated(self, side: RotationSide) -> Direction {
        match (self, side) {
            (Direction::Up, RotationSide::Right) => Direction::Right,
            (Direction::Right, RotationSide::Right) => Direction::Down,
            (Direction::Down, RotationSide::Right) => Direction::Left,
            (Direction::Left, RotationSide::Right) => Direction::Up,
            (Direction::Up, RotationSide::Left) => Direction::Left,
            (Direction::Left, RotationSide::Left) => Direction::Down,
            (Direction::Down, RotationSide::Left) => Direction::Right,
            (Direction::Right, RotationSide::Left) => Direction::Up,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationSide {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellType {
    #[default]
    Empty,
    SnakeSegment,
    Fruit,
    Obstacle,
}

impl CellType {
    pub fn is_blocking(self) -> bool {
        matches!(self, CellType::SnakeSegment | CellType::Obstacle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Lose => write!(f, "lose"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Running,
    Ended(Outcome),
}

impl GameState {
    pub fn is_running(&self) -> bool {
        matches!(self, GameState::Running)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, GameState::Ended(_))
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Idle => write!(f, "idle"),
            GameState::Running => write!(f, "running"),
            GameState::Ended(outcome) => write!(f, "ended ({})", outcome),
        }
    }
}
