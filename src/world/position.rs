use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    // not orthogonally adjacent
    NonSurrounding,
    #[default]
    NoDirection,
}

impl Direction {
    pub fn is_cardinal(&self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Up | Self::Down)
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    pub fn is_same_axis(&self, other: Direction) -> bool {
        (self.is_horizontal() && other.is_horizontal())
            || (self.is_vertical() && other.is_vertical())
    }

    pub fn inverse(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::NonSurrounding | Self::NoDirection => Self::NoDirection,
        }
    }

    pub fn cardinals() -> impl Iterator<Item = Direction> {
        Direction::iter().filter(Direction::is_cardinal)
    }
}

// 위치 (x, y)
// out-of-grid coordinates, negative ones included, are representable
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position(pub i32, pub i32);

impl Position {
    pub fn x(&self) -> i32 {
        self.0
    }

    pub fn y(&self) -> i32 {
        self.1
    }

    pub fn walk(&self, dir: Direction) -> Option<Position> {
        match dir {
            Direction::Left => self.0.checked_sub(1).map(|x| Position(x, self.1)),
            Direction::Right => self.0.checked_add(1).map(|x| Position(x, self.1)),
            Direction::Up => self.1.checked_sub(1).map(|y| Position(self.0, y)),
            Direction::Down => self.1.checked_add(1).map(|y| Position(self.0, y)),
            Direction::NonSurrounding | Direction::NoDirection => None,
        }
    }

    // direction in which `tar` lies, seen from `self`
    pub fn diff(&self, tar: Position) -> Direction {
        match (tar.0.checked_sub(self.0), tar.1.checked_sub(self.1)) {
            (Some(-1), Some(0)) => Direction::Left,
            (Some(1), Some(0)) => Direction::Right,
            (Some(0), Some(-1)) => Direction::Up,
            (Some(0), Some(1)) => Direction::Down,
            _ => Direction::NonSurrounding,
        }
    }

    pub fn cardinal(&self) -> Vec<(Direction, Position)> {
        Direction::cardinals()
            .filter_map(|dir| self.walk(dir).map(|pos| (dir, pos)))
            .collect()
    }
}

// 사이즈 (width, height)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DimSize(pub usize, pub usize);

impl DimSize {
    pub fn width(&self) -> usize {
        self.0
    }

    pub fn height(&self) -> usize {
        self.1
    }

    pub fn bound_on(&self, pos: Position) -> bool {
        usize::try_from(pos.0).map_or(false, |x| x < self.0)
            && usize::try_from(pos.1).map_or(false, |y| y < self.1)
    }
}

impl Default for DimSize {
    fn default() -> Self {
        Self(K_DEFAULT_WIDTH, K_DEFAULT_HEIGHT)
    }
}

pub const K_DEFAULT_WIDTH: usize = 50;
pub const K_DEFAULT_HEIGHT: usize = 50;
