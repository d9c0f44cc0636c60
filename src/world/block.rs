use serde::{Deserialize, Serialize};

use super::position::{Direction, Position};

// 블럭의 종류
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BlockKind {
    #[default]
    Empty,
    ConstantSource,
    WiredLamp,
    Conductor,
    Lever,
    Inverter,
}

impl BlockKind {
    pub fn is_inverter(&self) -> bool {
        matches!(self, BlockKind::Inverter)
    }

    pub fn is_lever(&self) -> bool {
        matches!(self, BlockKind::Lever)
    }
}

// 모든 물리적 소자의 최소 단위
// `direction` is the output side of an inverter, `NoDirection` for every other kind
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub position: Position,
    pub powered: bool,
    pub direction: Direction,
}

impl Block {
    pub fn new(kind: BlockKind, position: Position, powered: bool, facing: Direction) -> Self {
        Self {
            kind,
            position,
            powered,
            direction: if kind.is_inverter() {
                facing
            } else {
                Direction::NoDirection
            },
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn is_powered(&self) -> bool {
        match self.kind {
            BlockKind::ConstantSource => true,
            _ => self.powered,
        }
    }

    pub fn set_powered(&mut self, powered: bool) {
        self.powered = powered;
    }

    pub fn facing(&self) -> Direction {
        self.direction
    }

    // FIXME: inverters accept a connection from both sides of their axis, not
    // only from the input side. Confirm with product owner before tightening.
    pub fn connects_from(&self, direction: Direction) -> bool {
        match self.kind {
            BlockKind::Inverter => direction.is_same_axis(self.direction),
            BlockKind::Empty
            | BlockKind::ConstantSource
            | BlockKind::WiredLamp
            | BlockKind::Conductor
            | BlockKind::Lever => true,
        }
    }

    pub fn name(&self) -> String {
        match self.kind {
            BlockKind::Inverter => format!("{} ({})", self.kind, self.direction),
            _ => self.kind.to_string(),
        }
    }
}
